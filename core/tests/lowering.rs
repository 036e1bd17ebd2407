mod common;

use std::collections::HashSet;

use quill_core::config::BackendConfig;
use quill_core::error::BackendErrorKind;
use quill_core::generate_error_report;
use quill_core::ir::{ArithmeticOperator, Declaration, Expr, Program};
use quill_core::location::Location;
use quill_core::lower::{lower, lower_program, LoweringContext};
use quill_core::registry::{AtomRegistry, Session};
use quill_core::target::TargetExpr;

use common::{sample_program, sig};

fn lower_sample() -> quill_core::TargetUnit {
    let mut session = Session::new();
    lower_program(&sample_program(), &mut session, &BackendConfig::default()).expect("sample lowers")
}

#[test]
fn hello_lowers_to_single_parameter_function_with_nested_conditional() {
    let unit = lower_sample();
    let hello = unit.function("hello").expect("hello");

    let what = || TargetExpr::Local("what".into());
    let is_atom = |name: &str, id| TargetExpr::EqInt {
        lhs: Box::new(what()),
        rhs: Box::new(TargetExpr::Const { name: name.into(), id }),
    };
    let expected = TargetExpr::ternary(
        is_atom("WORLD", 2),
        TargetExpr::Num(42.0),
        TargetExpr::ternary(
            is_atom("MA", 3),
            TargetExpr::Num(10.0),
            TargetExpr::Arith {
                op: ArithmeticOperator::Sub,
                lhs: Box::new(TargetExpr::Num(0.0)),
                rhs: Box::new(TargetExpr::Num(100.0)),
            },
        ),
    );

    assert_eq!(hello.param.as_deref(), Some("what"));
    assert_eq!(hello.body, expected);
    assert_eq!(hello.arity(), 1);
}

#[test]
fn curried_declaration_returns_a_one_parameter_closure() {
    let unit = lower_sample();
    let helper = unit.function("_sum").expect("_sum");

    assert_eq!(helper.param.as_deref(), Some("x"));
    match &helper.body {
        TargetExpr::Lambda { param, body } => {
            assert_eq!(param, "xs");
            assert!(!body.is_lambda());
        }
        other => panic!("expected a lambda, got {}", other),
    }
    assert_eq!(helper.arity(), 2);
}

#[test]
fn unit_carries_atoms_and_empty_pipeline() {
    let unit = lower_sample();
    let names: Vec<&str> = unit.atoms.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["FALSE", "TRUE", "WORLD", "MA"]);
    assert!(unit.pipelines.is_empty());
    assert_eq!(unit.functions.len(), 3);
}

#[test]
fn variables_resolve_locals_before_globals() {
    let mut atoms = AtomRegistry::new();
    let globals: HashSet<String> = ["sum".to_string()].into_iter().collect();
    let mut ctx = LoweringContext::new(&mut atoms, &globals, false);
    ctx.enter_declaration("scratch", None);

    let expr = Expr::apply(Expr::var("sum"), Expr::var("sum"));
    let lowered = lower(&expr, &[], &mut ctx).expect("lower");
    assert_eq!(
        lowered,
        TargetExpr::call(TargetExpr::Global("sum".into()), TargetExpr::Global("sum".into()))
    );

    ctx.enter_declaration("scratch", None);
    let shadowed = lower(&Expr::var("sum"), &["sum".to_string()], &mut ctx).expect("lower");
    assert_eq!(shadowed, TargetExpr::Local("sum".into()));
}

#[test]
fn unbound_variable_names_declaration_and_node() {
    let decl = Declaration::new(
        "bad",
        sig("Num -> Num"),
        Expr::closure("x", Expr::arith(ArithmeticOperator::Add, Expr::var("x"), Expr::var("y"))),
    )
    .with_location(Location::new("bad.fn", 7, 1));
    let program = Program::new().with_declaration(decl);

    let err = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect_err("unbound");
    assert_eq!(err.kind(), &BackendErrorKind::UnboundVariable("y".into()));
    assert_eq!(err.declaration(), "bad");
    // closure #0, arithmetic #1, x #2, y #3
    assert_eq!(err.node(), Some(3));

    let report = generate_error_report(&err);
    assert!(report.contains("bad.fn:7:1"), "{}", report);
    assert!(report.contains("`bad`"), "{}", report);
    assert!(report.contains("node #3"), "{}", report);
}

#[test]
fn arity_mismatch_is_reported() {
    let decl = Declaration::new("short", sig("Num -> Num -> Num"), Expr::closure("a", Expr::var("a")));
    let program = Program::new().with_declaration(decl);

    let err = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect_err("arity");
    assert_eq!(err.kind(), &BackendErrorKind::ArityMismatch { expected: 2, found: 1 });
    assert_eq!(err.node(), Some(1));
}

#[test]
fn extra_closure_is_an_arity_mismatch_too() {
    let decl = Declaration::new("long", sig("Num -> Num"), Expr::closures(["a", "b"], Expr::var("a")));
    let program = Program::new().with_declaration(decl);

    let err = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect_err("arity");
    assert_eq!(err.kind(), &BackendErrorKind::ArityMismatch { expected: 1, found: 2 });
}

#[test]
fn unknown_atom_is_rejected_by_default() {
    let program = Program::new().with_declaration(common::hello());

    let err = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect_err("unknown atom");
    assert_eq!(err.kind(), &BackendErrorKind::UnknownAtom("WORLD".into()));
    assert_eq!(err.node(), Some(4));
}

#[test]
fn implicit_atoms_register_on_first_reference() {
    let program = Program::new().with_declaration(common::hello());
    let config = BackendConfig { implicit_atoms: true, ..BackendConfig::default() };

    let mut session = Session::new();
    let unit = lower_program(&program, &mut session, &config).expect("lowers");
    assert_eq!(session.atoms().lookup("WORLD"), Some(2));
    assert_eq!(session.atoms().lookup("MA"), Some(3));
    assert_eq!(unit.atoms.len(), 4);
}

#[test]
fn boolean_atoms_can_be_switched_off() {
    let config = BackendConfig { boolean_atoms: false, ..BackendConfig::default() };
    let mut session = Session::new();
    lower_program(&sample_program(), &mut session, &config).expect("lowers");
    assert_eq!(session.atoms().lookup("WORLD"), Some(0));
    assert!(!session.atoms().contains("FALSE"));
}

#[test]
fn value_declaration_becomes_a_binding() {
    let decl = Declaration::new("empty", sig("[Num]"), Expr::empty_list());
    let program = Program::new().with_declaration(decl);

    let unit = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect("lowers");
    let empty = unit.function("empty").expect("empty");
    assert!(empty.is_value());
    assert_eq!(empty.body, TargetExpr::Array(vec![]));
}

#[test]
fn duplicate_declarations_are_rejected() {
    let program = Program::new().with_declaration(common::sum()).with_declaration(common::sum());
    let err = lower_program(&program, &mut Session::new(), &BackendConfig::default()).expect_err("duplicate");
    assert_eq!(err.kind(), &BackendErrorKind::DuplicateDeclaration("sum".into()));
}

#[test]
fn pipeline_entries_must_name_declarations() {
    let mut session = Session::new();
    session.pipelines_mut().register("missing");

    let err = lower_program(&sample_program(), &mut session, &BackendConfig::default()).expect_err("pipeline");
    assert_eq!(err.kind(), &BackendErrorKind::UnknownPipelineStage("missing".into()));
    assert_eq!(err.declaration(), "pipes");
}

#[test]
fn tuples_and_slices_lower_structurally() {
    let mut atoms = AtomRegistry::new();
    let globals = HashSet::new();
    let mut ctx = LoweringContext::new(&mut atoms, &globals, false);
    ctx.enter_declaration("halves", None);

    let expr = Expr::tuple(vec![
        Expr::slice(Expr::var("xs"), Expr::num(0.0), Expr::num(1.0)),
        Expr::second(Expr::var("p")),
    ]);
    let lowered = lower(&expr, &["xs".to_string(), "p".to_string()], &mut ctx).expect("lower");
    assert_eq!(
        lowered,
        TargetExpr::Tuple(vec![
            TargetExpr::Slice {
                list: Box::new(TargetExpr::Local("xs".into())),
                from: Box::new(TargetExpr::Num(0.0)),
                to: Box::new(TargetExpr::Num(1.0)),
            },
            TargetExpr::Project { tuple: Box::new(TargetExpr::Local("p".into())), index: 1 },
        ])
    );
    assert_eq!(lowered.to_string(), "(tuple (slice (local xs) 0.0 1.0) (get (local p) 1))");
}

#[test]
fn unbound_name_inside_a_slice_bound_is_numbered_in_pre_order() {
    let decl = Declaration::new(
        "front",
        sig("[Num] -> [Num]"),
        Expr::closure("xs", Expr::slice(Expr::var("xs"), Expr::num(0.0), Expr::var("n"))),
    );
    let err = lower_program(&Program::new().with_declaration(decl), &mut Session::new(), &BackendConfig::default())
        .expect_err("unbound");
    assert_eq!(err.kind(), &BackendErrorKind::UnboundVariable("n".into()));
    // closure #0, slice #1, xs #2, 0.0 #3, n #4
    assert_eq!(err.node(), Some(4));
}
