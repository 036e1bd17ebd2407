mod common;

use quill_core::config::BackendConfig;
use quill_core::emit::{emit_unit, NameTable};
use quill_core::ir::{ArithmeticOperator, ComparisonOperator, Declaration, Expr, Program};
use quill_core::registry::Session;
use quill_core::target::{TargetFunction, TargetUnit, TargetExpr};
use quill_core::{compile_program, compile_with_session};

use common::{merge_sort_program, sample_program, sig, SAMPLE_PYTHON};

fn python(program: &Program) -> String {
    compile_program(program, &BackendConfig::default()).expect("compiles")
}

#[test]
fn sample_program_matches_reference_output() {
    assert_eq!(python(&sample_program()), SAMPLE_PYTHON);
}

#[test]
fn sample_json_document_matches_reference_output() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../cli/samples/tops.json");
    let program = Program::load_from_file(path).expect("sample document");
    assert_eq!(python(&program), SAMPLE_PYTHON);
}

#[test]
fn empty_program_still_emits_trailing_sections() {
    assert_eq!(python(&Program::new()), "FALSE = 0;\nTRUE = 1;\n\n\npipes = [];\n");

    let bare = BackendConfig { boolean_atoms: false, ..BackendConfig::default() };
    assert_eq!(compile_program(&Program::new(), &bare).expect("compiles"), "\n\npipes = [];\n");
}

#[test]
fn pipeline_entries_and_binding_name() {
    let config = BackendConfig { pipeline_binding: "stages".into(), ..BackendConfig::default() };
    let mut session = Session::new();
    session.pipelines_mut().register("sum");
    session.pipelines_mut().register("hello");

    let out = compile_with_session(&sample_program(), &config, &mut session).expect("compiles");
    assert!(out.ends_with("MA = 3;\n\n\nstages = [sum, hello];\n"), "{}", out);
}

#[test]
fn value_declarations_follow_the_atom_block() {
    let program = Program::new()
        .with_atoms(["RED"])
        .with_declaration(Declaration::new(
            "primes",
            sig("[Num]"),
            Expr::list(vec![Expr::num(2.0), Expr::num(3.0)]),
        ));
    assert_eq!(
        python(&program),
        "FALSE = 0;\nTRUE = 1;\nRED = 2;\n# signature: [Num]\nprimes = [2.0, 3.0];\n\n\npipes = [];\n"
    );
}

#[test]
fn list_primitives_and_comparisons() {
    let xs = || Expr::var("xs");
    let decl = Declaration::new(
        "shuffle",
        sig("[Num] -> [Num]"),
        Expr::closure(
            "xs",
            Expr::cond(
                Expr::compare(ComparisonOperator::Le, Expr::length(xs()), Expr::num(1.0)),
                xs(),
                Expr::concat(Expr::tail(xs()), Expr::cons(Expr::head(xs()), Expr::empty_list())),
            ),
        ),
    );
    let out = python(&Program::new().with_declaration(decl));
    assert!(
        out.contains("  return (xs if int(len(xs) <= 1.0) else (xs[1:] + ([xs[0]] + [])))\n"),
        "{}",
        out
    );
}

#[test]
fn numbers_keep_a_fractional_part() {
    let decl = Declaration::new(
        "consts",
        sig("[Num]"),
        Expr::list(vec![
            Expr::num(42.0),
            Expr::num(-100.0),
            Expr::num(0.5),
            Expr::num(f64::INFINITY),
            Expr::num(f64::NAN),
        ]),
    );
    let out = python(&Program::new().with_declaration(decl));
    assert!(out.contains("consts = [42.0, (-100.0), 0.5, float('inf'), float('nan')];"), "{}", out);
}

#[test]
fn reserved_words_and_intrinsics_are_escaped() {
    let decl = Declaration::new(
        "len",
        sig("Num -> Num -> Num"),
        Expr::closures(
            ["lambda", "int"],
            Expr::arith(ArithmeticOperator::Mul, Expr::var("lambda"), Expr::var("int")),
        ),
    );
    let out = python(&Program::new().with_declaration(decl));
    assert!(out.contains("def len_(lambda_):\n  return lambda int_: (lambda_ * int_)\n"), "{}", out);
}

#[test]
fn parameters_avoid_atom_constants() {
    let decl = Declaration::new(
        "pick",
        sig("Atom -> Atom"),
        Expr::closure("RED", Expr::cond(Expr::eq(Expr::var("RED"), Expr::atom("RED")), Expr::atom("TRUE"), Expr::atom("FALSE"))),
    );
    let out = python(&Program::new().with_atoms(["RED"]).with_declaration(decl));
    assert!(out.contains("def pick(RED_):\n  return (TRUE if int(RED_ == RED) else FALSE)\n"), "{}", out);
}

#[test]
fn inner_parameter_never_captures_a_different_outer_one() {
    let table = NameTable::new(&["lambda"]);
    let mut scope = table.scope();
    assert_eq!(scope.bind("x_"), "x_");
    assert_eq!(scope.bind("x"), "x");
    scope.unbind();
    scope.unbind();

    let unit = TargetUnit {
        functions: vec![TargetFunction {
            name: "x".into(),
            signature: sig("Num -> Num"),
            param: Some("y".into()),
            body: TargetExpr::Local("y".into()),
        }],
        atoms: vec![],
        pipelines: vec![],
    };
    let table = NameTable::for_unit(&unit, &["lambda"], "pipes");
    let mut scope = table.scope();
    assert_eq!(scope.bind("x_"), "x_");
    // `x` is taken by the declaration, `x_` by an enclosing parameter
    assert_eq!(scope.bind("x"), "x__");
    assert_eq!(scope.local("x_"), "x_");
}

#[test]
fn lambdas_in_operand_position_are_parenthesized() {
    let unit = TargetUnit {
        functions: vec![TargetFunction {
            name: "twice".into(),
            signature: sig("Num -> Num"),
            param: Some("n".into()),
            body: TargetExpr::call(
                TargetExpr::lambda("m", TargetExpr::Local("m".into())),
                TargetExpr::Local("n".into()),
            ),
        }],
        atoms: vec![],
        pipelines: vec![],
    };
    let config = BackendConfig { indent: 4, ..BackendConfig::default() };
    let out = emit_unit(&unit, &config).expect("emits");
    assert_eq!(out, "# signature: (Num -> Num)\ndef twice(n):\n    return (lambda m: m)(n)\n\n\n\npipes = [];\n");
}

#[test]
fn tuples_projections_and_slices() {
    let out = python(&merge_sort_program());
    assert!(
        out.contains(
            "def msort2(n):\n  return lambda ns: (ns if int(n <= 1.0) else merge(msort(ns[int(0.0):int((n / 2.0))]))(msort(ns[int((n / 2.0)):int(n)])))\n"
        ),
        "{}",
        out
    );
    assert!(out.contains("# signature: ([[Num] [Num]] -> [Num])\ndef merge2(p):\n  return ([p[0][0]] + merge(p[0][1:])(p[1]))\n"), "{}", out);
    assert!(out.contains("  return lambda ys: ((xs, ys) if int(xs[0] < ys[0]) else (ys, xs))\n"), "{}", out);
}

#[test]
fn one_element_tuple_keeps_its_comma() {
    let decl = Declaration::new("single", sig("Num -> [Num Num]"), Expr::closure("x", Expr::tuple(vec![Expr::var("x")])));
    assert!(python(&Program::new().with_declaration(decl)).contains("  return (x,)\n"));
}
