mod common;

use quill_core::compile_program;
use quill_core::config::{BackendConfig, TargetKind};
use quill_core::ir::{ComparisonOperator, Declaration, Expr, Program};

use common::{merge_sort_program, sample_program, sig};

fn javascript(program: &Program) -> String {
    compile_program(program, &BackendConfig::for_target(TargetKind::Javascript)).expect("compiles")
}

#[test]
fn sample_program_in_javascript() {
    let expected = "\
// function \"equal\" has type (a -> (a -> Atom))
function equal(a, b) {
  return +(a === b || (Array.isArray(a) && Array.isArray(b) && JSON.stringify(a) === JSON.stringify(b)));
}

// signature: (Atom -> Num)
export function hello(what) {
  return (equal(what, WORLD) ? 42.0 : (equal(what, MA) ? 10.0 : (0.0 - 100.0)));
}

// signature: (Num -> ([Num] -> Num))
export function _sum(x) {
  return (xs) => (x + sum(xs));
}

// signature: ([Num] -> Num)
export function sum(xs) {
  return (equal(xs, []) ? 0.0 : _sum(xs[0])(xs.slice(1)));
}

export const FALSE = 0;
export const TRUE = 1;
export const WORLD = 2;
export const MA = 3;


export const pipes = [];
";
    assert_eq!(javascript(&sample_program()), expected);
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
                Expr::compare(ComparisonOperator::Lt, Expr::length(xs()), Expr::num(2.0)),
                xs(),
                Expr::concat(Expr::tail(xs()), Expr::cons(Expr::head(xs()), Expr::empty_list())),
            ),
        ),
    );
    let out = javascript(&Program::new().with_declaration(decl));
    assert!(
        out.contains("  return (+(xs.length < 2.0) ? xs : xs.slice(1).concat([xs[0], ...[]]));\n"),
        "{}",
        out
    );
}

#[test]
fn value_declarations_are_exported_constants() {
    let program = Program::new().with_declaration(Declaration::new("empty", sig("[Num]"), Expr::empty_list()));
    assert!(javascript(&program).ends_with("export const TRUE = 1;\n// signature: [Num]\nexport const empty = [];\n\n\nexport const pipes = [];\n"));
}

#[test]
fn intrinsic_and_keywords_are_escaped() {
    let decl = Declaration::new(
        "equal",
        sig("Num -> Num"),
        Expr::closure("function", Expr::var("function")),
    );
    let out = javascript(&Program::new().with_declaration(decl));
    assert!(out.contains("export function equal_(function_) {\n  return function_;\n}"), "{}", out);
}

#[test]
fn non_finite_numbers_use_javascript_spelling() {
    let decl = Declaration::new("edge", sig("[Num]"), Expr::list(vec![Expr::num(f64::NEG_INFINITY), Expr::num(f64::NAN)]));
    assert!(javascript(&Program::new().with_declaration(decl)).contains("export const edge = [(-Infinity), NaN];"));
}

#[test]
fn equal_checks_identity_before_comparing_arrays() {
    let out = javascript(&Program::new());
    assert!(out.contains("return +(a === b || (Array.isArray(a) && Array.isArray(b) && "), "{}", out);
}

#[test]
fn tuples_are_arrays_and_slices_call_slice() {
    let out = javascript(&merge_sort_program());
    assert!(
        out.contains(
            "export function msort2(n) {\n  return (ns) => (+(n <= 1.0) ? ns : merge(msort(ns.slice(0.0, (n / 2.0))))(msort(ns.slice((n / 2.0), n))));\n}"
        ),
        "{}",
        out
    );
    assert!(out.contains("// signature: ([Num] -> ([Num] -> [[Num] [Num]]))\n"), "{}", out);
    assert!(out.contains("  return (ys) => (+(xs[0] < ys[0]) ? [xs, ys] : [ys, xs]);\n"), "{}", out);
    assert!(out.contains("export function merge2(p) {\n  return [p[0][0], ...merge(p[0].slice(1))(p[1])];\n}"), "{}", out);
}
