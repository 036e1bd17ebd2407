#![allow(dead_code)]

use quill_core::ir::{ArithmeticOperator, Declaration, Expr, Program, Type};

pub const SAMPLE_PYTHON: &str = "\
# signature: (Atom -> Num)
def hello(what):
  return (42.0 if int(what == WORLD) else (10.0 if int(what == MA) else (0.0 - 100.0)))

# signature: (Num -> ([Num] -> Num))
def _sum(x):
  return lambda xs: (x + sum(xs))

# signature: ([Num] -> Num)
def sum(xs):
  return (0.0 if int(xs == []) else _sum(xs[0])(xs[1:]))

FALSE = 0;
TRUE = 1;
WORLD = 2;
MA = 3;


pipes = [];
";

pub fn sig(text: &str) -> Type {
    text.parse().expect("valid signature")
}

pub fn hello() -> Declaration {
    let what = || Expr::var("what");
    Declaration::new(
        "hello",
        sig("Atom -> Num"),
        Expr::closure(
            "what",
            Expr::cond(
                Expr::eq(what(), Expr::atom("WORLD")),
                Expr::num(42.0),
                Expr::cond(
                    Expr::eq(what(), Expr::atom("MA")),
                    Expr::num(10.0),
                    Expr::arith(ArithmeticOperator::Sub, Expr::num(0.0), Expr::num(100.0)),
                ),
            ),
        ),
    )
}

pub fn helper_sum() -> Declaration {
    Declaration::new(
        "_sum",
        sig("Num -> [Num] -> Num"),
        Expr::closures(
            ["x", "xs"],
            Expr::arith(
                ArithmeticOperator::Add,
                Expr::var("x"),
                Expr::apply(Expr::var("sum"), Expr::var("xs")),
            ),
        ),
    )
}

pub fn sum() -> Declaration {
    let xs = || Expr::var("xs");
    Declaration::new(
        "sum",
        sig("[Num] -> Num"),
        Expr::closure(
            "xs",
            Expr::cond(
                Expr::eq(xs(), Expr::empty_list()),
                Expr::num(0.0),
                Expr::apply_all(Expr::var("_sum"), [Expr::head(xs()), Expr::tail(xs())]),
            ),
        ),
    )
}

/// The three-declaration sample with atoms `WORLD` and `MA`.
pub fn sample_program() -> Program {
    Program::new()
        .with_atoms(["WORLD", "MA"])
        .with_declaration(hello())
        .with_declaration(helper_sum())
        .with_declaration(sum())
}

/// Merge sort over number lists: halves with slices, picks the smaller head
/// through a pair of lists.
pub fn merge_sort_program() -> Program {
    use quill_core::ir::ComparisonOperator;

    let v = Expr::var;
    let msort = Declaration::new(
        "msort",
        sig("[Num] -> [Num]"),
        Expr::closure("ns", Expr::apply_all(v("msort2"), [Expr::length(v("ns")), v("ns")])),
    );
    let half = || Expr::arith(ArithmeticOperator::Div, v("n"), Expr::num(2.0));
    let msort2 = Declaration::new(
        "msort2",
        sig("Num -> [Num] -> [Num]"),
        Expr::closures(
            ["n", "ns"],
            Expr::cond(
                Expr::compare(ComparisonOperator::Le, v("n"), Expr::num(1.0)),
                v("ns"),
                Expr::apply_all(
                    v("merge"),
                    [
                        Expr::apply(v("msort"), Expr::slice(v("ns"), Expr::num(0.0), half())),
                        Expr::apply(v("msort"), Expr::slice(v("ns"), half(), v("n"))),
                    ],
                ),
            ),
        ),
    );
    let cmp_head = Declaration::new(
        "cmp_head",
        sig("[Num] -> [Num] -> [[Num] [Num]]"),
        Expr::closures(
            ["xs", "ys"],
            Expr::cond(
                Expr::compare(ComparisonOperator::Lt, Expr::head(v("xs")), Expr::head(v("ys"))),
                Expr::tuple(vec![v("xs"), v("ys")]),
                Expr::tuple(vec![v("ys"), v("xs")]),
            ),
        ),
    );
    let merge = Declaration::new(
        "merge",
        sig("[Num] -> [Num] -> [Num]"),
        Expr::closures(
            ["xs", "ys"],
            Expr::cond(
                Expr::eq(v("xs"), Expr::empty_list()),
                v("ys"),
                Expr::cond(
                    Expr::eq(v("ys"), Expr::empty_list()),
                    v("xs"),
                    Expr::apply(v("merge2"), Expr::apply_all(v("cmp_head"), [v("xs"), v("ys")])),
                ),
            ),
        ),
    );
    let merge2 = Declaration::new(
        "merge2",
        sig("[[Num] [Num]] -> [Num]"),
        Expr::closure(
            "p",
            Expr::cons(
                Expr::head(Expr::first(v("p"))),
                Expr::apply_all(v("merge"), [Expr::tail(Expr::first(v("p"))), Expr::second(v("p"))]),
            ),
        ),
    );
    Program::new()
        .with_declaration(msort)
        .with_declaration(msort2)
        .with_declaration(cmp_head)
        .with_declaration(merge)
        .with_declaration(merge2)
}
