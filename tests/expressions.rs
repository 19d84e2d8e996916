use std::iter::Peekable;
use std::str::Chars;

use infix_ast::{build, evaluate, evaluate_with, postfix, Bindings, Error};
use rstest::*;

#[rstest]
#[case("3+4*2", 11.0)]
#[case("(3+4)*2", 14.0)]
#[case("2^3^2", 512.0)]
#[case("10/2/5", 1.0)]
#[case("8-3-2", 3.0)]
#[case(" 3 + 4 * 2 ", 11.0)]
#[case("((2))", 2.0)]
#[case("2*(3+4)^2", 98.0)]
#[case("12,+3", 15.0)]
#[case("2*abs(3-5)", 4.0)]
#[case("max(4)+min(1)", 5.0)]
#[case("log(10)", 1.0)]
#[case("ln(1)", 0.0)]
#[case("abs2^2", 4.0)]
fn evaluates(#[case] expr: &str, #[case] expected: f64) {
    let tree = build(expr).expect("building should succeed");
    assert_eq!(evaluate(&tree).expect("evaluation should succeed"), expected);
}

#[rstest]
#[case("pi", std::f64::consts::PI)]
#[case("e", std::f64::consts::E)]
#[case("2*pi", 2.0 * std::f64::consts::PI)]
fn special_numbers(#[case] expr: &str, #[case] expected: f64) {
    assert_eq!(evaluate(&build(expr).unwrap()).unwrap(), expected);
}

#[rstest]
#[case(")1(")]
#[case("(1+2")]
#[case("1+2)")]
#[case("max(1")]
fn unbalanced_parentheses(#[case] expr: &str) {
    assert!(
        matches!(build(expr), Err(Error::UnbalancedParentheses { .. })),
        "'{expr}' should be rejected"
    );
}

#[test]
fn evaluation_faults() {
    let tree = build("1/(2-2)").unwrap();
    assert!(matches!(evaluate(&tree), Err(Error::DivisionByZero { .. })));

    let tree = build("sin(1)").unwrap();
    assert!(matches!(
        evaluate(&tree),
        Err(Error::UnsupportedOperation { function }) if function == "sin"
    ));

    let tree = build("x*2").unwrap();
    assert!(matches!(
        evaluate(&tree),
        Err(Error::UnknownSymbol { symbol }) if symbol == "x"
    ));

    for expr in ["(1)(2)+3", "(1)(2)", "xsin(1)"] {
        assert!(
            matches!(build(expr), Err(Error::MalformedExpression { .. })),
            "'{expr}' should be rejected"
        );
    }
}

#[test]
fn function_without_argument_sees_zero() {
    // No unary minus: the operator closes the call before any operand.
    let tree = build("abs-2").unwrap();
    assert_eq!(tree.bfs(), ["-", "abs", "2"]);
    assert_eq!(evaluate(&tree).unwrap(), -2.0);
}

#[rstest]
#[case("+", 20_000, 20_000.0)]
#[case("+", 200_000, 200_000.0)]
#[case("^", 20_000, 1.0)]
fn long_chains(#[case] op: &str, #[case] terms: usize, #[case] expected: f64) {
    let expr = vec!["1"; terms].join(op);
    let tree = build(&expr).unwrap();
    assert_eq!(tree.max_depth(), terms);
    assert_eq!(evaluate(&tree).unwrap(), expected);
}

#[test]
fn free_identifiers_take_bindings() {
    let tree = build("x^2 + y").unwrap();
    let bindings = Bindings::from([("x".to_string(), 3.0), ("y".to_string(), 1.0)]);
    assert_eq!(evaluate_with(&tree, &bindings).unwrap(), 10.0);
}

#[rstest]
#[case("3", 1)]
#[case("1+2*3", 3)]
#[case("(1+2)*3", 3)]
#[case("1+2+3+4", 4)]
#[case("abs(1)", 2)]
#[case("", 0)]
fn max_depth(#[case] expr: &str, #[case] depth: usize) {
    assert_eq!(build(expr).unwrap().max_depth(), depth);
}

#[test]
fn tree_shape_for_precedence() {
    let tree = build("1+2*3").unwrap();
    assert_eq!(tree.preorder(), ["+", "1", "*", "2", "3"]);
    assert_eq!(tree.inorder(), ["1", "+", "2", "*", "3"]);
    assert_eq!(tree.bfs(), ["+", "1", "*", "2", "3"]);
    assert_eq!(
        tree.level_order(),
        vec![vec!["+"], vec!["1", "*"], vec!["2", "3"]]
    );

    // Root '+', right child '*', whose right child is the deepest leaf.
    let root = tree.node(tree.root().unwrap());
    let times = tree.node(root.right().unwrap());
    assert_eq!(times.symbol, "*");
    assert_eq!(tree.node(times.right().unwrap()).symbol, "3");
}

#[test]
fn copy_shares_no_nodes() {
    let tree = build("(1+2)*3").unwrap();
    let mut copy = tree.copy();
    assert_eq!(copy, tree);

    let leaf = copy.node(copy.root().unwrap()).right().unwrap();
    copy.node_mut(leaf).symbol = "4".to_string();

    assert_eq!(evaluate(&tree).unwrap(), 9.0);
    assert_eq!(evaluate(&copy).unwrap(), 12.0);
    assert_eq!(tree.postorder(), ["1", "2", "+", "3", "*"]);
}

/// Plain recursive descent with the usual precedence rules. `None` on division
/// by zero.
struct Reference<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Reference<'_> {
    fn evaluate(expr: &str) -> Option<f64> {
        Reference {
            chars: expr.chars().peekable(),
        }
        .sum()
    }

    fn sum(&mut self) -> Option<f64> {
        let mut value = self.product()?;
        while let Some(&c @ ('+' | '-')) = self.chars.peek() {
            self.chars.next();
            let rhs = self.product()?;
            value = if c == '+' { value + rhs } else { value - rhs };
        }
        Some(value)
    }

    fn product(&mut self) -> Option<f64> {
        let mut value = self.power()?;
        while let Some(&c @ ('*' | '/')) = self.chars.peek() {
            self.chars.next();
            let rhs = self.power()?;
            value = if c == '*' {
                value * rhs
            } else if rhs == 0.0 {
                return None;
            } else {
                value / rhs
            };
        }
        Some(value)
    }

    fn power(&mut self) -> Option<f64> {
        let base = self.primary()?;
        if let Some('^') = self.chars.peek() {
            self.chars.next();
            return Some(base.powf(self.power()?));
        }
        Some(base)
    }

    fn primary(&mut self) -> Option<f64> {
        if let Some('(') = self.chars.peek() {
            self.chars.next();
            let value = self.sum()?;
            assert_eq!(self.chars.next(), Some(')'));
            return Some(value);
        }

        let mut digits = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        Some(digits.parse().expect("generated expressions are well formed"))
    }
}

/// Small xorshift generator so the expressions are the same on every run.
struct Generator(u64);

impl Generator {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 % bound
    }

    fn expression(&mut self, depth: u32) -> String {
        if depth == 0 || self.next(4) == 0 {
            return self.next(10).to_string();
        }

        let op = ['+', '-', '*', '/', '^'][self.next(5) as usize];
        let lhs = self.expression(depth - 1);
        // Keep exponents small so results stay finite most of the time.
        let rhs = if op == '^' {
            self.next(4).to_string()
        } else {
            self.expression(depth - 1)
        };

        if self.next(2) == 0 {
            format!("({lhs}{op}{rhs})")
        } else {
            format!("{lhs}{op}{rhs}")
        }
    }
}

#[test]
fn matches_reference_evaluator() {
    let mut generator = Generator(0x2545_f491_4f6c_dd1d);
    let mut compared = 0;

    for _ in 0..500 {
        let expr = generator.expression(4);
        let tree = build(&expr).expect("generated expressions are well formed");

        // The tree remembers the postfix order it was built from.
        assert_eq!(tree.postorder(), postfix(&expr).unwrap(), "for '{expr}'");

        match (evaluate(&tree), Reference::evaluate(&expr)) {
            (Ok(actual), Some(expected)) => {
                assert!(
                    actual == expected || (actual.is_nan() && expected.is_nan()),
                    "'{expr}' evaluated to {actual}, expected {expected}"
                );
                compared += 1;
            }
            (Err(Error::DivisionByZero { .. }), None) => {}
            (actual, expected) => panic!("'{expr}': got {actual:?}, expected {expected:?}"),
        }
    }

    assert!(compared > 100, "only {compared} expressions were comparable");
}
