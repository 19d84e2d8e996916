//! Process-wide lookup tables. Built once on first use, never mutated.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::sync::LazyLock;

use crate::error::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operator {
    pub precedence: u8,
    pub associativity: Associativity,
}

pub type BinaryFunction = fn(f64, f64) -> Result<f64, Error>;
pub type UnaryFunction = fn(f64) -> f64;

// Precedence reference: ^ binds tightest and groups to the right.
pub static OPERATORS: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    use Associativity::*;

    HashMap::from([
        ("^", Operator { precedence: 4, associativity: Right }),
        ("*", Operator { precedence: 3, associativity: Left }),
        ("/", Operator { precedence: 3, associativity: Left }),
        ("+", Operator { precedence: 2, associativity: Left }),
        ("-", Operator { precedence: 2, associativity: Left }),
    ])
});

/// Functions always pop before an incoming operator.
pub const FUNCTION_PRECEDENCE: u8 = 5;

pub static BINARY_OPERATORS: LazyLock<HashMap<&'static str, BinaryFunction>> =
    LazyLock::new(|| {
        let table: [(&'static str, BinaryFunction); 5] = [
            ("+", add),
            ("-", sub),
            ("*", mul),
            ("/", div),
            ("^", pow),
        ];
        HashMap::from(table)
    });

/// An entry without an implementation is a known name that cannot be called.
pub static FUNCTIONS: LazyLock<HashMap<&'static str, Option<UnaryFunction>>> =
    LazyLock::new(|| {
        let table: [(&'static str, Option<UnaryFunction>); 8] = [
            // Single-argument calls only, so these reduce to their argument.
            ("max", Some(identity)),
            ("min", Some(identity)),
            ("sin", None),
            ("cos", Some(f64::cos)),
            ("tan", Some(f64::tan)),
            ("abs", Some(f64::abs)),
            ("ln", Some(f64::ln)),
            ("log", Some(f64::log10)),
        ];
        HashMap::from(table)
    });

pub static SPECIAL_NUMBERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([("pi", PI), ("e", E)])
});

fn add(lhs: f64, rhs: f64) -> Result<f64, Error> {
    Ok(lhs + rhs)
}

fn sub(lhs: f64, rhs: f64) -> Result<f64, Error> {
    Ok(lhs - rhs)
}

fn mul(lhs: f64, rhs: f64) -> Result<f64, Error> {
    Ok(lhs * rhs)
}

fn div(lhs: f64, rhs: f64) -> Result<f64, Error> {
    if rhs == 0.0 {
        return Err(Error::DivisionByZero { dividend: lhs });
    }

    Ok(lhs / rhs)
}

fn pow(lhs: f64, rhs: f64) -> Result<f64, Error> {
    Ok(lhs.powf(rhs))
}

fn identity(value: f64) -> f64 {
    value
}
