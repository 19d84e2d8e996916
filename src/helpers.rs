use crate::math::{BINARY_OPERATORS, FUNCTIONS, OPERATORS, SPECIAL_NUMBERS};

/// `+ - * / ^`
pub fn is_symbol(s: &str) -> bool {
    BINARY_OPERATORS.contains_key(s)
}

/// Names from the function table, whether or not they are callable.
pub fn is_function(s: &str) -> bool {
    FUNCTIONS.contains_key(s)
}

pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_special_number(s: &str) -> bool {
    SPECIAL_NUMBERS.contains_key(s)
}

pub(crate) fn is_operator_char(c: char) -> bool {
    let mut buf = [0; 4];
    OPERATORS.contains_key(&*c.encode_utf8(&mut buf))
}

/// Symbols that open a subtree during construction rather than filling a slot.
pub(crate) fn is_link(s: &str) -> bool {
    is_symbol(s) || is_function(s)
}
