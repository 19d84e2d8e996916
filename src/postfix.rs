use crate::error::Error;
use crate::helpers::is_function;
use crate::math::{Associativity, FUNCTION_PRECEDENCE, OPERATORS};
use crate::token::{Token, TokenKind};

/// Whether `a`, sitting on top of the operator stack, must be popped before
/// `b` is pushed.
pub fn has_precedence(a: &str, b: &str) -> bool {
    let Some(incoming) = OPERATORS.get(b) else {
        return false;
    };
    let top = match OPERATORS.get(a) {
        Some(op) => op.precedence,
        None if is_function(a) => FUNCTION_PRECEDENCE,
        None => return false,
    };

    match incoming.associativity {
        Associativity::Right => top > incoming.precedence,
        Associativity::Left => top >= incoming.precedence,
    }
}

/// Shunting-yard conversion of infix tokens into postfix symbols.
pub fn to_postfix<'source>(tokens: &[Token<'source>]) -> Result<Vec<&'source str>, Error> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&Token<'source>> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Identifier => output.push(token.lexeme),
            TokenKind::LeftParen | TokenKind::Function => stack.push(token),
            TokenKind::Operator => {
                while let Some(&top) = stack.last() {
                    if top.kind == TokenKind::LeftParen || !has_precedence(top.lexeme, token.lexeme)
                    {
                        break;
                    }
                    stack.pop();
                    output.push(top.lexeme);
                }
                stack.push(token);
            }
            TokenKind::RightParen => {
                loop {
                    match stack.pop() {
                        Some(top) if top.kind == TokenKind::LeftParen => break,
                        Some(top) => output.push(top.lexeme),
                        None => {
                            return Err(Error::UnbalancedParentheses {
                                problem: "')' has no matching '('",
                                span: token.span.into(),
                            })
                        }
                    }
                }

                // A group directly after a function name is its argument.
                if let Some(&top) = stack.last() {
                    if top.kind == TokenKind::Function {
                        stack.pop();
                        output.push(top.lexeme);
                    }
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == TokenKind::LeftParen {
            return Err(Error::UnbalancedParentheses {
                problem: "'(' is never closed",
                span: top.span.into(),
            });
        }
        output.push(top.lexeme);
    }

    tracing::debug!(?output, "converted to postfix");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn postfix(input: &str) -> Result<Vec<&str>, Error> {
        to_postfix(&tokenize(input))
    }

    #[test]
    fn test_has_precedence() {
        // Equal precedence pops for left-associative operators only.
        assert!(!has_precedence("^", "^"));
        for op in ["*", "/", "+", "-"] {
            assert!(has_precedence(op, op), "has_precedence('{op}', '{op}')");
        }

        for (a, b, expected) in [
            ("*", "+", true),
            ("+", "*", false),
            ("^", "*", true),
            ("*", "^", false),
            ("/", "*", true),
            ("-", "+", true),
            ("max", "^", true),
            ("(", "+", false),
            ("x", "+", false),
        ] {
            assert_eq!(has_precedence(a, b), expected, "has_precedence('{a}', '{b}')");
        }
    }

    #[test]
    fn test_postfix() {
        for (input, expected) in [
            ("3+4*2", vec!["3", "4", "2", "*", "+"]),
            ("(3+4)*2", vec!["3", "4", "+", "2", "*"]),
            ("2^3^2", vec!["2", "3", "2", "^", "^"]),
            ("10/2/5", vec!["10", "2", "/", "5", "/"]),
            ("a*(b-c)/d", vec!["a", "b", "c", "-", "*", "d", "/"]),
            ("2*max(3-5)", vec!["2", "3", "5", "-", "max", "*"]),
            ("abs2+1", vec!["2", "abs", "1", "+"]),
            ("((7))", vec!["7"]),
            ("", vec![]),
        ] {
            assert_eq!(postfix(input).unwrap(), expected, "when converting '{input}'");
        }
    }

    #[test]
    fn test_unbalanced_parentheses() {
        for (input, offset) in [(")1(", 0), ("(1+2", 0), ("1+2)", 3), ("(1+(2)", 0), ("((1)", 0)] {
            match postfix(input) {
                Err(Error::UnbalancedParentheses { span, .. }) => {
                    assert_eq!(span.offset(), offset, "when converting '{input}'")
                }
                other => panic!("expected unbalanced parentheses for '{input}', got {other:?}"),
            }
        }
    }
}
