use crate::helpers::is_operator_char;
use crate::math::FUNCTIONS;
use crate::token::{Span, Token, TokenKind};

/// Splits a whitespace-free expression into tokens.
///
/// Characters that start no token (`,` included) are skipped without a
/// diagnostic, so iteration never fails.
pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    pub position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'source> {
        let start = self.position;
        self.position += len;
        self.rest = &self.rest[len..];

        Token {
            kind,
            lexeme: &self.source[start..self.position],
            span: Span {
                start,
                end: self.position,
            },
        }
    }

    fn match_function(&self) -> Option<usize> {
        FUNCTIONS
            .keys()
            .filter(|name| self.rest.starts_with(**name))
            .map(|name| name.len())
            .max()
    }

    fn run_len(&self, predicate: impl Fn(char) -> bool) -> usize {
        self.rest
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len())
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let c = self.rest.chars().next()?;

            if let Some(len) = self.match_function() {
                return Some(self.emit(TokenKind::Function, len));
            }

            let token = match c {
                '0'..='9' => {
                    let len = self.run_len(|c| c.is_ascii_digit());
                    self.emit(TokenKind::Number, len)
                }
                c if c.is_alphabetic() => {
                    let len = self.run_len(char::is_alphabetic);
                    self.emit(TokenKind::Identifier, len)
                }
                '(' => self.emit(TokenKind::LeftParen, 1),
                ')' => self.emit(TokenKind::RightParen, 1),
                c if is_operator_char(c) => self.emit(TokenKind::Operator, 1),
                c => {
                    tracing::trace!(position = self.position, "skipping '{c}'");
                    self.position += c.len_utf8();
                    self.rest = &self.rest[c.len_utf8()..];
                    continue;
                }
            };

            return Some(token);
        }
    }
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let tokens: Vec<_> = Lexer::new(source).collect();
    tracing::debug!(count = tokens.len(), "tokenized expression");
    tokens
}
