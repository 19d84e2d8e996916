use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("unbalanced parentheses: {problem}")]
    #[diagnostic(code(infix_ast::unbalanced_parentheses))]
    UnbalancedParentheses {
        problem: &'static str,
        #[label]
        span: SourceSpan,
    },

    #[error("unknown symbol '{symbol}'")]
    #[diagnostic(
        code(infix_ast::unknown_symbol),
        help("free identifiers need a binding before they can be evaluated")
    )]
    UnknownSymbol { symbol: String },

    #[error("attempted to divide {dividend} by zero")]
    #[diagnostic(code(infix_ast::division_by_zero))]
    DivisionByZero { dividend: f64 },

    #[error("function '{function}' has no implementation")]
    #[diagnostic(code(infix_ast::unsupported_operation))]
    UnsupportedOperation { function: String },

    #[error("no open slot left in the tree for '{symbol}'")]
    #[diagnostic(
        code(infix_ast::malformed_expression),
        help("the expression has more operands than its operators can take")
    )]
    MalformedExpression { symbol: String },
}
