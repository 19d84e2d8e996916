//! Infix expressions to postfix, postfix to an expression tree, and the tree
//! to a number.
//!
//! ```
//! let tree = infix_ast::build("(3 + 4) * 2").unwrap();
//! assert_eq!(tree.postorder(), ["3", "4", "+", "2", "*"]);
//! assert_eq!(infix_ast::evaluate(&tree).unwrap(), 14.0);
//! ```

pub mod ast;
pub mod error;
pub mod eval;
mod helpers;
pub mod lexer;
pub mod math;
pub mod postfix;
pub mod token;
mod traversal;

pub use ast::{Node, NodeId, Tree};
pub use error::Error;
pub use eval::{Bindings, Evaluator};
pub use helpers::{is_function, is_number, is_special_number, is_symbol};

/// Drops every whitespace character. Token spans refer to the result.
pub fn strip_whitespace(expr: &str) -> String {
    expr.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Postfix symbols for `expr`, after whitespace removal.
pub fn postfix(expr: &str) -> Result<Vec<String>, Error> {
    let source = strip_whitespace(expr);
    let tokens = lexer::tokenize(&source);
    let symbols = postfix::to_postfix(&tokens)?;
    Ok(symbols.into_iter().map(str::to_string).collect())
}

/// Builds the expression tree for an infix expression.
pub fn build(expr: &str) -> Result<Tree, Error> {
    Tree::from_postfix(postfix(expr)?)
}

/// Evaluates a built tree. Free identifiers fail with `Error::UnknownSymbol`.
pub fn evaluate(tree: &Tree) -> Result<f64, Error> {
    Evaluator::new(tree).evaluate()
}

/// Evaluates a built tree, resolving free identifiers from `bindings`.
pub fn evaluate_with(tree: &Tree, bindings: &Bindings) -> Result<f64, Error> {
    Evaluator::new(tree).with_bindings(bindings).evaluate()
}
