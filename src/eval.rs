use std::collections::HashMap;

use crate::ast::{NodeId, Tree};
use crate::error::Error;
use crate::helpers::is_number;
use crate::math::{BINARY_OPERATORS, FUNCTIONS, SPECIAL_NUMBERS};

pub type Bindings = HashMap<String, f64>;

/// Reduces a tree to a number.
///
/// Walks with an explicit stack, so tree depth is limited only by memory.
pub struct Evaluator<'a> {
    tree: &'a Tree,
    bindings: Option<&'a Bindings>,
}

enum Step {
    Visit(Option<NodeId>),
    Apply(NodeId),
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            bindings: None,
        }
    }

    /// Resolve free identifiers from `bindings`. Special numbers cannot be
    /// shadowed.
    pub fn with_bindings(mut self, bindings: &'a Bindings) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn evaluate(&self) -> Result<f64, Error> {
        let mut steps = vec![Step::Visit(self.tree.root())];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(id) => {
                    // Missing children count as zero.
                    let Some(id) = id else {
                        values.push(0.0);
                        continue;
                    };
                    let node = self.tree.node(id);
                    let symbol = node.symbol.as_str();

                    if let Some(function) = FUNCTIONS.get(symbol) {
                        if function.is_none() {
                            return Err(Error::UnsupportedOperation {
                                function: symbol.to_string(),
                            });
                        }
                        steps.push(Step::Apply(id));
                        steps.push(Step::Visit(node.right()));
                    } else if let Some(value) = self.leaf_value(symbol)? {
                        values.push(value);
                    } else if BINARY_OPERATORS.contains_key(symbol) {
                        // Left is popped, and so evaluated, first.
                        steps.push(Step::Apply(id));
                        steps.push(Step::Visit(node.right()));
                        steps.push(Step::Visit(node.left()));
                    } else {
                        return Err(Error::UnknownSymbol {
                            symbol: symbol.to_string(),
                        });
                    }
                }
                Step::Apply(id) => {
                    let symbol = self.tree.node(id).symbol.as_str();
                    // Every visit leaves exactly one value behind.
                    let rhs = values.pop().unwrap_or_default();

                    let value = if let Some(Some(function)) = FUNCTIONS.get(symbol) {
                        function(rhs)
                    } else if let Some(operator) = BINARY_OPERATORS.get(symbol) {
                        let lhs = values.pop().unwrap_or_default();
                        operator(lhs, rhs)?
                    } else {
                        return Err(Error::UnknownSymbol {
                            symbol: symbol.to_string(),
                        });
                    };
                    values.push(value);
                }
            }
        }

        let value = values.pop().unwrap_or_default();
        tracing::debug!(value, "evaluated expression tree");
        Ok(value)
    }

    /// Numbers, special numbers and bound identifiers. `None` for anything else.
    fn leaf_value(&self, symbol: &str) -> Result<Option<f64>, Error> {
        if is_number(symbol) {
            return symbol.parse().map(Some).map_err(|_| Error::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        }

        if let Some(value) = SPECIAL_NUMBERS.get(symbol) {
            return Ok(Some(*value));
        }

        Ok(self.bindings.and_then(|b| b.get(symbol)).copied())
    }
}
