use std::fmt;

use crate::error::Error;
use crate::helpers::{is_function, is_link};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A symbol in the tree.
///
/// Binary operators hold both children. Functions only ever hold a `right`
/// child. Everything else is a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub symbol: String,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(symbol: &str, parent: Option<NodeId>) -> Self {
        Self {
            symbol: symbol.to_string(),
            left: None,
            right: None,
            parent,
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Only meaningful for navigation; the arena owns every node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An expression tree stored as an arena of nodes addressed by [`NodeId`].
///
/// Cloning copies the whole arena, so a clone shares nothing with its source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Panics if `id` came from another tree with more nodes.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: Option<NodeId>) -> Option<&Node> {
        id.and_then(|id| self.nodes.get(id.0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A deep copy of the tree.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn push(&mut self, symbol: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(symbol, parent));
        id
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.level_order().iter().enumerate() {
            writeln!(f, "{}: {}", depth + 1, level.join(" "))?;
        }
        Ok(())
    }
}

/// Assembles a [`Tree`] from postfix symbols fed back to front.
///
/// Operators and functions move the cursor to themselves once attached,
/// operands stay where they are put. A new node goes into the cursor's right
/// slot first, then its left slot (never for functions), and otherwise into
/// the left slot of the nearest ancestor that still has one open.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: Tree,
    cursor: Option<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: &str) -> Result<(), Error> {
        let Some(cursor) = self.cursor else {
            let root = self.tree.push(symbol, None);
            self.tree.root = Some(root);
            self.cursor = Some(root);
            return Ok(());
        };

        let parent = self.open_slot(cursor, symbol)?;
        let id = self.tree.push(symbol, Some(parent));
        let node = self.tree.node_mut(parent);
        if node.right.is_none() {
            node.right = Some(id);
        } else {
            node.left = Some(id);
        }

        if is_link(symbol) {
            self.cursor = Some(id);
        } else {
            self.cursor = Some(parent);
        }

        Ok(())
    }

    /// Finds the node that receives `symbol`, starting from the cursor.
    fn open_slot(&self, cursor: NodeId, symbol: &str) -> Result<NodeId, Error> {
        let malformed = || Error::MalformedExpression {
            symbol: symbol.to_string(),
        };

        // Only the root can be an operand here, and operands stay leaves.
        let node = self.tree.node(cursor);
        if !is_link(&node.symbol) {
            return Err(malformed());
        }
        if node.right.is_none() {
            return Ok(cursor);
        }

        let mut current = cursor;
        loop {
            let node = self.tree.node(current);
            if node.left.is_none() && !is_function(&node.symbol) {
                return Ok(current);
            }

            current = node.parent.ok_or_else(malformed)?;
        }
    }

    pub fn finish(self) -> Tree {
        tracing::debug!(nodes = self.tree.len(), "built expression tree");
        self.tree
    }
}

impl Tree {
    /// Builds a tree from symbols in postfix order.
    pub fn from_postfix<S: AsRef<str>>(mut postfix: Vec<S>) -> Result<Self, Error> {
        let mut builder = TreeBuilder::new();
        while let Some(symbol) = postfix.pop() {
            builder.add(symbol.as_ref())?;
        }

        Ok(builder.finish())
    }
}
