//! Read-only queries over a built [`Tree`].
//!
//! Walks use an explicit stack or queue, so deep trees cannot overflow the
//! call stack here.

use std::collections::VecDeque;

use crate::ast::{NodeId, Tree};

impl Tree {
    /// Node, left subtree, right subtree.
    pub fn preorder(&self) -> Vec<&str> {
        let mut symbols = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root().into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            symbols.push(node.symbol.as_str());
            stack.extend(node.right());
            stack.extend(node.left());
        }

        symbols
    }

    /// Left subtree, node, right subtree.
    pub fn inorder(&self) -> Vec<&str> {
        let mut symbols = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root();

        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.node(id).left();
            }

            if let Some(id) = stack.pop() {
                let node = self.node(id);
                symbols.push(node.symbol.as_str());
                current = node.right();
            }
        }

        symbols
    }

    /// Left subtree, right subtree, node. For a built tree this reproduces the
    /// postfix list it was built from.
    pub fn postorder(&self) -> Vec<&str> {
        // Reverse of a node-right-left walk.
        let mut symbols = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root().into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            symbols.push(node.symbol.as_str());
            stack.extend(node.left());
            stack.extend(node.right());
        }

        symbols.reverse();
        symbols
    }

    /// Level by level, left to right.
    pub fn bfs(&self) -> Vec<&str> {
        self.level_order().into_iter().flatten().collect()
    }

    /// Symbols grouped by depth, root level first.
    pub fn level_order(&self) -> Vec<Vec<&str>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<(NodeId, usize)> =
            self.root().map(|id| (id, 0)).into_iter().collect();

        while let Some((id, depth)) = queue.pop_front() {
            if depth == levels.len() {
                levels.push(Vec::new());
            }

            let node = self.node(id);
            levels[depth].push(node.symbol.as_str());
            queue.extend(node.left().map(|child| (child, depth + 1)));
            queue.extend(node.right().map(|child| (child, depth + 1)));
        }

        levels
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn max_depth(&self) -> usize {
        self.level_order().len()
    }
}
