use std::collections::VecDeque;

use crate::error::{CatalogError, Result};

/// Binary tree node. Children are owned, so the structure is always a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub val: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(val: i32) -> Self {
        Self {
            val,
            left: None,
            right: None,
        }
    }

    pub fn new(val: i32, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            val,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Builds a binary search tree by inserting `values` in order.
    pub fn from_bst_values(values: &[i32]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let mut root = TreeNode::leaf(*first);
        for value in rest {
            root.insert(*value);
        }
        Some(root)
    }

    /// BST insert; equal values go right.
    pub fn insert(&mut self, value: i32) {
        let child = if value < self.val {
            &mut self.left
        } else {
            &mut self.right
        };
        match child {
            Some(node) => node.insert(value),
            None => *child = Some(Box::new(TreeNode::leaf(value))),
        }
    }

    pub fn depth_iter(&self) -> DepthFirstIterator {
        DepthFirstIterator::new(self)
    }

    pub fn pre_order_iter(&self) -> PreOrderIterator {
        PreOrderIterator::new(self)
    }

    pub fn level_order_iter(&self) -> LevelOrderIterator {
        LevelOrderIterator::new(self)
    }

    /// Legacy accessor kept under its historical name; yields pre-order.
    #[deprecated(note = "this is a pre-order depth-first walk; use `pre_order_iter` or `level_order_iter`")]
    pub fn breadth_iter(&self) -> PreOrderIterator {
        self.pre_order_iter()
    }
}

/// Explicit cursor protocol shared by the eager tree iterators.
pub trait TreeIterator {
    fn has_next(&self) -> bool;
    fn get_next(&mut self) -> Result<i32>;
}

fn in_order(node: Option<&TreeNode>, out: &mut Vec<i32>) {
    if let Some(node) = node {
        in_order(node.left.as_deref(), out);
        out.push(node.val);
        in_order(node.right.as_deref(), out);
    }
}

fn pre_order(node: Option<&TreeNode>, out: &mut Vec<i32>) {
    if let Some(node) = node {
        out.push(node.val);
        pre_order(node.left.as_deref(), out);
        pre_order(node.right.as_deref(), out);
    }
}

fn level_order(root: &TreeNode, out: &mut Vec<i32>) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        out.push(node.val);
        queue.extend(node.left.as_deref());
        queue.extend(node.right.as_deref());
    }
}

/// Each iterator materializes its whole sequence up front, then hands
/// values out through both `TreeIterator` and `Iterator`.
macro_rules! eager_tree_iterator {
    ($(#[$meta:meta])* $name:ident, $label:literal, $walk:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            values: Vec<i32>,
            pointer: usize,
        }

        impl $name {
            pub fn new(root: &TreeNode) -> Self {
                let mut values = Vec::new();
                let walk: fn(&TreeNode, &mut Vec<i32>) = $walk;
                walk(root, &mut values);
                Self { values, pointer: 0 }
            }

            pub fn remaining(&self) -> &[i32] {
                &self.values[self.pointer..]
            }
        }

        impl TreeIterator for $name {
            fn has_next(&self) -> bool {
                self.pointer < self.values.len()
            }

            fn get_next(&mut self) -> Result<i32> {
                let value = *self
                    .values
                    .get(self.pointer)
                    .ok_or_else(|| CatalogError::exhausted($label))?;
                self.pointer += 1;
                Ok(value)
            }
        }

        impl Iterator for $name {
            type Item = i32;

            fn next(&mut self) -> Option<i32> {
                self.get_next().ok()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                let left = self.values.len() - self.pointer;
                (left, Some(left))
            }
        }

        impl ExactSizeIterator for $name {}
    };
}

eager_tree_iterator!(
    /// In-order depth-first: left subtree, node, right subtree.
    DepthFirstIterator,
    "depth-first",
    |root, out| in_order(Some(root), out)
);

eager_tree_iterator!(
    /// Pre-order depth-first: node, left subtree, right subtree.
    PreOrderIterator,
    "pre-order",
    |root, out| pre_order(Some(root), out)
);

eager_tree_iterator!(
    /// True breadth-first: level by level, left to right.
    LevelOrderIterator,
    "level-order",
    level_order
);

/// Historical name for [`PreOrderIterator`]. Despite the name it does not
/// walk level by level; see [`LevelOrderIterator`] for that.
#[deprecated(note = "this is a pre-order depth-first walk; use `PreOrderIterator` or `LevelOrderIterator`")]
pub type BreadthFirstIterator = PreOrderIterator;

/// The tree from the driver scenario:
///
/// ```text
///        3
///      /   \
///     9     20
///          /  \
///         15   7
/// ```
pub fn sample_tree() -> TreeNode {
    TreeNode::new(
        3,
        Some(TreeNode::leaf(9)),
        Some(TreeNode::new(20, Some(TreeNode::leaf(15)), Some(TreeNode::leaf(7)))),
    )
}
