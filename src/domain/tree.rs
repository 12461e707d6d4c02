//! Arena-backed binary search tree of courses, ordered by identifier.
//!
//! Keys compare byte-wise (`str` ordering). Equal keys descend right, so the
//! tree keeps every inserted course, duplicates included. There is no
//! rebalancing: sorted input degenerates into a right spine. Insert,
//! traversal and depth are iterative so that a degenerate tree never grows
//! the native call stack.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::course::Course;

/// Tree node: a course and its two child slots.
#[derive(Debug)]
pub struct TreeNode {
    pub course: Course,
    /// Subtree with strictly smaller identifiers
    pub left: Option<Index>,
    /// Subtree with greater or equal identifiers
    pub right: Option<Index>,
}

#[derive(Debug)]
pub struct CourseTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for CourseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a course as a new leaf and return its arena index.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.identifier))]
    pub fn insert(&mut self, course: Course) -> Index {
        let mut slot = self.root;
        let mut parent: Option<(Index, bool)> = None;

        while let Some(idx) = slot {
            let node = &self.arena[idx];
            let go_left = course.identifier < node.course.identifier;
            parent = Some((idx, go_left));
            slot = if go_left { node.left } else { node.right };
        }

        let node_idx = self.arena.insert(TreeNode {
            course,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(node_idx),
            Some((parent_idx, true)) => self.arena[parent_idx].left = Some(node_idx),
            Some((parent_idx, false)) => self.arena[parent_idx].right = Some(node_idx),
        }
        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// In-order traversal: ascending identifiers, duplicates in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.left.map(|c| (c, level + 1)));
                stack.extend(node.right.map(|c| (c, level + 1)));
            }
        }
        max_depth
    }
}

/// Lazy in-order walk; a fresh iterator is needed for every traversal.
pub struct InOrderIterator<'a> {
    tree: &'a CourseTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a CourseTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        // Walk down the left spine, then emit the deepest pending node.
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.get_node(idx).and_then(|n| n.left);
        }

        let idx = self.stack.pop()?;
        let node = self.tree.get_node(idx)?;
        self.current = node.right;
        Some((idx, node))
    }
}
