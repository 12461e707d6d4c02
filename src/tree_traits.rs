/*
Renders the shape of the course BST with termtree.

Children are labelled with the side they hang on: `<` for the left subtree
(smaller identifiers), `>=` for the right subtree.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::CourseTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for CourseTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        // Explicit stack: (node, label, parent slot in `built`)
        let mut built: Vec<(Tree<String>, Option<usize>)> = Vec::new();
        let mut stack: Vec<(Index, String, Option<usize>)> =
            vec![(root_idx, String::new(), None)];

        while let Some((idx, prefix, parent)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            let slot = built.len();
            built.push((
                Tree::new(format!("{}{}", prefix, node.course.identifier)),
                parent,
            ));
            // right pushed first so the left child is rendered first
            if let Some(right) = node.right {
                stack.push((right, ">= ".to_string(), Some(slot)));
            }
            if let Some(left) = node.left {
                stack.push((left, "< ".to_string(), Some(slot)));
            }
        }

        // Children always sit after their parent; attach back to front.
        let mut root = None;
        while let Some((tree, parent)) = built.pop() {
            match parent {
                Some(p) => built[p].0.leaves.insert(0, tree),
                None => root = Some(tree),
            }
        }
        root.unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    #[test]
    fn given_small_tree_when_rendering_then_shows_sides() {
        let mut tree = CourseTree::new();
        for id in ["CS200", "CS100", "CS300"] {
            tree.insert(Course::new(id, "", vec![]));
        }
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "CS200");
        assert!(lines[1].ends_with("< CS100"));
        assert!(lines[2].ends_with(">= CS300"));
    }

    #[test]
    fn given_empty_tree_when_rendering_then_placeholder() {
        let tree = CourseTree::new();
        assert_eq!(tree.to_tree_string().root, "Empty tree");
    }
}
