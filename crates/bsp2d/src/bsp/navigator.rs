//! Node selection and step-by-step reveal of a built partition tree.
//!
//! The navigator keeps its state apart from the tree: which node is active,
//! and which nodes have been revealed so far. Playback reveals nodes in
//! depth-first order, left child first, so the construction of the tree can
//! be replayed one node at a time.

use super::node::PartitionNode;
use super::tree::PartitionTree;
use crate::Region;

/// Selection and reveal state over a [`PartitionTree`].
///
/// Every method taking a tree expects the same tree the navigator was
/// created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNavigator {
    active: Option<usize>,
    visible: Vec<bool>,
    visible_count: usize,
    visible_height: usize,
}

impl TreeNavigator {
    /// Creates a navigator with only the root revealed and selected.
    pub fn new(tree: &PartitionTree) -> Self {
        let mut navigator = Self {
            active: None,
            visible: vec![false; tree.len()],
            visible_count: 0,
            visible_height: 0,
        };
        navigator.rewind(tree);
        navigator
    }

    /// Index of the active node, or `tree.len()` if none is selected.
    pub fn active_index(&self) -> usize {
        self.active.unwrap_or(self.visible.len())
    }

    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_node<'a>(&self, tree: &'a PartitionTree) -> Option<&'a PartitionNode> {
        self.active.and_then(|i| tree.node(i))
    }

    pub fn active_region<'a>(&self, tree: &'a PartitionTree) -> Option<&'a Region> {
        self.active.and_then(|i| tree.region(i))
    }

    /// Returns `true` if node `index` has been revealed.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Number of revealed nodes.
    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Number of levels spanned by the revealed nodes.
    #[inline]
    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Selects node `index`; an out-of-range index clears the selection.
    pub fn set_active(&mut self, tree: &PartitionTree, index: usize) {
        self.active = (index < tree.len()).then_some(index);
    }

    /// Selects the left child of the active node, if it has one.
    pub fn move_left(&mut self, tree: &PartitionTree) {
        if let Some(child) = self.active_node(tree).and_then(PartitionNode::left) {
            self.active = Some(child);
        }
    }

    /// Selects the right child of the active node, if it has one.
    pub fn move_right(&mut self, tree: &PartitionTree) {
        if let Some(child) = self.active_node(tree).and_then(PartitionNode::right) {
            self.active = Some(child);
        }
    }

    /// Selects the parent of the active node, if it has one.
    pub fn move_up(&mut self, tree: &PartitionTree) {
        if let Some(parent) = self.active_node(tree).and_then(PartitionNode::parent) {
            self.active = Some(parent);
        }
    }

    /// Advances playback by one step.
    ///
    /// Reveals and selects the first hidden child of the active node (left
    /// before right), otherwise climbs to the parent. Does nothing once the
    /// last node in order is active.
    pub fn step_forward(&mut self, tree: &PartitionTree) {
        let Some(node) = self.active_node(tree) else {
            return;
        };
        if self.active == Some(tree.len() - 1) {
            return;
        }

        let hidden_child = [node.left(), node.right()]
            .into_iter()
            .flatten()
            .find(|&child| !self.visible[child]);

        match hidden_child {
            Some(child) => {
                self.visible[child] = true;
                self.visible_count += 1;
                self.visible_height = self.visible_height.max(tree.nodes()[child].depth() + 1);
                self.active = Some(child);
            }
            None => self.move_up(tree),
        }
    }

    /// Undoes one playback step.
    ///
    /// Descends into a revealed child (right before left); at a node with no
    /// revealed children, hides it and climbs to the parent. Does nothing at
    /// the root once its children are hidden.
    pub fn step_back(&mut self, tree: &PartitionTree) {
        let Some(index) = self.active else {
            return;
        };
        let node = &tree.nodes()[index];
        let shown = |child: Option<usize>| child.filter(|&c| self.visible[c]);

        if let Some(child) = shown(node.right()).or_else(|| shown(node.left())) {
            self.active = Some(child);
            return;
        }
        if node.parent().is_none() {
            return;
        }

        self.visible[index] = false;
        self.visible_count -= 1;
        self.visible_height = tree
            .nodes()
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|(n, _)| n.depth() + 1)
            .max()
            .unwrap_or(0);
        self.move_up(tree);
    }

    /// Reveals every node and selects the last one in order.
    pub fn fast_forward(&mut self, tree: &PartitionTree) {
        self.visible.iter_mut().for_each(|v| *v = true);
        self.visible_count = tree.len();
        self.visible_height = tree.height();
        self.set_active(tree, tree.len().saturating_sub(1));
    }

    /// Hides everything but the root and selects it.
    pub fn rewind(&mut self, tree: &PartitionTree) {
        self.visible.iter_mut().for_each(|v| *v = false);
        match tree.root_index() {
            Some(root) => {
                self.visible[root] = true;
                self.visible_count = 1;
                self.visible_height = 1;
                self.active = Some(root);
            }
            None => {
                self.visible_count = 0;
                self.visible_height = 0;
                self.active = None;
            }
        }
    }

    /// Returns `true` once every node has been revealed.
    pub fn is_complete(&self) -> bool {
        self.visible_count == self.visible.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Segment, TreeConfig};
    use nalgebra::Point2;

    fn seg(lx: f64, ly: f64, rx: f64, ry: f64) -> Segment {
        Segment::new(Point2::new(lx, ly), Point2::new(rx, ry))
    }

    /// Root splitter with one wall on each side: in-order indices 0, 1, 2.
    fn make_corridor() -> PartitionTree {
        PartitionTree::build(
            vec![
                seg(300.0, 100.0, 300.0, 600.0),
                seg(100.0, 100.0, 100.0, 600.0),
                seg(500.0, 100.0, 500.0, 600.0),
            ],
            &TreeConfig::default(),
        )
        .unwrap()
    }

    /// Five-node tree: the left child of the root has two children.
    fn make_deep_tree() -> PartitionTree {
        PartitionTree::build(
            vec![
                seg(300.0, 100.0, 300.0, 600.0),
                seg(400.0, 200.0, 500.0, 200.0),
                seg(400.0, 300.0, 500.0, 300.0),
            ],
            &TreeConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn starts_at_root() {
        let tree = make_corridor();
        let nav = TreeNavigator::new(&tree);
        assert_eq!(nav.active(), tree.root_index());
        assert_eq!(nav.visible_count(), 1);
        assert_eq!(nav.visible_height(), 1);
        assert!(nav.is_visible(1));
        assert!(!nav.is_visible(0));
    }

    #[test]
    fn moves_follow_links() {
        let tree = make_corridor();
        let mut nav = TreeNavigator::new(&tree);

        nav.move_left(&tree);
        assert_eq!(nav.active(), Some(0));
        nav.move_left(&tree);
        assert_eq!(nav.active(), Some(0), "leaf has no left child");
        nav.move_up(&tree);
        assert_eq!(nav.active(), Some(1));
        nav.move_up(&tree);
        assert_eq!(nav.active(), Some(1), "root has no parent");
        nav.move_right(&tree);
        assert_eq!(nav.active(), Some(2));
        assert_eq!(nav.active_node(&tree).unwrap().segments()[0], seg(100.0, 100.0, 100.0, 600.0));
    }

    #[test]
    fn set_active_out_of_range_clears() {
        let tree = make_corridor();
        let mut nav = TreeNavigator::new(&tree);
        nav.set_active(&tree, 3);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.active_index(), tree.len());
        assert!(nav.active_region(&tree).is_none());

        nav.move_left(&tree);
        assert_eq!(nav.active(), None);

        nav.set_active(&tree, 2);
        assert_eq!(nav.active_index(), 2);
        assert!(nav.active_region(&tree).is_some());
    }

    #[test]
    fn step_forward_reveals_depth_first() {
        let tree = make_corridor();
        let mut nav = TreeNavigator::new(&tree);

        nav.step_forward(&tree);
        assert_eq!(nav.active(), Some(0));
        assert_eq!(nav.visible_count(), 2);
        assert_eq!(nav.visible_height(), 2);

        nav.step_forward(&tree);
        assert_eq!(nav.active(), Some(1));
        assert_eq!(nav.visible_count(), 2);

        nav.step_forward(&tree);
        assert_eq!(nav.active(), Some(2));
        assert!(nav.is_complete());

        nav.step_forward(&tree);
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn step_back_undoes_forward() {
        let tree = make_corridor();
        let mut nav = TreeNavigator::new(&tree);
        let start = nav.clone();
        for _ in 0..3 {
            nav.step_forward(&tree);
        }

        nav.step_back(&tree);
        assert_eq!(nav.active(), Some(1));
        assert!(!nav.is_visible(2));
        assert_eq!(nav.visible_count(), 2);

        nav.step_back(&tree);
        assert_eq!(nav.active(), Some(0));
        nav.step_back(&tree);
        assert_eq!(nav, start);

        nav.step_back(&tree);
        assert_eq!(nav, start, "stepping back at a bare root is a no-op");
    }

    #[test]
    fn stepping_forward_reaches_fast_forward() {
        let tree = make_deep_tree();
        assert_eq!(tree.len(), 5);

        let mut stepped = TreeNavigator::new(&tree);
        for _ in 0..4 * tree.len() {
            stepped.step_forward(&tree);
        }

        let mut jumped = TreeNavigator::new(&tree);
        jumped.fast_forward(&tree);

        assert_eq!(stepped, jumped);
        assert_eq!(jumped.visible_height(), 3);
        assert_eq!(jumped.active(), Some(4));
    }

    #[test]
    fn step_back_shrinks_visible_height() {
        let tree = make_deep_tree();
        let mut nav = TreeNavigator::new(&tree);
        nav.step_forward(&tree);
        nav.step_forward(&tree);
        assert_eq!(nav.visible_height(), 3);

        nav.step_back(&tree);
        assert_eq!(nav.visible_height(), 2);
        assert_eq!(nav.visible_count(), 2);
    }

    #[test]
    fn rewind_resets() {
        let tree = make_deep_tree();
        let mut nav = TreeNavigator::new(&tree);
        nav.fast_forward(&tree);
        nav.rewind(&tree);
        assert_eq!(nav, TreeNavigator::new(&tree));
    }

    #[test]
    fn empty_tree_has_no_selection() {
        let tree = PartitionTree::build(vec![], &TreeConfig::default()).unwrap();
        let mut nav = TreeNavigator::new(&tree);
        assert_eq!(nav.active(), None);
        nav.step_forward(&tree);
        nav.step_back(&tree);
        nav.fast_forward(&tree);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.visible_count(), 0);
    }
}
