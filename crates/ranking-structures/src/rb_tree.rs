//! Red-black self-balancing search tree keyed by preference score.
//!
//! Nodes live in an index arena (`Vec<Node>`), with parent/child links held
//! as indices rather than owning pointers. The tree is insert-and-query
//! only: ranking requests always build a fresh tree, so deletion is never
//! needed.

use ranking_core::{Instrument, ScoredInstrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node {
    score: f64,
    instrument: Instrument,
    color: Color,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

/// Red-black tree of scored instruments with inclusive range queries.
///
/// Duplicate scores are permitted; an equal-scored insert routes right, so
/// the last insert of a tied score sits rightmost in its key run and
/// in-order traversal preserves insertion order within ties.
#[derive(Debug, Clone, Default)]
pub struct OrderedTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl OrderedTree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Insert a scored instrument; always succeeds, duplicates allowed.
    pub fn insert(&mut self, score: f64, instrument: Instrument) {
        let new_idx = self.nodes.len();
        self.nodes.push(Node {
            score,
            instrument,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        });

        let Some(mut current) = self.root else {
            self.root = Some(new_idx);
            self.nodes[new_idx].color = Color::Black;
            return;
        };

        // BST descent; equal scores go right
        loop {
            if score < self.nodes[current].score {
                match self.nodes[current].left {
                    Some(left) => current = left,
                    None => {
                        self.nodes[current].left = Some(new_idx);
                        break;
                    }
                }
            } else {
                match self.nodes[current].right {
                    Some(right) => current = right,
                    None => {
                        self.nodes[current].right = Some(new_idx);
                        break;
                    }
                }
            }
        }

        self.nodes[new_idx].parent = Some(current);
        self.fix_insert(new_idx);
    }

    /// Exact-match lookup; the first node whose score equals the query
    pub fn search(&self, score: f64) -> Option<&Instrument> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if score == node.score {
                return Some(&node.instrument);
            }
            current = if score < node.score {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// All entries with `min_score <= score <= max_score`, ascending by
    /// score. Subtrees that cannot intersect the range are pruned.
    pub fn range(&self, min_score: f64, max_score: f64) -> Vec<ScoredInstrument> {
        let mut result = Vec::new();
        self.range_collect(self.root, min_score, max_score, &mut result);
        result
    }

    fn range_collect(
        &self,
        node: Option<usize>,
        min_score: f64,
        max_score: f64,
        result: &mut Vec<ScoredInstrument>,
    ) {
        let Some(idx) = node else { return };
        let score = self.nodes[idx].score;

        // boundary comparisons are non-strict: duplicates of a bound can
        // sit in either subtree (equal inserts route right, rotations can
        // carry an equal key left), so only strictly-outside subtrees are
        // pruned
        if min_score <= score {
            self.range_collect(self.nodes[idx].left, min_score, max_score, result);
        }
        if min_score <= score && score <= max_score {
            result.push(ScoredInstrument::new(
                score,
                self.nodes[idx].instrument.clone(),
            ));
        }
        if max_score >= score {
            self.range_collect(self.nodes[idx].right, min_score, max_score, result);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn color_of(&self, node: Option<usize>) -> Color {
        // absent children count as black
        node.map_or(Color::Black, |idx| self.nodes[idx].color)
    }

    /// Restore the red-black invariants after inserting a red leaf,
    /// climbing from the inserted node while its parent is red.
    fn fix_insert(&mut self, mut node: usize) {
        loop {
            let Some(parent) = self.nodes[node].parent else {
                break;
            };
            if self.nodes[parent].color == Color::Black {
                break;
            }
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };

            if self.nodes[grand].left == Some(parent) {
                let uncle = self.nodes[grand].right;
                if self.color_of(uncle) == Color::Red {
                    // red uncle: recolor and continue from the grandparent
                    self.nodes[parent].color = Color::Black;
                    if let Some(uncle) = uncle {
                        self.nodes[uncle].color = Color::Black;
                    }
                    self.nodes[grand].color = Color::Red;
                    node = grand;
                } else {
                    let mut outer = parent;
                    if self.nodes[parent].right == Some(node) {
                        // zig-zag: rotate so both red nodes line up
                        self.left_rotate(parent);
                        outer = node;
                    }
                    self.nodes[outer].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    self.right_rotate(grand);
                    break;
                }
            } else {
                let uncle = self.nodes[grand].left;
                if self.color_of(uncle) == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    if let Some(uncle) = uncle {
                        self.nodes[uncle].color = Color::Black;
                    }
                    self.nodes[grand].color = Color::Red;
                    node = grand;
                } else {
                    let mut outer = parent;
                    if self.nodes[parent].left == Some(node) {
                        self.right_rotate(parent);
                        outer = node;
                    }
                    self.nodes[outer].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    self.left_rotate(grand);
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Rotate left around `pivot`; its right child takes its position.
    fn left_rotate(&mut self, pivot: usize) {
        let Some(child) = self.nodes[pivot].right else {
            return;
        };

        self.nodes[pivot].right = self.nodes[child].left;
        if let Some(migrated) = self.nodes[child].left {
            self.nodes[migrated].parent = Some(pivot);
        }

        self.nodes[child].parent = self.nodes[pivot].parent;
        match self.nodes[pivot].parent {
            None => self.root = Some(child),
            Some(parent) => {
                if self.nodes[parent].left == Some(pivot) {
                    self.nodes[parent].left = Some(child);
                } else {
                    self.nodes[parent].right = Some(child);
                }
            }
        }

        self.nodes[child].left = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }

    /// Rotate right around `pivot`; its left child takes its position.
    fn right_rotate(&mut self, pivot: usize) {
        let Some(child) = self.nodes[pivot].left else {
            return;
        };

        self.nodes[pivot].left = self.nodes[child].right;
        if let Some(migrated) = self.nodes[child].right {
            self.nodes[migrated].parent = Some(pivot);
        }

        self.nodes[child].parent = self.nodes[pivot].parent;
        match self.nodes[pivot].parent {
            None => self.root = Some(child),
            Some(parent) => {
                if self.nodes[parent].right == Some(pivot) {
                    self.nodes[parent].right = Some(child);
                } else {
                    self.nodes[parent].left = Some(child);
                }
            }
        }

        self.nodes[child].right = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instrument(ticker: &str) -> Instrument {
        Instrument::new(
            ticker,
            format!("{ticker} Inc"),
            "finance",
            50.0,
            vec![49.0, 50.0],
        )
    }

    fn tree_of(scores: &[f64]) -> OrderedTree {
        let mut tree = OrderedTree::new();
        for (i, &score) in scores.iter().enumerate() {
            tree.insert(score, create_test_instrument(&format!("T{i}")));
        }
        tree
    }

    /// Walk the arena and panic on any red-black violation.
    fn assert_invariants(tree: &OrderedTree) {
        let Some(root) = tree.root else { return };
        assert_eq!(
            tree.nodes[root].color,
            Color::Black,
            "root must be black"
        );
        black_height(tree, Some(root));
    }

    /// Returns the black-height of the subtree, checking red-red and BST
    /// violations and that both child paths agree on black count.
    fn black_height(tree: &OrderedTree, node: Option<usize>) -> usize {
        let Some(idx) = node else { return 1 };
        let n = &tree.nodes[idx];

        if n.color == Color::Red {
            for child in [n.left, n.right].into_iter().flatten() {
                assert_ne!(
                    tree.nodes[child].color,
                    Color::Red,
                    "red node has red child"
                );
            }
        }
        // rotations may move an equal key into a left child, so the
        // ordering check is non-strict on both sides
        if let Some(left) = n.left {
            assert!(tree.nodes[left].score <= n.score, "left child larger");
        }
        if let Some(right) = n.right {
            assert!(tree.nodes[right].score >= n.score, "right child smaller");
        }

        let left_height = black_height(tree, n.left);
        let right_height = black_height(tree, n.right);
        assert_eq!(left_height, right_height, "black-height mismatch");

        left_height + usize::from(n.color == Color::Black)
    }

    #[test]
    fn test_insert_keeps_invariants_ascending() {
        let mut tree = OrderedTree::new();
        for i in 0..64 {
            tree.insert(i as f64, create_test_instrument(&format!("A{i}")));
            assert_invariants(&tree);
        }
        assert_eq!(tree.len(), 64);
    }

    #[test]
    fn test_insert_keeps_invariants_descending() {
        let mut tree = OrderedTree::new();
        for i in (0..64).rev() {
            tree.insert(i as f64, create_test_instrument(&format!("D{i}")));
            assert_invariants(&tree);
        }
    }

    #[test]
    fn test_insert_keeps_invariants_interleaved() {
        // alternating low/high values with duplicates mixed in
        let scores = [
            50.0, 20.0, 80.0, 10.0, 90.0, 50.0, 35.0, 65.0, 50.0, 5.0, 95.0, 42.0, 58.0, 20.0,
            77.0, 3.0, 88.0, 50.0, 61.0, 14.0,
        ];
        let mut tree = OrderedTree::new();
        for (i, &score) in scores.iter().enumerate() {
            tree.insert(score, create_test_instrument(&format!("I{i}")));
            assert_invariants(&tree);
        }
        assert_eq!(tree.len(), scores.len());
    }

    #[test]
    fn test_search() {
        let tree = tree_of(&[30.0, 10.0, 50.0, 40.0]);

        assert!(tree.search(40.0).is_some());
        assert!(tree.search(41.0).is_none());
        assert!(OrderedTree::new().search(1.0).is_none());
    }

    #[test]
    fn test_range_is_ascending_and_inclusive() {
        let tree = tree_of(&[30.0, 10.0, 50.0, 40.0, 20.0]);

        let hits = tree.range(20.0, 40.0);
        let scores: Vec<f64> = hits.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_range_on_empty_and_disjoint() {
        assert!(OrderedTree::new().range(0.0, 100.0).is_empty());

        let tree = tree_of(&[5.0, 6.0]);
        assert!(tree.range(10.0, 20.0).is_empty());
    }

    #[test]
    fn test_duplicate_scores_keep_insertion_order() {
        let mut tree = OrderedTree::new();
        tree.insert(50.0, create_test_instrument("FIRST"));
        tree.insert(50.0, create_test_instrument("SECOND"));
        tree.insert(50.0, create_test_instrument("THIRD"));
        assert_invariants(&tree);

        let hits = tree.range(0.0, 100.0);
        let tickers: Vec<&str> = hits.iter().map(|s| s.instrument.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_range_keeps_duplicates_at_both_bounds() {
        // after fixup the tied run sits with one duplicate in a left
        // subtree and one in a right subtree; a range pinned to the tied
        // score must still return the whole run
        let mut tree = OrderedTree::new();
        tree.insert(50.0, create_test_instrument("FIRST"));
        tree.insert(50.0, create_test_instrument("SECOND"));
        tree.insert(50.0, create_test_instrument("THIRD"));

        let hits = tree.range(50.0, 50.0);
        let tickers: Vec<&str> = hits.iter().map(|s| s.instrument.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_range_returns_all_tied_maximums() {
        let tree = tree_of(&[90.0, 90.0, 70.0]);

        let hits = tree.range(90.0 - 100.0, 90.0);
        assert_eq!(hits.len(), 3);
        let top_scores: Vec<f64> = hits.iter().filter(|s| s.score == 90.0).map(|s| s.score).collect();
        assert_eq!(top_scores.len(), 2);
    }
}
