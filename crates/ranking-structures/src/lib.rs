//! Ordered containers for score-keyed instrument retrieval.
//!
//! Two interchangeable structures over the same scored set: an array-backed
//! binary max-heap and an arena-based red-black tree. Both are built fresh
//! per ranking request and discarded after top-K extraction.

pub mod max_heap;
pub mod rb_tree;

pub use max_heap::MaxHeap;
pub use rb_tree::OrderedTree;
