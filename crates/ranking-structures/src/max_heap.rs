//! Binary max-heap keyed by preference score.

use ranking_core::{Instrument, ScoredInstrument};

/// Array-backed binary max-heap of scored instruments.
///
/// The parent at index `i` has children at `2i + 1` and `2i + 2`, and its
/// score is >= both children's scores. Index 0 holds the maximum. Sifting
/// moves elements only on strict comparisons, so equal scores never swap
/// past each other.
#[derive(Debug, Clone, Default)]
pub struct MaxHeap {
    heap: Vec<ScoredInstrument>,
}

impl MaxHeap {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Insert a scored instrument, O(log n)
    pub fn insert(&mut self, score: f64, instrument: Instrument) {
        self.heap.push(ScoredInstrument::new(score, instrument));
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the highest-scored entry, or `None` when empty
    pub fn extract_max(&mut self) -> Option<ScoredInstrument> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let max_item = self.heap.pop();

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        max_item
    }

    /// The highest-scored entry without removing it
    pub fn peek_max(&self) -> Option<&ScoredInstrument> {
        self.heap.first()
    }

    /// Replace the heap's contents with `items`, heapified bottom-up, O(n)
    pub fn build(&mut self, items: Vec<ScoredInstrument>) {
        self.heap = items;
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// The `k` highest-scored entries in descending score order.
    ///
    /// Non-destructive: works on a copy of the backing array so the heap is
    /// unchanged afterwards. Callers keep the heap reusable at the cost of
    /// an O(n) copy per call. `k` of 0 yields an empty vec; `k` past the
    /// size yields every entry.
    pub fn top_k(&self, k: usize) -> Vec<ScoredInstrument> {
        if k == 0 {
            return Vec::new();
        }

        let mut scratch = self.clone();
        let take = k.min(scratch.len());

        let mut result = Vec::with_capacity(take);
        for _ in 0..take {
            if let Some(item) = scratch.extract_max() {
                result.push(item);
            }
        }

        result
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].score > self.heap[parent].score {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut largest = index;
            let left = 2 * index + 1;
            let right = 2 * index + 2;

            if left < self.heap.len() && self.heap[left].score > self.heap[largest].score {
                largest = left;
            }
            // strict comparison: a tie stays with the left child
            if right < self.heap.len() && self.heap[right].score > self.heap[largest].score {
                largest = right;
            }

            if largest == index {
                break;
            }

            self.heap.swap(index, largest);
            index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instrument(ticker: &str) -> Instrument {
        Instrument::new(
            ticker,
            format!("{ticker} Inc"),
            "technology",
            100.0,
            vec![98.0, 100.0],
        )
    }

    fn heap_of(scores: &[f64]) -> MaxHeap {
        let mut heap = MaxHeap::new();
        for (i, &score) in scores.iter().enumerate() {
            heap.insert(score, create_test_instrument(&format!("T{i}")));
        }
        heap
    }

    #[test]
    fn test_insert_and_peek() {
        let heap = heap_of(&[40.0, 90.0, 70.0]);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_max().unwrap().score, 90.0);
    }

    #[test]
    fn test_extract_max_drains_descending() {
        let scores = [55.0, 10.0, 99.0, 72.0, 33.0, 72.0, 1.0];
        let mut heap = heap_of(&scores);

        let mut drained = Vec::new();
        while let Some(item) = heap.extract_max() {
            drained.push(item.score);
        }

        assert_eq!(drained.len(), scores.len());
        for pair in drained.windows(2) {
            assert!(pair[0] >= pair[1], "drain order not non-increasing: {drained:?}");
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_extract_from_empty() {
        let mut heap = MaxHeap::new();
        assert!(heap.extract_max().is_none());
        assert!(heap.peek_max().is_none());
    }

    #[test]
    fn test_build_heapifies() {
        let items: Vec<ScoredInstrument> = [5.0, 80.0, 42.0, 80.5, 11.0]
            .iter()
            .enumerate()
            .map(|(i, &s)| ScoredInstrument::new(s, create_test_instrument(&format!("B{i}"))))
            .collect();

        let mut heap = MaxHeap::new();
        heap.build(items);

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.extract_max().unwrap().score, 80.5);
        assert_eq!(heap.extract_max().unwrap().score, 80.0);
    }

    #[test]
    fn test_top_k_does_not_mutate() {
        let heap = heap_of(&[90.0, 70.0, 95.0]);

        let top = heap.top_k(2);
        let scores: Vec<f64> = top.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![95.0, 90.0]);

        // receiver unchanged
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_max().unwrap().score, 95.0);
    }

    #[test]
    fn test_top_k_bounds() {
        let heap = heap_of(&[30.0, 60.0]);

        assert!(heap.top_k(0).is_empty());
        assert_eq!(heap.top_k(10).len(), 2);
        assert!(MaxHeap::new().top_k(5).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut heap = heap_of(&[1.0, 2.0]);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
    }
}
