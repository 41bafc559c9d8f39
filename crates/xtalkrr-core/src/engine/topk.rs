use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A fixed-capacity collector that retains the `capacity` highest-scoring
/// candidates seen so far.
///
/// Backed by a min-heap keyed on score: each candidate is pushed, and once
/// the heap exceeds capacity the current minimum is evicted. Ties are broken
/// deterministically by insertion order, with earlier insertions retained.
#[derive(Debug)]
pub struct TopK<T> {
    capacity: usize,
    heap: BinaryHeap<MinEntry<T>>,
    sequence: usize,
}

#[derive(Debug)]
struct MinEntry<T> {
    score: f64,
    sequence: usize,
    value: T,
}

impl<T> PartialEq for MinEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for MinEntry<T> {}

impl<T> PartialOrd for MinEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinEntry<T> {
    // Inverted so that BinaryHeap's max is the lowest score; on equal
    // scores the later insertion is evicted first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl<T> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            sequence: 0,
        }
    }

    /// Offers a candidate; evicts the current minimum when over capacity.
    pub fn push(&mut self, score: f64, value: T) {
        if self.capacity == 0 {
            return;
        }
        self.heap.push(MinEntry {
            score,
            sequence: self.sequence,
            value,
        });
        self.sequence += 1;
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Drains the collector into a list sorted by descending score.
    pub fn into_descending(mut self) -> Vec<(f64, T)> {
        let mut drained = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.heap.pop() {
            drained.push((entry.score, entry.value));
        }
        drained.reverse();
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores<T>(ranked: &[(f64, T)]) -> Vec<f64> {
        ranked.iter().map(|(score, _)| *score).collect()
    }

    #[test]
    fn retains_the_highest_scores_in_descending_order() {
        let mut topk = TopK::new(3);
        for (score, name) in [(0.2, "a"), (0.9, "b"), (0.1, "c"), (0.7, "d"), (0.5, "e")] {
            topk.push(score, name);
        }
        let ranked = topk.into_descending();
        assert_eq!(scores(&ranked), vec![0.9, 0.7, 0.5]);
        let names: Vec<_> = ranked.into_iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["b", "d", "e"]);
    }

    #[test]
    fn yields_fewer_items_when_under_capacity() {
        let mut topk = TopK::new(10);
        topk.push(0.3, "a");
        topk.push(0.6, "b");
        let ranked = topk.into_descending();
        assert_eq!(scores(&ranked), vec![0.6, 0.3]);
    }

    #[test]
    fn zero_capacity_collects_nothing() {
        let mut topk = TopK::new(0);
        topk.push(1.0, "a");
        assert!(topk.into_descending().is_empty());
    }

    #[test]
    fn ties_retain_the_earlier_insertion() {
        let mut topk = TopK::new(2);
        topk.push(0.5, "first");
        topk.push(0.5, "second");
        topk.push(0.5, "third");
        let names: Vec<_> = topk
            .into_descending()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn eviction_is_deterministic_for_a_fixed_push_order() {
        let run = || {
            let mut topk = TopK::new(4);
            for (i, score) in [0.4, 0.4, 0.9, 0.1, 0.4, 0.8].iter().enumerate() {
                topk.push(*score, i);
            }
            topk.into_descending()
        };
        assert_eq!(run(), run());
    }
}
