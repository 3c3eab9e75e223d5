use std::cmp::Ordering;

use hashbrown::HashMap;

use crate::LinkKey;

/// Candidate link waiting in the search frontier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry {
    pub link: LinkKey,
    /// Link the candidate is reached from
    pub parent: LinkKey,
    /// Accumulated generalized cost up to the end of `link`
    pub cost: f64,
}

impl HeapEntry {
    // Min-heap by cost; equal costs fall back to destination then origin
    // node so that pops are deterministic
    fn precedes(&self, other: &Self) -> bool {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.link.1.cmp(&other.link.1))
            .then_with(|| self.link.0.cmp(&other.link.0))
            == Ordering::Less
    }
}

/// Binary min-heap of links with decrease-key.
///
/// Every queued link appears once; its slot is tracked in `positions` so
/// decrease-key lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap {
    entries: Vec<HeapEntry>,
    positions: HashMap<LinkKey, usize>,
}

impl IndexedMinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queues `link`, or lowers its cost if it is already queued with a
    /// strictly higher one. Returns `false` when the queued entry was
    /// already at least as cheap.
    pub fn push(&mut self, link: LinkKey, parent: LinkKey, cost: f64) -> bool {
        if let Some(&pos) = self.positions.get(&link) {
            let entry = &mut self.entries[pos];
            if entry.cost <= cost {
                return false;
            }
            entry.parent = parent;
            entry.cost = cost;
            self.sift_up(pos);
            return true;
        }

        let pos = self.entries.len();
        self.entries.push(HeapEntry { link, parent, cost });
        self.positions.insert(link, pos);
        self.sift_up(pos);
        true
    }

    /// Removes the cheapest entry
    pub fn pop_min(&mut self) -> Option<HeapEntry> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(0, last);
        let top = self.entries.pop()?;
        self.positions.remove(&top.link);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.entries[pos].precedes(&self.entries[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.entries[right].precedes(&self.entries[left]) {
                right
            } else {
                left
            };
            if !self.entries[child].precedes(&self.entries[pos]) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].link, a);
        self.positions.insert(self.entries[b].link, b);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::NO_NODE;

    const ROOT: LinkKey = (NO_NODE, 0);

    fn assert_consistent(heap: &IndexedMinHeap) {
        assert_eq!(heap.entries.len(), heap.positions.len());
        for (pos, entry) in heap.entries.iter().enumerate() {
            assert_eq!(heap.positions[&entry.link], pos);
            if pos > 0 {
                let parent = &heap.entries[(pos - 1) / 2];
                assert!(!entry.precedes(parent));
            }
        }
    }

    fn drain(heap: &mut IndexedMinHeap) -> Vec<HeapEntry> {
        std::iter::from_fn(|| heap.pop_min()).collect()
    }

    #[test]
    fn empty_heap_pops_nothing() {
        let mut heap = IndexedMinHeap::new();
        assert!(heap.pop_min().is_none());
        assert!(heap.is_empty());
    }

    #[test]
    fn higher_cost_push_keeps_existing_entry() {
        let mut heap = IndexedMinHeap::new();
        assert!(heap.push((1, 2), ROOT, 4.0));
        assert!(!heap.push((1, 2), (5, 1), 9.0));
        assert!(!heap.push((1, 2), (5, 1), 4.0));
        assert_eq!(heap.len(), 1);

        let entry = heap.pop_min().unwrap();
        assert_eq!(entry.cost, 4.0);
        assert_eq!(entry.parent, ROOT);
    }

    #[test]
    fn lower_cost_push_updates_in_place() {
        let mut heap = IndexedMinHeap::new();
        heap.push((1, 2), ROOT, 10.0);
        heap.push((1, 3), ROOT, 5.0);
        heap.push((3, 4), (1, 3), 7.0);
        assert!(heap.push((1, 2), (7, 1), 1.0));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.entries[heap.positions[&(1, 2)]].cost, 1.0);
        assert_consistent(&heap);

        let first = heap.pop_min().unwrap();
        assert_eq!(first.link, (1, 2));
        assert_eq!(first.parent, (7, 1));
        assert!(!heap.positions.contains_key(&(1, 2)));
    }

    #[test]
    fn pops_in_cost_order() {
        let mut heap = IndexedMinHeap::new();
        for (i, cost) in [5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0].into_iter().enumerate() {
            heap.push((0, i as i32), ROOT, cost);
            assert_consistent(&heap);
        }
        let costs: Vec<f64> = drain(&mut heap).iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![1.0, 2.0, 3.0, 5.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn ties_break_on_destination_node() {
        let mut heap = IndexedMinHeap::new();
        heap.push((1, 9), ROOT, 2.0);
        heap.push((4, 3), ROOT, 2.0);
        heap.push((2, 3), ROOT, 2.0);
        heap.push((1, 5), ROOT, 2.0);
        let links: Vec<LinkKey> = drain(&mut heap).iter().map(|e| e.link).collect();
        assert_eq!(links, vec![(2, 3), (4, 3), (1, 5), (1, 9)]);
    }

    proptest! {
        #[test]
        fn drains_each_link_once_at_its_cheapest_cost(
            pushes in prop::collection::vec((0i32..12, 0i32..12, 0u32..1000), 1..200)
        ) {
            let mut heap = IndexedMinHeap::new();
            let mut cheapest: HashMap<LinkKey, f64> = HashMap::new();
            for &(o, d, c) in &pushes {
                let cost = f64::from(c) / 10.0;
                heap.push((o, d), ROOT, cost);
                let best = cheapest.entry((o, d)).or_insert(cost);
                if cost < *best {
                    *best = cost;
                }
            }
            assert_consistent(&heap);

            let drained = drain(&mut heap);
            prop_assert_eq!(drained.len(), cheapest.len());
            for pair in drained.windows(2) {
                prop_assert!(pair[0].cost <= pair[1].cost);
            }
            for entry in &drained {
                prop_assert_eq!(cheapest[&entry.link], entry.cost);
            }
        }
    }
}
