//! Array-backed binary min-heap used while building the Huffman tree.
//!
//! Ordering looks at [`Weighted::weight`] only. Entries with equal weight
//! come out in whatever order the sift operations leave them, which is a pure
//! function of the insertion sequence. The tree builder inserts leaves in
//! ascending symbol order, so encoder and decoder see the same ties resolved
//! the same way.

/// Anything that can be ordered by a single weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Weighted> MinHeap<T> {
    /// Add an entry and sift it up past every strictly heavier parent.
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.elements.len() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[i].weight() >= self.elements[p].weight() {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    /// Remove the lightest entry, or `None` when empty.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop();
        self.sift_down(0);
        min
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l].weight() < self.elements[smallest].weight() {
                smallest = l;
            }
            if r < n && self.elements[r].weight() < self.elements[smallest].weight() {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.elements.len())
            .all(|i| self.elements[Self::parent(i)].weight() <= self.elements[i].weight())
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
