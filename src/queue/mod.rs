use std::cmp::Ordering;


/// Total order used by the heap
/// Floats compare with `total_cmp`, so a NaN sorts after every other value
/// instead of stalling where it was pushed
pub trait Priority {
    fn priority_cmp(&self, other: &Self) -> Ordering;

    fn precedes(&self, other: &Self) -> bool {
        self.priority_cmp(other) == Ordering::Less
    }
}

impl Priority for f64 {
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Priority for f32 {
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

macro_rules! ord_priority {
    ($($t:ty),*) => {
        $(impl Priority for $t {
            fn priority_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        })*
    };
}

ord_priority!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);


/// Binary min-heap over (priority, payload) entries
/// https://en.wikipedia.org/wiki/Binary_heap
///
/// Entries live in a dense vector; the children of position `i` sit at
/// `2i + 1` and `2i + 2`. Only the priority takes part in comparisons
/// (see [`Priority`]), so the payload needs no ordering at all. Equal
/// priorities come out in no particular order.
///
/// There is no decrease-key: Dijkstra pushes a fresh entry when a node
/// improves and skips the stale one when it surfaces.
#[derive(Clone, Debug)]
pub struct MinHeap<P, T> {
    entries: Vec<(P, T)>,
}

impl<P, T> Default for MinHeap<P, T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<P: Priority, T> MinHeap<P, T> {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Insert an entry, then move it up while it beats its parent
    pub fn push(&mut self, priority: P, payload: T) {
        self.entries.push((priority, payload));
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return an entry with the smallest priority
    /// Returns None when the queue is empty
    pub fn pop(&mut self) -> Option<(P, T)> {
        if self.entries.is_empty() {
            return None;
        }

        // Move the last entry to the root and let it sink
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();

        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        min
    }

    /// Smallest entry without removing it
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.entries.first().map(|(priority, payload)| (priority, payload))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;

            // strictly less - equal priorities stay where they are
            if self.entries[index].0.precedes(&self.entries[parent].0) {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();

        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            // Both children have to be checked, swapping with the larger one
            // would put it above its smaller sibling
            if left < len && self.entries[left].0.precedes(&self.entries[smallest].0) {
                smallest = left;
            }
            if right < len && self.entries[right].0.precedes(&self.entries[smallest].0) {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.entries.len()).all(|i| !self.entries[i].0.precedes(&self.entries[(i - 1) / 2].0))
    }
}

impl<P: Priority, T> Extend<(P, T)> for MinHeap<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, payload) in iter {
            self.push(priority, payload);
        }
    }
}

impl<P: Priority, T> FromIterator<(P, T)> for MinHeap<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = MinHeap::new();
        heap.extend(iter);
        heap
    }
}
