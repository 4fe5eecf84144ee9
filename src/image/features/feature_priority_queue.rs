use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Float;
use crate::image::features::{Feature, Response};

pub const DEFAULT_GRID_SIZE: usize = 32;
pub const DEFAULT_FEATURES_PER_CELL: usize = 4;

struct Entry<T> {
    key: Float,
    order: usize,
    value: T
}

// The heap top is the weakest entry: smallest absolute response, latest insertion on ties.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.total_cmp(&self.key).then(self.order.cmp(&other.order))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/**
 * Fixed capacity container that retains the elements with the largest absolute response.
 */
pub struct FeaturePriorityQueue<T: Response> {
    capacity: usize,
    inserted: usize,
    heap: BinaryHeap<Entry<T>>
}

impl<T: Response> FeaturePriorityQueue<T> {
    pub fn new(capacity: usize) -> FeaturePriorityQueue<T> {
        FeaturePriorityQueue{capacity, inserted: 0, heap: BinaryHeap::with_capacity(capacity+1)}
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /**
     * Returns true if the value was kept.
     */
    pub fn push(&mut self, value: T) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let entry = Entry{key: value.response().abs(), order: self.inserted, value};
        self.inserted += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(entry);
            return true;
        }

        match self.heap.peek() {
            Some(weakest) if entry.key > weakest.key => {
                self.heap.pop();
                self.heap.push(entry);
                true
            },
            _ => false
        }
    }

    /**
     * Strongest first, insertion order on equal responses.
     */
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec().into_iter().map(|e| e.value).collect()
    }
}

/**
 * Keeps at most `per_cell` features with the strongest response in every
 * `grid_size` x `grid_size` pixel cell. Output is ordered by cell (row major), strongest first.
 */
pub fn select_strongest_per_cell(features: &[Feature], width: usize, height: usize, grid_size: usize, per_cell: usize) -> Vec<Feature> {
    assert!(grid_size > 0);
    let cols = (width + grid_size - 1)/grid_size;
    let rows = (height + grid_size - 1)/grid_size;
    let mut queues = (0..rows*cols).map(|_| FeaturePriorityQueue::<Feature>::new(per_cell)).collect::<Vec<_>>();

    for f in features {
        if f.x < 0 || f.y < 0 || f.x as usize >= width || f.y as usize >= height {
            continue;
        }
        let idx = (f.y as usize / grid_size)*cols + f.x as usize / grid_size;
        queues[idx].push(*f);
    }

    queues.into_iter().flat_map(|q| q.into_sorted_vec()).collect()
}
