//! A fast resettable vector based on timestamps.

use std::ops::Index;

/// A fast resettable vector based on 32bit timestamps.
/// Entries written before the last `reset` read as the default again, without touching the memory.
/// Entries can only be written through `set`.
#[derive(Debug, Clone)]
pub struct TimestampedVector<T> {
    data: Vec<T>,
    // timestamp for current iteration. Up to date values will have this one
    current: u32,
    // timestamp of the last write of each entry
    timestamps: Vec<u32>,
    default: T,
}

impl<T: Clone> TimestampedVector<T> {
    /// Create a new `TimestampedVector` with `size` elements of the default
    pub fn new(size: usize, default: T) -> TimestampedVector<T> {
        TimestampedVector {
            data: vec![default.clone(); size],
            current: 0,
            timestamps: vec![0; size],
            default,
        }
    }

    /// Reset all elements to the default.
    /// Amortized O(1).
    pub fn reset(&mut self) {
        let (new, overflow) = self.current.overflowing_add(1);
        self.current = new;

        // old timestamps might become current again after an overflow
        if overflow {
            self.data.iter_mut().for_each(|element| *element = self.default.clone());
            self.timestamps.iter_mut().for_each(|ts| *ts = 0);
        }
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
        self.timestamps[index] = self.current;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Index<usize> for TimestampedVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if self.timestamps[index] == self.current {
            &self.data[index]
        } else {
            &self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_defaults() {
        let mut vec = TimestampedVector::new(3, 7u32);
        vec.set(1, 2);
        assert_eq!((vec[0], vec[1], vec[2]), (7, 2, 7));

        vec.reset();
        assert_eq!(vec[1], 7);

        vec.set(2, 0);
        assert_eq!((vec[1], vec[2]), (7, 0));
    }

    #[test]
    fn survives_timestamp_overflow() {
        let mut vec = TimestampedVector::new(2, false);
        vec.set(0, true);
        vec.current = u32::MAX;
        vec.set(1, true);
        vec.reset();
        assert!(!vec[0]);
        assert!(!vec[1]);
    }
}
