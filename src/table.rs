//! Bucketed hash-consing table.
//!
//! Values live in an arena (`Vec`) and are addressed by their index. Every
//! bucket holds the head of a singly linked chain threaded through the arena
//! entries, so [`Table::put`] can find an equal value or link a new one in
//! front of its chain.

use std::ops::Index;

use crate::error::{Error, Result};
use crate::utils::MyHash;

/// End-of-chain marker.
const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

#[derive(Debug, Clone)]
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    /// Maximum number of entries the arena may hold.
    limit: usize,
}

impl<T> Table<T> {
    /// Create a new table with `buckets` chains and room for `limit` entries.
    pub fn new(buckets: usize, limit: usize) -> Self {
        assert!(buckets > 0, "Table needs at least one bucket");

        Self {
            data: Vec::new(),
            buckets: vec![NIL; buckets],
            limit,
        }
    }

    /// Get the number of stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Get the number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> Option<&T> {
        self.data.get(index).map(|e| &e.value)
    }

    /// Get the index of the first entry of a bucket chain.
    pub fn bucket(&self, bucket: usize) -> Option<usize> {
        match self.buckets[bucket] {
            NIL => None,
            head => Some(head),
        }
    }

    /// Get the index of the entry following `index` in its chain.
    pub fn next(&self, index: usize) -> Option<usize> {
        match self.data[index].next {
            NIL => None,
            next => Some(next),
        }
    }

    /// Add a value without linking it into any bucket and return its index.
    pub fn add(&mut self, value: T) -> Result<usize> {
        if self.data.len() >= self.limit {
            return Err(Error::AllocationFailure(format!(
                "table limit of {} entries reached",
                self.limit
            )));
        }
        self.data
            .try_reserve(1)
            .map_err(|e| Error::AllocationFailure(e.to_string()))?;

        let index = self.data.len();
        self.data.push(Entry { value, next: NIL });
        Ok(index)
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() % self.buckets.len() as u64) as usize
    }

    /// Look up a value equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != NIL {
            let entry = &self.data[index];
            if &entry.value == value {
                return Some(index);
            }
            index = entry.next;
        }
        None
    }

    /// Return the index of a stored value equal to `value`, inserting it at
    /// the head of its bucket chain if there is none.
    pub fn put(&mut self, value: T) -> Result<usize> {
        if let Some(index) = self.find(&value) {
            return Ok(index);
        }

        let bucket = self.bucket_index(&value);
        let index = self.add(value)?;
        self.data[index].next = self.buckets[bucket];
        self.buckets[bucket] = index;
        Ok(index)
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index].value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    struct Item(i32);

    impl MyHash for Item {
        fn hash(&self) -> u64 {
            self.0.unsigned_abs() as u64
        }
    }

    #[test]
    fn test_add() {
        let mut table = Table::new(4, 8);
        let index = table.add(Item(42)).unwrap();
        assert_eq!(table[index], Item(42));
        assert_eq!(table.next(index), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_too_much() {
        let mut table = Table::new(4, 2);
        table.add(Item(1)).unwrap();
        table.add(Item(2)).unwrap();
        assert!(matches!(
            table.add(Item(3)),
            Err(Error::AllocationFailure(_))
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_put_deduplicates() {
        let mut table = Table::new(4, 8);
        let index1 = table.put(Item(5)).unwrap();
        let index2 = table.put(Item(5)).unwrap();
        assert_eq!(index1, index2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_put_links_at_head() {
        let mut table = Table::new(4, 8);
        // Same hash, different values: both land in bucket 1.
        let index1 = table.put(Item(5)).unwrap();
        let index2 = table.put(Item(-5)).unwrap();
        assert_ne!(index1, index2);
        assert_eq!(table.bucket(1), Some(index2));
        assert_eq!(table.next(index2), Some(index1));
        assert_eq!(table.next(index1), None);
        assert_eq!(table.find(&Item(-5)), Some(index2));
        assert_eq!(table.find(&Item(6)), None);
    }

    #[test]
    fn test_non_power_of_two_buckets() {
        let mut table = Table::new(3, 16);
        for i in 0..10 {
            table.put(Item(i)).unwrap();
        }
        assert_eq!(table.len(), 10);
        assert_eq!(table.bucket(0).map(|i| table[i]), Some(Item(9)));
    }
}
