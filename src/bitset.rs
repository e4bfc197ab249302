//! Fixed-capacity bitsets over `u64` words.
//!
//! Graphs from enumeration runs are small, so the word storage is inline for up to
//! 128 bits and only spills to the heap for larger orders.

use smallvec::SmallVec;
use std::fmt;

const WORD_BITS: usize = 64;

#[inline(always)]
const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

#[inline(always)]
const fn split(i: usize) -> (usize, u64) {
    (i / WORD_BITS, 1u64 << (i % WORD_BITS))
}

/// A set of small non-negative integers with a capacity fixed at construction.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSet {
    words: SmallVec<[u64; 2]>,
    capacity: usize,
}

impl BitSet {
    /// Creates an empty set able to hold `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: SmallVec::from_elem(0, words_for(capacity)),
            capacity,
        }
    }

    /// Returns whether `i` is a member.
    #[inline(always)]
    pub fn contains(&self, i: usize) -> bool {
        if i >= self.capacity {
            return false;
        }
        let (w, m) = split(i);
        self.words[w] & m != 0
    }

    /// Inserts `i`; returns `true` if it was not present.
    ///
    /// # Panics
    /// Panics if `i >= capacity`.
    #[inline(always)]
    pub fn insert(&mut self, i: usize) -> bool {
        assert!(i < self.capacity, "bit {i} out of range for capacity {}", self.capacity);
        let (w, m) = split(i);
        let fresh = self.words[w] & m == 0;
        self.words[w] |= m;
        fresh
    }

    /// Removes `i`; returns `true` if it was present.
    #[inline(always)]
    pub fn remove(&mut self, i: usize) -> bool {
        if i >= self.capacity {
            return false;
        }
        let (w, m) = split(i);
        let present = self.words[w] & m != 0;
        self.words[w] &= !m;
        present
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if there are no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// `self |= other`. Both sets must have the same capacity.
    pub fn union_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// Iterates members in increasing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`BitSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut s = BitSet::with_capacity(70);
        assert!(s.is_empty());
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert!(s.insert(69));
        assert!(s.contains(3) && s.contains(69));
        assert!(!s.contains(4));
        assert!(!s.contains(1000));
        assert_eq!(s.len(), 2);
        assert!(s.remove(3));
        assert!(!s.remove(3));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn iter_is_ascending_across_words() {
        let mut s = BitSet::with_capacity(200);
        for i in [199, 0, 64, 63, 128, 5] {
            s.insert(i);
        }
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 5, 63, 64, 128, 199]);
    }

    #[test]
    fn zero_capacity_set_is_empty() {
        let s = BitSet::with_capacity(0);
        assert_eq!(s.iter().count(), 0);
        assert!(s.is_empty());
        assert!(!s.contains(0));
    }

    #[test]
    fn union_keeps_members_sorted() {
        let mut a = BitSet::with_capacity(10);
        let mut b = BitSet::with_capacity(10);
        a.insert(1);
        a.insert(2);
        b.insert(2);
        b.insert(7);
        a.union_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 2, 7]);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 2);
    }

    #[test]
    #[should_panic]
    fn insert_out_of_range_panics() {
        let mut s = BitSet::with_capacity(4);
        s.insert(4);
    }
}
