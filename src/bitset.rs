//! Growable vertex bitsets.
//!
//! Rows of the adjacency matrix, neighbourhood intersections and witness vertex sets
//! are all `VertexSet`s. Bits are packed into `u64` words; the set grows on demand, and
//! any vertex past the last word is simply absent.

use std::fmt;

const WORD_BITS: usize = 64;

#[inline(always)]
const fn word_of(v: usize) -> usize {
    v / WORD_BITS
}

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << (v % WORD_BITS)
}

// ============================================================================
// VertexSet
// ============================================================================

/// A set of vertex indices backed by a growable `u64` bitset.
///
/// Equality is by content: trailing zero words are ignored, so sets that grew to
/// different capacities still compare equal when they hold the same vertices.
#[derive(Default)]
pub struct VertexSet {
    words: Vec<u64>,
}

impl Clone for VertexSet {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
        }
    }

    // Reuses the existing allocation.
    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
    }
}

impl VertexSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates an empty set with room for vertices `0..n` without reallocating.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            words: vec![0u64; n.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a set holding exactly the given vertices.
    pub fn from_vertices(vertices: &[usize]) -> Self {
        vertices.iter().copied().collect()
    }

    /// Returns whether `v` is in the set.
    #[inline(always)]
    pub fn contains(&self, v: usize) -> bool {
        self.words
            .get(word_of(v))
            .is_some_and(|&w| (w & bit(v)) != 0)
    }

    /// Inserts `v`, growing the set if needed. Returns `true` if `v` was not already present.
    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        let idx = word_of(v);
        if idx >= self.words.len() {
            self.words.resize(idx + 1, 0);
        }
        let present = (self.words[idx] & bit(v)) != 0;
        self.words[idx] |= bit(v);
        !present
    }

    /// Removes `v`. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, v: usize) -> bool {
        match self.words.get_mut(word_of(v)) {
            Some(w) if (*w & bit(v)) != 0 => {
                *w &= !bit(v);
                true
            }
            _ => false,
        }
    }

    /// Number of vertices in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Smallest vertex in the set.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Returns `true` if the two sets share at least one vertex.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(&a, &b)| (a & b) != 0)
    }

    /// Size of the intersection, without materializing it.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(&a, &b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Returns the intersection of two sets.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(&a, &b)| a & b)
                .collect(),
        }
    }

    /// Keeps only vertices also present in `other`.
    pub fn intersect_with(&mut self, other: &Self) {
        for (i, w) in self.words.iter_mut().enumerate() {
            *w &= other.words.get(i).copied().unwrap_or(0);
        }
    }

    /// Adds every vertex of `other`.
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, &o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    /// Removes every vertex of `other`.
    pub fn difference_with(&mut self, other: &Self) {
        for (w, &o) in self.words.iter_mut().zip(&other.words) {
            *w &= !o;
        }
    }

    /// Iterates the vertices in increasing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl PartialEq for VertexSet {
    fn eq(&self, other: &Self) -> bool {
        let n = self.words.len().max(other.words.len());
        (0..n).all(|i| {
            self.words.get(i).copied().unwrap_or(0) == other.words.get(i).copied().unwrap_or(0)
        })
    }
}

impl Eq for VertexSet {}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for VertexSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over a [`VertexSet`].
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
                let v = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // clear lowest set bit
                return Some(self.index * WORD_BITS + v);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
