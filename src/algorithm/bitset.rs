use bitvec::prelude::*;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed-size bitset over tile indices
///
/// Uses the same 0-based `u16` indices as the grid. Provides O(1) membership
/// testing for walks and flood fills, and hashes by content so search states
/// can be deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Create a bitset holding every index of a walk
    pub fn from_indices(tile_count: usize, indices: &[u16]) -> Self {
        let mut bitset = Self::new(tile_count);
        for &index in indices {
            bitset.insert(index);
        }
        bitset
    }

    /// Insert a tile index
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the bitset
    pub fn insert(&mut self, index: u16) {
        self.bits.set(usize::from(index), true);
    }

    /// Test tile membership
    pub fn contains(&self, index: u16) -> bool {
        self.bits
            .get(usize::from(index))
            .is_some_and(|bit| *bit)
    }

    /// Add every tile of `other` to this bitset
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate the present indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits.iter_ones().map(|index| index as u16)
    }

    /// Backing storage words; bits past the last index are always clear
    pub fn words(&self) -> &[usize] {
        self.bits.as_raw_slice()
    }
}

impl Hash for TileBitset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words().hash(state);
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<u16> = self.iter().collect();
        write!(f, "TileBitset({} tiles: {indices:?})", self.count())
    }
}
