use std::fmt;

use itertools::Itertools;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Cell indices of a 3x3 board that are equally good for the mover.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct MoveSet {
    mask: u16,
}

impl MoveSet {
    pub const CELLS: usize = 9;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < Self::CELLS);
        self.mask |= 1u16 << index;
    }

    pub fn contains(&self, index: usize) -> bool {
        index < Self::CELLS && self.mask & (1u16 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::CELLS).filter(move |&index| self.contains(index))
    }

    /// Uniform pick among the indices, `None` for an empty set.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.iter().choose(rng)
    }
}

impl FromIterator<usize> for MoveSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = MoveSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl From<MoveSet> for Vec<usize> {
    fn from(set: MoveSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<usize>> for MoveSet {
    type Error = GameError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        match indices.iter().find(|&&index| index >= Self::CELLS) {
            Some(&index) => Err(GameError::IndexOutOfRange { index }),
            None => Ok(indices.into_iter().collect()),
        }
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}
