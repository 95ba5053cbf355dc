use std::hash::Hash;

use itertools::Itertools;

pub trait Cell: Copy + Eq + Hash {
    fn empty() -> Self;

    fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Rows, columns and diagonals of a 3x3 grid, in the order they are scanned.
pub static LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board3x3<C: Cell> {
    pub cells: [C; 9],
}

impl<C: Cell> Board3x3<C> {
    pub fn empty() -> Self {
        Self::new([C::empty(); 9])
    }

    pub fn new(cells: [C; 9]) -> Self {
        Self { cells }
    }

    /// Lines whose three cells hold the same non-empty value.
    pub fn completed_lines(&self) -> impl Iterator<Item = &'static [usize; 3]> + '_ {
        LINES.iter().filter(|line| {
            let first = self.cells[line[0]];
            !first.is_empty() && line.iter().all(|&index| self.cells[index] == first)
        })
    }

    pub fn empty_indexes(&self) -> Vec<usize> {
        self.cells.iter()
            .positions(|cell| cell.is_empty())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, cell: C) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn line(&self, line: &[usize; 3]) -> [C; 3] {
        [self.cells[line[0]], self.cells[line[1]], self.cells[line[2]]]
    }
}

impl<C: Cell> Default for Board3x3<C> {
    fn default() -> Self {
        Self::empty()
    }
}
