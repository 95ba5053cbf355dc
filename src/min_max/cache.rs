use std::hash::Hash;

use ahash::HashMap;

use crate::min_max::stats::Stats;
use crate::min_max::{best_move_set, MinMaxState, MoveSet};
use crate::ttt::GameBoard;

/// Memo of best move sets. Entries are never replaced once stored: the search
/// is deterministic, so a recomputed set would be the same.
pub trait Cache<S> {
    fn store(&mut self, state: &S, moves: MoveSet);
    fn lookup(&self, state: &S) -> Option<MoveSet>;
}

#[derive(Debug, Clone)]
pub struct HashMapCache<S>(HashMap<S, MoveSet>);

impl<S> HashMapCache<S> {
    pub fn new(map: HashMap<S, MoveSet>) -> Self {
        Self(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &MoveSet)> {
        self.0.iter()
    }
}

impl<S> Default for HashMapCache<S> {
    fn default() -> Self {
        Self(HashMap::default())
    }
}

impl<S> Cache<S> for HashMapCache<S>
where
    S: Eq + Hash + Clone,
{
    fn store(&mut self, state: &S, moves: MoveSet) {
        self.0.entry(state.clone()).or_insert(moves);
    }

    fn lookup(&self, state: &S) -> Option<MoveSet> {
        self.0.get(state).copied()
    }
}

/// Best move sets keyed by the full board. The mover follows from the cell
/// counts, so it is not part of the key.
pub type BestMoveCache = HashMapCache<GameBoard>;

/// Answers from the cache when possible, otherwise searches and remembers.
pub fn cached_best_move_set<S, C, ST>(cache: &mut C, state: &S, side: S::Side, stats: &mut ST) -> MoveSet
where
    S: MinMaxState<Move = usize> + Clone,
    C: Cache<S>,
    ST: Stats,
{
    if let Some(moves) = cache.lookup(state) {
        stats.record_cache_hit();
        return moves;
    }
    stats.record_cache_miss();
    let moves = best_move_set(state, side, stats);
    cache.store(state, moves);
    moves
}
