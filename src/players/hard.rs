use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::console::Console;
use crate::error::{GameError, Result};
use crate::min_max::cache::{cached_best_move_set, BestMoveCache};
use crate::min_max::best_move_set;
use crate::min_max::stats::SearchStats;
use crate::players::random::announce;
use crate::players::MoveProvider;
use crate::ttt::{GameBoard, Mark};

/// Perfect play: a random pick among the minimax-optimal moves, which are
/// looked up in (or added to) the best-move cache.
pub struct HardAi {
    cache: BestMoveCache,
    rng: StdRng,
}

impl HardAi {
    pub fn new(cache: BestMoveCache, rng: StdRng) -> Self {
        Self { cache, rng }
    }

    pub fn cache(&self) -> &BestMoveCache {
        &self.cache
    }
}

impl MoveProvider for HardAi {
    fn name(&self) -> &'static str {
        "HardAI"
    }

    fn make_move(&mut self, board: &mut GameBoard, mark: Mark, console: &mut dyn Console) -> Result<usize> {
        let mut stats = SearchStats::default();
        let mut best = cached_best_move_set(&mut self.cache, &*board, mark, &mut stats);
        if !board.accepts(&best) {
            warn!(board = %board.encode(), %best, "cached moves do not fit the board, searching again");
            best = best_move_set(&*board, mark, &mut stats);
        }
        debug!(
            board = %board.encode(),
            %mark,
            %best,
            cache_hit = stats.cache_hit_count > 0,
            nodes = stats.node_count,
            terminals = stats.terminal_count,
            "hard move candidates"
        );

        let index = best.choose(&mut self.rng)
            .ok_or_else(|| GameError::NoMovesAvailable { board: board.encode() })?;
        board.apply_move(index, mark)?;
        announce(console, "hard", mark)?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{empty, sink};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::console::IoConsole;
    use crate::min_max::cache::{BestMoveCache, Cache};
    use crate::min_max::MoveSet;
    use crate::players::hard::HardAi;
    use crate::players::MoveProvider;
    use crate::ttt::{GameBoard, GameResult, Mark};

    fn hard(seed: u64) -> HardAi {
        HardAi::new(BestMoveCache::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn completes_own_line_before_blocking() {
        let mut console = IoConsole::new(empty(), sink());
        let mut ai = hard(0);
        let mut board = "XX.OO....".parse::<GameBoard>().unwrap();
        assert_eq!(ai.make_move(&mut board, Mark::X, &mut console).unwrap(), 2);
        assert_eq!(board.evaluate(), GameResult::WinX);
    }

    #[test]
    fn remembers_searched_boards() {
        let mut console = IoConsole::new(empty(), sink());
        let mut ai = hard(1);
        let start = "X...O....".parse::<GameBoard>().unwrap();

        let mut first = start.clone();
        ai.make_move(&mut first, Mark::X, &mut console).unwrap();
        let remembered = ai.cache().lookup(&start).unwrap();
        assert_eq!(ai.cache().len(), 1);

        let mut second = start.clone();
        let index = ai.make_move(&mut second, Mark::X, &mut console).unwrap();
        assert!(remembered.contains(index));
        assert_eq!(ai.cache().len(), 1);
    }

    #[test]
    fn unplayable_cached_moves_are_searched_again() {
        let mut console = IoConsole::new(empty(), sink());
        let mut cache = BestMoveCache::default();
        cache.store(&GameBoard::empty(), MoveSet::new());
        let start = "X...O....".parse::<GameBoard>().unwrap();
        cache.store(&start, [0].into_iter().collect());
        let mut ai = HardAi::new(cache, StdRng::seed_from_u64(3));

        let mut board = GameBoard::empty();
        ai.make_move(&mut board, Mark::X, &mut console).unwrap();
        assert_eq!(board.count(Mark::X), 1);

        let mut board = start.clone();
        let index = ai.make_move(&mut board, Mark::X, &mut console).unwrap();
        assert_ne!(index, 0);
        assert_eq!(board.count(Mark::X), 2);
    }

    #[test]
    fn self_play_always_draws() {
        let mut console = IoConsole::new(empty(), sink());
        let mut ai = hard(2);
        for _ in 0..10 {
            let mut board = GameBoard::empty();
            let mut mark = Mark::X;
            while board.evaluate() == GameResult::InProgress {
                ai.make_move(&mut board, mark, &mut console).unwrap();
                mark = mark.opponent();
            }
            assert_eq!(board.evaluate(), GameResult::Draw, "{}", board.encode());
        }
    }
}
