pub mod cache;
pub mod move_set;
pub mod stats;

use std::fmt::Debug;
use std::ops::Neg;

use itertools::Itertools;

pub use crate::min_max::move_set::MoveSet;
use crate::min_max::stats::{NullStats, Stats};

/// Outcome of optimal play, seen from one side. Ordered worst to best.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Score {
    Loss,
    Draw,
    Win,
}

impl Score {
    pub fn value(self) -> i32 {
        match self {
            Score::Loss => -1,
            Score::Draw => 0,
            Score::Win => 1,
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Draw => Score::Draw,
            Score::Win => Score::Loss,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ScoredMove<M> {
    pub score: Score,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: Score, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

/// A game position the search can walk by making and taking back moves.
pub trait MinMaxState {
    type Move: Copy + Debug;
    type Side: Copy + Eq + Debug;

    fn possible_moves(&self) -> Vec<Self::Move>;
    fn side_to_move(&self) -> Self::Side;
    fn do_move(&mut self, min_max_move: Self::Move, side: Self::Side);
    fn undo_move(&mut self, min_max_move: Self::Move);
    /// `None` while the game is still open.
    fn terminal_score(&self, perspective: Self::Side) -> Option<Score>;
}

/// Value of `state` for `perspective` when both sides play perfectly.
pub fn minimax<S: MinMaxState + Clone>(state: &S, perspective: S::Side) -> Score {
    let mut working = state.clone();
    minimax_eval(&mut working, perspective, &mut NullStats)
}

fn minimax_eval<S: MinMaxState, ST: Stats>(state: &mut S, perspective: S::Side, stats: &mut ST) -> Score {
    stats.record_node();
    if let Some(score) = state.terminal_score(perspective) {
        stats.record_terminal();
        return score;
    }

    let mover = state.side_to_move();
    let scores = state.possible_moves().into_iter().map(|m| {
        state.do_move(m, mover);
        let score = minimax_eval(state, perspective, stats);
        state.undo_move(m);
        score
    });
    let best = if mover == perspective {
        scores.max()
    } else {
        scores.min()
    };
    // an open position without moves only exists for broken states
    best.unwrap_or(Score::Draw)
}

/// Scores every move `side` can make in `state`, from `side`'s point of view.
pub fn score_possible_moves<S, ST>(state: &S, side: S::Side, stats: &mut ST) -> Vec<ScoredMove<S::Move>>
where
    S: MinMaxState + Clone,
    ST: Stats,
{
    let mut working = state.clone();
    working.possible_moves().into_iter().map(|m| {
        working.do_move(m, side);
        let score = minimax_eval(&mut working, side, stats);
        working.undo_move(m);
        ScoredMove::new(score, m)
    }).collect()
}

/// All moves reaching the best attainable outcome: wins if there are any,
/// otherwise draws, otherwise every (losing) move.
pub fn best_moves<S, ST>(state: &S, side: S::Side, stats: &mut ST) -> Vec<ScoredMove<S::Move>>
where
    S: MinMaxState + Clone,
    ST: Stats,
{
    score_possible_moves(state, side, stats).into_iter().max_set_by_key(|m| m.score)
}

pub fn best_move_set<S, ST>(state: &S, side: S::Side, stats: &mut ST) -> MoveSet
where
    S: MinMaxState<Move = usize> + Clone,
    ST: Stats,
{
    best_moves(state, side, stats).into_iter()
        .map(|m| m.min_max_move)
        .collect()
}

#[cfg(test)]
pub(crate) mod test {
    use std::time::Instant;

    use ahash::HashSet;

    use crate::min_max::stats::{NullStats, SearchStats};
    use crate::min_max::{best_move_set, best_moves, minimax, score_possible_moves, MoveSet, Score};
    use crate::players::medium::ready_to_win;
    use crate::ttt::{GameBoard, GameResult, Mark};

    fn board(encoded: &str) -> GameBoard {
        encoded.parse().unwrap()
    }

    /// Every position legal play can reach, terminal ones included.
    pub(crate) fn reachable_boards() -> Vec<GameBoard> {
        let mut seen = HashSet::default();
        let mut stack = vec![GameBoard::empty()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if current.evaluate().is_terminal() {
                continue;
            }
            let mark = current.side_to_move();
            for index in current.empty_indexes() {
                let mut next = current.clone();
                next.apply_move(index, mark).unwrap();
                stack.push(next);
            }
        }
        seen.into_iter().collect()
    }

    #[test]
    fn empty_board_is_a_draw() {
        let start = Instant::now();
        assert_eq!(minimax(&GameBoard::empty(), Mark::X), Score::Draw);
        println!("search on empty board took {}ms", start.elapsed().as_millis());
        assert_eq!(minimax(&GameBoard::empty(), Mark::O), Score::Draw);
    }

    #[test]
    fn terminal_boards_score_directly() {
        assert_eq!(minimax(&board("XXXOO...."), Mark::X), Score::Win);
        assert_eq!(minimax(&board("XXXOO...."), Mark::O), Score::Loss);
        assert_eq!(minimax(&board("XOXXOOOXX"), Mark::X), Score::Draw);
    }

    #[test]
    fn forced_win_is_found() {
        // O answered the corner opening with the opposite corner, X forks
        assert_eq!(minimax(&board("X.......O"), Mark::X), Score::Win);
        assert_eq!(minimax(&board("X.......O"), Mark::O), Score::Loss);
    }

    #[test]
    fn search_does_not_leak_moves() {
        let original = board("X...O....");
        let mut stats = SearchStats::default();
        let scored = score_possible_moves(&original, Mark::X, &mut stats);
        assert_eq!(scored.len(), 7);
        assert_eq!(original.encode(), "X...O....");
        assert!(stats.node_count > stats.terminal_count);
        assert!(stats.terminal_count > 0);
    }

    #[test]
    fn completes_own_line_before_blocking() {
        let moves = best_move_set(&board("XX.OO...."), Mark::X, &mut NullStats);
        assert_eq!(moves, [2].into_iter().collect::<MoveSet>());
    }

    #[test]
    fn blocks_when_it_cannot_win() {
        let moves = best_move_set(&board("OO.X....X"), Mark::X, &mut NullStats);
        assert_eq!(moves.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn every_opening_move_draws() {
        let moves = best_move_set(&GameBoard::empty(), Mark::X, &mut NullStats);
        assert_eq!(moves.len(), 9);
    }

    #[test]
    fn all_losing_moves_are_kept() {
        // O faces two open X lines and cannot stop both
        let lost = board("X.X.O.X.O");
        assert_eq!(lost.side_to_move(), Mark::O);
        let scored = score_possible_moves(&lost, Mark::O, &mut NullStats);
        assert!(scored.iter().all(|m| m.score == Score::Loss));
        let moves = best_move_set(&lost, Mark::O, &mut NullStats);
        assert_eq!(moves.iter().collect::<Vec<_>>(), lost.empty_indexes());
    }

    #[test]
    fn best_move_set_is_stable() {
        let position = board("X...O....");
        let first = best_move_set(&position, Mark::X, &mut NullStats);
        let second = best_move_set(&position, Mark::X, &mut NullStats);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn reachable_boards_are_never_invalid() {
        let boards = reachable_boards();
        assert_eq!(boards.len(), 5478);
        for b in &boards {
            assert_ne!(b.evaluate(), GameResult::Invalid, "{}", b.encode());
        }
    }

    #[test]
    fn minimax_is_symmetric() {
        for b in reachable_boards() {
            assert_eq!(minimax(&b, Mark::X), -minimax(&b, Mark::O), "{}", b.encode());
        }
    }

    #[test]
    fn best_moves_never_hand_over_an_immediate_win() {
        for b in reachable_boards() {
            if b.evaluate().is_terminal() {
                continue;
            }
            let mark = b.side_to_move();
            for best in best_moves(&b, mark, &mut NullStats) {
                let mut next = b.clone();
                next.apply_move(best.min_max_move, mark).unwrap();
                if next.evaluate().is_terminal() {
                    continue;
                }
                if ready_to_win(&next, mark.opponent()).is_some() {
                    assert_eq!(best.score, Score::Loss, "{} -> {}", b.encode(), best.min_max_move);
                }
            }
        }
    }
}
