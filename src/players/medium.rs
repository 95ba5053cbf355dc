use rand::rngs::StdRng;
use tracing::debug;

use crate::common::{Cell, LINES};
use crate::console::Console;
use crate::error::Result;
use crate::players::random::{announce, random_empty_index};
use crate::players::MoveProvider;
use crate::ttt::{GameBoard, Mark};

/// Cell that completes a line for `mark`: the first line, in `LINES` order,
/// holding two of `mark` and one empty cell.
pub fn ready_to_win(board: &GameBoard, mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let cells = board.line(line);
        let gap = cells.iter().position(|cell| cell.is_empty())?;
        let owned = cells.iter().filter(|&&cell| cell == mark).count();
        (owned == 2).then_some(line[gap])
    })
}

/// Wins when it can, blocks when it must, otherwise plays like the easy level.
pub struct MediumAi {
    rng: StdRng,
}

impl MediumAi {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    fn choose(&mut self, board: &GameBoard, mark: Mark) -> Result<usize> {
        if let Some(index) = ready_to_win(board, mark) {
            debug!(%mark, index, "medium completes a line");
            return Ok(index);
        }
        if let Some(index) = ready_to_win(board, mark.opponent()) {
            debug!(%mark, index, "medium blocks a line");
            return Ok(index);
        }
        random_empty_index(board, &mut self.rng)
    }
}

impl MoveProvider for MediumAi {
    fn name(&self) -> &'static str {
        "MediumAI"
    }

    fn make_move(&mut self, board: &mut GameBoard, mark: Mark, console: &mut dyn Console) -> Result<usize> {
        let index = self.choose(board, mark)?;
        board.apply_move(index, mark)?;
        announce(console, "medium", mark)?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{empty, sink};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::console::IoConsole;
    use crate::players::medium::{ready_to_win, MediumAi};
    use crate::players::MoveProvider;
    use crate::ttt::{GameBoard, Mark};

    fn board(encoded: &str) -> GameBoard {
        encoded.parse().unwrap()
    }

    fn medium_move(encoded: &str, mark: Mark, seed: u64) -> usize {
        let mut console = IoConsole::new(empty(), sink());
        let mut medium = MediumAi::new(StdRng::seed_from_u64(seed));
        let mut b = board(encoded);
        let index = medium.make_move(&mut b, mark, &mut console).unwrap();
        assert_eq!(b.cells[index], mark);
        index
    }

    #[test]
    fn ready_to_win_finds_the_gap() {
        assert_eq!(ready_to_win(&board("XX.OO...."), Mark::X), Some(2));
        assert_eq!(ready_to_win(&board("XX.OO...."), Mark::O), Some(5));
        assert_eq!(ready_to_win(&board("X.O......"), Mark::X), None);
        // a line blocked by the opponent is not a threat
        assert_eq!(ready_to_win(&board("XXO.O...."), Mark::X), None);
    }

    #[test]
    fn first_line_in_scan_order_wins_the_tie() {
        // X can finish the top row or the left column
        assert_eq!(ready_to_win(&board("XX.X.O.OO"), Mark::X), Some(2));
    }

    #[test]
    fn completes_own_line_before_blocking() {
        for seed in 0..8 {
            assert_eq!(medium_move("XX.OO....", Mark::X, seed), 2);
        }
    }

    #[test]
    fn blocks_the_opponent() {
        for seed in 0..8 {
            assert_eq!(medium_move("OO.X....X", Mark::X, seed), 2);
        }
    }

    #[test]
    fn falls_back_to_a_random_empty_cell() {
        for seed in 0..8 {
            let index = medium_move("X...O....", Mark::X, seed);
            assert!(![0, 4].contains(&index));
        }
    }
}
