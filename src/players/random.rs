use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::console::Console;
use crate::error::{GameError, Result};
use crate::players::MoveProvider;
use crate::ttt::{GameBoard, Mark};

/// Picks uniformly among the empty cells.
pub fn random_empty_index<R: Rng + ?Sized>(board: &GameBoard, rng: &mut R) -> Result<usize> {
    board.empty_indexes()
        .choose(rng)
        .copied()
        .ok_or_else(|| GameError::NoMovesAvailable { board: board.encode() })
}

pub fn announce(console: &mut dyn Console, level: &str, mark: Mark) -> Result<()> {
    console.say(&format!("Making move level \"{level}\" with \"{mark}\""))
}

pub struct EasyAi {
    rng: StdRng,
}

impl EasyAi {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl MoveProvider for EasyAi {
    fn name(&self) -> &'static str {
        "EasyAI"
    }

    fn make_move(&mut self, board: &mut GameBoard, mark: Mark, console: &mut dyn Console) -> Result<usize> {
        let index = random_empty_index(board, &mut self.rng)?;
        board.apply_move(index, mark)?;
        debug!(%mark, index, "easy move");
        announce(console, "easy", mark)?;
        Ok(index)
    }
}
