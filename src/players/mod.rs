//! Move providers: the human at the console and the three AI levels.

pub mod hard;
pub mod human;
pub mod medium;
pub mod random;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum_macros::{Display, EnumIter, EnumString};

use crate::console::Console;
use crate::error::Result;
use crate::min_max::cache::BestMoveCache;
use crate::players::hard::HardAi;
use crate::players::human::Human;
use crate::players::medium::MediumAi;
use crate::players::random::EasyAi;
use crate::ttt::{GameBoard, Mark};

pub trait MoveProvider {
    fn name(&self) -> &'static str;

    /// Places `mark` on one empty cell of `board` and returns its index.
    fn make_move(&mut self, board: &mut GameBoard, mark: Mark, console: &mut dyn Console) -> Result<usize>;
}

/// Player tokens accepted by the `start` command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    User,
    Easy,
    Medium,
    Hard,
}

/// One provider per kind, shared by every game of a session.
pub struct Roster {
    pub user: Human,
    pub easy: EasyAi,
    pub medium: MediumAi,
    pub hard: HardAi,
}

impl Roster {
    /// With a seed every random choice of the session is reproducible.
    pub fn new(cache: BestMoveCache, seed: Option<u64>) -> Self {
        let mut seeder = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut child = || StdRng::seed_from_u64(seeder.gen());
        Self {
            user: Human,
            easy: EasyAi::new(child()),
            medium: MediumAi::new(child()),
            hard: HardAi::new(cache, child()),
        }
    }

    pub fn get_mut(&mut self, kind: PlayerKind) -> &mut dyn MoveProvider {
        match kind {
            PlayerKind::User => &mut self.user,
            PlayerKind::Easy => &mut self.easy,
            PlayerKind::Medium => &mut self.medium,
            PlayerKind::Hard => &mut self.hard,
        }
    }

    pub fn name(&self, kind: PlayerKind) -> &'static str {
        match kind {
            PlayerKind::User => self.user.name(),
            PlayerKind::Easy => self.easy.name(),
            PlayerKind::Medium => self.medium.name(),
            PlayerKind::Hard => self.hard.name(),
        }
    }
}
