//! Tic-tac-toe between a human and three AI levels, the strongest of which
//! plays perfectly through an exhaustive minimax search backed by a
//! persistent best-move cache.

pub mod cli;
pub mod common;
pub mod console;
pub mod controller;
pub mod error;
pub mod min_max;
pub mod persist;
pub mod players;
pub mod ttt;
