use std::fmt;
use std::str::FromStr;

use crate::common::{Board3x3, Cell};
use crate::error::{GameError, ParseBoardError, Result};
use crate::min_max::{MinMaxState, MoveSet, Score};
use crate::players::PlayerKind;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Character used by the text encoding of a board.
    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            '.' | ' ' => Some(Mark::Empty),
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }
}

impl Cell for Mark {
    fn empty() -> Self {
        Self::Empty
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => f.write_str(" "),
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum GameResult {
    InProgress,
    Draw,
    WinX,
    WinO,
    /// Both marks completed a line. Legal play never gets here.
    Invalid,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::InProgress => "Game not finished",
            GameResult::Draw => "Draw",
            GameResult::WinX => "X wins",
            GameResult::WinO => "O wins",
            GameResult::Invalid => "Wrong state!",
        };
        f.write_str(text)
    }
}

pub type GameBoard = Board3x3<Mark>;

impl GameBoard {
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<()> {
        match self.cells.get(index) {
            None => Err(GameError::IndexOutOfRange { index }),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(GameError::CellOccupied { index }),
        }
    }

    pub fn evaluate(&self) -> GameResult {
        let (x_won, o_won) = self.completed_lines().fold((false, false), |(x, o), line| {
            match self.cells[line[0]] {
                Mark::X => (true, o),
                Mark::O => (x, true),
                Mark::Empty => (x, o),
            }
        });
        match (x_won, o_won) {
            (true, true) => GameResult::Invalid,
            (true, false) => GameResult::WinX,
            (false, true) => GameResult::WinO,
            (false, false) if self.is_full() => GameResult::Draw,
            (false, false) => GameResult::InProgress,
        }
    }

    /// X moves first, so whoever has placed fewer marks is next.
    pub fn side_to_move(&self) -> Mark {
        if self.count(Mark::X) == self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Whether every index of a non-empty `moves` names an empty cell.
    pub fn accepts(&self, moves: &MoveSet) -> bool {
        !moves.is_empty() && moves.iter().all(|index| self.cells[index] == Mark::Empty)
    }

    pub fn encode(&self) -> String {
        self.cells.iter().map(|cell| cell.to_char()).collect()
    }
}

impl FromStr for GameBoard {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 9 {
            return Err(ParseBoardError::new(s, format!("expected 9 cells, got {}", chars.len())));
        }
        let mut cells = [Mark::Empty; 9];
        for (index, c) in chars.into_iter().enumerate() {
            cells[index] = Mark::from_char(c)
                .ok_or_else(|| ParseBoardError::new(s, format!("invalid character '{c}' at position {index}")))?;
        }
        Ok(GameBoard::new(cells))
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.cells;
        writeln!(f, "y^--------")?;
        writeln!(f, "3| {} {} {} |", c[0], c[1], c[2])?;
        writeln!(f, "2| {} {} {} |", c[3], c[4], c[5])?;
        writeln!(f, "1| {} {} {} |", c[6], c[7], c[8])?;
        writeln!(f, " -------->x")?;
        write!(f, "   1 2 3")
    }
}

impl MinMaxState for GameBoard {
    type Move = usize;
    type Side = Mark;

    fn possible_moves(&self) -> Vec<usize> {
        self.empty_indexes()
    }

    fn side_to_move(&self) -> Mark {
        GameBoard::side_to_move(self)
    }

    fn do_move(&mut self, index: usize, side: Mark) {
        debug_assert_eq!(self.cells[index], Mark::Empty);
        self.cells[index] = side;
    }

    fn undo_move(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }

    fn terminal_score(&self, perspective: Mark) -> Option<Score> {
        match self.completed_lines().next() {
            Some(line) if self.cells[line[0]] == perspective => Some(Score::Win),
            Some(_) => Some(Score::Loss),
            None if self.is_full() => Some(Score::Draw),
            None => None,
        }
    }
}

/// A game in progress: the board plus whose mark and which player act next.
#[derive(Debug, Clone)]
pub struct Game {
    board: GameBoard,
    turn: (Mark, Mark),
    players: Option<(PlayerKind, PlayerKind)>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: GameBoard::empty(),
            turn: (Mark::X, Mark::O),
            players: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut GameBoard {
        &mut self.board
    }

    /// The mark to move and the opposing mark.
    pub fn marks(&self) -> (Mark, Mark) {
        self.turn
    }

    pub fn set_players(&mut self, first: PlayerKind, second: PlayerKind) {
        self.players = Some((first, second));
    }

    /// The player to act and the one waiting.
    pub fn players(&self) -> Option<(PlayerKind, PlayerKind)> {
        self.players
    }

    pub fn evaluate(&self) -> GameResult {
        self.board.evaluate()
    }

    pub fn swap_turn(&mut self) {
        let (mark, other_mark) = self.turn;
        self.turn = (other_mark, mark);
        if let Some((player, other_player)) = self.players {
            self.players = Some((other_player, player));
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
