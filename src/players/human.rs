use tracing::debug;

use crate::console::Console;
use crate::error::{GameError, InputError, Result};
use crate::players::MoveProvider;
use crate::ttt::{GameBoard, Mark};

/// Maps `"x y"` (column, row; `"1 1"` is the bottom-left cell) to a board index.
pub fn parse_coordinates(input: &str) -> std::result::Result<usize, InputError> {
    let parts = input.split_whitespace().collect::<Vec<_>>();
    let [x, y] = parts.as_slice() else {
        return Err(InputError::Malformed);
    };
    if !x.bytes().chain(y.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(InputError::Malformed);
    }
    let (Ok(x), Ok(y)) = (x.parse::<u8>(), y.parse::<u8>()) else {
        return Err(InputError::Malformed);
    };
    if !(1..=3).contains(&x) || !(1..=3).contains(&y) {
        return Err(InputError::OutOfRange);
    }
    Ok(usize::from(3 - y) * 3 + usize::from(x - 1))
}

/// Index for `input` if it names an empty cell of `board`.
pub fn validate_input(board: &GameBoard, input: &str) -> std::result::Result<usize, InputError> {
    let index = parse_coordinates(input)?;
    if board.cells[index] == Mark::Empty {
        Ok(index)
    } else {
        Err(InputError::Occupied)
    }
}

/// The person at the console. Asks again until the coordinates name an empty cell.
#[derive(Debug, Default)]
pub struct Human;

impl MoveProvider for Human {
    fn name(&self) -> &'static str {
        "User"
    }

    fn make_move(&mut self, board: &mut GameBoard, mark: Mark, console: &mut dyn Console) -> Result<usize> {
        let prompt = format!("Enter the coordinates for \"{mark}\" (x y): ");
        loop {
            let Some(input) = console.read_line(&prompt)? else {
                return Err(GameError::InputClosed);
            };
            match validate_input(board, &input) {
                Ok(index) => {
                    board.apply_move(index, mark)?;
                    return Ok(index);
                }
                Err(err) => {
                    debug!(%input, error = ?err, "rejected coordinates");
                    console.say(&err.to_string())?;
                }
            }
        }
    }
}
