use std::str::FromStr;

use tracing::{debug, error, info};

use crate::console::Console;
use crate::error::{CommandError, GameError, Result};
use crate::players::{PlayerKind, Roster};
use crate::ttt::{Game, GameResult};

pub const BANNER: &str = r#"
possible commands: "start <player1> <player2>", "exit"
possible players: "user", "easy", "medium", "hard"
coordinates are in form "x y" <x> - columns, <y> - rows, "1 1" - left bottom corner
"X" plays first
"#;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Start(PlayerKind, PlayerKind),
    Exit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let tokens = s.split_whitespace().collect::<Vec<_>>();
        let Some((&command, args)) = tokens.split_first() else {
            return Err(CommandError::Empty);
        };
        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(CommandError::WrongArity { command: command.to_string(), expected, got: args.len() })
            }
        };
        let player = |token: &str| {
            PlayerKind::from_str(token).map_err(|_| CommandError::UnknownPlayer(token.to_string()))
        };
        match command {
            "exit" => {
                arity(0)?;
                Ok(Command::Exit)
            }
            "start" => {
                arity(2)?;
                Ok(Command::Start(player(args[0])?, player(args[1])?))
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Reads commands and runs games until `exit` or the end of input.
pub struct Controller<C: Console> {
    game: Game,
    roster: Roster,
    console: C,
}

impl<C: Console> Controller<C> {
    pub fn new(roster: Roster, console: C) -> Self {
        Self { game: Game::new(), roster, console }
    }

    pub fn into_parts(self) -> (Roster, C) {
        (self.roster, self.console)
    }

    pub fn run(&mut self) -> Result<()> {
        self.console.say(BANNER)?;
        while let Some(line) = self.console.read_line("Input command: ")? {
            match line.parse::<Command>() {
                Ok(Command::Exit) => break,
                Ok(Command::Start(first, second)) => {
                    self.play(first, second)?;
                }
                Err(err) => {
                    debug!(%line, error = %err, "rejected command");
                    self.console.say("Bad parameters!")?;
                }
            }
        }
        Ok(())
    }

    /// Plays one game to the end, reports it and resets the board.
    pub fn play(&mut self, first: PlayerKind, second: PlayerKind) -> Result<GameResult> {
        info!(%first, %second, "starting game");
        self.game.set_players(first, second);
        if first == PlayerKind::User || second == PlayerKind::User {
            self.console.say(&self.game.board().to_string())?;
        }

        let result = loop {
            match self.game.evaluate() {
                GameResult::InProgress => {}
                GameResult::Invalid => {
                    let board = self.game.board().encode();
                    error!(%board, "both marks completed a line");
                    self.game.reset();
                    return Err(GameError::InvalidPosition { board });
                }
                finished => break finished,
            }

            let (player, _) = self.game.players().ok_or(GameError::NoPlayers)?;
            let (mark, _) = self.game.marks();
            let provider = self.roster.get_mut(player);
            provider.make_move(self.game.board_mut(), mark, &mut self.console)?;
            self.console.say(&self.game.board().to_string())?;
            self.game.swap_turn();
            self.console.say("")?;
        };

        match result {
            GameResult::WinX | GameResult::WinO => {
                // the winner moved last, so the turn has already passed on
                let (_, winner) = self.game.players().ok_or(GameError::NoPlayers)?;
                let (_, mark) = self.game.marks();
                self.console.say(&format!("{} wins with \"{mark}\"\n", self.roster.name(winner)))?;
            }
            _ => self.console.say("Draw\n")?,
        }
        info!(%result, board = %self.game.board().encode(), "game finished");
        self.game.reset();
        Ok(result)
    }
}
