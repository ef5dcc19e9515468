//! Terminal player.
//!
//! Reads one command per line from stdin. A move is a list of `row,col`
//! points, optionally parenthesised: `1,3 2,3` or `(1,2) (3,2) (3,4)`.

use std::io::{self, Write};

use supercheckers_core::{Board, Coord, Move, MoveError, Player, PlayerError, Team};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  r,c r,c ...    play a move from the first point through the rest
  hint [r,c ...] list the spots that may extend a partial move
  help           show this text
  quit           leave the game";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Hint(Move),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, MoveError> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "?" | "h" | "help" => return Ok(Command::Help),
        _ => {}
    }
    if let Some(rest) = line.strip_prefix("hint") {
        return rest.parse().map(Command::Hint);
    }
    let mov: Move = line.parse()?;
    if mov.len() < 2 {
        return Err(MoveError::Parse(line));
    }
    Ok(Command::Play(mov))
}

/// Board text for the prompt. Without rulers each row is eight symbols with
/// `.` for an empty cell.
pub fn render(board: &Board, rulers: bool) -> String {
    if rulers {
        return board.to_string();
    }
    let mut out = String::with_capacity(72);
    for (coord, team) in board.cells() {
        out.push(if team == Team::Empty { '.' } else { team.symbol() });
        if coord.col == 7 {
            out.push('\n');
        }
    }
    out.pop();
    out
}

/// Spots that may extend `partial`, row-major.
pub fn hints(board: &Board, team: Team, partial: &Move) -> Vec<Coord> {
    Coord::all()
        .filter(|c| board.is_available_spot(team, partial, c.row, c.col))
        .collect()
}

pub struct ConsolePlayer {
    team: Team,
    rulers: bool,
}

impl ConsolePlayer {
    pub fn new(team: Team, rulers: bool) -> ConsolePlayer {
        ConsolePlayer { team, rulers }
    }

    fn read_line(&self) -> Result<String, PlayerError> {
        print!("{} > ", self.team);
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(PlayerError::Quit);
        }
        Ok(line)
    }
}

impl Player for ConsolePlayer {
    fn team(&self) -> Team {
        self.team
    }

    fn get_move(&mut self, board: &Board) -> Result<Move, PlayerError> {
        println!();
        println!("{}", render(board, self.rulers));
        loop {
            let line = self.read_line()?;
            match parse_command(&line) {
                Ok(Command::Play(mov)) => return Ok(mov),
                Ok(Command::Quit) => return Err(PlayerError::Quit),
                Ok(Command::Help) => println!("{}", HELP),
                Ok(Command::Hint(partial)) => {
                    let spots: Vec<String> = hints(board, self.team, &partial)
                        .iter()
                        .map(Coord::to_string)
                        .collect();
                    if spots.is_empty() {
                        println!("No spot extends {}", partial);
                    } else {
                        println!("{}", spots.join(" "));
                    }
                }
                Err(e) => {
                    debug!(input = line.trim(), error = %e, "unparsed command");
                    println!("Could not read that: {}. Type 'help' for commands.", e);
                }
            }
        }
    }

    fn on_rejected(&mut self, mov: &Move) {
        println!("Illegal move: {}", mov);
    }
}
