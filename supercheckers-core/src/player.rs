//! Move sources.
//!
//! A [`Player`] is asked for a move each turn. The referee owns the board and
//! lends it to the player for the duration of the request.

use std::collections::VecDeque;
use std::io;

use thiserror::Error;

use crate::{Board, Move, Team};

/// Why a player could not produce a move.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to read move: {0}")]
    Io(#[from] io::Error),
    /// The player left the game.
    #[error("player quit")]
    Quit,
}

/// Something that chooses moves for one team.
pub trait Player {
    /// The team this player moves.
    fn team(&self) -> Team;

    /// Produce the next move for the current board.
    fn get_move(&mut self, board: &Board) -> Result<Move, PlayerError>;

    /// Called when the referee refuses a move; the player is asked again.
    fn on_rejected(&mut self, _mov: &Move) {}
}

/// Plays a fixed sequence of moves, then quits.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    team: Team,
    moves: VecDeque<Move>,
    rejected: Vec<Move>,
}

impl ScriptedPlayer {
    pub fn new(team: Team, moves: impl IntoIterator<Item = Move>) -> ScriptedPlayer {
        ScriptedPlayer {
            team,
            moves: moves.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    /// Moves the referee refused, in order.
    pub fn rejected(&self) -> &[Move] {
        &self.rejected
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Player for ScriptedPlayer {
    fn team(&self) -> Team {
        self.team
    }

    fn get_move(&mut self, _board: &Board) -> Result<Move, PlayerError> {
        self.moves.pop_front().ok_or(PlayerError::Quit)
    }

    fn on_rejected(&mut self, mov: &Move) {
        self.rejected.push(mov.clone());
    }
}
