//! Turn referee.
//!
//! [`Game`] owns the board, tracks whose turn it is, and only applies moves
//! that pass both the entry rules and [`Board::is_valid_move`].
//!
//! The referee counts the opening plies itself instead of inferring them from
//! the board: a mid-game position with one piece in the court and none
//! captured looks exactly like the position before the reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{Board, Coord, Move, Outcome, Player, PlayerError, Side, Team};

/// Whether the game continues after a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    Finished(Outcome),
}

/// Which entry rule applies to the next move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// No move yet: the opener starts from a court-adjacent cell.
    Opening,
    /// The reply starts from the lane opposite the opener's.
    Reply(Side),
    /// Any piece of the team to move may start.
    Open,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTeam { expected: Team, got: Team },
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// A single game from the starting layout. Team A moves first.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Team,
    phase: Phase,
    plies: u32,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Team::A,
            phase: Phase::Opening,
            plies: 0,
        }
    }

    /// Resume from an arbitrary position with `turn` to move. The opening
    /// is taken as already played.
    pub fn from_board(board: Board, turn: Team) -> Game {
        Game {
            board,
            turn,
            phase: Phase::Open,
            plies: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Team to move.
    #[inline]
    pub fn turn(&self) -> Team {
        self.turn
    }

    /// Moves applied so far.
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The game ends once the opening is over and one team has left the
    /// court.
    pub fn status(&self) -> Status {
        match self.board.get_winner() {
            Some(outcome) if self.phase == Phase::Open => Status::Finished(outcome),
            _ => Status::InProgress,
        }
    }

    fn in_opening(&self) -> bool {
        self.phase != Phase::Open
    }

    fn is_valid_origin(&self, origin: Coord) -> bool {
        if !origin.is_on_board() || self.board.get(origin.row, origin.col) != self.turn {
            return false;
        }
        match self.phase {
            Phase::Opening => origin.court_lane().is_some(),
            Phase::Reply(side) => side.opposite().lane_contains(origin),
            Phase::Open => true,
        }
    }

    /// Whether `(row, col)` may extend `current` for the team to move.
    pub fn is_available_spot(&self, current: &Move, row: i32, col: i32) -> bool {
        if current.is_empty() {
            return self.is_valid_origin(Coord::new(row, col));
        }
        self.board.is_valid_move_with(self.turn, &current.extended(row, col), self.in_opening())
    }

    /// Whether the team to move may play `mov`.
    pub fn is_legal(&self, mov: &Move) -> bool {
        match mov.start() {
            Some(start) => {
                self.is_valid_origin(start)
                    && self.board.is_valid_move_with(self.turn, mov, self.in_opening())
            }
            None => false,
        }
    }

    /// Play `mov` for the team to move and pass the turn.
    pub fn submit(&mut self, mov: Move) -> Result<Status, GameError> {
        if let Status::Finished(_) = self.status() {
            return Err(GameError::GameOver);
        }
        if !self.is_legal(&mov) {
            warn!(team = %self.turn, %mov, "rejected move");
            return Err(GameError::IllegalMove(mov));
        }

        self.board.do_move(self.turn, &mov);
        self.plies += 1;
        info!(ply = self.plies, team = %self.turn, %mov, "move played");
        self.turn = self.turn.opponent();
        self.phase = match self.phase {
            Phase::Opening => mov
                .start()
                .and_then(Coord::court_lane)
                .map_or(Phase::Open, Phase::Reply),
            Phase::Reply(_) | Phase::Open => Phase::Open,
        };

        let status = self.status();
        if let Status::Finished(outcome) = status {
            info!(plies = self.plies, %outcome, "game over");
        }
        Ok(status)
    }

    /// Ask `player` for moves until one is accepted.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> Result<Status, GameError> {
        if let Status::Finished(_) = self.status() {
            return Err(GameError::GameOver);
        }
        if player.team() != self.turn {
            return Err(GameError::WrongTeam {
                expected: self.turn,
                got: player.team(),
            });
        }
        loop {
            let mov = player.get_move(&self.board)?;
            match self.submit(mov) {
                Err(GameError::IllegalMove(mov)) => player.on_rejected(&mov),
                result => return result,
            }
        }
    }

    /// Alternate turns between the two players until the game ends.
    pub fn play(&mut self, a: &mut dyn Player, b: &mut dyn Player) -> Result<Outcome, GameError> {
        loop {
            if let Status::Finished(outcome) = self.status() {
                return Ok(outcome);
            }
            let player: &mut dyn Player = if a.team() == self.turn { &mut *a } else { &mut *b };
            self.play_turn(player)?;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
