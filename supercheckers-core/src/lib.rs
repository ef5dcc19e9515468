//! Supercheckers (Kings Court) rules engine.
//!
//! # Board Layout
//!
//! ```text
//!    0 1 2 3 4 5 6 7
//!  0|X|O|X|O|X|O|X|O|0
//!  1|O|X|O|X|O|X|O|X|1
//!  2|X|O# # # # #X|O|2
//!  3|O|X# # # # #O|X|3
//!  4|X|O# # # # #X|O|4
//!  5|O|X# # # # #O|X|5
//!  6|X|O|X|O|X|O|X|O|6
//!  7|O|X|O|X|O|X|O|X|7
//!    0 1 2 3 4 5 6 7
//! ```
//!
//! Row 0 is north. The court is the 4x4 block of rows/cols 2-5 (marked `#`).
//! Every cell outside the court starts occupied: `(row + col)` even holds
//! Team A (`X`), odd holds Team B (`O`).
//!
//! # Moves
//!
//! A move is a path of coordinates. Two points that are orthogonal neighbours
//! form a slide. Any other path must be a chain of orthogonal two-step jumps,
//! each over an occupied cell; jumped opponents are captured. A chain may not
//! continue once it has already emptied one side of the court.
//!
//! A team loses when it has no pieces left in the court.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub mod game;
pub mod player;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use game::{Game, GameError, Phase, Status};
pub use player::{Player, PlayerError, ScriptedPlayer};

/// Cells per board edge.
pub const BOARD_SIZE: usize = 8;
/// Smallest board index (north row, first column).
pub const BOARD_MIN: i32 = 0;
/// Largest board index (south row, last column).
pub const BOARD_MAX: i32 = 7;
/// Smallest court index.
pub const COURT_MIN: i32 = 2;
/// Largest court index.
pub const COURT_MAX: i32 = 5;
/// Cells in the court.
pub const COURT_CELLS: usize = 16;
/// Pieces on a freshly reset board.
pub const START_PIECES: usize = 48;

/// Occupant of a single cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Team {
    /// Moves first, starts on even `(row + col)` cells.
    A,
    /// Starts on odd `(row + col)` cells.
    B,
    /// Nobody.
    #[default]
    Empty,
}

impl Team {
    /// Display symbol: `X`, `O`, or a blank for an empty cell.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Team::A => 'X',
            Team::B => 'O',
            Team::Empty => ' ',
        }
    }

    /// Parse a display symbol. `.` and `-` are accepted for empty cells
    /// alongside the blank.
    pub fn from_symbol(symbol: char) -> Option<Team> {
        match symbol.to_ascii_uppercase() {
            'X' => Some(Team::A),
            'O' => Some(Team::B),
            ' ' | '.' | '-' => Some(Team::Empty),
            _ => None,
        }
    }

    /// Check whether a symbol names a recognised team.
    #[inline]
    pub fn is_valid_symbol(symbol: char) -> bool {
        Team::from_symbol(symbol).is_some()
    }

    /// True for the two playing teams, false for `Empty`.
    #[inline]
    pub const fn is_player(self) -> bool {
        !matches!(self, Team::Empty)
    }

    /// The other playing team. `Empty` has no opponent and maps to itself.
    #[inline]
    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
            Team::Empty => Team::Empty,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A (row, column) pair.
///
/// Signed so that lookups just off the board, such as `(-1, 3)`, are
/// representable and simply fail the board predicates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    /// Both indices lie in `[BOARD_MIN, BOARD_MAX]`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= BOARD_MIN
            && self.row <= BOARD_MAX
            && self.col >= BOARD_MIN
            && self.col <= BOARD_MAX
    }

    /// Both indices lie in `[COURT_MIN, COURT_MAX]`.
    #[inline]
    pub const fn is_in_court(self) -> bool {
        self.row >= COURT_MIN
            && self.row <= COURT_MAX
            && self.col >= COURT_MIN
            && self.col <= COURT_MAX
    }

    /// The entry lane this cell belongs to, if it sits one step outside the
    /// court and within the court's row/column span.
    pub fn court_lane(self) -> Option<Side> {
        Side::all().into_iter().find(|side| side.lane_contains(self))
    }

    /// Cell halfway to `other`, rounding toward zero.
    #[inline]
    pub const fn midpoint(self, other: Coord) -> Coord {
        Coord {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// Row-major iteration over all 64 board cells.
    pub fn all() -> impl Iterator<Item = Coord> {
        (BOARD_MIN..=BOARD_MAX)
            .flat_map(|row| (BOARD_MIN..=BOARD_MAX).map(move |col| Coord { row, col }))
    }

    /// Row-major iteration over the 16 court cells.
    pub fn court() -> impl Iterator<Item = Coord> {
        (COURT_MIN..=COURT_MAX)
            .flat_map(|row| (COURT_MIN..=COURT_MAX).map(move |col| Coord { row, col }))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Edge of the court, named by compass direction with row 0 to the north.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Lane on row 1.
    North,
    /// Lane on row 6.
    South,
    /// Lane on column 6.
    East,
    /// Lane on column 1.
    West,
}

impl Side {
    pub const fn all() -> [Side; 4] {
        [Side::North, Side::South, Side::East, Side::West]
    }

    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }

    /// Check if `coord` is one of the four lane cells on this side.
    pub const fn lane_contains(self, coord: Coord) -> bool {
        let row_span = coord.row >= COURT_MIN && coord.row <= COURT_MAX;
        let col_span = coord.col >= COURT_MIN && coord.col <= COURT_MAX;
        match self {
            Side::North => coord.row == COURT_MIN - 1 && col_span,
            Side::South => coord.row == COURT_MAX + 1 && col_span,
            Side::West => coord.col == COURT_MIN - 1 && row_span,
            Side::East => coord.col == COURT_MAX + 1 && row_span,
        }
    }
}

// ============================================================================
// MOVES
// ============================================================================

/// Errors raised when reading a [`Move`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("index {index} out of range for move of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot parse coordinate {0:?}")]
    Parse(String),
}

/// An ordered path of board coordinates: start, intermediate landings, end.
///
/// Nothing is validated here; the [`Board`] decides legality.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move {
    path: Vec<Coord>,
}

impl Move {
    /// Create an empty path.
    #[inline]
    pub fn new() -> Move {
        Move { path: Vec::new() }
    }

    /// Append a coordinate to the end of the path.
    #[inline]
    pub fn add(&mut self, row: i32, col: i32) {
        self.path.push(Coord { row, col });
    }

    /// Copy of this path with one more coordinate appended.
    pub fn extended(&self, row: i32, col: i32) -> Move {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(Coord { row, col });
        Move { path }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The `index`-th coordinate of the path.
    pub fn get(&self, index: usize) -> Result<Coord, MoveError> {
        self.path.get(index).copied().ok_or(MoveError::OutOfRange {
            index,
            len: self.path.len(),
        })
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.path
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.path.iter().copied()
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn hops(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl FromIterator<Coord> for Move {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Move {
        Move {
            path: iter.into_iter().collect(),
        }
    }
}

impl From<&[(i32, i32)]> for Move {
    fn from(pairs: &[(i32, i32)]) -> Move {
        pairs.iter().copied().map(Coord::from).collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "empty");
        }
        for (i, coord) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", coord)?;
        }
        Ok(())
    }
}

/// Accepts the display form `"(1,3) (2,3)"`, the bare form `"1,3 2,3"`,
/// and `"empty"`.
impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Move, MoveError> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("empty") {
            return Ok(Move::new());
        }
        let bare = s.replace(|c: char| c == '(' || c == ')', " ");
        let mut mov = Move::new();
        for token in bare.split_whitespace() {
            let (row, col) = token
                .split_once(',')
                .ok_or_else(|| MoveError::Parse(token.to_string()))?;
            let row = row.parse().map_err(|_| MoveError::Parse(token.to_string()))?;
            let col = col.parse().map_err(|_| MoveError::Parse(token.to_string()))?;
            mov.add(row, col);
        }
        Ok(mov)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Errors raised by the checked board accessors and the text codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("({row},{col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("expected 64 cells, found {0}")]
    BadLength(usize),
    #[error("unknown symbol {symbol:?} at cell {index}")]
    BadSymbol { index: usize, symbol: char },
}

/// Result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won(Team),
    /// The court is completely empty.
    Tie,
}

impl Outcome {
    #[inline]
    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::Won(team) => Some(team),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(team) => write!(f, "{} wins", team),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// The 8x8 grid, stored row-major with row 0 to the north.
///
/// `Board` is `Copy`: validation simulates jump chains on a private copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Team; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board in the starting layout.
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Create a board with every cell empty.
    pub fn empty() -> Board {
        Board {
            cells: [[Team::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Restore the starting layout.
    pub fn reset(&mut self) {
        for coord in Coord::all() {
            let team = if coord.is_in_court() {
                Team::Empty
            } else if (coord.row + coord.col) % 2 == 0 {
                Team::A
            } else {
                Team::B
            };
            self.insert(team, coord.row, coord.col);
        }
    }

    /// Set every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [[Team::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    #[inline]
    fn index(row: i32, col: i32) -> Result<(usize, usize), BoardError> {
        if Board::is_valid_spot(row, col) {
            Ok((row as usize, col as usize))
        } else {
            Err(BoardError::OutOfBounds { row, col })
        }
    }

    /// Occupant of a cell.
    pub fn try_get(&self, row: i32, col: i32) -> Result<Team, BoardError> {
        let (r, c) = Board::index(row, col)?;
        Ok(self.cells[r][c])
    }

    /// Overwrite a cell.
    pub fn try_insert(&mut self, team: Team, row: i32, col: i32) -> Result<(), BoardError> {
        let (r, c) = Board::index(row, col)?;
        self.cells[r][c] = team;
        Ok(())
    }

    /// Occupant of a cell. Does NOT validate.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is off the board. Check with
    /// [`Board::is_valid_spot`] or use [`Board::try_get`].
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Team {
        match self.try_get(row, col) {
            Ok(team) => team,
            Err(e) => panic!("{}", e),
        }
    }

    /// Overwrite a cell. Does NOT validate.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is off the board.
    #[inline]
    pub fn insert(&mut self, team: Team, row: i32, col: i32) {
        if let Err(e) = self.try_insert(team, row, col) {
            panic!("{}", e);
        }
    }

    #[inline]
    fn at(&self, coord: Coord) -> Team {
        self.get(coord.row, coord.col)
    }

    #[inline]
    fn set(&mut self, coord: Coord, team: Team) {
        self.insert(team, coord.row, coord.col);
    }

    // ========== Geometry ==========

    /// Both indices lie on the board (`0..=7`).
    #[inline]
    pub const fn is_valid_spot(row: i32, col: i32) -> bool {
        Coord::new(row, col).is_on_board()
    }

    /// Both indices lie in the court (`2..=5`).
    #[inline]
    pub const fn is_in_middle(row: i32, col: i32) -> bool {
        Coord::new(row, col).is_in_court()
    }

    /// The cell is one step outside the court, within its row/column span.
    #[inline]
    pub fn is_adjacent_to_middle(row: i32, col: i32) -> bool {
        Coord::new(row, col).court_lane().is_some()
    }

    /// Exactly `dist` cells along one axis and none along the other.
    #[inline]
    fn is_orthogonal(d_row: i32, d_col: i32, dist: i32) -> bool {
        (d_row.abs() == dist && d_col == 0) || (d_col.abs() == dist && d_row == 0)
    }

    // ========== Single-step Legality ==========

    /// A one-step orthogonal move from a cell holding `team` onto an empty
    /// cell.
    pub fn is_valid_slide(
        &self,
        team: Team,
        row_start: i32,
        col_start: i32,
        row_end: i32,
        col_end: i32,
    ) -> bool {
        if !team.is_player() {
            return false;
        }
        if !Board::is_valid_spot(row_start, col_start) || !Board::is_valid_spot(row_end, col_end) {
            return false;
        }
        if self.get(row_start, col_start) != team || self.get(row_end, col_end) != Team::Empty {
            return false;
        }
        Board::is_orthogonal(row_end - row_start, col_end - col_start, 1)
    }

    /// A two-step orthogonal move from a cell holding `team`, over an
    /// occupied cell of either team, onto an empty cell.
    pub fn is_valid_jump(
        &self,
        team: Team,
        row_start: i32,
        col_start: i32,
        row_end: i32,
        col_end: i32,
    ) -> bool {
        if !team.is_player() {
            return false;
        }
        if !Board::is_valid_spot(row_start, col_start) || !Board::is_valid_spot(row_end, col_end) {
            return false;
        }
        if self.get(row_start, col_start) != team || self.get(row_end, col_end) != Team::Empty {
            return false;
        }
        let mid = Coord::new(row_start, col_start).midpoint(Coord::new(row_end, col_end));
        if self.at(mid) == Team::Empty {
            return false;
        }
        Board::is_orthogonal(row_end - row_start, col_end - col_start, 2)
    }

    // ========== Move Validation ==========

    /// Check a whole move for `team`.
    ///
    /// A path whose first hop is a slide is legal only as that single slide.
    /// Otherwise every hop must be a jump on the board as it stands after the
    /// previous hops, and no hop but the last may leave the game decided.
    /// Whether a position is decided is read from the board alone, as in
    /// [`Board::is_game_over`].
    pub fn is_valid_move(&self, team: Team, mov: &Move) -> bool {
        self.is_valid_move_with(team, mov, true)
    }

    /// [`Board::is_valid_move`] for a caller that tracks the opening itself.
    ///
    /// With `opening` false a chain stops as soon as either team has no
    /// court pieces, even when the board has the reply's shape.
    pub fn is_valid_move_with(&self, team: Team, mov: &Move, opening: bool) -> bool {
        trace!(%team, %mov, opening, "validating");
        if !team.is_player() || mov.len() < 2 {
            return false;
        }
        let first = mov.coords()[0];
        let second = mov.coords()[1];
        if self.is_valid_slide(team, first.row, first.col, second.row, second.col) {
            return mov.len() == 2;
        }

        let mut sim = *self;
        let last_hop = mov.len() - 2;
        for (i, (from, to)) in mov.hops().enumerate() {
            if !sim.is_valid_jump(team, from.row, from.col, to.row, to.col) {
                debug!(%team, %mov, hop = i, "not a jump");
                return false;
            }
            sim.apply_hop(team, from, to, true);
            if i != last_hop && sim.is_decided(opening) {
                debug!(%team, %mov, hop = i, "jump chain continues after the game is decided");
                return false;
            }
        }
        true
    }

    /// Check whether `(row, col)` can be the next point of `current`.
    ///
    /// The first point is constrained by the entry rules: on the opening
    /// move it must be court-adjacent, and on the reply it must come from the
    /// lane opposite the one the opener left. Later points defer to
    /// [`Board::is_valid_move`].
    pub fn is_available_spot(&self, team: Team, current: &Move, row: i32, col: i32) -> bool {
        if !team.is_player() {
            return false;
        }
        if current.is_empty() {
            return self.is_valid_origin(team, Coord::new(row, col));
        }
        self.is_valid_move(team, &current.extended(row, col))
    }

    fn is_valid_origin(&self, team: Team, origin: Coord) -> bool {
        if !origin.is_on_board() || self.at(origin) != team {
            return false;
        }
        if self.is_first_move() {
            return origin.court_lane().is_some();
        }
        if self.is_second_move() {
            return match self.opening_side() {
                Some(side) => side.opposite().lane_contains(origin),
                None => false,
            };
        }
        true
    }

    // ========== Apply ==========

    /// Apply a move. Does NOT validate - call [`Board::is_valid_move`] first.
    ///
    /// A path whose first hop is a jump captures every jumped opponent.
    /// Moves with fewer than two points, or by `Empty`, are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the path leaves the board.
    pub fn do_move(&mut self, team: Team, mov: &Move) {
        if !team.is_player() || mov.len() < 2 {
            return;
        }
        let first = mov.coords()[0];
        let second = mov.coords()[1];
        let is_jump = self.is_valid_jump(team, first.row, first.col, second.row, second.col);
        for (from, to) in mov.hops() {
            self.apply_hop(team, from, to, is_jump);
        }
        debug!(%team, %mov, is_jump, "applied");
    }

    fn apply_hop(&mut self, team: Team, from: Coord, to: Coord, capture: bool) {
        if capture {
            let mid = from.midpoint(to);
            if self.at(mid) != team {
                self.set(mid, Team::Empty);
            }
        }
        self.set(from, Team::Empty);
        self.set(to, team);
    }

    // ========== Game State ==========

    /// Board equals the starting layout.
    #[inline]
    pub fn is_new_game(&self) -> bool {
        *self == Board::new()
    }

    /// No move has been played yet.
    #[inline]
    pub fn is_first_move(&self) -> bool {
        self.is_new_game()
    }

    /// Exactly one piece has entered the court and nothing was captured:
    /// the opening slide has been played and the reply is due.
    pub fn is_second_move(&self) -> bool {
        let mut inside = 0;
        let mut outside = 0;
        for coord in Coord::all() {
            if self.at(coord).is_player() {
                if coord.is_in_court() {
                    inside += 1;
                } else {
                    outside += 1;
                }
            }
        }
        inside == 1 && outside == START_PIECES - 1
    }

    /// Side of the court the opening move entered from.
    ///
    /// Only defined while the reply is due; read from the lone vacated cell
    /// outside the court.
    pub fn opening_side(&self) -> Option<Side> {
        if !self.is_second_move() {
            return None;
        }
        Coord::all()
            .find(|&coord| !coord.is_in_court() && self.at(coord) == Team::Empty)
            .and_then(Coord::court_lane)
    }

    /// One team has no pieces left in the court.
    ///
    /// Never true during the two opening plies, while the court is still
    /// being entered.
    pub fn is_game_over(&self) -> bool {
        if self.is_first_move() || self.is_second_move() {
            return false;
        }
        self.court_count(Team::A) == 0 || self.court_count(Team::B) == 0
    }

    fn is_decided(&self, opening: bool) -> bool {
        if opening {
            return self.is_game_over();
        }
        self.court_count(Team::A) == 0 || self.court_count(Team::B) == 0
    }

    /// Decide the game from the court.
    ///
    /// Returns `Some(Outcome::Tie)` for an empty court, the team still in
    /// the court when the other has left it, and `None` while both remain.
    pub fn get_winner(&self) -> Option<Outcome> {
        let a = self.court_count(Team::A);
        let b = self.court_count(Team::B);
        if a + b == 0 {
            Some(Outcome::Tie)
        } else if b == 0 {
            Some(Outcome::Won(Team::A))
        } else if a == 0 {
            Some(Outcome::Won(Team::B))
        } else {
            None
        }
    }

    // ========== Counting ==========

    /// Cells holding `team` anywhere on the board.
    pub fn count(&self, team: Team) -> usize {
        self.cells.iter().flatten().filter(|&&t| t == team).count()
    }

    /// Cells holding `team` inside the court.
    pub fn court_count(&self, team: Team) -> usize {
        Coord::court().filter(|&coord| self.at(coord) == team).count()
    }

    /// Pieces of both teams on the board.
    #[inline]
    pub fn piece_count(&self) -> usize {
        BOARD_SIZE * BOARD_SIZE - self.count(Team::Empty)
    }

    /// Row-major `(coord, occupant)` pairs.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Team)> + '_ {
        Coord::all().map(move |coord| (coord, self.at(coord)))
    }

    // ========== Text ==========

    /// The 64 cell symbols, row-major.
    pub fn cells_string(&self) -> String {
        self.cells.iter().flatten().map(|t| t.symbol()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.cells_string()).finish()
    }
}

/// Reads the [`Board::cells_string`] form. Line breaks are ignored so the
/// cells may be laid out one row per line.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Board, BoardError> {
        let symbols: Vec<char> = s.chars().filter(|&c| c != '\n' && c != '\r').collect();
        if symbols.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(BoardError::BadLength(symbols.len()));
        }
        let mut board = Board::empty();
        for (index, (&symbol, coord)) in symbols.iter().zip(Coord::all()).enumerate() {
            let team = Team::from_symbol(symbol).ok_or(BoardError::BadSymbol { index, symbol })?;
            board.set(coord, team);
        }
        Ok(board)
    }
}

/// Ruled text dump. Court cells are separated by `#`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULER: &str = "   0 1 2 3 4 5 6 7  ";
        writeln!(f, "{}", RULER)?;
        for row in BOARD_MIN..=BOARD_MAX {
            write!(f, " {}|", row)?;
            for col in BOARD_MIN..=BOARD_MAX {
                let sep = if (COURT_MIN..=COURT_MAX).contains(&row)
                    && (COURT_MIN - 1..=COURT_MAX).contains(&col)
                {
                    '#'
                } else {
                    '|'
                };
                write!(f, "{}{}", self.get(row, col), sep)?;
            }
            writeln!(f, "{} ", row)?;
        }
        write!(f, "{}", RULER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(i32, i32)]) -> Move {
        Move::from(points)
    }

    // ========== Team ==========

    #[test]
    fn test_team_symbols() {
        for team in [Team::A, Team::B, Team::Empty] {
            assert_eq!(Team::from_symbol(team.symbol()), Some(team));
        }
        assert_eq!(Team::from_symbol('x'), Some(Team::A));
        assert_eq!(Team::from_symbol('.'), Some(Team::Empty));
        assert_eq!(Team::from_symbol('Z'), None);
        assert!(Team::is_valid_symbol('O'));
        assert!(!Team::is_valid_symbol('#'));
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::A.opponent(), Team::B);
        assert_eq!(Team::B.opponent(), Team::A);
        assert_eq!(Team::Empty.opponent(), Team::Empty);
        assert!(Team::A.is_player());
        assert!(!Team::Empty.is_player());
    }

    // ========== Geometry ==========

    #[test]
    fn test_is_in_middle() {
        for row in -1..8 {
            for col in -1..8 {
                assert_eq!(
                    row > 1 && row < 6 && col > 1 && col < 6,
                    Board::is_in_middle(row, col),
                    "({},{})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn test_is_valid_spot_inclusive() {
        assert!(Board::is_valid_spot(0, 0));
        assert!(Board::is_valid_spot(7, 7));
        assert!(!Board::is_valid_spot(8, 0));
        assert!(!Board::is_valid_spot(0, 8));
        assert!(!Board::is_valid_spot(-1, 3));
    }

    #[test]
    fn test_adjacent_to_middle() {
        let lanes = Coord::all().filter(|c| Board::is_adjacent_to_middle(c.row, c.col)).count();
        assert_eq!(lanes, 16);

        assert!(Board::is_adjacent_to_middle(1, 2));
        assert!(Board::is_adjacent_to_middle(6, 5));
        assert!(Board::is_adjacent_to_middle(2, 6));
        assert!(Board::is_adjacent_to_middle(5, 1));
        assert!(!Board::is_adjacent_to_middle(1, 1));
        assert!(!Board::is_adjacent_to_middle(0, 3));
        assert!(!Board::is_adjacent_to_middle(3, 3));

        assert_eq!(Coord::new(1, 4).court_lane(), Some(Side::North));
        assert_eq!(Coord::new(6, 2).court_lane(), Some(Side::South));
        assert_eq!(Coord::new(3, 6).court_lane(), Some(Side::East));
        assert_eq!(Coord::new(4, 1).court_lane(), Some(Side::West));
        assert_eq!(Side::West.opposite(), Side::East);
    }

    // ========== Move ==========

    #[test]
    fn test_move_add_and_len() {
        let mut mov = Move::new();
        assert_eq!(mov.len(), 0);
        assert!(mov.is_empty());
        mov.add(0, 0);
        assert_eq!(mov.len(), 1);
        mov.add(0, 0);
        assert_eq!(mov.len(), 2);
    }

    #[test]
    fn test_move_get() {
        let mut mov = Move::new();
        mov.add(2, 1);
        mov.add(4, 3);
        assert_eq!(mov.get(0), Ok(Coord::new(2, 1)));
        assert_eq!(mov.get(1).map(|c| c.col), Ok(3));
        assert_eq!(mov.get(2), Err(MoveError::OutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_move_equality_is_order_sensitive() {
        assert_eq!(Move::new(), Move::new());
        assert_eq!(path(&[(1, 2), (3, 4)]), path(&[(1, 2), (3, 4)]));
        assert_ne!(path(&[(1, 2), (3, 4)]), path(&[(3, 4), (1, 2)]));
        assert_ne!(path(&[(1, 2)]), path(&[(1, 2), (1, 2)]));
    }

    #[test]
    fn test_move_display() {
        let mut mov = Move::new();
        assert_eq!(mov.to_string(), "empty");
        mov.add(1, 2);
        assert_eq!(mov.to_string(), "(1,2)");
        mov.add(3, 4);
        assert_eq!(mov.to_string(), "(1,2) (3,4)");
    }

    #[test]
    fn test_move_extended_leaves_original() {
        let base = path(&[(1, 3)]);
        let longer = base.extended(2, 3);
        assert_eq!(base.len(), 1);
        assert_eq!(longer, path(&[(1, 3), (2, 3)]));
    }

    #[test]
    fn test_move_parse() {
        assert_eq!("(1,3) (2,3)".parse::<Move>(), Ok(path(&[(1, 3), (2, 3)])));
        assert_eq!(" 1,2 3,2  5,2 ".parse::<Move>(), Ok(path(&[(1, 2), (3, 2), (5, 2)])));
        assert_eq!("empty".parse::<Move>(), Ok(Move::new()));
        assert_eq!("1,2 x,3".parse::<Move>(), Err(MoveError::Parse("x,3".to_string())));
        assert_eq!("12".parse::<Move>(), Err(MoveError::Parse("12".to_string())));

        let mov = path(&[(0, 7), (2, 7)]);
        assert_eq!(mov.to_string().parse::<Move>(), Ok(mov));
    }

    #[test]
    fn test_move_hops() {
        let mov = path(&[(1, 2), (3, 2), (3, 4)]);
        let hops: Vec<_> = mov.hops().collect();
        assert_eq!(
            hops,
            vec![
                (Coord::new(1, 2), Coord::new(3, 2)),
                (Coord::new(3, 2), Coord::new(3, 4)),
            ]
        );
        assert_eq!(path(&[(1, 2)]).hops().count(), 0);
    }

    // ========== Layout ==========

    #[test]
    fn test_reset_layout() {
        let board = Board::new();
        for row in 0..8 {
            for col in 0..8 {
                let expected = if (2..=5).contains(&row) && (2..=5).contains(&col) {
                    Team::Empty
                } else if (row + col) % 2 == 0 {
                    Team::A
                } else {
                    Team::B
                };
                assert_eq!(board.get(row, col), expected, "({},{})", row, col);
            }
        }
        assert_eq!(board.piece_count(), START_PIECES);
        assert_eq!(board.count(Team::A), 24);
        assert_eq!(board.count(Team::B), 24);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        board.clear();
        assert!(board.cells().all(|(_, team)| team == Team::Empty));
        assert_eq!(board, Board::empty());

        board.reset();
        assert!(board.is_new_game());
    }

    #[test]
    fn test_is_new_game() {
        let mut board = Board::new();
        assert!(board.is_new_game());
        board.insert(Team::B, 4, 4);
        assert!(!board.is_new_game());
    }

    #[test]
    fn test_checked_accessors() {
        let mut board = Board::empty();
        assert_eq!(board.try_get(8, 0), Err(BoardError::OutOfBounds { row: 8, col: 0 }));
        assert_eq!(
            board.try_insert(Team::A, 0, -1),
            Err(BoardError::OutOfBounds { row: 0, col: -1 })
        );
        assert_eq!(board.try_insert(Team::A, 7, 7), Ok(()));
        assert_eq!(board.try_get(7, 7), Ok(Team::A));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_get_off_board_panics() {
        Board::new().get(0, 8);
    }

    #[test]
    fn test_copy_is_independent() {
        let board = Board::new();
        let mut copy = board;
        copy.insert(Team::A, 3, 3);
        assert_eq!(board.get(3, 3), Team::Empty);
        assert_eq!(copy.get(3, 3), Team::A);
        assert_ne!(board, copy);
    }

    // ========== Slides ==========

    #[test]
    fn test_slide_neighbours() {
        let mut board = Board::empty();
        board.insert(Team::A, 2, 2);
        let (row, col) = (2, 2);

        for d_row in -2i32..=2 {
            for d_col in -2i32..=2 {
                let (r, c) = (row + d_row, col + d_col);
                let orthogonal = d_row.abs() + d_col.abs() == 1;
                assert_eq!(
                    board.is_valid_slide(Team::A, row, col, r, c),
                    orthogonal,
                    "A to ({},{})",
                    r,
                    c
                );
                assert!(!board.is_valid_slide(Team::B, row, col, r, c), "B to ({},{})", r, c);
                assert!(
                    !board.is_valid_slide(Team::Empty, row, col, r, c),
                    "Empty to ({},{})",
                    r,
                    c
                );
            }
        }
    }

    #[test]
    fn test_slide_needs_empty_destination() {
        let board = Board::new();
        assert!(board.is_valid_slide(Team::A, 1, 3, 2, 3));
        assert!(!board.is_valid_slide(Team::A, 1, 3, 0, 3));
        assert!(!board.is_valid_slide(Team::A, 1, 3, 1, 4));
        assert!(!board.is_valid_slide(Team::B, 1, 3, 2, 3));
    }

    #[test]
    fn test_slide_off_board() {
        let mut board = Board::empty();
        board.insert(Team::A, 0, 0);
        assert!(!board.is_valid_slide(Team::A, 0, 0, -1, 0));
        assert!(!board.is_valid_slide(Team::A, 0, 0, 0, -1));
        assert!(!board.is_valid_slide(Team::A, -1, 0, 0, 0));
        assert!(board.is_valid_slide(Team::A, 0, 0, 0, 1));
    }

    // ========== Jumps ==========

    #[test]
    fn test_jump_captures_opponent() {
        let mut board = Board::empty();
        board.insert(Team::A, 2, 2);
        board.insert(Team::B, 3, 2);
        assert!(board.is_valid_jump(Team::A, 2, 2, 4, 2));

        board.do_move(Team::A, &path(&[(2, 2), (4, 2)]));
        assert_eq!(board.get(2, 2), Team::Empty);
        assert_eq!(board.get(3, 2), Team::Empty);
        assert_eq!(board.get(4, 2), Team::A);
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_jump_over_own_piece_keeps_it() {
        let mut board = Board::empty();
        board.insert(Team::A, 2, 2);
        board.insert(Team::A, 2, 3);
        assert!(board.is_valid_jump(Team::A, 2, 2, 2, 4));

        board.do_move(Team::A, &path(&[(2, 2), (2, 4)]));
        assert_eq!(board.get(2, 3), Team::A);
        assert_eq!(board.get(2, 4), Team::A);
        assert_eq!(board.piece_count(), 2);
    }

    #[test]
    fn test_jump_needs_occupied_midpoint() {
        let mut board = Board::empty();
        board.insert(Team::A, 2, 2);
        assert!(!board.is_valid_jump(Team::A, 2, 2, 4, 2));
    }

    #[test]
    fn test_jump_geometry() {
        let mut board = Board::empty();
        board.insert(Team::A, 2, 2);
        board.insert(Team::B, 3, 3);
        board.insert(Team::B, 3, 2);
        board.insert(Team::B, 4, 2);

        // Diagonal over an occupied cell.
        assert!(!board.is_valid_jump(Team::A, 2, 2, 4, 4));
        // Three steps with an occupied integer midpoint.
        assert!(!board.is_valid_jump(Team::A, 2, 2, 5, 2));
        // Destination occupied.
        assert!(!board.is_valid_jump(Team::A, 2, 2, 4, 2));
        // Wrong team at origin.
        board.insert(Team::Empty, 4, 2);
        assert!(!board.is_valid_jump(Team::B, 2, 2, 4, 2));
        assert!(!board.is_valid_jump(Team::Empty, 2, 2, 4, 2));
        assert!(board.is_valid_jump(Team::A, 2, 2, 4, 2));
        // Off the board.
        board.insert(Team::A, 0, 0);
        board.insert(Team::B, 0, 1);
        assert!(!board.is_valid_jump(Team::A, 0, 1, 0, -1));
    }

    // ========== Move Validation ==========

    #[test]
    fn test_valid_move_slide_is_exactly_two_points() {
        let board = Board::new();
        let slide = path(&[(1, 3), (2, 3)]);
        assert!(board.is_valid_move(Team::A, &slide));
        assert!(!board.is_valid_move(Team::A, &slide.extended(3, 3)));
        assert!(!board.is_valid_move(Team::A, &slide.extended(2, 4)));
    }

    #[test]
    fn test_valid_move_rejects_short_paths() {
        let board = Board::new();
        assert!(!board.is_valid_move(Team::A, &Move::new()));
        assert!(!board.is_valid_move(Team::A, &path(&[(1, 3)])));
        assert!(!board.is_valid_move(Team::Empty, &path(&[(1, 3), (2, 3)])));
    }

    #[test]
    fn test_slide_then_non_adjacent_step() {
        let mut board = Board::new();
        let slide = path(&[(1, 3), (2, 3)]);
        assert!(board.is_valid_move(Team::A, &slide));
        board.do_move(Team::A, &slide);
        assert_eq!(board.get(1, 3), Team::Empty);
        assert_eq!(board.get(2, 3), Team::A);

        // Two cells away over an empty court cell: neither slide nor jump.
        assert!(!board.is_valid_move(Team::A, &path(&[(2, 3), (2, 5)])));
    }

    /// A at (1,2) can jump three B pieces on a staircase; B keeps (5,5).
    fn staircase() -> Board {
        let mut board = Board::empty();
        board.insert(Team::A, 1, 2);
        board.insert(Team::B, 2, 2);
        board.insert(Team::B, 3, 3);
        board.insert(Team::B, 4, 4);
        board.insert(Team::B, 5, 5);
        board
    }

    #[test]
    fn test_jump_chain() {
        let mut board = staircase();
        let chain = path(&[(1, 2), (3, 2), (3, 4), (5, 4)]);
        assert!(board.is_valid_move(Team::A, &chain));
        assert_eq!(board, staircase(), "validation must not touch the board");

        let before = board.piece_count();
        board.do_move(Team::A, &chain);
        for (row, col) in [(1, 2), (3, 2), (3, 4), (2, 2), (3, 3), (4, 4)] {
            assert_eq!(board.get(row, col), Team::Empty, "({},{})", row, col);
        }
        assert_eq!(board.get(5, 4), Team::A);
        assert_eq!(board.get(5, 5), Team::B);
        assert_eq!(board.piece_count(), before - 3);
        assert!(!board.is_game_over());
        assert_eq!(board.get_winner(), None);
    }

    #[test]
    fn test_jump_chain_broken_hop() {
        let board = staircase();
        // Second hop jumps the empty (4,2).
        assert!(!board.is_valid_move(Team::A, &path(&[(1, 2), (3, 2), (5, 2)])));
        // A slide can't be followed by a jump.
        assert!(!board.is_valid_move(Team::B, &path(&[(5, 5), (5, 6), (5, 4)])));
    }

    #[test]
    fn test_jump_chain_stops_when_game_decided() {
        let mut board = Board::empty();
        board.insert(Team::A, 1, 2);
        board.insert(Team::B, 2, 2);
        board.insert(Team::A, 3, 3);

        // The first hop removes B's last court piece.
        assert!(board.is_valid_move(Team::A, &path(&[(1, 2), (3, 2)])));
        assert!(!board.is_valid_move(Team::A, &path(&[(1, 2), (3, 2), (3, 4)])));
    }

    /// 48 pieces with A at (2,3) and B at (4,4) in the court, and (0,1)
    /// and (0,3) vacated.
    fn own_piece_ladder() -> Board {
        let mut board = Board::new();
        board.insert(Team::Empty, 0, 1);
        board.insert(Team::Empty, 0, 3);
        board.insert(Team::A, 2, 3);
        board.insert(Team::B, 4, 4);
        board
    }

    #[test]
    fn test_jump_chain_stops_when_court_left_without_capture() {
        let board = own_piece_ladder();
        let chain = path(&[(2, 3), (0, 3), (0, 1)]);

        let mut sim = board;
        sim.do_move(Team::A, &path(&[(2, 3), (0, 3)]));
        assert_eq!(sim.court_count(Team::A), 0);
        assert!(sim.is_second_move());

        // Read from the board alone the first hop looks like the reply.
        assert!(board.is_valid_move(Team::A, &chain));
        assert!(board.is_valid_move_with(Team::A, &chain, true));
        assert!(!board.is_valid_move_with(Team::A, &chain, false));
        assert!(board.is_valid_move_with(Team::A, &path(&[(2, 3), (0, 3)]), false));
    }

    // ========== Apply ==========

    #[test]
    fn test_do_move_slide() {
        let mut board = Board::new();
        board.do_move(Team::B, &path(&[(1, 2), (2, 2)]));
        assert_eq!(board.get(1, 2), Team::Empty);
        assert_eq!(board.get(2, 2), Team::B);
        assert_eq!(board.piece_count(), START_PIECES);
    }

    #[test]
    fn test_do_move_ignores_degenerate_input() {
        let mut board = Board::new();
        board.do_move(Team::Empty, &path(&[(1, 3), (2, 3)]));
        board.do_move(Team::A, &path(&[(1, 3)]));
        assert!(board.is_new_game());
    }

    // ========== Game State ==========

    #[test]
    fn test_game_over_and_winner() {
        let mut board = Board::empty();
        assert!(board.is_game_over());
        assert_eq!(board.get_winner(), Some(Outcome::Tie));

        board.insert(Team::A, 3, 3);
        assert!(board.is_game_over());
        assert_eq!(board.get_winner(), Some(Outcome::Won(Team::A)));

        board.insert(Team::B, 4, 4);
        assert!(!board.is_game_over());
        assert_eq!(board.get_winner(), None);

        board.insert(Team::Empty, 3, 3);
        assert!(board.is_game_over());
        assert_eq!(board.get_winner(), Some(Outcome::Won(Team::B)));
        assert_eq!(Outcome::Won(Team::B).winner(), Some(Team::B));
        assert_eq!(Outcome::Tie.winner(), None);
    }

    #[test]
    fn test_opening_plies_are_not_game_over() {
        let mut board = Board::new();
        assert!(board.is_first_move());
        assert!(!board.is_game_over());
        assert_eq!(board.opening_side(), None);

        board.do_move(Team::A, &path(&[(1, 3), (2, 3)]));
        assert!(!board.is_first_move());
        assert!(board.is_second_move());
        assert!(!board.is_game_over());
        assert_eq!(board.opening_side(), Some(Side::North));

        board.do_move(Team::B, &path(&[(6, 3), (5, 3)]));
        assert!(!board.is_second_move());
        assert!(!board.is_game_over());
        assert_eq!(board.opening_side(), None);
    }

    #[test]
    fn test_available_spot_first_move() {
        let board = Board::new();
        let start = Move::new();
        assert!(board.is_available_spot(Team::A, &start, 1, 3));
        assert!(!board.is_available_spot(Team::A, &start, 0, 0));
        assert!(!board.is_available_spot(Team::A, &start, 1, 2));
        assert!(board.is_available_spot(Team::B, &start, 1, 2));
        assert!(!board.is_available_spot(Team::A, &start, -1, 0));
        assert!(!board.is_available_spot(Team::Empty, &start, 3, 3));

        let picked = path(&[(1, 3)]);
        assert!(board.is_available_spot(Team::A, &picked, 2, 3));
        assert!(!board.is_available_spot(Team::A, &picked, 0, 3));
        assert!(!board.is_available_spot(Team::A, &picked, 3, 3));
    }

    #[test]
    fn test_available_spot_reply_from_opposite_lane() {
        let mut board = Board::new();
        board.do_move(Team::A, &path(&[(1, 3), (2, 3)]));
        let start = Move::new();

        // South lane.
        assert!(board.is_available_spot(Team::B, &start, 6, 3));
        assert!(board.is_available_spot(Team::B, &start, 6, 5));
        // North lane is where A came from.
        assert!(!board.is_available_spot(Team::B, &start, 1, 2));
        // West lane.
        assert!(!board.is_available_spot(Team::B, &start, 2, 1));
        // Holds A.
        assert!(!board.is_available_spot(Team::B, &start, 6, 2));

        board.do_move(Team::B, &path(&[(6, 3), (5, 3)]));
        assert!(board.is_available_spot(Team::A, &start, 0, 0));
    }

    #[test]
    fn test_available_spot_reply_after_west_entry() {
        let mut board = Board::new();
        board.do_move(Team::A, &path(&[(3, 1), (3, 2)]));
        assert_eq!(board.opening_side(), Some(Side::West));

        let start = Move::new();
        assert!(board.is_available_spot(Team::B, &start, 3, 6));
        assert!(board.is_available_spot(Team::B, &start, 5, 6));
        assert!(!board.is_available_spot(Team::B, &start, 2, 1));
        assert!(!board.is_available_spot(Team::B, &start, 1, 2));
    }

    #[test]
    fn test_counts() {
        let mut board = Board::new();
        assert_eq!(board.court_count(Team::A), 0);
        assert_eq!(board.court_count(Team::Empty), COURT_CELLS);
        board.do_move(Team::A, &path(&[(1, 3), (2, 3)]));
        assert_eq!(board.court_count(Team::A), 1);
        assert_eq!(board.count(Team::A), 24);
        assert_eq!(board.count(Team::Empty), 16);
    }

    // ========== Text ==========

    #[test]
    fn test_cells_string_round_trip() {
        let mut board = Board::new();
        board.do_move(Team::A, &path(&[(1, 3), (2, 3)]));
        let text = board.cells_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("XOXOXOXOOXO OXOX"));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("XO".parse::<Board>(), Err(BoardError::BadLength(2)));
        let mut text = Board::new().cells_string();
        text.replace_range(5..6, "Q");
        assert_eq!(text.parse::<Board>(), Err(BoardError::BadSymbol { index: 5, symbol: 'Q' }));
    }

    #[test]
    fn test_parse_accepts_row_lines() {
        let text = "\
X.X.X.X.
........
........
........
........
........
........
.......O";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.count(Team::A), 4);
        assert_eq!(board.get(7, 7), Team::B);
        assert_eq!(board.get(0, 1), Team::Empty);
    }

    #[test]
    fn test_display_rulers() {
        let dump = Board::new().to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "   0 1 2 3 4 5 6 7  ");
        assert_eq!(lines[1], " 0|X|O|X|O|X|O|X|O|0 ");
        assert_eq!(lines[3], " 2|X|O# # # # #X|O|2 ");
        assert_eq!(lines[8], " 7|O|X|O|X|O|X|O|X|7 ");
        assert_eq!(lines[9], lines[0]);
    }
}
