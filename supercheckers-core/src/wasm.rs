//! WASM bindings for supercheckers-core
//!
//! Provides a JavaScript-friendly API around the [`Game`] referee.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{Coord, Game, Move, Outcome, Status, Team};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game from the opening layout
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// 64 cells row-major: 0 = empty, 1 = X, 2 = O
    pub fn cells(&self) -> Vec<u8> {
        self.inner.board().cells().map(|(_, team)| team_code(team)).collect()
    }

    /// Team to move (1 or 2)
    pub fn turn(&self) -> u8 {
        team_code(self.inner.turn())
    }

    /// Whether (row, col) can extend the partial path.
    /// `path` is flat [row, col, row, col, ...]
    #[wasm_bindgen(js_name = isAvailableSpot)]
    pub fn is_available_spot(&self, path: Vec<i32>, row: i32, col: i32) -> bool {
        self.inner.is_available_spot(&path_to_move(&path), row, col)
    }

    /// Submit a complete path. Returns true if the move was played.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, path: Vec<i32>) -> bool {
        self.inner.submit(path_to_move(&path)).is_ok()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        matches!(self.inner.status(), Status::Finished(_))
    }

    /// 0 = ongoing, 1 = X wins, 2 = O wins, 3 = tie
    pub fn winner(&self) -> u8 {
        match self.inner.status() {
            Status::InProgress => 0,
            Status::Finished(Outcome::Won(team)) => team_code(team),
            Status::Finished(Outcome::Tie) => 3,
        }
    }

    /// Snapshot as a plain JS object
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = WasmState {
            cells: self.cells(),
            turn: self.turn(),
            plies: self.inner.plies(),
            status: self.inner.status(),
        };
        serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Ruled text dump of the board
    pub fn board(&self) -> String {
        self.inner.board().to_string()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable game snapshot for JavaScript
#[derive(Serialize)]
struct WasmState {
    cells: Vec<u8>,
    turn: u8,
    plies: u32,
    status: Status,
}

fn team_code(team: Team) -> u8 {
    match team {
        Team::Empty => 0,
        Team::A => 1,
        Team::B => 2,
    }
}

/// Pairs up a flat coordinate list; a trailing odd value is dropped.
fn path_to_move(path: &[i32]) -> Move {
    path.chunks_exact(2).map(|pair| Coord::new(pair[0], pair[1])).collect()
}
