//! WASM bindings for bishops-core
//!
//! One `WasmExplorer` backs a browser page. Solving is driven from
//! `requestAnimationFrame`: call `WasmSearch.step()` once per frame and
//! draw the returned layer until it reports `finished`.

use std::sync::atomic::Ordering;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    config, notation, Coord, EngineError, Explorer, GameSettings, LayerSnapshot, Move, NodeId,
    PieceFilter, Search, SearchStep, SolveOutcome,
};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn js_err(err: EngineError) -> JsError {
    JsError::new(&err.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn settings(rows: u8, cols: u8, pieces: &str) -> Result<GameSettings, JsError> {
    let pieces: PieceFilter = pieces.parse().map_err(js_err)?;
    Ok(GameSettings::new(rows, cols, pieces))
}

/// WASM-friendly wrapper around Explorer
#[wasm_bindgen]
pub struct WasmExplorer {
    inner: Explorer,
}

#[wasm_bindgen]
impl WasmExplorer {
    /// Start a puzzle. `pieces` is "all", "white" or "black".
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u8, cols: u8, pieces: &str) -> Result<WasmExplorer, JsError> {
        let inner = Explorer::new(settings(rows, cols, pieces)?).map_err(js_err)?;
        Ok(WasmExplorer { inner })
    }

    pub fn reset(&mut self, rows: u8, cols: u8, pieces: &str) -> Result<(), JsError> {
        self.inner
            .reset(settings(rows, cols, pieces)?)
            .map_err(js_err)
    }

    pub fn root(&self) -> u32 {
        self.inner.root().0
    }

    /// Number of committed states
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Node id of a committed hash, or undefined
    pub fn lookup(&self, hash: &str) -> Option<u32> {
        self.inner.lookup(hash).map(|id| id.0)
    }

    /// `{ id, hash, distance, solved_pieces, total_pieces, options, ... }`
    pub fn summary(&self, id: u32) -> Result<JsValue, JsError> {
        to_js(&self.inner.summary(NodeId(id)).map_err(js_err)?)
    }

    pub fn summaries(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.summaries())
    }

    /// Squares with occupant, attacks and classified options
    pub fn board(&self, id: u32) -> Result<JsValue, JsError> {
        to_js(&self.inner.board(NodeId(id)).map_err(js_err)?)
    }

    pub fn connections(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.connections())
    }

    /// Commit moves from a state. `moves` is `[{ from: [r, c], to: [r, c] }]`.
    pub fn expand(&mut self, id: u32, moves: JsValue) -> Result<JsValue, JsError> {
        let moves: Vec<Move> =
            serde_wasm_bindgen::from_value(moves).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&self.inner.expand(NodeId(id), &moves).map_err(js_err)?)
    }

    /// Commit every move that leads to an unexplored state
    #[wasm_bindgen(js_name = expandRemaining)]
    pub fn expand_remaining(&mut self, id: u32) -> Result<JsValue, JsError> {
        let id = NodeId(id);
        let moves = self.inner.unexplored_moves(id).map_err(js_err)?;
        to_js(&self.inner.expand(id, &moves).map_err(js_err)?)
    }

    /// Commit a winning line; returns the node reached after each move
    #[wasm_bindgen(js_name = commitLine)]
    pub fn commit_line(&mut self, id: u32, moves: JsValue) -> Result<Vec<u32>, JsError> {
        let moves: Vec<Move> =
            serde_wasm_bindgen::from_value(moves).map_err(|e| JsError::new(&e.to_string()))?;
        let reached = self
            .inner
            .commit_line(NodeId(id), &moves)
            .map_err(js_err)?;
        Ok(reached.into_iter().map(|n| n.0).collect())
    }

    /// Prepare a search; drive it with `step()`
    pub fn search(&self, id: u32, deadline_secs: f64) -> Result<WasmSearch, JsError> {
        let deadline = config::deadline_from_secs(deadline_secs);
        let inner = self.inner.search(NodeId(id), deadline).map_err(js_err)?;
        Ok(WasmSearch { inner })
    }

    /// Human label of a square, e.g. "a1" for the bottom-right one
    #[wasm_bindgen(js_name = formatCoord)]
    pub fn format_coord(&self, row: u8, col: u8) -> Result<String, JsError> {
        let settings = self.inner.settings();
        notation::format_coord(Coord::new(row, col), settings.rows, settings.cols).map_err(js_err)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum StepView<'a> {
    Layer(&'a LayerSnapshot),
    Finished(&'a SolveOutcome),
}

/// A resumable solver run
#[wasm_bindgen]
pub struct WasmSearch {
    inner: Search,
}

#[wasm_bindgen]
impl WasmSearch {
    /// Expand one layer. Returns `{ layer: {...} }` or `{ finished: {...} }`.
    pub fn step(&mut self) -> Result<JsValue, JsError> {
        match self.inner.step() {
            SearchStep::Layer(snapshot) => to_js(&StepView::Layer(&snapshot)),
            SearchStep::Finished(outcome) => to_js(&StepView::Finished(&outcome)),
        }
    }

    pub fn cancel(&self) {
        self.inner.running_flag().store(false, Ordering::SeqCst);
    }

    pub fn explored(&self) -> f64 {
        self.inner.explored() as f64
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}
