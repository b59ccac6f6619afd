//! Bishops Puzzle Web API
//!
//! Serves one shared explorer over HTTP. Every request locks the explorer
//! once, so an expansion (commit, connect, resequence, refresh) is never
//! observed half-done. Solving runs on a blocking thread with the lock
//! released; committing the winning line takes the lock again.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use bishops_core::{
    deadline_from_secs, BoardView, Connection, EngineError, Expansion, Explorer, GameSettings, Move,
    NodeId, SolveOutcome, SolverSettings, StateSummary,
};

// =============================================================================
// Shared State
// =============================================================================

pub struct AppStateInner {
    explorer: Mutex<Explorer>,
    solver: SolverSettings,
}

pub type AppState = Arc<AppStateInner>;

/// Build the shared state with a fresh puzzle.
pub fn app_state(settings: GameSettings, solver: SolverSettings) -> Result<AppState, EngineError> {
    Ok(Arc::new(AppStateInner {
        explorer: Mutex::new(Explorer::new(settings)?),
        solver,
    }))
}

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorModel {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorModel>);

#[derive(Serialize)]
struct StateModel {
    summary: StateSummary,
    board: BoardView,
}

#[derive(Serialize)]
struct GameModel {
    settings: GameSettings,
    root: StateModel,
}

#[derive(Deserialize)]
struct MovesRequest {
    moves: Vec<Move>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SolveRequest {
    /// Overrides the server deadline, clamped to one hour
    deadline_secs: Option<f64>,
    /// Commit the whole winning line
    commit: bool,
    /// Commit only the first move of the winning line
    hint: bool,
}

#[derive(Serialize)]
struct SolveModel {
    outcome: SolveOutcome,
    /// Nodes committed from the winning line, in order
    committed: Vec<NodeId>,
}

// =============================================================================
// Helpers
// =============================================================================

fn engine_error(err: EngineError) -> ApiError {
    let status = match err {
        EngineError::UnknownState { .. } => StatusCode::NOT_FOUND,
        EngineError::InvalidConfiguration { .. } | EngineError::IllegalMove { .. } => {
            StatusCode::BAD_REQUEST
        }
    };
    (
        status,
        Json(ErrorModel {
            detail: err.to_string(),
        }),
    )
}

fn state_model(explorer: &Explorer, id: NodeId) -> Result<StateModel, ApiError> {
    Ok(StateModel {
        summary: explorer.summary(id).map_err(engine_error)?,
        board: explorer.board(id).map_err(engine_error)?,
    })
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

async fn new_game(
    State(state): State<AppState>,
    Json(settings): Json<GameSettings>,
) -> Result<Json<GameModel>, ApiError> {
    let mut explorer = state.explorer.lock().unwrap();
    explorer.reset(settings).map_err(engine_error)?;
    info!("new {}x{} puzzle", settings.rows, settings.cols);

    let root = state_model(&explorer, explorer.root())?;
    Ok(Json(GameModel { settings, root }))
}

async fn list_states(State(state): State<AppState>) -> Json<Vec<StateSummary>> {
    let explorer = state.explorer.lock().unwrap();
    Json(explorer.summaries())
}

async fn get_state(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<StateModel>, ApiError> {
    let explorer = state.explorer.lock().unwrap();
    let id = explorer.node(&hash).map_err(engine_error)?;
    Ok(Json(state_model(&explorer, id)?))
}

async fn make_moves(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(req): Json<MovesRequest>,
) -> Result<Json<Expansion>, ApiError> {
    let mut explorer = state.explorer.lock().unwrap();
    let id = explorer.node(&hash).map_err(engine_error)?;
    let expansion = explorer.expand(id, &req.moves).map_err(engine_error)?;
    Ok(Json(expansion))
}

/// Commit every move that leads to an unexplored state.
async fn expand_state(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<Expansion>, ApiError> {
    let mut explorer = state.explorer.lock().unwrap();
    let id = explorer.node(&hash).map_err(engine_error)?;
    let moves = explorer.unexplored_moves(id).map_err(engine_error)?;
    let expansion = explorer.expand(id, &moves).map_err(engine_error)?;
    Ok(Json(expansion))
}

async fn solve_state(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(req): Json<SolveRequest>,
) -> Result<Json<SolveModel>, ApiError> {
    let deadline = req
        .deadline_secs
        .map(deadline_from_secs)
        .unwrap_or_else(|| state.solver.deadline());

    let (id, search) = {
        let explorer = state.explorer.lock().unwrap();
        let id = explorer.node(&hash).map_err(engine_error)?;
        (id, explorer.search(id, deadline).map_err(engine_error)?)
    };

    let outcome = tokio::task::spawn_blocking(move || search.run())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorModel {
                    detail: format!("Solver task failed: {e}"),
                }),
            )
        })?;
    info!("solve from {hash}: {:?}", outcome);

    let line = match (&outcome, req.commit, req.hint) {
        (SolveOutcome::Solved { moves, .. }, true, _) => moves.clone(),
        (SolveOutcome::Solved { moves, .. }, false, true) => {
            moves.iter().take(1).copied().collect()
        }
        _ => Vec::new(),
    };
    let committed = if line.is_empty() {
        Vec::new()
    } else {
        let mut explorer = state.explorer.lock().unwrap();
        explorer.commit_line(id, &line).map_err(engine_error)?
    };

    Ok(Json(SolveModel { outcome, committed }))
}

async fn list_connections(State(state): State<AppState>) -> Json<Vec<Connection>> {
    let explorer = state.explorer.lock().unwrap();
    Json(explorer.connections())
}

// =============================================================================
// Router
// =============================================================================

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/game", post(new_game))
        .route("/states", get(list_states))
        .route("/states/{hash}", get(get_state))
        .route("/states/{hash}/moves", post(make_moves))
        .route("/states/{hash}/expand", post(expand_state))
        .route("/states/{hash}/solve", post(solve_state))
        .route("/connections", get(list_connections))
        .layer(cors)
        .with_state(state)
}
