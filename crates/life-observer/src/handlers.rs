//! Read-only REST handlers for the Observer server.
//!
//! All handlers read from the latest [`GridSnapshot`] in the shared
//! [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/grid` | Current grid snapshot |
//! | `GET` | `/api/grid/cells/{row}/{col}` | Single cell state |
//!
//! [`GridSnapshot`]: life_core::engine::GridSnapshot

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use life_grid::GridError;

use crate::error::ObserverError;
use crate::state::AppState;

/// Response body for `GET /api/grid/cells/{row}/{col}`.
#[derive(Debug, serde::Serialize)]
pub struct CellResponse {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// `alive` or `dead`.
    pub state: &'static str,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the current generation and grid.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.current_snapshot();
    let generation = snapshot.generation;
    let population = snapshot.population;
    let rows = snapshot.rows;
    let cols = snapshot.cols;
    let status = if snapshot.running { "RUNNING" } else { "STOPPED" };

    let mut board = String::with_capacity(rows.saturating_mul(cols.saturating_add(1)));
    for row in &snapshot.cells {
        for &cell in row {
            board.push(if cell == 1 { '#' } else { '.' });
        }
        board.push('\n');
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Life Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 900px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        pre {{ line-height: 1; letter-spacing: 0.2em; color: #7ee787; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Life Observer</h1>
    <p>Status: <span class="status">{status}</span></p>
    <div>
        <div class="metric"><div class="label">Generation</div><div class="value">{generation}</div></div>
        <div class="metric"><div class="label">Population</div><div class="value">{population}</div></div>
        <div class="metric"><div class="label">Grid</div><div class="value">{rows}x{cols}</div></div>
    </div>
    <pre>{board}</pre>
    <h2>API</h2>
    <ul>
        <li><a href="/api/grid">/api/grid</a> -- Current grid snapshot</li>
        <li><a href="/api/control/status">/api/control/status</a> -- Run status</li>
    </ul>
    <p><code>ws://host:port/ws/grid</code> -- Live grid stream</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/grid
// ---------------------------------------------------------------------------

/// Return the latest published grid snapshot.
pub async fn get_grid(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.current_snapshot())
}

// ---------------------------------------------------------------------------
// GET /api/grid/cells/{row}/{col}
// ---------------------------------------------------------------------------

/// Return the state of one cell in the latest snapshot.
///
/// Responds 400 when the coordinate lies outside the grid.
pub async fn get_cell(
    State(state): State<Arc<AppState>>,
    Path((row, col)): Path<(usize, usize)>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.borrow();
    let value = snapshot
        .cells
        .get(row)
        .and_then(|cells| cells.get(col))
        .copied()
        .ok_or(GridError::OutOfBounds {
            row,
            col,
            rows: snapshot.rows,
            cols: snapshot.cols,
        })?;

    Ok(Json(CellResponse {
        row,
        col,
        state: if value == 1 { "alive" } else { "dead" },
    }))
}
