//! Level data source
//!
//! A level region is an LDtk "simplified" export: a composite image, an
//! entity document (JSON), and an IntGrid CSV that drives collision. The
//! alternate hand-placed layout (four platforms, a row of stars) lives in
//! `bundle` as well; exactly one representation is active per deployment.

pub mod bundle;
pub mod data;
pub mod grid;

pub use bundle::{LevelBundle, LevelSource};
pub use data::{EntityRecord, LevelData};
pub use grid::IntGrid;

use thiserror::Error;

/// Load-time fatal errors. A level either fully builds or it does not;
/// there is no recovery path and no partial state.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("grid document is empty")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid cell ({row}, {col}) is not an integer: {token:?}")]
    BadCell {
        row: usize,
        col: usize,
        token: String,
    },

    #[error(
        "grid covers {grid_w}x{grid_h} px at cell size {cell_size}, \
         but the level reports {level_w}x{level_h} px"
    )]
    GridMisaligned {
        grid_w: f32,
        grid_h: f32,
        level_w: f32,
        level_h: f32,
        cell_size: f32,
    },

    #[error("entity document is malformed: {0}")]
    BadEntityDocument(#[from] serde_json::Error),
}
