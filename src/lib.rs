//! Sock Hop - a tiny tile platformer for the browser
//!
//! Core modules:
//! - `level`: LDtk-exported level bundle (entity document + IntGrid CSV)
//! - `sim`: Deterministic simulation (player movement, collisions, stars)
//! - `scene`: Load/build/tick lifecycle and the entity spawner
//! - `filelist`: Developer utility that prints source trees for review

pub mod filelist;
pub mod level;
pub mod scene;
pub mod sim;

pub use level::{IntGrid, LevelBundle, LevelData, LevelError, LevelSource};
pub use scene::{Scene, SceneError, VisualRegistry};
pub use sim::{GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the browser frame clock)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical game resolution, scaled to fit the mount container
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// IntGrid cell size in pixels. Must match the LDtk export grid
    /// resolution; a mismatch silently misaligns every collision solid,
    /// so the loader validates it against the level's pixel dimensions.
    pub const CELL_SIZE: f32 = 32.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY_Y: f32 = 300.0;

    /// Player run speed (pixels/s)
    pub const RUN_SPEED: f32 = 160.0;
    /// Jump impulse applied while grounded (pixels/s, upward)
    pub const JUMP_IMPULSE: f32 = 330.0;
    /// Player rebound factor on landing
    pub const PLAYER_BOUNCE: f32 = 0.2;
    /// Player spawn position
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 450.0;
    /// Player sprite sheet frame size
    pub const PLAYER_FRAME_W: u32 = 32;
    pub const PLAYER_FRAME_H: u32 = 48;

    /// Score awarded per collected star
    pub const STAR_VALUE: u64 = 10;
    /// Star bounce factor range on (re)activation
    pub const STAR_BOUNCE_MIN: f32 = 0.4;
    pub const STAR_BOUNCE_MAX: f32 = 0.8;
    /// Row stars drop from when (re)activated
    pub const STAR_SPAWN_Y: f32 = 0.0;

    /// Hand-placed layout: star row (12 stars, 70 px apart)
    pub const STAR_COUNT: usize = 12;
    pub const STAR_START_X: f32 = 12.0;
    pub const STAR_STEP_X: f32 = 70.0;

    /// Vertical speed below which a landing rebound is damped to rest
    pub const REST_SPEED: f32 = 20.0;
}
