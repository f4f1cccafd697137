//! Pixel Platformer - a 2D platformer drawn on an HTML canvas
//!
//! Core modules:
//! - `sim`: Simulation step (kinematics, collisions, resets)
//! - `driver`: Frame driver (edge handling, fixed timestep, snapshots)
//! - `renderer`: Scene composition and the canvas backend
//! - `platform`: Browser mount/teardown and event plumbing
//! - `tuning`: Gameplay constants

pub mod driver;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use driver::{FrameDriver, NullPresenter, Presenter};
pub use input::{InputLatch, Key};
pub use settings::{GameOptions, Settings};
pub use snapshot::Snapshot;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical world size; the surface is scaled from this
    pub const LOGICAL_WIDTH: f32 = 800.0;
    pub const LOGICAL_HEIGHT: f32 = 450.0;
    /// Ground sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 40.0;

    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 16.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Spawn point (x, and height above ground for the top edge)
    pub const SPAWN_X: f32 = 60.0;
    pub const SPAWN_ABOVE_GROUND: f32 = 32.0;

    /// Fixed simulation tick (60 Hz, the rate the tuning values assume)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Host time backlog beyond this is dropped (tab switches, breakpoints)
    pub const MAX_FRAME_MS: f64 = 250.0;
}
