//! Ball Hunt - bouncing balls chased by a player-controlled evil circle
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, bounds, collisions, live count)
//! - `renderer`: Drawing surface abstraction and entity drawing
//! - `driver`: Owns the simulation, queues input, runs the frame loop
//! - `platform`: Browser/native host collaborators (scheduler, counter display)
//! - `settings`: Data-driven tuning

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameStatus, Simulation};
pub use settings::{Settings, SettingsError};

/// Default tuning constants (see [`Settings`])
pub mod consts {
    /// Number of balls spawned at startup
    pub const BALL_COUNT: u32 = 26;
    /// Upper limit accepted from settings
    pub const MAX_BALL_COUNT: u32 = 10_000;
    /// Ball radius range (inclusive)
    pub const BALL_RADIUS_MIN: i32 = 10;
    pub const BALL_RADIUS_MAX: i32 = 20;
    /// Velocity components are sampled in [-BALL_SPEED_MAX, BALL_SPEED_MAX]
    pub const BALL_SPEED_MAX: i32 = 7;

    /// Evil circle defaults
    pub const HUNTER_RADIUS: f32 = 30.0;
    /// Distance moved per key press
    pub const HUNTER_STEP: f32 = 20.0;
    pub const HUNTER_LINE_WIDTH: f32 = 4.0;

    /// Opacity of the black overlay painted each frame (motion trails)
    pub const FADE_ALPHA: f32 = 0.25;

    /// Canvas size used by the headless runner when none is given
    pub const DEFAULT_WIDTH: u32 = 1280;
    pub const DEFAULT_HEIGHT: u32 = 720;
}
