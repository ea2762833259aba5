//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (a run replays exactly from its seed and inputs)
//! - Stable iteration order (collection order, dead balls kept in place)
//! - Drawing goes through the `renderer::Surface` trait, never a concrete backend

pub mod collision;
pub mod color;
pub mod entity;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, detect_ball_collisions, detect_hunter_collisions};
pub use color::{Rgb, Rgba};
pub use entity::{Ball, Bounds, Entity, Hunter, HunterCommand};
pub use rng::{random_color, random_int};
pub use state::{InvariantViolation, LiveCount, SimPhase, SimState};
pub use tick::{FrameReport, TickInput, autopilot_command, tick};
