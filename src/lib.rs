//! Court Pong - deterministic collision core for a rectangular-court arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, intersections, trajectories, tick)
//! - `render`: Colour type and the render-sink seam frontends plug into
//! - `config`: Data-driven tuning, loaded from JSON
//! - `error`: Construction-time error taxonomy
//!
//! The simulation never blocks and never faults mid-tick: invalid values are
//! rejected when a state is built, and every per-tick condition (bounces,
//! scoring, respawn delays) is handled by fixed policies inside `tick`.

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::{Difficulty, SimConfig};
pub use error::SimError;
pub use sim::{GameEvent, SimState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the classic frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 500.0;
    pub const COURT_HEIGHT: f32 = 500.0;

    /// Near-contact tolerance for boundary checks. Edge hits are detected
    /// this early so a fast ball never visually tunnels through a wall.
    pub const CONTACT_EPSILON: f32 = 0.5;
    /// Separation applied after a bounce so the same contact is not
    /// re-detected on the very next tick.
    pub const SEPARATION_NUDGE: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_SPEED: f32 = 300.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 70.0;
    pub const PADDLE_SPEED: f32 = 240.0;

    /// Ticks between losing a ball and serving its replacement (1 second)
    pub const RESPAWN_DELAY_TICKS: u32 = 60;
}
