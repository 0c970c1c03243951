//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order for balls, list order for paddles)
//! - No rendering or platform dependencies

pub mod geom;
pub mod intersect;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use geom::{Circle, Rect};
pub use intersect::{Axis, circle_line, circle_rect, circles_intersect, point_in_circle};
pub use state::{
    Ball, BallStyle, BoundaryHit, Bounds, GameEvent, Paddle, PaddleMove, RespawnTimer, SimState,
};
pub use tick::{TickInput, tick};
pub use trajectory::{Line, Perpendicular, Trajectory};
