//! Error taxonomy
//!
//! Every detectable error is surfaced at construction time; once a
//! `SimState` exists the tick loop cannot fail.

use thiserror::Error;

/// Errors raised while building geometry, trajectories, or simulation state
#[derive(Debug, Error)]
pub enum SimError {
    /// Radius or rectangle dimensions that cannot describe a shape
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// Zero-magnitude velocity vector; a body with one would freeze forever
    #[error("degenerate trajectory: velocity magnitude is zero")]
    DegenerateTrajectory,

    /// A vertical line has no finite gradient, so it cannot be expressed in
    /// slope/intercept form
    #[error("undefined line reflection: vertical line has no finite gradient")]
    UndefinedLineReflection,

    /// Configuration values that fail validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Failure reading or writing a config file
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed config JSON
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
}
