//! Simulation tuning
//!
//! Data-driven configuration for the collision core, persisted as JSON.
//! Every value is validated before a simulation is built from it, so the
//! tick loop never sees a speed of zero or a paddle taller than the court.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::SimError;
use crate::render::Colour;
use crate::sim::state::Bounds;

/// Difficulty levels, scaling the randomized serve velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Scale applied to a freshly served ball's velocity magnitude
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.35,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Playfield edges; west is the scoring edge
    pub bounds: Bounds,

    // === Ball ===
    /// Speed factor in pixels per second applied to the trajectory
    pub ball_speed: f32,
    pub ball_radius: f32,
    /// Centre of the first serve
    pub ball_start: Vec2,
    /// Base direction of every serve, jittered per spawn
    pub serve_direction: Vec2,
    /// Where replacements appear after a lost ball
    pub respawn_point: Vec2,
    /// Ticks between losing a ball and serving its replacement
    pub respawn_delay_ticks: u32,

    // === Paddles ===
    pub paddle_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Top-left starting position of each paddle, in draw order
    pub paddle_starts: Vec<Vec2>,

    // === Tuning ===
    pub difficulty: Difficulty,

    // === Ball styling (cosmetic, passed through to the render sink) ===
    pub ball_fill: Colour,
    pub ball_border: f32,
    /// Defaults to black when absent
    pub ball_border_colour: Option<Colour>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let bounds = Bounds {
            north: 0.0,
            west: 0.0,
            south: COURT_HEIGHT,
            east: COURT_WIDTH,
        };
        Self {
            bounds,
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,
            ball_start: Vec2::new(120.0, 120.0),
            serve_direction: Vec2::new(1.0, 0.5),
            respawn_point: bounds.centre(),
            respawn_delay_ticks: RESPAWN_DELAY_TICKS,
            paddle_speed: PADDLE_SPEED,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_starts: vec![Vec2::new(50.0, 50.0)],
            difficulty: Difficulty::Medium,
            ball_fill: Colour::new(155, 0, 0),
            ball_border: 2.0,
            ball_border_colour: Some(Colour::new(255, 0, 0)),
        }
    }
}

impl SimConfig {
    /// Check every invariant a running simulation depends on
    pub fn validate(&self) -> Result<(), SimError> {
        let b = &self.bounds;
        if !(b.north.is_finite() && b.west.is_finite() && b.south.is_finite() && b.east.is_finite())
            || b.north >= b.south
            || b.west >= b.east
        {
            return Err(SimError::InvalidConfig(
                "bounds must satisfy north < south and west < east".into(),
            ));
        }

        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(SimError::InvalidConfig("ball_radius must be > 0".into()));
        }
        let min_extent = 2.0 * (self.ball_radius + SEPARATION_NUDGE);
        if b.width() <= min_extent || b.height() <= min_extent {
            return Err(SimError::InvalidConfig(
                "court too small for the configured ball".into(),
            ));
        }

        if !self.ball_speed.is_finite() || self.ball_speed <= 0.0 {
            return Err(SimError::InvalidConfig("ball_speed must be > 0".into()));
        }
        if !self.paddle_speed.is_finite() || self.paddle_speed <= 0.0 {
            return Err(SimError::InvalidConfig("paddle_speed must be > 0".into()));
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            return Err(SimError::InvalidConfig(
                "paddle dimensions must be > 0".into(),
            ));
        }
        if self.paddle_height > b.height() {
            return Err(SimError::InvalidConfig(
                "paddle_height exceeds the court height".into(),
            ));
        }
        for start in &self.paddle_starts {
            if start.x < b.west || start.x + self.paddle_width > b.east {
                return Err(SimError::InvalidConfig(
                    "paddle start outside the court horizontally".into(),
                ));
            }
        }

        for point in [self.ball_start, self.respawn_point] {
            if point.x - self.ball_radius < b.west
                || point.x + self.ball_radius > b.east
                || point.y - self.ball_radius < b.north
                || point.y + self.ball_radius > b.south
            {
                return Err(SimError::InvalidConfig(
                    "spawn point leaves the ball outside the court".into(),
                ));
            }
        }

        if !self.serve_direction.is_finite() || self.serve_direction == Vec2::ZERO {
            return Err(SimError::InvalidConfig(
                "serve_direction must be a non-zero vector".into(),
            ));
        }

        if !self.ball_border.is_finite()
            || self.ball_border < 0.0
            || self.ball_border >= self.ball_radius
        {
            return Err(SimError::InvalidConfig(
                "ball_border must be in [0, ball_radius)".into(),
            ));
        }

        Ok(())
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
