//! Simulation state and core entity types
//!
//! Everything the tick advances lives here: the playfield bounds, the moving
//! balls, the paddles, the score, and the respawn timers. The whole state is
//! serializable so frontends can snapshot it, and all randomness flows from
//! the run seed for determinism.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, Rect};
use super::intersect::Axis;
use super::trajectory::Trajectory;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::SimError;
use crate::render::Colour;

/// Playfield edges. Screen convention: north is the top edge (smallest y),
/// south the bottom. West is the scoring edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f32,
    pub west: f32,
    pub south: f32,
    pub east: f32,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f32 {
        self.east - self.west
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.south - self.north
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(
            (self.west + self.east) / 2.0,
            (self.north + self.south) / 2.0,
        )
    }
}

/// Per-tick movement command for a paddle. `Idle` is an explicit state, not
/// an inferred zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleMove {
    #[default]
    Idle,
    Up,
    Down,
}

/// A player-controlled obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Vertical speed in pixels per second
    pub speed: f32,
    /// True while a move command is being received. Visual feedback only,
    /// never consulted by the physics.
    pub moving: bool,
}

impl Paddle {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            speed,
            moving: false,
        }
    }

    /// Apply one tick's movement command, clamping the vertical extent to
    /// the playfield. The `moving` flag mirrors whether a command arrived.
    pub fn apply_move(&mut self, cmd: PaddleMove, bounds: &Bounds, dt: f32) {
        let dy = match cmd {
            PaddleMove::Idle => {
                self.moving = false;
                return;
            }
            PaddleMove::Up => -self.speed * dt,
            PaddleMove::Down => self.speed * dt,
        };
        self.moving = true;
        let max_y = bounds.south - self.rect.height();
        self.rect.pos.y = (self.rect.pos.y + dy).clamp(bounds.north, max_y);
    }
}

/// Cosmetic styling carried by a ball and passed through to the render sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallStyle {
    pub fill: Colour,
    /// Border ring width, 0 for none
    pub border: f32,
    pub border_colour: Colour,
}

/// What a ball's position means relative to the playfield edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryHit {
    /// Contact with a bouncing edge on the given axis
    Bounce(Axis),
    /// Crossed the scoring edge; the ball is lost, not bounced
    Score,
}

/// A moving circular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub circle: Circle,
    pub trajectory: Trajectory,
    /// Speed factor in pixels per second applied to the trajectory
    pub speed: f32,
    pub style: BallStyle,
}

impl Ball {
    /// Move the centre by one tick of travel
    pub fn advance(&mut self, dt: f32) {
        self.circle.centre += self.trajectory.velocity() * self.speed * dt;
    }

    /// Resolve a paddle hit: reflect the struck axis and push the centre out
    /// of the rectangle along it, with a nudge so the same contact is not
    /// re-detected next tick.
    pub fn resolve_paddle(&mut self, axis: Axis, rect: &Rect) {
        self.trajectory.reflect_axis(axis);
        let clearance = self.circle.radius() + SEPARATION_NUDGE;
        match axis {
            Axis::X => {
                self.circle.centre.x = if self.circle.centre.x <= rect.centre().x {
                    rect.left() - clearance
                } else {
                    rect.right() + clearance
                };
            }
            Axis::Y => {
                self.circle.centre.y = if self.circle.centre.y <= rect.centre().y {
                    rect.top() - clearance
                } else {
                    rect.bottom() + clearance
                };
            }
        }
    }

    /// Classify contact with the playfield edges. The radius-expanded extent
    /// is tested against each edge with the contact tolerance; the west edge
    /// scores instead of bouncing. One hit per call, x edges first.
    pub fn boundary_hit(&self, bounds: &Bounds) -> Option<BoundaryHit> {
        let c = self.circle.centre;
        let r = self.circle.radius();

        if c.x - r <= bounds.west + CONTACT_EPSILON {
            return Some(BoundaryHit::Score);
        }
        if c.x + r >= bounds.east - CONTACT_EPSILON {
            return Some(BoundaryHit::Bounce(Axis::X));
        }
        if c.y - r <= bounds.north + CONTACT_EPSILON || c.y + r >= bounds.south - CONTACT_EPSILON {
            return Some(BoundaryHit::Bounce(Axis::Y));
        }
        None
    }

    /// Resolve a boundary bounce: reflect the struck axis and clamp the
    /// centre so the radius-expanded extent sits just inside the edge,
    /// whatever the penetration depth was.
    pub fn resolve_boundary(&mut self, axis: Axis, bounds: &Bounds) {
        self.trajectory.reflect_axis(axis);
        let clearance = self.circle.radius() + SEPARATION_NUDGE;
        match axis {
            Axis::X => {
                self.circle.centre.x = self
                    .circle
                    .centre
                    .x
                    .clamp(bounds.west + clearance, bounds.east - clearance);
            }
            Axis::Y => {
                self.circle.centre.y = self
                    .circle
                    .centre
                    .y
                    .clamp(bounds.north + clearance, bounds.south - clearance);
            }
        }
    }
}

/// Countdown until a lost ball's replacement is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespawnTimer {
    pub ticks_remaining: u32,
}

/// RNG seed wrapper, serializable so a snapshot stays deterministic
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Stream for the spawn performed at the given tick
    pub fn spawn_rng(&self, salt: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Events produced by one tick, for score displays and other listeners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { delta: i64 },
    BodyRemoved { id: u32 },
    BodySpawned { id: u32, position: Vec2 },
}

/// Angular jitter applied to the serve direction, radians
const SERVE_ANGLE_JITTER: f32 = 0.35;
/// Magnitude jitter range applied to the serve speed
const SERVE_MAGNITUDE_JITTER: std::ops::Range<f32> = 0.85..1.15;

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: RngState,
    /// Playfield edges, fixed for the session
    pub bounds: Bounds,
    /// Active balls, insertion order = update and draw order
    pub balls: Vec<Ball>,
    /// Paddles, fixed set for the session
    pub paddles: Vec<Paddle>,
    /// Signed score; losing a ball through the scoring edge costs one
    pub score: i64,
    /// Cleared by `terminate`; a terminated state ignores further ticks
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Balls waiting to be served again
    pub pending_respawns: Vec<RespawnTimer>,
    config: SimConfig,
    next_id: u32,
}

impl SimState {
    /// Build a simulation from a validated config and a run seed
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let mut paddles = Vec::with_capacity(config.paddle_starts.len());
        for &start in &config.paddle_starts {
            let rect = Rect::new(start, config.paddle_width, config.paddle_height)?;
            paddles.push(Paddle::new(rect, config.paddle_speed));
        }

        let mut state = Self {
            seed,
            rng: RngState::new(seed),
            bounds: config.bounds,
            balls: Vec::new(),
            paddles,
            score: 0,
            running: true,
            time_ticks: 0,
            pending_respawns: Vec::new(),
            config,
            next_id: 1,
        };

        let start = state.config.ball_start;
        state.spawn_ball(start)?;
        Ok(state)
    }

    /// Tuning values the simulation was built from
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Mark the session over; `tick` becomes a no-op
    pub fn terminate(&mut self) {
        self.running = false;
    }

    /// Serve a new ball at `position` with a freshly sampled trajectory.
    /// Returns the new ball's id.
    pub fn spawn_ball(&mut self, position: Vec2) -> Result<u32, SimError> {
        let salt = self.time_ticks.wrapping_add(self.next_id as u64);
        let mut rng = self.rng.spawn_rng(salt);
        let trajectory = self.sample_serve(&mut rng);

        let id = self.next_entity_id();
        let circle = Circle::new(position, self.config.ball_radius)?;
        self.balls.push(Ball {
            id,
            circle,
            trajectory,
            speed: self.config.ball_speed,
            style: BallStyle {
                fill: self.config.ball_fill,
                border: self.config.ball_border,
                border_colour: self.config.ball_border_colour.unwrap_or(Colour::BLACK),
            },
        });
        Ok(id)
    }

    /// Sample a serve trajectory: configured direction with angular jitter,
    /// difficulty-scaled magnitude with its own jitter. A degenerate sample
    /// is resampled, never accepted.
    fn sample_serve(&self, rng: &mut Pcg32) -> Trajectory {
        let base = self.config.serve_direction.normalize();
        let base_angle = base.y.atan2(base.x);
        let multiplier = self.config.difficulty.speed_multiplier();

        for _ in 0..8 {
            let theta = base_angle + rng.random_range(-SERVE_ANGLE_JITTER..=SERVE_ANGLE_JITTER);
            let magnitude = multiplier * rng.random_range(SERVE_MAGNITUDE_JITTER);
            if let Ok(trajectory) = Trajectory::from_angle(theta, magnitude) {
                return trajectory;
            }
        }

        // Unreachable with a validated config; serve straight as a last resort
        log::warn!("serve sampling degenerate, falling back to base direction");
        Trajectory::new(base * multiplier).unwrap_or_else(|_| Trajectory::eastward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CONTACT_EPSILON, SIM_DT};
    use proptest::prelude::*;

    fn bounds() -> Bounds {
        Bounds {
            north: 0.0,
            west: 0.0,
            south: 500.0,
            east: 500.0,
        }
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball {
            id: 1,
            circle: Circle::new(Vec2::new(x, y), 10.0).unwrap(),
            trajectory: Trajectory::new(vel).unwrap(),
            speed: 1.0,
            style: BallStyle {
                fill: Colour::new(155, 0, 0),
                border: 0.0,
                border_colour: Colour::BLACK,
            },
        }
    }

    #[test]
    fn test_paddle_clamps_to_court() {
        let b = bounds();
        let rect = Rect::new(Vec2::new(50.0, 5.0), 10.0, 70.0).unwrap();
        let mut paddle = Paddle::new(rect, 600.0);

        // One big tick upward would leave the court; clamped to the top
        paddle.apply_move(PaddleMove::Up, &b, 1.0);
        assert_eq!(paddle.rect.top(), 0.0);
        assert!(paddle.moving);

        // And all the way down: bottom edge pinned to the south bound
        paddle.apply_move(PaddleMove::Down, &b, 10.0);
        assert_eq!(paddle.rect.bottom(), 500.0);
    }

    #[test]
    fn test_paddle_idle_is_distinct() {
        let b = bounds();
        let rect = Rect::new(Vec2::new(50.0, 100.0), 10.0, 70.0).unwrap();
        let mut paddle = Paddle::new(rect, 240.0);

        paddle.apply_move(PaddleMove::Down, &b, SIM_DT);
        assert!(paddle.moving);
        let y = paddle.rect.top();

        paddle.apply_move(PaddleMove::Idle, &b, SIM_DT);
        assert!(!paddle.moving);
        assert_eq!(paddle.rect.top(), y);
    }

    #[test]
    fn test_ball_advance_scales_by_speed() {
        let mut ball = ball_at(100.0, 100.0, Vec2::new(1.0, 0.0));
        ball.speed = 300.0;
        ball.advance(1.0 / 60.0);
        assert!((ball.circle.centre.x - 105.0).abs() < 1e-4);
        assert_eq!(ball.circle.centre.y, 100.0);
    }

    #[test]
    fn test_resolve_paddle_separates_and_reflects() {
        let rect = Rect::new(Vec2::new(200.0, 80.0), 10.0, 70.0).unwrap();
        // Ball overlapping the west face, moving east
        let mut ball = ball_at(195.0, 100.0, Vec2::new(120.0, 30.0));

        ball.resolve_paddle(Axis::X, &rect);
        // Velocity x flipped, y untouched
        assert_eq!(ball.trajectory.velocity(), Vec2::new(-120.0, 30.0));
        // Pushed clear of the rectangle
        assert!(ball.circle.centre.x + ball.circle.radius() < rect.left());
        assert_eq!(
            crate::sim::intersect::circle_rect(&ball.circle, &rect),
            None
        );
    }

    #[test]
    fn test_boundary_hit_classification() {
        let b = bounds();
        // Near the west edge: scoring, not bouncing
        assert_eq!(
            ball_at(10.0, 250.0, Vec2::new(-1.0, 0.0)).boundary_hit(&b),
            Some(BoundaryHit::Score)
        );
        // Near the east edge: x bounce
        assert_eq!(
            ball_at(495.0, 250.0, Vec2::new(1.0, 0.0)).boundary_hit(&b),
            Some(BoundaryHit::Bounce(Axis::X))
        );
        // Near the north edge: y bounce
        assert_eq!(
            ball_at(250.0, 8.0, Vec2::new(0.0, -1.0)).boundary_hit(&b),
            Some(BoundaryHit::Bounce(Axis::Y))
        );
        // Mid-court: nothing
        assert_eq!(
            ball_at(250.0, 250.0, Vec2::new(1.0, 1.0)).boundary_hit(&b),
            None
        );
    }

    #[test]
    fn test_state_construction_rejects_bad_config() {
        let mut config = SimConfig::default();
        config.ball_radius = -1.0;
        assert!(SimState::new(config, 1).is_err());
    }

    #[test]
    fn test_spawned_serve_is_never_degenerate() {
        let state = SimState::new(SimConfig::default(), 42).unwrap();
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].trajectory.speed() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_boundary_resolution_contains_ball(
            // Penetration depths up to a full radius past the south edge
            depth in 0.0f32..10.0,
            x in 30.0f32..470.0,
        ) {
            let b = bounds();
            let mut ball = ball_at(x, 500.0 - 10.0 + depth, Vec2::new(40.0, 80.0));
            ball.resolve_boundary(Axis::Y, &b);
            // Centre sits within epsilon of fully inside afterwards
            prop_assert!(ball.circle.centre.y + ball.circle.radius() <= b.south + CONTACT_EPSILON);
            prop_assert!(ball.circle.centre.y - ball.circle.radius() >= b.north - CONTACT_EPSILON);
            // And the velocity now points back into the court
            prop_assert!(ball.trajectory.velocity().y < 0.0);
        }
    }
}
