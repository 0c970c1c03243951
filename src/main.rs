//! Court Pong entry point
//!
//! Headless demo driver: builds a simulation from a config file (or the
//! defaults), runs it at the fixed timestep with a simple tracking
//! controller, and logs events and draw calls. A real frontend supplies its
//! own render sink and input source through the same seams.

use std::path::Path;

use court_pong::config::SimConfig;
use court_pong::consts::SIM_DT;
use court_pong::error::SimError;
use court_pong::render::{Colour, RenderSink, Shape, draw_state};
use court_pong::sim::{PaddleMove, SimState, TickInput, tick};

/// Render sink that logs draw calls instead of producing pixels
struct LogSink;

impl RenderSink for LogSink {
    fn draw(&mut self, shape: &Shape, colour: Colour) {
        log::debug!("draw {:?} in rgb{:?}", shape, colour.to_array());
    }
}

/// Vertical slack before the controller bothers moving, pixels
const TRACKING_DEAD_ZONE: f32 = 4.0;

/// Steer each paddle toward the first active ball, the way a patient player
/// would
fn track_balls(state: &SimState) -> TickInput {
    let target = state.balls.first().map(|ball| ball.circle.centre.y);

    let commands = state
        .paddles
        .iter()
        .map(|paddle| {
            let Some(target_y) = target else {
                return PaddleMove::Idle;
            };
            let centre_y = paddle.rect.centre().y;
            if target_y < centre_y - TRACKING_DEAD_ZONE {
                PaddleMove::Up
            } else if target_y > centre_y + TRACKING_DEAD_ZONE {
                PaddleMove::Down
            } else {
                PaddleMove::Idle
            }
        })
        .collect();

    TickInput { commands }
}

fn main() -> Result<(), SimError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path))?,
        None => SimConfig::default(),
    };

    let mut state = SimState::new(config, 0xC0FFEE)?;
    let mut sink = LogSink;

    // 30 seconds of play at the fixed timestep
    for _ in 0..1800 {
        let input = track_balls(&state);
        let events = tick(&mut state, &input, SIM_DT);
        for event in &events {
            log::info!("{:?}", event);
        }
        draw_state(&mut sink, &state);
    }

    state.terminate();
    log::info!("session over, final score {}", state.score);
    Ok(())
}
