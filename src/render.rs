//! Render seam
//!
//! The core never draws. A frontend implements `RenderSink` and receives
//! plain shapes and colours in draw order, always after a tick's state is
//! final, so it can never observe a half-updated body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::SimState;

/// An RGB colour with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Darkened variant for drop shadows: each channel halved, floored
    pub fn shadow(&self) -> Colour {
        Colour::new(self.red / 2, self.green / 2, self.blue / 2)
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Paddle fill used by `draw_state`
pub const PADDLE_COLOUR: Colour = Colour::new(0, 0, 255);

/// Offset of the cosmetic drop shadow under each ball
const SHADOW_OFFSET: Vec2 = Vec2::new(3.0, 3.0);

/// A shape handed to the render sink
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { centre: Vec2, radius: f32 },
    Rect { pos: Vec2, width: f32, height: f32 },
}

/// Anything that can turn shapes into pixels
pub trait RenderSink {
    fn draw(&mut self, shape: &Shape, colour: Colour);
}

/// Draw the whole state in update order: paddles first, then each ball as
/// drop shadow, border ring (when styled) and fill.
pub fn draw_state(sink: &mut dyn RenderSink, state: &SimState) {
    for paddle in &state.paddles {
        sink.draw(
            &Shape::Rect {
                pos: paddle.rect.pos,
                width: paddle.rect.width(),
                height: paddle.rect.height(),
            },
            PADDLE_COLOUR,
        );
    }

    for ball in &state.balls {
        let centre = ball.circle.centre;
        let radius = ball.circle.radius();

        sink.draw(
            &Shape::Circle {
                centre: centre + SHADOW_OFFSET,
                radius,
            },
            ball.style.fill.shadow(),
        );

        if ball.style.border > 0.0 {
            sink.draw(&Shape::Circle { centre, radius }, ball.style.border_colour);
            sink.draw(
                &Shape::Circle {
                    centre,
                    radius: radius - ball.style.border,
                },
                ball.style.fill,
            );
        } else {
            sink.draw(&Shape::Circle { centre, radius }, ball.style.fill);
        }
    }
}
