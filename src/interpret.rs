//! Replay commands against a turtle and collect the strokes it draws

use glam::DVec2;

use crate::ast::Command;
use crate::defaults;
use crate::types::{Heading, LineSegment, PenWidth, Rgb};

/// Interpreter settings shared with whoever renders the segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpretOptions {
    /// Starting position of the turtle
    pub origin: DVec2,
}

impl Default for InterpretOptions {
    fn default() -> Self {
        Self {
            origin: defaults::ORIGIN,
        }
    }
}

/// Pose and pen of the turtle during one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turtle {
    pub position: DVec2,
    pub heading: Heading,
    pub color: Rgb,
    pub pen_width: PenWidth,
}

impl Turtle {
    pub fn new(origin: DVec2) -> Self {
        Self {
            position: origin,
            heading: Heading::ZERO,
            color: defaults::PEN_COLOR,
            pen_width: defaults::PEN_WIDTH,
        }
    }

    /// Execute one command; a move returns the segment it drew
    pub fn apply(&mut self, command: Command) -> Option<LineSegment> {
        match command {
            Command::Move(distance) => {
                let start = self.position;
                let end = start + f64::from(distance) * self.heading.direction();
                self.position = end;
                Some(LineSegment {
                    start,
                    end,
                    color: self.color,
                    thickness: self.pen_width.raw(),
                })
            }
            Command::Rotate(degrees) => {
                self.heading = self.heading.turned(degrees);
                None
            }
            Command::SetColor(color) => {
                self.color = color;
                None
            }
            Command::SetPenWidth(width) => {
                self.pen_width = PenWidth::clamped(width);
                None
            }
        }
    }
}

impl Default for Turtle {
    fn default() -> Self {
        Turtle::new(defaults::ORIGIN)
    }
}

/// Interpret commands from the default origin
pub fn interpret(commands: &[Command]) -> Vec<LineSegment> {
    interpret_with(commands, &InterpretOptions::default())
}

pub fn interpret_with(commands: &[Command], options: &InterpretOptions) -> Vec<LineSegment> {
    let mut turtle = Turtle::new(options.origin);
    commands
        .iter()
        .filter_map(|&command| {
            let segment = turtle.apply(command)?;
            crate::log::trace!(%segment, "segment");
            Some(segment)
        })
        .collect()
}
