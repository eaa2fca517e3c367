//! Fixed constants the interpreter and renderers agree on

use glam::DVec2;

use crate::types::{PenWidth, Rgb};

/// Canvas the original drawing surface uses
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Where the turtle starts: the canvas center
pub const ORIGIN: DVec2 = DVec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);

pub const PEN_COLOR: Rgb = Rgb::BLACK;
pub const PEN_WIDTH: PenWidth = PenWidth::THIN;

/// Deepest loop nesting the parser accepts
pub const MAX_LOOP_DEPTH: usize = 64;

/// Longest unrolled command list the parser will build
pub const MAX_COMMANDS: usize = 10_000_000;
