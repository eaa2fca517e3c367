//! Turtle-graphics command interpreter.
//!
//! A drawbot program moves a pen around a canvas:
//!
//! ```text
//! COLOR K P 2
//! L 36 [ L 4 [ F 100 R 90 ] R 10 ]
//! ```
//!
//! [`lexer::tokenize`] splits the text, [`parse::parse`] turns tokens into a
//! flat command list (loops unrolled), and [`interpret::interpret`] walks the
//! commands to produce [`LineSegment`]s for a renderer to draw.

pub mod ast;
pub mod defaults;
pub mod errors;
pub mod interpret;
pub mod lexer;
pub mod log;
pub mod parse;
pub mod types;

pub use ast::{ColorCode, Command, Keyword};
pub use errors::{ParseError, SourceContext};
pub use interpret::{InterpretOptions, Turtle, interpret, interpret_with};
pub use lexer::{Token, TokenKind, TokenStream, tokenize};
pub use parse::{ParseOptions, parse, parse_with};
pub use types::{Bounds, Heading, LineSegment, PenWidth, Rgb};

/// Segments of one run, in drawing order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Drawing {
    pub segments: Vec<LineSegment>,
    /// Box around every endpoint; `None` when nothing was drawn
    pub bounds: Option<Bounds>,
}

impl Drawing {
    pub fn from_segments(segments: Vec<LineSegment>) -> Self {
        let bounds = Bounds::of_segments(&segments);
        Drawing { segments, bounds }
    }
}

/// Tokenize and parse a program
pub fn compile(source: &str) -> Result<Vec<Command>, ParseError> {
    parse(&tokenize(source))
}

/// Run a program from the default origin
pub fn draw(source: &str) -> Result<Drawing, ParseError> {
    let commands = compile(source)?;
    Ok(Drawing::from_segments(interpret(&commands)))
}

/// Like [`draw`], but errors come back as reports that show the source.
pub fn draw_named(name: &str, source: &str) -> Result<Drawing, miette::Report> {
    draw(source).map_err(|e| SourceContext::new(name, source).report(e))
}
