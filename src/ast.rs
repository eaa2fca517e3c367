//! Command types for drawbot programs
//!
//! The parser produces a flat list of [`Command`]s: loops are unrolled while
//! parsing, so no loop node exists here.

use std::fmt;
use std::str::FromStr;

use crate::types::Rgb;

/// The fixed command vocabulary (case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `F n`: move forward
    Forward,
    /// `R n`: rotate by degrees
    Rotate,
    /// `COLOR c`: change pen color
    Color,
    /// `P n`: change pen width
    Pen,
    /// `L n [ ... ]`: repeat a block
    Loop,
}

impl Keyword {
    pub const ALL: [Keyword; 5] = [
        Keyword::Forward,
        Keyword::Rotate,
        Keyword::Color,
        Keyword::Pen,
        Keyword::Loop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Forward => "F",
            Keyword::Rotate => "R",
            Keyword::Color => "COLOR",
            Keyword::Pen => "P",
            Keyword::Loop => "L",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keyword::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-letter operand of `COLOR`.
///
/// The codes are opaque; the RGB behind each one is a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    K,
    Y,
    M,
    S,
}

impl ColorCode {
    pub const ALL: [ColorCode; 4] = [ColorCode::K, ColorCode::Y, ColorCode::M, ColorCode::S];

    pub fn rgb(self) -> Rgb {
        match self {
            ColorCode::K => Rgb::new(255, 0, 0),
            ColorCode::Y => Rgb::new(0, 255, 0),
            ColorCode::M => Rgb::new(0, 0, 255),
            ColorCode::S => Rgb::BLACK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorCode::K => "K",
            ColorCode::Y => "Y",
            ColorCode::M => "M",
            ColorCode::S => "S",
        }
    }
}

impl FromStr for ColorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorCode::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}

/// A single drawing command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move forward, drawing a segment
    Move(i32),
    /// Turn by degrees; positive turns right on screen
    Rotate(i32),
    /// Replace the pen color
    SetColor(Rgb),
    /// Replace the pen width (clamped to at least 1 when drawn)
    SetPenWidth(i32),
}

/// Renders a command back as program text, e.g. `F 10` or `COLOR rgb(0,0,0)`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(d) => write!(f, "{} {}", Keyword::Forward, d),
            Command::Rotate(deg) => write!(f, "{} {}", Keyword::Rotate, deg),
            Command::SetColor(c) => write!(f, "{} {}", Keyword::Color, c),
            Command::SetPenWidth(w) => write!(f, "{} {}", Keyword::Pen, w),
        }
    }
}
