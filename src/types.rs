//! Value types shared by the parser, the interpreter and renderers.
//!
//! Turtle state uses small newtypes so the interpreter cannot mix up
//! degrees and radians or hand out a pen narrower than one unit.

use std::f64::consts::PI;
use std::fmt;

use glam::DVec2;

/// An opaque RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Turtle heading in radians.
///
/// 0 points along +x. Rotations accumulate without wrapping so that
/// repeated turns stay consistent with a single summed turn.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Heading(f64);

impl Heading {
    pub const ZERO: Heading = Heading(0.0);

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Turn by a whole number of degrees
    #[inline]
    pub fn turned(self, degrees: i32) -> Heading {
        Heading(self.0 + f64::from(degrees) * (PI / 180.0))
    }

    /// Unit vector pointing along this heading
    #[inline]
    pub fn direction(self) -> DVec2 {
        let (sin, cos) = self.0.sin_cos();
        DVec2::new(cos, sin)
    }
}

/// Stroke thickness, never below 1
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PenWidth(f64);

impl PenWidth {
    pub const THIN: PenWidth = PenWidth(1.0);

    /// Clamp a requested width up to the minimum of 1
    pub fn clamped(width: i32) -> PenWidth {
        PenWidth(f64::from(width.max(1)))
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Default for PenWidth {
    fn default() -> Self {
        PenWidth::THIN
    }
}

/// One straight stroke produced by a move
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
    pub color: Rgb,
    pub thickness: f64,
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}) -> ({:.3}, {:.3}) {} w={}",
            self.start.x, self.start.y, self.end.x, self.end.y, self.color, self.thickness
        )
    }
}

/// Axis-aligned box around a set of segment endpoints
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Smallest box holding every endpoint, or `None` for no segments
    pub fn of_segments<'a>(segments: impl IntoIterator<Item = &'a LineSegment>) -> Option<Bounds> {
        segments.into_iter().fold(None, |acc, seg| {
            let b = Bounds {
                min: seg.start.min(seg.end),
                max: seg.start.max(seg.end),
            };
            Some(match acc {
                Some(acc) => acc.union(b),
                None => b,
            })
        })
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    const EPSILON: f64 = 1e-9;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment {
            start: dvec2(x1, y1),
            end: dvec2(x2, y2),
            color: Rgb::BLACK,
            thickness: 1.0,
        }
    }

    #[test]
    fn heading_accumulates_without_wrapping() {
        let mut h = Heading::ZERO;
        for _ in 0..8 {
            h = h.turned(90);
        }
        assert!((h.radians() - 4.0 * PI).abs() < EPSILON);
        assert!((Heading::ZERO.turned(720).radians() - h.radians()).abs() < EPSILON);
    }

    #[test]
    fn heading_direction() {
        let d = Heading::ZERO.direction();
        assert!((d - dvec2(1.0, 0.0)).length() < EPSILON);

        let d = Heading::ZERO.turned(90).direction();
        assert!((d - dvec2(0.0, 1.0)).length() < EPSILON);

        let d = Heading::ZERO.turned(-90).direction();
        assert!((d - dvec2(0.0, -1.0)).length() < EPSILON);
    }

    #[test]
    fn pen_width_clamps_up_to_one() {
        assert_eq!(PenWidth::clamped(0).raw(), 1.0);
        assert_eq!(PenWidth::clamped(-7).raw(), 1.0);
        assert_eq!(PenWidth::clamped(i32::MIN).raw(), 1.0);
        assert_eq!(PenWidth::clamped(1).raw(), 1.0);
        assert_eq!(PenWidth::clamped(5).raw(), 5.0);
        assert_eq!(PenWidth::default(), PenWidth::THIN);
    }

    #[test]
    fn rgb_display() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "rgb(255,0,16)");
    }

    #[test]
    fn segment_display_rounds_to_thousandths() {
        let s = LineSegment {
            thickness: 3.0,
            ..seg(400.0, 300.0, 500.0004, 300.0)
        };
        assert_eq!(s.to_string(), "(400.000, 300.000) -> (500.000, 300.000) rgb(0,0,0) w=3");
        assert!((s.length() - 100.0004).abs() < EPSILON);
    }

    #[test]
    fn bounds_of_no_segments() {
        assert_eq!(Bounds::of_segments(&[] as &[LineSegment]), None);
    }

    #[test]
    fn bounds_cover_all_endpoints() {
        let segs = [seg(400.0, 300.0, 500.0, 300.0), seg(500.0, 300.0, 450.0, 250.0)];
        let b = Bounds::of_segments(&segs).unwrap();
        assert_eq!(b.min, dvec2(400.0, 250.0));
        assert_eq!(b.max, dvec2(500.0, 300.0));
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
    }
}
