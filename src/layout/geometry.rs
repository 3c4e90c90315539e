//! Geometric primitives shared by the layout engine.

use std::fmt::{self, Write as _};

use serde::Serialize;

/// A point on the logical canvas (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// An open polyline: move to the first point, then straight lines through
/// the rest.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline through the given points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// All vertices in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// First vertex.
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last vertex.
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum()
    }

    /// SVG path data, e.g. `M 240 250 L 350 250 L 350 80`.
    pub fn svg_path_data(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            // Writing into a String cannot fail
            let _ = write!(d, "{cmd} {p}");
        }
        d
    }
}

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from real-valued channels, rounding and clamping each.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        fn channel(v: f64) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }
        Self::new(channel(r), channel(g), channel(b))
    }

    /// CSS hex notation, e.g. `#ffc800`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
