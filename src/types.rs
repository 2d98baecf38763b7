//! Geometric primitives passed between pipeline stages.

use glam::DVec2;
use std::fmt;

/// Error type for numeric parameters that cannot be used
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Accept a real number only if it is finite.
///
/// The pipeline itself takes any `f64`; front ends use this to reject
/// `nan`/`inf` before starting a conversion.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Declared document size, the basis for normalization.
///
/// Both sides are always positive: the dimension extractor falls back to
/// its default instead of producing zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents, i.e. the document center.
    #[inline]
    pub fn half(self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A straight edge in native document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// One stroked segment in output coordinates.
///
/// Corner names are positional: `tl`/`tr` sit on the `+perpendicular` side
/// of the segment (start, end), `br`/`bl` on the other side (end, start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub tl: DVec2,
    pub tr: DVec2,
    pub br: DVec2,
    pub bl: DVec2,
}

impl Quad {
    /// All four corners on a single point.
    pub fn degenerate(at: DVec2) -> Self {
        Self {
            tl: at,
            tr: at,
            br: at,
            bl: at,
        }
    }

    /// Corners in output order.
    pub fn corners(&self) -> [DVec2; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    pub fn is_degenerate(&self) -> bool {
        self.corners().iter().all(|c| *c == self.tl)
    }
}
