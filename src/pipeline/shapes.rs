//! Shape elements and their decomposition into segments
//!
//! Each supported element type knows how to turn its raw attribute into
//! straight segments in native document coordinates:
//! - `polygon`: consecutive vertex pairs plus a closing edge
//! - `polyline`: consecutive vertex pairs only
//! - `path`: one segment per drawing command that has a start and an end
//!
//! Decomposition is all-or-nothing per element. A bad token anywhere in the
//! attribute makes the element contribute nothing, and the caller carries on
//! with the next one.

use std::ops::Range;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};
use svgtypes::{PathParser, PathSegment};

use super::geometry::{cubic_point, quadratic_point, reflect};
use crate::errors::ElementError;
use crate::types::{Segment, finite};

/// Common behavior for all shape elements
#[enum_dispatch]
pub trait Decompose {
    /// Tag name as it appears in the document
    fn tag(&self) -> &'static str;

    /// Byte range of the element in the document source
    fn span(&self) -> Range<usize>;

    /// Straight segments in drawing order.
    ///
    /// `curve_segments` is how many pieces each Bézier curve is cut into;
    /// values below 2 draw one chord from the curve's start to its end.
    fn segments(&self, curve_segments: u32) -> Result<Vec<Segment>, ElementError>;
}

/// A supported shape element
#[enum_dispatch(Decompose)]
#[derive(Debug, Clone)]
pub enum ShapeElement {
    Polygon(PolygonShape),
    Polyline(PolylineShape),
    Path(PathShape),
}

// ============================================================================
// Polygon / Polyline
// ============================================================================

/// A closed vertex list (`<polygon points="...">`)
#[derive(Debug, Clone)]
pub struct PolygonShape {
    pub points: String,
    pub span: Range<usize>,
}

impl PolygonShape {
    pub fn new(points: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            points: points.into(),
            span,
        }
    }
}

impl Decompose for PolygonShape {
    fn tag(&self) -> &'static str {
        "polygon"
    }

    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn segments(&self, _curve_segments: u32) -> Result<Vec<Segment>, ElementError> {
        let vertices = parse_points(&self.points)?;
        let mut segments = chain(&vertices);
        // Two vertices would only retrace the single edge.
        if let [first, _, .., last] = vertices.as_slice() {
            segments.push(Segment::new(*last, *first));
        }
        Ok(segments)
    }
}

/// An open vertex list (`<polyline points="...">`)
#[derive(Debug, Clone)]
pub struct PolylineShape {
    pub points: String,
    pub span: Range<usize>,
}

impl PolylineShape {
    pub fn new(points: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            points: points.into(),
            span,
        }
    }
}

impl Decompose for PolylineShape {
    fn tag(&self) -> &'static str {
        "polyline"
    }

    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn segments(&self, _curve_segments: u32) -> Result<Vec<Segment>, ElementError> {
        Ok(chain(&parse_points(&self.points)?))
    }
}

/// Parse a `points` attribute: whitespace-separated `x,y` tokens.
fn parse_points(raw: &str) -> Result<Vec<DVec2>, ElementError> {
    raw.split_ascii_whitespace()
        .map(|token| {
            let bad = || ElementError::PointsUnparseable {
                token: token.to_string(),
            };
            let (x, y) = token.split_once(',').ok_or_else(bad)?;
            let coord = |raw: &str| raw.parse::<f64>().ok().and_then(|v| finite(v).ok());
            let x = coord(x).ok_or_else(bad)?;
            let y = coord(y).ok_or_else(bad)?;
            Ok(dvec2(x, y))
        })
        .collect()
}

/// Segments between consecutive vertices
fn chain(vertices: &[DVec2]) -> Vec<Segment> {
    vertices
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect()
}

// ============================================================================
// Path
// ============================================================================

/// A `<path d="...">` element
#[derive(Debug, Clone)]
pub struct PathShape {
    pub data: String,
    pub span: Range<usize>,
}

impl PathShape {
    pub fn new(data: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            data: data.into(),
            span,
        }
    }
}

impl Decompose for PathShape {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn segments(&self, curve_segments: u32) -> Result<Vec<Segment>, ElementError> {
        let commands = PathParser::from(self.data.as_str())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ElementError::PathDataUnparseable {
                message: err.to_string(),
            })?;

        let mut walker = PathWalker::new(curve_segments);
        for command in commands {
            walker.step(command);
        }
        Ok(walker.segments)
    }
}

/// Pen state while walking path commands
struct PathWalker {
    curve_segments: u32,
    current: DVec2,
    subpath_start: DVec2,
    /// Second control point of the previous cubic, for `S`
    last_cubic_ctrl: Option<DVec2>,
    /// Control point of the previous quadratic, for `T`
    last_quad_ctrl: Option<DVec2>,
    segments: Vec<Segment>,
}

impl PathWalker {
    fn new(curve_segments: u32) -> Self {
        Self {
            curve_segments: curve_segments.max(1),
            current: DVec2::ZERO,
            subpath_start: DVec2::ZERO,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
            segments: Vec::new(),
        }
    }

    /// Resolve a coordinate pair against the current point
    fn at(&self, abs: bool, x: f64, y: f64) -> DVec2 {
        if abs {
            dvec2(x, y)
        } else {
            self.current + dvec2(x, y)
        }
    }

    fn step(&mut self, command: PathSegment) {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match command {
            PathSegment::MoveTo { abs, x, y } => {
                // A move is a zero-length segment: it still yields a quad.
                let to = self.at(abs, x, y);
                self.segments.push(Segment::new(to, to));
                self.current = to;
                self.subpath_start = to;
            }
            PathSegment::LineTo { abs, x, y } => {
                let to = self.at(abs, x, y);
                self.line_to(to);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.x + x };
                self.line_to(dvec2(x, self.current.y));
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.y + y };
                self.line_to(dvec2(self.current.x, y));
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let (c1, c2, to) = (self.at(abs, x1, y1), self.at(abs, x2, y2), self.at(abs, x, y));
                self.cubic_to(c1, c2, to);
                cubic_ctrl = Some(c2);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let c1 = self
                    .last_cubic_ctrl
                    .map_or(self.current, |c| reflect(c, self.current));
                let (c2, to) = (self.at(abs, x2, y2), self.at(abs, x, y));
                self.cubic_to(c1, c2, to);
                cubic_ctrl = Some(c2);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let (c, to) = (self.at(abs, x1, y1), self.at(abs, x, y));
                self.quadratic_to(c, to);
                quad_ctrl = Some(c);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let c = self
                    .last_quad_ctrl
                    .map_or(self.current, |c| reflect(c, self.current));
                let to = self.at(abs, x, y);
                self.quadratic_to(c, to);
                quad_ctrl = Some(c);
            }
            PathSegment::EllipticalArc { abs, x, y, .. } => {
                // Arcs are not drawn; the pen still moves to their end.
                self.current = self.at(abs, x, y);
            }
            PathSegment::ClosePath { .. } => {
                self.current = self.subpath_start;
            }
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
    }

    fn line_to(&mut self, to: DVec2) {
        self.segments.push(Segment::new(self.current, to));
        self.current = to;
    }

    fn cubic_to(&mut self, c1: DVec2, c2: DVec2, to: DVec2) {
        let from = self.current;
        self.flatten(|t| cubic_point(from, c1, c2, to, t), to);
    }

    fn quadratic_to(&mut self, ctrl: DVec2, to: DVec2) {
        let from = self.current;
        self.flatten(|t| quadratic_point(from, ctrl, to, t), to);
    }

    /// Emit `curve_segments` chords along `curve`, ending exactly on `to`.
    fn flatten(&mut self, curve: impl Fn(f64) -> DVec2, to: DVec2) {
        let n = self.curve_segments;
        let mut prev = self.current;
        for i in 1..=n {
            let next = if i == n {
                to
            } else {
                curve(f64::from(i) / f64::from(n))
            };
            self.segments.push(Segment::new(prev, next));
            prev = next;
        }
        self.current = to;
    }
}
