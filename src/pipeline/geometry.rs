//! Geometry: normalization, quad expansion and curve evaluation

use glam::DVec2;

use crate::types::{Dimensions, Quad};

/// Maps native document coordinates into the output space.
///
/// The document center lands on the origin and the document edges on
/// `±scale_factor` before `offset` is added. Each axis uses its own half
/// extent, so non-square documents are stretched to a square canvas.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    center: DVec2,
    scale_factor: f64,
    offset: DVec2,
}

impl Normalizer {
    pub fn new(dimensions: Dimensions, scale_factor: f64, offset: DVec2) -> Self {
        Self {
            center: dimensions.half(),
            scale_factor,
            offset,
        }
    }

    #[inline]
    pub fn apply(&self, point: DVec2) -> DVec2 {
        (point - self.center) / self.center * self.scale_factor + self.offset
    }
}

/// Expand a segment into a rectangle `width` wide, centered on the segment.
///
/// Corners come out as `start + perp, end + perp, end - perp, start - perp`
/// where `perp` is the segment direction rotated by +90° and scaled to
/// `width / 2`. A zero-length segment collapses to a point. A negative
/// `width` swaps the two long sides.
pub fn edge_to_quad(start: DVec2, end: DVec2, width: f64) -> Quad {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return Quad::degenerate(start);
    }

    let perp = DVec2::new(-(dy / length) * width / 2.0, (dx / length) * width / 2.0);
    Quad {
        tl: start + perp,
        tr: end + perp,
        br: end - perp,
        bl: start - perp,
    }
}

/// Point at `t` on a quadratic Bézier
pub fn quadratic_point(p0: DVec2, ctrl: DVec2, p1: DVec2, t: f64) -> DVec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt) + ctrl * (2.0 * mt * t) + p1 * (t * t)
}

/// Point at `t` on a cubic Bézier
pub fn cubic_point(p0: DVec2, c1: DVec2, c2: DVec2, p1: DVec2, t: f64) -> DVec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + c1 * (3.0 * mt * mt * t) + c2 * (3.0 * mt * t * t) + p1 * (t * t * t)
}

/// Reflect a control point through `about`, as smooth curve commands do
#[inline]
pub fn reflect(ctrl: DVec2, about: DVec2) -> DVec2 {
    about * 2.0 - ctrl
}
