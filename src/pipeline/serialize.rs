//! `drawQuads` text generation
//!
//! The renderer that consumes this text matches it line by line, so the
//! layout is fixed: four-space indentation per level, `name:p2 = x, y;`
//! corner lines, and six decimals per coordinate.

use std::fmt;

use glam::DVec2;

use crate::types::Quad;

/// Display adapter that renders a quad list as one `drawQuads` block
#[derive(Debug, Clone, Copy)]
pub struct DrawQuads<'a>(pub &'a [Quad]);

impl fmt::Display for DrawQuads<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "drawQuads {{")?;
        for quad in self.0 {
            write_quad(f, quad)?;
        }
        writeln!(f, "}}")
    }
}

fn write_quad(f: &mut fmt::Formatter<'_>, quad: &Quad) -> fmt::Result {
    writeln!(f, "    quad {{")?;
    for (name, corner) in ["tl", "tr", "br", "bl"].into_iter().zip(quad.corners()) {
        write_corner(f, name, corner)?;
    }
    writeln!(f, "    }}")
}

fn write_corner(f: &mut fmt::Formatter<'_>, name: &str, p: DVec2) -> fmt::Result {
    writeln!(f, "        {name}:p2 = {:.6}, {:.6};", p.x, p.y)
}
