//! SVG document loading
//!
//! The document is read fully into memory, parsed once, and reduced to what
//! the pipeline needs: the raw `width`/`height` of the first `<svg>` element
//! and every polygon, polyline and path in document order. The XML tree is
//! dropped before [`Document::parse`] returns.

use std::fs;
use std::path::Path;

use crate::errors::{SourceContext, UnreadableDocument};
use crate::log::debug;
use crate::pipeline::defaults;
use crate::pipeline::shapes::{PathShape, PolygonShape, PolylineShape, ShapeElement};
use crate::types::Dimensions;

/// A parsed input document
#[derive(Debug, Clone)]
pub struct Document {
    source: SourceContext,
    width: Option<String>,
    height: Option<String>,
    elements: Vec<ShapeElement>,
}

impl Document {
    /// Read and parse a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UnreadableDocument> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| UnreadableDocument::Io {
            name: name.clone(),
            source,
        })?;
        Self::parse(name, text)
    }

    /// Parse a document held in memory. `name` is only used in diagnostics.
    pub fn parse(
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, UnreadableDocument> {
        let source = SourceContext::new(name, text);

        let (width, height, elements) = {
            let options = roxmltree::ParsingOptions {
                allow_dtd: true,
                ..Default::default()
            };
            let xml = roxmltree::Document::parse_with_options(&source.source, options)
                .map_err(|err| malformed(&source, &err))?;

            let svg = xml
                .descendants()
                .find(|n| n.is_element() && n.tag_name().name() == "svg")
                .ok_or_else(|| UnreadableDocument::MissingSvgElement {
                    name: source.name.clone(),
                })?;
            let width = svg.attribute("width").map(str::to_owned);
            let height = svg.attribute("height").map(str::to_owned);

            let elements: Vec<ShapeElement> = xml
                .descendants()
                .filter(|n| n.is_element())
                .filter_map(|node| {
                    let span = node.range();
                    let points = || node.attribute("points").unwrap_or("");
                    let element: ShapeElement = match node.tag_name().name() {
                        "polygon" => PolygonShape::new(points(), span).into(),
                        "polyline" => PolylineShape::new(points(), span).into(),
                        "path" => PathShape::new(node.attribute("d").unwrap_or(""), span).into(),
                        _ => return None,
                    };
                    Some(element)
                })
                .collect();

            (width, height, elements)
        };

        debug!(
            "loaded {}: width={:?} height={:?} elements={}",
            source.name,
            width,
            height,
            elements.len()
        );

        Ok(Self {
            source,
            width,
            height,
            elements,
        })
    }

    /// Name given when the document was loaded
    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// Source text and name, for diagnostics
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Supported shape elements in document order
    pub fn elements(&self) -> &[ShapeElement] {
        &self.elements
    }

    /// The normalization basis, falling back to `default` for each side
    /// that is missing or unusable.
    pub fn dimensions(&self, default: f64) -> Dimensions {
        let extract =
            |raw: &Option<String>| extract_dimension(raw.as_deref().unwrap_or(""), default);
        Dimensions::new(extract(&self.width), extract(&self.height))
    }
}

/// Read a length attribute like `"100px"` or `"512"` as a positive number.
///
/// Everything except ASCII digits and `.` is dropped before parsing, so units
/// and signs disappear. Anything that does not end up as a positive finite
/// number yields `default`; a `default` that is itself unusable is replaced
/// by [`defaults::DIMENSION`].
pub fn extract_dimension(raw: &str, default: f64) -> f64 {
    let default = if default.is_finite() && default > 0.0 {
        default
    } else {
        defaults::DIMENSION
    };

    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match kept.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => default,
    }
}

fn malformed(source: &SourceContext, err: &roxmltree::Error) -> UnreadableDocument {
    let pos = err.pos();
    let offset = byte_offset(&source.source, pos.row, pos.col);
    UnreadableDocument::Malformed {
        name: source.name.clone(),
        message: err.to_string(),
        src: source.named_source(),
        span: (offset, 0).into(),
    }
}

/// Convert a 1-based row/column (columns in chars) to a byte offset.
fn byte_offset(text: &str, row: u32, col: u32) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(row.saturating_sub(1) as usize)
        .map(str::len)
        .sum();
    let line = &text[line_start..];
    let within = line
        .char_indices()
        .nth(col.saturating_sub(1) as usize)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    line_start + within
}
