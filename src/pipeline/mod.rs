//! The geometry pipeline
//!
//! This module is organized into submodules:
//! - `defaults`: Default parameter values
//! - `shapes`: Shape elements and their decomposition into segments
//! - `geometry`: Normalization and quad expansion
//! - `serialize`: `drawQuads` text generation
//!
//! [`run`] drives them in order for one document. It keeps no state between
//! calls; everything it needs comes from the [`Document`] and the
//! [`ConvertOptions`].

pub mod defaults;
pub mod geometry;
pub mod serialize;
pub mod shapes;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::{DVec2, dvec2};

use crate::document::Document;
use crate::errors::{ConvertError, SkippedElement};
use crate::log::{debug, warn};
use crate::types::{Dimensions, Quad};
use geometry::{Normalizer, edge_to_quad};
use serialize::DrawQuads;
use shapes::Decompose;

/// Parameters for one conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Multiplier applied to normalized coordinates before the offset
    pub scale_factor: f64,
    /// Added to every normalized point
    pub offset: DVec2,
    /// Multiplier applied to `base_thickness`
    pub thickness_multiplier: f64,
    /// Stroke width in output units for a multiplier of 1
    pub base_thickness: f64,
    /// Width/height used when the document does not declare a usable one
    pub default_dimension: f64,
    /// Pieces per Bézier curve; 1 draws the chord from start to end
    pub curve_segments: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scale_factor: defaults::SCALE_FACTOR,
            offset: dvec2(defaults::X_OFFSET, defaults::Y_OFFSET),
            thickness_multiplier: defaults::THICKNESS_MULTIPLIER,
            base_thickness: defaults::BASE_THICKNESS,
            default_dimension: defaults::DIMENSION,
            curve_segments: defaults::CURVE_SEGMENTS,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = dvec2(x, y);
        self
    }

    pub fn with_thickness_multiplier(mut self, multiplier: f64) -> Self {
        self.thickness_multiplier = multiplier;
        self
    }

    pub fn with_base_thickness(mut self, thickness: f64) -> Self {
        self.base_thickness = thickness;
        self
    }

    pub fn with_default_dimension(mut self, dimension: f64) -> Self {
        self.default_dimension = dimension;
        self
    }

    pub fn with_curve_segments(mut self, segments: u32) -> Self {
        self.curve_segments = segments;
        self
    }

    /// Final quad width in output units
    pub fn stroke_width(&self) -> f64 {
        self.base_thickness * self.thickness_multiplier
    }
}

/// The result of converting one document
#[derive(Debug)]
pub struct Conversion {
    /// Normalization basis that was used
    pub dimensions: Dimensions,
    /// One quad per segment, in discovery order
    pub quads: Vec<Quad>,
    /// Elements that contributed nothing because their data was unparseable
    pub skipped: Vec<SkippedElement>,
}

impl Conversion {
    /// The quads as a displayable `drawQuads` block
    pub fn draw_quads(&self) -> DrawQuads<'_> {
        DrawQuads(&self.quads)
    }

    /// The full `drawQuads` text
    pub fn to_draw_quads(&self) -> String {
        self.draw_quads().to_string()
    }

    /// Write the `drawQuads` text to any writer. `target` names the
    /// destination in the error if writing fails.
    pub fn write_to(&self, mut writer: impl Write, target: &str) -> Result<(), ConvertError> {
        let unwritable = |source: std::io::Error| ConvertError::OutputTargetUnwritable {
            target: target.to_string(),
            source,
        };
        write!(writer, "{}", self.draw_quads()).map_err(unwritable)?;
        writer.flush().map_err(unwritable)
    }

    /// Create (or truncate) `path` and write the `drawQuads` text to it.
    ///
    /// Takes `&self`, so a failed write can be retried elsewhere.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();
        let target = path.display().to_string();
        let file = File::create(path).map_err(|source| ConvertError::OutputTargetUnwritable {
            target: target.clone(),
            source,
        })?;
        self.write_to(BufWriter::new(file), &target)
    }
}

/// Convert every shape element of `document` into quads.
///
/// Elements whose data cannot be parsed are recorded in
/// [`Conversion::skipped`] and do not affect the others.
pub fn run(document: &Document, options: &ConvertOptions) -> Conversion {
    let dimensions = document.dimensions(options.default_dimension);
    let normalizer = Normalizer::new(dimensions, options.scale_factor, options.offset);
    let width = options.stroke_width();
    debug!(
        "converting {} at {}x{}, stroke width {}",
        document.name(),
        dimensions.width,
        dimensions.height,
        width
    );

    let mut quads = Vec::new();
    let mut skipped = Vec::new();

    for element in document.elements() {
        match element.segments(options.curve_segments) {
            Ok(segments) => {
                quads.extend(segments.iter().map(|segment| {
                    edge_to_quad(
                        normalizer.apply(segment.start),
                        normalizer.apply(segment.end),
                        width,
                    )
                }));
            }
            Err(reason) => {
                warn!("skipping <{}> element: {}", element.tag(), reason);
                let span = element.span();
                skipped.push(SkippedElement {
                    tag: element.tag(),
                    reason,
                    src: document.source().named_source(),
                    span: (span.start, span.len()).into(),
                });
            }
        }
    }

    debug!("{} quads, {} elements skipped", quads.len(), skipped.len());

    Conversion {
        dimensions,
        quads,
        skipped,
    }
}
