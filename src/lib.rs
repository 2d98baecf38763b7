//! Convert SVG line-art into `drawQuads` blocks.
//!
//! Every straight edge of every `polygon`, `polyline` and `path` becomes a
//! thin quad of constant width in a canvas centered on the origin. Curves are
//! drawn as their chord unless [`ConvertOptions::curve_segments`] asks for
//! more pieces.
//!
//! ```no_run
//! use sightquads::{ConvertOptions, convert_to_file};
//!
//! let options = ConvertOptions::new().with_scale_factor(0.5).with_thickness_multiplier(2.0);
//! convert_to_file("reticle.svg", "output.txt", &options)?;
//! # Ok::<(), sightquads::ConvertError>(())
//! ```

pub mod document;
pub mod errors;
pub mod log;
pub mod pipeline;
pub mod types;

use std::path::{Path, PathBuf};

pub use document::{Document, extract_dimension};
pub use errors::{ConvertError, ElementError, SkippedElement, UnreadableDocument};
pub use pipeline::serialize::DrawQuads;
pub use pipeline::{Conversion, ConvertOptions, run};
pub use types::{Dimensions, Quad, Segment};

/// Convert an SVG document held in memory. `name` is only used in diagnostics.
pub fn convert_str(
    name: &str,
    svg: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let document = Document::parse(name, svg)?;
    Ok(run(&document, options))
}

/// Convert the SVG document at `path`.
pub fn convert_file(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let document = Document::open(path)?;
    Ok(run(&document, options))
}

/// Convert the SVG document at `path` and return the `drawQuads` text.
pub fn convert_to_string(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    Ok(convert_file(path, options)?.to_draw_quads())
}

/// Convert `input` and write the `drawQuads` text to `output`.
///
/// Returns the path that was written.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<PathBuf, ConvertError> {
    let conversion = convert_file(input, options)?;
    let output = output.as_ref();
    conversion.write_to_path(output)?;
    Ok(output.to_path_buf())
}
