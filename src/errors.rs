//! Error types with rich diagnostics using miette
//!
//! Only two kinds of failure ever reach the caller: the input document cannot
//! be read, or the output cannot be written. Problems inside a single shape
//! element are reported as warnings and never abort a conversion.

use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text, shared by every diagnostic that quotes it
    pub source: Arc<str>,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source: String = source.into();
        Self {
            name: name.into(),
            source: Arc::from(source),
        }
    }

    /// Create a NamedSource for miette. The text is not copied.
    pub fn named_source(&self) -> NamedSource<Arc<str>> {
        NamedSource::new(&self.name, Arc::clone(&self.source))
    }
}

// ============================================================================
// Fatal Errors
// ============================================================================

/// Errors that abort a conversion
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    /// The input could not be opened or is not an SVG document
    #[error(transparent)]
    #[diagnostic(transparent)]
    DocumentUnreadable(#[from] UnreadableDocument),

    /// The destination could not be written. The quads are still available
    /// from the [`Conversion`](crate::Conversion) and can be written elsewhere.
    #[error("cannot write output to {target}")]
    #[diagnostic(
        code(sightquads::output::unwritable),
        help("pick another destination; the converted quads are kept")
    )]
    OutputTargetUnwritable {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a document could not be read
#[derive(Error, Diagnostic, Debug)]
pub enum UnreadableDocument {
    #[error("cannot read {name}")]
    #[diagnostic(code(sightquads::document::io))]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not well-formed markup: {message}")]
    #[diagnostic(code(sightquads::document::malformed))]
    Malformed {
        name: String,
        message: String,
        #[source_code]
        src: NamedSource<Arc<str>>,
        #[label("parsing stopped here")]
        span: SourceSpan,
    },

    #[error("{name} has no <svg> element")]
    #[diagnostic(
        code(sightquads::document::missing_svg),
        help("the document must contain an <svg> element with width and height")
    )]
    MissingSvgElement { name: String },
}

// ============================================================================
// Per-element Errors
// ============================================================================

/// Why a single shape element produced no segments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("path data is unparseable: {message}")]
    PathDataUnparseable { message: String },

    #[error("point `{token}` is not an `x,y` pair of finite numbers")]
    PointsUnparseable { token: String },
}

/// A shape element that was dropped from the output
#[derive(Error, Diagnostic, Debug)]
#[error("skipped <{tag}> element")]
#[diagnostic(code(sightquads::element::skipped), severity(Warning))]
pub struct SkippedElement {
    pub tag: &'static str,
    #[source]
    pub reason: ElementError,
    #[source_code]
    pub src: NamedSource<Arc<str>>,
    #[label("this element contributes no quads")]
    pub span: SourceSpan,
}
