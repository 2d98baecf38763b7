//! Default conversion settings

/// Stroke width before the thickness multiplier, in output units
pub const BASE_THICKNESS: f64 = 0.002;
/// Width/height used when the document does not declare a usable one
pub const DIMENSION: f64 = 1000.0;
pub const SCALE_FACTOR: f64 = 1.0;
pub const X_OFFSET: f64 = 0.0;
pub const Y_OFFSET: f64 = 0.0;
pub const THICKNESS_MULTIPLIER: f64 = 1.0;
/// Straight pieces per Bézier curve; 1 draws the chord
pub const CURVE_SEGMENTS: u32 = 1;
/// Output file used when the caller does not name one
pub const OUTPUT_FILE: &str = "output.txt";
