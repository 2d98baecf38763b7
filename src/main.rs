//! sightquads CLI
//!
//! Convert an SVG file into a `drawQuads` block.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use miette::{Report, Result};
use sightquads::pipeline::defaults;
use sightquads::{ConvertOptions, convert_file};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sightquads")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert SVG line-art into drawQuads stroke quads", long_about = None)]
struct Cli {
    /// SVG file to convert
    input: PathBuf,

    /// Output file, or `-` for stdout
    #[arg(short, long, default_value = defaults::OUTPUT_FILE)]
    output: String,

    /// Scale applied to the normalized canvas
    #[arg(short, long, default_value_t = defaults::SCALE_FACTOR)]
    #[arg(value_parser = parse_real, allow_negative_numbers = true)]
    scale: f64,

    /// Horizontal offset added after scaling
    #[arg(short = 'x', long, default_value_t = defaults::X_OFFSET)]
    #[arg(value_parser = parse_real, allow_negative_numbers = true)]
    x_offset: f64,

    /// Vertical offset added after scaling
    #[arg(short = 'y', long, default_value_t = defaults::Y_OFFSET)]
    #[arg(value_parser = parse_real, allow_negative_numbers = true)]
    y_offset: f64,

    /// Multiplier for the stroke width
    #[arg(short, long, default_value_t = defaults::THICKNESS_MULTIPLIER)]
    #[arg(value_parser = parse_real, allow_negative_numbers = true)]
    thickness: f64,

    /// Stroke width for a multiplier of 1
    #[arg(long, default_value_t = defaults::BASE_THICKNESS, value_parser = parse_real)]
    base_thickness: f64,

    /// Size assumed when the document has no usable width or height
    #[arg(long, default_value_t = defaults::DIMENSION, value_parser = parse_real)]
    default_dimension: f64,

    /// Straight pieces per Bézier curve (1 draws the chord)
    #[arg(long, default_value_t = defaults::CURVE_SEGMENTS)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    curve_segments: u32,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_real(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    sightquads::types::finite(value).map_err(|err| format!("`{raw}`: {err}"))
}

/// Skipped elements are printed as reports below, so their log lines are
/// left out unless asked for.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn,sightquads::pipeline=error"
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    let options = ConvertOptions::new()
        .with_scale_factor(cli.scale)
        .with_offset(cli.x_offset, cli.y_offset)
        .with_thickness_multiplier(cli.thickness)
        .with_base_thickness(cli.base_thickness)
        .with_default_dimension(cli.default_dimension)
        .with_curve_segments(cli.curve_segments);

    let mut conversion = convert_file(&cli.input, &options)?;

    let skipped = std::mem::take(&mut conversion.skipped);
    let skipped_count = skipped.len();
    for element in skipped {
        eprintln!("{:?}", Report::new(element));
    }

    if cli.output == "-" {
        conversion.write_to(io::stdout().lock(), "stdout")?;
    } else {
        conversion.write_to_path(&cli.output)?;
        eprintln!("Saved to: {}", cli.output);
    }

    eprintln!(
        "{} written, {} skipped",
        plural(conversion.quads.len(), "quad"),
        plural(skipped_count, "element")
    );
    Ok(())
}
