//! End-to-end conversion tests
//!
//! Run with: cargo test --test convert

use std::path::PathBuf;

use glam::dvec2;
use regex_lite::Regex;
use sightquads::{
    ConvertError, ConvertOptions, ElementError, UnreadableDocument, convert_file, convert_str,
    convert_to_file, convert_to_string,
};

/// One parsed `quad { ... }` block: corner names with their coordinates
type QuadBlock = Vec<(String, f64, f64)>;

/// Parse generated text back into quad blocks, checking the outer frame.
fn parse_draw_quads(text: &str) -> Vec<QuadBlock> {
    assert!(text.starts_with("drawQuads {\n"), "missing header:\n{text}");
    assert!(text.ends_with("\n}\n"), "missing footer:\n{text}");

    let block_re =
        Regex::new(r"(?m)^    quad \{\n((?:        .*\n){4})    \}$").expect("block regex");
    let corner_re = Regex::new(r"^        (tl|tr|br|bl):p2 = (-?\d+\.\d{6}), (-?\d+\.\d{6});$")
        .expect("corner regex");

    block_re
        .captures_iter(text)
        .map(|block| {
            block[1]
                .lines()
                .map(|line| {
                    let c = corner_re
                        .captures(line)
                        .unwrap_or_else(|| panic!("bad corner line: {line:?}"));
                    (
                        c[1].to_string(),
                        c[2].parse().expect("x"),
                        c[3].parse().expect("y"),
                    )
                })
                .collect()
        })
        .collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sightquads-{}-{name}", std::process::id()))
}

const TRIANGLES: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000px" height="1000px">
  <polygon points="100,100 900,100 500,800"/>
  <g>
    <polyline points="0,500 250,500 250,750"/>
  </g>
  <path d="M 500 0 L 500 1000"/>
</svg>"#;

#[test]
fn horizontal_line_through_center() {
    let svg = r#"<svg width="1000" height="1000"><polyline points="0,500 1000,500"/></svg>"#;
    let conversion = convert_str("center.svg", svg, &ConvertOptions::default()).expect("converts");

    insta::assert_snapshot!(conversion.to_draw_quads(), @r"
drawQuads {
    quad {
        tl:p2 = -1.000000, 0.001000;
        tr:p2 = 1.000000, 0.001000;
        br:p2 = 1.000000, -0.001000;
        bl:p2 = -1.000000, -0.001000;
    }
}
");
}

#[test]
fn top_edge_line_is_half_thickness_from_edge() {
    let svg = r#"<svg width="1000" height="1000"><polyline points="0,0 1000,0"/></svg>"#;
    let text = convert_str("top.svg", svg, &ConvertOptions::default())
        .expect("converts")
        .to_draw_quads();

    let blocks = parse_draw_quads(&text);
    assert_eq!(blocks.len(), 1);
    let ys: Vec<f64> = blocks[0].iter().map(|(_, _, y)| *y).collect();
    let xs: Vec<f64> = blocks[0].iter().map(|(_, x, _)| *x).collect();
    assert_eq!(ys, [-0.999, -0.999, -1.001, -1.001]);
    assert_eq!(xs, [-1.0, 1.0, 1.0, -1.0]);
}

#[test]
fn output_round_trips_block_structure() {
    let conversion =
        convert_str("triangles.svg", TRIANGLES, &ConvertOptions::default()).expect("converts");
    // polygon 3 + polyline 2 + path move and line 2
    assert_eq!(conversion.quads.len(), 7);

    let blocks = parse_draw_quads(&conversion.to_draw_quads());
    assert_eq!(blocks.len(), conversion.quads.len());
    for (block, quad) in blocks.iter().zip(&conversion.quads) {
        let names: Vec<&str> = block.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["tl", "tr", "br", "bl"]);
        for ((_, x, y), corner) in block.iter().zip(quad.corners()) {
            assert!((x - corner.x).abs() <= 1e-6, "x {x} vs {}", corner.x);
            assert!((y - corner.y).abs() <= 1e-6, "y {y} vs {}", corner.y);
        }
    }
}

#[test]
fn polygon_closing_edge_comes_last() {
    let svg = r#"<svg width="20" height="20"><polygon points="0,0 10,0 10,10"/></svg>"#;
    let conversion = convert_str("tri.svg", svg, &ConvertOptions::default()).expect("converts");
    assert_eq!(conversion.quads.len(), 3);

    // (10,10) -> (0,0) normalizes to (0,0) -> (-1,-1)
    let closing = conversion.quads[2];
    let mid = (closing.tl + closing.br) / 2.0;
    assert!((mid.x + 0.5).abs() < 1e-12 && (mid.y + 0.5).abs() < 1e-12, "{mid}");
}

#[test]
fn unparseable_path_does_not_stop_other_elements() {
    let svg = r#"<svg width="100" height="100">
        <polyline points="0,0 100,100"/>
        <path d="M 10 10 L ?? 20"/>
        <polygon points="0,0 50,0 50,50"/>
    </svg>"#;
    let conversion = convert_str("mixed.svg", svg, &ConvertOptions::default()).expect("converts");

    assert_eq!(conversion.quads.len(), 1 + 3);
    assert_eq!(conversion.skipped.len(), 1);
    let skipped = &conversion.skipped[0];
    assert_eq!(skipped.tag, "path");
    assert!(matches!(skipped.reason, ElementError::PathDataUnparseable { .. }));
    assert!(svg[skipped.span.offset()..].starts_with("<path"));
}

#[test]
fn missing_dimensions_fall_back_to_default() {
    let svg = r#"<svg><polyline points="500,500 1000,500"/></svg>"#;
    let conversion = convert_str("nosize.svg", svg, &ConvertOptions::default()).expect("converts");
    assert_eq!(conversion.dimensions.width, 1000.0);
    assert_eq!(conversion.dimensions.height, 1000.0);
    assert_eq!(conversion.quads[0].tl.x, 0.0);
    assert_eq!(conversion.quads[0].tr.x, 1.0);
}

#[test]
fn configured_default_dimension_is_used() {
    let svg = r#"<svg width="auto"><polyline points="0,0 50,50"/></svg>"#;
    let options = ConvertOptions::new().with_default_dimension(100.0);
    let conversion = convert_str("auto.svg", svg, &options).expect("converts");
    assert_eq!(conversion.dimensions.width, 100.0);
    assert_eq!(conversion.dimensions.height, 100.0);

    // (0,0) -> (50,50) normalizes to (-1,-1) -> (0,0)
    let quad = conversion.quads[0];
    let mid = (quad.tl + quad.br) / 2.0;
    assert!(mid.distance(dvec2(-0.5, -0.5)) < 1e-12, "{mid}");
}

#[test]
fn scale_offset_and_thickness_apply() {
    let svg = r#"<svg width="100" height="100"><polyline points="0,50 100,50"/></svg>"#;
    let options = ConvertOptions::new()
        .with_scale_factor(0.5)
        .with_offset(0.25, -0.25)
        .with_thickness_multiplier(10.0);
    let quad = convert_str("p.svg", svg, &options).expect("converts").quads[0];

    assert!((quad.tl.x - -0.25).abs() < 1e-12);
    assert!((quad.tr.x - 0.75).abs() < 1e-12);
    assert!((quad.tl.y - (-0.25 + 0.01)).abs() < 1e-12);
    assert!((quad.bl.y - (-0.25 - 0.01)).abs() < 1e-12);
}

#[test]
fn negative_thickness_inverts_quad() {
    let svg = r#"<svg width="100" height="100"><polyline points="0,50 100,50"/></svg>"#;
    let quad = convert_str("n.svg", svg, &ConvertOptions::new().with_thickness_multiplier(-1.0))
        .expect("converts")
        .quads[0];
    assert!(quad.tl.y < quad.bl.y);
}

#[test]
fn curve_flattening_adds_quads() {
    let svg = r#"<svg width="100" height="100"><path d="M0 50 Q 50 0 100 50"/></svg>"#;
    let chord = convert_str("c.svg", svg, &ConvertOptions::default()).expect("converts");
    let options = ConvertOptions::new().with_curve_segments(16);
    let smooth = convert_str("c.svg", svg, &options).expect("converts");
    assert_eq!(chord.quads.len(), 2);
    assert_eq!(smooth.quads.len(), 17);
}

#[test]
fn file_and_string_outputs_agree() {
    let input = temp_path("agree.svg");
    let output = temp_path("agree.txt");
    std::fs::write(&input, TRIANGLES).expect("write input");

    let options = ConvertOptions::default();
    let text = convert_to_string(&input, &options).expect("string output");
    let written = convert_to_file(&input, &output, &options).expect("file output");
    assert_eq!(written, output);
    assert_eq!(std::fs::read_to_string(&output).expect("read output"), text);

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn unwritable_output_keeps_the_conversion() {
    let input = temp_path("retry.svg");
    std::fs::write(&input, TRIANGLES).expect("write input");
    let conversion = convert_file(&input, &ConvertOptions::default()).expect("converts");

    let bad = temp_path("missing-dir").join("nested").join("out.txt");
    let err = conversion.write_to_path(&bad).expect_err("parent directory does not exist");
    assert!(matches!(err, ConvertError::OutputTargetUnwritable { .. }), "{err:?}");

    let good = temp_path("retry.txt");
    conversion.write_to_path(&good).expect("retry elsewhere");
    assert_eq!(
        parse_draw_quads(&std::fs::read_to_string(&good).expect("read output")).len(),
        conversion.quads.len()
    );

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&good);
}

#[test]
fn unreadable_documents_are_fatal() {
    let missing = convert_file(temp_path("does-not-exist.svg"), &ConvertOptions::default());
    assert!(matches!(
        missing,
        Err(ConvertError::DocumentUnreadable(UnreadableDocument::Io { .. }))
    ));

    let broken = convert_str(
        "broken.svg",
        "<svg><polyline points='0,0 1,1'></svg>",
        &ConvertOptions::default(),
    );
    assert!(matches!(
        broken,
        Err(ConvertError::DocumentUnreadable(UnreadableDocument::Malformed { .. }))
    ));

    let empty = convert_str("empty.svg", "", &ConvertOptions::default());
    assert!(matches!(empty, Err(ConvertError::DocumentUnreadable(_))));
}

#[test]
fn empty_document_yields_empty_block() {
    let svg = r#"<svg width="10" height="10"/>"#;
    let conversion = convert_str("blank.svg", svg, &ConvertOptions::default()).expect("converts");
    assert!(conversion.quads.is_empty());
    assert_eq!(conversion.to_draw_quads(), "drawQuads {\n}\n");
}

#[test]
fn repeated_conversions_are_independent() {
    let options = ConvertOptions::default();
    let first = convert_str("a.svg", TRIANGLES, &options).expect("converts").to_draw_quads();
    let second = convert_str("a.svg", TRIANGLES, &options).expect("converts").to_draw_quads();
    assert_eq!(first, second);
}
