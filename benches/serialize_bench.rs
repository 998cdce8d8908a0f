#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use html5out::tree::builder::TreeBuilder;
use html5out::{serialize_document, serialize_html5, Document, SerializeOptions};

// ---------------------------------------------------------------------------
// Document generators
// ---------------------------------------------------------------------------

/// Builds a table with `rows` rows of escaped text and void elements.
fn make_table(rows: usize) -> Document {
    let mut b = TreeBuilder::new();
    b.start_element("html", &[]);
    b.start_element("body", &[]);
    b.start_element("table", &[("class", "data")]);
    for i in 0..rows {
        let id = format!("r{i}");
        b.start_element("tr", &[("id", id.as_str())]);
        b.start_element("td", &[]);
        b.text(&format!("Row {i} & \"quoted\" <value>"));
        b.start_element("br", &[]);
        b.end_element("td");
        b.start_element("td", &[]);
        b.text("café, naïve, résumé");
        b.end_element("td");
        b.end_element("tr");
    }
    b.finish()
}

/// Builds a document dominated by inline SVG, which exercises name
/// normalization and scope switching.
fn make_svg_heavy(shapes: usize) -> Document {
    let mut b = TreeBuilder::new();
    b.start_element("html", &[]);
    b.start_element("body", &[]);
    for i in 0..shapes {
        let x = i.to_string();
        b.start_element("svg", &[("viewbox", "0 0 10 10")]);
        b.start_element("lineargradient", &[("gradientunits", "userSpaceOnUse")]);
        b.end_element("lineargradient");
        b.start_element("rect", &[("x", x.as_str()), ("patternunits", "objectBoundingBox")]);
        b.end_element("rect");
        b.end_element("svg");
        b.start_element("math", &[]);
        b.start_element("mi", &[("definitionurl", "urn:x")]);
        b.text(&x);
        b.end_element("math");
    }
    b.finish()
}

// ---------------------------------------------------------------------------
// Serialization benchmarks
// ---------------------------------------------------------------------------

fn bench_serialize_table(c: &mut Criterion) {
    let doc = make_table(1000);
    let opts = SerializeOptions::default();
    c.bench_function("serialize_table", |b| {
        b.iter(|| serialize_html5(black_box(&doc), &opts).expect("serialize failed"));
    });
}

fn bench_serialize_entities(c: &mut Criterion) {
    let doc = make_table(1000);
    let opts = SerializeOptions::default().encode_entities(true);
    c.bench_function("serialize_table_entities", |b| {
        b.iter(|| serialize_html5(black_box(&doc), &opts).expect("serialize failed"));
    });
}

fn bench_serialize_windows_1252(c: &mut Criterion) {
    let doc = make_table(1000);
    let opts = SerializeOptions::default().encoding("windows-1252");
    c.bench_function("serialize_table_windows_1252", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            serialize_document(black_box(&doc), &mut out, &opts).expect("serialize failed");
            out
        });
    });
}

fn bench_serialize_svg(c: &mut Criterion) {
    let doc = make_svg_heavy(500);
    let opts = SerializeOptions::default();
    c.bench_function("serialize_svg_heavy", |b| {
        b.iter(|| serialize_html5(black_box(&doc), &opts).expect("serialize failed"));
    });
}

criterion_group!(
    serialization,
    bench_serialize_table,
    bench_serialize_entities,
    bench_serialize_windows_1252,
    bench_serialize_svg
);

criterion_main!(serialization);
