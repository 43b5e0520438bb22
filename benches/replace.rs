//! Benchmarks for the emoji rewriting pass.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use emojify::{EmojiTable, Overrides, Rewriter, parse_fragment, scan};

/// A comment thread worth of markup: shortcodes, glyphs, code and near misses.
fn sample_html() -> String {
    let post = concat!(
        "<p>To the 🍿 thread! :musical_note: <em>:po:popcor:corn:n:</em></p>",
        "<p><a href=\":book:\">:book:</a> :mag: Look it up:exclamation:</p>",
        "<p>👨\u{200D}👩\u{200D}👧 and 🏳\u{FE0F}\u{200D}🌈 at 12:30 or 14:45</p>",
        "<pre><code>let x = a::b::c(:fire:);</code></pre>",
        "<!-- :horse_racing: --><p>Plain prose with no emoji at all, just words.</p>",
    );
    post.repeat(200)
}

/// Long text runs dense with colons that never pair into a shortcode.
fn colon_heavy_text() -> String {
    "12:30:45 a:b:c:d::e 🏇 ".repeat(500)
}

// ============================================================================
// Scanner Benchmarks
// ============================================================================

fn bench_scan_colons(c: &mut Criterion) {
    let text = colon_heavy_text();
    let table = EmojiTable::bundled();

    c.bench_function("scan_colons", |b| {
        b.iter(|| scan(&text, table));
    });
}

// ============================================================================
// Rewrite Benchmarks
// ============================================================================

fn bench_replace_html(c: &mut Criterion) {
    let html = sample_html();

    c.bench_function("replace_html", |b| {
        b.iter(|| emojify::replace_html(&html).unwrap());
    });
}

fn bench_replace_tree(c: &mut Criterion) {
    let html = sample_html();
    let rewriter = Rewriter::new(EmojiTable::bundled());

    c.bench_function("replace_tree", |b| {
        b.iter_batched(
            || parse_fragment(&html),
            |(mut dom, nodes)| rewriter.replace(&mut dom, &nodes).unwrap(),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_replace_overrides(c: &mut Criterion) {
    let html = sample_html();
    let overrides = Overrides::new(EmojiTable::bundled()).with_custom("wtf", |dom, _| {
        Ok(dom.create_text("wtf"))
    });
    let rewriter = Rewriter::new(&overrides);

    c.bench_function("replace_overrides", |b| {
        b.iter(|| rewriter.replace_html(&html).unwrap());
    });
}

criterion_group!(
    benches,
    // Scanner
    bench_scan_colons,
    // Rewriter
    bench_replace_html,
    bench_replace_tree,
    bench_replace_overrides,
);
criterion_main!(benches);
