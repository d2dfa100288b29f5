//! Performance benchmarks for response rendering
//!
//! Measures markdown conversion and the incremental reveal as a response
//! streams in fragment by fragment.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cue::adapters::mock::ManualScheduler;
use cue::markdown::{render_markdown, MarkdownCache};
use cue::reveal::{IncrementalRenderer, RevealConfig};

/// Generate an assistant-style answer with varying length
fn generate_response(paragraphs: usize) -> String {
    let paragraph = r#"
A **borrow** lets code use a value without taking ownership of it. See
[the book](https://doc.rust-lang.org/book/) for the full rules.

```rust
fn longest<'a>(x: &'a str, y: &'a str) -> &'a str {
    if x.len() > y.len() { x } else { y }
}
```

- Shared borrows allow many readers
- Mutable borrows allow exactly one writer

"#;

    (0..paragraphs)
        .map(|i| format!("### Point {}\n\n{}", i + 1, paragraph))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes of `text` growing by roughly `step` bytes, as the host streams them.
fn fragments(text: &str, step: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut end = 0;
    while end < text.len() {
        end = (end + step).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        out.push(text[..end].to_string());
    }
    out
}

fn bench_markdown_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_render");

    for size in [1, 5, 25].iter() {
        let content = generate_response(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("uncached", format!("{}_paragraphs", size)),
            &content,
            |b, content| b.iter(|| black_box(render_markdown(black_box(content)))),
        );

        let mut cache = MarkdownCache::new();
        let _ = cache.render(&content);
        group.bench_with_input(
            BenchmarkId::new("cached", format!("{}_paragraphs", size)),
            &content,
            |b, content| b.iter(|| black_box(cache.render(black_box(content)))),
        );
    }

    group.finish();
}

/// Re-render on every fragment, carrying the revealed count forward.
fn bench_streaming_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_reveal");

    for size in [1, 5].iter() {
        let stream = fragments(&generate_response(*size), 40);
        group.throughput(Throughput::Elements(stream.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_paragraphs", size)),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let mut scheduler = ManualScheduler::new();
                    let mut renderer = IncrementalRenderer::new(RevealConfig::default());
                    let mut revealed = 0;
                    for fragment in stream {
                        revealed = renderer
                            .render(black_box(fragment), true, revealed, &mut scheduler)
                            .revealed_count;
                        for task in scheduler.advance(50) {
                            renderer.apply(task, 0);
                        }
                    }
                    black_box(revealed)
                });
            },
        );
    }

    group.finish();
}

/// Styling the visible lines once per frame while words fade in.
fn bench_frame_lines(c: &mut Criterion) {
    let mut scheduler = ManualScheduler::new();
    let mut renderer = IncrementalRenderer::default();
    renderer.render(&generate_response(10), true, 0, &mut scheduler);
    for task in scheduler.advance(2_000) {
        renderer.apply(task, 2_000);
    }

    c.bench_function("frame_lines_mid_reveal", |b| {
        b.iter(|| black_box(renderer.lines(black_box(2_250))))
    });
}

criterion_group!(
    benches,
    bench_markdown_render,
    bench_streaming_reveal,
    bench_frame_lines,
);

criterion_main!(benches);
