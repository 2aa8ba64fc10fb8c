//! Benchmarks for glyph run layout and shading

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ember_render::{Color, TextureHandle};
use ember_text::{
    BitmapFont, GlyphColors, GlyphMetrics, GlyphRun, LineBreaker, TextAlign, TextLayout, UvRect,
};

fn font() -> BitmapFont {
    let glyphs = (' '..='~').enumerate().map(|(i, ch)| {
        let left = i as f32 / 128.0;
        let width = if ch.is_ascii_uppercase() { 12.0 } else { 9.0 };
        (
            ch,
            GlyphMetrics {
                width,
                uv: UvRect::new(left, 0.0, left + width / 1024.0, 0.125),
            },
        )
    });
    BitmapFont::from_parts(glyphs, 18.0, TextureHandle::new(1), 1024).with_bearing(1.0, 1.0)
}

fn bench_build_lengths(c: &mut Criterion) {
    let font = font();
    let mut group = c.benchmark_group("build_lengths");

    let long_text = "Lorem ipsum dolor sit amet. ".repeat(20);
    let texts: Vec<(&str, &str)> = vec![
        ("single_word", "Hello"),
        ("short_sentence", "Hello, World!"),
        ("medium_text", "The quick brown fox jumps over the lazy dog"),
        ("long_text", &long_text),
    ];

    let layout = TextLayout::new(320.0, f32::INFINITY);
    for (name, content) in texts {
        group.throughput(Throughput::Elements(content.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| black_box(GlyphRun::build(&font, black_box(content), &layout)))
        });
    }

    group.finish();
}

fn bench_build_alignments(c: &mut Criterion) {
    let font = font();
    let mut group = c.benchmark_group("build_alignments");
    let content = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(8);

    for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right, TextAlign::Justified] {
        let layout = TextLayout::new(240.0, f32::INFINITY).align(align);
        group.bench_with_input(BenchmarkId::from_parameter(align), &layout, |b, layout| {
            b.iter(|| black_box(GlyphRun::build(&font, &content, layout)))
        });
    }

    group.finish();
}

fn bench_line_breaking(c: &mut Criterion) {
    let font = font();
    let breaker = LineBreaker::new(&font);
    let mut group = c.benchmark_group("line_breaking");
    let content = "Sphinx of black quartz, judge my vow. ".repeat(30);

    for width in [80.0_f32, 160.0, 320.0, 640.0] {
        group.bench_with_input(BenchmarkId::from_parameter(width as u32), &width, |b, &width| {
            b.iter(|| black_box(breaker.lines(&content, width).count()))
        });
    }

    group.finish();
}

fn bench_shading(c: &mut Criterion) {
    let font = font();
    let content = "Lorem ipsum dolor sit amet. ".repeat(20);
    let layout = TextLayout::new(320.0, f32::INFINITY);
    let mut run = GlyphRun::build(&font, &content, &layout).expect("Failed to lay out text");
    let height = run.height();

    c.bench_function("color_shader", |b| {
        b.iter(|| {
            run.apply_color_shader(|quad| {
                let t = quad.top() / height;
                GlyphColors::vertical_gradient(
                    Color::WHITE.lerp(Color::BLACK, t),
                    Color::WHITE.lerp(Color::BLACK, quad.bottom() / height),
                )
            })
        })
    });
}

criterion_group!(
    benches,
    bench_build_lengths,
    bench_build_alignments,
    bench_line_breaking,
    bench_shading,
);
criterion_main!(benches);
