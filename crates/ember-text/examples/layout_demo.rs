//! Lays out a paragraph with every alignment and draws it through a surface
//! that logs each call instead of talking to OpenGL ES.
//!
//! Run with `RUST_LOG=trace` to see per-line layout detail.

use std::cell::Cell;

use ember_core::animation::{Animation, LinearAnimation};
use ember_core::geometry::Rect;
use ember_core::{Config, ProfilingMode};
use ember_render::{Capability, Color, RenderSurface, StreamKind, TextureHandle, TextureUnit, VertexStream};
use ember_text::{
    AlphaBitmap, AtlasConfig, BitmapFont, FontRasterizer, GlyphColors, GlyphRun, TextAlign,
    TextLayout,
};

const PARAGRAPH: &str =
    "The quick brown fox jumps over the lazy dog. Pack my box with five dozen liquor jugs.";

/// Narrow block font: every glyph is a filled box, spaces are blank.
struct BlockRasterizer;

impl FontRasterizer for BlockRasterizer {
    fn char_width(&self, ch: char) -> Option<u32> {
        match ch {
            'i' | 'l' | '.' | ',' | '!' => Some(3),
            'm' | 'w' | 'M' | 'W' => Some(8),
            ' '..='~' => Some(6),
            _ => None,
        }
    }

    fn line_height(&self) -> u32 {
        12
    }

    fn trailing(&self) -> u32 {
        1
    }

    fn draw_glyph(&self, ch: char, canvas: &mut AlphaBitmap, x: u32, y: u32) {
        if ch == ' ' {
            return;
        }
        let width = self.char_width(ch).unwrap_or(0);
        canvas.fill_rect(Rect::new(x, y + 2, width, 8), 255);
    }
}

/// Logs every call at debug level.
#[derive(Default)]
struct TracingSurface {
    next_texture: Cell<u32>,
}

impl RenderSurface for TracingSurface {
    fn enable(&self, capability: Capability) {
        tracing::debug!("enable {:?}", capability);
    }

    fn disable(&self, capability: Capability) {
        tracing::debug!("disable {:?}", capability);
    }

    fn bind_texture(&self, unit: TextureUnit, texture: TextureHandle) {
        tracing::debug!("bind {:?} to {:?}", texture, unit);
    }

    fn create_alpha_texture(&self, width: u32, height: u32, data: &[u8]) -> TextureHandle {
        self.create(width, height, data.len())
    }

    fn create_rgba_texture(&self, width: u32, height: u32, data: &[u8], _has_alpha: bool) -> TextureHandle {
        self.create(width, height, data.len())
    }

    fn delete_texture(&self, texture: TextureHandle) {
        tracing::debug!("delete {:?}", texture);
    }

    fn set_vertex_stream(&self, stream: VertexStream<'_>) {
        tracing::debug!("stream {:?} with {} vertices", stream.kind(), stream.len());
    }

    fn clear_vertex_stream(&self, kind: StreamKind) {
        tracing::debug!("clear stream {:?}", kind);
    }

    fn draw_indexed_triangles(&self, indices: &[u16]) {
        tracing::info!("draw {} triangles", indices.len() / 3);
    }
}

impl TracingSurface {
    fn create(&self, width: u32, height: u32, bytes: usize) -> TextureHandle {
        let name = self.next_texture.get() + 1;
        self.next_texture.set(name);
        tracing::debug!("create texture {} ({}x{}, {} bytes)", name, width, height, bytes);
        TextureHandle::new(name)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    ember_core::init(
        &Config::default()
            .with_log_filter("info,ember_text=debug")
            .with_profiling(ProfilingMode::On),
    );

    let surface = TracingSurface::default();
    let config = AtlasConfig::default().with_label("block");
    let font = BitmapFont::generate(&BlockRasterizer, &config, &surface)?;

    for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right, TextAlign::Justified] {
        let layout = TextLayout::new(150.0, 48.0).align(align);
        let run = GlyphRun::build(&font, PARAGRAPH, &layout)?;

        println!("{align} ({} lines, {} glyphs)", run.line_count(), run.glyph_count());
        for line in run.lines() {
            let indent = (line.x / 6.0).round().max(0.0) as usize;
            println!("  |{}{}", " ".repeat(indent), line.text);
        }

        run.draw(&surface);
    }

    // Fade a gradient run in over half a second
    let mut run = GlyphRun::build(&font, "Fading in", &TextLayout::unbounded())?;
    let mut alpha = LinearAnimation::new(0.0_f32, 1.0, 0.5);
    while !alpha.is_finished() {
        let a = alpha.animate(1.0 / 30.0);
        run.apply_color_shader(|_| {
            GlyphColors::vertical_gradient(Color::WHITE.with_alpha(a), Color::BLUE.with_alpha(a))
        });
        run.draw(&surface);
        ember_core::profiling::new_frame();
    }

    font.release(&surface);
    Ok(())
}
