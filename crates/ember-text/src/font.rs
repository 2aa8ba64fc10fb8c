//! Glyph metrics lookup.
//!
//! Layout code never talks to a rasterizer. It only needs, per character, the
//! width of the glyph's atlas cell and where that cell sits in the atlas, plus
//! a few per-font constants. [`GlyphAtlasProvider`] is that contract;
//! [`BitmapFont`](crate::BitmapFont) is the implementation generated by this
//! crate.

use ember_render::TextureHandle;

use crate::glyph::UvRect;

/// Metrics of a single glyph in an atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Width of the glyph's atlas cell in pixels. Includes the font's leading
    /// and trailing space.
    pub width: f32,
    /// Cell location in normalized atlas coordinates.
    pub uv: UvRect,
}

/// Read-only access to a font atlas.
pub trait GlyphAtlasProvider {
    /// Metrics for `ch`, or `None` when the atlas has no glyph for it.
    fn glyph(&self, ch: char) -> Option<GlyphMetrics>;

    /// Height of every line, in pixels.
    fn line_height(&self) -> f32;

    /// Space before each glyph that is part of its cell but not its advance.
    fn leading(&self) -> f32 {
        0.0
    }

    /// Space after each glyph that is part of its cell but not its advance.
    fn trailing(&self) -> f32 {
        0.0
    }

    /// The atlas texture all UVs refer to.
    fn texture(&self) -> TextureHandle;

    /// Distance the pen moves after drawing `ch`. Zero for unknown glyphs.
    fn advance(&self, ch: char) -> f32 {
        self.glyph(ch)
            .map_or(0.0, |glyph| glyph.width - self.leading() - self.trailing())
    }
}
