//! Bitmap font atlas generation.
//!
//! A [`FontRasterizer`] measures and draws individual characters. From it,
//! [`BitmapFont::generate`] builds a single alpha texture holding every glyph
//! of the configured character set:
//!
//! 1. Each cell is the glyph's advance plus the font's leading and trailing.
//! 2. Cells are packed left to right in rows of one line height, starting a
//!    new row when the next cell would reach the right edge.
//! 3. The atlas is square, with a power-of-two side of at least
//!    `sqrt(total cell width * line height)`.
//!
//! # Example
//!
//! ```ignore
//! let font = BitmapFont::generate(&rasterizer, &AtlasConfig::default(), &surface)?;
//! let run = GlyphRun::new(&font, "Hello, World!")?;
//! run.draw(&surface);
//! ```

use std::ops::RangeInclusive;

use ember_core::alloc::HashMap;
use ember_core::geometry::Rect;
use ember_core::profiling::{profile_function, profile_scope};
use ember_render::{RenderSurface, TextureHandle, valid_texture_dimension};

use crate::error::{TextError, TextResult};
use crate::font::{GlyphAtlasProvider, GlyphMetrics};
use crate::glyph::UvRect;

/// Single-channel 8-bit image a rasterizer draws glyphs into.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Convert an RGB565 image to coverage by averaging its channels.
    ///
    /// Rasterizers that draw white text onto a black 16-bit surface can hand
    /// their pixels over unchanged.
    pub fn from_rgb565(width: u32, height: u32, pixels: &[u16]) -> Self {
        let mut bitmap = Self::new(width, height);
        for (dst, &pixel) in bitmap.data.iter_mut().zip(pixels) {
            let b = ((pixel & 0x1F) << 3) as u32;
            let g = (((pixel >> 5) & 0x3F) << 2) as u32;
            let r = (((pixel >> 11) & 0x1F) << 3) as u32;
            *dst = ((r + g + b) / 3) as u8;
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Write one pixel; writes outside the bitmap are ignored.
    pub fn set(&mut self, x: u32, y: u32, alpha: u8) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = alpha;
        }
    }

    /// Fill a rectangle, clipped to the bitmap.
    pub fn fill_rect(&mut self, rect: Rect<u32>, alpha: u8) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.set(x, y, alpha);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

/// Platform font backend used to build an atlas.
pub trait FontRasterizer {
    /// Advance width of `ch` in pixels, `None` if the font cannot render it.
    fn char_width(&self, ch: char) -> Option<u32>;

    fn line_height(&self) -> u32;

    fn leading(&self) -> u32 {
        0
    }

    fn trailing(&self) -> u32 {
        0
    }

    /// Draw `ch` with its cell's top-left corner at `(x, y)`.
    fn draw_glyph(&self, ch: char, canvas: &mut AlphaBitmap, x: u32, y: u32);
}

/// Which characters go into a generated atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasConfig {
    pub chars: Vec<char>,
    /// Glyph drawn for characters missing from the atlas.
    pub fallback: Option<char>,
    /// Name used when logging the generated texture.
    pub label: Option<String>,
}

impl Default for AtlasConfig {
    /// Printable ASCII, no fallback.
    fn default() -> Self {
        Self::from_range(' '..='~')
    }
}

impl AtlasConfig {
    pub fn from_range(range: RangeInclusive<char>) -> Self {
        Self {
            chars: range.collect(),
            fallback: None,
            label: None,
        }
    }

    /// Add characters, skipping ones already present.
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        for ch in chars {
            if !self.chars.contains(&ch) {
                self.chars.push(ch);
            }
        }
        self
    }

    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Position of one glyph cell in the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasEntry {
    pub ch: char,
    /// Cell in pixels.
    pub rect: Rect<u32>,
    pub uv: UvRect,
}

/// Result of packing glyph cells into a square texture.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasLayout {
    pub side: u32,
    pub entries: Vec<AtlasEntry>,
}

impl AtlasLayout {
    /// Pack `(char, cell width)` pairs into rows of `line_height` pixels.
    pub fn pack(cells: &[(char, u32)], line_height: u32) -> Self {
        let total_width: u64 = cells.iter().map(|&(_, w)| w as u64).sum();
        let area = (total_width * line_height as u64) as f64;
        let mut side = valid_texture_dimension(area.sqrt().ceil() as u32);

        // The area estimate ignores row waste, so grow until everything fits
        loop {
            if let Some(entries) = Self::place(cells, line_height, side) {
                return Self { side, entries };
            }
            side *= 2;
        }
    }

    fn place(cells: &[(char, u32)], line_height: u32, side: u32) -> Option<Vec<AtlasEntry>> {
        let scale = side as f32;
        let mut entries = Vec::with_capacity(cells.len());
        let mut x = 0u32;
        let mut y = 0u32;

        for &(ch, width) in cells {
            if width > side {
                return None;
            }
            if x > 0 && x + width >= side {
                x = 0;
                y += line_height;
            }
            if y + line_height > side {
                return None;
            }

            let rect = Rect::new(x, y, width, line_height);
            let uv = UvRect::new(
                x as f32 / scale,
                y as f32 / scale,
                (x + width) as f32 / scale,
                (y + line_height) as f32 / scale,
            );
            entries.push(AtlasEntry { ch, rect, uv });
            x += width;
        }

        Some(entries)
    }
}

/// A font whose glyphs live in one alpha texture.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    glyphs: HashMap<char, GlyphMetrics>,
    line_height: f32,
    leading: f32,
    trailing: f32,
    texture: TextureHandle,
    atlas_size: u32,
    fallback: Option<char>,
}

impl BitmapFont {
    /// Measure, pack, rasterize and upload the configured character set.
    pub fn generate<R: FontRasterizer + ?Sized>(
        rasterizer: &R,
        config: &AtlasConfig,
        surface: &dyn RenderSurface,
    ) -> TextResult<Self> {
        profile_function!();

        let line_height = rasterizer.line_height();
        if line_height == 0 {
            return Err(TextError::InvalidAtlas("line height is zero".to_string()));
        }

        let leading = rasterizer.leading();
        let trailing = rasterizer.trailing();
        let cells: Vec<(char, u32)> = config
            .chars
            .iter()
            .filter_map(|&ch| {
                let width = rasterizer.char_width(ch)?;
                Some((ch, width + leading + trailing))
            })
            .collect();

        if cells.is_empty() {
            return Err(TextError::InvalidAtlas(
                "no character in the set could be measured".to_string(),
            ));
        }
        if let Some(fallback) = config.fallback
            && !cells.iter().any(|&(ch, _)| ch == fallback)
        {
            return Err(TextError::InvalidAtlas(format!(
                "fallback character {:?} is not in the atlas",
                fallback
            )));
        }

        let layout = AtlasLayout::pack(&cells, line_height);

        let mut bitmap = AlphaBitmap::new(layout.side, layout.side);
        {
            profile_scope!("rasterize_glyphs");
            for entry in &layout.entries {
                rasterizer.draw_glyph(entry.ch, &mut bitmap, entry.rect.x, entry.rect.y);
            }
        }

        let texture = surface.create_alpha_texture(layout.side, layout.side, bitmap.data());

        tracing::info!(
            "Generated {}x{} font atlas '{}' with {} glyphs (line height {})",
            layout.side,
            layout.side,
            config.label.as_deref().unwrap_or("unnamed"),
            layout.entries.len(),
            line_height
        );

        let glyphs = layout
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.ch,
                    GlyphMetrics {
                        width: entry.rect.width as f32,
                        uv: entry.uv,
                    },
                )
            })
            .collect();

        Ok(Self {
            glyphs,
            line_height: line_height as f32,
            leading: leading as f32,
            trailing: trailing as f32,
            texture,
            atlas_size: layout.side,
            fallback: config.fallback,
        })
    }

    /// Build a font from metrics computed elsewhere; nothing is uploaded.
    pub fn from_parts(
        glyphs: impl IntoIterator<Item = (char, GlyphMetrics)>,
        line_height: f32,
        texture: TextureHandle,
        atlas_size: u32,
    ) -> Self {
        Self {
            glyphs: glyphs.into_iter().collect(),
            line_height,
            leading: 0.0,
            trailing: 0.0,
            texture,
            atlas_size,
            fallback: None,
        }
    }

    pub fn with_bearing(mut self, leading: f32, trailing: f32) -> Self {
        self.leading = leading;
        self.trailing = trailing;
        self
    }

    /// Substitute `fallback` for missing glyphs; ignored if it is missing too.
    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// True if `ch` has its own glyph (fallback not considered).
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Delete the atlas texture. Glyph runs built from this font must not be
    /// drawn afterwards.
    pub fn release(self, surface: &dyn RenderSurface) {
        surface.delete_texture(self.texture);
    }
}

impl GlyphAtlasProvider for BitmapFont {
    fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.fallback.and_then(|f| self.glyphs.get(&f)))
            .copied()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn leading(&self) -> f32 {
        self.leading
    }

    fn trailing(&self) -> f32 {
        self.trailing
    }

    fn texture(&self) -> TextureHandle {
        self.texture
    }
}
