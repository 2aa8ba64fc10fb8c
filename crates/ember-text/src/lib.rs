//! Ember Text
//!
//! Bitmap font atlases and glyph run layout for fixed-function OpenGL ES.
//!
//! # Overview
//!
//! - [`BitmapFont`]: glyph atlas generated from a [`FontRasterizer`]
//! - [`LineBreaker`]: greedy word wrapping against a pixel budget
//! - [`GlyphRun`]: laid-out text with quad, UV, color and index buffers
//! - [`TextLayout`] / [`TextAlign`]: the box a run is laid out in
//!
//! # Example
//!
//! ```rust,ignore
//! use ember_text::{AtlasConfig, BitmapFont, GlyphRun, TextAlign, TextLayout};
//!
//! let font = BitmapFont::generate(&rasterizer, &AtlasConfig::default(), &surface)?;
//! let layout = TextLayout::new(240.0, 60.0).align(TextAlign::Justified);
//!
//! let run = GlyphRun::build(&font, "The quick brown fox jumps over the lazy dog", &layout)?;
//! run.draw(&surface);
//! ```

pub mod atlas;
mod error;
pub mod font;
pub mod glyph;
pub mod glyph_run;
mod layout;
pub mod line_break;

pub use atlas::{AlphaBitmap, AtlasConfig, AtlasEntry, AtlasLayout, BitmapFont, FontRasterizer};
pub use error::{TextError, TextResult};
pub use font::{GlyphAtlasProvider, GlyphMetrics};
pub use glyph::{GlyphColors, GlyphQuad, QUAD_INDICES, UvRect};
pub use glyph_run::{GlyphRun, MAX_GLYPHS, RunLine};
pub use layout::{TextAlign, TextLayout};
pub use line_break::{LineBreaker, LineSegment, Lines};
