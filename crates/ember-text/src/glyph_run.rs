//! Render-ready glyph runs.
//!
//! A [`GlyphRun`] is built once from a text, a font and a [`TextLayout`].
//! Building wraps the text into lines, cuts the last visible line with an
//! ellipsis when the box is too short, positions every line according to its
//! alignment and emits one quad per glyph. The result owns all vertex and index
//! buffers and can be drawn any number of times.
//!
//! # Example
//!
//! ```ignore
//! let layout = TextLayout::new(240.0, 60.0).align(TextAlign::Center);
//! let mut run = GlyphRun::build(&font, "Hello, World!", &layout)?;
//! run.apply_color_shader(|_| GlyphColors::vertical_gradient(Color::WHITE, Color::BLACK));
//! run.draw(&surface);
//! ```

use std::ops::Range;

use ember_core::profiling::profile_function;
use ember_render::{Capability, RenderSurface, StreamKind, TextureHandle, TextureUnit, VertexStream};

use crate::error::{TextError, TextResult};
use crate::font::GlyphAtlasProvider;
use crate::glyph::{GlyphColors, GlyphQuad, QUAD_INDICES, UvRect};
use crate::layout::{TextAlign, TextLayout};
use crate::line_break::{LineBreaker, LineSegment, count_spaces};

/// Most glyphs one run can hold: four vertices each, addressed by `u16`.
pub const MAX_GLYPHS: usize = (u16::MAX as usize + 1) / 4;

const ELLIPSIS: &str = "...";

/// A line as it was emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLine {
    /// Emitted characters. Justified lines have their outer spaces trimmed and
    /// a truncated line ends in `"..."`.
    pub text: String,
    /// Measured width of `text`, before justification.
    pub width: f32,
    /// Pen position of the first glyph.
    pub x: f32,
    /// Top of the line.
    pub y: f32,
    /// Range of this line's glyphs in the run's buffers.
    pub glyphs: Range<usize>,
}

/// Placement decided for a line before any geometry exists.
struct LinePlan {
    text: String,
    width: f32,
    x: f32,
    space_adjust: f32,
}

/// Laid-out text ready to draw.
///
/// Vertex buffers hold one entry per glyph (see [`crate::glyph`] for the
/// corner order). The atlas texture is referenced, not owned; the font that
/// produced the run must stay alive while the run is drawn.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    quads: Vec<GlyphQuad>,
    font_uvs: Vec<UvRect>,
    indices: Vec<u16>,
    texture_uvs: Option<Vec<UvRect>>,
    colors: Option<Vec<GlyphColors>>,
    texture: Option<TextureHandle>,
    atlas: TextureHandle,
    width: f32,
    height: f32,
    lines: Vec<RunLine>,
}

impl GlyphRun {
    /// Lay out `text` on unbounded lines, left aligned.
    pub fn new<F: GlyphAtlasProvider + ?Sized>(font: &F, text: &str) -> TextResult<Self> {
        Self::build(font, text, &TextLayout::default())
    }

    /// Lay out `text` inside `layout`.
    ///
    /// Nothing is allocated for geometry until the layout, every character and
    /// the final glyph count have been checked, so an error never leaves a
    /// partial run behind.
    pub fn build<F: GlyphAtlasProvider + ?Sized>(
        font: &F,
        text: &str,
        layout: &TextLayout,
    ) -> TextResult<Self> {
        profile_function!();

        layout.validate()?;
        check_glyphs(font, text)?;

        let breaker = LineBreaker::new(font);
        let segments = collect_lines(&breaker, font, text, layout)?;
        let line_height = font.line_height();

        let width = if layout.is_width_unbounded() {
            segments.iter().map(|line| line.width).fold(0.0, f32::max)
        } else {
            layout.width
        };
        let height = if layout.is_height_unbounded() {
            segments.len() as f32 * line_height
        } else {
            layout.height
        };

        let last = segments.len().saturating_sub(1);
        let plans: Vec<LinePlan> = segments
            .into_iter()
            .enumerate()
            .map(|(i, segment)| plan_line(&breaker, segment, layout.align, width, i == last))
            .collect();

        let glyph_count: usize = plans.iter().map(|plan| plan.text.chars().count()).sum();
        if glyph_count > MAX_GLYPHS {
            return Err(TextError::TooManyGlyphs {
                glyphs: glyph_count,
                max: MAX_GLYPHS,
            });
        }

        let mut run = Self {
            quads: Vec::with_capacity(glyph_count),
            font_uvs: Vec::with_capacity(glyph_count),
            indices: Vec::with_capacity(glyph_count * QUAD_INDICES.len()),
            texture_uvs: None,
            colors: None,
            texture: None,
            atlas: font.texture(),
            width,
            height,
            lines: Vec::with_capacity(plans.len()),
        };

        for (i, plan) in plans.into_iter().enumerate() {
            run.emit_line(font, plan, i as f32 * line_height, line_height)?;
        }

        tracing::debug!(
            "Built glyph run: {} lines, {} glyphs, {}x{}",
            run.lines.len(),
            run.quads.len(),
            run.width,
            run.height
        );

        Ok(run)
    }

    fn emit_line<F: GlyphAtlasProvider + ?Sized>(
        &mut self,
        font: &F,
        plan: LinePlan,
        y: f32,
        line_height: f32,
    ) -> TextResult<()> {
        let first = self.quads.len();
        let mut x = plan.x;

        for (index, ch) in plan.text.char_indices() {
            let metrics = font
                .glyph(ch)
                .ok_or(TextError::GlyphUnavailable { ch, index })?;

            let base = (self.quads.len() * 4) as u16;
            self.quads.push(GlyphQuad::new(x, y, metrics.width, line_height));
            self.font_uvs.push(metrics.uv);
            self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));

            x += metrics.width - font.leading() - font.trailing();
            if ch == ' ' {
                x += plan.space_adjust;
            }
        }

        tracing::trace!(
            "Line {:?} at ({}, {}), width {}, space adjust {}",
            plan.text,
            plan.x,
            y,
            plan.width,
            plan.space_adjust
        );

        self.lines.push(RunLine {
            text: plan.text,
            width: plan.width,
            x: plan.x,
            y,
            glyphs: first..self.quads.len(),
        });
        Ok(())
    }

    /// Width of the layout box, or of the widest line when unbounded.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the layout box, or of all lines when unbounded.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn triangle_count(&self) -> usize {
        self.quads.len() * 2
    }

    pub fn glyph_count(&self) -> usize {
        self.quads.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn lines(&self) -> &[RunLine] {
        &self.lines
    }

    pub fn quads(&self) -> &[GlyphQuad] {
        &self.quads
    }

    pub fn font_uvs(&self) -> &[UvRect] {
        &self.font_uvs
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn texture_uvs(&self) -> Option<&[UvRect]> {
        self.texture_uvs.as_deref()
    }

    pub fn colors(&self) -> Option<&[GlyphColors]> {
        self.colors.as_deref()
    }

    /// The font atlas every glyph samples from.
    pub fn atlas(&self) -> TextureHandle {
        self.atlas
    }

    /// Texture sampled with [`texture_uvs`](Self::texture_uvs), if set.
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = Some(texture);
    }

    /// Compute secondary texture coordinates from each glyph's quad.
    ///
    /// Every call replaces the previous coordinates entirely.
    pub fn apply_texture_shader<S>(&mut self, shader: S)
    where
        S: FnMut(&GlyphQuad) -> UvRect,
    {
        profile_function!();
        shade(&mut self.texture_uvs, &self.quads, shader);
    }

    /// Compute vertex colors from each glyph's quad.
    ///
    /// Every call replaces the previous colors entirely.
    pub fn apply_color_shader<S>(&mut self, shader: S)
    where
        S: FnMut(&GlyphQuad) -> GlyphColors,
    {
        profile_function!();
        shade(&mut self.colors, &self.quads, shader);
    }

    /// Issue the draw call for this run.
    ///
    /// Every capability and stream enabled here is disabled again before
    /// returning. Transforms are the caller's business.
    pub fn draw(&self, surface: &dyn RenderSurface) {
        profile_function!();

        if self.quads.is_empty() {
            return;
        }

        let primary = Capability::Texture2D(TextureUnit::Primary);
        let secondary = Capability::Texture2D(TextureUnit::Secondary);

        surface.enable(Capability::Blend);
        surface.enable(primary);
        surface.bind_texture(TextureUnit::Primary, self.atlas);

        let overlay = match (&self.texture_uvs, self.texture) {
            (Some(uvs), Some(texture)) => Some((uvs, texture)),
            (Some(_), None) => {
                tracing::warn!("Glyph run has texture coordinates but no texture; skipping overlay");
                None
            }
            _ => None,
        };

        if let Some((uvs, texture)) = overlay {
            surface.enable(secondary);
            surface.bind_texture(TextureUnit::Secondary, texture);
            surface.set_vertex_stream(VertexStream::TexCoord {
                unit: TextureUnit::Secondary,
                coords: bytemuck::cast_slice(uvs),
            });
        }

        if let Some(colors) = &self.colors {
            surface.set_vertex_stream(VertexStream::Color(bytemuck::cast_slice(colors)));
        }

        surface.set_vertex_stream(VertexStream::Position(bytemuck::cast_slice(&self.quads)));
        surface.set_vertex_stream(VertexStream::TexCoord {
            unit: TextureUnit::Primary,
            coords: bytemuck::cast_slice(&self.font_uvs),
        });

        surface.draw_indexed_triangles(&self.indices);

        if self.colors.is_some() {
            surface.clear_vertex_stream(StreamKind::Color);
        }
        if overlay.is_some() {
            surface.clear_vertex_stream(StreamKind::TexCoord(TextureUnit::Secondary));
            surface.disable(secondary);
        }

        surface.clear_vertex_stream(StreamKind::TexCoord(TextureUnit::Primary));
        surface.clear_vertex_stream(StreamKind::Position);
        surface.disable(primary);
        surface.disable(Capability::Blend);
    }
}

/// Refill `slot` with one shader output per quad, reusing its allocation.
fn shade<T>(slot: &mut Option<Vec<T>>, quads: &[GlyphQuad], mut shader: impl FnMut(&GlyphQuad) -> T) {
    let values = slot.get_or_insert_with(|| Vec::with_capacity(quads.len()));
    values.clear();
    values.extend(quads.iter().map(&mut shader));
}

fn check_glyphs<F: GlyphAtlasProvider + ?Sized>(font: &F, text: &str) -> TextResult<()> {
    match text
        .char_indices()
        .find(|&(_, ch)| ch != '\n' && font.glyph(ch).is_none())
    {
        Some((index, ch)) => Err(TextError::GlyphUnavailable { ch, index }),
        None => Ok(()),
    }
}

/// Wrap `text` and stop at the last line that fits the box height.
///
/// A line is only kept as-is when another full line still fits below it.
/// Otherwise, if more text follows, it becomes the final line and is cut
/// with an ellipsis. The last line of the text is always kept.
fn collect_lines<F: GlyphAtlasProvider + ?Sized>(
    breaker: &LineBreaker<'_, F>,
    font: &F,
    text: &str,
    layout: &TextLayout,
) -> TextResult<Vec<LineSegment>> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return Ok(lines);
    }

    let line_height = font.line_height();
    let mut total_height = 0.0_f32;
    let mut start = 0;
    let mut current = breaker.fit(text, start, layout.width)?;

    while current.end < text.len() {
        if layout.auto_ellipsis && 2.0 * line_height + total_height > layout.height {
            if font.glyph('.').is_none() {
                return Err(TextError::GlyphUnavailable {
                    ch: '.',
                    index: start,
                });
            }
            lines.push(truncate(breaker, current));
            return Ok(lines);
        }

        let next_start = current.end;
        let next = breaker.fit(text, next_start, layout.width)?;
        if next.end <= next_start {
            return Err(TextError::NoForwardProgress { index: next_start });
        }

        total_height += line_height;
        lines.push(current);
        current = next;
        start = next_start;
    }

    lines.push(current);
    Ok(lines)
}

fn truncate<F: GlyphAtlasProvider + ?Sized>(
    breaker: &LineBreaker<'_, F>,
    segment: LineSegment,
) -> LineSegment {
    let keep = segment.char_count().saturating_sub(ELLIPSIS.len());
    let mut text: String = segment.text.chars().take(keep).collect();
    text.push_str(ELLIPSIS);

    LineSegment {
        width: breaker.measure(&text),
        space_count: count_spaces(&text),
        text,
        end: segment.end,
    }
}

fn plan_line<F: GlyphAtlasProvider + ?Sized>(
    breaker: &LineBreaker<'_, F>,
    segment: LineSegment,
    align: TextAlign,
    box_width: f32,
    is_last: bool,
) -> LinePlan {
    let slack = box_width - segment.width;
    match align {
        TextAlign::Left => LinePlan::flush(segment, 0.0),
        TextAlign::Right => LinePlan::flush(segment, slack),
        TextAlign::Center => LinePlan::flush(segment, slack / 2.0),
        TextAlign::Justified if is_last => LinePlan::flush(segment, 0.0),
        TextAlign::Justified => {
            let text = segment.text.trim_matches(' ').to_string();
            let width = breaker.measure(&text);
            let spaces = count_spaces(&text);
            // Negative when the trimmed line is wider than the box
            let space_adjust = if spaces > 0 {
                (box_width - width) / spaces as f32
            } else {
                0.0
            };
            LinePlan {
                text,
                width,
                x: 0.0,
                space_adjust,
            }
        }
    }
}

impl LinePlan {
    fn flush(segment: LineSegment, x: f32) -> Self {
        Self {
            text: segment.text,
            width: segment.width,
            x,
            space_adjust: 0.0,
        }
    }
}
