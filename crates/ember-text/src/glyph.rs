//! Per-glyph vertex data.
//!
//! Each type stores one value per quad corner, always in the order top-left,
//! top-right, bottom-left, bottom-right. A glyph run's index buffer relies on
//! that order: vertices `0, 1, 2` and `2, 1, 3` form the two triangles, which
//! share the top-right/bottom-left diagonal.

use bytemuck::{Pod, Zeroable};
use ember_core::math::{PackedVec2, PackedVec3, PackedVec4};
use ember_render::Color;

/// Indices of the two triangles of a quad, relative to its first vertex.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Screen-space corners of one glyph, in text block coordinates
/// (origin top-left, y down, z = 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphQuad {
    pub top_left: PackedVec3,
    pub top_right: PackedVec3,
    pub bottom_left: PackedVec3,
    pub bottom_right: PackedVec3,
}

impl GlyphQuad {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self {
            top_left: PackedVec3::new(left, top, 0.0),
            top_right: PackedVec3::new(right, top, 0.0),
            bottom_left: PackedVec3::new(left, bottom, 0.0),
            bottom_right: PackedVec3::new(right, bottom, 0.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    pub fn right(&self) -> f32 {
        self.top_right.x
    }

    pub fn bottom(&self) -> f32 {
        self.bottom_left.y
    }
}

/// Texture coordinates of one glyph.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UvRect {
    pub top_left: PackedVec2,
    pub top_right: PackedVec2,
    pub bottom_left: PackedVec2,
    pub bottom_right: PackedVec2,
}

impl UvRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            top_left: PackedVec2::new(left, top),
            top_right: PackedVec2::new(right, top),
            bottom_left: PackedVec2::new(left, bottom),
            bottom_right: PackedVec2::new(right, bottom),
        }
    }

    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    pub fn right(&self) -> f32 {
        self.top_right.x
    }

    pub fn bottom(&self) -> f32 {
        self.bottom_left.y
    }
}

/// Vertex colors of one glyph.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlyphColors {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_left: Color,
    pub bottom_right: Color,
}

impl GlyphColors {
    pub const fn uniform(color: Color) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_left: color,
            bottom_right: color,
        }
    }

    /// Top edge `top`, bottom edge `bottom`.
    pub const fn vertical_gradient(top: Color, bottom: Color) -> Self {
        Self {
            top_left: top,
            top_right: top,
            bottom_left: bottom,
            bottom_right: bottom,
        }
    }
}

impl Default for GlyphColors {
    fn default() -> Self {
        Self::uniform(Color::WHITE)
    }
}

static_assertions::assert_eq_size!(GlyphQuad, [PackedVec3; 4]);
static_assertions::assert_eq_size!(UvRect, [PackedVec2; 4]);
static_assertions::assert_eq_size!(GlyphColors, [PackedVec4; 4]);
