use ember_core::math::{PackedVec4, Vec4};

/// Linear RGBA vertex color.
///
/// Layout matches one vertex of a color stream (four `f32`s), so a slice of
/// colors can be handed to the surface with `bytemuck::cast_slice`.
///
/// ```
/// use ember_render::Color;
///
/// let orange = Color::from_hex(0xFF8800FF);
/// assert_eq!(orange.r, 1.0);
/// assert_eq!(Color::RED.with_alpha(0.5).a, 0.5);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from a packed `0xRRGGBBAA` value.
    pub fn from_hex(rgba: u32) -> Self {
        let channel = |shift: u32| ((rgba >> shift) & 0xFF) as f32 / 255.0;
        Self::rgba(channel(24), channel(16), channel(8), channel(0))
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation, `t = 0` yields `self`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Vec4::from(self).lerp(Vec4::from(other), t).into()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::rgba(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Color> for PackedVec4 {
    fn from(c: Color) -> Self {
        PackedVec4::new(c.r, c.g, c.b, c.a)
    }
}
