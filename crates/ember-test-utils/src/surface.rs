//! Trait abstracting the native draw API.

use ember_core::math::{PackedVec2, PackedVec3, PackedVec4};

/// Opaque name of a texture owned by the native context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub const fn new(name: u32) -> Self {
        Self(name)
    }

    pub const fn name(self) -> u32 {
        self.0
    }
}

/// Texture units used by glyph runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureUnit {
    /// Unit 0, sampled with the font atlas coordinates.
    Primary,
    /// Unit 1, sampled with shader-provided coordinates.
    Secondary,
}

/// Fixed-function state toggled around a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Blend,
    Texture2D(TextureUnit),
}

/// Identifies a per-vertex attribute stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Position,
    TexCoord(TextureUnit),
    Color,
}

/// Per-vertex data handed to the surface for the next draw.
///
/// The slices borrow the caller's buffers; the surface must consume or copy
/// them before the draw call returns.
#[derive(Debug, Clone, Copy)]
pub enum VertexStream<'a> {
    /// Three floats per vertex.
    Position(&'a [PackedVec3]),
    /// Two floats per vertex, bound to `unit`.
    TexCoord {
        unit: TextureUnit,
        coords: &'a [PackedVec2],
    },
    /// Four floats (RGBA) per vertex.
    Color(&'a [PackedVec4]),
}

impl VertexStream<'_> {
    pub fn kind(&self) -> StreamKind {
        match self {
            VertexStream::Position(_) => StreamKind::Position,
            VertexStream::TexCoord { unit, .. } => StreamKind::TexCoord(*unit),
            VertexStream::Color(_) => StreamKind::Color,
        }
    }

    /// Number of vertices in the stream.
    pub fn len(&self) -> usize {
        match self {
            VertexStream::Position(data) => data.len(),
            VertexStream::TexCoord { coords, .. } => coords.len(),
            VertexStream::Color(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draw-call issuance against a native graphics context.
///
/// Every method is a side effect with no return value except texture
/// creation. Implementations own any pinning or copying the native call needs.
///
/// # Example
///
/// ```rust,no_run
/// use ember_test_utils::{Capability, RenderSurface, StreamKind, TextureHandle, TextureUnit};
///
/// fn draw_sprite(surface: &dyn RenderSurface, texture: TextureHandle, indices: &[u16]) {
///     surface.enable(Capability::Texture2D(TextureUnit::Primary));
///     surface.bind_texture(TextureUnit::Primary, texture);
///     surface.draw_indexed_triangles(indices);
///     surface.clear_vertex_stream(StreamKind::Position);
///     surface.disable(Capability::Texture2D(TextureUnit::Primary));
/// }
/// ```
pub trait RenderSurface {
    // State

    fn enable(&self, capability: Capability);

    fn disable(&self, capability: Capability);

    // Textures

    fn bind_texture(&self, unit: TextureUnit, texture: TextureHandle);

    /// Upload a single-channel (alpha) texture of `width * height` bytes.
    ///
    /// Linear filtering and clamp-to-edge wrapping are expected.
    fn create_alpha_texture(&self, width: u32, height: u32, data: &[u8]) -> TextureHandle;

    /// Upload an RGBA8 (`has_alpha`) or RGB8 texture.
    fn create_rgba_texture(&self, width: u32, height: u32, data: &[u8], has_alpha: bool)
    -> TextureHandle;

    fn delete_texture(&self, texture: TextureHandle);

    // Vertex streams

    /// Enable the stream's attribute array and point it at the data.
    fn set_vertex_stream(&self, stream: VertexStream<'_>);

    /// Disable an attribute array previously enabled by [`set_vertex_stream`].
    ///
    /// [`set_vertex_stream`]: RenderSurface::set_vertex_stream
    fn clear_vertex_stream(&self, kind: StreamKind);

    // Drawing

    /// Draw `indices.len() / 3` triangles from the currently set streams.
    fn draw_indexed_triangles(&self, indices: &[u16]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_kind_and_len() {
        let coords = [PackedVec2::new(0.0, 1.0); 4];
        let stream = VertexStream::TexCoord {
            unit: TextureUnit::Secondary,
            coords: &coords,
        };
        assert_eq!(stream.kind(), StreamKind::TexCoord(TextureUnit::Secondary));
        assert_eq!(stream.len(), 4);
        assert!(!stream.is_empty());
    }

    #[test]
    fn test_texture_handle_name() {
        assert_eq!(TextureHandle::new(7).name(), 7);
    }
}
