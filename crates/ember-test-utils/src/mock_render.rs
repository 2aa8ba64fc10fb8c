//! Mock implementation of RenderSurface for testing.
//!
//! This module provides a surface that records operations without talking to
//! a native graphics context.

use crate::surface::*;
use ember_core::alloc::HashSet;
use parking_lot::Mutex;

/// Records a surface call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Enable(Capability),
    Disable(Capability),
    BindTexture {
        unit: TextureUnit,
        texture: TextureHandle,
    },
    CreateTexture {
        texture: TextureHandle,
        width: u32,
        height: u32,
        bytes: usize,
    },
    DeleteTexture(TextureHandle),
    SetStream {
        kind: StreamKind,
        vertices: usize,
    },
    ClearStream(StreamKind),
    DrawIndexed {
        index_count: usize,
    },
}

/// Pixel data of a texture uploaded through the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct MockTexture {
    pub texture: TextureHandle,
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel: 1 for alpha, 3 for RGB, 4 for RGBA.
    pub channels: u32,
    pub data: Vec<u8>,
}

/// Mock implementation of RenderSurface for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Methods take `&self` but need to mutate internal state (record calls), so
/// every field sits behind a `parking_lot::Mutex`.
///
/// The mock also tracks which capabilities and streams are currently enabled,
/// so tests can check that a draw leaves global state the way it found it.
///
/// # Example
///
/// ```rust
/// use ember_test_utils::{MockRenderSurface, RenderSurface};
///
/// let mock = MockRenderSurface::new();
/// let texture = mock.create_alpha_texture(2, 2, &[0, 64, 128, 255]);
///
/// assert_eq!(mock.count_texture_creates(), 1);
/// assert_eq!(mock.texture(texture).unwrap().channels, 1);
/// ```
pub struct MockRenderSurface {
    calls: Mutex<Vec<RenderCall>>,
    textures: Mutex<Vec<MockTexture>>,
    enabled: Mutex<HashSet<Capability>>,
    streams: Mutex<HashSet<StreamKind>>,
    next_texture_name: Mutex<u32>,
}

impl MockRenderSurface {
    /// Create a new mock surface.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            textures: Mutex::new(Vec::new()),
            enabled: Mutex::new(HashSet::new()),
            streams: Mutex::new(HashSet::new()),
            // Zero is never a valid texture name
            next_texture_name: Mutex::new(1),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Count draw calls.
    pub fn count_draws(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::DrawIndexed { .. }))
            .count()
    }

    /// Count texture uploads.
    pub fn count_texture_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::CreateTexture { .. }))
            .count()
    }

    /// Textures bound to `unit`, in call order.
    pub fn bound_textures(&self, unit: TextureUnit) -> Vec<TextureHandle> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::BindTexture { unit: u, texture } if *u == unit => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// Vertex count of the last stream set for `kind`.
    pub fn stream_len(&self, kind: StreamKind) -> Option<usize> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            RenderCall::SetStream { kind: k, vertices } if *k == kind => Some(*vertices),
            _ => None,
        })
    }

    /// Look up an uploaded texture.
    pub fn texture(&self, texture: TextureHandle) -> Option<MockTexture> {
        self.textures
            .lock()
            .iter()
            .find(|t| t.texture == texture)
            .cloned()
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled.lock().contains(&capability)
    }

    pub fn is_stream_active(&self, kind: StreamKind) -> bool {
        self.streams.lock().contains(&kind)
    }

    /// True when no capability or stream is left enabled.
    pub fn is_state_clean(&self) -> bool {
        self.enabled.lock().is_empty() && self.streams.lock().is_empty()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn upload(&self, width: u32, height: u32, channels: u32, data: &[u8]) -> TextureHandle {
        let texture = {
            let mut next = self.next_texture_name.lock();
            let texture = TextureHandle::new(*next);
            *next += 1;
            texture
        };

        self.textures.lock().push(MockTexture {
            texture,
            width,
            height,
            channels,
            data: data.to_vec(),
        });

        self.calls.lock().push(RenderCall::CreateTexture {
            texture,
            width,
            height,
            bytes: data.len(),
        });

        texture
    }
}

impl Default for MockRenderSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MockRenderSurface {
    fn enable(&self, capability: Capability) {
        self.enabled.lock().insert(capability);
        self.calls.lock().push(RenderCall::Enable(capability));
    }

    fn disable(&self, capability: Capability) {
        self.enabled.lock().remove(&capability);
        self.calls.lock().push(RenderCall::Disable(capability));
    }

    fn bind_texture(&self, unit: TextureUnit, texture: TextureHandle) {
        self.calls
            .lock()
            .push(RenderCall::BindTexture { unit, texture });
    }

    fn create_alpha_texture(&self, width: u32, height: u32, data: &[u8]) -> TextureHandle {
        self.upload(width, height, 1, data)
    }

    fn create_rgba_texture(
        &self,
        width: u32,
        height: u32,
        data: &[u8],
        has_alpha: bool,
    ) -> TextureHandle {
        self.upload(width, height, if has_alpha { 4 } else { 3 }, data)
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.textures.lock().retain(|t| t.texture != texture);
        self.calls.lock().push(RenderCall::DeleteTexture(texture));
    }

    fn set_vertex_stream(&self, stream: VertexStream<'_>) {
        let kind = stream.kind();
        self.streams.lock().insert(kind);
        self.calls.lock().push(RenderCall::SetStream {
            kind,
            vertices: stream.len(),
        });
    }

    fn clear_vertex_stream(&self, kind: StreamKind) {
        self.streams.lock().remove(&kind);
        self.calls.lock().push(RenderCall::ClearStream(kind));
    }

    fn draw_indexed_triangles(&self, indices: &[u16]) {
        self.calls.lock().push(RenderCall::DrawIndexed {
            index_count: indices.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::math::PackedVec3;

    #[test]
    fn test_mock_texture_upload() {
        let mock = MockRenderSurface::new();

        let a = mock.create_alpha_texture(4, 4, &[0u8; 16]);
        let b = mock.create_rgba_texture(2, 2, &[0u8; 16], true);

        assert_ne!(a, b);
        assert_eq!(mock.count_texture_creates(), 2);
        assert_eq!(mock.texture(b).unwrap().channels, 4);
    }

    #[test]
    fn test_mock_delete_texture() {
        let mock = MockRenderSurface::new();
        let texture = mock.create_rgba_texture(1, 1, &[0u8; 3], false);

        mock.delete_texture(texture);

        assert!(mock.texture(texture).is_none());
        assert_eq!(mock.calls().last(), Some(&RenderCall::DeleteTexture(texture)));
    }

    #[test]
    fn test_mock_tracks_state() {
        let mock = MockRenderSurface::new();
        let positions = [PackedVec3::default(); 4];

        mock.enable(Capability::Blend);
        mock.set_vertex_stream(VertexStream::Position(&positions));
        assert!(mock.is_enabled(Capability::Blend));
        assert!(mock.is_stream_active(StreamKind::Position));
        assert_eq!(mock.stream_len(StreamKind::Position), Some(4));

        mock.disable(Capability::Blend);
        mock.clear_vertex_stream(StreamKind::Position);
        assert!(mock.is_state_clean());
    }

    #[test]
    fn test_clear_calls() {
        let mock = MockRenderSurface::new();

        mock.draw_indexed_triangles(&[0, 1, 2]);
        assert_eq!(mock.call_count(), 1);

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
