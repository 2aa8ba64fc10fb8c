//! Ember Render
//!
//! Rendering-side types shared by the Ember crates:
//! - [`Color`]: linear RGBA color usable directly in vertex buffers
//! - [`Texture`]: a native texture plus its power-of-two dimensions
//! - [`RenderSurface`]: the draw contract implemented by the native backend
//!   (re-exported from `ember-test-utils`)

mod color;
mod texture;

pub use color::Color;
pub use texture::{Texture, TextureError, TextureResult, valid_texture_dimension};

pub use ember_test_utils::{
    Capability, RenderSurface, StreamKind, TextureHandle, TextureUnit, VertexStream,
};
