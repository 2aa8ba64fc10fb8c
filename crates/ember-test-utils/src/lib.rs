//! Test utilities for Ember.
//!
//! This crate owns the [`RenderSurface`] trait, the boundary between Ember's
//! geometry builders and the native graphics API, plus a recording
//! implementation for tests.
//!
//! # Overview
//!
//! - [`RenderSurface`] - Trait abstracting texture binding, vertex streams and draw calls
//! - `MockRenderSurface` - Records every call for assertions (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use ember_test_utils::{Capability, MockRenderSurface, RenderSurface};
//!
//! let mock = MockRenderSurface::new();
//! mock.enable(Capability::Blend);
//! mock.draw_indexed_triangles(&[0, 1, 2, 2, 1, 3]);
//!
//! assert_eq!(mock.count_draws(), 1);
//! assert!(mock.is_enabled(Capability::Blend));
//! # }
//! ```
//!
//! # Design
//!
//! Surface methods take `&self` and return owned, `Copy` handles. A native
//! adapter wraps a context that is already current on the calling thread, and
//! the mock uses a `Mutex` for interior mutability, so neither needs `&mut`.

#[cfg(feature = "mock")]
pub mod mock_render;
pub mod surface;

pub use surface::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
