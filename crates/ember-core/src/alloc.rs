//! Hash collections used across Ember.
//!
//! Re-exports AHash-backed maps so lookup tables (glyph metrics, texture
//! registries) share one hasher choice.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
