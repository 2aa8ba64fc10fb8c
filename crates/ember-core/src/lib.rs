//! Ember Core
//!
//! Math, animation, geometry and diagnostics shared by the Ember crates.

pub mod alloc;
pub mod animation;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{Config, ProfilingMode, init};
