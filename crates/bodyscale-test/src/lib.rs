//! Bodyscale Test Harness - Synthetic poses and end-to-end scenarios
//!
//! This crate provides:
//! - A synthetic standing figure with known measurements
//! - Seeded noisy frame sources (jitter, occlusion, dropouts)
//! - Recording display and overlay sinks
//! - End-to-end pipeline scenarios

pub mod noise;
pub mod recording;
pub mod scenarios;
pub mod synthetic;

pub use noise::*;
pub use recording::*;
pub use scenarios::*;
pub use synthetic::*;
