//! Bodyscale Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the measurement pipeline:
//! - Landmarks and the pose landmark index scheme
//! - Geometry utilities (distance, visibility checks)
//! - Measurement fields and records
//! - Measurement and filter configuration
//! - The error taxonomy

pub mod config;
pub mod error;
pub mod geometry;
pub mod landmark;
pub mod measurement;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use landmark::*;
pub use measurement::*;
