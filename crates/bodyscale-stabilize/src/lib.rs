//! Bodyscale Stabilize - Turning noisy per-frame records into a trustworthy estimate
//!
//! This crate implements the stabilization pipeline:
//! - Fixed-capacity measurement buffer (FIFO)
//! - Range and left/right symmetry filtering
//! - Averaging and confidence scoring over the filtered window
//! - Best-so-far estimate tracking (high-water mark)
//! - Session state with atomic reset

pub mod buffer;
pub mod filter;
pub mod score;
pub mod session;
pub mod tracker;

pub use buffer::*;
pub use filter::*;
pub use score::*;
pub use session::*;
pub use tracker::*;
