//! Bodyscale Measure - From one landmark frame to one measurement record
//!
//! # Flow
//!
//! Landmark frame + reference height → visibility gate → head-top / feet
//! estimate → scale factor → limb lengths → measurement record.
//!
//! A frame that cannot be measured produces no record at all, never a record
//! with garbage fields.

pub mod extract;
pub mod limb;
pub mod overlay;

pub use extract::*;
pub use limb::*;
pub use overlay::*;
