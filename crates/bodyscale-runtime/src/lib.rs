//! Bodyscale Runtime - Frame-driven measurement pipeline
//!
//! One frame is fully processed before the next is accepted:
//! 1. Check the pipeline is running with a valid configuration snapshot
//! 2. Surface any reset made through a [`SessionHandle`]
//! 3. Extract a measurement record (or skip the frame)
//! 4. Emit overlay segments
//! 5. Push into the session buffer, filter, score
//! 6. Emit current record, window confidence and best estimate to the display

pub mod handle;
pub mod logging;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use handle::*;
pub use logging::*;
pub use pipeline::*;
pub use sink::*;
pub use source::*;
