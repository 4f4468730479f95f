//! Test fixtures for toll-polyline.
//!
//! Route-provider responses shaped like real routing API output, with
//! section polylines whose decoded points are known exactly.

pub mod here_responses;

pub use here_responses::*;
