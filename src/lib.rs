//! toll-polyline core
//!
//! Turns a routing provider's response into the polyline and per-point
//! timing data a toll calculation API consumes.

pub mod config;
pub mod flexpolyline;
pub mod geometry;
pub mod here;
pub mod pipeline;
pub mod polyline;
pub mod timing;
pub mod traits;
pub mod varint;
pub mod vehicle;
