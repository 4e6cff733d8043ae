//! Platform abstraction layer
//!
//! Browser-side glue between the page and the simulation:
//! - `dom`: layout reads, rendering, overlay
//! - `pointer`: exclusive pointer capture and relative motion

pub mod dom;
pub mod pointer;

pub use dom::Dom;
pub use pointer::MotionListener;
