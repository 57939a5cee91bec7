//! Circular carousel layout: same-sized items placed along an arc, scaled
//! toward the front, recycled as they rotate in and out of view.
//!
//! The engine never owns the view tree. A toolkit plugs in through
//! [`LayoutHost`]; [`MemoryHost`] is a complete in-memory implementation.

pub mod arc;
pub mod host;
pub mod memory;
pub mod scroller;

pub use arc::{
    Bounds, CircularLayout, ItemTransform, LayoutParams, ParamsError, Point, ScrollDirection, Size,
};
pub use host::{ItemIndex, LayoutHost};
pub use memory::{HostStats, MemoryHost, MemoryView, ViewId};
pub use scroller::{
    DEFAULT_GLIDE_STEP, DirectionHint, LinearSmoothScroller, ScrollStep, SmoothScroller,
};
