pub mod engine;
pub mod geometry;
pub mod params;

pub use engine::{CircularLayout, ScrollDirection};
pub use geometry::{Bounds, ItemTransform, Point, Size};
pub use params::{LayoutParams, ParamsError};

pub const DEFAULT_RADIUS: f64 = 100.0;
pub const FIRST_ANGLE: f64 = 0.0; // item 0 sits at the front
pub const INTERVAL_ANGLE: f64 = 30.0;
pub const MAX_SCALE: f64 = 1.4;
pub const MIN_SCALE_ROTATE: f64 = 40.0; // beyond this, items keep scale 1.0
pub const MIN_REMOVE_DEGREE: f64 = -120.0;
pub const MAX_REMOVE_DEGREE: f64 = 120.0;
pub const DISTANCE_RATIO: f64 = 10.0; // drag distance per degree
