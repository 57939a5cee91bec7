use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen bounds of an item before rotation and scale are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Displacement from the anchor for an item rotated `rotate` degrees away
/// from the front of the arc.
pub fn arc_displacement(radius: f64, rotate: f64) -> Point {
    let theta = (90.0 - rotate).to_radians();
    Point::new(radius * theta.cos(), radius * theta.sin())
}

/// Linear falloff from `max_scale` at the front to 1.0 at `min_scale_rotate`.
pub fn scale_for(rotate: f64, max_scale: f64, min_scale_rotate: f64) -> f64 {
    let r = rotate.abs().min(min_scale_rotate);
    (1.0 - r / min_scale_rotate) * (max_scale - 1.0) + 1.0
}

/// Everything the host needs to draw one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemTransform {
    pub bounds: Bounds,
    pub rotation: f64,
    pub scale: f64,
}

impl ItemTransform {
    pub fn calculate(
        anchor: Point,
        item_size: Size,
        radius: f64,
        rotate: f64,
        max_scale: f64,
        min_scale_rotate: f64,
    ) -> Self {
        let d = arc_displacement(radius, rotate);
        let origin = Point::new(anchor.x + d.x, anchor.y + d.y);

        Self {
            bounds: Bounds::from_origin(origin, item_size),
            rotation: rotate,
            scale: scale_for(rotate, max_scale, min_scale_rotate),
        }
    }
}
