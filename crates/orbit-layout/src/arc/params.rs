use super::{
    DEFAULT_RADIUS, DISTANCE_RATIO, FIRST_ANGLE, INTERVAL_ANGLE, MAX_REMOVE_DEGREE, MAX_SCALE,
    MIN_REMOVE_DEGREE, MIN_SCALE_ROTATE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed at construction; the engine never mutates these.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutParams {
    pub radius: f64,
    pub first_angle: f64,
    pub interval_angle: f64,
    pub max_scale: f64,
    pub min_scale_rotate: f64,
    pub min_remove_degree: f64,
    pub max_remove_degree: f64,
    pub distance_ratio: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            first_angle: FIRST_ANGLE,
            interval_angle: INTERVAL_ANGLE,
            max_scale: MAX_SCALE,
            min_scale_rotate: MIN_SCALE_ROTATE,
            min_remove_degree: MIN_REMOVE_DEGREE,
            max_remove_degree: MAX_REMOVE_DEGREE,
            distance_ratio: DISTANCE_RATIO,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be a finite number greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("radius must be finite and non-negative, got {0}")]
    Radius(f64),
    #[error("max_scale must be finite and at least 1.0, got {0}")]
    MaxScale(f64),
    #[error("removal window is empty: min_remove_degree {min} > max_remove_degree {max}")]
    EmptyWindow { min: f64, max: f64 },
}

impl LayoutParams {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("interval_angle", self.interval_angle),
            ("min_scale_rotate", self.min_scale_rotate),
            ("distance_ratio", self.distance_ratio),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamsError::NotPositive { name, value });
            }
        }

        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(ParamsError::Radius(self.radius));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= 1.0) {
            return Err(ParamsError::MaxScale(self.max_scale));
        }
        if self.min_remove_degree > self.max_remove_degree {
            return Err(ParamsError::EmptyWindow {
                min: self.min_remove_degree,
                max: self.max_remove_degree,
            });
        }
        Ok(())
    }

    /// Inclusive on both ends: an item exactly on a bound stays attached.
    pub fn in_window(&self, rotate: f64) -> bool {
        rotate >= self.min_remove_degree && rotate <= self.max_remove_degree
    }
}
