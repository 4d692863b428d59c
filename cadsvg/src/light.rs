use geo::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// A point light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Rgba,
}

impl Light {
    pub fn new(position: Vec3) -> Self {
        Light::with_color(position, Rgba::WHITE)
    }

    pub fn with_color(position: Vec3, color: Rgba) -> Self {
        Light { position, color }
    }
}
