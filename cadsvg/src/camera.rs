use geo::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// An orthographic camera: a position and a unit view direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    position: Vec3,
    view: Vec3,
}

impl Camera {
    /// `view` is normalized at construction; fails with `InvalidCamera` if
    /// it has (near-)zero magnitude.
    pub fn new(position: Vec3, view: Vec3) -> Result<Self> {
        if view.norm() <= f64::EPSILON {
            return Err(RenderError::InvalidCamera);
        }
        Ok(Camera {
            position,
            view: view.normalized(),
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view(&self) -> Vec3 {
        self.view
    }
}
