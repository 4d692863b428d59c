use serde::{Deserialize, Serialize};

/// Phong material constants: ambient, diffuse, specular coefficients and a
/// specular shininess exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ka: f64,
    pub kd: f64,
    pub ks: f64,
    pub alpha: f64,
}

impl Material {
    pub fn new(ka: f64, kd: f64, ks: f64, alpha: f64) -> Self {
        Material { ka, kd, ks, alpha }
    }

    /// The default material assigned to a solid that doesn't specify one.
    pub fn default_solid() -> Self {
        Material::new(0.7, 0.7, 0.3, 0.5)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::default_solid()
    }
}
