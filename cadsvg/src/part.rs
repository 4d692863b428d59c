use rand::Rng;

use crate::color::Rgba;
use crate::material::Material;
use crate::mesh::Mesh;

/// A tessellated solid: a mesh plus a base color and Phong material.
#[derive(Debug, Clone)]
pub struct Solid {
    pub mesh: Mesh,
    pub color: Rgba,
    pub material: Material,
}

impl Solid {
    pub fn new(mesh: Mesh, color: Rgba, material: Material) -> Self {
        Solid {
            mesh,
            color,
            material,
        }
    }

    /// A solid with the conventional defaults: a random opaque gray in
    /// `[50, 230]` and `Material::default_solid()`.
    pub fn with_defaults<R: Rng + ?Sized>(mesh: Mesh, rng: &mut R) -> Self {
        Solid::new(mesh, Rgba::random_gray(rng, 50, 230), Material::default_solid())
    }
}

/// An ordered sequence of solids. Its index in `solids` is the stable
/// identity used as the first dimension of every cross-solid operation.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub solids: Vec<Solid>,
}

impl Part {
    pub fn new(name: impl Into<String>, solids: Vec<Solid>) -> Self {
        Part {
            name: name.into(),
            solids,
        }
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}
