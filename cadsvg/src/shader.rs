//! Phong per-facet shading (§4.6).

use geo::Vec3;

use crate::color::Rgba;
use crate::light::Light;
use crate::material::Material;
use crate::part::Solid;

/// Per-facet RGBA colors for every facet of `solid`, lit by `lights`, seen
/// from a camera looking along `view`.
///
/// With zero lights the result is `solid.color` unchanged for every facet —
/// alpha is never modulated by lighting.
pub fn shade_solid(solid: &Solid, lights: &[Light], view: Vec3) -> Vec<Rgba> {
    (0..solid.mesh.n_faces())
        .map(|facet_id| {
            let center = solid
                .mesh
                .center(facet_id)
                .expect("facet_id is within bounds by construction");
            let normal = solid
                .mesh
                .normal(facet_id)
                .expect("facet_id is within bounds by construction");
            shade_facet(solid.color, solid.material, center, normal, lights, view)
        })
        .collect()
}

fn shade_facet(
    base: Rgba,
    material: Material,
    center: Vec3,
    normal: Vec3,
    lights: &[Light],
    view: Vec3,
) -> Rgba {
    if lights.is_empty() {
        return base;
    }

    let view_i = -view;
    let base_rgb = (f64::from(base.r), f64::from(base.g), f64::from(base.b));
    let mut accum = (0.0, 0.0, 0.0);

    let ambient_weight = 1.0 / lights.len() as f64;

    for light in lights {
        let l = (light.position - center).normalized_or_zero();
        let cos_d = l.dot(&normal).max(0.0);
        let r = normal * (2.0 * cos_d) - l;
        let cos_s = r.dot(&view_i).max(0.0);

        let ambient = scale(base_rgb, ambient_weight * material.ka);
        accum = add(accum, ambient);

        let light_rgb = (
            f64::from(light.color.r),
            f64::from(light.color.g),
            f64::from(light.color.b),
        );
        let diffuse = scale(light_rgb, material.kd * cos_d);
        accum = add(accum, diffuse);

        if material.kd * cos_d >= 0.0 {
            let specular = scale(light_rgb, material.ks * cos_s.powf(material.alpha));
            accum = add(accum, specular);
        }
    }

    Rgba::new(
        clamp_round(accum.0),
        clamp_round(accum.1),
        clamp_round(accum.2),
        base.a,
    )
}

fn add(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

fn scale(a: (f64, f64, f64), s: f64) -> (f64, f64, f64) {
    (a.0 * s, a.1 * s, a.2 * s)
}

fn clamp_round(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{FaceIndices, Geometry, Mesh, Topology};
    use ndarray::arr2;

    fn flat_triangle_solid() -> Solid {
        let geometry = Geometry::new(arr2(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ]))
        .unwrap();
        let topology = Topology::new(vec![FaceIndices::Tri([0, 1, 2])]);
        let mesh = Mesh::new(geometry, topology).unwrap();
        Solid::new(
            mesh,
            Rgba::opaque(100, 100, 100),
            Material::new(0.7, 0.7, 0.3, 0.5),
        )
    }

    /// Triangle whose centroid is exactly the origin, normal exactly `+Z` —
    /// the scenario spelled out as scenario 4.
    fn centered_triangle_solid() -> Solid {
        let geometry = Geometry::new(arr2(&[
            [-1.0, 2.0, -1.0],
            [-1.0, -1.0, 2.0],
            [0.0, 0.0, 0.0],
        ]))
        .unwrap();
        let topology = Topology::new(vec![FaceIndices::Tri([0, 1, 2])]);
        let mesh = Mesh::new(geometry, topology).unwrap();
        Solid::new(
            mesh,
            Rgba::opaque(100, 100, 100),
            Material::new(0.7, 0.7, 0.3, 0.5),
        )
    }

    #[test]
    fn zero_lights_yields_base_color_unchanged() {
        let solid = flat_triangle_solid();
        let colors = shade_solid(&solid, &[], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(colors, vec![solid.color]);
    }

    #[test]
    fn single_light_directly_in_front_gates_specular_to_zero() {
        let solid = centered_triangle_solid();
        let light = Light::new(Vec3::new(0.0, 0.0, 10.0));
        let colors = shade_solid(&solid, &[light], Vec3::new(0.0, 0.0, 1.0));

        // l = normalize((0,0,10) - (0,0,0)) = (0,0,1) = n, so cos_d = 1.
        // view_i = (0,0,-1); r = 2*1*n - l = (0,0,1); cos_s = r.dot(view_i) = -1 -> gated to 0.
        let expected = (0.7 * 100.0 + 0.7 * 1.0 * 255.0).round().clamp(0.0, 255.0) as u8;
        assert_eq!(colors[0].r, expected);
        assert_eq!(colors[0].g, expected);
        assert_eq!(colors[0].b, expected);
        assert_eq!(colors[0].a, 255);
    }
}
