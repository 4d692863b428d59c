//! Back-face culling and the cross-solid painter sort (§4.5).

use geo::Vec3;

use crate::part::Part;

/// Back-face-cull then depth-sort every solid's facets against `view`.
///
/// Returns `(solid_idx, facet_idx)` pairs in ascending order of
/// `view · center` (farthest from the camera first) using a **stable**
/// sort, so ties fall back to solid-index-major, then facet-index-major
/// input order — the single global ordering the rest of the pipeline
/// assumes.
pub fn visible_faces_sorted(part: &Part, view: Vec3) -> Vec<(usize, usize)> {
    let mut depths: Vec<(f64, usize, usize)> = Vec::new();

    for (solid_idx, solid) in part.solids.iter().enumerate() {
        let mesh = &solid.mesh;
        for facet_idx in 0..mesh.n_faces() {
            let normal = mesh
                .normal(facet_idx)
                .expect("facet_idx is within bounds by construction");
            if view.dot(&normal) >= 0.0 {
                let center = mesh
                    .center(facet_idx)
                    .expect("facet_idx is within bounds by construction");
                depths.push((view.dot(&center), solid_idx, facet_idx));
            }
        }
    }

    depths.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("depths are never NaN"));

    depths
        .into_iter()
        .map(|(_, solid_idx, facet_idx)| (solid_idx, facet_idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::material::Material;
    use crate::mesh::{FaceIndices, Geometry, Mesh, Topology};
    use crate::part::Solid;
    use ndarray::arr2;

    fn triangle_solid(z: f64, reversed: bool) -> Solid {
        let geometry = Geometry::new(arr2(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [z, z, z],
        ]))
        .unwrap();
        let ids = if reversed { [0, 2, 1] } else { [0, 1, 2] };
        let topology = Topology::new(vec![FaceIndices::Tri(ids)]);
        let mesh = Mesh::new(geometry, topology).unwrap();
        Solid::new(mesh, Rgba::WHITE, Material::default_solid())
    }

    #[test]
    fn front_facing_triangle_is_visible() {
        let part = Part::new("p", vec![triangle_solid(0.0, false)]);
        let visible = visible_faces_sorted(&part, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(visible, vec![(0, 0)]);
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let part = Part::new("p", vec![triangle_solid(0.0, true)]);
        let visible = visible_faces_sorted(&part, Vec3::new(0.0, 0.0, 1.0));
        assert!(visible.is_empty());
    }

    #[test]
    fn depth_order_is_far_to_near_and_reverses_with_view() {
        let part = Part::new(
            "p",
            vec![triangle_solid(0.0, false), triangle_solid(10.0, false)],
        );

        let front_view = visible_faces_sorted(&part, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(front_view, vec![(0, 0), (1, 0)]);

        let back_view = visible_faces_sorted(&part, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(back_view, vec![(1, 0), (0, 0)]);
    }
}
