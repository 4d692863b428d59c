//! The projector (§4.4): orthographic 3D→2D projection, and the bridge to
//! the externally-delegated HLR kernel.

use geo::Vec3;

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::external::{CadKernel, CurveSampler, HlrCompounds, HlrKernel, SolidHandle};
use crate::light::Light;
use crate::part::Part;
use crate::scene::{EdgeVisibilityClass, PlanarCoordinateFrame, PlanarEdge, PlanarEdgesRepresentation, PlanarMeshRepresentation};
use crate::shader;
use crate::sorter;

const PARALLEL_TOLERANCE: f64 = 1e-9;
const CHORDAL_TOLERANCE: f64 = 1e-2;

/// An orthographic projector bound to one camera: an origin at
/// `camera.position()` and an orthonormal `(u, v)` basis spanning the plane
/// orthogonal to `camera.view()`.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    camera: Camera,
    u: Vec3,
    v: Vec3,
}

impl Projector {
    pub fn new(camera: Camera) -> Result<Self> {
        let view = camera.view();

        let up_ref = if view.dot(&Vec3::new(0.0, 0.0, 1.0)).abs() > 1.0 - 1e-6 {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            Vec3::new(0.0, 0.0, 1.0)
        };

        let u = view.cross(&up_ref).normalized_or_zero();
        if u.norm() <= PARALLEL_TOLERANCE {
            return Err(RenderError::ProjectionDegenerate);
        }
        let v = view.cross(&u);
        if v.norm() <= PARALLEL_TOLERANCE {
            return Err(RenderError::ProjectionDegenerate);
        }

        Ok(Projector { camera, u, v })
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Project a single 3D point into `(u, v)` view-plane coordinates.
    pub fn project_point(&self, p: Vec3) -> (f64, f64) {
        let d = p - self.camera.position();
        (self.u.dot(&d), self.v.dot(&d))
    }

    /// Project every vertex of every solid's mesh; topology is carried
    /// across unchanged. `painter_order`/`colors` start empty — callers
    /// fill them in via `determine_visible_faces`/`determine_face_colors`
    /// (see `render::render`), mirroring the three-step assembly the
    /// original prototype performs against one mutable representation.
    pub fn project_facets(&self, part: &Part) -> PlanarMeshRepresentation {
        let mut geometries = Vec::with_capacity(part.len());
        let mut topologies = Vec::with_capacity(part.len());

        for solid in &part.solids {
            let geometry = solid.mesh.geometry();
            let points = (0..geometry.len())
                .map(|id| {
                    let v = geometry
                        .vertex(id)
                        .expect("id is within bounds by construction");
                    self.project_point(v)
                })
                .collect();
            geometries.push(points);
            topologies.push(solid.mesh.topology().clone());
        }

        PlanarMeshRepresentation {
            geometries,
            topologies,
            painter_order: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Back-face-culled, depth-sorted `(solid_idx, facet_idx)` pairs.
    pub fn determine_visible_faces(&self, part: &Part) -> Vec<(usize, usize)> {
        sorter::visible_faces_sorted(part, self.camera.view())
    }

    /// Per-solid shaded facet colors, in facet-id order (not painter
    /// order).
    pub fn determine_face_colors(&self, part: &Part, lights: &[Light]) -> Vec<Vec<crate::color::Rgba>> {
        part.solids
            .iter()
            .map(|solid| shader::shade_solid(solid, lights, self.camera.view()))
            .collect()
    }

    /// Project and group edges delivered by the HLR kernel into one
    /// [`PlanarEdgesRepresentation`] per non-null compound.
    pub fn project_curves_and_edges(
        &self,
        cad: &dyn CadKernel,
        solids: &[SolidHandle],
        hlr: &dyn HlrKernel,
        sampler: &dyn CurveSampler,
    ) -> Vec<PlanarEdgesRepresentation> {
        let compounds = hlr.classify(cad, solids, self);

        let mapping: [(Option<&Vec<crate::external::EdgeHandle>>, EdgeVisibilityClass); 5] = [
            (compounds.out_line_v.as_ref(), EdgeVisibilityClass::VisibleOutline),
            (compounds.out_line_h.as_ref(), EdgeVisibilityClass::HiddenSmooth),
            (compounds.rg1_line_v.as_ref(), EdgeVisibilityClass::VisibleSmooth),
            (compounds.h_compound.as_ref(), EdgeVisibilityClass::HiddenSharp),
            (compounds.v_compound.as_ref(), EdgeVisibilityClass::VisibleSharp),
        ];

        let mut out = Vec::new();
        for (maybe_edges, class) in mapping {
            let Some(edge_handles) = maybe_edges else {
                log::debug!("HLR kernel returned a null compound for {:?}; omitting", class);
                continue;
            };
            if edge_handles.is_empty() {
                log::debug!("HLR kernel returned an empty compound for {:?}; omitting", class);
                continue;
            }

            let edges = edge_handles
                .iter()
                .map(|&edge| {
                    let samples = sampler.sample(cad, edge, CHORDAL_TOLERANCE);
                    let points = samples
                        .into_iter()
                        .map(|(x, y, z)| self.project_point(Vec3::new(x, y, z)))
                        .collect();
                    PlanarEdge { points }
                })
                .collect();

            out.push(PlanarEdgesRepresentation { class, edges });
        }
        out
    }

    /// Project the canonical axes (and the origin) through this same
    /// projector. An axis whose 3D direction is (near-)parallel to the view
    /// is reported as `NaN` rather than a degenerate zero-length tip.
    pub fn coordinate_system(&self) -> PlanarCoordinateFrame {
        let origin = self.project_point(Vec3::zero());
        let x_tip = self.project_axis(Vec3::new(1.0, 0.0, 0.0));
        let y_tip = self.project_axis(Vec3::new(0.0, 1.0, 0.0));
        let z_tip = self.project_axis(Vec3::new(0.0, 0.0, 1.0));
        PlanarCoordinateFrame {
            origin,
            x_tip,
            y_tip,
            z_tip,
        }
    }

    fn project_axis(&self, axis: Vec3) -> (f64, f64) {
        if axis.dot(&self.camera.view()).abs() > 1.0 - PARALLEL_TOLERANCE {
            (f64::NAN, f64::NAN)
        } else {
            self.project_point(axis)
        }
    }
}
