//! External collaborators (§6): CAD kernel, mesher, HLR kernel, curve
//! sampler. None of these are implemented here — a CAD-backed crate
//! (wrapping e.g. a STEP/B-Rep library) would provide concrete impls; this
//! crate only needs the seam so the render pipeline can be built and tested
//! against a mock.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mesh::Mesh;
use crate::projector::Projector;

/// Opaque handle to a solid owned by a `CadKernel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub usize);

/// Opaque handle to a B-Rep edge owned by a `CadKernel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle(pub usize);

/// B-Rep construction, import/export and edge enumeration. Delegated to an
/// actual CAD kernel (e.g. a STEP/OCCT binding); not implemented in this
/// crate.
pub trait CadKernel {
    fn import_step(&mut self, path: &std::path::Path) -> Result<()>;
    fn solids(&self) -> Vec<SolidHandle>;
    fn export_step(&self, path: &std::path::Path) -> Result<()>;
    fn edges_of(&self, solid: SolidHandle) -> Vec<EdgeHandle>;
    /// Fallback tessellation used when a `Mesher` fails, at a fixed
    /// tolerance (always called with `10.0`, per §6).
    fn coarse_tessellate(&self, solid: SolidHandle, tolerance: f64) -> Result<Mesh>;
}

/// The nine qualitative mesh-size tokens and their numeric quality factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshSize {
    Default,
    Bulky,
    Coarse,
    Grainy,
    Medium,
    Fine,
    Ultrafine,
    Atomic,
    Insane,
}

impl MeshSize {
    /// The numeric quality factor `q` named in §6, `None` for `Default`
    /// (which uses the area-based formula instead).
    pub fn quality_factor(self) -> Option<f64> {
        match self {
            MeshSize::Default => None,
            MeshSize::Bulky => Some(5.0),
            MeshSize::Coarse => Some(10.0),
            MeshSize::Grainy => Some(20.0),
            MeshSize::Medium => Some(50.0),
            MeshSize::Fine => Some(100.0),
            MeshSize::Ultrafine => Some(200.0),
            MeshSize::Atomic => Some(500.0),
            MeshSize::Insane => Some(1000.0),
        }
    }
}

/// Bounding-box/area facts a `MeshSizeSpec::Qualitative` conversion needs;
/// supplied by the caller from the solid's B-Rep bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeContext {
    pub min_bbox_side: f64,
    pub max_bbox_side: f64,
    pub area: f64,
}

/// Either an explicit `(min_size, max_size)` bound, or a qualitative token
/// converted via `SizeContext`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshSizeSpec {
    Explicit(f64, f64),
    Qualitative(MeshSize),
}

impl MeshSizeSpec {
    /// `(min_size, max_size)` as required by `Mesher::mesh`.
    pub fn resolve(self, ctx: SizeContext) -> (f64, f64) {
        match self {
            MeshSizeSpec::Explicit(min, max) => (min, max),
            MeshSizeSpec::Qualitative(MeshSize::Default) => {
                (ctx.area / ctx.max_bbox_side, ctx.area / ctx.min_bbox_side)
            }
            MeshSizeSpec::Qualitative(size) => {
                let q = size
                    .quality_factor()
                    .expect("non-Default variants always have a quality factor");
                (
                    ctx.min_bbox_side / (q * 0.75),
                    ctx.max_bbox_side / (q * 1.25),
                )
            }
        }
    }
}

/// Produces a triangular surface mesh for a solid. Delegated to an actual
/// meshing library (e.g. gmsh); not implemented in this crate.
pub trait Mesher {
    fn mesh(&self, solid: SolidHandle, min_size: f64, max_size: f64) -> Result<Mesh>;
}

/// The five HLR edge compounds, keyed as named in §6. A `None` field means
/// the kernel returned a null compound for that class — recovered silently,
/// the class is simply omitted from projector output.
#[derive(Debug, Default)]
pub struct HlrCompounds {
    pub out_line_v: Option<Vec<EdgeHandle>>,
    pub out_line_h: Option<Vec<EdgeHandle>>,
    pub rg1_line_v: Option<Vec<EdgeHandle>>,
    pub h_compound: Option<Vec<EdgeHandle>>,
    pub v_compound: Option<Vec<EdgeHandle>>,
}

/// Hidden-Line-Removal itself: given a B-Rep and an orthographic projector,
/// classify every edge into one of the five compounds above. Delegated to a
/// geometry kernel; not implemented in this crate.
pub trait HlrKernel {
    fn classify(
        &self,
        cad: &dyn CadKernel,
        solids: &[SolidHandle],
        projector: &Projector,
    ) -> HlrCompounds;
}

/// Samples a parametric curve into a dense ordered point sequence at a
/// fixed chordal tolerance (`QuasiUniformDeflection` semantics).
pub trait CurveSampler {
    fn sample(&self, cad: &dyn CadKernel, edge: EdgeHandle, tolerance: f64) -> Vec<(f64, f64, f64)>;
}

/// Try `mesher` first; on `MeshingFailure` (or any other meshing error),
/// fall back to `cad`'s coarse tessellation at the fixed tolerance `10.0`
/// named in §6, logging the failure that triggered the fallback.
pub fn tessellate_with_fallback(
    mesher: &dyn Mesher,
    cad: &dyn CadKernel,
    solid: SolidHandle,
    min_size: f64,
    max_size: f64,
) -> Result<Mesh> {
    match mesher.mesh(solid, min_size, max_size) {
        Ok(mesh) => Ok(mesh),
        Err(err) => {
            log::warn!(
                "meshing failed for solid {:?} ({}); falling back to coarse tessellation",
                solid,
                err
            );
            cad.coarse_tessellate(solid, 10.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size_uses_area_formula() {
        let ctx = SizeContext {
            min_bbox_side: 2.0,
            max_bbox_side: 8.0,
            area: 16.0,
        };
        let (min, max) = MeshSizeSpec::Qualitative(MeshSize::Default).resolve(ctx);
        assert_eq!(min, 16.0 / 8.0);
        assert_eq!(max, 16.0 / 2.0);
    }

    #[test]
    fn qualitative_size_uses_bbox_formula() {
        let ctx = SizeContext {
            min_bbox_side: 3.0,
            max_bbox_side: 30.0,
            area: 100.0,
        };
        let (min, max) = MeshSizeSpec::Qualitative(MeshSize::Coarse).resolve(ctx);
        assert_eq!(min, 3.0 / (10.0 * 0.75));
        assert_eq!(max, 30.0 / (10.0 * 1.25));
    }

    fn stub_triangle_mesh() -> Mesh {
        use crate::mesh::{FaceIndices, Geometry, Topology};
        use ndarray::arr2;

        let geometry = Geometry::new(arr2(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ]))
        .unwrap();
        let topology = Topology::new(vec![FaceIndices::Tri([0, 1, 2])]);
        Mesh::new(geometry, topology).unwrap()
    }

    struct FailingMesher;
    impl Mesher for FailingMesher {
        fn mesh(&self, _solid: SolidHandle, _min_size: f64, _max_size: f64) -> Result<Mesh> {
            Err(crate::error::RenderError::MeshingFailure("stub failure".into()))
        }
    }

    struct CoarseOnlyCad;
    impl CadKernel for CoarseOnlyCad {
        fn import_step(&mut self, _path: &std::path::Path) -> Result<()> {
            Ok(())
        }
        fn solids(&self) -> Vec<SolidHandle> {
            vec![]
        }
        fn export_step(&self, _path: &std::path::Path) -> Result<()> {
            Ok(())
        }
        fn edges_of(&self, _solid: SolidHandle) -> Vec<EdgeHandle> {
            vec![]
        }
        fn coarse_tessellate(&self, _solid: SolidHandle, _tolerance: f64) -> Result<Mesh> {
            Ok(stub_triangle_mesh())
        }
    }

    #[test]
    fn meshing_failure_falls_back_to_coarse_tessellation() {
        let result = tessellate_with_fallback(&FailingMesher, &CoarseOnlyCad, SolidHandle(0), 0.1, 1.0);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().n_faces(), 1);
    }
}
