//! Top-level orchestration: `Scene(part, camera, lights) → Projector →
//! PlanarScene{facets+edges+axes} → SvgEmitter → SVG text`.

use crate::camera::Camera;
use crate::error::Result;
use crate::external::{CadKernel, CurveSampler, HlrKernel, SolidHandle};
use crate::light::Light;
use crate::part::Part;
use crate::projector::Projector;
use crate::scene::{PlanarCoordinateFrame, PlanarEdgesRepresentation, PlanarMeshRepresentation};
use crate::svg::{build_document, render_to_string, DocumentStyles};

/// The inputs to one render call.
pub struct Scene<'a> {
    pub part: &'a Part,
    pub camera: Camera,
    pub lights: Vec<Light>,
}

/// Everything the SVG emitter needs: projected, colored facets in painter
/// order; edges grouped by visibility class; the projected coordinate
/// frame.
pub struct RenderedScene {
    pub mesh: PlanarMeshRepresentation,
    pub edges: Vec<PlanarEdgesRepresentation>,
    pub coord_frame: PlanarCoordinateFrame,
}

/// Run the render pipeline: project every facet, determine visibility and
/// painter order, shade, classify and sample edges, and project the
/// coordinate frame. Mirrors the three-step assembly against one
/// `PlanarMeshRepresentation` (`project_facets` → `determine_visible_faces`
/// → `determine_face_colors`) that the original prototype's renderer
/// performs.
pub fn render(
    scene: &Scene,
    cad: &dyn CadKernel,
    solids: &[SolidHandle],
    hlr: &dyn HlrKernel,
    sampler: &dyn CurveSampler,
) -> Result<RenderedScene> {
    let projector = Projector::new(scene.camera)?;

    let mut mesh = projector.project_facets(scene.part);
    mesh.painter_order = projector.determine_visible_faces(scene.part);
    mesh.colors = projector.determine_face_colors(scene.part, &scene.lights);

    let edges = projector.project_curves_and_edges(cad, solids, hlr, sampler);
    let coord_frame = projector.coordinate_system();

    Ok(RenderedScene {
        mesh,
        edges,
        coord_frame,
    })
}

/// Run the pipeline and emit the resulting SVG document as text. Returns
/// `None` if the projected scene has no geometry to draw (e.g. an empty
/// part).
pub fn render_to_svg(
    scene: &Scene,
    cad: &dyn CadKernel,
    solids: &[SolidHandle],
    hlr: &dyn HlrKernel,
    sampler: &dyn CurveSampler,
    styles: &DocumentStyles,
) -> Result<Option<String>> {
    let rendered = render(scene, cad, solids, hlr, sampler)?;
    let doc = build_document(&rendered.mesh, &rendered.edges, &rendered.coord_frame, styles);
    Ok(doc.map(|node| render_to_string(&node)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::external::{EdgeHandle, HlrCompounds};
    use crate::material::Material;
    use crate::mesh::{FaceIndices, Geometry, Mesh, Topology};
    use crate::part::Solid;
    use geo::Vec3;
    use ndarray::arr2;
    use std::collections::HashMap;
    use std::path::Path;

    struct NoopCad;
    impl CadKernel for NoopCad {
        fn import_step(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
        fn solids(&self) -> Vec<SolidHandle> {
            vec![]
        }
        fn export_step(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
        fn edges_of(&self, _solid: SolidHandle) -> Vec<EdgeHandle> {
            vec![]
        }
        fn coarse_tessellate(&self, _solid: SolidHandle, _tolerance: f64) -> Result<Mesh> {
            unimplemented!("not exercised by this test")
        }
    }

    struct EmptyHlr;
    impl HlrKernel for EmptyHlr {
        fn classify(
            &self,
            _cad: &dyn CadKernel,
            _solids: &[SolidHandle],
            _projector: &Projector,
        ) -> HlrCompounds {
            HlrCompounds::default()
        }
    }

    struct NoopSampler;
    impl CurveSampler for NoopSampler {
        fn sample(&self, _cad: &dyn CadKernel, _edge: EdgeHandle, _tolerance: f64) -> Vec<(f64, f64, f64)> {
            vec![]
        }
    }

    fn triangle_part() -> Part {
        let geometry = Geometry::new(arr2(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ]))
        .unwrap();
        let topology = Topology::new(vec![FaceIndices::Tri([0, 1, 2])]);
        let mesh = Mesh::new(geometry, topology).unwrap();
        let solid = Solid::new(mesh, Rgba::opaque(100, 100, 100), Material::default_solid());
        Part::new("triangle", vec![solid])
    }

    #[test]
    fn render_produces_one_visible_facet_with_base_color_and_no_edges() {
        let part = triangle_part();
        let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let scene = Scene {
            part: &part,
            camera,
            lights: vec![],
        };

        let rendered = render(&scene, &NoopCad, &[], &EmptyHlr, &NoopSampler).unwrap();
        let facets: Vec<_> = rendered.mesh.facets().collect();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].color, Rgba::opaque(100, 100, 100));
        assert!(rendered.edges.is_empty());
    }

    #[test]
    fn render_to_svg_emits_one_polygon_and_an_svg_root() {
        let part = triangle_part();
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let scene = Scene {
            part: &part,
            camera,
            lights: vec![],
        };
        let styles = DocumentStyles {
            face: crate::style::FaceStyle::default(),
            lines: HashMap::new(),
            coord_system: None,
            image: crate::svg::ImageConfig::default(),
        };

        let svg = render_to_svg(&scene, &NoopCad, &[], &EmptyHlr, &NoopSampler, &styles)
            .unwrap()
            .expect("non-empty scene yields a document");

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<polygon").count(), 1);
    }
}
