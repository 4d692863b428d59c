//! The planar scene (§4.7): projected facets, edge groups, and the 2D
//! coordinate frame, all owned by the call stack of one render.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::mesh::Topology;

/// Closed enumeration of edge visibility classes, in the emitter's
/// mandatory ascending draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeVisibilityClass {
    HiddenSmooth,
    HiddenSharp,
    VisibleSmooth,
    VisibleSharp,
    VisibleOutline,
}

impl EdgeVisibilityClass {
    /// All variants, already in draw order.
    pub const ALL: [EdgeVisibilityClass; 5] = [
        EdgeVisibilityClass::HiddenSmooth,
        EdgeVisibilityClass::HiddenSharp,
        EdgeVisibilityClass::VisibleSmooth,
        EdgeVisibilityClass::VisibleSharp,
        EdgeVisibilityClass::VisibleOutline,
    ];
}

/// A projected, colored facet: 2D points (one per vertex, triangle or quad
/// cardinality) plus the shaded color.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarFacet {
    pub points: Vec<(f64, f64)>,
    pub color: Rgba,
}

/// The axis-aligned bounding box of a 2D point set, as `(min, max, extent)`
/// per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox2 {
    pub fn extent_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn extent_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Per-solid projected geometries and topologies, the painter-sorted
/// `(solid_idx, facet_idx)` pairs, and per-solid shaded colors. Produced by
/// [`crate::projector::Projector::project_facets`] plus
/// `determine_visible_faces`/`determine_face_colors`.
#[derive(Debug, Clone)]
pub struct PlanarMeshRepresentation {
    pub(crate) geometries: Vec<Vec<(f64, f64)>>,
    pub(crate) topologies: Vec<Topology>,
    pub(crate) painter_order: Vec<(usize, usize)>,
    pub(crate) colors: Vec<Vec<Rgba>>,
}

impl PlanarMeshRepresentation {
    /// Facets in painter order, ready for SVG emission.
    pub fn facets(&self) -> impl Iterator<Item = PlanarFacet> + '_ {
        self.painter_order.iter().map(move |&(solid_idx, facet_idx)| {
            let face = self.topologies[solid_idx]
                .get(facet_idx)
                .expect("painter_order only references facets that exist");
            let points = face
                .as_slice()
                .iter()
                .map(|&vid| self.geometries[solid_idx][vid])
                .collect();
            let color = self.colors[solid_idx][facet_idx];
            PlanarFacet { points, color }
        })
    }

    /// The axis-aligned box over the union of all vertex columns of every
    /// solid (not just the visible/kept facets).
    pub fn bounding_box(&self) -> Option<BoundingBox2> {
        let mut it = self.geometries.iter().flatten();
        let &(x0, y0) = it.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for &(x, y) in it {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(BoundingBox2 {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

/// A projected polyline, sampled from a parametric curve at a fixed
/// chordal tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarEdge {
    pub points: Vec<(f64, f64)>,
}

impl PlanarEdge {
    pub fn start(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }
}

/// A group of edges sharing a visibility class, in HLR-kernel delivery
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarEdgesRepresentation {
    pub class: EdgeVisibilityClass,
    pub edges: Vec<PlanarEdge>,
}

/// Four 2D points `{origin, x_tip, y_tip, z_tip}`. Any tip may be `NaN` when
/// its 3D direction is (near-)parallel to the view; such an axis must be
/// skipped during SVG emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarCoordinateFrame {
    pub origin: (f64, f64),
    pub x_tip: (f64, f64),
    pub y_tip: (f64, f64),
    pub z_tip: (f64, f64),
}

impl PlanarCoordinateFrame {
    pub fn is_axis_finite(tip: (f64, f64)) -> bool {
        tip.0.is_finite() && tip.1.is_finite()
    }
}
