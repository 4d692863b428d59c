//! The geometry kernel (§4.1) and [`Mesh`] (§4.2).

use geo::{matrix, Vec3};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// A dense `(D, N)` vertex cloud, column-major by vertex id.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    base: Array2<f64>,
}

impl Geometry {
    /// Rejects an empty vertex cloud (`N == 0`).
    pub fn new(base: Array2<f64>) -> Result<Self> {
        if base.ncols() == 0 {
            return Err(RenderError::InvalidGeometry(
                "vertex cloud has zero columns".into(),
            ));
        }
        Ok(Geometry { base })
    }

    pub fn dimension(&self) -> usize {
        self.base.nrows()
    }

    pub fn len(&self) -> usize {
        self.base.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn base(&self) -> &Array2<f64> {
        &self.base
    }

    /// The vertex at `id` as a [`Vec3`]. Requires `dimension() == 3`.
    pub fn vertex(&self, id: usize) -> Result<Vec3> {
        if self.dimension() != 3 {
            return Err(RenderError::InvalidGeometry(format!(
                "expected 3D geometry, got dimension {}",
                self.dimension()
            )));
        }
        if id >= self.len() {
            return Err(RenderError::InvalidIndex(format!(
                "vertex id {} out of range (N = {})",
                id,
                self.len()
            )));
        }
        let c = self.base.column(id);
        Ok(Vec3::new(c[0], c[1], c[2]))
    }
}

/// A facet's ordered vertex-id tuple: a triangle or a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceIndices {
    Tri([usize; 3]),
    Quad([usize; 4]),
}

impl FaceIndices {
    pub fn as_slice(&self) -> &[usize] {
        match self {
            FaceIndices::Tri(ids) => ids,
            FaceIndices::Quad(ids) => ids,
        }
    }

    pub fn cardinality(&self) -> usize {
        self.as_slice().len()
    }
}

/// Facet id (Vec index, i.e. insertion order) → vertex-id tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    faces: Vec<FaceIndices>,
}

impl Topology {
    pub fn new(faces: Vec<FaceIndices>) -> Self {
        Topology { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, facet_id: usize) -> Option<&FaceIndices> {
        self.faces.get(facet_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &FaceIndices)> {
        self.faces.iter().enumerate()
    }

    /// Triangle-only sub-mapping, facet ids preserved.
    pub fn triangles(&self) -> impl Iterator<Item = (usize, &[usize; 3])> {
        self.iter().filter_map(|(id, f)| match f {
            FaceIndices::Tri(ids) => Some((id, ids)),
            FaceIndices::Quad(_) => None,
        })
    }

    /// Quad-only sub-mapping, facet ids preserved.
    pub fn quadrilaterals(&self) -> impl Iterator<Item = (usize, &[usize; 4])> {
        self.iter().filter_map(|(id, f)| match f {
            FaceIndices::Quad(ids) => Some((id, ids)),
            FaceIndices::Tri(_) => None,
        })
    }
}

/// `Geometry + Topology`, plus derived per-facet centroid/normal tables.
/// Immutable after construction — any edit produces a new `Mesh`.
#[derive(Debug, Clone)]
pub struct Mesh {
    geometry: Geometry,
    topology: Topology,
    centers: Array2<f64>,
    normals: Array2<f64>,
}

impl Mesh {
    /// Every facet's centroid/normal is derived through batched `(3, F)`
    /// matrix math (`geo::matrix::cross`/`column_normalize`), not per-facet
    /// `Vec3` arithmetic — the geometry kernel's column-wise vocabulary
    /// from `geo::matrix` is exactly what this derivation routes through.
    /// A quad is split into its two constituent triangles `{0,1,2}` and
    /// `{2,3,0}` (the same split the centroid uses) and the two triangles'
    /// contributions are averaged/re-normalized afterward.
    pub fn new(geometry: Geometry, topology: Topology) -> Result<Self> {
        if geometry.dimension() != 3 {
            return Err(RenderError::InvalidGeometry(format!(
                "mesh geometry must be 3D, got dimension {}",
                geometry.dimension()
            )));
        }

        let f = topology.len();
        let mut p0 = Array2::zeros((3, f));
        let mut p1 = Array2::zeros((3, f));
        let mut p2 = Array2::zeros((3, f));

        for (id, face) in topology.iter() {
            let ids = face.as_slice();
            write_column(&mut p0, id, geometry.vertex(ids[0])?);
            write_column(&mut p1, id, geometry.vertex(ids[1])?);
            write_column(&mut p2, id, geometry.vertex(ids[2])?);
        }

        let normals1 = matrix::column_normalize(
            &matrix::cross(&(&p1 - &p0), &(&p2 - &p1))
                .map_err(|e| RenderError::InvalidGeometry(e.to_string()))?,
        );
        let centers1 = (&p0 + &p1 + &p2).mapv(|x| x / 3.0);

        let mut centers = centers1;
        let mut normals = normals1;

        let quad_ids: Vec<usize> = topology.quadrilaterals().map(|(id, _)| id).collect();
        if !quad_ids.is_empty() {
            let qf = quad_ids.len();
            let mut q2 = Array2::zeros((3, qf));
            let mut q3 = Array2::zeros((3, qf));
            let mut q0 = Array2::zeros((3, qf));
            let mut n1_for_quads = Array2::zeros((3, qf));

            for (j, &id) in quad_ids.iter().enumerate() {
                let ids = topology
                    .get(id)
                    .expect("quad id was just collected from this topology")
                    .as_slice();
                write_column(&mut q2, j, geometry.vertex(ids[2])?);
                write_column(&mut q3, j, geometry.vertex(ids[3])?);
                write_column(&mut q0, j, geometry.vertex(ids[0])?);
                n1_for_quads.column_mut(j).assign(&normals.column(id));
            }

            let normals2 = matrix::column_normalize(
                &matrix::cross(&(&q3 - &q2), &(&q0 - &q3))
                    .map_err(|e| RenderError::InvalidGeometry(e.to_string()))?,
            );
            let centers2 = (&q2 + &q3 + &q0).mapv(|x| x / 3.0);
            let combined_normals = matrix::column_normalize(&(&n1_for_quads + &normals2));

            for (j, &id) in quad_ids.iter().enumerate() {
                let c1 = centers.column(id).to_owned();
                let center = (&c1 + &centers2.column(j)).mapv(|x| x / 2.0);
                centers.column_mut(id).assign(&center);
                normals.column_mut(id).assign(&combined_normals.column(j));
            }
        }

        Ok(Mesh {
            geometry,
            topology,
            centers,
            normals,
        })
    }

    pub fn n_nodes(&self) -> usize {
        self.geometry.len()
    }

    pub fn n_faces(&self) -> usize {
        self.topology.len()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn centers(&self) -> &Array2<f64> {
        &self.centers
    }

    pub fn normals(&self) -> &Array2<f64> {
        &self.normals
    }

    pub fn center(&self, facet_id: usize) -> Result<Vec3> {
        self.check_facet(facet_id)?;
        let c = self.centers.column(facet_id);
        Ok(Vec3::new(c[0], c[1], c[2]))
    }

    pub fn normal(&self, facet_id: usize) -> Result<Vec3> {
        self.check_facet(facet_id)?;
        let n = self.normals.column(facet_id);
        Ok(Vec3::new(n[0], n[1], n[2]))
    }

    /// The facet's vertices, in declared order.
    pub fn facet_vertices(&self, facet_id: usize) -> Result<Vec<Vec3>> {
        let face = self.topology.get(facet_id).ok_or_else(|| {
            RenderError::InvalidIndex(format!("facet id {} out of range", facet_id))
        })?;
        facet_vertices_checked(&self.geometry, face.as_slice())
    }

    fn check_facet(&self, facet_id: usize) -> Result<()> {
        if facet_id >= self.n_faces() {
            return Err(RenderError::InvalidIndex(format!(
                "facet id {} out of range (F = {})",
                facet_id,
                self.n_faces()
            )));
        }
        Ok(())
    }
}

fn facet_vertices_checked(geometry: &Geometry, ids: &[usize]) -> Result<Vec<Vec3>> {
    ids.iter().map(|&id| geometry.vertex(id)).collect()
}

fn write_column(m: &mut Array2<f64>, col: usize, v: Vec3) {
    m[[0, col]] = v.x;
    m[[1, col]] = v.y;
    m[[2, col]] = v.z;
}
