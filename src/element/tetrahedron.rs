//! Tetrahedron element: 4 vertices, 6 edges, 4 triangular faces.

use super::{centroid, EdgeMap, Element, VertexMap};
use crate::error::Error;
use crate::math::{Scalar, Transformation, Vector3};
use crate::polygon::Triangle;

const EDGE_MAPPING: [EdgeMap; 6] = [
    EdgeMap { vertices: [0, 1], faces: [0, 1] },
    EdgeMap { vertices: [1, 2], faces: [0, 2] },
    EdgeMap { vertices: [2, 0], faces: [0, 3] },
    EdgeMap { vertices: [0, 3], faces: [1, 3] },
    EdgeMap { vertices: [1, 3], faces: [1, 2] },
    EdgeMap { vertices: [2, 3], faces: [2, 3] },
];

const VERTEX_MAPPING: [VertexMap; 4] = [
    VertexMap { edges: [0, 2, 3], orientations: [0, 1, 0], faces: [0, 1, 3] },
    VertexMap { edges: [0, 1, 4], orientations: [1, 0, 0], faces: [0, 1, 2] },
    VertexMap { edges: [1, 2, 5], orientations: [1, 0, 0], faces: [0, 2, 3] },
    VertexMap { edges: [3, 4, 5], orientations: [1, 1, 1], faces: [1, 3, 2] },
];

#[derive(Clone, Debug)]
pub struct Tetrahedron {
    pub vertices: [Vector3; 4],
    pub faces: [Triangle; 4],
    pub center: Vector3,
    pub volume: Scalar,
}

impl Tetrahedron {
    /// Build from four vertices; `v3` must lie on the positive side of the
    /// triangle `(v0, v1, v2)`.
    pub fn new(vertices: [Vector3; 4]) -> Result<Self, Error> {
        let [v0, v1, v2, v3] = vertices;
        if (v1 - v0).cross(&(v2 - v0)).dot(&(v3 - v0)) < 0.0 {
            return Err(Error::InvalidVertexOrder);
        }

        Ok(Self::build(vertices))
    }

    /// Build from a slice of exactly four vertices.
    pub fn from_vertices(vertices: &[Vector3]) -> Result<Self, Error> {
        match vertices {
            &[v0, v1, v2, v3] => Self::new([v0, v1, v2, v3]),
            _ => Err(Error::InvalidArgument),
        }
    }

    fn build(vertices: [Vector3; 4]) -> Self {
        let faces = [
            Triangle::new([vertices[2], vertices[1], vertices[0]]),
            Triangle::new([vertices[0], vertices[1], vertices[3]]),
            Triangle::new([vertices[1], vertices[2], vertices[3]]),
            Triangle::new([vertices[2], vertices[0], vertices[3]]),
        ];

        let center = centroid(&vertices);
        let volume = compute_volume(&vertices);

        Self { vertices, faces, center, volume }
    }
}

fn compute_volume(vertices: &[Vector3; 4]) -> Scalar {
    (1.0 / 6.0)
        * (vertices[0] - vertices[3])
            .dot(&(vertices[1] - vertices[3]).cross(&(vertices[2] - vertices[3])))
            .abs()
}

impl Element for Tetrahedron {
    type Face = Triangle;
    type Areas = [Scalar; 6];

    const VERTEX_COUNT: usize = 4;
    const EDGE_COUNT: usize = 6;
    const FACE_COUNT: usize = 4;

    fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    fn faces(&self) -> &[Triangle] {
        &self.faces
    }

    fn center(&self) -> Vector3 {
        self.center
    }

    fn volume(&self) -> Scalar {
        self.volume
    }

    fn apply(&mut self, t: &Transformation) {
        for v in &mut self.vertices {
            *v = t.apply(v);
        }
        for f in &mut self.faces {
            f.apply(t);
        }

        self.center = centroid(&self.vertices);
        self.volume = compute_volume(&self.vertices);
    }

    fn edge_mapping() -> &'static [EdgeMap] {
        &EDGE_MAPPING
    }

    fn vertex_mapping() -> &'static [VertexMap] {
        &VERTEX_MAPPING
    }

    fn zeroed_areas() -> [Scalar; 6] {
        [0.0; 6]
    }
}
