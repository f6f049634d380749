//! Hexahedron element: 8 vertices, 12 edges, 6 quadrilateral faces.

use super::{centroid, EdgeMap, Element, VertexMap};
use crate::error::Error;
use crate::math::{Scalar, Transformation, Vector3};
use crate::polygon::Quadrilateral;

const EDGE_MAPPING: [EdgeMap; 12] = [
    EdgeMap { vertices: [0, 1], faces: [0, 1] },
    EdgeMap { vertices: [1, 2], faces: [0, 2] },
    EdgeMap { vertices: [2, 3], faces: [0, 3] },
    EdgeMap { vertices: [3, 0], faces: [0, 4] },
    EdgeMap { vertices: [0, 4], faces: [1, 4] },
    EdgeMap { vertices: [1, 5], faces: [1, 2] },
    EdgeMap { vertices: [2, 6], faces: [2, 3] },
    EdgeMap { vertices: [3, 7], faces: [3, 4] },
    EdgeMap { vertices: [4, 5], faces: [1, 5] },
    EdgeMap { vertices: [5, 6], faces: [2, 5] },
    EdgeMap { vertices: [6, 7], faces: [3, 5] },
    EdgeMap { vertices: [7, 4], faces: [4, 5] },
];

const VERTEX_MAPPING: [VertexMap; 8] = [
    VertexMap { edges: [0, 3, 4], orientations: [0, 1, 0], faces: [0, 1, 4] },
    VertexMap { edges: [0, 1, 5], orientations: [1, 0, 0], faces: [0, 1, 2] },
    VertexMap { edges: [1, 2, 6], orientations: [1, 0, 0], faces: [0, 2, 3] },
    VertexMap { edges: [2, 3, 7], orientations: [1, 0, 0], faces: [0, 3, 4] },
    VertexMap { edges: [4, 8, 11], orientations: [1, 0, 1], faces: [1, 4, 5] },
    VertexMap { edges: [5, 8, 9], orientations: [1, 1, 0], faces: [1, 2, 5] },
    VertexMap { edges: [6, 9, 10], orientations: [1, 1, 0], faces: [2, 3, 5] },
    VertexMap { edges: [7, 10, 11], orientations: [1, 1, 0], faces: [3, 4, 5] },
];

#[derive(Clone, Debug)]
pub struct Hexahedron {
    pub vertices: [Vector3; 8],
    pub faces: [Quadrilateral; 6],
    pub center: Vector3,
    pub volume: Scalar,
}

impl Hexahedron {
    /// Build from eight vertices: bottom quadrilateral `v0..v3` counter-
    /// clockwise as seen from the top face `v4..v7`, which follows in
    /// matching order. All six faces must be planar.
    pub fn new(vertices: [Vector3; 8]) -> Result<Self, Error> {
        let faces = build_faces(&vertices);
        if faces.iter().any(|f| !f.is_planar()) {
            return Err(Error::NonPlanarFace);
        }

        let volume = compute_volume(&vertices);
        if !(volume > 0.0) {
            return Err(Error::InvalidVertexOrder);
        }

        Ok(Self { vertices, faces, center: centroid(&vertices), volume })
    }

    /// Build from a slice of exactly eight vertices.
    pub fn from_vertices(vertices: &[Vector3]) -> Result<Self, Error> {
        match vertices {
            &[v0, v1, v2, v3, v4, v5, v6, v7] => Self::new([v0, v1, v2, v3, v4, v5, v6, v7]),
            _ => Err(Error::InvalidArgument),
        }
    }
}

fn build_faces(v: &[Vector3; 8]) -> [Quadrilateral; 6] {
    [
        Quadrilateral::new([v[3], v[2], v[1], v[0]]),
        Quadrilateral::new([v[0], v[1], v[5], v[4]]),
        Quadrilateral::new([v[1], v[2], v[6], v[5]]),
        Quadrilateral::new([v[2], v[3], v[7], v[6]]),
        Quadrilateral::new([v[3], v[0], v[4], v[7]]),
        Quadrilateral::new([v[4], v[5], v[6], v[7]]),
    ]
}

/// Signed volume via the long diagonal and three face diagonals.
fn compute_volume(v: &[Vector3; 8]) -> Scalar {
    let diagonal = v[6] - v[0];

    (1.0 / 6.0)
        * diagonal.dot(
            &((v[1] - v[0]).cross(&(v[2] - v[5]))
                + (v[4] - v[0]).cross(&(v[5] - v[7]))
                + (v[3] - v[0]).cross(&(v[7] - v[2]))),
        )
}

impl Element for Hexahedron {
    type Face = Quadrilateral;
    type Areas = [Scalar; 8];

    const VERTEX_COUNT: usize = 8;
    const EDGE_COUNT: usize = 12;
    const FACE_COUNT: usize = 6;

    fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    fn faces(&self) -> &[Quadrilateral] {
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

    fn zeroed_areas() -> [Scalar; 8] {
        [0.0; 8]
    }
}
