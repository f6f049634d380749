//! Wedge (triangular prism) element: 6 vertices, 9 edges, 5 faces.
//!
//! All faces are stored as quadrilaterals; the two triangular caps repeat
//! an edge midpoint as their fourth vertex so that the face table stays
//! homogeneous.

use super::{centroid, EdgeMap, Element, VertexMap};
use crate::error::Error;
use crate::math::{Scalar, Transformation, Vector3};
use crate::polygon::Quadrilateral;

const EDGE_MAPPING: [EdgeMap; 9] = [
    EdgeMap { vertices: [0, 1], faces: [0, 1] },
    EdgeMap { vertices: [1, 2], faces: [0, 2] },
    EdgeMap { vertices: [2, 0], faces: [0, 3] },
    EdgeMap { vertices: [0, 3], faces: [1, 3] },
    EdgeMap { vertices: [1, 4], faces: [1, 2] },
    EdgeMap { vertices: [2, 5], faces: [2, 3] },
    EdgeMap { vertices: [3, 4], faces: [1, 4] },
    EdgeMap { vertices: [4, 5], faces: [2, 4] },
    EdgeMap { vertices: [5, 3], faces: [3, 4] },
];

const VERTEX_MAPPING: [VertexMap; 6] = [
    VertexMap { edges: [0, 2, 3], orientations: [0, 1, 0], faces: [0, 1, 3] },
    VertexMap { edges: [0, 1, 4], orientations: [1, 0, 0], faces: [0, 1, 2] },
    VertexMap { edges: [1, 2, 5], orientations: [1, 0, 0], faces: [0, 2, 3] },
    VertexMap { edges: [3, 6, 8], orientations: [1, 0, 1], faces: [1, 3, 4] },
    VertexMap { edges: [4, 6, 7], orientations: [1, 1, 0], faces: [1, 2, 4] },
    VertexMap { edges: [5, 7, 8], orientations: [1, 1, 0], faces: [2, 3, 4] },
];

#[derive(Clone, Debug)]
pub struct Wedge {
    pub vertices: [Vector3; 6],
    pub faces: [Quadrilateral; 5],
    pub center: Vector3,
    pub volume: Scalar,
}

impl Wedge {
    /// Build from six vertices: the triangle `(v0, v1, v2)` is the bottom
    /// cap, `(v3, v4, v5)` the corresponding top vertices.
    pub fn new(vertices: [Vector3; 6]) -> Result<Self, Error> {
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

    /// Build from a slice of exactly six vertices.
    pub fn from_vertices(vertices: &[Vector3]) -> Result<Self, Error> {
        match vertices {
            &[v0, v1, v2, v3, v4, v5] => Self::new([v0, v1, v2, v3, v4, v5]),
            _ => Err(Error::InvalidArgument),
        }
    }
}

fn build_faces(v: &[Vector3; 6]) -> [Quadrilateral; 5] {
    [
        // bottom cap, with the midpoint of (v0, v2) repeated
        Quadrilateral::new([v[2], v[1], v[0], 0.5 * (v[0] + v[2])]),
        Quadrilateral::new([v[0], v[1], v[4], v[3]]),
        Quadrilateral::new([v[1], v[2], v[5], v[4]]),
        Quadrilateral::new([v[2], v[0], v[3], v[5]]),
        // top cap, with the midpoint of (v5, v3) repeated
        Quadrilateral::new([v[3], v[4], v[5], 0.5 * (v[5] + v[3])]),
    ]
}

/// Signed volume of the wedge treated as a degenerate hexahedron with the
/// two cap midpoints as extra vertices.
fn compute_volume(v: &[Vector3; 6]) -> Scalar {
    let diagonal = v[5] - v[0];

    (1.0 / 6.0)
        * diagonal.dot(
            &((v[1] - v[0]).cross(&(v[2] - v[4]))
                + (v[3] - v[0]).cross(&(v[4] - 0.5 * (v[3] + v[5])))
                + (0.5 * (v[0] + v[2]) - v[0]).cross(&(0.5 * (v[3] + v[5]) - v[2]))),
        )
}

impl Element for Wedge {
    type Face = Quadrilateral;
    type Areas = [Scalar; 7];

    const VERTEX_COUNT: usize = 6;
    const EDGE_COUNT: usize = 9;
    const FACE_COUNT: usize = 5;

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

    fn zeroed_areas() -> [Scalar; 7] {
        [0.0; 7]
    }
}
