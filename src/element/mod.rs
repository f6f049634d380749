//! Convex mesh element families and their combinatorial adjacency tables.
//!
//! The three families share one algorithmic skeleton parameterized by their
//! vertex/edge/face counts; the generic overlap code walks the per-family
//! `const` tables rather than discovering adjacency at runtime.

pub mod decompose;
mod hexahedron;
mod tetrahedron;
mod wedge;

pub use hexahedron::Hexahedron;
pub use tetrahedron::Tetrahedron;
pub use wedge::Wedge;

use crate::math::{Scalar, Transformation, Vector3};
use crate::polygon::Polygon;

/// Incidence of one element edge: its two endpoint vertices and the two
/// faces meeting along it.
#[derive(Clone, Copy, Debug)]
pub struct EdgeMap {
    pub vertices: [usize; 2],
    pub faces: [usize; 2],
}

/// Incidence of one element vertex: the three edges meeting at the vertex,
/// for each of them which endpoint the vertex is (0 when the edge points
/// away from the vertex, 1 when it points toward it), and the three faces
/// meeting at the vertex.
#[derive(Clone, Copy, Debug)]
pub struct VertexMap {
    pub edges: [usize; 3],
    pub orientations: [usize; 3],
    pub faces: [usize; 3],
}

/// For the three faces meeting at any vertex, the two local slots of
/// [`VertexMap::edges`] spanning each face. Identical for all families.
pub const FACE_MAPPING: [[usize; 2]; 3] = [[0, 1], [0, 2], [1, 2]];

/// Uniform access to a face polygon, independent of its vertex count.
pub trait ElementFace {
    fn center(&self) -> Vector3;
    fn normal(&self) -> Vector3;
    fn area(&self) -> Scalar;
    fn contains(&self, point: &Vector3) -> bool;
    fn is_planar(&self) -> bool;
}

impl<const N: usize> ElementFace for Polygon<N> {
    fn center(&self) -> Vector3 {
        self.center
    }

    fn normal(&self) -> Vector3 {
        self.normal
    }

    fn area(&self) -> Scalar {
        self.area
    }

    fn contains(&self, point: &Vector3) -> bool {
        Polygon::contains(self, point)
    }

    fn is_planar(&self) -> bool {
        Polygon::is_planar(self)
    }
}

/// Common interface of the supported element families.
pub trait Element: Clone {
    /// Face polygon type: triangles for tetrahedra, quadrilaterals for the
    /// other families.
    type Face: ElementFace;

    /// Result array of `overlap_area`: one slot for the sphere surface,
    /// one per face and a final slot for the face total.
    type Areas: Copy + AsRef<[Scalar]> + AsMut<[Scalar]>;

    const VERTEX_COUNT: usize;
    const EDGE_COUNT: usize;
    const FACE_COUNT: usize;

    fn vertices(&self) -> &[Vector3];
    fn faces(&self) -> &[Self::Face];
    fn center(&self) -> Vector3;
    fn volume(&self) -> Scalar;

    /// Transform all vertices and faces, then refresh the derived data.
    fn apply(&mut self, t: &Transformation);

    fn edge_mapping() -> &'static [EdgeMap];
    fn vertex_mapping() -> &'static [VertexMap];
    fn zeroed_areas() -> Self::Areas;

    /// Sum of all face areas.
    fn surface_area(&self) -> Scalar {
        self.faces().iter().fold(0.0, |sum, face| sum + face.area())
    }

    /// Whether `point` lies inside the element, boundary inclusive.
    fn contains(&self, point: &Vector3) -> bool {
        self.faces().iter().all(|face| face.normal().dot(&(point - face.center())) <= 0.0)
    }
}

pub(crate) fn centroid(vertices: &[Vector3]) -> Vector3 {
    vertices.iter().fold(Vector3::zeros(), |sum, v| sum + v) / vertices.len() as Scalar
}
