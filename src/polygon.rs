//! Planar convex faces of mesh elements.

use crate::math::{Scalar, StableNorm, Transformation, Vector3, LARGE_EPSILON};
use crate::robust::triangle_normal;

/// An oriented plane given by a point on it and its unit normal.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub center: Vector3,
    pub normal: Vector3,
}

/// A planar convex face with `N` ordered vertices (3 or 4), its centroid,
/// outward unit normal and area.
#[derive(Clone, Copy, Debug)]
pub struct Polygon<const N: usize> {
    pub vertices: [Vector3; N],
    pub center: Vector3,
    pub normal: Vector3,
    pub area: Scalar,
}

pub type Triangle = Polygon<3>;
pub type Quadrilateral = Polygon<4>;

impl<const N: usize> Polygon<N> {
    pub fn new(vertices: [Vector3; N]) -> Self {
        debug_assert!(N == 3 || N == 4, "only triangles and quadrilaterals are supported");

        let center = vertices.iter().fold(Vector3::zeros(), |sum, v| sum + v) / N as Scalar;
        let normal = face_normal(&vertices);
        let area = face_area(&vertices);

        Self { vertices, center, normal, area }
    }

    /// Transform all vertices and recompute centroid, normal and area.
    pub fn apply(&mut self, t: &Transformation) {
        let mut vertices = self.vertices;
        for v in &mut vertices {
            *v = t.apply(v);
        }

        *self = Self::new(vertices);
    }

    /// Whether every vertex lies within the planarity tolerance of the
    /// plane through the centroid. Triangles are trivially planar.
    pub fn is_planar(&self) -> bool {
        if N == 3 {
            return true;
        }

        self.vertices.iter().all(|v| self.normal.dot(&(v - self.center)).abs() <= LARGE_EPSILON)
    }

    /// Point-in-convex-polygon test on the projection of `point` onto the
    /// polygon's plane, boundary inclusive.
    pub fn contains(&self, point: &Vector3) -> bool {
        let proj = point - self.normal.dot(&(point - self.center)) * self.normal;

        for i in 0..N {
            let v0 = self.vertices[i];
            let v1 = self.vertices[(i + 1) % N];

            // only the sign matters, no need to normalize
            let dir = (v1 - v0).cross(&self.normal);
            if dir.dot(&(proj - 0.5 * (v0 + v1))) > 0.0 {
                return false;
            }
        }

        true
    }
}

fn face_normal<const N: usize>(vertices: &[Vector3; N]) -> Vector3 {
    let v = &vertices[..];
    if N == 3 {
        triangle_normal(&v[0], &v[1], &v[2])
    } else {
        // for a planar quadrilateral, Newell's method reduces to the cross
        // product of the diagonals
        (v[2] - v[0]).cross(&(v[3] - v[1])).normalize()
    }
}

fn face_area<const N: usize>(vertices: &[Vector3; N]) -> Scalar {
    let v = &vertices[..];
    if N == 3 {
        0.5 * (v[1] - v[0]).cross(&(v[2] - v[0])).stable_norm()
    } else {
        0.5 * ((v[1] - v[0]).cross(&(v[2] - v[0])).stable_norm()
            + (v[2] - v[0]).cross(&(v[3] - v[0])).stable_norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Quadrilateral {
        Quadrilateral::new([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn quadrilateral_center_normal_area() {
        let q = unit_square();
        assert_relative_eq!(q.center.x, 0.5, epsilon = 1e-15);
        assert_relative_eq!(q.center.y, 0.5, epsilon = 1e-15);
        assert_relative_eq!(q.normal.z, 1.0, epsilon = 1e-15);
        assert_relative_eq!(q.area, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn triangle_area_and_orientation() {
        let t = Triangle::new([
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(2.0, 0.0, 1.0),
            Vector3::new(0.0, 2.0, 1.0),
        ]);
        assert_relative_eq!(t.area, 2.0, epsilon = 1e-15);
        assert_relative_eq!(t.normal.z, 1.0, epsilon = 1e-15);
        assert!(t.is_planar());
    }

    #[test]
    fn warped_quadrilateral_is_not_planar() {
        let q = Quadrilateral::new([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1e-6),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        assert!(!q.is_planar());
    }

    #[test]
    fn planarity_tolerates_tiny_deviations() {
        let q = Quadrilateral::new([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1e-12),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        assert!(q.is_planar());
    }

    #[test]
    fn contains_projects_onto_plane() {
        let q = unit_square();
        assert!(q.contains(&Vector3::new(0.5, 0.5, 3.0)));
        assert!(q.contains(&Vector3::new(0.0, 0.0, -1.0)));
        assert!(!q.contains(&Vector3::new(1.5, 0.5, 0.0)));
    }

    #[test]
    fn apply_rescales_area() {
        let mut q = unit_square();
        q.apply(&Transformation::new(Vector3::new(1.0, 1.0, 0.0), 2.0));
        assert_relative_eq!(q.area, 4.0, epsilon = 1e-15);
        assert_relative_eq!(q.center.x, 3.0, epsilon = 1e-15);
        assert_relative_eq!(q.normal.z, 1.0, epsilon = 1e-15);
    }
}
