//! Containment predicates, coarse rejection and the classification of how
//! the unit sphere cuts an element's vertices, edges and faces.

use crate::element::{Element, ElementFace};
use crate::math::{Scalar, Vector3};
use crate::sphere::Sphere;

/// Whether the axis-aligned bounding boxes of the sphere and the element
/// overlap (closed intervals on every axis).
pub fn intersects_coarse<E: Element>(sphere: &Sphere, element: &E) -> bool {
    let extent = Vector3::repeat(sphere.radius);
    let sphere_min = sphere.center - extent;
    let sphere_max = sphere.center + extent;

    let mut element_min = element.vertices()[0];
    let mut element_max = element_min;
    for v in element.vertices() {
        element_min = element_min.inf(v);
        element_max = element_max.sup(v);
    }

    (0..3).all(|axis| {
        sphere_min[axis] <= element_max[axis] && element_min[axis] <= sphere_max[axis]
    })
}

/// Whether the sphere contains every vertex of the element.
pub fn sphere_contains_element<E: Element>(sphere: &Sphere, element: &E) -> bool {
    element.vertices().iter().all(|v| sphere.contains(v))
}

/// Whether the sphere reaches strictly past the plane's distance.
fn intersects_plane(sphere: &Sphere, center: &Vector3, normal: &Vector3) -> bool {
    let proj = normal.dot(&(sphere.center - center));

    proj * proj - sphere.radius * sphere.radius < 0.0
}

/// Whether the interior of the face intersects the sphere: the face plane
/// cuts the sphere and the projected sphere center falls inside the face.
pub fn intersects_face<F: ElementFace>(sphere: &Sphere, face: &F) -> bool {
    intersects_plane(sphere, &face.center(), &face.normal()) && face.contains(&sphere.center)
}

/// Parameters of the intersections of the line `base + t * direction` with
/// the sphere, ordered ascending. A tangential contact yields a single
/// root in the first slot.
pub fn line_sphere_intersection(
    base: &Vector3,
    direction: &Vector3,
    sphere: &Sphere,
) -> [Option<Scalar>; 2] {
    let a = direction.norm_squared();
    if a == 0.0 {
        return [None, None];
    }

    let relative = base - sphere.center;
    let b = 2.0 * direction.dot(&relative);
    let c = relative.norm_squared() - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        // two real roots, evaluated in the cancellation-free form
        let q = -0.5 * (b + discriminant.sqrt().copysign(b));

        let mut t0 = q / a;
        let mut t1 = c / q;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        // a midpoint outside the sphere means the two roots are numerical
        // noise around a tangential contact
        let midpoint = base + 0.5 * (t0 + t1) * direction;
        if (midpoint - sphere.center).norm_squared() >= sphere.radius * sphere.radius {
            return [None, None];
        }

        return [Some(t0), Some(t1)];
    }

    if discriminant == 0.0 {
        return [Some(-0.5 * b / a), None];
    }

    [None, None]
}

/// Which vertices, edges and faces of an element are cut by the unit
/// sphere, as bit masks.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityIntersections {
    pub vertices: u16,
    pub edges: u16,
    pub faces: u16,
}

impl EntityIntersections {
    pub fn vertex(&self, idx: usize) -> bool {
        self.vertices & (1 << idx) != 0
    }

    pub fn edge(&self, idx: usize) -> bool {
        self.edges & (1 << idx) != 0
    }

    pub fn face(&self, idx: usize) -> bool {
        self.faces & (1 << idx) != 0
    }

    pub fn any(&self) -> bool {
        self.vertices != 0 || self.edges != 0 || self.faces != 0
    }
}

/// Intersection points per edge, as offsets from the two edge endpoints.
/// Sized for the largest family; only the first `EDGE_COUNT` slots are
/// used.
pub type EdgeIntersections = [Option<[Vector3; 2]>; 12];

/// Classify the intersections of the element with the unit sphere.
///
/// An edge counts as intersected only when the sphere enters and leaves
/// through the open segment; tangential contacts are ignored. A vertex
/// counts only when all three incident edges are intersected.
pub fn classify<E: Element>(element: &E) -> (EntityIntersections, EdgeIntersections) {
    let unit_sphere = Sphere::default();

    let mut marks = EntityIntersections::default();
    let mut edge_points: EdgeIntersections = [None; 12];

    for (edge_idx, edge) in E::edge_mapping().iter().enumerate() {
        let base = element.vertices()[edge.vertices[0]];
        let direction = element.vertices()[edge.vertices[1]] - base;

        let roots = line_sphere_intersection(&base, &direction, &unit_sphere);
        let (t0, t1) = match roots {
            [Some(t0), Some(t1)] => (t0, t1),
            _ => continue,
        };
        if t0 >= 1.0 || t1 <= 0.0 {
            continue;
        }

        if t0 < 0.0 {
            marks.vertices |= 1 << edge.vertices[0];
        }
        if t1 > 1.0 {
            marks.vertices |= 1 << edge.vertices[1];
        }

        // store the intersection points relative to the edge endpoints
        edge_points[edge_idx] = Some([t0 * direction, (t1 - 1.0) * direction]);

        marks.edges |= 1 << edge_idx;
        marks.faces |= 1 << edge.faces[0];
        marks.faces |= 1 << edge.faces[1];
    }

    // a vertex bit set by a single edge is only a touching contact
    for (vertex_idx, vertex) in E::vertex_mapping().iter().enumerate() {
        if !marks.vertex(vertex_idx) {
            continue;
        }

        if !vertex.edges.iter().all(|&e| marks.edge(e)) {
            marks.vertices &= !(1 << vertex_idx);
        }
    }

    // faces missed by every edge may still cut the sphere with their
    // interior
    for (face_idx, face) in element.faces().iter().enumerate() {
        if intersects_face(&unit_sphere, face) {
            marks.faces |= 1 << face_idx;
        }
    }

    (marks, edge_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Hexahedron;
    use approx::assert_relative_eq;

    fn unit_hexahedron() -> Hexahedron {
        Hexahedron::new([
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(1.0, 1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
            Vector3::new(1.0, -1.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn line_through_sphere_has_ordered_roots() {
        let s = Sphere::default();
        let roots = line_sphere_intersection(
            &Vector3::new(-2.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &s,
        );
        assert_relative_eq!(roots[0].unwrap(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(roots[1].unwrap(), 3.0, epsilon = 1e-14);
    }

    #[test]
    fn tangent_line_yields_single_root() {
        let s = Sphere::default();
        let roots = line_sphere_intersection(
            &Vector3::new(-2.0, 1.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &s,
        );
        assert_relative_eq!(roots[0].unwrap(), 2.0, epsilon = 1e-14);
        assert!(roots[1].is_none());
    }

    #[test]
    fn missing_line_yields_no_roots() {
        let s = Sphere::default();
        let roots = line_sphere_intersection(
            &Vector3::new(-2.0, 1.5, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &s,
        );
        assert!(roots[0].is_none() && roots[1].is_none());
    }

    #[test]
    fn zero_direction_yields_no_roots() {
        let s = Sphere::default();
        let roots = line_sphere_intersection(&Vector3::zeros(), &Vector3::zeros(), &s);
        assert!(roots[0].is_none() && roots[1].is_none());
    }

    #[test]
    fn coarse_test_accepts_touching_boxes() {
        let hex = unit_hexahedron();
        let touching = Sphere::new(Vector3::new(0.0, 2.0, 0.0), 1.0).unwrap();
        let apart = Sphere::new(Vector3::new(0.0, 3.5, 0.0), 1.0).unwrap();
        assert!(intersects_coarse(&touching, &hex));
        assert!(!intersects_coarse(&apart, &hex));
    }

    #[test]
    fn classify_sphere_inside_marks_nothing() {
        let mut hex = unit_hexahedron();
        let t = crate::math::Transformation::new(Vector3::zeros(), 4.0);
        hex.apply(&t);
        let (marks, _) = classify(&hex);
        assert!(!marks.any());
    }

    #[test]
    fn classify_edge_intersection_marks_edge_and_faces() {
        // unit sphere centered on the midpoint of an edge of a scaled and
        // shifted hexahedron; the sphere cuts the open segment twice
        let mut hex = unit_hexahedron();
        let t = crate::math::Transformation::new(Vector3::new(0.0, 1.0, -1.0), 2.0);
        hex.apply(&t);

        let (marks, edge_points) = classify(&hex);
        assert_eq!(marks.vertices, 0);
        assert_eq!(marks.edges.count_ones(), 1);
        assert_eq!(marks.faces.count_ones(), 2);

        let edge_idx = marks.edges.trailing_zeros() as usize;
        let points = edge_points[edge_idx].unwrap();
        assert_relative_eq!(points[0].norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[1].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn classify_vertex_inside_marks_three_of_everything() {
        // unit sphere centered on a hexahedron corner
        let mut hex = unit_hexahedron();
        let t = crate::math::Transformation::new(Vector3::new(-1.0, 1.0, -1.0), 1.0);
        hex.apply(&t);

        let (marks, _) = classify(&hex);
        assert_eq!(marks.vertices.count_ones(), 1);
        assert_eq!(marks.edges.count_ones(), 3);
        assert_eq!(marks.faces.count_ones(), 3);
    }

    #[test]
    fn classify_face_only_intersection() {
        // sphere poking into the x = 1 face without reaching any edge
        let mut hex = unit_hexahedron();
        let t = crate::math::Transformation::new(Vector3::new(-1.8, 0.0, 0.0), 1.0);
        hex.apply(&t);

        let (marks, _) = classify(&hex);
        assert_eq!(marks.vertices, 0);
        assert_eq!(marks.edges, 0);
        assert_eq!(marks.faces.count_ones(), 1);
    }
}
