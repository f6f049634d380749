//! Assembly of the overlap volume and the overlap surface areas.
//!
//! Both entry points normalize the problem to the unit sphere, classify
//! how the sphere cuts the element skeleton and then compose the result
//! from caps (per face), general wedges (per edge) and cone corrections
//! (per vertex), the inclusion-exclusion of the underlying publication:
//! Strobl et al., Exact calculation of the overlap volume of spheres and
//! mesh elements, J. Comput. Phys. 311 (2016).

use crate::element::{Element, ElementFace, FACE_MAPPING};
use crate::intersect::{
    classify, intersects_coarse, sphere_contains_element, EdgeIntersections,
};
use crate::math::{Scalar, StableNorm, Transformation, Vector3, LARGE_EPSILON, TINY_EPSILON};
use crate::polygon::{Plane, Triangle};
use crate::robust::{clamp, triangle_normal};
use crate::sphere::Sphere;
use crate::spherical_wedge::general_wedge;
use std::f64::consts::PI;

/// Translate and scale the element so the sphere becomes the unit sphere
/// at the origin.
fn normalize_element<E: Element>(sphere: &Sphere, element: &E) -> E {
    let t = Transformation::new(-sphere.center, 1.0 / sphere.radius);

    let mut transformed = element.clone();
    transformed.apply(&t);
    transformed
}

/// General wedge defined by an intersected element edge: the two incident
/// face planes and the midpoint of the edge's intersection points.
fn edge_wedge<const DIM: usize, E: Element>(
    sphere: &Sphere,
    element: &E,
    edge_idx: usize,
    edge_points: &EdgeIntersections,
) -> Scalar {
    let edge = &E::edge_mapping()[edge_idx];
    let f0 = &element.faces()[edge.faces[0]];
    let f1 = &element.faces()[edge.faces[1]];

    debug_assert!(edge_points[edge_idx].is_some(), "missing intersection points for edge");
    let points = edge_points[edge_idx].unwrap_or([Vector3::zeros(); 2]);

    let vertices = element.vertices();
    let edge_midpoint = 0.5
        * ((points[0] + vertices[edge.vertices[0]]) + (points[1] + vertices[edge.vertices[1]]));

    let p0 = Plane { center: f0.center(), normal: f0.normal() };
    let p1 = Plane { center: f1.center(), normal: f1.normal() };

    general_wedge::<DIM>(sphere, &p0, &p1, &(edge_midpoint - sphere.center))
}

/// Volume (`DIM` = 3) or sphere-surface area (`DIM` = 2) of the spherical
/// cone at an element vertex inside the sphere, bounded by the three
/// incident faces and the plane through the three edge intersection
/// points.
fn vertex_cone_correction<const DIM: usize, E: Element>(
    element: &E,
    edge_points: &EdgeIntersections,
    vertex_idx: usize,
) -> Scalar {
    let unit_sphere = Sphere::default();
    let mapping = &E::vertex_mapping()[vertex_idx];

    // the intersection points of the three edges meeting at the vertex,
    // relative to the vertex to limit cancellation, and in absolute
    // coordinates for the wedge anchors
    let mut relative = [Vector3::zeros(); 3];
    let mut absolute = [Vector3::zeros(); 3];
    for local_edge in 0..3 {
        let edge_idx = mapping.edges[local_edge];
        debug_assert!(edge_points[edge_idx].is_some(), "missing intersection points for edge");
        let points = edge_points[edge_idx].unwrap_or([Vector3::zeros(); 2]);

        relative[local_edge] = points[mapping.orientations[local_edge]];
        absolute[local_edge] = relative[local_edge] + element.vertices()[vertex_idx];
    }

    let mut distances = [(0usize, 0.0); 3];
    for (i, point) in relative.iter().enumerate() {
        distances[i] = (i, point.norm_squared());
    }
    distances.sort_by(|a, b| a.1.total_cmp(&b.1));

    if distances[1].1 < distances[2].1 * LARGE_EPSILON {
        // two of the points coincide with the vertex: the cone collapses
        // into the general wedge of the one non-degenerate edge
        return edge_wedge::<DIM, E>(
            &unit_sphere,
            element,
            mapping.edges[distances[2].0],
            edge_points,
        );
    }

    // plane through the three intersection points; the area is never used
    let mut tip = Triangle {
        vertices: absolute,
        center: (1.0 / 3.0) * (absolute[0] + absolute[1] + absolute[2]),
        normal: triangle_normal(&relative[0], &relative[1], &relative[2]),
        area: Scalar::INFINITY,
    };

    // the tip plane normal has to point away from the element
    if tip.normal.dot(&(element.center() - tip.center)) > 0.0 {
        tip.normal = -tip.normal;
    }

    // spherical segments between the faces joining at the vertex and the
    // tip plane
    let segment_correction = || -> Scalar {
        let plane = Plane { center: tip.center, normal: tip.normal };

        let mut sum = 0.0;
        for (local_face, face_edges) in FACE_MAPPING.iter().enumerate() {
            let face = &element.faces()[mapping.faces[local_face]];
            let anchor = 0.5 * (absolute[face_edges[0]] + absolute[face_edges[1]]);
            let inverted = Plane { center: face.center(), normal: -face.normal() };

            sum += general_wedge::<DIM>(&unit_sphere, &plane, &inverted, &anchor);
        }

        sum
    };

    let dist = tip.normal.dot(&(-tip.center));

    if DIM == 2 {
        let cap_surface = unit_sphere.cap_surface_area(unit_sphere.radius + dist);

        // a cap this small cannot carry corrections of meaningful size
        if cap_surface < LARGE_EPSILON {
            return 0.0;
        }

        return (cap_surface - segment_correction()).max(0.0);
    }

    let tip_tet_volume = (1.0 / 6.0)
        * (-relative[2])
            .dot(&(relative[0] - relative[2]).cross(&(relative[1] - relative[2])))
            .abs();

    let cap_volume = unit_sphere.cap_volume(unit_sphere.radius + dist);

    // when the cap itself vanishes, the segment corrections are noise and
    // only the tetrahedron at the tip remains
    if cap_volume < TINY_EPSILON {
        return tip_tet_volume;
    }

    (tip_tet_volume + cap_volume - segment_correction()).max(0.0)
}

/// Overlap volume of a sphere and a mesh element.
pub fn overlap_volume<E: Element>(sphere: &Sphere, element: &E) -> Scalar {
    if !intersects_coarse(sphere, element) {
        return 0.0;
    }

    // trivial case: element fully contained in the sphere
    if sphere_contains_element(sphere, element) {
        return element.volume();
    }

    debug_assert!(
        element.faces().iter().all(|f| f.is_planar()),
        "non-planar face detected in element"
    );

    let unit_sphere = Sphere::default();
    let transformed = normalize_element(sphere, element);

    let (marks, edge_points) = classify(&transformed);

    // trivial case: the sphere is completely inside the element
    if marks.faces == 0 && transformed.contains(&unit_sphere.center) {
        return sphere.volume;
    }

    // spurious intersection: the coarse test hit, the detailed one did not
    if !marks.any() {
        return 0.0;
    }

    let mut result = unit_sphere.volume;

    // subtract the cap cut off by each intersected face plane
    for (face_idx, face) in transformed.faces().iter().enumerate() {
        if !marks.face(face_idx) {
            continue;
        }

        let dist = face.normal().dot(&(-face.center()));
        result -= unit_sphere.cap_volume(unit_sphere.radius + dist);
    }

    // add back the wedge volume subtracted twice along each intersected
    // edge
    for edge_idx in 0..E::EDGE_COUNT {
        if !marks.edge(edge_idx) {
            continue;
        }

        result += edge_wedge::<3, E>(&unit_sphere, &transformed, edge_idx, &edge_points);
    }

    // subtract the cone volume added back twice around each vertex inside
    // the sphere
    for vertex_idx in 0..E::VERTEX_COUNT {
        if !marks.vertex(vertex_idx) {
            continue;
        }

        result -= vertex_cone_correction::<3, E>(&transformed, &edge_points, vertex_idx);

        debug_assert!(
            result > -TINY_EPSILON.sqrt(),
            "negative intermediate result in overlap_volume"
        );
    }

    // for strongly differing sizes the absolute error grows, clamp within
    // a relative limit
    let max_overlap = unit_sphere.volume.min(transformed.volume());
    let limit = Scalar::EPSILON.sqrt() * max_overlap;

    if result < 0.0 && result > -limit {
        return 0.0;
    }
    if result > max_overlap && result - max_overlap < limit {
        return sphere.volume.min(element.volume());
    }

    debug_assert!(
        (0.0..=max_overlap).contains(&result),
        "overlap volume out of bounds"
    );

    // scale back to the original sphere
    (result / unit_sphere.volume) * sphere.volume
}

/// Sum of the overlap volumes of the sphere with each element.
pub fn overlap_volume_sum<'a, E, I>(sphere: &Sphere, elements: I) -> Scalar
where
    E: Element + 'a,
    I: IntoIterator<Item = &'a E>,
{
    elements.into_iter().fold(0.0, |sum, element| sum + overlap_volume(sphere, element))
}

/// Area of the circular segment cut from a disk of squared radius
/// `radius_sq` by a chord of the given length.
fn circular_segment_area(radius_sq: Scalar, chord_length: Scalar) -> Scalar {
    let apothem = (radius_sq - 0.25 * chord_length * chord_length).max(0.0).sqrt();
    let theta = 2.0 * chord_length.atan2(2.0 * apothem);

    let sector_area = 0.5 * radius_sq * theta;
    let triangle_area = 0.5 * chord_length * apothem;

    sector_area - triangle_area
}

/// Overlap surface areas of a sphere and a mesh element.
///
/// Slot 0 holds the sphere surface inside the element, slots `1..=F` the
/// area of each face inside the sphere and the final slot the sum over all
/// faces.
pub fn overlap_area<E: Element>(sphere: &Sphere, element: &E) -> E::Areas {
    let mut result = E::zeroed_areas();

    if !intersects_coarse(sphere, element) {
        return result;
    }

    // trivial case: element fully contained in the sphere, all faces are
    // fully covered
    if sphere_contains_element(sphere, element) {
        let slots = result.as_mut();
        let last = slots.len() - 1;
        for (face_idx, face) in element.faces().iter().enumerate() {
            slots[face_idx + 1] = face.area();
            slots[last] += face.area();
        }

        return result;
    }

    debug_assert!(
        element.faces().iter().all(|f| f.is_planar()),
        "non-planar face detected in element"
    );

    let unit_sphere = Sphere::default();
    let transformed = normalize_element(sphere, element);

    let (marks, edge_points) = classify(&transformed);

    // trivial case: the sphere is completely inside the element
    if marks.faces == 0 && transformed.contains(&unit_sphere.center) {
        result.as_mut()[0] = sphere.surface_area();
        return result;
    }

    // spurious intersection
    if !marks.any() {
        return result;
    }

    let slots = result.as_mut();
    slots[0] = unit_sphere.surface_area();

    // per face: subtract the cap surface beyond the face plane and start
    // the face slot from the full intersection disk
    for (face_idx, face) in transformed.faces().iter().enumerate() {
        if !marks.face(face_idx) {
            continue;
        }

        let dist = face.normal().dot(&(-face.center()));
        slots[0] -= unit_sphere.cap_surface_area(unit_sphere.radius + dist);
        slots[face_idx + 1] = unit_sphere.disk_area(unit_sphere.radius + dist);
    }

    // squared radius of the disk the sphere cuts into each face plane,
    // cached while handling the edges
    let mut disk_radius_sq = [0.0; 6];

    for edge_idx in 0..E::EDGE_COUNT {
        if !marks.edge(edge_idx) {
            continue;
        }

        // add back the lune surface removed twice by the two faces of the
        // edge
        slots[0] += edge_wedge::<2, E>(&unit_sphere, &transformed, edge_idx, &edge_points);

        let edge = &E::edge_mapping()[edge_idx];
        debug_assert!(edge_points[edge_idx].is_some(), "missing intersection points for edge");
        let points = edge_points[edge_idx].unwrap_or([Vector3::zeros(); 2]);

        let vertices = transformed.vertices();
        let end0 = vertices[edge.vertices[0]] + points[0];
        let end1 = vertices[edge.vertices[1]] + points[1];

        let chord = end0 - end1;
        let chord_length = chord.stable_norm();
        let chord_center = 0.5 * (end0 + end1);

        // for both faces of the edge, remove the part of the disk beyond
        // the chord
        for &face_idx in &edge.faces {
            let face = &transformed.faces()[face_idx];

            let cap_height = unit_sphere.radius - face.normal().dot(&face.center());
            let apothem = unit_sphere.radius - cap_height;
            disk_radius_sq[face_idx] = cap_height * (unit_sphere.radius + apothem);

            let mut segment_area =
                circular_segment_area(disk_radius_sq[face_idx], chord_length);

            // projection of the sphere center onto the face plane
            let proj = unit_sphere.center
                - face.normal().dot(&(unit_sphere.center - face.center())) * face.normal();

            // when the projected center and the face center fall on
            // opposite sides of the chord, the complement of the segment
            // survives; a chord through the face center counts as not
            // inverted
            let invert_segment = chord
                .cross(&(proj - chord_center))
                .dot(&chord.cross(&(face.center() - chord_center)))
                < 0.0;

            if invert_segment {
                segment_area = disk_radius_sq[face_idx] * PI - segment_area;
            }

            slots[face_idx + 1] -= segment_area;
        }
    }

    for vertex_idx in 0..E::VERTEX_COUNT {
        if !marks.vertex(vertex_idx) {
            continue;
        }

        // correct the sphere surface for the cone at the vertex
        slots[0] -= vertex_cone_correction::<2, E>(&transformed, &edge_points, vertex_idx);

        debug_assert!(
            slots[0] > -TINY_EPSILON.sqrt(),
            "negative intermediate result in overlap_area"
        );
        debug_assert!(
            slots[0] < unit_sphere.surface_area() + TINY_EPSILON,
            "excessive intermediate result in overlap_area"
        );

        // correct the areas of the three faces joining at the vertex: add
        // back the triangle under the vertex and the segment beyond the
        // chord of the two intersection points
        let mapping = &E::vertex_mapping()[vertex_idx];
        for (local_face, face_edges) in FACE_MAPPING.iter().enumerate() {
            let edge0 = face_edges[0];
            let edge1 = face_edges[1];

            debug_assert!(
                edge_points[mapping.edges[edge0]].is_some()
                    && edge_points[mapping.edges[edge1]].is_some(),
                "missing intersection points for edge"
            );

            // intersection points of the two face edges, relative to the
            // vertex
            let ip0 = edge_points[mapping.edges[edge0]].unwrap_or([Vector3::zeros(); 2])
                [mapping.orientations[edge0]];
            let ip1 = edge_points[mapping.edges[edge1]].unwrap_or([Vector3::zeros(); 2])
                [mapping.orientations[edge1]];

            let triangle_area = 0.5 * ip0.cross(&ip1).stable_norm();
            let chord_length = (ip0 - ip1).stable_norm();

            let face_idx = mapping.faces[local_face];
            let mut segment_area =
                circular_segment_area(disk_radius_sq[face_idx], chord_length);

            // invert the segment when the projected sphere center falls
            // outside the chord as seen from the vertex; an exactly
            // centered chord counts as not inverted
            let chord_center = 0.5 * (ip0 + ip1);
            let face = &transformed.faces()[face_idx];
            let proj = -face.normal().dot(&(-face.center())) * face.normal();
            let invert_segment = chord_center
                .dot(&((proj - transformed.vertices()[vertex_idx]) - chord_center))
                > 0.0;

            if invert_segment {
                segment_area = disk_radius_sq[face_idx] * PI - segment_area;
            }

            slots[face_idx + 1] += triangle_area + segment_area;

            debug_assert!(
                slots[face_idx + 1]
                    < transformed.faces()[face_idx].area() + LARGE_EPSILON.sqrt(),
                "excessive intermediate face area in overlap_area"
            );
        }
    }

    // scale the surface areas back to the original sphere and clamp within
    // the achievable precision; the sphere limit also bounds the faces, as
    // the face precision degrades with the size ratio
    let scaling = sphere.radius * sphere.radius;
    let sphere_limit = Scalar::EPSILON.sqrt() * unit_sphere.surface_area();
    let face_limit = sphere_limit.max(Scalar::EPSILON.sqrt() * transformed.surface_area());

    for (face_idx, face) in transformed.faces().iter().enumerate() {
        debug_assert!(
            slots[face_idx + 1] > -face_limit,
            "negative overlap area for face"
        );
        debug_assert!(
            slots[face_idx + 1] <= face.area() + face_limit,
            "excessive overlap area for face"
        );
    }

    slots[0] = scaling * clamp(slots[0], 0.0, unit_sphere.surface_area(), sphere_limit);

    for (face_idx, face) in transformed.faces().iter().enumerate() {
        slots[face_idx + 1] =
            scaling * clamp(slots[face_idx + 1], 0.0, face.area(), face_limit);
    }

    let last = slots.len() - 1;
    slots[last] = slots[1..last].iter().sum();

    debug_assert!(
        slots[0] >= 0.0 && slots[0] <= sphere.surface_area(),
        "invalid overlap area for sphere surface"
    );

    result
}
