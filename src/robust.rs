//! Robust geometric primitives.
//!
//! The orientation kernel runs in software double-double precision so that
//! cancellation cannot flip its sign for inputs differing only in their
//! low-order bits.
//!
//! Ref: J.R. Shewchuk, Lecture Notes on Geometric Robustness.

use crate::dd::DoubleDouble;
use crate::math::{Scalar, StableNorm, Vector2, Vector3, TINY_EPSILON};
use std::f64::consts::PI;

/// Signed area (times two) of the triangle `(a, b, c)`, positive for
/// counter-clockwise order.
pub fn orient2d(a: &Vector2, b: &Vector2, c: &Vector2) -> Scalar {
    let ax = DoubleDouble::new(a.x);
    let ay = DoubleDouble::new(a.y);
    let bx = DoubleDouble::new(b.x);
    let by = DoubleDouble::new(b.y);
    let cx = DoubleDouble::new(c.x);
    let cy = DoubleDouble::new(c.y);

    ((ax - cx) * (by - cy) - (ay - cy) * (bx - cx)).value()
}

/// Unit normal of the triangle `(a, b, c)`, assembled from the three
/// coordinate-plane projections of the orientation kernel.
pub fn triangle_normal(a: &Vector3, b: &Vector3, c: &Vector3) -> Vector3 {
    let xy = orient2d(&Vector2::new(a.x, a.y), &Vector2::new(b.x, b.y), &Vector2::new(c.x, c.y));
    let yz = orient2d(&Vector2::new(a.y, a.z), &Vector2::new(b.y, b.z), &Vector2::new(c.y, c.z));
    let zx = orient2d(&Vector2::new(a.z, a.x), &Vector2::new(b.z, b.x), &Vector2::new(c.z, c.x));

    Vector3::new(yz, zx, xy).normalize()
}

/// Polygon normal via Newell's method around a pre-computed center.
///
/// Returns the raw accumulated vector (effectively zero) when the polygon
/// is degenerate, so callers can detect the failure.
///
/// Ref: Christer Ericson, Real-Time Collision Detection (2005).
pub fn normal_newell(points: &[Vector3], center: &Vector3) -> Vector3 {
    let count = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..count {
        normal += (points[i] - center).cross(&(points[(i + 1) % count] - center));
    }

    let scale = normal.amax();
    let length = normal.stable_norm();
    if length > scale * Scalar::EPSILON {
        normal / length
    } else {
        normal
    }
}

/// Angle between two unit vectors, accurate near both 0 and pi.
///
/// Ref: <http://www.plunk.org/~hatch/rightway.html>
pub fn angle(u: &Vector3, v: &Vector3) -> Scalar {
    if u.dot(v) < 0.0 {
        PI - 2.0 * (0.5 * (-v - u).stable_norm()).asin()
    } else {
        2.0 * (0.5 * (v - u).stable_norm()).asin()
    }
}

/// Orthonormalize two unit vectors, keeping `v0` fixed.
pub fn gram_schmidt(v0: &Vector3, v1: &Vector3) -> [Vector3; 2] {
    debug_assert!((v0.norm() - 1.0).abs() < TINY_EPSILON, "v0 must be normalized");
    debug_assert!((v1.norm() - 1.0).abs() < TINY_EPSILON, "v1 must be normalized");

    [*v0, (v1 - v1.dot(v0) * v0).normalize()]
}

/// Clamp `value` to `[min, max]`, but only when it lies within `tolerance`
/// outside the interval.
pub fn clamp(mut value: Scalar, min: Scalar, max: Scalar, tolerance: Scalar) -> Scalar {
    debug_assert!(min <= max && tolerance >= 0.0, "invalid arguments for clamp");

    if value < min && value > min - tolerance {
        value = min;
    }
    if value > max && value < max + tolerance {
        value = max;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orient2d_signs() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(1.0, 0.0);
        let c = Vector2::new(0.0, 1.0);
        assert!(orient2d(&a, &b, &c) > 0.0);
        assert!(orient2d(&a, &c, &b) < 0.0);
    }

    #[test]
    fn orient2d_collinear_is_exactly_zero() {
        let a = Vector2::new(0.5, 0.5);
        let b = Vector2::new(1.5, 1.5);
        let c = Vector2::new(2.25, 2.25);
        assert_eq!(orient2d(&a, &b, &c), 0.0);
    }

    #[test]
    fn orient2d_resolves_sub_ulp_perturbations() {
        // the third point sits a few ulp off the diagonal; the true
        // determinant is 36 eps, which working precision loses entirely
        let a = Vector2::new(12.0, 12.0);
        let b = Vector2::new(24.0, 24.0);
        let c = Vector2::new(0.5, 0.5 + 3.0 * f64::EPSILON);
        let naive = (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x);
        assert_eq!(naive, 0.0);
        assert!(orient2d(&a, &b, &c) > 0.0);
    }

    #[test]
    fn triangle_normal_is_oriented_and_unit() {
        let n = triangle_normal(
            &Vector3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn newell_normal_of_planar_quad() {
        let points = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 1.0, 1.0),
        ];
        let center = Vector3::new(0.5, 0.5, 1.0);
        let n = normal_newell(&points, &center);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn newell_degenerate_polygon_returns_zero_vector() {
        let points = [Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)];
        let center = Vector3::new(1.0, 0.0, 0.0);
        let n = normal_newell(&points, &center);
        assert!(n.norm() < 1e-14);
    }

    #[test]
    fn angle_of_orthogonal_vectors() {
        assert_relative_eq!(angle(&Vector3::x(), &Vector3::y()), 0.5 * PI, epsilon = 1e-15);
    }

    #[test]
    fn angle_is_accurate_near_pi() {
        // acos of the dot product would round to exactly pi here
        let tiny = 1e-9;
        let v = Vector3::new(-1.0, tiny, 0.0).normalize();
        let a = angle(&Vector3::x(), &v);
        assert!(((PI - a) - tiny).abs() < 1e-15);
    }

    #[test]
    fn gram_schmidt_yields_orthonormal_pair() {
        let [u, v] = gram_schmidt(&Vector3::x(), &Vector3::new(1.0, 1.0, 0.0).normalize());
        assert_eq!(u, Vector3::x());
        assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn clamp_snaps_only_within_tolerance() {
        assert_eq!(clamp(-1e-12, 0.0, 1.0, 1e-10), 0.0);
        assert_eq!(clamp(1.0 + 1e-12, 0.0, 1.0, 1e-10), 1.0);
        assert_eq!(clamp(-1e-8, 0.0, 1.0, 1e-10), -1e-8);
        assert_eq!(clamp(0.5, 0.0, 1.0, 1e-10), 0.5);
    }
}
