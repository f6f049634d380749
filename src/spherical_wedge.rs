//! Closed-form volumes and surface areas of spherical wedges.
//!
//! A regularized wedge is a spherical cap cut by a half-plane through the
//! sphere center; the general wedge between two arbitrary half-spaces is
//! reduced to sums and differences of regularized wedges with careful sign
//! bookkeeping.

use crate::math::{Scalar, StableNorm, Vector3, LARGE_EPSILON, TINY_EPSILON};
use crate::polygon::Plane;
use crate::robust::{angle, clamp, gram_schmidt};
use crate::sphere::Sphere;
use std::f64::consts::{FRAC_PI_2, PI};

/// Volume of the regularized spherical wedge given the radius, the
/// distance of the intersection point from the center and the half-opening
/// angle `alpha` in `[0, pi/2]`.
pub fn regularized_wedge(r: Scalar, d: Scalar, alpha: Scalar) -> Scalar {
    // snap slight angle overshoots so the debug assertions match the
    // release behavior
    #[cfg(debug_assertions)]
    let alpha = {
        let mut alpha = alpha;
        if alpha < 0.0 && alpha > -TINY_EPSILON {
            alpha = 0.0;
        }
        if alpha > FRAC_PI_2 && alpha <= FRAC_PI_2 + TINY_EPSILON {
            alpha = FRAC_PI_2;
        }
        alpha
    };

    debug_assert!(r > 0.0, "invalid radius for regularized_wedge");
    debug_assert!((0.0..=r).contains(&d), "invalid distance for regularized_wedge");
    debug_assert!((0.0..=FRAC_PI_2).contains(&alpha), "invalid angle for regularized_wedge");

    let sin_alpha = alpha.sin();
    let cos_alpha = alpha.cos();

    let a = d * sin_alpha;
    let b = (r * r - d * d).abs().sqrt();
    let c = d * cos_alpha;

    (1.0 / 3.0) * a * b * c
        + a * ((1.0 / 3.0) * a * a - r * r) * b.atan2(c)
        + (2.0 / 3.0) * r * r * r * (sin_alpha * b).atan2(cos_alpha * r)
}

/// Extends [`regularized_wedge`] to angles up to pi and a signed cap
/// offset `z` along the wedge axis.
pub fn regularized_wedge_signed(r: Scalar, d: Scalar, alpha: Scalar, z: Scalar) -> Scalar {
    if z >= 0.0 {
        if alpha > FRAC_PI_2 {
            let h = r - z;

            return (PI / 3.0) * h * h * (3.0 * r - h) - regularized_wedge(r, d, PI - alpha);
        }

        return regularized_wedge(r, d, alpha);
    }

    let hemisphere_volume = ((2.0 / 3.0) * PI) * r * r * r;
    if alpha > FRAC_PI_2 {
        return hemisphere_volume - regularized_wedge(r, d, PI - alpha);
    }

    let h = r + z;
    let cap_volume = (PI / 3.0) * h * h * (3.0 * r - h);

    hemisphere_volume - (cap_volume - regularized_wedge(r, d, alpha))
}

/// Surface area of the regularized spherical wedge given the radius, the
/// signed offset `z` of the dividing plane and the angle `alpha` in
/// `[0, pi]`.
///
/// Ref: Gibson & Scheraga, "Exact calculation of the volume and surface
/// area of fused hard-sphere molecules with unequal atomic radii",
/// Molecular Physics 62 (1987).
pub fn regularized_wedge_area(r: Scalar, z: Scalar, alpha: Scalar) -> Scalar {
    #[cfg(debug_assertions)]
    let alpha = {
        let mut alpha = alpha;
        if alpha < 0.0 && alpha > -TINY_EPSILON {
            alpha = 0.0;
        }
        if alpha > PI && alpha <= PI + TINY_EPSILON {
            alpha = PI;
        }
        alpha
    };

    debug_assert!(r > 0.0, "invalid radius for regularized_wedge_area");
    debug_assert!((-r..=r).contains(&z), "invalid offset for regularized_wedge_area");
    debug_assert!((0.0..=PI).contains(&alpha), "invalid angle for regularized_wedge_area");

    if alpha < TINY_EPSILON || (r * r - z * z).abs() <= TINY_EPSILON {
        return 0.0;
    }

    let sin_alpha = alpha.sin();
    let cos_alpha = alpha.cos();
    let factor = 1.0 / (r * r - z * z).abs().sqrt();

    // clamp slight overshoots of the acos arguments to the valid range
    let arg0 = clamp(r * cos_alpha * factor, -1.0, 1.0, TINY_EPSILON);
    let arg1 = clamp((z * cos_alpha * factor) / sin_alpha, -1.0, 1.0, TINY_EPSILON);

    debug_assert!((-1.0..=1.0).contains(&arg0), "invalid arg0 in regularized_wedge_area");
    debug_assert!((-1.0..=1.0).contains(&arg1), "invalid arg1 in regularized_wedge_area");

    2.0 * r * (r * arg0.acos() - z * arg1.acos())
}

/// Volume of the spherical wedge (`DIM` = 3) or area of the spherical lune
/// (`DIM` = 2) of the given apex angle, for a wedge through the center.
pub(crate) fn spherical_wedge<const DIM: usize>(sphere: &Sphere, angle: Scalar) -> Scalar {
    debug_assert!(DIM == 2 || DIM == 3, "dimensionality must be 2 or 3");

    if DIM == 2 {
        2.0 * sphere.radius * sphere.radius * angle
    } else {
        (2.0 / 3.0) * sphere.radius * sphere.radius * sphere.radius * angle
    }
}

/// Volume (`DIM` = 3) or sphere-surface area (`DIM` = 2) of the region
/// bounded by the sphere and two oriented half-spaces.
///
/// `d` points from the sphere center toward the projection of the line in
/// which the two planes intersect. The planes must face each other.
pub fn general_wedge<const DIM: usize>(
    sphere: &Sphere,
    p0: &Plane,
    p1: &Plane,
    d: &Vector3,
) -> Scalar {
    debug_assert!(DIM == 2 || DIM == 3, "dimensionality must be 2 or 3");

    let dist = d.stable_norm();
    if dist < TINY_EPSILON {
        // the wedge (almost) touches the center, only the dihedral angle
        // matters
        return spherical_wedge::<DIM>(sphere, PI - angle(&p0.normal, &p1.normal));
    }

    if dist >= sphere.radius {
        // the planes intersect (numerically) on or outside the surface
        return 0.0;
    }

    let s0 = d.dot(&p0.normal);
    let s1 = d.dot(&p1.normal);

    // one plane (nearly) contains the center: the wedge degenerates into a
    // regularized wedge of the other plane
    if s0.abs() < TINY_EPSILON || s1.abs() < TINY_EPSILON {
        let alpha = PI - angle(&p0.normal, &p1.normal);
        let z = if s0.abs() > s1.abs() { s0 } else { s1 };

        if DIM == 2 {
            return regularized_wedge_area(sphere.radius, z, alpha);
        }

        return regularized_wedge_signed(sphere.radius, dist, alpha, z);
    }

    let mut d_unit = d * (1.0 / dist);
    if dist < LARGE_EPSILON {
        // the direction of a tiny axis vector is unreliable, rebuild it
        // orthogonal to the planes' intersection line
        d_unit = gram_schmidt(&p0.normal.cross(&p1.normal).stable_normalized(), &d_unit)[1];
    }

    debug_assert!(
        p0.normal.dot(&(p1.center - p0.center)) <= 0.0,
        "wedge planes must face each other"
    );
    debug_assert!(
        p1.normal.dot(&(p0.center - p1.center)) <= 0.0,
        "wedge planes must face each other"
    );

    // angles between the axis vector and the two plane normals
    let alpha0 = angle(&p0.normal, &d_unit);
    let alpha1 = angle(&p1.normal, &d_unit);

    let dir0 = d_unit.dot(&((sphere.center + d) - p0.center));
    let dir1 = d_unit.dot(&((sphere.center + d) - p1.center));

    if s0 >= 0.0 && s1 >= 0.0 {
        let alpha0 = FRAC_PI_2 - alpha0.copysign(dir0);
        let alpha1 = FRAC_PI_2 - alpha1.copysign(dir1);

        if DIM == 2 {
            return regularized_wedge_area(sphere.radius, s0, alpha0)
                + regularized_wedge_area(sphere.radius, s1, alpha1);
        }

        return regularized_wedge_signed(sphere.radius, dist, alpha0, s0)
            + regularized_wedge_signed(sphere.radius, dist, alpha1, s1);
    }

    if s0 < 0.0 && s1 < 0.0 {
        let alpha0 = FRAC_PI_2 + 1.0_f64.copysign(dir0) * (alpha0 - PI);
        let alpha1 = FRAC_PI_2 + 1.0_f64.copysign(dir1) * (alpha1 - PI);

        if DIM == 2 {
            return sphere.surface_area()
                - (regularized_wedge_area(sphere.radius, -s0, alpha0)
                    + regularized_wedge_area(sphere.radius, -s1, alpha1));
        }

        return sphere.volume
            - (regularized_wedge_signed(sphere.radius, dist, alpha0, -s0)
                + regularized_wedge_signed(sphere.radius, dist, alpha1, -s1));
    }

    // mixed signs: the wedge is the difference of the two one-sided parts
    let alpha0 =
        FRAC_PI_2 - 1.0_f64.copysign(dir0 * s0) * (alpha0 - if s0 < 0.0 { PI } else { 0.0 });
    let alpha1 =
        FRAC_PI_2 - 1.0_f64.copysign(dir1 * s1) * (alpha1 - if s1 < 0.0 { PI } else { 0.0 });

    if DIM == 2 {
        let area0 = regularized_wedge_area(sphere.radius, s0.abs(), alpha0);
        let area1 = regularized_wedge_area(sphere.radius, s1.abs(), alpha1);

        return area0.max(area1) - area0.min(area1);
    }

    let volume0 = regularized_wedge_signed(sphere.radius, dist, alpha0, s0.abs());
    let volume1 = regularized_wedge_signed(sphere.radius, dist, alpha1, s1.abs());

    volume0.max(volume1) - volume0.min(volume1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn simple_wedge_full_angle_recovers_sphere() {
        let s = Sphere::default();
        assert_relative_eq!(spherical_wedge::<3>(&s, 2.0 * PI), s.volume, epsilon = 1e-14);
        assert_relative_eq!(spherical_wedge::<2>(&s, 2.0 * PI), s.surface_area(), epsilon = 1e-14);
    }

    #[test]
    fn general_wedge_through_center_depends_only_on_angle() {
        let s = Sphere::default();
        // two planes through the center at a right angle
        let p0 = Plane { center: Vector3::zeros(), normal: Vector3::y() };
        let p1 = Plane { center: Vector3::zeros(), normal: Vector3::x() };

        let quarter = general_wedge::<3>(&s, &p0, &p1, &Vector3::zeros());
        assert_relative_eq!(quarter, 0.25 * s.volume, epsilon = 1e-13);

        let lune = general_wedge::<2>(&s, &p0, &p1, &Vector3::zeros());
        assert_relative_eq!(lune, 0.25 * s.surface_area(), epsilon = 1e-13);
    }

    #[test]
    fn general_wedge_outside_sphere_is_zero() {
        let s = Sphere::default();
        let p0 = Plane { center: Vector3::new(0.0, 2.0, 0.0), normal: Vector3::y() };
        let p1 = Plane { center: Vector3::new(0.0, 0.0, 2.0), normal: Vector3::z() };
        let d = Vector3::new(0.0, 2.0, 2.0);
        assert_eq!(general_wedge::<3>(&s, &p0, &p1, &d), 0.0);
    }

    #[test]
    fn general_wedge_matches_half_space_intersection() {
        // both planes at distance 0.5 on opposite axes; the wedge is the
        // region behind both, symmetric in the two half-space caps
        let s = Sphere::default();
        let p0 = Plane { center: Vector3::new(0.0, 0.5, 0.0), normal: Vector3::y() };
        let p1 = Plane { center: Vector3::new(0.0, 0.0, 0.5), normal: Vector3::z() };
        let d = Vector3::new(0.0, 0.5, 0.5);

        let wedge = general_wedge::<3>(&s, &p0, &p1, &d);
        assert!(wedge > 0.0 && wedge < s.cap_volume(0.5));
    }

    #[test]
    fn degenerate_general_wedge_reduces_to_regularized() {
        // plane p0 passes exactly through the center
        let s = Sphere::default();
        let p0 = Plane { center: Vector3::zeros(), normal: Vector3::y() };
        let p1 = Plane { center: Vector3::new(0.0, 0.0, 0.5), normal: Vector3::z() };
        let d = Vector3::new(0.0, 0.0, 0.5);

        let expected = regularized_wedge_signed(1.0, 0.5, FRAC_PI_2, 0.5);
        assert_relative_eq!(general_wedge::<3>(&s, &p0, &p1, &d), expected, epsilon = 1e-13);
    }

    #[test]
    fn wedge_area_special_values() {
        assert_eq!(regularized_wedge_area(1.0, 1.0, 0.25 * PI), 0.0);
        assert_eq!(regularized_wedge_area(1.0, -1.0, 0.25 * PI), 0.0);
        assert_eq!(regularized_wedge_area(1.0, 0.0, 0.0), 0.0);
        assert_abs_diff_eq!(regularized_wedge_area(1.0, 0.0, FRAC_PI_2), PI, epsilon = 1e-14);
    }
}
