//! Scalar and vector type aliases, fixed tolerances and affine transforms.

pub type Scalar = f64;
pub type Vector3 = nalgebra::Vector3<Scalar>;
pub type Vector2 = nalgebra::Vector2<Scalar>;

/// Four ulp at unity; guards strict comparisons against roundoff.
pub const TINY_EPSILON: Scalar = 4.0 * Scalar::EPSILON;

/// Absolute tolerance for face planarity and degeneracy detection.
pub const LARGE_EPSILON: Scalar = 1e-10;

/// Translation followed by uniform scaling: `v ↦ scaling * (v + translation)`.
#[derive(Clone, Copy, Debug)]
pub struct Transformation {
    pub translation: Vector3,
    pub scaling: Scalar,
}

impl Transformation {
    pub fn new(translation: Vector3, scaling: Scalar) -> Self {
        Self { translation, scaling }
    }

    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.scaling * (v + self.translation)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self { translation: Vector3::zeros(), scaling: 1.0 }
    }
}

/// Overflow- and underflow-safe Euclidean norm.
///
/// Scales by the largest absolute component before summing squares, the
/// two-pass scheme of Blue's algorithm.
pub trait StableNorm {
    fn stable_norm(&self) -> Scalar;
    fn stable_normalized(&self) -> Self;
}

impl StableNorm for Vector3 {
    fn stable_norm(&self) -> Scalar {
        let scale = self.amax();
        if scale == 0.0 {
            return 0.0;
        }
        (self / scale).norm() * scale
    }

    fn stable_normalized(&self) -> Self {
        let length = self.stable_norm();
        if length > 0.0 {
            self / length
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_norm_matches_norm() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(v.stable_norm(), 13.0);
    }

    #[test]
    fn stable_norm_avoids_overflow() {
        let v = Vector3::new(1e200, 1e200, 0.0);
        assert!(v.norm().is_infinite());
        assert!((v.stable_norm() - 2.0_f64.sqrt() * 1e200).abs() < 1e186);
    }

    #[test]
    fn stable_normalized_zero_vector_is_unchanged() {
        let v = Vector3::zeros();
        assert_eq!(v.stable_normalized(), v);
    }

    #[test]
    fn transformation_translates_then_scales() {
        let t = Transformation::new(Vector3::new(1.0, 0.0, 0.0), 2.0);
        assert_eq!(t.apply(&Vector3::new(1.0, 1.0, 1.0)), Vector3::new(4.0, 2.0, 2.0));
    }
}
