//! Sphere primitive and its closed-form cap quantities.

use crate::error::Error;
use crate::math::{Scalar, Vector3};
use std::f64::consts::PI;

/// A sphere with precomputed volume.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: Scalar,
    pub volume: Scalar,
}

impl Sphere {
    /// Create a sphere; the radius must be strictly positive.
    pub fn new(center: Vector3, radius: Scalar) -> Result<Self, Error> {
        if !(radius > 0.0) {
            return Err(Error::InvalidRadius);
        }

        Ok(Self { center, radius, volume: (4.0 / 3.0) * PI * radius * radius * radius })
    }

    pub fn surface_area(&self) -> Scalar {
        4.0 * PI * self.radius * self.radius
    }

    /// Volume of the spherical cap of the given height, saturating at the
    /// empty and full sphere for heights outside `[0, 2r]`.
    pub fn cap_volume(&self, height: Scalar) -> Scalar {
        if height <= 0.0 {
            0.0
        } else if height >= 2.0 * self.radius {
            self.volume
        } else {
            (PI / 3.0) * height * height * (3.0 * self.radius - height)
        }
    }

    /// Lateral surface area of the spherical cap of the given height,
    /// saturating like [`Sphere::cap_volume`].
    pub fn cap_surface_area(&self, height: Scalar) -> Scalar {
        if height <= 0.0 {
            0.0
        } else if height >= 2.0 * self.radius {
            self.surface_area()
        } else {
            (2.0 * PI) * self.radius * height
        }
    }

    /// Area of the disk a plane at cap height `height` cuts out of the
    /// ball, zero outside `(0, 2r)`.
    pub fn disk_area(&self, height: Scalar) -> Scalar {
        if height <= 0.0 || height >= 2.0 * self.radius {
            0.0
        } else {
            PI * height * (2.0 * self.radius - height)
        }
    }

    /// Point containment, boundary inclusive.
    pub fn contains(&self, point: &Vector3) -> bool {
        (self.center - point).norm_squared() <= self.radius * self.radius
    }
}

impl Default for Sphere {
    /// The unit sphere at the origin.
    fn default() -> Self {
        Self { center: Vector3::zeros(), radius: 1.0, volume: (4.0 / 3.0) * PI }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(Sphere::new(Vector3::zeros(), 0.0), Err(Error::InvalidRadius)));
        assert!(matches!(Sphere::new(Vector3::zeros(), -1.0), Err(Error::InvalidRadius)));
        assert!(matches!(Sphere::new(Vector3::zeros(), f64::NAN), Err(Error::InvalidRadius)));
    }

    #[test]
    fn volume_and_surface_area() {
        let s = Sphere::new(Vector3::new(1.0, 2.0, 3.0), 2.0).unwrap();
        assert_relative_eq!(s.volume, (32.0 / 3.0) * PI, epsilon = 1e-13);
        assert_relative_eq!(s.surface_area(), 16.0 * PI, epsilon = 1e-13);
    }

    #[test]
    fn cap_volume_saturates() {
        let s = Sphere::default();
        assert_eq!(s.cap_volume(-0.5), 0.0);
        assert_eq!(s.cap_volume(0.0), 0.0);
        assert_eq!(s.cap_volume(2.0), s.volume);
        assert_eq!(s.cap_volume(3.0), s.volume);
        assert_relative_eq!(s.cap_volume(1.0), 0.5 * s.volume, epsilon = 1e-15);
    }

    #[test]
    fn cap_surface_area_saturates() {
        let s = Sphere::default();
        assert_eq!(s.cap_surface_area(0.0), 0.0);
        assert_eq!(s.cap_surface_area(2.0), s.surface_area());
        assert_relative_eq!(s.cap_surface_area(1.0), 2.0 * PI, epsilon = 1e-15);
    }

    #[test]
    fn disk_area_is_zero_outside_open_interval() {
        let s = Sphere::default();
        assert_eq!(s.disk_area(0.0), 0.0);
        assert_eq!(s.disk_area(2.0), 0.0);
        assert_relative_eq!(s.disk_area(1.0), PI, epsilon = 1e-15);
    }

    #[test]
    fn containment_includes_boundary() {
        let s = Sphere::default();
        assert!(s.contains(&Vector3::new(1.0, 0.0, 0.0)));
        assert!(s.contains(&Vector3::zeros()));
        assert!(!s.contains(&Vector3::new(1.0 + 1e-12, 0.0, 0.0)));
    }
}
