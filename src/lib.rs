//! Exact overlap volumes and areas of spheres and convex mesh elements.
//!
//! Computes, in closed form and to working double precision, the volume
//! and the surface areas of the intersection between a sphere and a
//! tetrahedron, wedge (triangular prism) or hexahedron with planar faces.
//! The method subtracts a spherical cap per intersected face, adds back a
//! general spherical wedge per intersected edge and subtracts a cone
//! correction per vertex inside the sphere.
//!
//! Ref: Strobl et al., Exact calculation of the overlap volume of spheres
//! and mesh elements, Journal of Computational Physics 311 (2016).
//!
//! ```
//! use spherelap::{overlap_volume, Hexahedron, Sphere, Vector3};
//!
//! let hex = Hexahedron::new([
//!     Vector3::new(-1.0, -1.0, -1.0),
//!     Vector3::new(1.0, -1.0, -1.0),
//!     Vector3::new(1.0, 1.0, -1.0),
//!     Vector3::new(-1.0, 1.0, -1.0),
//!     Vector3::new(-1.0, -1.0, 1.0),
//!     Vector3::new(1.0, -1.0, 1.0),
//!     Vector3::new(1.0, 1.0, 1.0),
//!     Vector3::new(-1.0, 1.0, 1.0),
//! ])?;
//!
//! // a sphere centered on a face covers the element with exactly one half
//! let sphere = Sphere::new(Vector3::new(1.0, 0.0, 0.0), 1.0)?;
//! let volume = overlap_volume(&sphere, &hex);
//! assert!((volume - 0.5 * sphere.volume).abs() < 1e-12);
//! # Ok::<(), spherelap::Error>(())
//! ```

pub mod dd;
pub mod element;
pub mod error;
pub mod intersect;
pub mod math;
mod overlap;
pub mod polygon;
pub mod robust;
pub mod sphere;
pub mod spherical_wedge;

pub use element::{decompose, Element, Hexahedron, Tetrahedron, Wedge};
pub use error::Error;
pub use math::{Scalar, Transformation, Vector2, Vector3};
pub use overlap::{overlap_area, overlap_volume, overlap_volume_sum};
pub use polygon::{Plane, Polygon, Quadrilateral, Triangle};
pub use sphere::Sphere;
