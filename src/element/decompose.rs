//! Decompositions of elements into simpler elements.
//!
//! These preserve the total volume and serve to cross-validate the
//! analytic overlap computation piece by piece.

use super::{Hexahedron, Tetrahedron, Wedge};
use crate::error::Error;

/// Split a tetrahedron into 4 sub-tetrahedra around its centroid.
pub fn subdivide_tetrahedron(tet: &Tetrahedron) -> Result<[Tetrahedron; 4], Error> {
    let v = &tet.vertices;
    let c = tet.center;

    Ok([
        Tetrahedron::new([v[0], v[1], v[2], c])?,
        Tetrahedron::new([v[0], v[1], c, v[3]])?,
        Tetrahedron::new([v[1], v[2], c, v[3]])?,
        Tetrahedron::new([v[2], v[0], c, v[3]])?,
    ])
}

/// Split a hexahedron into 2 wedges along the `v0-v2-v4-v6` diagonal.
pub fn hexahedron_to_wedges(hex: &Hexahedron) -> Result<[Wedge; 2], Error> {
    let v = &hex.vertices;

    Ok([
        Wedge::new([v[0], v[1], v[2], v[4], v[5], v[6]])?,
        Wedge::new([v[0], v[2], v[3], v[4], v[6], v[7]])?,
    ])
}

/// Split a hexahedron into 5 tetrahedra.
pub fn hexahedron_to_five_tetrahedra(hex: &Hexahedron) -> Result<[Tetrahedron; 5], Error> {
    let v = &hex.vertices;

    Ok([
        Tetrahedron::new([v[0], v[1], v[2], v[5]])?,
        Tetrahedron::new([v[0], v[2], v[7], v[5]])?,
        Tetrahedron::new([v[0], v[2], v[3], v[7]])?,
        Tetrahedron::new([v[0], v[5], v[7], v[4]])?,
        Tetrahedron::new([v[2], v[7], v[5], v[6]])?,
    ])
}

/// Split a hexahedron into 6 tetrahedra sweeping around the `v0-v7`
/// diagonal.
pub fn hexahedron_to_six_tetrahedra(hex: &Hexahedron) -> Result<[Tetrahedron; 6], Error> {
    let v = &hex.vertices;

    Ok([
        Tetrahedron::new([v[0], v[5], v[7], v[4]])?,
        Tetrahedron::new([v[0], v[1], v[7], v[5]])?,
        Tetrahedron::new([v[1], v[6], v[7], v[5]])?,
        Tetrahedron::new([v[0], v[7], v[2], v[3]])?,
        Tetrahedron::new([v[0], v[7], v[1], v[2]])?,
        Tetrahedron::new([v[1], v[7], v[6], v[2]])?,
    ])
}
