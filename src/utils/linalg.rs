// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Packs row lattice vectors `[[ax, ay, az], [bx, by, bz], [cx, cy, cz]]` into a matrix.
pub fn lattice_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Convert fractional coordinates to Cartesian using row lattice vectors
///
/// ```text
/// Cartesian = Lattice^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let cart_vec = lattice_matrix(lattice).transpose() * Vector3::from(frac);
  [cart_vec.x, cart_vec.y, cart_vec.z]
}
