use crate::atoms::{Coordinates, Lattice};
use crate::cell::bring_into_cell;
use crate::errors::{Result, SymmetryError};
use crate::normal_form::{check_commensurate, hermite_normal_form, idet};
use crate::tolerance::Tolerance;
use crate::utils;
use log::debug;

/// Generates every point of a grid that lies inside one cell of a lattice.
///
/// The grid is generated by the rows of grid_vectors and offset by shift,
/// given in grid coordinates. The lattice must be a superlattice of the grid.
/// The Hermite normal form of the integer relation between the two makes its
/// diagonal a box of coset representatives, so the cell holds exactly
/// |det N| points, each folded into the lattice cell and returned in
/// Cartesian coordinates.
pub fn make_cell_points(lattice: &Lattice,
                        grid_vectors: &[[f64; 3]; 3],
                        shift: [f64; 3],
                        tolerance: &Tolerance)
                        -> Result<Vec<[f64; 3]>> {
    let relation = check_commensurate(grid_vectors, &lattice.to_cartesian, tolerance)?;
    let (hnf, _) = hermite_normal_form(relation)?;
    let size = idet(relation).unsigned_abs() as usize;
    let mut points = Vec::with_capacity(size);
    for i in 0..hnf[0][0] {
        for j in 0..hnf[1][1] {
            for k in 0..hnf[2][2] {
                let z = [i as f64 + shift[0], j as f64 + shift[1], k as f64 + shift[2]];
                let point = utils::dot(z, *grid_vectors);
                points.push(bring_into_cell(point,
                                            lattice,
                                            tolerance,
                                            Coordinates::Cartesian,
                                            false));
            }
        }
    }
    if points.len() != size {
        return Err(SymmetryError::Consistency(format!("Generated {} points for a cell holding {}",
                                                      points.len(),
                                                      size)));
    }
    debug!("Generated {} grid points in the cell.", points.len());
    Ok(points)
}
