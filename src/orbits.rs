use crate::atoms::{Coordinates, Lattice};
use crate::cell::{bring_into_cell, map_to_first_bz};
use crate::errors::{Result, SymmetryError};
use crate::normal_form::{check_commensurate, hermite_normal_form, imatvec,
                         smith_normal_form, IMatrix3};
use crate::progress::Bar;
use crate::space_group::SpaceGroup;
use crate::tolerance::Tolerance;
use crate::utils;
use log::info;

/// Maps points of a grid to a unique index in [0, D1·D2·D3).
///
/// Two points share an index exactly when they differ by a vector of the
/// reciprocal lattice. With N the integer matrix taking the grid to the
/// reciprocal lattice, H its Hermite normal form and D = L·H·R the Smith normal
/// form, the index of a point with integer grid coordinates z is L·z taken
/// modulo the diagonal of D and flattened.
#[derive(Clone, Debug)]
pub struct GridIndex {
    grid_vectors: [[f64; 3]; 3],
    to_grid: [[f64; 3]; 3],
    shift: [f64; 3],
    diagonal: [i64; 3],
    left: IMatrix3,
    tolerance: Tolerance,
}

impl GridIndex {
    /// Builds the index for a grid (rows of grid_vectors, shift in grid
    /// coordinates) inside a reciprocal lattice.
    pub fn new(reciprocal: &Lattice,
               grid_vectors: &[[f64; 3]; 3],
               shift: [f64; 3],
               tolerance: &Tolerance)
               -> Result<Self> {
        let to_grid = utils::invert_matrix(grid_vectors).map_err(|_| {
            SymmetryError::LinearDependence(format!("The grid vectors {:?} are not independent",
                                                    grid_vectors))
        })?;
        if reciprocal.volume + tolerance.atol
           < utils::determinant(*grid_vectors).abs()
        {
            return Err(SymmetryError::Incommensurate(String::from("The grid cell is larger than the reciprocal cell")));
        }
        let relation =
            check_commensurate(grid_vectors, &reciprocal.to_cartesian, tolerance)?;
        let (hnf, _) = hermite_normal_form(relation)?;
        let (snf, left, _) = smith_normal_form(hnf)?;
        Ok(Self { grid_vectors: *grid_vectors,
                  to_grid,
                  shift: utils::dot(shift, *grid_vectors),
                  diagonal: [snf[0][0], snf[1][1], snf[2][2]],
                  left,
                  tolerance: *tolerance })
    }

    /// The diagonal of the Smith normal form.
    pub fn diagonal(&self) -> [i64; 3] {
        self.diagonal
    }

    /// The number of distinct indices, the number of grid points in a
    /// reciprocal cell.
    pub fn size(&self) -> usize {
        self.diagonal.iter().product::<i64>() as usize
    }

    /// The generating vectors of the grid.
    pub fn grid_vectors(&self) -> [[f64; 3]; 3] {
        self.grid_vectors
    }

    /// The coordinates of a Cartesian point relative to the shifted grid.
    pub fn grid_coordinates(&self, point: [f64; 3]) -> [f64; 3] {
        utils::dot(utils::subtract(point, self.shift), self.to_grid)
    }

    /// Whether a Cartesian point is a point of the shifted grid.
    pub fn is_on_grid(&self, point: [f64; 3]) -> bool {
        let z = self.grid_coordinates(point);
        let mut rounded = z;
        for r in rounded.iter_mut() {
            *r = r.round();
        }
        self.tolerance.all_close(z, rounded)
    }

    /// The index of a Cartesian point of the grid.
    pub fn index(&self, point: [f64; 3]) -> usize {
        let mut z = [0i64; 3];
        for (zi, x) in z.iter_mut().zip(self.grid_coordinates(point).iter()) {
            *zi = utils::round_decimals(*x, self.tolerance.decimals).round() as i64;
        }
        let g = imatvec(self.left, z);
        let [d1, d2, d3] = self.diagonal;
        let g = [g[0].rem_euclid(d1), g[1].rem_euclid(d2), g[2].rem_euclid(d3)];
        (g[0] * d2 * d3 + g[1] * d3 + g[2]) as usize
    }
}

/// The symmetry reduced grid.
///
/// > points: Vec<[f64; 3]> - the representative of each orbit, Cartesian
/// > weights: Vec<usize> - the number of grid points in each orbit
/// > orbits: Vec<Vec<usize>> - indices into the unreduced points of each orbit
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedGrid {
    pub points: Vec<[f64; 3]>,
    pub weights: Vec<usize>,
    pub orbits: Vec<Vec<usize>>,
}

impl ReducedGrid {
    /// The number of orbits.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no orbits.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sum of the weights, the number of unreduced points.
    pub fn total_weight(&self) -> usize {
        self.weights.iter().sum()
    }

    /// The unreduced points belonging to each orbit.
    pub fn orbit_points(&self, points: &[[f64; 3]]) -> Vec<Vec<[f64; 3]>> {
        self.orbits
            .iter()
            .map(|orbit| orbit.iter().map(|i| points[*i]).collect())
            .collect()
    }

    /// The representatives in the basis of the reciprocal lattice.
    pub fn in_lattice_coordinates(&self, reciprocal: &Lattice) -> Vec<[f64; 3]> {
        self.points
            .iter()
            .map(|p| reciprocal.coordinates(*p, Coordinates::Lattice))
            .collect()
    }
}

/// Reduces the points of a grid into orbits of the rotations of a space
/// group.
///
/// Points are visited in order and the first unclaimed point of each orbit is
/// its representative. Every grid image of the representative claims its
/// index, images that leave the shifted grid are skipped. The weight of an
/// orbit counts the supplied points it claims, so the points should not repeat
/// an index.
pub fn reduce_grid(points: &[[f64; 3]],
                   reciprocal: &Lattice,
                   grid_vectors: &[[f64; 3]; 3],
                   shift: [f64; 3],
                   space_group: &SpaceGroup,
                   tolerance: &Tolerance,
                   progress_bar: Bar)
                   -> Result<ReducedGrid> {
    let index = GridIndex::new(reciprocal, grid_vectors, shift, tolerance)?;
    let rotations = space_group.rotations(tolerance);
    // arenas indexed by the grid index
    let mut owner: Vec<Option<usize>> = vec![None; index.size()];
    let mut position: Vec<Option<usize>> = vec![None; index.size()];
    for (i, p) in points.iter().enumerate() {
        if !index.is_on_grid(*p) {
            return Err(SymmetryError::Consistency(format!("{:?} is not a point of the grid",
                                                          p)));
        }
        let h = index.index(*p);
        if position[h].is_none() {
            position[h] = Some(i);
        }
    }
    let mut reduced = ReducedGrid { points: Vec::new(),
                                    weights: Vec::new(),
                                    orbits: Vec::new() };
    for (i, p) in points.iter().enumerate() {
        let h = index.index(*p);
        if owner[h].is_none() {
            let orbit = reduced.len();
            owner[h] = Some(orbit);
            let mut members = vec![i];
            for op in rotations.iter() {
                let image = bring_into_cell(utils::matvec(*op, *p),
                                            reciprocal,
                                            tolerance,
                                            Coordinates::Cartesian,
                                            false);
                if !index.is_on_grid(image) {
                    continue;
                }
                let g = index.index(image);
                if owner[g].is_none() {
                    owner[g] = Some(orbit);
                    if let Some(j) = position[g] {
                        members.push(j);
                    }
                }
            }
            reduced.points.push(*p);
            reduced.weights.push(members.len());
            reduced.orbits.push(members);
        }
        progress_bar.tick();
    }
    let total = reduced.total_weight();
    if total != points.len() {
        return Err(SymmetryError::Consistency(format!("The orbit weights sum to {} for {} points",
                                                      total,
                                                      points.len())));
    }
    info!("Reduced {} grid points to {} orbits with {} rotations.",
          points.len(),
          reduced.len(),
          rotations.len());
    Ok(reduced)
}

/// Reduces a grid and maps the representatives into the first Brillouin
/// zone.
pub fn map_to_bz(points: &[[f64; 3]],
                 reciprocal: &Lattice,
                 grid_vectors: &[[f64; 3]; 3],
                 shift: [f64; 3],
                 space_group: &SpaceGroup,
                 tolerance: &Tolerance,
                 progress_bar: Bar)
                 -> Result<ReducedGrid> {
    let mut reduced = reduce_grid(points,
                                  reciprocal,
                                  grid_vectors,
                                  shift,
                                  space_group,
                                  tolerance,
                                  progress_bar)?;
    reduced.points = map_to_first_bz(&reduced.points, reciprocal, tolerance)?;
    Ok(reduced)
}

/// Whether two lists of orbits hold the same orbits, in any order.
pub fn equivalent_orbits(a: &[Vec<[f64; 3]>],
                         b: &[Vec<[f64; 3]>],
                         tolerance: &Tolerance)
                         -> bool {
    let same_points = |x: &Vec<[f64; 3]>, y: &Vec<[f64; 3]>| {
        x.len() == y.len()
        && x.iter().all(|p| y.iter().any(|q| tolerance.all_close(*p, *q)))
    };
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    for orbit in a.iter() {
        let found = b.iter()
                     .enumerate()
                     .position(|(j, other)| !matched[j] && same_points(orbit, other));
        match found {
            Some(j) => matched[j] = true,
            None => return false,
        }
    }
    true
}
