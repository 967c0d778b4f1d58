use crate::atoms::{Coordinates, Lattice};
use crate::errors::Result;
use crate::reduction::minkowski_reduce;
use crate::tolerance::Tolerance;
use crate::utils;

/// Translates a point into the first unit cell of a lattice.
///
/// The point is given, and returned, in the requested coordinates. Fractional
/// coordinates are taken modulo 1 with values within tolerance of 1 set to 0.
/// A centered cell spans [-1/2, 1/2) instead, with values within tolerance of
/// 1/2 sent to -1/2.
pub fn bring_into_cell(point: [f64; 3],
                       lattice: &Lattice,
                       tolerance: &Tolerance,
                       coordinates: Coordinates,
                       centered: bool)
                       -> [f64; 3] {
    let mut fractional = match coordinates {
        Coordinates::Cartesian => lattice.fractional(point),
        Coordinates::Lattice => point,
    };
    for f in fractional.iter_mut() {
        *f = f.rem_euclid(1.);
        if tolerance.close(*f, 1.) {
            *f = 0.;
        }
        if centered {
            if tolerance.close(*f, 0.5) {
                *f = -0.5;
            } else if *f > 0.5 {
                *f -= 1.;
            }
        }
    }
    match coordinates {
        Coordinates::Cartesian => lattice.cartesian(fractional),
        Coordinates::Lattice => fractional,
    }
}

/// Maps Cartesian points into the first Brillouin zone of a reciprocal
/// lattice.
///
/// Each point is folded into the Minkowski reduced cell and replaced by the
/// shortest of its images in the eight cells that share the origin.
pub fn map_to_first_bz(points: &[[f64; 3]],
                       reciprocal: &Lattice,
                       tolerance: &Tolerance)
                       -> Result<Vec<[f64; 3]>> {
    let reduced =
        Lattice::new(minkowski_reduce(&reciprocal.to_cartesian, tolerance)?)?;
    let mut shifts = Vec::with_capacity(8);
    for i in [-1., 0.].iter() {
        for j in [-1., 0.].iter() {
            for k in [-1., 0.].iter() {
                shifts.push(reduced.cartesian([*i, *j, *k]));
            }
        }
    }
    Ok(points.iter()
             .map(|p| {
                 let folded = bring_into_cell(*p,
                                              &reduced,
                                              tolerance,
                                              Coordinates::Cartesian,
                                              false);
                 let mut nearest = folded;
                 let mut nearest_norm = utils::vdot(folded, folded);
                 for shift in shifts.iter() {
                     let image = utils::add(folded, *shift);
                     let norm = utils::vdot(image, image);
                     if norm + tolerance.eps < nearest_norm {
                         nearest = image;
                         nearest_norm = norm;
                     }
                 }
                 nearest
             })
             .collect())
}
