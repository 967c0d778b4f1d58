use crate::atoms::{Atoms, Coordinates, Lattice};
use crate::cell::bring_into_cell;
use crate::errors::Result;
use crate::point_group::{find_point_group_threaded, to_lattice_coordinates,
                         PointGroup};
use crate::tolerance::Tolerance;
use crate::utils;
use log::debug;
use rustc_hash::FxHashMap;

/// Point group operators paired with the fractional translations that keep a
/// decorated lattice invariant.
///
/// Operators are Cartesian and act on column vectors, translations are
/// Cartesian and defined modulo the lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceGroup {
    pub operators: Vec<[[f64; 3]; 3]>,
    pub translations: Vec<[f64; 3]>,
}

impl SpaceGroup {
    /// The space group of an undecorated lattice, every translation is zero.
    pub fn from_point_group(point_group: &PointGroup) -> Self {
        Self { operators: point_group.operators.clone(),
               translations: vec![[0f64; 3]; point_group.len()] }
    }

    /// The number of (operator, translation) pairs.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Iterates over the (operator, translation) pairs.
    pub fn iter(&self)
                -> impl Iterator<Item = (&[[f64; 3]; 3], &[f64; 3])> {
        self.operators.iter().zip(self.translations.iter())
    }

    /// The distinct operators, ignoring the translations.
    pub fn rotations(&self, tolerance: &Tolerance) -> Vec<[[f64; 3]; 3]> {
        let mut rotations: Vec<[[f64; 3]; 3]> = Vec::new();
        for op in self.operators.iter() {
            if !rotations.iter().any(|r| {
                                    utils::matrix_close(*r,
                                                        *op,
                                                        tolerance.rtol,
                                                        tolerance.atol)
                                })
            {
                rotations.push(*op);
            }
        }
        rotations
    }

    /// The operators and translations in the basis of the lattice.
    pub fn in_lattice_coordinates(&self,
                                  lattice: &Lattice)
                                  -> (Vec<[[f64; 3]; 3]>, Vec<[f64; 3]>) {
        let operators = self.operators
                            .iter()
                            .map(|op| to_lattice_coordinates(*op, lattice))
                            .collect();
        let translations = self.translations
                               .iter()
                               .map(|t| lattice.fractional(*t))
                               .collect();
        (operators, translations)
    }
}

/// Whether two Cartesian points are the same site modulo the lattice.
fn same_site(a: [f64; 3],
             b: [f64; 3],
             lattice: &Lattice,
             tolerance: &Tolerance)
             -> bool {
    let fa = lattice.fractional(a);
    let fb = lattice.fractional(b);
    let mut shifted = fb;
    for i in 0..3 {
        shifted[i] += (fa[i] - fb[i]).round();
    }
    tolerance.all_close(a, lattice.cartesian(shifted))
}

/// Finds the space group of a decorated lattice.
pub fn find_space_group(lattice: &Lattice,
                        atoms: &Atoms,
                        tolerance: &Tolerance)
                        -> Result<SpaceGroup> {
    find_space_group_threaded(lattice, atoms, tolerance, 1)
}

/// Finds the space group, splitting the point group search over threads.
pub fn find_space_group_threaded(lattice: &Lattice,
                                 atoms: &Atoms,
                                 tolerance: &Tolerance,
                                 threads: usize)
                                 -> Result<SpaceGroup> {
    let point_group =
        find_point_group_threaded(&lattice.to_cartesian, tolerance, threads)?;
    decorate(lattice, &point_group, atoms, tolerance)
}

/// Pairs each operator of a known point group with every fractional
/// translation that maps the atoms onto atoms of the same species.
///
/// Candidate translations take the first atom onto each atom of its own
/// species, every candidate is then checked against all of the atoms.
pub fn decorate(lattice: &Lattice,
                point_group: &PointGroup,
                atoms: &Atoms,
                tolerance: &Tolerance)
                -> Result<SpaceGroup> {
    if atoms.is_empty() {
        return Ok(SpaceGroup::from_point_group(point_group));
    }
    let fold = |p: [f64; 3]| {
        bring_into_cell(p, lattice, tolerance, Coordinates::Cartesian, false)
    };
    let positions = atoms.cartesian_positions(lattice)
                         .into_iter()
                         .map(fold)
                         .collect::<Vec<[f64; 3]>>();
    let mut species: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, label) in atoms.labels.iter().enumerate() {
        species.entry(label.as_str()).or_default().push(i);
    }
    let reference = positions[0];
    let candidates = species.get(atoms.labels[0].as_str())
                            .cloned()
                            .unwrap_or_default();
    let mut operators: Vec<[[f64; 3]; 3]> = Vec::new();
    let mut translations: Vec<[f64; 3]> = Vec::new();
    for op in point_group.operators.iter() {
        let rotated = utils::matvec(*op, reference);
        for j in candidates.iter() {
            let translation = fold(utils::subtract(positions[*j], rotated));
            let seen = operators.iter().zip(translations.iter()).any(|(o, t)| {
                           utils::matrix_close(*o, *op, tolerance.rtol, tolerance.atol)
                           && same_site(*t, translation, lattice, tolerance)
                       });
            if seen {
                continue;
            }
            let invariant = positions.iter()
                                     .zip(atoms.labels.iter())
                                     .all(|(position, label)| {
                                         let image = fold(utils::add(utils::matvec(*op, *position),
                                                                     translation));
                                         species.get(label.as_str())
                                                .map_or(false, |same| {
                                                    same.iter().any(|k| {
                                                        same_site(image,
                                                                  positions[*k],
                                                                  lattice,
                                                                  tolerance)
                                                    })
                                                })
                                     });
            if invariant {
                operators.push(*op);
                translations.push(translation);
            }
        }
    }
    debug!("Kept {} (operator, translation) pairs from {} point group operators.",
           operators.len(),
           point_group.len());
    Ok(SpaceGroup { operators,
                    translations })
}
