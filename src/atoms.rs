use crate::errors::{Result, SymmetryError};
use crate::lattice::Convention;
use crate::utils;
use std::str::FromStr;

/// The coordinate system points and operators are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coordinates {
    /// Cartesian coordinates.
    Cartesian,
    /// Fractional coordinates in the basis of a lattice.
    Lattice,
}

impl FromStr for Coordinates {
    type Err = SymmetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cart" | "cartesian" => Ok(Self::Cartesian),
            "lat" | "lattice" => Ok(Self::Lattice),
            _ => Err(SymmetryError::InvalidLattice(format!("Unknown coordinate system: {}",
                                                           s))),
        }
    }
}

/// Lattice - structure for containing information on a cell
///
/// > a: f64 - length of the a-vector
/// > b: f64 - length of the b-vector
/// > c: f64 - length of the c-vector
/// > to_fractional: [[f64; 3]; 3] - transformation matrix for converting to fractional
/// >                                coordinates
/// > to_cartesian: [[f64; 3]; 3] - transformation matrix for converting to cartesian
/// >                               coordinates, the rows are the generating vectors
/// > volume: f64 - the volume of the cell
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub to_fractional: [[f64; 3]; 3],
    pub to_cartesian: [[f64; 3]; 3],
    pub volume: f64,
}

impl Lattice {
    /// Initialises the structure from the generating vectors, which are the rows
    /// of lattice.
    ///
    /// > [
    /// >     [ax, ay, az],
    /// >     [bx, by, bz],
    /// >     [cx, cy, cz],
    /// >  ]
    pub fn new(lattice: [[f64; 3]; 3]) -> Result<Self> {
        let to_fractional = utils::invert_matrix(&lattice)?;
        Ok(Self { a: utils::norm(lattice[0]),
                  b: utils::norm(lattice[1]),
                  c: utils::norm(lattice[2]),
                  to_fractional,
                  to_cartesian: lattice,
                  volume: utils::determinant(lattice).abs() })
    }

    /// The lengths of the three generating vectors.
    pub fn lengths(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// The generating vectors as the columns of a matrix.
    pub fn columns(&self) -> [[f64; 3]; 3] {
        utils::transpose(self.to_cartesian)
    }

    /// Converts a Cartesian point to fractional coordinates.
    pub fn fractional(&self, point: [f64; 3]) -> [f64; 3] {
        utils::dot(point, self.to_fractional)
    }

    /// Converts a point in fractional coordinates to Cartesian.
    pub fn cartesian(&self, point: [f64; 3]) -> [f64; 3] {
        utils::dot(point, self.to_cartesian)
    }

    /// Expresses a Cartesian point in the requested coordinates.
    pub fn coordinates(&self,
                       point: [f64; 3],
                       coordinates: Coordinates)
                       -> [f64; 3] {
        match coordinates {
            Coordinates::Cartesian => point,
            Coordinates::Lattice => self.fractional(point),
        }
    }

    /// The reciprocal lattice, the inverse transpose of the generating vectors.
    pub fn reciprocal(&self, convention: Convention) -> Result<Self> {
        Self::new(crate::lattice::reciprocal_vectors(self.to_cartesian,
                                                     convention)?)
    }
}

/// The atomic decoration of a lattice.
///
/// > labels: Vec<String> - the species of each atom
/// > positions: Vec<[f64; 3]> - the position of each atom
/// > coordinates: Coordinates - the system the positions are written in
#[derive(Clone, Debug, PartialEq)]
pub struct Atoms {
    pub labels: Vec<String>,
    pub positions: Vec<[f64; 3]>,
    pub coordinates: Coordinates,
}

impl Atoms {
    /// Initialises the structure, the labels and positions must pair up.
    pub fn new(labels: Vec<String>,
               positions: Vec<[f64; 3]>,
               coordinates: Coordinates)
               -> Result<Self> {
        if labels.len() != positions.len() {
            return Err(SymmetryError::AtomMismatch { labels: labels.len(),
                                                     positions:
                                                         positions.len() });
        }
        Ok(Self { labels,
                  positions,
                  coordinates })
    }

    /// A lattice with no decoration, its space group is its point group.
    pub fn empty() -> Self {
        Self { labels: Vec::new(),
               positions: Vec::new(),
               coordinates: Coordinates::Lattice }
    }

    /// The number of atoms.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no atoms.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The positions of the atoms in Cartesian coordinates.
    pub fn cartesian_positions(&self, lattice: &Lattice) -> Vec<[f64; 3]> {
        match self.coordinates {
            Coordinates::Cartesian => self.positions.clone(),
            Coordinates::Lattice => self.positions
                                        .iter()
                                        .map(|p| lattice.cartesian(*p))
                                        .collect(),
        }
    }
}
