use crate::atoms::Lattice;
use crate::errors::{Result, SymmetryError};
use crate::point_group::{find_point_group_threaded, PointGroup};
use crate::tolerance::Tolerance;
use crate::utils;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// The placement of additional lattice points in the conventional cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Centering {
    Primitive,
    Base,
    Body,
    Face,
}

impl FromStr for Centering {
    type Err = SymmetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prim" | "primitive" => Ok(Self::Primitive),
            "base" => Ok(Self::Base),
            "body" => Ok(Self::Body),
            "face" => Ok(Self::Face),
            _ => Err(SymmetryError::InvalidLattice(format!("Unknown centering: {}",
                                                           s))),
        }
    }
}

impl fmt::Display for Centering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primitive => "primitive",
            Self::Base => "base",
            Self::Body => "body",
            Self::Face => "face",
        };
        write!(f, "{}", name)
    }
}

/// Whether reciprocal vectors carry the factor of 2π.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convention {
    /// The inverse transpose of the lattice vectors.
    Ordinary,
    /// The inverse transpose multiplied by 2π.
    Angular,
}

impl FromStr for Convention {
    type Err = SymmetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ordinary" => Ok(Self::Ordinary),
            "angular" => Ok(Self::Angular),
            _ => Err(SymmetryError::InvalidLattice(format!("Unknown convention: {}",
                                                           s))),
        }
    }
}

/// The seven crystal families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrystalFamily {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Rhombohedral,
    Hexagonal,
    Cubic,
}

impl CrystalFamily {
    /// The number of operators in the point group of the family's lattices.
    pub fn point_group_order(&self) -> usize {
        match self {
            Self::Triclinic => 2,
            Self::Monoclinic => 4,
            Self::Orthorhombic => 8,
            Self::Rhombohedral => 12,
            Self::Tetragonal => 16,
            Self::Hexagonal => 24,
            Self::Cubic => 48,
        }
    }
}

/// The 14 Bravais lattices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BravaisLattice {
    SimpleCubic,
    BodyCenteredCubic,
    FaceCenteredCubic,
    Tetragonal,
    BodyCenteredTetragonal,
    Orthorhombic,
    BaseCenteredOrthorhombic,
    BodyCenteredOrthorhombic,
    FaceCenteredOrthorhombic,
    Hexagonal,
    Rhombohedral,
    Monoclinic,
    BaseCenteredMonoclinic,
    Triclinic,
}

impl BravaisLattice {
    /// The centering of the conventional cell.
    pub fn centering(&self) -> Centering {
        match self {
            Self::BodyCenteredCubic
            | Self::BodyCenteredTetragonal
            | Self::BodyCenteredOrthorhombic => Centering::Body,
            Self::FaceCenteredCubic | Self::FaceCenteredOrthorhombic => {
                Centering::Face
            }
            Self::BaseCenteredOrthorhombic | Self::BaseCenteredMonoclinic => {
                Centering::Base
            }
            _ => Centering::Primitive,
        }
    }

    /// The crystal family the lattice belongs to.
    pub fn family(&self) -> CrystalFamily {
        match self {
            Self::SimpleCubic
            | Self::BodyCenteredCubic
            | Self::FaceCenteredCubic => CrystalFamily::Cubic,
            Self::Tetragonal | Self::BodyCenteredTetragonal => {
                CrystalFamily::Tetragonal
            }
            Self::Orthorhombic
            | Self::BaseCenteredOrthorhombic
            | Self::BodyCenteredOrthorhombic
            | Self::FaceCenteredOrthorhombic => CrystalFamily::Orthorhombic,
            Self::Hexagonal => CrystalFamily::Hexagonal,
            Self::Rhombohedral => CrystalFamily::Rhombohedral,
            Self::Monoclinic | Self::BaseCenteredMonoclinic => {
                CrystalFamily::Monoclinic
            }
            Self::Triclinic => CrystalFamily::Triclinic,
        }
    }
}

impl fmt::Display for BravaisLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SimpleCubic => "simple cubic",
            Self::BodyCenteredCubic => "body-centered cubic",
            Self::FaceCenteredCubic => "face-centered cubic",
            Self::Tetragonal => "tetragonal",
            Self::BodyCenteredTetragonal => "body-centered tetragonal",
            Self::Orthorhombic => "orthorhombic",
            Self::BaseCenteredOrthorhombic => "base-centered orthorhombic",
            Self::BodyCenteredOrthorhombic => "body-centered orthorhombic",
            Self::FaceCenteredOrthorhombic => "face-centered orthorhombic",
            Self::Hexagonal => "hexagonal",
            Self::Rhombohedral => "rhombohedral",
            Self::Monoclinic => "monoclinic",
            Self::BaseCenteredMonoclinic => "base-centered monoclinic",
            Self::Triclinic => "triclinic",
        };
        write!(f, "{}", name)
    }
}

fn invalid<T>(reason: &str,
              centering: Centering,
              lengths: [f64; 3],
              angles: [f64; 3])
              -> Result<T> {
    Err(SymmetryError::InvalidLattice(format!("{}: {} centering with lengths {:?} and angles {:?}",
                                              reason, centering, lengths,
                                              angles)))
}

/// Determines the Bravais lattice from the centering, the lengths [a, b, c]
/// and the angles [α, β, γ] (radians) of the conventional cell.
pub fn classify(centering: Centering,
                lengths: [f64; 3],
                angles: [f64; 3],
                tolerance: &Tolerance)
                -> Result<BravaisLattice> {
    let [a, b, c] = lengths;
    let [alpha, beta, gamma] = angles;
    let close = |x: f64, y: f64| tolerance.close(x, y);
    let right = PI / 2.;
    let equal_lengths = close(a, b) && close(b, c) && close(a, c);
    let equal_angles = close(alpha, beta) && close(beta, gamma)
                       && close(alpha, gamma);
    if close(alpha, right) && close(beta, right) && close(gamma, right) {
        if equal_lengths {
            match centering {
                Centering::Primitive => Ok(BravaisLattice::SimpleCubic),
                Centering::Body => Ok(BravaisLattice::BodyCenteredCubic),
                Centering::Face => Ok(BravaisLattice::FaceCenteredCubic),
                Centering::Base => invalid("Cubic lattices cannot be base centered",
                                           centering, lengths, angles),
            }
        } else if close(a, b) && !close(b, c) {
            match centering {
                Centering::Primitive => Ok(BravaisLattice::Tetragonal),
                Centering::Body => Ok(BravaisLattice::BodyCenteredTetragonal),
                _ => invalid("Tetragonal lattices are primitive or body centered",
                             centering, lengths, angles),
            }
        } else {
            Ok(match centering {
                Centering::Primitive => BravaisLattice::Orthorhombic,
                Centering::Base => BravaisLattice::BaseCenteredOrthorhombic,
                Centering::Body => BravaisLattice::BodyCenteredOrthorhombic,
                Centering::Face => BravaisLattice::FaceCenteredOrthorhombic,
            })
        }
    } else if equal_angles {
        if equal_lengths && centering == Centering::Primitive {
            Ok(BravaisLattice::Rhombohedral)
        } else {
            invalid("Equal angles other than π/2 require a primitive rhombohedral cell",
                    centering, lengths, angles)
        }
    } else if close(alpha, right)
              && close(beta, right)
              && close(gamma, 2. * PI / 3.)
    {
        if close(a, b) && !close(b, c) && centering == Centering::Primitive {
            Ok(BravaisLattice::Hexagonal)
        } else {
            invalid("Hexagonal lattices are primitive with a = b != c",
                    centering, lengths, angles)
        }
    } else if close(beta, right) && close(gamma, right) && alpha < right {
        if a > c || b > c {
            return invalid("Monoclinic lattices require a, b <= c",
                           centering, lengths, angles);
        }
        match centering {
            Centering::Primitive => Ok(BravaisLattice::Monoclinic),
            Centering::Base => Ok(BravaisLattice::BaseCenteredMonoclinic),
            _ => invalid("Monoclinic lattices are primitive or base centered",
                         centering, lengths, angles),
        }
    } else if !equal_lengths && centering == Centering::Primitive {
        Ok(BravaisLattice::Triclinic)
    } else {
        invalid("No Bravais lattice matches", centering, lengths, angles)
    }
}

/// The vectors of the conventional cell, a along x and b in the xy-plane.
fn conventional_vectors(lengths: [f64; 3],
                        angles: [f64; 3])
                        -> Result<[[f64; 3]; 3]> {
    let [a, b, c] = lengths;
    let [alpha, beta, gamma] = angles;
    let cx = c * beta.cos();
    let cy = c / gamma.sin() * (alpha.cos() - beta.cos() * gamma.cos());
    let cz2 = utils::round_decimals(c.powi(2) - cx.powi(2) - cy.powi(2), 15);
    if cz2 <= 0. {
        return Err(SymmetryError::LinearDependence(format!("The angles {:?} do not give three independent vectors",
                                                           angles)));
    }
    Ok([[a, 0., 0.],
        [b * gamma.cos(), b * gamma.sin(), 0.],
        [cx, cy, cz2.sqrt()]])
}

/// Builds the primitive generating vectors (as rows) of the lattice with the
/// given centering, lengths and angles.
///
/// Primitive hexagonal and rhombohedral cells are rotated by γ/2 about z so
/// they agree with the usual tables of symmetry points. Body and face centering
/// always use the generic centered vectors, even with monoclinic lengths and
/// angles, which [classify] rejects for those centerings.
pub fn build_vectors(centering: Centering,
                     lengths: [f64; 3],
                     angles: [f64; 3],
                     tolerance: &Tolerance)
                     -> Result<[[f64; 3]; 3]> {
    let [a, b, c] = lengths;
    let [alpha, beta, gamma] = angles;
    let close = |x: f64, y: f64| tolerance.close(x, y);
    let right = PI / 2.;
    let mut sorted = angles;
    sorted.sort_by(|x, y| x.total_cmp(y));
    if sorted[0] + sorted[1] < sorted[2] || close(sorted[0] + sorted[1], sorted[2]) {
        return Err(SymmetryError::LinearDependence(format!("The two smallest angles of {:?} must sum to more than the largest",
                                                           angles)));
    }
    if angles.iter().all(|x| close(*x, 2. * PI / 3.)) {
        return Err(SymmetryError::LinearDependence(String::from("All angles equal to 2π/3 give coplanar vectors")));
    }
    let [av, bv, cv] = conventional_vectors(lengths, angles)?;
    let half = |x: [f64; 3]| utils::scale(0.5, x);
    let vectors = match centering {
        Centering::Primitive => {
            let hexagonal = close(a, b)
                            && !close(b, c)
                            && close(alpha, right)
                            && close(beta, right)
                            && close(gamma, 2. * PI / 3.);
            let rhombohedral = close(alpha, beta)
                               && close(beta, gamma)
                               && !close(beta, right)
                               && close(a, b)
                               && close(b, c);
            if hexagonal || rhombohedral {
                let (sin, cos) = (gamma / 2.).sin_cos();
                let rotation = [[cos, sin, 0.], [-sin, cos, 0.], [0., 0., 1.]];
                [utils::matvec(rotation, av),
                 utils::matvec(rotation, bv),
                 utils::matvec(rotation, cv)]
            } else {
                [av, bv, cv]
            }
        }
        Centering::Base => {
            let monoclinic = alpha < right
                             && close(beta, right)
                             && close(gamma, right)
                             && a <= c
                             && b <= c
                             && !close(a, b)
                             && !close(b, c)
                             && !close(a, c);
            if monoclinic {
                [half(utils::add(av, bv)),
                 half(utils::subtract(bv, av)),
                 cv]
            } else {
                [half(utils::subtract(av, bv)),
                 half(utils::add(av, bv)),
                 cv]
            }
        }
        Centering::Body => [half(utils::subtract(utils::add(bv, cv), av)),
                            half(utils::subtract(utils::add(av, cv), bv)),
                            half(utils::subtract(utils::add(av, bv), cv))],
        Centering::Face => [half(utils::add(bv, cv)),
                            half(utils::add(av, cv)),
                            half(utils::add(av, bv))],
    };
    utils::invert_matrix(&vectors)?;
    Ok(vectors)
}

/// The reciprocal vectors (as rows) of a set of generating vectors.
pub fn reciprocal_vectors(vectors: [[f64; 3]; 3],
                          convention: Convention)
                          -> Result<[[f64; 3]; 3]> {
    let mut reciprocal = utils::transpose(utils::invert_matrix(&vectors)?);
    if let Convention::Angular = convention {
        for v in reciprocal.iter_mut() {
            *v = utils::scale(2. * PI, *v);
        }
    }
    Ok(reciprocal)
}

/// The textbook primitive vectors of a named Bravais lattice.
///
/// Unlike [build_vectors] the lengths and angles are checked against the
/// constraints of the requested type.
pub fn standard_vectors(lattice_type: BravaisLattice,
                        lengths: [f64; 3],
                        angles: [f64; 3],
                        tolerance: &Tolerance)
                        -> Result<[[f64; 3]; 3]> {
    let [a, b, c] = lengths;
    let [alpha, beta, gamma] = angles;
    let close = |x: f64, y: f64| tolerance.close(x, y);
    let right = PI / 2.;
    let centering = lattice_type.centering();
    let require = |condition: bool, reason: &str| -> Result<()> {
        if condition {
            Ok(())
        } else {
            invalid(&format!("{} for a {} lattice", reason, lattice_type),
                    centering, lengths, angles)
        }
    };
    let right_angles =
        close(alpha, right) && close(beta, right) && close(gamma, right);
    let cubic = close(a, b) && close(b, c);
    let tetragonal = close(a, b) && !close(b, c);
    let ascending = a < b && b < c;
    let vectors = match lattice_type {
        BravaisLattice::SimpleCubic => {
            require(cubic && right_angles, "Expected a = b = c and right angles")?;
            [[a, 0., 0.], [0., a, 0.], [0., 0., a]]
        }
        BravaisLattice::FaceCenteredCubic => {
            require(cubic && right_angles, "Expected a = b = c and right angles")?;
            [[0., a / 2., a / 2.], [a / 2., 0., a / 2.], [a / 2., a / 2., 0.]]
        }
        BravaisLattice::BodyCenteredCubic => {
            require(cubic && right_angles, "Expected a = b = c and right angles")?;
            [[-a / 2., a / 2., a / 2.],
             [a / 2., -a / 2., a / 2.],
             [a / 2., a / 2., -a / 2.]]
        }
        BravaisLattice::Tetragonal => {
            require(tetragonal && right_angles,
                    "Expected a = b != c and right angles")?;
            [[a, 0., 0.], [0., a, 0.], [0., 0., c]]
        }
        BravaisLattice::BodyCenteredTetragonal => {
            require(tetragonal && right_angles,
                    "Expected a = b != c and right angles")?;
            [[-a / 2., a / 2., c / 2.],
             [a / 2., -a / 2., c / 2.],
             [a / 2., a / 2., -c / 2.]]
        }
        BravaisLattice::Orthorhombic => {
            require(ascending && right_angles,
                    "Expected a < b < c and right angles")?;
            [[a, 0., 0.], [0., b, 0.], [0., 0., c]]
        }
        BravaisLattice::FaceCenteredOrthorhombic => {
            require(ascending && right_angles,
                    "Expected a < b < c and right angles")?;
            [[0., b / 2., c / 2.], [a / 2., 0., c / 2.], [a / 2., b / 2., 0.]]
        }
        BravaisLattice::BodyCenteredOrthorhombic => {
            require(ascending && right_angles,
                    "Expected a < b < c and right angles")?;
            [[-a / 2., b / 2., c / 2.],
             [a / 2., -b / 2., c / 2.],
             [a / 2., b / 2., -c / 2.]]
        }
        BravaisLattice::BaseCenteredOrthorhombic => {
            require(a < b && right_angles, "Expected a < b and right angles")?;
            [[a / 2., -b / 2., 0.], [a / 2., b / 2., 0.], [0., 0., c]]
        }
        BravaisLattice::Hexagonal => {
            require(tetragonal
                    && close(alpha, right)
                    && close(beta, right)
                    && close(gamma, 2. * PI / 3.),
                    "Expected a = b != c, α = β = π/2 and γ = 2π/3")?;
            let y = a * 3f64.sqrt() / 2.;
            [[a / 2., -y, 0.], [a / 2., y, 0.], [0., 0., c]]
        }
        BravaisLattice::Rhombohedral => {
            require(cubic && close(alpha, beta) && close(beta, gamma),
                    "Expected equal lengths and equal angles")?;
            require(!close(alpha, right)
                    && !close(alpha, PI / 3.)
                    && !close(alpha, (-1f64 / 3.).acos())
                    && alpha < 2. * PI / 3.,
                    "Expected α < 2π/3 and not one of π/2, π/3 or arccos(-1/3)")?;
            let (sin, cos) = (alpha / 2.).sin_cos();
            let x = a * alpha.cos() / cos.abs();
            [[a * cos, -a * sin, 0.],
             [a * cos, a * sin, 0.],
             [x, 0., (a.powi(2) - x.powi(2)).sqrt()]]
        }
        BravaisLattice::Monoclinic => {
            require(a <= c && b <= c, "Expected a, b <= c")?;
            require(alpha < right && close(beta, right) && close(gamma, right),
                    "Expected α < π/2 and β = γ = π/2")?;
            [[a, 0., 0.], [0., b, 0.], [0., c * alpha.cos(), c * alpha.sin()]]
        }
        BravaisLattice::BaseCenteredMonoclinic => {
            require(a <= c && b <= c, "Expected a, b <= c")?;
            require(alpha < right && close(beta, right) && close(gamma, right),
                    "Expected α < π/2 and β = γ = π/2")?;
            [[a / 2., b / 2., 0.],
             [-a / 2., b / 2., 0.],
             [0., c * alpha.cos(), c * alpha.sin()]]
        }
        BravaisLattice::Triclinic => {
            require(!cubic
                    && !(close(alpha, beta) && close(beta, gamma)),
                    "Expected unequal lengths and unequal angles")?;
            conventional_vectors(lengths, angles)?
        }
    };
    utils::invert_matrix(&vectors)?;
    Ok(vectors)
}

/// The geometry of a Bravais lattice: its type, real and reciprocal cells
/// and point group.
#[derive(Clone, Debug)]
pub struct LatticeGeometry {
    pub centering: Centering,
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
    pub convention: Convention,
    pub lattice_type: BravaisLattice,
    pub real: Lattice,
    pub reciprocal: Lattice,
    pub point_group: PointGroup,
}

impl LatticeGeometry {
    /// Classifies the lattice, builds both cells and finds the point group,
    /// splitting the search over threads.
    pub fn new(centering: Centering,
               lengths: [f64; 3],
               angles: [f64; 3],
               convention: Convention,
               tolerance: &Tolerance,
               threads: usize)
               -> Result<Self> {
        let lattice_type = classify(centering, lengths, angles, tolerance)?;
        let real =
            Lattice::new(build_vectors(centering, lengths, angles, tolerance)?)?;
        let reciprocal = real.reciprocal(convention)?;
        let point_group =
            find_point_group_threaded(&real.to_cartesian, tolerance, threads)?;
        Ok(Self { centering,
                  lengths,
                  angles,
                  convention,
                  lattice_type,
                  real,
                  reciprocal,
                  point_group })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RIGHT: [f64; 3] = [PI / 2., PI / 2., PI / 2.];

    fn assert_vectors_eq(a: [[f64; 3]; 3], b: [[f64; 3]; 3]) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[i][j], b[i][j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn lattice_classify_cubic() {
        let tol = Tolerance::default();
        let lengths = [1.; 3];
        assert_eq!(classify(Centering::Primitive, lengths, RIGHT, &tol),
                   Ok(BravaisLattice::SimpleCubic));
        assert_eq!(classify(Centering::Body, lengths, RIGHT, &tol),
                   Ok(BravaisLattice::BodyCenteredCubic));
        assert_eq!(classify(Centering::Face, lengths, RIGHT, &tol),
                   Ok(BravaisLattice::FaceCenteredCubic));
        assert!(matches!(classify(Centering::Base, lengths, RIGHT, &tol),
                         Err(SymmetryError::InvalidLattice(_))))
    }

    #[test]
    fn lattice_classify_right_angles() {
        let tol = Tolerance::default();
        assert_eq!(classify(Centering::Body, [1., 1., 2.], RIGHT, &tol),
                   Ok(BravaisLattice::BodyCenteredTetragonal));
        assert!(classify(Centering::Face, [1., 1., 2.], RIGHT, &tol).is_err());
        assert_eq!(classify(Centering::Base, [1., 2., 3.], RIGHT, &tol),
                   Ok(BravaisLattice::BaseCenteredOrthorhombic));
        assert_eq!(classify(Centering::Face, [1., 2., 3.], RIGHT, &tol),
                   Ok(BravaisLattice::FaceCenteredOrthorhombic))
    }

    #[test]
    fn lattice_classify_oblique() {
        let tol = Tolerance::default();
        let hexagonal = [PI / 2., PI / 2., 2. * PI / 3.];
        assert_eq!(classify(Centering::Primitive, [1., 1., 1.6], hexagonal, &tol),
                   Ok(BravaisLattice::Hexagonal));
        assert!(classify(Centering::Body, [1., 1., 1.6], hexagonal, &tol).is_err());
        assert_eq!(classify(Centering::Primitive, [1.; 3], [1.; 3], &tol),
                   Ok(BravaisLattice::Rhombohedral));
        assert!(classify(Centering::Face, [1.; 3], [1.; 3], &tol).is_err());
        let monoclinic = [1.2, PI / 2., PI / 2.];
        assert_eq!(classify(Centering::Base, [1., 1.2, 1.5], monoclinic, &tol),
                   Ok(BravaisLattice::BaseCenteredMonoclinic));
        assert!(classify(Centering::Primitive, [2., 1.2, 1.5], monoclinic, &tol)
                .is_err());
        assert_eq!(classify(Centering::Primitive,
                            [1., 1.3, 1.7],
                            [1.3, 1.4, 1.5],
                            &tol),
                   Ok(BravaisLattice::Triclinic))
    }

    #[test]
    fn lattice_family() {
        assert_eq!(BravaisLattice::BodyCenteredTetragonal.family()
                                                        .point_group_order(),
                   16);
        assert_eq!(BravaisLattice::BaseCenteredMonoclinic.centering(),
                   Centering::Base);
        assert_eq!(BravaisLattice::FaceCenteredCubic.to_string(),
                   "face-centered cubic")
    }

    #[test]
    fn lattice_build_vectors_bcc() {
        let vectors = build_vectors(Centering::Body,
                                    [2.; 3],
                                    RIGHT,
                                    &Tolerance::default()).unwrap();
        assert_vectors_eq(vectors,
                          [[-1., 1., 1.], [1., -1., 1.], [1., 1., -1.]])
    }

    #[test]
    fn lattice_build_vectors_matches_standard() {
        let tol = Tolerance::default();
        let fcc = build_vectors(Centering::Face, [3.; 3], RIGHT, &tol).unwrap();
        let standard = standard_vectors(BravaisLattice::FaceCenteredCubic,
                                        [3.; 3],
                                        RIGHT,
                                        &tol).unwrap();
        assert_vectors_eq(fcc, standard);
        let angles = [PI / 2., PI / 2., 2. * PI / 3.];
        let hexagonal =
            build_vectors(Centering::Primitive, [1., 1., 1.6], angles, &tol)
                .unwrap();
        let standard = standard_vectors(BravaisLattice::Hexagonal,
                                        [1., 1., 1.6],
                                        angles,
                                        &tol).unwrap();
        assert_vectors_eq(hexagonal, standard)
    }

    #[test]
    fn lattice_build_vectors_dependent() {
        let tol = Tolerance::default();
        let flat = [PI / 6., PI / 6., PI / 2.];
        assert!(matches!(build_vectors(Centering::Primitive, [1.; 3], flat, &tol),
                         Err(SymmetryError::LinearDependence(_))));
        let coplanar = [2. * PI / 3.; 3];
        assert!(matches!(build_vectors(Centering::Primitive,
                                       [1.; 3],
                                       coplanar,
                                       &tol),
                         Err(SymmetryError::LinearDependence(_))))
    }

    #[test]
    fn lattice_reciprocal_vectors() {
        let vectors = [[-1., 1., 1.], [1., -1., 1.], [1., 1., -1.]];
        let reciprocal =
            reciprocal_vectors(vectors, Convention::Ordinary).unwrap();
        for (i, v) in vectors.iter().enumerate() {
            for (j, r) in reciprocal.iter().enumerate() {
                let expected = if i == j { 1. } else { 0. };
                assert_relative_eq!(utils::vdot(*v, *r), expected,
                                    epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn lattice_standard_vectors_invalid() {
        let tol = Tolerance::default();
        assert!(standard_vectors(BravaisLattice::Orthorhombic,
                                 [2., 1., 3.],
                                 RIGHT,
                                 &tol).is_err());
        assert!(standard_vectors(BravaisLattice::Rhombohedral,
                                 [1.; 3],
                                 [PI / 3.; 3],
                                 &tol).is_err());
        let rhombohedral = standard_vectors(BravaisLattice::Rhombohedral,
                                            [1.; 3],
                                            [1.; 3],
                                            &tol).unwrap();
        for v in rhombohedral.iter() {
            assert_relative_eq!(utils::norm(*v), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn lattice_geometry_new() {
        let geometry = LatticeGeometry::new(Centering::Primitive,
                                            [1.; 3],
                                            RIGHT,
                                            Convention::Ordinary,
                                            &Tolerance::default(),
                                            1).unwrap();
        assert_eq!(geometry.lattice_type, BravaisLattice::SimpleCubic);
        assert_eq!(geometry.point_group.len(), 48);
        assert_relative_eq!(geometry.reciprocal.volume, 1.)
    }
}
