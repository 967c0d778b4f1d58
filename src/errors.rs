use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, SymmetryError>;

/// The errors that can be raised while finding symmetry or reducing a grid.
///
/// None of these are transient: they either point at malformed input or at a
/// broken internal invariant, so they should be reported once and not retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymmetryError {
    /// The lengths and angles do not describe the requested lattice type or
    /// centering.
    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),
    /// The generating vectors are degenerate and do not span 3D space.
    #[error("Linearly dependent vectors: {0}")]
    LinearDependence(String),
    /// An integer matrix with zero determinant was passed to a normal form.
    #[error("Matrix is singular and has no normal form")]
    SingularMatrix,
    /// The grid is not an integer combination of the lattice vectors, or its
    /// cell is larger than the lattice cell.
    #[error("Incommensurate lattices: {0}")]
    Incommensurate(String),
    /// A basis reduction did not terminate or failed its post-condition.
    #[error("Reduction failed to converge: {0}")]
    Convergence(String),
    /// An internal invariant was broken.
    #[error("Consistency check failed: {0}")]
    Consistency(String),
    /// The atomic labels and positions have different lengths.
    #[error("Supplied {labels} atomic labels but {positions} positions")]
    AtomMismatch { labels: usize, positions: usize },
}
