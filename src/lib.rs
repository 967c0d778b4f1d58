//! Lattice symmetry and symmetry reduction of k-point grids, as a multi-threaded
//! binary and library.
//!
//! Given the centering, lengths and angles of a conventional cell the crate
//! classifies the Bravais lattice, builds its primitive and reciprocal
//! vectors and finds the point group. Decorating the lattice with atoms gives
//! the space group. A k-point grid commensurate with the reciprocal lattice is
//! then reduced to its symmetrically distinct points and their weights, using
//! an index built from the Smith normal form of the grid so that every lookup
//! is O(1). The representatives can optionally be moved into the first
//! Brillouin zone through a Minkowski reduced reciprocal cell.
//!
//! ### Supported Platforms
//! - Linux
//! - Os X
//! - Windows
//!
//! ## Installing the binary
//! ### From Source
//! The following will create the ./target/release/bzr executable.
//! ```sh
//! $ cargo build --verbose --release
//! ```
//! From here you can either move or link the binary to folder in your path.
//! ```sh
//! $ mv ./target/release/bzr ~/bin
//! ```
//!
//! ## Usage
//! The conventional cell is described by its centering, three lengths and
//! three angles, the grid by the number of divisions of each reciprocal
//! vector. A body-centered cubic lattice with a 40x40x40 grid shifted by half
//! a step is reduced with
//! ```sh
//! $ bzr -c body -l 3.160614 3.160614 3.160614 -a 90 90 90 --degrees -g 40 40 40 -s 0.5 0.5 0.5
//! ```
//! Atoms lower the symmetry and are passed one at a time,
//! ```sh
//! $ bzr -c face -l 5.43 5.43 5.43 -a 90 90 90 --degrees -g 8 8 8 \
//!       --atom "Si 0 0 0" --atom "Si 0.25 0.25 0.25"
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ bzr --help
//! ```
//! ## Output
//! The program writes IRKPTS.dat, a table of the irreducible k-points and
//! their weights followed by the lattice type, the number of operators used,
//! the number of irreducible k-points and the total weight.
//!
//! ## Using the library
//! ```
//! use brillouin::atoms::Lattice;
//! use brillouin::point_group::find_point_group;
//! use brillouin::tolerance::Tolerance;
//!
//! let lattice = Lattice::new([[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]]).unwrap();
//! let group = find_point_group(&lattice.to_cartesian, &Tolerance::default()).unwrap();
//! assert_eq!(group.len(), 48);
//! ```
//! ## License
//! MIT

/// For parsing command-line arguments.
pub mod arguments;
/// Contains [Lattice](atoms::Lattice) for storing the generating vectors of a
/// cell and [Atoms](atoms::Atoms) for the atoms decorating it.
pub mod atoms;
/// Moving points into the unit cell and into the first Brillouin zone.
pub mod cell;
/// Provides the [SymmetryError](errors::SymmetryError) taxonomy.
pub mod errors;
/// Writes the reduced grid to file.
pub mod io;
/// Bravais lattice classification and generating vectors.
pub mod lattice;
/// Hermite and Smith normal forms of integer matrices.
pub mod normal_form;
/// The [GridIndex](orbits::GridIndex) and the reduction of a grid into
/// orbits.
pub mod orbits;
/// Finds the point group of a lattice.
pub mod point_group;
/// Provides a [Bar](progress::Bar) for reporting progress.
pub mod progress;
/// Gaussian and Minkowski lattice reduction.
pub mod reduction;
/// Generates the grid points inside a cell.
pub mod sampling;
/// Finds the space group of a decorated lattice.
pub mod space_group;
/// Numerical tolerances.
pub mod tolerance;
/// Misc functions mainly for vector and matrix manipulation.
pub mod utils;
