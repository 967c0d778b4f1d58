use crate::atoms::Lattice;
use crate::errors::{Result, SymmetryError};
use crate::tolerance::Tolerance;
use crate::utils;
use crossbeam_utils::thread;
use log::debug;

const IDENTITY: [[f64; 3]; 3] = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];

/// The operators that map a lattice onto itself.
///
/// Each operator is a Cartesian matrix acting on column vectors, p' = O.p.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    pub operators: Vec<[[f64; 3]; 3]>,
}

impl PointGroup {
    /// The number of operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the group has no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Whether an operator is already in the group.
    pub fn contains(&self,
                    operator: [[f64; 3]; 3],
                    tolerance: &Tolerance)
                    -> bool {
        contains(&self.operators, operator, tolerance)
    }

    /// The operators expressed in the basis of the lattice, A^-1.O.A.
    pub fn in_lattice_coordinates(&self,
                                  lattice: &Lattice)
                                  -> Vec<[[f64; 3]; 3]> {
        self.operators
            .iter()
            .map(|op| to_lattice_coordinates(*op, lattice))
            .collect()
    }

    /// The unique images of a vector under the group.
    pub fn shell(&self,
                 vector: [f64; 3],
                 tolerance: &Tolerance)
                 -> Vec<[f64; 3]> {
        let mut shell: Vec<[f64; 3]> = Vec::with_capacity(self.len());
        for op in self.operators.iter() {
            let image = utils::matvec(*op, vector);
            if !shell.iter().any(|v| tolerance.all_close(*v, image)) {
                shell.push(image);
            }
        }
        shell
    }
}

/// Converts a Cartesian operator into the basis of a lattice.
pub fn to_lattice_coordinates(operator: [[f64; 3]; 3],
                              lattice: &Lattice)
                              -> [[f64; 3]; 3] {
    utils::matmul(utils::matmul(utils::transpose(lattice.to_fractional),
                                operator),
                  lattice.columns())
}

fn contains(operators: &[[[f64; 3]; 3]],
            operator: [[f64; 3]; 3],
            tolerance: &Tolerance)
            -> bool {
    operators.iter().any(|op| {
                        utils::matrix_close(*op,
                                            operator,
                                            tolerance.rtol,
                                            tolerance.atol)
                    })
}

/// Orthogonalises a set of vectors, returning the orthogonal vectors and the
/// projection coefficients.
pub fn gram_schmidt(v: &[[f64; 3]; 3]) -> ([[f64; 3]; 3], [[f64; 3]; 3]) {
    let mut u = [[0f64; 3]; 3];
    let mut mu = [[0f64; 3]; 3];
    u[0] = v[0];
    mu[1][0] = utils::vdot(v[1], u[0]) / utils::vdot(u[0], u[0]);
    for i in 0..3 {
        u[1][i] = v[1][i] - (mu[1][0] * u[0][i]);
    }
    mu[2][0] = utils::vdot(v[2], u[0]) / utils::vdot(u[0], u[0]);
    mu[2][1] = utils::vdot(v[2], u[1]) / utils::vdot(u[1], u[1]);
    for i in 0..3 {
        u[2][i] = v[2][i] - (mu[2][0] * u[0][i]) - (mu[2][1] * u[1][i]);
    }
    (u, mu)
}

/// Finds every lattice point inside the sphere whose radius is the length of
/// the longest generating vector (rows of vectors).
pub fn search_sphere(vectors: &[[f64; 3]; 3],
                     eps: f64)
                     -> Result<Vec<[f64; 3]>> {
    let radius = vectors.iter()
                        .map(|v| utils::norm(*v))
                        .fold(0f64, |a, b| a.max(b));
    let (orthogonal, _) = gram_schmidt(vectors);
    let dual = utils::transpose(utils::invert_matrix(vectors)?);
    // the dual bound covers skewed cells the Gram-Schmidt bound can miss
    let mut limits = [0i64; 3];
    for (i, limit) in limits.iter_mut().enumerate() {
        let gram = (radius / utils::norm(orthogonal[i]) + eps).ceil();
        let dual = (radius * utils::norm(dual[i]) + eps).ceil();
        *limit = gram.max(dual) as i64;
    }
    let mut points = Vec::new();
    for i in -limits[0]..=limits[0] {
        for j in -limits[1]..=limits[1] {
            for k in -limits[2]..=limits[2] {
                let point = utils::dot([i as f64, j as f64, k as f64], *vectors);
                if utils::vdot(point, point) - eps < radius.powi(2) {
                    points.push(point);
                }
            }
        }
    }
    Ok(points)
}

/// Finds the point group of the lattice generated by the rows of vectors.
pub fn find_point_group(vectors: &[[f64; 3]; 3],
                        tolerance: &Tolerance)
                        -> Result<PointGroup> {
    find_point_group_threaded(vectors, tolerance, 1)
}

/// Finds the point group, splitting the candidate images of the first
/// generating vector over threads.
///
/// Sphere points are sorted into buckets by which generator they share a
/// length with. Every ordered triple drawn from the buckets is accepted when
/// its volume matches the cell volume and the map from the generators to the
/// triple is orthogonal.
pub fn find_point_group_threaded(vectors: &[[f64; 3]; 3],
                                 tolerance: &Tolerance,
                                 threads: usize)
                                 -> Result<PointGroup> {
    let inverse = utils::invert_matrix(&utils::transpose(*vectors))?;
    let volume = utils::determinant(*vectors).abs();
    let points = search_sphere(vectors, tolerance.eps)?;
    let mut buckets: [Vec<[f64; 3]>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (bucket, v) in buckets.iter_mut().zip(vectors.iter()) {
        let length = utils::vdot(*v, *v);
        *bucket = points.iter()
                        .filter(|p| tolerance.close(utils::vdot(**p, **p), length))
                        .copied()
                        .collect();
    }
    debug!("Point group search over {} sphere points, buckets of {}, {} and {}.",
           points.len(),
           buckets[0].len(),
           buckets[1].len(),
           buckets[2].len());
    let scan = |first: &[[f64; 3]]| -> Vec<[[f64; 3]; 3]> {
        let mut found = Vec::new();
        for p1 in first.iter() {
            for p2 in buckets[1].iter().filter(|p| *p != p1) {
                for p3 in buckets[2].iter().filter(|p| *p != p1 && *p != p2) {
                    let candidate = [*p1, *p2, *p3];
                    if !tolerance.close(utils::determinant(candidate).abs(),
                                        volume)
                    {
                        continue;
                    }
                    let op =
                        utils::matmul(utils::transpose(candidate), inverse);
                    let square = utils::matmul(op, utils::transpose(op));
                    if utils::matrix_close(square,
                                           IDENTITY,
                                           tolerance.rtol,
                                           tolerance.atol)
                       && !contains(&found, op, tolerance)
                    {
                        found.push(op);
                    }
                }
            }
        }
        found
    };
    let partials = match threads.cmp(&1) {
        std::cmp::Ordering::Greater if buckets[0].len() > 1 => {
            let chunk_size = (buckets[0].len() / threads)
                             + (buckets[0].len() % threads).min(1);
            let scan = &scan;
            thread::scope(|s| {
                let spawned_threads = buckets[0].chunks(chunk_size)
                                                .map(|chunk| {
                                                    s.spawn(move |_| scan(chunk))
                                                })
                                                .collect::<Vec<_>>();
                spawned_threads.into_iter()
                               .map(|thread| thread.join())
                               .collect::<std::result::Result<Vec<_>, _>>()
            }).map_err(|_| {
                  SymmetryError::Consistency(String::from("Failed to join threads in point group search."))
              })?
              .map_err(|_| {
                  SymmetryError::Consistency(String::from("A point group search thread panicked."))
              })?
        }
        _ => vec![scan(&buckets[0])],
    };
    let mut operators: Vec<[[f64; 3]; 3]> = Vec::new();
    for op in partials.into_iter().flatten() {
        if !contains(&operators, op, tolerance) {
            operators.push(op);
        }
    }
    if !contains(&operators, IDENTITY, tolerance) {
        return Err(SymmetryError::Consistency(String::from("The identity is missing from the point group")));
    }
    debug!("Found {} point group operators.", operators.len());
    Ok(PointGroup { operators })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CUBIC: [[f64; 3]; 3] = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];

    #[test]
    fn point_group_gram_schmidt() {
        let (u, mu) = gram_schmidt(&[[1., 0., 0.], [1., 1., 0.], [1., 1., 1.]]);
        assert_eq!(u, CUBIC);
        assert_eq!(mu[1][0], 1.);
        assert_eq!(mu[2][1], 1.)
    }

    #[test]
    fn point_group_search_sphere() {
        let points = search_sphere(&CUBIC, 1e-9).unwrap();
        assert_eq!(points.len(), 7);
        assert!(points.contains(&[0., 0., 0.]))
    }

    #[test]
    fn point_group_simple_cubic() {
        let group = find_point_group(&CUBIC, &Tolerance::default()).unwrap();
        assert_eq!(group.len(), 48);
        for op in group.operators.iter() {
            assert_relative_eq!(utils::determinant(*op).abs(), 1.,
                                epsilon = 1e-10);
            let square = utils::matmul(*op, utils::transpose(*op));
            assert!(utils::matrix_close(square, IDENTITY, 0., 1e-10));
        }
    }

    #[test]
    fn point_group_contains() {
        let tol = Tolerance::default();
        let group = find_point_group(&CUBIC, &tol).unwrap();
        let inversion = [[-1., 0., 0.], [0., -1., 0.], [0., 0., -1.]];
        let quarter = [[0., -1., 0.], [1., 0., 0.], [0., 0., 1.]];
        assert!(group.contains(IDENTITY, &tol));
        assert!(group.contains(inversion, &tol));
        assert!(group.contains(quarter, &tol));
        let tetragonal =
            find_point_group(&[[1., 0., 0.], [0., 1., 0.], [0., 0., 1.7]], &tol).unwrap();
        let swap_xz = [[0., 0., 1.], [0., 1., 0.], [1., 0., 0.]];
        assert!(!tetragonal.contains(swap_xz, &tol))
    }

    #[test]
    fn point_group_preserves_volume() {
        let vectors = [[-1., 1., 1.], [1., -1., 1.], [1., 1., -1.]];
        let group = find_point_group(&vectors, &Tolerance::default()).unwrap();
        assert_eq!(group.len(), 48);
        let volume = utils::determinant(vectors).abs();
        for op in group.operators.iter() {
            let image = utils::matmul(*op, utils::transpose(vectors));
            assert_relative_eq!(utils::determinant(image).abs(), volume,
                                epsilon = 1e-10);
        }
    }

    #[test]
    fn point_group_tetragonal() {
        let vectors = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.7]];
        let group = find_point_group(&vectors, &Tolerance::default()).unwrap();
        assert_eq!(group.len(), 16)
    }

    #[test]
    fn point_group_skewed_basis() {
        let vectors = [[1., 0., 0.], [5., 1., 0.], [0., 3., 1.]];
        let group = find_point_group(&vectors, &Tolerance::default()).unwrap();
        assert_eq!(group.len(), 48)
    }

    #[test]
    fn point_group_threaded() {
        let vectors = [[0., 0.5, 0.5], [0.5, 0., 0.5], [0.5, 0.5, 0.]];
        let tol = Tolerance::default();
        let single = find_point_group(&vectors, &tol).unwrap();
        let threaded = find_point_group_threaded(&vectors, &tol, 4).unwrap();
        assert_eq!(single, threaded)
    }

    #[test]
    fn point_group_shell() {
        let group = find_point_group(&CUBIC, &Tolerance::default()).unwrap();
        let tol = Tolerance::default();
        assert_eq!(group.shell([1., 0., 0.], &tol).len(), 6);
        assert_eq!(group.shell([1., 1., 0.], &tol).len(), 12);
        assert_eq!(group.shell([0., 0., 0.], &tol).len(), 1)
    }

    #[test]
    fn point_group_in_lattice_coordinates() {
        let vectors = [[-1., 1., 1.], [1., -1., 1.], [1., 1., -1.]];
        let lattice = Lattice::new(vectors).unwrap();
        let group = find_point_group(&vectors, &Tolerance::default()).unwrap();
        for op in group.in_lattice_coordinates(&lattice).iter() {
            for x in op.iter().flatten() {
                assert_relative_eq!(*x, x.round(), epsilon = 1e-10);
            }
        }
    }
}
