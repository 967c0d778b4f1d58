use crate::errors::{Result, SymmetryError};
use crate::normal_form::{check_commensurate, idet};
use crate::tolerance::Tolerance;
use crate::utils;
use log::debug;

/// The iteration bound for both Gaussian and Minkowski reduction.
const MAX_ITERATIONS: usize = 10;

fn sort_pair(v1: [f64; 3], v2: [f64; 3], eps: f64) -> ([f64; 3], [f64; 3]) {
    if utils::norm(v2) + eps < utils::norm(v1) {
        (v2, v1)
    } else {
        (v1, v2)
    }
}

/// Sorts the rows of a basis by ascending norm, equal norms keep their order.
pub fn sort_by_norm(basis: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut sorted = basis;
    sorted.sort_by(|a, b| utils::norm(*a).total_cmp(&utils::norm(*b)));
    sorted
}

/// Gauss reduces two vectors so that |v1| <= |v2| and v2 cannot be shortened
/// by adding a multiple of v1.
pub fn gaussian_reduce(v1: [f64; 3],
                       v2: [f64; 3],
                       eps: f64)
                       -> Result<([f64; 3], [f64; 3])> {
    let (mut v1, mut v2) = sort_pair(v1, v2, eps);
    if utils::vdot(v1, v1) == 0. {
        return Err(SymmetryError::LinearDependence(String::from("Cannot Gauss reduce with a zero vector")));
    }
    for _ in 0..MAX_ITERATIONS {
        let multiple = (utils::vdot(v1, v2) / utils::vdot(v1, v1)).round_ties_even();
        let shortened = utils::subtract(v2, utils::scale(multiple, v1));
        if utils::norm(shortened) + eps < utils::norm(v2) {
            v2 = shortened;
        }
        let reduced = utils::norm(v1) - eps < utils::norm(v2);
        let (s1, s2) = sort_pair(v1, v2, eps);
        v1 = s1;
        v2 = s2;
        if reduced {
            return Ok((v1, v2));
        }
    }
    Err(SymmetryError::Convergence(format!("Gaussian reduction did not finish in {} iterations",
                                           MAX_ITERATIONS)))
}

/// Replaces the third vector of a basis (rows) with the shortest vector
/// equivalent to it modulo the lattice of the first two, which are Gauss
/// reduced first.
///
/// The third vector is only replaced when the new one is shorter by more than
/// eps, so equally short choices leave it as it is.
pub fn reduce_last_vector(basis: &[[f64; 3]; 3],
                          tolerance: &Tolerance)
                          -> Result<[[f64; 3]; 3]> {
    let (v1, v2) = gaussian_reduce(basis[0], basis[1], tolerance.eps)?;
    let v3 = basis[2];
    let plane = [v1, v2, v3];
    let inverse = utils::invert_matrix(&plane)?;
    let normal = utils::cross(v1, v2);
    let normal = utils::scale(1. / utils::norm(normal), normal);
    // the projection of v3 onto the plane of v1 and v2
    let projection =
        utils::subtract(v3, utils::scale(utils::vdot(normal, v3), normal));
    let coefficients = utils::dot(projection, inverse);
    let corner = [(coefficients[0] + tolerance.eps).floor(),
                  (coefficients[1] + tolerance.eps).floor()];
    let nearest = [[0., 0.], [0., 1.], [1., 0.], [1., 1.]]
        .iter()
        .map(|[i, j]| utils::dot([corner[0] + i, corner[1] + j, 0.], plane))
        .min_by(|a, b| {
            utils::norm(utils::subtract(*a, projection))
                .total_cmp(&utils::norm(utils::subtract(*b, projection)))
        })
        .unwrap_or([0f64; 3]);
    let shortest = utils::subtract(v3, nearest);
    let v3 = if utils::norm(shortest) + tolerance.eps < utils::norm(v3) {
        shortest
    } else {
        v3
    };
    let reduced = [v1, v2, v3];
    let relation = check_commensurate(basis, &reduced, tolerance).map_err(|_| {
        SymmetryError::Consistency(String::from("Reducing the last vector changed the lattice"))
    })?;
    if idet(relation).abs() != 1 {
        return Err(SymmetryError::Consistency(String::from("Reducing the last vector changed the lattice")));
    }
    Ok(reduced)
}

/// Checks the twelve Minkowski conditions on a basis (rows), logging each one
/// that fails.
pub fn minkowski_conditions(basis: &[[f64; 3]; 3], eps: f64) -> bool {
    let [b1, b2, b3] = *basis;
    let n = utils::norm;
    let add = utils::add;
    let sub = utils::subtract;
    // each pair reads |shorter| <= |longer|
    let conditions = [("|b1| <= |b2|", n(b1), n(b2)),
                      ("|b2| <= |b3|", n(b2), n(b3)),
                      ("|b2| <= |b1 + b2|", n(b2), n(add(b1, b2))),
                      ("|b2| <= |b1 - b2|", n(b2), n(sub(b1, b2))),
                      ("|b3| <= |b1 + b3|", n(b3), n(add(b1, b3))),
                      ("|b3| <= |b3 - b1|", n(b3), n(sub(b3, b1))),
                      ("|b3| <= |b2 + b3|", n(b3), n(add(b2, b3))),
                      ("|b3| <= |b3 - b2|", n(b3), n(sub(b3, b2))),
                      ("|b3| <= |b1 + b2 + b3|", n(b3), n(add(add(b1, b2), b3))),
                      ("|b3| <= |b1 - b2 + b3|", n(b3), n(add(sub(b1, b2), b3))),
                      ("|b3| <= |b1 + b2 - b3|", n(b3), n(sub(add(b1, b2), b3))),
                      ("|b3| <= |b1 - b2 - b3|", n(b3), n(sub(sub(b1, b2), b3)))];
    let mut satisfied = true;
    for (condition, shorter, longer) in conditions.iter() {
        if *shorter > longer + eps {
            debug!("Minkowski condition {} failed: {} > {}",
                   condition, shorter, longer);
            satisfied = false;
        }
    }
    satisfied
}

/// Minkowski reduces a basis (rows), returning the shortest, most orthogonal
/// basis of the same lattice with a positive determinant.
///
/// The vectors are sorted by norm before the determinant is checked. A
/// negative determinant swaps the second and third vectors, so the result is
/// only in ascending norm order when the sorted basis is already right handed.
pub fn minkowski_reduce(basis: &[[f64; 3]; 3],
                        tolerance: &Tolerance)
                        -> Result<[[f64; 3]; 3]> {
    if utils::determinant(*basis).abs() <= tolerance.atol {
        return Err(SymmetryError::LinearDependence(format!("{:?} is not a basis",
                                                           basis)));
    }
    let mut reduced = *basis;
    for _ in 0..MAX_ITERATIONS {
        reduced = reduce_last_vector(&sort_by_norm(reduced), tolerance)?;
        if utils::norm(reduced[2]) >= utils::norm(reduced[1]) - tolerance.eps {
            break;
        }
    }
    let mut reduced = sort_by_norm(reduced);
    if !minkowski_conditions(&reduced, tolerance.eps) {
        return Err(SymmetryError::Convergence(format!("{:?} does not satisfy the Minkowski conditions",
                                                      reduced)));
    }
    if utils::determinant(reduced) + tolerance.eps < 0. {
        reduced.swap(1, 2);
    }
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reduction_gaussian() {
        let (v1, v2) = gaussian_reduce([2., 0., 0.], [1., 1., 0.], 1e-10).unwrap();
        assert!(utils::norm(v2) >= utils::norm(v1));
        assert_eq!(v1, [1., 1., 0.]);
        assert_eq!(v2, [1., -1., 0.])
    }

    #[test]
    fn reduction_gaussian_reduced() {
        let (v1, v2) = gaussian_reduce([0., 3., 0.], [1., 0., 0.], 1e-10).unwrap();
        assert_eq!(v1, [1., 0., 0.]);
        assert_eq!(v2, [0., 3., 0.])
    }

    #[test]
    fn reduction_gaussian_zero() {
        assert!(gaussian_reduce([0.; 3], [1., 0., 0.], 1e-10).is_err())
    }

    #[test]
    fn reduction_reduce_last_vector() {
        let basis = [[1., 0., 0.], [0., 1., 0.], [3.2, -4.9, 1.]];
        let reduced = reduce_last_vector(&basis, &Tolerance::default()).unwrap();
        assert_relative_eq!(reduced[2][0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(reduced[2][1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(reduced[2][2], 1., epsilon = 1e-12)
    }

    #[test]
    fn reduction_minkowski_skewed_cubic() {
        let basis = [[1., 0., 0.], [5., 1., 0.], [0., 3., 1.]];
        let reduced = minkowski_reduce(&basis, &Tolerance::default()).unwrap();
        for v in reduced.iter() {
            assert_relative_eq!(utils::norm(*v), 1., epsilon = 1e-12);
        }
        assert!(utils::determinant(reduced) > 0.)
    }

    #[test]
    fn reduction_minkowski_idempotent() {
        let tol = Tolerance::default();
        let basis = [[1., 0., 0.], [0.3, 1.1, 0.], [2.2, 3.4, 1.3]];
        let once = minkowski_reduce(&basis, &tol).unwrap();
        let twice = minkowski_reduce(&once, &tol).unwrap();
        assert!(minkowski_conditions(&once, tol.eps));
        assert_eq!(once, twice)
    }

    #[test]
    fn reduction_minkowski_face_centered_unchanged() {
        let tol = Tolerance::default();
        let basis = [[0., 0.5, 0.5], [0., -0.5, 0.5], [0.5, 0.5, 0.]];
        assert!(minkowski_conditions(&basis, tol.eps));
        assert_eq!(minkowski_reduce(&basis, &tol).unwrap(), basis);
        let basis = [[0., 0.5, 0.5], [0.5, 0., 0.5], [0.5, 0.5, 0.]];
        assert_eq!(minkowski_reduce(&basis, &tol).unwrap(), basis)
    }

    #[test]
    fn reduction_minkowski_body_centered_unchanged() {
        let tol = Tolerance::default();
        let basis = [[-0.5, 0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, -0.5]];
        assert!(minkowski_conditions(&basis, tol.eps));
        assert_eq!(minkowski_reduce(&basis, &tol).unwrap(), basis)
    }

    #[test]
    fn reduction_minkowski_body_centered_idempotent() {
        let tol = Tolerance::default();
        let basis = [[-0.5, 0.5, 0.5], [1.5, -0.5, 0.5], [1., 0., 0.]];
        let once = minkowski_reduce(&basis, &tol).unwrap();
        let twice = minkowski_reduce(&once, &tol).unwrap();
        assert_eq!(once, twice);
        for v in once.iter() {
            assert_relative_eq!(utils::norm(*v), 0.75f64.sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn reduction_minkowski_singular() {
        let basis = [[1., 0., 0.], [2., 0., 0.], [0., 0., 1.]];
        assert!(matches!(minkowski_reduce(&basis, &Tolerance::default()),
                         Err(SymmetryError::LinearDependence(_))))
    }

    #[test]
    fn reduction_minkowski_conditions() {
        let basis = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        assert!(minkowski_conditions(&basis, 1e-10));
        let basis = [[1., 0., 0.], [0., 1., 0.], [1., 1., 1.]];
        assert!(!minkowski_conditions(&basis, 1e-10))
    }
}
