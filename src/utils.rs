use crate::errors::{Result, SymmetryError};

/// compute the cross product of two vectors
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[1] * b[2] - a[2] * b[1],
     a[2] * b[0] - a[0] * b[2],
     a[0] * b[1] - a[1] * b[0]]
}

/// compute the dot product between a vector and a matrix (v.M)
pub fn dot(v: [f64; 3], m: [[f64; 3]; 3]) -> [f64; 3] {
    let mut out = [0f64; 3];
    for (i, out) in out.iter_mut().enumerate() {
        *out = v[0] * m[0][i] + v[1] * m[1][i] + v[2] * m[2][i]
    }
    out
}

/// compute the product of a matrix and a column vector (M.v)
pub fn matvec(m: [[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [vdot(m[0], v), vdot(m[1], v), vdot(m[2], v)]
}

/// compute the dot product between two vectors
pub fn vdot(a: [f64; 3], b: [f64; 3]) -> f64 {
    let mut out = 0f64;
    for i in 0..3 {
        out += a[i] * b[i]
    }
    out
}

/// compute the norm of a vector
pub fn norm(a: [f64; 3]) -> f64 {
    a.iter().map(|a| a.powi(2)).sum::<f64>().powf(0.5)
}

/// a + b
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// a - b
pub fn subtract(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// s * a
pub fn scale(s: f64, a: [f64; 3]) -> [f64; 3] {
    [s * a[0], s * a[1], s * a[2]]
}

/// compute the transpose of a matrix
pub fn transpose(m: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0f64; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, x) in row.iter().enumerate() {
            out[j][i] = *x;
        }
    }
    out
}

/// compute the matrix product A.B
pub fn matmul(a: [[f64; 3]; 3], b: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0f64; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        *row = dot(a[i], b);
    }
    out
}

/// the determinant of a 3x3 matrix
pub fn determinant(m: [[f64; 3]; 3]) -> f64 {
    vdot(m[0], cross(m[1], m[2]))
}

/// calculates the inverse of a 3x3 matrix
pub fn invert_matrix(m: &[[f64; 3]; 3]) -> Result<[[f64; 3]; 3]> {
    let minor00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    let minor01 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
    let minor02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    let determinant =
        m[0][0] * minor00 - m[0][1] * minor01 + m[0][2] * minor02;
    if determinant.abs() < 1e-16 {
        return Err(SymmetryError::LinearDependence(format!("{:?} doesn't span 3D space",
                                                           m)));
    }
    Ok([[minor00 / determinant,
         (m[0][2] * m[2][1] - m[2][2] * m[0][1]) / determinant,
         (m[0][1] * m[1][2] - m[1][1] * m[0][2]) / determinant],
        [-minor01 / determinant,
         (m[0][0] * m[2][2] - m[2][0] * m[0][2]) / determinant,
         (m[0][2] * m[1][0] - m[1][2] * m[0][0]) / determinant],
        [minor02 / determinant,
         (m[0][1] * m[2][0] - m[2][1] * m[0][0]) / determinant,
         (m[0][0] * m[1][1] - m[1][0] * m[0][1]) / determinant]])
}

/// |a - b| <= atol + rtol * |b|
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}

/// element-wise [is_close] of two vectors
pub fn all_close(a: [f64; 3], b: [f64; 3], rtol: f64, atol: f64) -> bool {
    a.iter().zip(b.iter()).all(|(a, b)| is_close(*a, *b, rtol, atol))
}

/// element-wise [is_close] of two matrices
pub fn matrix_close(a: [[f64; 3]; 3],
                    b: [[f64; 3]; 3],
                    rtol: f64,
                    atol: f64)
                    -> bool {
    a.iter().zip(b.iter()).all(|(a, b)| all_close(*a, *b, rtol, atol))
}

/// round a float to a number of decimal places
pub fn round_decimals(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utils_dot() {
        assert_eq!(dot([1., 2., 3.],
                       [[1., 0., 0.], [0., 2., 0.], [0., 0., 3.]]),
                   [1., 4., 9.])
    }

    #[test]
    fn utils_matvec() {
        let m = [[0., 1., 0.], [0., 0., 1.], [1., 0., 0.]];
        assert_eq!(matvec(m, [1., 2., 3.]), [2., 3., 1.]);
        assert_eq!(dot([1., 2., 3.], m), [3., 1., 2.])
    }

    #[test]
    fn utils_vdot() {
        assert_eq!(vdot([1., 2., 3.], [1., 2., 3.]), 14.)
    }

    #[test]
    fn utils_norm() {
        assert_eq!(norm([3., 4., 12.]), 13.)
    }

    #[test]
    fn utils_cross() {
        assert_eq!(cross([1., 0., 0.], [0., 1., 0.]), [0., 0., 1.])
    }

    #[test]
    fn utils_determinant() {
        let m = [[2., 0., 0.], [1., 3., 0.], [4., 5., 6.]];
        assert_eq!(determinant(m), 36.)
    }

    #[test]
    fn utils_invert_matrix() {
        let m = [[2., 0., 0.], [1., 3., 0.], [4., 5., 6.]];
        let inv = invert_matrix(&m).unwrap();
        let identity = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        assert!(matrix_close(matmul(m, inv), identity, 0., 1e-12))
    }

    #[test]
    fn utils_invert_matrix_singular() {
        let m = [[1., 0., 0.], [1., 0., 0.], [0., 0., 2.]];
        assert!(matches!(invert_matrix(&m),
                         Err(SymmetryError::LinearDependence(_))))
    }

    #[test]
    fn utils_transpose() {
        let m = [[1., 2., 3.], [4., 5., 6.], [7., 8., 9.]];
        assert_eq!(transpose(m), [[1., 4., 7.], [2., 5., 8.], [3., 6., 9.]])
    }

    #[test]
    fn utils_is_close() {
        assert!(is_close(1.0, 1.0 + 1e-7, 1e-5, 1e-8));
        assert!(!is_close(1.0, 1.1, 1e-5, 1e-8));
        assert!(!is_close(1e-7, 0., 1e-5, 1e-8))
    }

    #[test]
    fn utils_round_decimals() {
        assert_eq!(round_decimals(0.123456, 4), 0.1235)
    }
}
