use crate::errors::{Result, SymmetryError};
use crate::tolerance::Tolerance;
use crate::utils;

/// An integer 3x3 matrix.
pub type IMatrix3 = [[i64; 3]; 3];

const IDENTITY: IMatrix3 = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// integer matrix product A.B
pub fn imatmul(a: IMatrix3, b: IMatrix3) -> IMatrix3 {
    let mut out = [[0i64; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, x) in row.iter_mut().enumerate() {
            *x = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// integer matrix-vector product M.v
pub fn imatvec(m: IMatrix3, v: [i64; 3]) -> [i64; 3] {
    let mut out = [0i64; 3];
    for (i, x) in out.iter_mut().enumerate() {
        *x = m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2];
    }
    out
}

/// determinant of an integer matrix
pub fn idet(m: IMatrix3) -> i64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
    - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
    + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn itranspose(m: IMatrix3) -> IMatrix3 {
    let mut out = [[0i64; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, x) in row.iter().enumerate() {
            out[j][i] = *x;
        }
    }
    out
}

/// Finds the positions of the smallest non-zero and largest magnitude entries.
///
/// Ties for the smallest resolve to the first index and ties for the largest
/// resolve to the last, so the two never coincide while at least two entries
/// are non-zero.
pub fn minmax_indices(a: [i64; 3]) -> (usize, usize) {
    let magnitude = [a[0].abs(), a[1].abs(), a[2].abs()];
    let mut max_index = 0;
    let mut min_index: Option<usize> = None;
    for (i, m) in magnitude.iter().enumerate() {
        if *m >= magnitude[max_index] {
            max_index = i;
        }
        if *m != 0 && min_index.map_or(true, |j| *m < magnitude[j]) {
            min_index = Some(i);
        }
    }
    (min_index.unwrap_or(0), max_index)
}

/// column[target] -= multiple * column[source]
fn column_subtract(m: &mut IMatrix3,
                   target: usize,
                   source: usize,
                   multiple: i64) {
    for row in m.iter_mut() {
        row[target] -= multiple * row[source];
    }
}

fn swap_columns(m: &mut IMatrix3, i: usize, j: usize) {
    for row in m.iter_mut() {
        row.swap(i, j);
    }
}

fn negate_column(m: &mut IMatrix3, j: usize) {
    for row in m.iter_mut() {
        row[j] = -row[j];
    }
}

/// row[target] -= multiple * row[source]
fn row_subtract(m: &mut IMatrix3, target: usize, source: usize, multiple: i64) {
    let source = m[source];
    for (x, s) in m[target].iter_mut().zip(source.iter()) {
        *x -= multiple * s;
    }
}

fn negate_row(m: &mut IMatrix3, i: usize) {
    for x in m[i].iter_mut() {
        *x = -*x;
    }
}

fn verify_transform(s: &IMatrix3, b: &IMatrix3, h: &IMatrix3) -> Result<()> {
    if imatmul(*s, *b) == *h {
        Ok(())
    } else {
        Err(SymmetryError::Consistency(format!("S.B != H for S = {:?}, B = {:?}, H = {:?}",
                                               s, b, h)))
    }
}

/// Computes the lower triangular Hermite normal form, H, of S and the
/// unimodular B such that S.B = H.
///
/// The off-diagonal entries of H satisfy 0 <= H[i][j] < H[i][i] for j < i.
pub fn hermite_normal_form(s: IMatrix3) -> Result<(IMatrix3, IMatrix3)> {
    if idet(s) == 0 {
        return Err(SymmetryError::SingularMatrix);
    }
    let mut h = s;
    let mut b = IDENTITY;
    // euclid along the first row until a single entry survives
    while h[0].iter().filter(|x| **x != 0).count() > 1 {
        let (min_index, max_index) = minmax_indices(h[0]);
        let multiple = h[0][max_index] / h[0][min_index];
        column_subtract(&mut h, max_index, min_index, multiple);
        column_subtract(&mut b, max_index, min_index, multiple);
        verify_transform(&s, &b, &h)?;
    }
    if h[0][0] == 0 {
        let (_, max_index) = minmax_indices(h[0]);
        swap_columns(&mut h, 0, max_index);
        swap_columns(&mut b, 0, max_index);
    }
    if h[0][0] < 0 {
        negate_column(&mut h, 0);
        negate_column(&mut b, 0);
    }
    verify_transform(&s, &b, &h)?;
    // the same for the remaining 2x2 block of the second row
    while h[1][2] != 0 {
        if h[1][1] == 0 {
            swap_columns(&mut h, 1, 2);
            swap_columns(&mut b, 1, 2);
            if h[1][2] == 0 {
                break;
            }
        }
        let (max_index, min_index) = if h[1][2].abs() < h[1][1].abs() {
            (1, 2)
        } else {
            (2, 1)
        };
        let multiple = h[1][max_index] / h[1][min_index];
        column_subtract(&mut h, max_index, min_index, multiple);
        column_subtract(&mut b, max_index, min_index, multiple);
        verify_transform(&s, &b, &h)?;
    }
    if h[1][1] == 0 {
        swap_columns(&mut h, 1, 2);
        swap_columns(&mut b, 1, 2);
    }
    if h[1][1] < 0 {
        negate_column(&mut h, 1);
        negate_column(&mut b, 1);
    }
    if h[2][2] < 0 {
        negate_column(&mut h, 2);
        negate_column(&mut b, 2);
    }
    verify_transform(&s, &b, &h)?;
    if h[0][1] != 0 || h[0][2] != 0 || h[1][2] != 0 {
        return Err(SymmetryError::Consistency(format!("{:?} is not lower triangular",
                                                      h)));
    }
    // bring the off-diagonal entries into [0, diagonal)
    let multiple = h[1][0].div_euclid(h[1][1]);
    column_subtract(&mut h, 0, 1, multiple);
    column_subtract(&mut b, 0, 1, multiple);
    for j in 0..2 {
        let multiple = h[2][j].div_euclid(h[2][2]);
        column_subtract(&mut h, j, 2, multiple);
        column_subtract(&mut b, j, 2, multiple);
    }
    verify_transform(&s, &b, &h)?;
    for i in 0..3 {
        if h[i][i] <= 0 || (0..i).any(|j| h[i][j] < 0 || h[i][j] >= h[i][i])
        {
            return Err(SymmetryError::Consistency(format!("{:?} is not in Hermite normal form",
                                                          h)));
        }
    }
    Ok((h, b))
}

/// Computes the upper triangular Hermite normal form, H, of S and the
/// unimodular B such that B.S = H.
///
/// This is the row operation analogue of [hermite_normal_form] and each
/// off-diagonal entry is smaller than the diagonal entry of its column.
pub fn upper_hermite_normal_form(s: IMatrix3)
                                 -> Result<(IMatrix3, IMatrix3)> {
    let (h, b) = hermite_normal_form(itranspose(s))?;
    let (h, b) = (itranspose(h), itranspose(b));
    if imatmul(b, s) != h {
        return Err(SymmetryError::Consistency(format!("B.S != H for S = {:?}, B = {:?}, H = {:?}",
                                                      s, b, h)));
    }
    Ok((h, b))
}

/// Finds the smallest non-zero entry in the block below and right of (k, k).
fn smallest_entry(m: &IMatrix3, k: usize) -> Option<(usize, usize)> {
    let mut out: Option<(usize, usize)> = None;
    for i in k..3 {
        for j in k..3 {
            if m[i][j] != 0
               && out.map_or(true, |(a, b)| m[i][j].abs() < m[a][b].abs())
            {
                out = Some((i, j));
            }
        }
    }
    out
}

/// Computes the Smith normal form of H, returning (D, L, R) with D = L.H.R.
///
/// D is diagonal with positive entries forming a divisor chain and L, R are
/// unimodular.
pub fn smith_normal_form(h: IMatrix3)
                         -> Result<(IMatrix3, IMatrix3, IMatrix3)> {
    if idet(h) == 0 {
        return Err(SymmetryError::SingularMatrix);
    }
    let mut d = h;
    let mut left = IDENTITY;
    let mut right = IDENTITY;
    for k in 0..3 {
        loop {
            let (pi, pj) = smallest_entry(&d, k).ok_or_else(|| {
                SymmetryError::Consistency(format!("{:?} lost rank during Smith normal form",
                                                   d))
            })?;
            d.swap(k, pi);
            left.swap(k, pi);
            swap_columns(&mut d, k, pj);
            swap_columns(&mut right, k, pj);
            let pivot = d[k][k];
            let mut clean = true;
            for i in (k + 1)..3 {
                let multiple = d[i][k] / pivot;
                row_subtract(&mut d, i, k, multiple);
                row_subtract(&mut left, i, k, multiple);
                clean &= d[i][k] == 0;
            }
            for j in (k + 1)..3 {
                let multiple = d[k][j] / pivot;
                column_subtract(&mut d, j, k, multiple);
                column_subtract(&mut right, j, k, multiple);
                clean &= d[k][j] == 0;
            }
            if !clean {
                continue;
            }
            // every trailing entry must be divisible by the pivot
            let offender = ((k + 1)..3).find(|i| {
                                           ((k + 1)..3).any(|j| {
                                                           d[*i][j] % pivot
                                                           != 0
                                                       })
                                       });
            match offender {
                Some(i) => {
                    row_subtract(&mut d, k, i, -1);
                    row_subtract(&mut left, k, i, -1);
                }
                None => break,
            }
        }
        if d[k][k] < 0 {
            negate_row(&mut d, k);
            negate_row(&mut left, k);
        }
    }
    let diagonal = [d[0][0], d[1][1], d[2][2]];
    let is_diagonal =
        (0..3).all(|i| (0..3).all(|j| i == j || d[i][j] == 0));
    if !is_diagonal
       || diagonal.iter().any(|x| *x <= 0)
       || diagonal[1] % diagonal[0] != 0
       || diagonal[2] % diagonal[1] != 0
    {
        return Err(SymmetryError::Consistency(format!("{:?} is not in Smith normal form",
                                                      d)));
    }
    if imatmul(imatmul(left, h), right) != d
       || idet(left).abs() != 1
       || idet(right).abs() != 1
    {
        return Err(SymmetryError::Consistency(format!("L.H.R != D for H = {:?}",
                                                      h)));
    }
    Ok((d, left, right))
}

/// Finds the integer matrix N relating a sublattice to a lattice.
///
/// Both bases hold their vectors as rows and N is returned in column
/// convention: sublattice vector j is the sum over i of N[i][j] times lattice
/// vector i.
pub fn check_commensurate(lattice: &[[f64; 3]; 3],
                          sublattice: &[[f64; 3]; 3],
                          tolerance: &Tolerance)
                          -> Result<IMatrix3> {
    let inverse = utils::invert_matrix(&utils::transpose(*lattice))?;
    let n = utils::matmul(inverse, utils::transpose(*sublattice));
    let mut out = [[0i64; 3]; 3];
    for (i, row) in n.iter().enumerate() {
        for (j, x) in row.iter().enumerate() {
            if !tolerance.close(*x, x.round()) {
                return Err(SymmetryError::Incommensurate(format!("{:?} is not an integer combination of {:?}",
                                                                 sublattice,
                                                                 lattice)));
            }
            out[i][j] = x.round() as i64;
        }
    }
    Ok(out)
}
