/// Numerical tolerances used by every floating point comparison in the crate.
///
/// Closeness follows `|a - b| <= atol + rtol * |b|`. The correct values depend
/// on the scale of the lattice and the grid so none of them are fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
    /// Finite precision used for sphere inclusion and norm comparisons.
    pub eps: f64,
    /// Decimal places kept when rounding grid coordinates before hashing.
    pub decimals: i32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { rtol: 1e-4,
               atol: 1e-6,
               eps: 1e-9,
               decimals: 4 }
    }
}

impl Tolerance {
    /// Creates a new set of tolerances.
    pub fn new(rtol: f64, atol: f64, eps: f64, decimals: i32) -> Self {
        Self { rtol,
               atol,
               eps,
               decimals }
    }

    /// Shorthand for [is_close](crate::utils::is_close) with these tolerances.
    pub fn close(&self, a: f64, b: f64) -> bool {
        crate::utils::is_close(a, b, self.rtol, self.atol)
    }

    /// Shorthand for [all_close](crate::utils::all_close) with these tolerances.
    pub fn all_close(&self, a: [f64; 3], b: [f64; 3]) -> bool {
        crate::utils::all_close(a, b, self.rtol, self.atol)
    }
}
