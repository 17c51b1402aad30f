//! Float comparison helpers for compartment bookkeeping.

/// Absolute and relative tolerance pair; either one passing is enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    /// Used for S + E + I + R == N checks.
    pub const CONSERVATION: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// True for finite values without a fractional part.
pub fn is_whole(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}
