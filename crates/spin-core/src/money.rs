//! Monetary rounding

/// Round a monetary amount to whole cents (two decimals, ties to even).
///
/// Every balance, stake, and win amount passes through this before it is
/// stored or reported.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
