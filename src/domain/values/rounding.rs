/// Round to a fixed number of decimal places, ties to the even digit.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round_ties_even() / factor
}

/// Percentage change from `base` to `value`.
pub fn pct_change(base: f64, value: f64) -> f64 {
    (value - base) / base * 100.0
}
