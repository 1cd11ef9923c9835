//! Payout fee policy: a whole-percent cut of every gross amount paid out.
//!
//! The original deployments existed as fee-charging and fee-free variants of
//! the same ledger; here the percentage is a single configuration value
//! (0 disables the fee entirely) fixed at initialization.

/// Largest configurable fee; anything above this is rejected at initialize.
pub const MAX_FEE_PERCENT: u32 = 100;

/// Splits `gross` into `(fee, net)`.
///
/// ```text
/// fee = ⌊gross × fee_percent / 100⌋
/// net = gross − fee
/// ```
///
/// Conservation holds by construction: `fee + net == gross`, and with
/// `fee_percent <= 100` and non-negative `gross`, both parts are
/// non-negative. Returns `None` on intermediate overflow.
pub fn split(gross: i128, fee_percent: u32) -> Option<(i128, i128)> {
    let fee = gross
        .checked_mul(fee_percent as i128)?
        .checked_div(100)?;
    let net = gross.checked_sub(fee)?;
    Some((fee, net))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
