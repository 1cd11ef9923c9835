//! Pure simple-interest accrual math.
//!
//! Rewards are linear and never compound:
//!
//! ```text
//! reward = principal × rate × elapsed_seconds / (SECONDS_PER_YEAR × 100)
//! ```
//!
//! with integer (floor) division. Each position accrues at the rate
//! snapshotted when it was opened, independent of the current global rate.

use crate::positions::StakePosition;

/// Seconds in a 365-day year; the time base of the accrual denominator.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Rates are whole percent per year, so the denominator carries a ×100.
const PERCENT_SCALE: i128 = 100;

/// Reward accrued by one position from its clock (`since`) up to `now`.
///
/// Returns 0 for an empty or uninitialized slot (`principal <= 0` or
/// `since == 0`) and for a clock that has not advanced. Returns `None` when
/// the intermediate product overflows; callers fail the operation rather
/// than pay a wrapped amount.
pub fn position_reward(position: &StakePosition, now: u64) -> Option<i128> {
    if position.principal <= 0 || position.since == 0 {
        return Some(0);
    }

    let elapsed = now.saturating_sub(position.since);
    if elapsed == 0 {
        return Some(0);
    }

    let numerator = position
        .principal
        .checked_mul(position.rate as i128)?
        .checked_mul(elapsed as i128)?;
    let denominator = (SECONDS_PER_YEAR as i128).checked_mul(PERCENT_SCALE)?;
    numerator.checked_div(denominator)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
