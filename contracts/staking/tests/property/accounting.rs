#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the pure accounting math.
//!
//! Invariants tested:
//! - Fee splits conserve the gross amount and match the floor formula
//! - Accrued reward is monotone in elapsed time and in principal
//! - Accrued reward never exceeds the exact rational value
//! - Empty and uninitialized slots never accrue

use proptest::prelude::*;
use staking::accrual::{self, SECONDS_PER_YEAR};
use staking::{fees, StakePosition};

fn position(principal: i128, since: u64, rate: u32) -> StakePosition {
    StakePosition {
        principal,
        since,
        rate,
    }
}

proptest! {
    /// `fee + net == gross` for every gross and every legal percentage.
    #[test]
    fn prop_fee_split_conserves_gross(
        gross in 0i128..=1_000_000_000_000,
        pct in 0u32..=100,
    ) {
        let (fee, net) = fees::split(gross, pct).unwrap();
        prop_assert_eq!(fee + net, gross);
        prop_assert_eq!(fee, gross * i128::from(pct) / 100);
        prop_assert!(fee >= 0);
        prop_assert!(net >= 0);
    }

    /// More elapsed time never means less reward.
    #[test]
    fn prop_reward_monotone_in_time(
        principal in 1i128..=1_000_000_000_000,
        rate in 0u32..=100,
        e1 in 0u64..=20 * SECONDS_PER_YEAR,
        e2 in 0u64..=20 * SECONDS_PER_YEAR,
    ) {
        let (lo, hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
        let pos = position(principal, 1, rate);
        let r_lo = accrual::position_reward(&pos, 1 + lo).unwrap();
        let r_hi = accrual::position_reward(&pos, 1 + hi).unwrap();
        prop_assert!(r_lo <= r_hi);
    }

    /// The floored reward never exceeds the exact rational value, and is
    /// within one unit of it.
    #[test]
    fn prop_reward_matches_floor_formula(
        principal in 1i128..=1_000_000_000,
        rate in 0u32..=100,
        elapsed in 1u64..=20 * SECONDS_PER_YEAR,
    ) {
        let pos = position(principal, 1, rate);
        let reward = accrual::position_reward(&pos, 1 + elapsed).unwrap();

        let numerator = principal * i128::from(rate) * i128::from(elapsed);
        let denominator = i128::from(SECONDS_PER_YEAR) * 100;
        prop_assert_eq!(reward, numerator / denominator);
        prop_assert!(reward * denominator <= numerator);
        prop_assert!(numerator - reward * denominator < denominator);
    }

    /// A larger principal at the same rate and time never earns less.
    #[test]
    fn prop_reward_monotone_in_principal(
        p1 in 1i128..=1_000_000_000,
        p2 in 1i128..=1_000_000_000,
        rate in 0u32..=100,
        elapsed in 1u64..=20 * SECONDS_PER_YEAR,
    ) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let r_lo = accrual::position_reward(&position(lo, 1, rate), 1 + elapsed).unwrap();
        let r_hi = accrual::position_reward(&position(hi, 1, rate), 1 + elapsed).unwrap();
        prop_assert!(r_lo <= r_hi);
    }

    /// Empty and uninitialized slots accrue nothing, whatever the clock says.
    #[test]
    fn prop_degenerate_slots_accrue_nothing(
        since in 0u64..=20 * SECONDS_PER_YEAR,
        now in 0u64..=40 * SECONDS_PER_YEAR,
        rate in 0u32..=100,
    ) {
        let empty = position(0, since.max(1), rate);
        prop_assert_eq!(accrual::position_reward(&empty, now), Some(0));

        let unset = position(1_000_000, 0, rate);
        prop_assert_eq!(accrual::position_reward(&unset, now), Some(0));
    }
}
