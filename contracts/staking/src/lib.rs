#![no_std]

//! Multi-position staking ledger with time-weighted reward accrual.
//!
//! Each deposit opens its own position carrying a snapshot of the global
//! rate; rewards accrue linearly per position and are folded lazily into a
//! per-account reward debt by a flush that runs at the top of every
//! state-mutating entry point. Principal custody lives in this contract;
//! reward custody lives in a separate vault contract, and an optional
//! whole-percent fee on every payout is forwarded to a treasury sink.
//!
//! Positions are removed by swap-and-remove, so position indices are not
//! stable across a withdrawal: after removing index `i`, the position that
//! was last in the list is addressable at `i`. Callers must re-fetch
//! positions after any withdrawal.

pub mod accrual;
pub mod events;
pub mod fees;
pub mod positions;

use common::reentrancy;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};
use treasury::TreasuryContractClient;
use vault::RewardVaultContractClient;

pub use positions::StakePosition;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_SOURCE: Symbol = symbol_short!("RWD_SRC");
const FEE_SINK: Symbol = symbol_short!("FEE_SINK");
const RATE: Symbol = symbol_short!("CUR_RATE");
const FEE_PERCENT: Symbol = symbol_short!("FEE_PCT");
const TOTAL_PAID: Symbol = symbol_short!("TOT_PAID");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    ReentrancyBlocked = 4,
    ZeroAmount = 5,
    InvalidIndex = 6,
    NoReward = 7,
    InsufficientVaultSource = 8,
    ArithmeticOverflow = 9,
    TransferFailed = 10,
    InvalidFeePercent = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `stake_token`   – SAC address of the token depositors stake.
    /// * `reward_source` – vault contract holding the reward-token balance.
    /// * `fee_sink`      – treasury contract receiving the fee cut.
    /// * `rate`          – percent per year snapshotted into new positions.
    /// * `fee_percent`   – whole-percent payout fee; 0 disables fees.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_source: Address,
        fee_sink: Address,
        rate: u32,
        fee_percent: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if fee_percent > fees::MAX_FEE_PERCENT {
            return Err(ContractError::InvalidFeePercent);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_SOURCE, &reward_source);
        env.storage().instance().set(&FEE_SINK, &fee_sink);
        env.storage().instance().set(&RATE, &rate);
        env.storage().instance().set(&FEE_PERCENT, &fee_percent);
        // TOTAL_PAID and the participants list start absent; readers default
        // to zero/empty, so no explicit init needed.

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_source,
            fee_sink,
            rate,
            fee_percent,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Open a new position of `amount` stake tokens.
    ///
    /// Pending rewards on the account's existing positions are flushed into
    /// reward debt before the position list changes. Returns the new
    /// position's index, which is the last slot in the list.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        let result = Self::stake_locked(&env, &staker, amount);
        reentrancy::release(&env);
        result
    }

    /// Close the position at `index` and pay out its principal net of fee.
    ///
    /// The slot is removed by swap-and-remove: the last position moves into
    /// `index`, so any index held across this call now addresses a different
    /// position. Re-fetch positions before withdrawing again.
    pub fn withdraw_stake(env: Env, staker: Address, index: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        let result = Self::withdraw_locked(&env, &staker, index);
        reentrancy::release(&env);
        result
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the account's full reward debt, net of fee.
    ///
    /// The debt is cleared in full even when a fee is charged; the fee cut
    /// goes to the fee sink, not back into debt. Returns the net amount.
    pub fn claim_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        let result = Self::claim_locked(&env, &staker);
        reentrancy::release(&env);
        result
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// All open positions for `account`, in storage order.
    pub fn get_positions(env: Env, account: Address) -> Vec<StakePosition> {
        positions::load(&env, &account)
    }

    /// A single position by index.
    pub fn get_position(
        env: Env,
        account: Address,
        index: u32,
    ) -> Result<StakePosition, ContractError> {
        positions::load(&env, &account)
            .get(index)
            .ok_or(ContractError::InvalidIndex)
    }

    /// Sum of the account's live position principals.
    pub fn get_total_principal(env: Env, account: Address) -> i128 {
        positions::total_principal(&env, &account)
    }

    /// Reward already flushed into debt but not yet claimed.
    pub fn get_reward_debt(env: Env, account: Address) -> i128 {
        positions::reward_debt(&env, &account)
    }

    /// Real-time preview: reward debt plus live accrual, without flushing.
    pub fn get_pending_reward(env: Env, account: Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let mut pending = positions::reward_debt(&env, &account);
        for position in positions::load(&env, &account).iter() {
            let reward =
                accrual::position_reward(&position, now).ok_or(ContractError::ArithmeticOverflow)?;
            pending = pending
                .checked_add(reward)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(pending)
    }

    /// Every account that has ever staked. Never pruned.
    pub fn get_participants(env: Env) -> Vec<Address> {
        positions::participants(&env)
    }

    /// Net rewards paid out across all claims.
    pub fn get_total_rewards_paid(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_PAID).unwrap_or(0)
    }

    /// The rate (percent per year) new positions will lock in.
    pub fn get_rate(env: Env) -> u32 {
        env.storage().instance().get(&RATE).unwrap_or(0)
    }

    pub fn get_fee_percent(env: Env) -> u32 {
        env.storage().instance().get(&FEE_PERCENT).unwrap_or(0)
    }

    pub fn get_reward_source(env: Env) -> Result<Address, ContractError> {
        Self::reward_source(&env)
    }

    pub fn get_fee_sink(env: Env) -> Result<Address, ContractError> {
        Self::fee_sink(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ─────────────────────────────────────────────────────

    /// Change the rate locked into positions opened from now on.
    /// Existing positions keep the rate they were opened with.
    pub fn set_rate(env: Env, caller: Address, new_rate: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        env.storage().instance().set(&RATE, &new_rate);
        events::publish_rate_set(&env, new_rate);
        reentrancy::release(&env);
        Ok(())
    }

    /// Point the ledger at a new reward vault.
    pub fn set_reward_source(
        env: Env,
        caller: Address,
        reward_source: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        env.storage().instance().set(&REWARD_SOURCE, &reward_source);
        events::publish_reward_source_set(&env, reward_source);
        reentrancy::release(&env);
        Ok(())
    }

    /// Point the ledger at a new fee sink.
    pub fn set_fee_sink(env: Env, caller: Address, fee_sink: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        env.storage().instance().set(&FEE_SINK, &fee_sink);
        events::publish_fee_sink_set(&env, fee_sink);
        reentrancy::release(&env);
        Ok(())
    }

    /// Move `amount` of the stake-token custody to the admin, bypassing all
    /// accounting. Recorded principals can exceed actual custody afterwards;
    /// this is the operational escape hatch, not a payout path.
    pub fn emergency_sweep(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !reentrancy::acquire(&env) {
            return Err(ContractError::ReentrancyBlocked);
        }
        let result = Self::sweep_locked(&env, &caller, amount);
        reentrancy::release(&env);
        result
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_source(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_SOURCE)
            .ok_or(ContractError::NotInitialized)
    }

    fn fee_sink(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&FEE_SINK)
            .ok_or(ContractError::NotInitialized)
    }

    /// Fold every position's accrued reward into the account's reward debt.
    ///
    /// Runs as the first step of each mutating entry point, before the
    /// position set changes, so no reward-time is dropped or double-counted
    /// across a stake/withdraw boundary. A position's clock advances only
    /// when its floored reward is nonzero; sub-unit accrual stays on the
    /// clock for a later flush instead of being discarded.
    fn flush_rewards(env: &Env, account: &Address) -> Result<(), ContractError> {
        let list = positions::load(env, account);
        if list.is_empty() {
            return Ok(());
        }

        let now = env.ledger().timestamp();
        let mut accrued: i128 = 0;
        let mut flushed = Vec::new(env);
        for position in list.iter() {
            let reward =
                accrual::position_reward(&position, now).ok_or(ContractError::ArithmeticOverflow)?;
            accrued = accrued
                .checked_add(reward)
                .ok_or(ContractError::ArithmeticOverflow)?;
            let since = if reward > 0 { now } else { position.since };
            flushed.push_back(StakePosition { since, ..position });
        }

        if accrued > 0 {
            let debt = positions::reward_debt(env, account)
                .checked_add(accrued)
                .ok_or(ContractError::ArithmeticOverflow)?;
            positions::set_reward_debt(env, account, debt);
            positions::save(env, account, &flushed);
        }

        Ok(())
    }

    fn stake_locked(env: &Env, staker: &Address, amount: i128) -> Result<u32, ContractError> {
        Self::flush_rewards(env, staker)?;

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let rate: u32 = env.storage().instance().get(&RATE).unwrap_or(0);
        let now = env.ledger().timestamp();

        let mut list = positions::load(env, staker);
        list.push_back(StakePosition {
            principal: amount,
            since: now,
            rate,
        });
        let index = list.len() - 1;
        positions::save(env, staker, &list);

        let prev_total = positions::total_principal(env, staker);
        let new_total = prev_total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        positions::set_total_principal(env, staker, new_total);
        if prev_total == 0 {
            positions::register_participant(env, staker);
        }

        // All internal state is final; pull the principal last.
        let token = token::Client::new(env, &Self::stake_token(env)?);
        if token
            .try_transfer(staker, &env.current_contract_address(), &amount)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }

        events::publish_stake_opened(env, staker.clone(), amount, rate, index, new_total);

        Ok(index)
    }

    fn claim_locked(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        Self::flush_rewards(env, staker)?;

        let gross = positions::reward_debt(env, staker);
        if gross <= 0 {
            return Err(ContractError::NoReward);
        }

        let reward_source = Self::reward_source(env)?;
        let reward_vault = RewardVaultContractClient::new(env, &reward_source);
        if reward_vault.available_rewards() < gross {
            return Err(ContractError::InsufficientVaultSource);
        }

        let fee_percent: u32 = env.storage().instance().get(&FEE_PERCENT).unwrap_or(0);
        let (fee, net) = fees::split(gross, fee_percent).ok_or(ContractError::ArithmeticOverflow)?;

        // Effects before interactions: the debt is cleared and the payout
        // total recorded before any collaborator can observe ledger state.
        positions::set_reward_debt(env, staker, 0);
        let paid: i128 = env.storage().instance().get(&TOTAL_PAID).unwrap_or(0);
        let paid = paid
            .checked_add(net)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_PAID, &paid);

        if net > 0 && reward_vault.try_transfer_reward(staker, &net).is_err() {
            return Err(ContractError::TransferFailed);
        }
        if fee > 0 {
            let fee_sink = Self::fee_sink(env)?;
            if reward_vault.try_transfer_reward(&fee_sink, &fee).is_err() {
                return Err(ContractError::TransferFailed);
            }
            let sink = TreasuryContractClient::new(env, &fee_sink);
            if sink
                .try_deposit(&env.current_contract_address(), &fee)
                .is_err()
            {
                return Err(ContractError::TransferFailed);
            }
        }

        events::publish_reward_claimed(env, staker.clone(), gross, fee, net);

        Ok(net)
    }

    fn withdraw_locked(env: &Env, staker: &Address, index: u32) -> Result<i128, ContractError> {
        Self::flush_rewards(env, staker)?;

        let mut list = positions::load(env, staker);
        let position = list.get(index).ok_or(ContractError::InvalidIndex)?;
        if position.principal <= 0 {
            // Unreachable while live positions stay strictly positive;
            // guards a corrupted slot.
            return Err(ContractError::ZeroAmount);
        }

        // Swap-and-remove: the last element moves into the freed slot.
        let last = list.len() - 1;
        if index != last {
            if let Some(moved) = list.get(last) {
                list.set(index, moved);
            }
        }
        let _ = list.pop_back();
        positions::save(env, staker, &list);

        let gross = position.principal;
        let new_total = positions::total_principal(env, staker)
            .checked_sub(gross)
            .ok_or(ContractError::ArithmeticOverflow)?;
        positions::set_total_principal(env, staker, new_total);

        let fee_percent: u32 = env.storage().instance().get(&FEE_PERCENT).unwrap_or(0);
        let (fee, net) = fees::split(gross, fee_percent).ok_or(ContractError::ArithmeticOverflow)?;

        let token = token::Client::new(env, &Self::stake_token(env)?);
        let this = env.current_contract_address();
        if net > 0 && token.try_transfer(&this, staker, &net).is_err() {
            return Err(ContractError::TransferFailed);
        }
        if fee > 0 {
            let fee_sink = Self::fee_sink(env)?;
            if token.try_transfer(&this, &fee_sink, &fee).is_err() {
                return Err(ContractError::TransferFailed);
            }
            let sink = TreasuryContractClient::new(env, &fee_sink);
            if sink.try_deposit(&this, &fee).is_err() {
                return Err(ContractError::TransferFailed);
            }
        }

        events::publish_stake_withdrawn(env, staker.clone(), index, gross, fee, net);

        Ok(net)
    }

    fn sweep_locked(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let token = token::Client::new(env, &Self::stake_token(env)?);
        if token
            .try_transfer(&env.current_contract_address(), to, &amount)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }

        events::publish_emergency_sweep(env, to.clone(), amount);

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
