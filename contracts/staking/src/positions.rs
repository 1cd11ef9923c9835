//! Per-account position storage and the participants registry.
//!
//! Each account owns an ordered list of [`StakePosition`]s. Removal is
//! swap-and-remove: the closed slot is overwritten with the last element and
//! the list shrinks by one, so the element that was last moves into the
//! freed index. Positional indices are therefore NOT stable across a
//! removal; callers must re-fetch positions after any withdrawal.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POSITIONS: Symbol = symbol_short!("POS");
const TOTAL_PRINCIPAL: Symbol = symbol_short!("TOT_PRIN");
const REWARD_DEBT: Symbol = symbol_short!("RWD_DEBT");
const PARTICIPANTS: Symbol = symbol_short!("PARTS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// One stake deposit with its own locked-in rate and accrual clock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    /// Staked amount; strictly positive for a live position.
    pub principal: i128,
    /// Accrual clock: the open timestamp, advanced whenever the position's
    /// accrued reward is folded into the account's reward debt.
    pub since: u64,
    /// Percent-per-year rate snapshotted at open. Later global rate changes
    /// never touch it.
    pub rate: u32,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn positions_key(account: &Address) -> (Symbol, Address) {
    (POSITIONS, account.clone())
}

fn total_principal_key(account: &Address) -> (Symbol, Address) {
    (TOTAL_PRINCIPAL, account.clone())
}

fn reward_debt_key(account: &Address) -> (Symbol, Address) {
    (REWARD_DEBT, account.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Loads an account's position list; an account with no history has an
/// empty list.
pub fn load(env: &Env, account: &Address) -> Vec<StakePosition> {
    let key = positions_key(account);
    match env.storage().persistent().get(&key) {
        Some(positions) => {
            extend_ttl(env, &key);
            positions
        }
        None => Vec::new(env),
    }
}

pub fn save(env: &Env, account: &Address, positions: &Vec<StakePosition>) {
    let key = positions_key(account);
    env.storage().persistent().set(&key, positions);
    extend_ttl(env, &key);
}

pub fn total_principal(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&total_principal_key(account))
        .unwrap_or(0)
}

pub fn set_total_principal(env: &Env, account: &Address, total: i128) {
    let key = total_principal_key(account);
    env.storage().persistent().set(&key, &total);
    extend_ttl(env, &key);
}

pub fn reward_debt(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&reward_debt_key(account))
        .unwrap_or(0)
}

pub fn set_reward_debt(env: &Env, account: &Address, debt: i128) {
    let key = reward_debt_key(account);
    env.storage().persistent().set(&key, &debt);
    extend_ttl(env, &key);
}

// ── Participants registry ────────────────────────────────────────────────────

/// Every account that has ever held a nonzero total principal.
/// Membership is a historical fact: the registry only grows.
pub fn participants(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&PARTICIPANTS)
        .unwrap_or_else(|| Vec::new(env))
}

/// Records `account` in the registry if it is not already present.
pub fn register_participant(env: &Env, account: &Address) {
    let mut registry = participants(env);
    if registry.iter().any(|p| p == *account) {
        return;
    }
    registry.push_back(account.clone());
    env.storage().instance().set(&PARTICIPANTS, &registry);
}
