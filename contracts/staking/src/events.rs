#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_source: Address,
    pub fee_sink: Address,
    pub rate: u32,
    pub fee_percent: u32,
    pub timestamp: u64,
}

/// Fired when a depositor opens a new position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeOpenedEvent {
    pub staker: Address,
    pub principal: i128,
    pub rate: u32,
    pub index: u32,
    pub new_total_principal: i128,
    pub timestamp: u64,
}

/// Fired when a position is closed and its principal paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub staker: Address,
    pub index: u32,
    pub gross: i128,
    pub fee: i128,
    pub net: i128,
    pub timestamp: u64,
}

/// Fired when accrued rewards are claimed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub gross: i128,
    pub fee: i128,
    pub net: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the prospective rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateSetEvent {
    pub new_rate: u32,
    pub timestamp: u64,
}

/// Fired when the admin rewires the reward source.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSourceSetEvent {
    pub reward_source: Address,
    pub timestamp: u64,
}

/// Fired when the admin rewires the fee sink.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSinkSetEvent {
    pub fee_sink: Address,
    pub timestamp: u64,
}

/// Fired when the admin sweeps principal-token custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencySweepEvent {
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_source: Address,
    fee_sink: Address,
    rate: u32,
    fee_percent: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_source,
            fee_sink,
            rate,
            fee_percent,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_opened(
    env: &Env,
    staker: Address,
    principal: i128,
    rate: u32,
    index: u32,
    new_total_principal: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakeOpenedEvent {
            staker,
            principal,
            rate,
            index,
            new_total_principal,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_withdrawn(
    env: &Env,
    staker: Address,
    index: u32,
    gross: i128,
    fee: i128,
    net: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        StakeWithdrawnEvent {
            staker,
            index,
            gross,
            fee,
            net,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, gross: i128, fee: i128, net: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            gross,
            fee,
            net,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate_set(env: &Env, new_rate: u32) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_source_set(env: &Env, reward_source: Address) {
    env.events().publish(
        (symbol_short!("SRC_SET"),),
        RewardSourceSetEvent {
            reward_source,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_sink_set(env: &Env, fee_sink: Address) {
    env.events().publish(
        (symbol_short!("SINK_SET"),),
        FeeSinkSetEvent {
            fee_sink,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_sweep(env: &Env, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEPT"),),
        EmergencySweepEvent {
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
