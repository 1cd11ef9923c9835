#![no_std]

//! Reward vault: holds the reward-token balance that staking payouts are
//! drawn from. The vault's custody is disjoint from the ledger's principal
//! custody; only the configured spender (the staking ledger) can move
//! rewards out.


use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Types ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Address that may rewire the vault.
    pub admin: Address,
    /// Reward token held and paid out by the vault.
    pub token: Address,
    /// The only address allowed to move rewards out (the staking ledger).
    pub spender: Address,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    ZeroAmount = 4,
    InsufficientRewards = 5,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<VaultConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardVaultContract;

#[contractimpl]
impl RewardVaultContract {
    /// Bootstrap the vault with its admin, reward token, and spender.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        spender: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(
            &CONFIG,
            &VaultConfig {
                admin,
                token,
                spender,
            },
        );
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, ContractError> {
        load_config(&env)
    }

    /// Pull `amount` reward tokens from `from` into vault custody.
    pub fn fund(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        let cfg = load_config(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        token::Client::new(&env, &cfg.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );
        Ok(())
    }

    /// Reward tokens currently available for payout.
    pub fn available_rewards(env: Env) -> Result<i128, ContractError> {
        let cfg = load_config(&env)?;
        Ok(token::Client::new(&env, &cfg.token).balance(&env.current_contract_address()))
    }

    /// Pay `amount` reward tokens from vault custody to `to`.
    ///
    /// Only the configured spender may trigger a payout; a direct call from
    /// anyone else fails the spender's auth check.
    pub fn transfer_reward(env: Env, to: Address, amount: i128) -> Result<(), ContractError> {
        let cfg = load_config(&env)?;
        cfg.spender.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let client = token::Client::new(&env, &cfg.token);
        if client.balance(&env.current_contract_address()) < amount {
            return Err(ContractError::InsufficientRewards);
        }
        client.transfer(&env.current_contract_address(), &to, &amount);
        Ok(())
    }

    /// Point the vault at a new spender. Only the admin may call.
    pub fn set_spender(env: Env, caller: Address, spender: Address) -> Result<(), ContractError> {
        let mut cfg = load_config(&env)?;
        caller.require_auth();
        if caller != cfg.admin {
            return Err(ContractError::NotAuthorized);
        }

        cfg.spender = spender;
        env.storage().instance().set(&CONFIG, &cfg);
        Ok(())
    }
}
