#![no_std]

//! Fee sink: receives the fee portion of staking claims and withdrawals.
//!
//! Fee tokens are transferred to this contract first (by the ledger for
//! withdrawal fees, by the reward vault for claim fees) and the paying
//! contract then calls [`TreasuryContract::deposit`] to book the receipt.
//! The treasury keeps a total and a per-source tally; the admin can pay
//! accumulated fees out with [`TreasuryContract::withdraw`].


use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage keys ────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const TOTAL_RECEIVED: Symbol = symbol_short!("TOT_RECV");
const RECEIVED: Symbol = symbol_short!("RECEIVED");

// ── Contract errors ─────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    ZeroAmount = 4,
    ArithmeticOverflow = 5,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn received_key(source: &Address) -> (Symbol, Address) {
    (RECEIVED, source.clone())
}

fn load_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct TreasuryContract;

#[contractimpl]
impl TreasuryContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        Ok(())
    }

    /// Book a fee receipt of `amount` from `from`.
    ///
    /// Callers transfer the fee tokens to the treasury before notifying it;
    /// this call only updates the books.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        load_admin(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let total: i128 = env.storage().instance().get(&TOTAL_RECEIVED).unwrap_or(0);
        let total = total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_RECEIVED, &total);

        let key = received_key(&from);
        let seen: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        let seen = seen
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().persistent().set(&key, &seen);

        Ok(())
    }

    /// Pay `amount` of `token` out of treasury custody to `to`.
    /// Only the admin may call.
    pub fn withdraw(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let admin = load_admin(&env)?;
        caller.require_auth();
        if caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Total fees booked across all sources.
    pub fn get_total_received(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_RECEIVED).unwrap_or(0)
    }

    /// Fees booked from a single source contract.
    pub fn get_received_from(env: Env, source: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&received_key(&source))
            .unwrap_or(0)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        load_admin(&env)
    }
}
