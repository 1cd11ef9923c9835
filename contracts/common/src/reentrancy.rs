//! Contract-wide single-flight execution lock.
//!
//! External collaborators invoked mid-operation (token transfers, vault
//! payouts) are untrusted and could call back into the contract while an
//! entry point is still running. Guarded entry points take this lock on
//! entry and release it on exit; a nested invocation observes the engaged
//! flag and is rejected before it can touch any state.
//!
//! The lock is scoped to the whole contract instance, never to a single
//! account: no sub-resource is ever locked independently.

use soroban_sdk::{symbol_short, Env, Symbol};

// ── Storage key ──────────────────────────────────────────────────────────────

const LOCK: Symbol = symbol_short!("RE_LOCK");

// ── Core functions ───────────────────────────────────────────────────────────

/// Attempts to take the execution lock.
///
/// Returns `false` when the lock is already engaged, i.e. the current call
/// arrived re-entrantly from inside another guarded entry point. Callers map
/// that to their reentrancy error and abort without side effects.
pub fn acquire(env: &Env) -> bool {
    if env.storage().instance().get(&LOCK).unwrap_or(false) {
        return false;
    }
    env.storage().instance().set(&LOCK, &true);
    true
}

/// Releases the execution lock.
///
/// Guarded entry points call this on the way out. A failed invocation is
/// rolled back by the host, flag included, so an error path cannot leave the
/// lock engaged.
pub fn release(env: &Env) {
    env.storage().instance().set(&LOCK, &false);
}

/// Returns whether the lock is currently engaged.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCK).unwrap_or(false)
}

// ── Tests ────────────────────────────────────────────────────────────────────
