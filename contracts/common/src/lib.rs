//! Shared utilities for the staking ledger contract suite.
//!
//! This crate provides:
//! - [`reentrancy`]: the contract-wide single-flight execution lock the
//!   ledger takes around every state-mutating entry point.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod reentrancy;
