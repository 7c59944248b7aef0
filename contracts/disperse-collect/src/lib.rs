#![no_std]
#![allow(clippy::too_many_arguments)]

//! # Disperse / Collect Contract
//!
//! Moves a fungible asset between one party and many in a single atomic
//! batch, for payroll, airdrops and treasury settlement.
//!
//! ## Operations
//!
//! | Operation             | Direction | Assets         | Authorizes   |
//! |-----------------------|-----------|----------------|--------------|
//! | `disperse_by_amount`  | 1 → N     | native, token  | payer        |
//! | `disperse_by_percent` | 1 → N     | native, token  | payer        |
//! | `collect_forward`     | 1 → 1     | native, token  | payer        |
//! | `collect_from_many`   | N → 1     | token          | contributors |
//!
//! ## Atomicity
//!
//! Every operation validates the whole batch before moving anything, then
//! transfers in list order. If any transfer fails the operation returns a
//! [`BatchError`] and the host rolls back every transfer already made in the
//! invocation. Nothing is ever written to the contract's own storage during a
//! batch.
//!
//! ## Token allowances
//!
//! For `Asset::Token` the engine pulls with `transfer_from`, so every source
//! (the payer, or each contributor) must first `approve` this contract on the
//! token for at least the amount it provides.
//!
//! ## Percentages
//!
//! Percentages are whole numbers that must sum to exactly 100. The split
//! floors every share and gives the remainder to one recipient (the last one
//! by default, see [`RemainderPolicy`]), so the shares always add up to the
//! total.

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub mod asset;
pub mod collect;
pub mod config;
pub mod distribute;
pub mod errors;
pub mod events;
pub mod split;
pub mod validate;

pub use asset::{Asset, Transfer};
pub use config::{EngineConfig, DEFAULT_MAX_BATCH_SIZE, MAX_BATCH_SIZE_LIMIT};
pub use errors::BatchError;
pub use events::{CollectEvent, DisperseEvent, TOPIC_COLLECT, TOPIC_DISPERSE};
pub use split::{RemainderPolicy, PERCENT_BASE};
pub use validate::{TransferOutcome, TransferStatus};

#[cfg(test)]
mod testutils;


#[contract]
pub struct DisperseCollectContract;

#[contractimpl]
impl DisperseCollectContract {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time configuration. Deploy and initialize in the same
    /// transaction.
    ///
    /// * `native_asset`   – Asset contract that `Asset::Native` moves.
    /// * `remainder`      – Which recipient absorbs percentage-split dust.
    /// * `max_batch_size` – Entry bound per batch, 1 to `MAX_BATCH_SIZE_LIMIT`.
    pub fn initialize(
        env: Env,
        native_asset: Address,
        remainder: RemainderPolicy,
        max_batch_size: u32,
    ) -> Result<(), BatchError> {
        config::store(
            &env,
            &EngineConfig {
                native_asset,
                remainder,
                max_batch_size,
            },
        )
    }

    // ── Distribution ────────────────────────────────────────────────

    /// Send `amounts[i]` of `asset` from `payer` to `recipients[i]`.
    ///
    /// For `Asset::Native`, `attached` is the value the payer makes available
    /// and must cover the sum of `amounts`; any excess stays with the payer.
    /// For tokens `attached` is ignored and the sum must be covered by the
    /// payer's allowance to this contract.
    ///
    /// Returns the amount moved to each recipient.
    pub fn disperse_by_amount(
        env: Env,
        asset: Asset,
        payer: Address,
        recipients: Vec<Address>,
        amounts: Vec<i128>,
        attached: i128,
    ) -> Result<Vec<i128>, BatchError> {
        payer.require_auth();
        let config = config::load(&env)?;
        distribute::disperse_by_amount(
            &env,
            &config,
            &asset,
            &payer,
            &recipients,
            &amounts,
            attached,
        )
    }

    /// Send `percentages[i]` percent of `total` from `payer` to
    /// `recipients[i]`.
    ///
    /// `total` is always passed explicitly, for tokens as well. It is not
    /// read from the payer's allowance; it must be covered by it, so passing
    /// the full allowance splits all of it and a smaller `total` leaves the
    /// rest approved.
    ///
    /// Returns the derived amount for each recipient; a share that floors to
    /// zero is reported but not transferred.
    pub fn disperse_by_percent(
        env: Env,
        asset: Asset,
        payer: Address,
        recipients: Vec<Address>,
        percentages: Vec<u32>,
        total: i128,
    ) -> Result<Vec<i128>, BatchError> {
        payer.require_auth();
        let config = config::load(&env)?;
        distribute::disperse_by_percent(
            &env,
            &config,
            &asset,
            &payer,
            &recipients,
            &percentages,
            total,
        )
    }

    // ── Collection ──────────────────────────────────────────────────

    /// Forward `amount` of `asset` from `payer` to `recipient`.
    pub fn collect_forward(
        env: Env,
        asset: Asset,
        payer: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<i128, BatchError> {
        payer.require_auth();
        let config = config::load(&env)?;
        collect::collect_forward(&env, &config, &asset, &payer, &recipient, amount)
    }

    /// Pull `amounts[i]` of a token from `contributors[i]` into `recipient`.
    /// Each distinct contributor authorizes the call and must have approved
    /// this contract beforehand.
    pub fn collect_from_many(
        env: Env,
        asset: Asset,
        recipient: Address,
        contributors: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<Vec<i128>, BatchError> {
        let config = config::load(&env)?;
        collect::collect_from_many(&env, &config, &asset, &recipient, &contributors, &amounts)
    }

    // ── Read-only Queries ───────────────────────────────────────────

    /// Dry run of `disperse_by_amount`: structural errors are returned,
    /// funding shortfalls are reported per recipient.
    pub fn preview_disperse_by_amount(
        env: Env,
        asset: Asset,
        payer: Address,
        recipients: Vec<Address>,
        amounts: Vec<i128>,
        attached: i128,
    ) -> Result<Vec<TransferOutcome>, BatchError> {
        let config = config::load(&env)?;
        distribute::preview_by_amount(
            &env,
            &config,
            &asset,
            &payer,
            &recipients,
            &amounts,
            attached,
        )
    }

    /// Dry run of `disperse_by_percent`.
    pub fn preview_disperse_by_percent(
        env: Env,
        asset: Asset,
        payer: Address,
        recipients: Vec<Address>,
        percentages: Vec<u32>,
        total: i128,
    ) -> Result<Vec<TransferOutcome>, BatchError> {
        let config = config::load(&env)?;
        distribute::preview_by_percent(
            &env,
            &config,
            &asset,
            &payer,
            &recipients,
            &percentages,
            total,
        )
    }

    /// Dry run of `collect_from_many`.
    pub fn preview_collect_from_many(
        env: Env,
        asset: Asset,
        recipient: Address,
        contributors: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<Vec<TransferOutcome>, BatchError> {
        let config = config::load(&env)?;
        collect::preview_from_many(&env, &config, &asset, &recipient, &contributors, &amounts)
    }

    /// Shares `disperse_by_percent` would derive for `total`, using the
    /// configured remainder policy.
    pub fn calculate_split(
        env: Env,
        total: i128,
        percentages: Vec<u32>,
    ) -> Result<Vec<i128>, BatchError> {
        let config = config::load(&env)?;
        split::split(&env, total, &percentages, config.remainder)
    }

    /// Configuration stored by `initialize`.
    pub fn get_config(env: Env) -> Result<EngineConfig, BatchError> {
        config::load(&env)
    }
}
