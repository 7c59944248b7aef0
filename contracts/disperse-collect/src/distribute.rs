//! # Distribution (push)
//!
//! One payer, many recipients. Amounts are either given exactly or derived
//! from percentages by the split. Every operation either moves value to all
//! recipients or returns an error, in which case the host rolls back the
//! transfers already made.
//!
//! For the native asset the payer declares an attached total. Only the sum
//! of the amounts is ever moved; any excess stays with the payer.

use soroban_sdk::{Address, Env, Vec};

use crate::asset::{self, fan_out, Asset, AssetMover, Transfer};
use crate::config::EngineConfig;
use crate::errors::BatchError;
use crate::events;
use crate::split;
use crate::validate::{self, TransferOutcome};

/// A validated batch, ready to be executed or previewed.
struct Prepared<'a> {
    mover: AssetMover<'a>,
    legs: Vec<Transfer>,
    total: i128,
}

/// What the payer makes available: the attached value for native, the
/// allowance granted to the engine for tokens.
fn declared_total(mover: &AssetMover, payer: &Address, attached: i128) -> i128 {
    if mover.is_native() {
        attached
    } else {
        mover.available(payer).spendable
    }
}

fn prepare_by_amount<'a>(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
    attached: i128,
) -> Result<Prepared<'a>, BatchError> {
    let total = validate::check_amount_batch(env, config, recipients, amounts)?;
    let mover = AssetMover::new(env, config, asset, attached);
    validate::check_total(total, declared_total(&mover, payer, attached))?;

    Ok(Prepared {
        legs: fan_out(env, payer, recipients, amounts),
        mover,
        total,
    })
}

fn prepare_by_percent<'a>(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    percentages: &Vec<u32>,
    total: i128,
) -> Result<Prepared<'a>, BatchError> {
    validate::check_percent_batch(env, config, recipients, percentages)?;
    let amounts = split::split(env, total, percentages, config.remainder)?;
    let mover = AssetMover::new(env, config, asset, total);
    validate::check_total(total, declared_total(&mover, payer, total))?;

    Ok(Prepared {
        legs: fan_out(env, payer, recipients, &amounts),
        mover,
        total,
    })
}

fn commit(
    env: &Env,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    prepared: Prepared,
) -> Result<Vec<i128>, BatchError> {
    let Prepared {
        mut mover,
        legs,
        total,
    } = prepared;

    validate::ensure_funded(env, &mover, &legs)?;
    let moved = asset::execute(env, &mut mover, &legs)?;
    events::emit_disperse(env, asset, payer, total, recipients, &moved);
    Ok(moved)
}

// ════════════════════════════════════════════════════════════════════
//  Operations
// ════════════════════════════════════════════════════════════════════

/// Send `amounts[i]` to `recipients[i]`.
pub fn disperse_by_amount(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
    attached: i128,
) -> Result<Vec<i128>, BatchError> {
    let prepared = prepare_by_amount(env, config, asset, payer, recipients, amounts, attached)?;
    commit(env, asset, payer, recipients, prepared)
}

/// Send `percentages[i]` percent of `total` to `recipients[i]`.
pub fn disperse_by_percent(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    percentages: &Vec<u32>,
    total: i128,
) -> Result<Vec<i128>, BatchError> {
    let prepared = prepare_by_percent(env, config, asset, payer, recipients, percentages, total)?;
    commit(env, asset, payer, recipients, prepared)
}

pub fn preview_by_amount(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
    attached: i128,
) -> Result<Vec<TransferOutcome>, BatchError> {
    let prepared = prepare_by_amount(env, config, asset, payer, recipients, amounts, attached)?;
    Ok(validate::plan(env, &prepared.mover, &prepared.legs))
}

pub fn preview_by_percent(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipients: &Vec<Address>,
    percentages: &Vec<u32>,
    total: i128,
) -> Result<Vec<TransferOutcome>, BatchError> {
    let prepared = prepare_by_percent(env, config, asset, payer, recipients, percentages, total)?;
    Ok(validate::plan(env, &prepared.mover, &prepared.legs))
}
