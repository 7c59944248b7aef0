//! # Collection (pull)
//!
//! Many sources (or one), one recipient. Pulling from several contributors
//! needs an allowance primitive, so it is only available for tokens; the
//! native asset supports the single-source relay only.

use soroban_sdk::{vec, Address, Env, Map, Vec};

use crate::asset::{self, fan_in, Asset, AssetMover, Transfer};
use crate::config::EngineConfig;
use crate::errors::BatchError;
use crate::events;
use crate::validate::{self, TransferOutcome};

fn prepare_from_many<'a>(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    recipient: &Address,
    contributors: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Result<(AssetMover<'a>, Vec<Transfer>, i128), BatchError> {
    if *asset == Asset::Native {
        return Err(BatchError::UnsupportedAsset);
    }
    let total = validate::check_amount_batch(env, config, contributors, amounts)?;
    validate::check_party(env, recipient)?;

    let mover = AssetMover::new(env, config, asset, 0);
    Ok((mover, fan_in(env, contributors, recipient, amounts), total))
}

/// Relay `amount` from `payer` to `recipient` in a single transfer.
pub fn collect_forward(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    payer: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<i128, BatchError> {
    validate::check_party(env, recipient)?;
    if amount <= 0 {
        return Err(BatchError::ZeroAmount);
    }

    let mut mover = AssetMover::new(env, config, asset, amount);
    let contributors = vec![env, payer.clone()];
    let legs = fan_in(env, &contributors, recipient, &vec![env, amount]);

    validate::ensure_funded(env, &mover, &legs)?;
    let moved = asset::execute(env, &mut mover, &legs)?;
    events::emit_collect(env, asset, recipient, amount, &contributors, &moved);
    Ok(amount)
}

/// Every distinct contributor signs for its pull. A repeated contributor is
/// asked once, since its combined draw is funded as one.
fn require_contributors(env: &Env, contributors: &Vec<Address>) {
    let mut seen: Map<Address, bool> = Map::new(env);
    for contributor in contributors.iter() {
        if !seen.contains_key(contributor.clone()) {
            contributor.require_auth();
            seen.set(contributor, true);
        }
    }
}

/// Pull `amounts[i]` from `contributors[i]` into `recipient`. Every
/// contributor must authorize the call and have approved the engine for at
/// least its amount.
pub fn collect_from_many(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    recipient: &Address,
    contributors: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Result<Vec<i128>, BatchError> {
    let (mut mover, legs, total) =
        prepare_from_many(env, config, asset, recipient, contributors, amounts)?;

    require_contributors(env, contributors);
    validate::ensure_funded(env, &mover, &legs)?;
    let moved = asset::execute(env, &mut mover, &legs)?;
    events::emit_collect(env, asset, recipient, total, contributors, &moved);
    Ok(moved)
}

pub fn preview_from_many(
    env: &Env,
    config: &EngineConfig,
    asset: &Asset,
    recipient: &Address,
    contributors: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Result<Vec<TransferOutcome>, BatchError> {
    let (mover, legs, _) = prepare_from_many(env, config, asset, recipient, contributors, amounts)?;
    Ok(validate::plan(env, &mover, &legs))
}
