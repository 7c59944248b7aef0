//! # Batch Validation
//!
//! Everything here runs before the first transfer of a batch.
//!
//! Structural checks, in order, stopping at the first failure:
//!
//! 1. the address list is non-empty (`EmptyBatch`)
//! 2. the value list has the same length (`LengthMismatch`)
//! 3. the batch fits the configured bound (`BatchTooLarge`)
//! 4. no party is the engine itself (`InvalidAddress`)
//! 5. every amount is positive (`ZeroAmount`)
//! 6. the amounts sum without overflow (`ArithmeticOverflow`)
//! 7. the declared total covers the sum (`InsufficientTotal`)
//!
//! The funding plan then walks the legs in list order and checks each
//! source's allowance (or attached budget) and balance, counting earlier
//! legs drawn from the same source.

use soroban_sdk::{contracttype, log, Address, Env, Map, Vec};

use crate::asset::{AssetMover, Transfer};
use crate::config::EngineConfig;
use crate::errors::BatchError;

/// Per-leg result of a funding plan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransferStatus {
    /// The leg is covered and would be attempted.
    Ready,
    /// The leg is not covered; carries the `BatchError` code.
    Failed(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferOutcome {
    /// Position of the leg in the caller's list.
    pub index: u32,
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub status: TransferStatus,
}

// ════════════════════════════════════════════════════════════════════
//  Structural checks
// ════════════════════════════════════════════════════════════════════

/// Checks 1–3: non-empty, equal lengths, within the batch size bound.
pub fn check_shape(config: &EngineConfig, parties: u32, values: u32) -> Result<(), BatchError> {
    if parties == 0 {
        return Err(BatchError::EmptyBatch);
    }
    if values != parties {
        return Err(BatchError::LengthMismatch);
    }
    if parties > config.max_batch_size {
        return Err(BatchError::BatchTooLarge);
    }
    Ok(())
}

pub fn check_party(env: &Env, party: &Address) -> Result<(), BatchError> {
    if *party == env.current_contract_address() {
        return Err(BatchError::InvalidAddress);
    }
    Ok(())
}

/// Check 4 for every listed party.
pub fn check_parties(env: &Env, parties: &Vec<Address>) -> Result<(), BatchError> {
    for party in parties.iter() {
        check_party(env, &party)?;
    }
    Ok(())
}

/// Checks 5–6. Returns the sum of `amounts`.
pub fn check_amounts(amounts: &Vec<i128>) -> Result<i128, BatchError> {
    let mut sum = 0i128;
    for amount in amounts.iter() {
        if amount <= 0 {
            return Err(BatchError::ZeroAmount);
        }
        sum = sum
            .checked_add(amount)
            .ok_or(BatchError::ArithmeticOverflow)?;
    }
    Ok(sum)
}

/// Check 7.
pub fn check_total(required: i128, declared: i128) -> Result<(), BatchError> {
    if required > declared {
        return Err(BatchError::InsufficientTotal);
    }
    Ok(())
}

/// Checks 1–6 for an exact-amount batch. Returns the batch total.
pub fn check_amount_batch(
    env: &Env,
    config: &EngineConfig,
    parties: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Result<i128, BatchError> {
    check_shape(config, parties.len(), amounts.len())?;
    check_parties(env, parties)?;
    check_amounts(amounts)
}

/// Checks 1–4 for a percentage batch; the weights themselves are checked by
/// the split.
pub fn check_percent_batch(
    env: &Env,
    config: &EngineConfig,
    parties: &Vec<Address>,
    percentages: &Vec<u32>,
) -> Result<(), BatchError> {
    check_shape(config, parties.len(), percentages.len())?;
    check_parties(env, parties)
}

// ════════════════════════════════════════════════════════════════════
//  Funding plan
// ════════════════════════════════════════════════════════════════════

/// Running per-source totals while walking the legs.
struct Draws<'m, 'a> {
    mover: &'m AssetMover<'a>,
    drawn: Map<Address, i128>,
}

impl<'m, 'a> Draws<'m, 'a> {
    fn new(env: &Env, mover: &'m AssetMover<'a>) -> Self {
        Draws {
            mover,
            drawn: Map::new(env),
        }
    }

    fn draw(&mut self, leg: &Transfer) -> Result<(), BatchError> {
        let prior = self.drawn.get(leg.from.clone()).unwrap_or(0);
        let required = prior
            .checked_add(leg.amount)
            .ok_or(BatchError::ArithmeticOverflow)?;
        self.mover
            .check_draw(self.mover.available(&leg.from), required)?;
        self.drawn.set(leg.from.clone(), required);
        Ok(())
    }
}

/// Fail on the first leg its source cannot cover.
pub fn ensure_funded(
    env: &Env,
    mover: &AssetMover,
    legs: &Vec<Transfer>,
) -> Result<(), BatchError> {
    let mut draws = Draws::new(env, mover);
    for (index, leg) in legs.iter().enumerate() {
        if let Err(err) = draws.draw(&leg) {
            log!(env, "funding shortfall", index as u32, leg.from, err.code());
            return Err(err);
        }
    }
    Ok(())
}

/// Outcome for every leg without stopping at the first shortfall.
pub fn plan(env: &Env, mover: &AssetMover, legs: &Vec<Transfer>) -> Vec<TransferOutcome> {
    let mut draws = Draws::new(env, mover);
    let mut outcomes = Vec::new(env);
    for (index, leg) in legs.iter().enumerate() {
        let status = match draws.draw(&leg) {
            Ok(()) => TransferStatus::Ready,
            Err(err) => TransferStatus::Failed(err.code()),
        };
        outcomes.push_back(TransferOutcome {
            index: index as u32,
            from: leg.from,
            to: leg.to,
            amount: leg.amount,
            status,
        });
    }
    outcomes
}
