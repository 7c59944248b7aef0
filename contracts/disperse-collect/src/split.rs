//! # Percentage Split
//!
//! Turns a total and an ordered list of base-100 weights into exact amounts.
//!
//! Every recipient except one gets `floor(total × weight / 100)`. The
//! remaining recipient, chosen by [`RemainderPolicy`], gets whatever is left,
//! so the shares always add up to `total` and no dust is stranded. Callers
//! should know that the absorbing recipient's share is therefore not strictly
//! proportional whenever the division is inexact:
//!
//! ```text
//! total = 2, weights = [25, 75], LastRecipient  → [0, 2]
//! total = 5, weights = [40, 60], LastRecipient  → [2, 3]
//! total = 10, weights = [33, 33, 34], FirstRecipient → [4, 3, 3]
//! ```

use soroban_sdk::{contracttype, Env, Vec};

use crate::errors::BatchError;

/// Weights are whole percentages and must add up to this.
pub const PERCENT_BASE: u32 = 100;

/// Which recipient receives the integer-division remainder.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RemainderPolicy {
    /// The last-listed recipient absorbs the remainder (default).
    LastRecipient,
    /// The first-listed recipient absorbs the remainder.
    FirstRecipient,
}

/// Check that every weight is positive and that they sum to exactly 100.
pub fn check_weights(weights: &Vec<u32>) -> Result<(), BatchError> {
    let mut sum = 0u32;
    for weight in weights.iter() {
        if weight == 0 {
            return Err(BatchError::InvalidWeights);
        }
        sum = sum.checked_add(weight).ok_or(BatchError::InvalidWeights)?;
    }
    if sum != PERCENT_BASE {
        return Err(BatchError::InvalidWeights);
    }
    Ok(())
}

/// Floor of `total × weight / 100`.
pub fn share_of(total: i128, weight: u32) -> Result<i128, BatchError> {
    total
        .checked_mul(weight as i128)
        .map(|scaled| scaled / PERCENT_BASE as i128)
        .ok_or(BatchError::ArithmeticOverflow)
}

/// Split `total` across `weights`; the result has one amount per weight, in
/// the same order, and sums to `total`.
pub fn split(
    env: &Env,
    total: i128,
    weights: &Vec<u32>,
    policy: RemainderPolicy,
) -> Result<Vec<i128>, BatchError> {
    if weights.is_empty() {
        return Err(BatchError::EmptyBatch);
    }
    check_weights(weights)?;
    if total <= 0 {
        return Err(BatchError::ZeroAmount);
    }

    let absorber = match policy {
        RemainderPolicy::LastRecipient => weights.len() - 1,
        RemainderPolicy::FirstRecipient => 0,
    };

    let mut shares = Vec::new(env);
    let mut allocated = 0i128;
    for (i, weight) in weights.iter().enumerate() {
        if i as u32 == absorber {
            // Placeholder, filled in once the other shares are known.
            shares.push_back(0);
            continue;
        }
        let share = share_of(total, weight)?;
        allocated = allocated
            .checked_add(share)
            .ok_or(BatchError::ArithmeticOverflow)?;
        shares.push_back(share);
    }

    let remainder = total
        .checked_sub(allocated)
        .ok_or(BatchError::ArithmeticOverflow)?;
    shares.set(absorber, remainder);
    Ok(shares)
}
