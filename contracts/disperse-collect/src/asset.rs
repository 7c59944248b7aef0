//! # Asset Movement
//!
//! A single interface over the two kinds of asset the engine moves:
//!
//! - **Native**: the network currency, moved with the native asset
//!   contract's `transfer`. The payer authorizes the batch and declares how
//!   much value it attaches; the mover never draws more than that budget.
//! - **Token**: any contract implementing the standard token interface, moved
//!   with `transfer_from` against the allowance the source granted to the
//!   engine.
//!
//! The actual transfer goes through the client's `try_` call, so a refusal
//! by the asset contract surfaces as [`BatchError::Rejected`] and the failed
//! sub-call leaves no effect behind.

use soroban_sdk::{contracttype, log, token, Address, Env, Vec};

use crate::config::EngineConfig;
use crate::errors::BatchError;

/// Asset selector passed to every operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// Native currency, resolved through `EngineConfig::native_asset`.
    Native,
    /// Allowance-based token at the given contract address.
    Token(Address),
}

/// One leg of a batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

/// What a source can currently provide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Available {
    /// Attached budget (native) or allowance to the engine (token).
    pub spendable: i128,
    /// Ledger balance of the source.
    pub balance: i128,
}

enum Mode {
    Native { budget: i128 },
    Allowance { spender: Address },
}

pub struct AssetMover<'a> {
    client: token::TokenClient<'a>,
    mode: Mode,
}

impl<'a> AssetMover<'a> {
    /// Build the mover for one batch. `attached` is the payer's declared
    /// native budget and is ignored for tokens.
    pub fn new(env: &Env, config: &EngineConfig, asset: &Asset, attached: i128) -> Self {
        match asset {
            Asset::Native => AssetMover {
                client: token::TokenClient::new(env, &config.native_asset),
                mode: Mode::Native { budget: attached },
            },
            Asset::Token(contract) => AssetMover {
                client: token::TokenClient::new(env, contract),
                mode: Mode::Allowance {
                    spender: env.current_contract_address(),
                },
            },
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.mode, Mode::Native { .. })
    }

    /// Address of the asset contract actually moving value.
    pub fn asset_address(&self) -> &Address {
        &self.client.address
    }

    pub fn available(&self, from: &Address) -> Available {
        let spendable = match &self.mode {
            Mode::Native { budget } => *budget,
            Mode::Allowance { spender } => self.client.allowance(from, spender),
        };
        Available {
            spendable,
            balance: self.client.balance(from),
        }
    }

    /// Error reported when `spendable` does not cover a draw.
    pub fn spendable_shortfall(&self) -> BatchError {
        match self.mode {
            Mode::Native { .. } => BatchError::InsufficientFunds,
            Mode::Allowance { .. } => BatchError::InsufficientAllowance,
        }
    }

    /// Compare a required draw against what a source can provide.
    pub fn check_draw(&self, available: Available, required: i128) -> Result<(), BatchError> {
        if available.spendable < required {
            return Err(self.spendable_shortfall());
        }
        if available.balance < required {
            return Err(BatchError::InsufficientBalance);
        }
        Ok(())
    }

    /// Move `amount` from `from` to `to`. On error nothing has moved.
    pub fn move_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), BatchError> {
        self.check_draw(self.available(from), amount)?;

        let outcome = match &self.mode {
            Mode::Native { .. } => self.client.try_transfer(from, to, &amount),
            Mode::Allowance { spender } => {
                self.client.try_transfer_from(spender, from, to, &amount)
            }
        };
        if !matches!(outcome, Ok(Ok(()))) {
            return Err(BatchError::Rejected);
        }

        if let Mode::Native { budget } = &mut self.mode {
            *budget = budget
                .checked_sub(amount)
                .ok_or(BatchError::ArithmeticOverflow)?;
        }
        Ok(())
    }
}

/// Legs paying `amounts[i]` from `from` to `recipients[i]`.
pub fn fan_out(
    env: &Env,
    from: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Vec<Transfer> {
    let mut legs = Vec::new(env);
    for (to, amount) in recipients.iter().zip(amounts.iter()) {
        legs.push_back(Transfer {
            from: from.clone(),
            to,
            amount,
        });
    }
    legs
}

/// Legs pulling `amounts[i]` from `contributors[i]` into `to`.
pub fn fan_in(
    env: &Env,
    contributors: &Vec<Address>,
    to: &Address,
    amounts: &Vec<i128>,
) -> Vec<Transfer> {
    let mut legs = Vec::new(env);
    for (from, amount) in contributors.iter().zip(amounts.iter()) {
        legs.push_back(Transfer {
            from,
            to: to.clone(),
            amount,
        });
    }
    legs
}

/// Run every leg in list order and return the amounts moved. Zero legs are
/// skipped but still reported. Stops at the first failing leg; the caller
/// returns the error and the host discards the legs already applied.
pub fn execute(
    env: &Env,
    mover: &mut AssetMover,
    legs: &Vec<Transfer>,
) -> Result<Vec<i128>, BatchError> {
    let mut moved = Vec::new(env);
    for (index, leg) in legs.iter().enumerate() {
        if leg.amount > 0 {
            if let Err(err) = mover.move_value(&leg.from, &leg.to, leg.amount) {
                log!(env, "transfer failed", index as u32, leg.to, err.code());
                return Err(err);
            }
        }
        moved.push_back(leg.amount);
    }
    Ok(moved)
}
