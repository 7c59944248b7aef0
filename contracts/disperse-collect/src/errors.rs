//! # Batch Errors
//!
//! Every failure the engine can report, with stable numeric codes. Returning
//! any of these from a contract entry point makes the host roll back the
//! whole invocation, so a failed batch never leaves a partial effect.
//!
//! | Range | Class         | Caller action                              |
//! |-------|---------------|--------------------------------------------|
//! | 1–9   | Configuration | Deploy/initialize correctly                |
//! | 10–19 | Structural    | Fix the batch arguments                    |
//! | 20–29 | Funding       | Top up balance or allowance and resubmit   |
//! | 30–39 | Arithmetic    | Fix percentages or amounts                 |
//! | 40–49 | Transfer      | Exclude or correct the refusing party      |

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BatchError {
    // ── Configuration ───────────────────────────────────────────────
    /// `initialize` has not been called yet.
    NotInitialized = 1,
    /// `initialize` was already called.
    AlreadyInitialized = 2,
    /// Configuration values out of range.
    InvalidConfig = 3,

    // ── Structural ──────────────────────────────────────────────────
    /// Recipient or contributor list is empty.
    EmptyBatch = 10,
    /// Address list and value list have different lengths.
    LengthMismatch = 11,
    /// An amount (or the total to split) is zero or negative.
    ZeroAmount = 12,
    /// More entries than the configured batch size bound.
    BatchTooLarge = 13,
    /// A party is the engine's own address, which would strand value.
    InvalidAddress = 14,

    // ── Funding ─────────────────────────────────────────────────────
    /// The declared total (attached value or allowance) does not cover the batch.
    InsufficientTotal = 20,
    /// A source's allowance to the engine is below what it must provide.
    InsufficientAllowance = 21,
    /// A source's ledger balance is below what it must provide.
    InsufficientBalance = 22,
    /// The payer's attached native budget is exhausted.
    InsufficientFunds = 23,

    // ── Arithmetic ──────────────────────────────────────────────────
    /// Percentages are not all positive or do not sum to exactly 100.
    InvalidWeights = 30,
    /// An amount sum or product overflowed.
    ArithmeticOverflow = 31,

    // ── Transfer ────────────────────────────────────────────────────
    /// The asset contract refused the transfer.
    Rejected = 40,
    /// The operation is not available for this asset kind.
    UnsupportedAsset = 41,
}

impl BatchError {
    /// Stable numeric code, as carried in `TransferStatus::Failed`.
    pub fn code(self) -> u32 {
        self as u32
    }
}
