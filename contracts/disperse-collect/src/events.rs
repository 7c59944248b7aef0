//! # Batch Events
//!
//! Exactly one event is published per successful batch, after every transfer
//! has gone through. A failed batch publishes nothing: the host discards its
//! events together with its transfers.
//!
//! | Topic      | Payload         | Second topic |
//! |------------|-----------------|--------------|
//! | `disperse` | `DisperseEvent` | payer        |
//! | `collect`  | `CollectEvent`  | recipient    |

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::asset::Asset;

/// Topic for distribution events
pub const TOPIC_DISPERSE: Symbol = symbol_short!("disperse");
/// Topic for collection events
pub const TOPIC_COLLECT: Symbol = symbol_short!("collect");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisperseEvent {
    pub asset: Asset,
    pub payer: Address,
    /// Sum of `amounts`.
    pub total: i128,
    pub recipients: Vec<Address>,
    /// Amount moved to each recipient, in list order.
    pub amounts: Vec<i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectEvent {
    pub asset: Asset,
    pub recipient: Address,
    /// Sum of `amounts`.
    pub total: i128,
    pub contributors: Vec<Address>,
    /// Amount pulled from each contributor, in list order.
    pub amounts: Vec<i128>,
}

pub fn emit_disperse(
    env: &Env,
    asset: &Asset,
    payer: &Address,
    total: i128,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
) {
    let event = DisperseEvent {
        asset: asset.clone(),
        payer: payer.clone(),
        total,
        recipients: recipients.clone(),
        amounts: amounts.clone(),
    };
    env.events().publish((TOPIC_DISPERSE, payer.clone()), event);
}

pub fn emit_collect(
    env: &Env,
    asset: &Asset,
    recipient: &Address,
    total: i128,
    contributors: &Vec<Address>,
    amounts: &Vec<i128>,
) {
    let event = CollectEvent {
        asset: asset.clone(),
        recipient: recipient.clone(),
        total,
        contributors: contributors.clone(),
        amounts: amounts.clone(),
    };
    env.events()
        .publish((TOPIC_COLLECT, recipient.clone()), event);
}
