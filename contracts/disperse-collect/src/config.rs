//! # Engine Configuration
//!
//! Deployment-time settings written once by `initialize`. Batches only read
//! the configuration; nothing else is ever written to the engine's storage.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::BatchError;
use crate::split::RemainderPolicy;

/// Batch size bound used when the deployer has no specific need.
pub const DEFAULT_MAX_BATCH_SIZE: u32 = 100;

/// Ceiling for `max_batch_size`; keeps a batch inside host resource limits.
pub const MAX_BATCH_SIZE_LIMIT: u32 = 250;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Engine configuration (`EngineConfig`).
    Config,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Asset contract that `Asset::Native` resolves to.
    pub native_asset: Address,
    /// Which recipient absorbs integer-division dust in percentage splits.
    pub remainder: RemainderPolicy,
    /// Maximum number of entries in one batch.
    pub max_batch_size: u32,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Validate and store the configuration. Fails if one is already stored.
pub fn store(env: &Env, config: &EngineConfig) -> Result<(), BatchError> {
    if is_initialized(env) {
        return Err(BatchError::AlreadyInitialized);
    }
    if config.max_batch_size == 0 || config.max_batch_size > MAX_BATCH_SIZE_LIMIT {
        return Err(BatchError::InvalidConfig);
    }
    env.storage().instance().set(&DataKey::Config, config);
    Ok(())
}

pub fn load(env: &Env) -> Result<EngineConfig, BatchError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(BatchError::NotInitialized)
}
