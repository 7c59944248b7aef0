//! Shared fixture for the contract tests.
//!
//! Assets are real Stellar asset contracts registered in the test host, plus
//! `MockLedgerToken`, a minimal token implementing the calls the engine makes
//! (`balance`, `allowance`, `transfer`, `transfer_from`) that can be told to
//! refuse incoming or outgoing transfers for an account.

use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Vec,
};

use crate::{
    Asset, DisperseCollectContract, DisperseCollectContractClient, RemainderPolicy,
    DEFAULT_MAX_BATCH_SIZE,
};

/// Ledgers an approval stays valid for.
pub const APPROVAL_LEDGERS: u32 = 100;

// ════════════════════════════════════════════════════════════════════
//  Mock ledger token
// ════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockTokenError {
    InsufficientAllowance = 1,
    InsufficientBalance = 2,
    Refused = 3,
}

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Balance(Address),
    Allowance(Address, Address),
    Refuses(Address),
    RefusesOutgoing(Address),
}

#[contract]
pub struct MockLedgerToken;

#[contractimpl]
impl MockLedgerToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .instance()
            .set(&MockKey::Balance(to), &(balance + amount));
    }

    /// Make every later transfer into `account` fail.
    pub fn refuse_incoming(env: Env, account: Address) {
        env.storage()
            .instance()
            .set(&MockKey::Refuses(account), &true);
    }

    /// Make every later transfer out of `account` fail.
    pub fn refuse_outgoing(env: Env, account: Address) {
        env.storage()
            .instance()
            .set(&MockKey::RefusesOutgoing(account), &true);
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        _expiration_ledger: u32,
    ) {
        from.require_auth();
        env.storage()
            .instance()
            .set(&MockKey::Allowance(from, spender), &amount);
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .instance()
            .get(&MockKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        shift(&env, &from, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            panic_with_error!(&env, MockTokenError::InsufficientAllowance);
        }
        shift(&env, &from, &to, amount);
        env.storage()
            .instance()
            .set(&MockKey::Allowance(from, spender), &(allowance - amount));
    }
}

fn shift(env: &Env, from: &Address, to: &Address, amount: i128) {
    let refuses_in: bool = env
        .storage()
        .instance()
        .get(&MockKey::Refuses(to.clone()))
        .unwrap_or(false);
    let refuses_out: bool = env
        .storage()
        .instance()
        .get(&MockKey::RefusesOutgoing(from.clone()))
        .unwrap_or(false);
    if refuses_in || refuses_out {
        panic_with_error!(env, MockTokenError::Refused);
    }
    let from_balance = MockLedgerToken::balance(env.clone(), from.clone());
    if from_balance < amount {
        panic_with_error!(env, MockTokenError::InsufficientBalance);
    }
    let to_balance = MockLedgerToken::balance(env.clone(), to.clone());
    env.storage()
        .instance()
        .set(&MockKey::Balance(from.clone()), &(from_balance - amount));
    env.storage()
        .instance()
        .set(&MockKey::Balance(to.clone()), &(to_balance + amount));
}

// ════════════════════════════════════════════════════════════════════
//  Fixture
// ════════════════════════════════════════════════════════════════════

pub struct Fixture {
    pub env: Env,
    pub engine: DisperseCollectContractClient<'static>,
    /// Asset contract behind `Asset::Native`.
    pub native: Address,
    /// Stellar asset contract used as `Asset::Token`.
    pub token: Address,
    /// `MockLedgerToken` instance.
    pub mock: Address,
    pub payer: Address,
}

impl Fixture {
    pub fn create() -> Self {
        Self::setup(RemainderPolicy::LastRecipient, false)
    }

    pub fn with_policy(policy: RemainderPolicy) -> Self {
        Self::setup(policy, false)
    }

    /// Engine whose native asset is the mock token, so native recipients
    /// can refuse value.
    pub fn with_mock_native() -> Self {
        Self::setup(RemainderPolicy::LastRecipient, true)
    }

    fn setup(policy: RemainderPolicy, mock_native: bool) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let sac_native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let token = env.register_stellar_asset_contract_v2(issuer).address();
        let mock = env.register(MockLedgerToken, ());
        let native = if mock_native { mock.clone() } else { sac_native };

        let contract_id = env.register(DisperseCollectContract, ());
        let engine = DisperseCollectContractClient::new(&env, &contract_id);
        engine.initialize(&native, &policy, &DEFAULT_MAX_BATCH_SIZE);

        let payer = Address::generate(&env);
        Fixture {
            env,
            engine,
            native,
            token,
            mock,
            payer,
        }
    }

    pub fn token_asset(&self) -> Asset {
        Asset::Token(self.token.clone())
    }

    pub fn mock_asset(&self) -> Asset {
        Asset::Token(self.mock.clone())
    }

    /// Works for the Stellar asset contracts and the mock alike.
    pub fn mint(&self, asset: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, asset).mint(to, &amount);
    }

    /// `owner` approves the engine for `amount` of `asset`.
    pub fn approve(&self, asset: &Address, owner: &Address, amount: i128) {
        let expiration = self.env.ledger().sequence() + APPROVAL_LEDGERS;
        TokenClient::new(&self.env, asset).approve(
            owner,
            &self.engine.address,
            &amount,
            &expiration,
        );
    }

    pub fn refuse_incoming(&self, account: &Address) {
        MockLedgerTokenClient::new(&self.env, &self.mock).refuse_incoming(account);
    }

    pub fn refuse_outgoing(&self, account: &Address) {
        MockLedgerTokenClient::new(&self.env, &self.mock).refuse_outgoing(account);
    }

    pub fn balance(&self, asset: &Address, who: &Address) -> i128 {
        TokenClient::new(&self.env, asset).balance(who)
    }

    pub fn allowance(&self, asset: &Address, owner: &Address) -> i128 {
        TokenClient::new(&self.env, asset).allowance(owner, &self.engine.address)
    }

    pub fn accounts(&self, count: u32) -> Vec<Address> {
        let mut accounts = Vec::new(&self.env);
        for _ in 0..count {
            accounts.push_back(Address::generate(&self.env));
        }
        accounts
    }
}
