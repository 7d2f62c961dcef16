//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! fair-launch ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type             | Description                            |
//! |----------------|------------------|----------------------------------------|
//! | `Owner`        | `Address`        | Holder of the recovery capability      |
//! | `TradeHook`    | `Address`        | Swap pipeline allowed to report trades |
//! | `Config`       | `LaunchConfig`   | Token and pool-manager addresses       |
//! | `Window`       | `LaunchWindow`   | Timestamps and authoritative status    |
//! | `Aggregate`    | `AggregateState` | Running totals                         |
//! | `Pool`         | `PoolRecord`     | Written once on bootstrap              |
//! | `Snapshot`     | `ClaimSnapshot`  | Frozen totals for claims               |
//! | `TotalClaimed` | `i128`           | VOTS paid out so far                   |
//! | `Locked`       | `bool`           | Reentrancy flag                        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type           | Description                     |
//! |----------------------|----------------|---------------------------------|
//! | `Contribution(idx)`  | `Contribution` | Append-only contribution log    |
//! | `Contributed(addr)`  | `i128`         | Per-contributor running total   |
//! | `Claim(addr)`        | `ClaimRecord`  | Claim table                     |
//! | `Trade(correlation)` | `TradeRecord`  | Trade settlement by correlation |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{
    AggregateState, ClaimRecord, ClaimSnapshot, Contribution, LaunchConfig, LaunchWindow,
    PoolRecord, TradeRecord,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    TradeHook,
    Config,
    Window,
    Aggregate,
    Pool,
    Snapshot,
    TotalClaimed,
    Locked,
    Contribution(u64),
    Contributed(Address),
    Claim(Address),
    Trade(BytesN<32>),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &LaunchConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Load the launch configuration. Fails with `NotInitialized` before `init`.
pub fn load_config(env: &Env) -> Result<LaunchConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn load_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_trade_hook(env: &Env, hook: &Address) {
    env.storage().instance().set(&DataKey::TradeHook, hook);
    bump_instance(env);
}

pub fn load_trade_hook(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::TradeHook)
        .ok_or(Error::NotInitialized)
}

pub fn save_window(env: &Env, window: &LaunchWindow) {
    env.storage().instance().set(&DataKey::Window, window);
    bump_instance(env);
}

pub fn load_window(env: &Env) -> Result<LaunchWindow, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Window)
        .ok_or(Error::NotInitialized)
}

pub fn save_aggregate(env: &Env, aggregate: &AggregateState) {
    env.storage().instance().set(&DataKey::Aggregate, aggregate);
    bump_instance(env);
}

pub fn load_aggregate(env: &Env) -> AggregateState {
    env.storage()
        .instance()
        .get(&DataKey::Aggregate)
        .unwrap_or_default()
}

pub fn save_pool(env: &Env, pool: &PoolRecord) {
    env.storage().instance().set(&DataKey::Pool, pool);
    bump_instance(env);
}

pub fn load_pool(env: &Env) -> Option<PoolRecord> {
    env.storage().instance().get(&DataKey::Pool)
}

pub fn save_snapshot(env: &Env, snapshot: &ClaimSnapshot) {
    env.storage().instance().set(&DataKey::Snapshot, snapshot);
    bump_instance(env);
}

pub fn load_snapshot(env: &Env) -> Option<ClaimSnapshot> {
    env.storage().instance().get(&DataKey::Snapshot)
}

pub fn total_claimed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalClaimed)
        .unwrap_or(0)
}

pub fn save_total_claimed(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalClaimed, &amount);
    bump_instance(env);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env) {
    env.storage().instance().set(&DataKey::Locked, &true);
}

pub fn clear_locked(env: &Env) {
    env.storage().instance().remove(&DataKey::Locked);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key. The key must exist.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Write a persistent entry and refresh its TTL.
fn put_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

/// Read a persistent entry, refreshing its TTL when present.
fn get_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

/// Append to the contribution log at `index` (the pre-increment count).
pub fn append_contribution(env: &Env, index: u64, contribution: &Contribution) {
    put_persistent(env, &DataKey::Contribution(index), contribution);
}

pub fn load_contribution(env: &Env, index: u64) -> Option<Contribution> {
    get_persistent(env, &DataKey::Contribution(index))
}

/// Running total deposited by `contributor`; zero if they never contributed.
pub fn contributed_of(env: &Env, contributor: &Address) -> i128 {
    get_persistent(env, &DataKey::Contributed(contributor.clone())).unwrap_or(0)
}

pub fn save_contributed(env: &Env, contributor: &Address, total: i128) {
    put_persistent(env, &DataKey::Contributed(contributor.clone()), &total);
}

pub fn load_claim(env: &Env, contributor: &Address) -> Option<ClaimRecord> {
    get_persistent(env, &DataKey::Claim(contributor.clone()))
}

pub fn save_claim(env: &Env, claim: &ClaimRecord) {
    put_persistent(env, &DataKey::Claim(claim.contributor.clone()), claim);
}

pub fn load_trade(env: &Env, correlation: &BytesN<32>) -> Option<TradeRecord> {
    get_persistent(env, &DataKey::Trade(correlation.clone()))
}

pub fn save_trade(env: &Env, correlation: &BytesN<32>, trade: &TradeRecord) {
    put_persistent(env, &DataKey::Trade(correlation.clone()), trade);
}
