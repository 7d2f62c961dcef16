//! Typed contract events. These are the ledger's log: the off-chain indexer
//! decodes them by their leading topic symbol.
//!
//! | Topic       | Subject       | Payload               |
//! |-------------|---------------|-----------------------|
//! | `contrib`   | contributor   | [`Contributed`]       |
//! | `threshold` | —             | [`ThresholdReached`]  |
//! | `volume`    | correlation   | [`VolumeObserved`]    |
//! | `bootstrap` | pool id       | [`PoolBootstrapped`]  |
//! | `boot_fail` | —             | [`BootstrapFailed`]   |
//! | `claimed`   | contributor   | [`TokensClaimed`]     |
//! | `expired`   | —             | [`WindowExpired`]     |
//! | `recover`   | token         | [`FundsRecovered`]    |
//! | `rec_done`  | —             | [`RecoveryCompleted`] |
//! | `owner`     | new owner     | [`OwnerChanged`]      |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::types::{BootstrapFailure, Trigger};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributed {
    pub contributor: Address,
    pub amount: i128,
    pub total_contributed: i128,
    pub index: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThresholdReached {
    pub trigger: Trigger,
    pub total_contributed: i128,
    pub total_volume: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeObserved {
    pub pool_key: BytesN<32>,
    pub quoted: i128,
    pub settled: i128,
    pub total_volume: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolBootstrapped {
    pub pool_id: BytesN<32>,
    pub vots_amount: i128,
    pub eth_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootstrapFailed {
    pub reason: BootstrapFailure,
    pub eth_required: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimed {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowExpired {
    pub end_time: u64,
    pub total_contributed: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsRecovered {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryCompleted {
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerChanged {
    pub previous: Address,
    pub owner: Address,
}

pub fn contributed(env: &Env, contributor: &Address, amount: i128, total: i128, index: u64) {
    env.events().publish(
        (symbol_short!("contrib"), contributor.clone()),
        Contributed {
            contributor: contributor.clone(),
            amount,
            total_contributed: total,
            index,
        },
    );
}

pub fn threshold_reached(env: &Env, trigger: Trigger, total_contributed: i128, total_volume: i128) {
    env.events().publish(
        (symbol_short!("threshold"),),
        ThresholdReached {
            trigger,
            total_contributed,
            total_volume,
        },
    );
}

pub fn volume_observed(
    env: &Env,
    correlation: &BytesN<32>,
    pool_key: &BytesN<32>,
    quoted: i128,
    settled: i128,
    total_volume: i128,
) {
    env.events().publish(
        (symbol_short!("volume"), correlation.clone()),
        VolumeObserved {
            pool_key: pool_key.clone(),
            quoted,
            settled,
            total_volume,
        },
    );
}

pub fn pool_bootstrapped(env: &Env, pool_id: &BytesN<32>, vots_amount: i128, eth_amount: i128) {
    env.events().publish(
        (symbol_short!("bootstrap"), pool_id.clone()),
        PoolBootstrapped {
            pool_id: pool_id.clone(),
            vots_amount,
            eth_amount,
        },
    );
}

pub fn bootstrap_failed(env: &Env, reason: BootstrapFailure, eth_required: i128) {
    env.events().publish(
        (symbol_short!("boot_fail"),),
        BootstrapFailed {
            reason,
            eth_required,
        },
    );
}

pub fn tokens_claimed(env: &Env, contributor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claimed"), contributor.clone()),
        TokensClaimed {
            contributor: contributor.clone(),
            amount,
        },
    );
}

pub fn window_expired(env: &Env, end_time: u64, total_contributed: i128) {
    env.events().publish(
        (symbol_short!("expired"),),
        WindowExpired {
            end_time,
            total_contributed,
        },
    );
}

pub fn funds_recovered(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("recover"), token.clone()),
        FundsRecovered {
            token: token.clone(),
            to: to.clone(),
            amount,
        },
    );
}

pub fn recovery_completed(env: &Env, by: &Address) {
    env.events().publish(
        (symbol_short!("rec_done"),),
        RecoveryCompleted { by: by.clone() },
    );
}

pub fn owner_changed(env: &Env, previous: &Address, owner: &Address) {
    env.events().publish(
        (symbol_short!("owner"), owner.clone()),
        OwnerChanged {
            previous: previous.clone(),
            owner: owner.clone(),
        },
    );
}
