//! Pool bootstrapper: the exactly-once liquidity creation.
//!
//! The `Bootstrapping` status is written before any external call, so no
//! second caller can observe `ThresholdReached` once the first has started.
//! A pool-creation failure is persisted as `Failed` and reported through
//! [`BootstrapOutcome::Failed`]; returning an error would roll that
//! transition back. Every external call after the `Bootstrapping` write goes
//! through a `try_` client for that reason.
//!
//! The paired leg is floored at `INITIAL_LIQUIDITY_ETH_MIN`. A launch carried
//! by volume alone must therefore hold that much of the paired asset before
//! `bootstrap` is called, or it fails with `InsufficientFunds`.

use soroban_sdk::{contractclient, token, BytesN, Env};

use crate::constants::{INITIAL_LIQUIDITY_ETH_MIN, INITIAL_LIQUIDITY_VOTS};
use crate::types::{
    BootstrapFailure, BootstrapOutcome, ClaimSnapshot, LaunchStatus, LaunchWindow, PoolParams,
    PoolRecord,
};
use crate::{events, state_machine, storage, Error};

/// Capability the bootstrapper calls out to for pool creation.
#[allow(dead_code)]
#[contractclient(name = "PoolManagerClient")]
pub trait PoolManager {
    /// Create the pool and return its identifier. The contract funds the
    /// pool with both legs after this returns.
    fn create_pool(env: Env, params: PoolParams) -> BytesN<32>;
}

/// Paired-asset side of the pool: everything collected, floored at the
/// protocol minimum.
pub fn pool_eth_amount(total_contributed: i128) -> i128 {
    total_contributed.max(INITIAL_LIQUIDITY_ETH_MIN)
}

pub fn bootstrap(env: &Env) -> Result<BootstrapOutcome, Error> {
    let config = storage::load_config(env)?;
    let mut window = storage::load_window(env)?;

    match window.status {
        LaunchStatus::ThresholdReached => {}
        LaunchStatus::Open => return Err(Error::NotThresholdReached),
        LaunchStatus::Bootstrapping => return Err(Error::BootstrapInProgress),
        LaunchStatus::Bootstrapped => return Err(Error::AlreadyBootstrapped),
        LaunchStatus::Failed | LaunchStatus::Recovered => return Err(Error::LaunchFailed),
    }
    state_machine::transition(env, &mut window, LaunchStatus::Bootstrapping)?;

    let aggregate = storage::load_aggregate(env);
    let eth_amount = pool_eth_amount(aggregate.total_contributed);
    let vots_amount = INITIAL_LIQUIDITY_VOTS;

    let this = env.current_contract_address();
    let paired = token::Client::new(env, &config.paired_token);
    if paired.balance(&this) < eth_amount {
        return fail(env, &mut window, BootstrapFailure::InsufficientFunds, eth_amount);
    }

    let params = PoolParams {
        launch_token: config.launch_token.clone(),
        paired_token: config.paired_token.clone(),
        launch_amount: vots_amount,
        paired_amount: eth_amount,
    };
    let pool_id = match PoolManagerClient::new(env, &config.pool_manager).try_create_pool(&params)
    {
        Ok(Ok(pool_id)) => pool_id,
        _ => return fail(env, &mut window, BootstrapFailure::PoolCreationFailed, eth_amount),
    };

    // Funding failures route to `Failed` like a rejected `create_pool`.
    let minted = token::StellarAssetClient::new(env, &config.launch_token)
        .try_mint(&config.pool_manager, &vots_amount);
    if !matches!(minted, Ok(Ok(()))) {
        return fail(env, &mut window, BootstrapFailure::PoolCreationFailed, eth_amount);
    }
    let funded = paired.try_transfer(&this, &config.pool_manager, &eth_amount);
    if !matches!(funded, Ok(Ok(()))) {
        return fail(env, &mut window, BootstrapFailure::PoolCreationFailed, eth_amount);
    }

    let record = PoolRecord {
        pool_id,
        vots_amount,
        eth_amount,
        created_at: env.ledger().timestamp(),
    };
    storage::save_pool(env, &record);
    storage::save_snapshot(
        env,
        &ClaimSnapshot {
            total_contributed: aggregate.total_contributed,
            vots_amount,
        },
    );
    state_machine::transition(env, &mut window, LaunchStatus::Bootstrapped)?;
    events::pool_bootstrapped(env, &record.pool_id, vots_amount, eth_amount);

    Ok(BootstrapOutcome::Created(record))
}

fn fail(
    env: &Env,
    window: &mut LaunchWindow,
    reason: BootstrapFailure,
    eth_required: i128,
) -> Result<BootstrapOutcome, Error> {
    state_machine::transition(env, window, LaunchStatus::Failed)?;
    events::bootstrap_failed(env, reason, eth_required);
    Ok(BootstrapOutcome::Failed(reason))
}
