//! # Fair Launch Contract
//!
//! The fair-launch liquidity bootstrap ledger. It records contributions of
//! an ETH-equivalent asset during a fixed window, decides through two
//! independent triggers when the launch is ready, creates the initial
//! liquidity pool exactly once, and pays each contributor a pro-rata share
//! of the launch token.
//!
//! | Phase      | Entry Point(s)                                        |
//! |------------|-------------------------------------------------------|
//! | Setup      | [`FairLaunch::init`]                                  |
//! | Owner      | `transfer_ownership`, `set_trade_hook`                |
//! | Raising    | [`FairLaunch::contribute`]                            |
//! | Volume     | `on_trade_before`, `on_trade_after`                   |
//! | Lifecycle  | `sync_status`                                         |
//! | Bootstrap  | [`FairLaunch::bootstrap`]                             |
//! | Claims     | [`FairLaunch::claim_tokens`]                          |
//! | Recovery   | `emergency_recover`, `complete_recovery`              |
//! | Queries    | `get_bootstrap_info`, `get_window`, `get_pool`, …     |
//!
//! ## Architecture
//!
//! This file contains only the public entry points. Each state-mutating
//! entry point takes the [`guard::ReentrancyGuard`] and delegates to one
//! module: [`ledger`], [`observer`], [`bootstrapper`], [`claims`] or
//! [`recovery`]. Lifecycle status is owned by [`state_machine`]; storage
//! access by [`storage`].
//!
//! Every entry point returns `Result<_, Error>`. An `Err` makes the host
//! discard all writes and transfers of the invocation, so no operation ever
//! half-commits.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env};

pub mod auth;
pub mod bootstrapper;
pub mod claims;
pub mod constants;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod observer;
pub mod recovery;
pub mod state_machine;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_bootstrap;
#[cfg(test)]
mod test_reentrancy;
#[cfg(test)]
mod test_support;

use guard::ReentrancyGuard;
pub use bootstrapper::{PoolManager, PoolManagerClient};
pub use types::{
    AggregateState, BootstrapFailure, BootstrapInfo, BootstrapOutcome, ClaimRecord,
    ClaimSnapshot, Contribution, ContributionReceipt, LaunchConfig, LaunchStatus, LaunchWindow,
    PoolParams, PoolRecord, TradeRecord, TradeState, Trigger,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized  = 1,
    NotInitialized      = 2,
    WindowClosed        = 3,
    WindowExpired       = 4,
    InvalidAmount       = 5,
    AlreadyClaimed      = 6,
    NotBootstrapped     = 7,
    NotThresholdReached = 8,
    BootstrapInProgress = 9,
    AlreadyBootstrapped = 10,
    LaunchFailed        = 11,
    ReentrancyDetected  = 12,
    Unauthorized        = 13,
    NotFailed           = 14,
    ArithmeticOverflow  = 15,
    NoContribution      = 16,
    TradeNotStarted     = 17,
    PoolKeyMismatch     = 18,
    InvalidTransition   = 19,
    InvalidLaunchToken  = 20,
}

#[contract]
pub struct FairLaunch;

#[contractimpl]
impl FairLaunch {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the launch and open the window at the current ledger time.
    ///
    /// Must be called exactly once. `launch_token` must be a Stellar Asset
    /// Contract administered by this contract: pool and claim allotments are
    /// minted, not pre-funded. Anything else fails with `InvalidLaunchToken`.
    pub fn init(
        env: Env,
        owner: Address,
        launch_token: Address,
        paired_token: Address,
        pool_manager: Address,
        trade_hook: Address,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        let admin = token::StellarAssetClient::new(&env, &launch_token).try_admin();
        if !matches!(admin, Ok(Ok(ref a)) if *a == env.current_contract_address()) {
            return Err(Error::InvalidLaunchToken);
        }

        let start_time = env.ledger().timestamp();
        storage::save_config(
            &env,
            &LaunchConfig {
                launch_token,
                paired_token,
                pool_manager,
            },
        );
        storage::set_owner(&env, &owner);
        storage::set_trade_hook(&env, &trade_hook);
        storage::save_window(
            &env,
            &LaunchWindow {
                start_time,
                end_time: start_time + constants::FAIR_LAUNCH_DURATION,
                status: LaunchStatus::Open,
            },
        );
        storage::save_aggregate(&env, &AggregateState::default());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Owner administration
    // ─────────────────────────────────────────────────────────

    pub fn transfer_ownership(env: Env, current: Address, new_owner: Address) -> Result<(), Error> {
        auth::transfer_ownership(&env, &current, &new_owner)
    }

    pub fn set_trade_hook(env: Env, caller: Address, hook: Address) -> Result<(), Error> {
        auth::set_trade_hook(&env, &caller, &hook)
    }

    // ─────────────────────────────────────────────────────────
    // Raising
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the paired asset.
    ///
    /// Fails with `WindowClosed` once the status has left `Open` and with
    /// `WindowExpired` at or after `end_time`.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<ContributionReceipt, Error> {
        contributor.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        ledger::accept(&env, &contributor, amount)
    }

    /// Swap-pipeline callback before a trade. Signed by the trade hook.
    pub fn on_trade_before(
        env: Env,
        pool_key: BytesN<32>,
        amount: i128,
        correlation: BytesN<32>,
    ) -> Result<bool, Error> {
        auth::require_trade_hook(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;
        observer::before_trade(&env, &pool_key, amount, &correlation)
    }

    /// Swap-pipeline callback after a trade settles. Returns the volume
    /// delta accumulated, zero if `correlation` was already settled.
    pub fn on_trade_after(
        env: Env,
        pool_key: BytesN<32>,
        amount: i128,
        correlation: BytesN<32>,
    ) -> Result<i128, Error> {
        auth::require_trade_hook(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;
        observer::after_trade(&env, &pool_key, amount, &correlation)
    }

    /// Persist a pending expiry and return the resulting status.
    pub fn sync_status(env: Env) -> Result<LaunchStatus, Error> {
        let _guard = ReentrancyGuard::acquire(&env)?;
        let mut window = storage::load_window(&env)?;
        state_machine::expire_if_due(&env, &mut window, env.ledger().timestamp())?;
        Ok(window.status)
    }

    // ─────────────────────────────────────────────────────────
    // Bootstrap and claims
    // ─────────────────────────────────────────────────────────

    /// Create the liquidity pool. Callable by anyone once thresholded;
    /// succeeds at most once.
    ///
    /// The pool takes all contributions, floored at `INITIAL_LIQUIDITY_ETH_MIN`.
    /// When volume fired the trigger with less than that collected, the
    /// shortfall must be transferred to the contract beforehand; otherwise the
    /// outcome is `Failed(InsufficientFunds)`. A pool manager or token call
    /// that fails yields `Failed(PoolCreationFailed)`.
    pub fn bootstrap(env: Env) -> Result<BootstrapOutcome, Error> {
        let _guard = ReentrancyGuard::acquire(&env)?;
        bootstrapper::bootstrap(&env)
    }

    /// Mint the contributor's pro-rata share of the VOTS allotment.
    pub fn claim_tokens(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        claims::claim(&env, &contributor)
    }

    // ─────────────────────────────────────────────────────────
    // Emergency recovery
    // ─────────────────────────────────────────────────────────

    /// Owner-only. Move up to `amount` of `token` to the owner; only while
    /// the launch is `Failed`.
    pub fn emergency_recover(env: Env, caller: Address, token: Address, amount: i128) -> Result<i128, Error> {
        let _guard = ReentrancyGuard::acquire(&env)?;
        recovery::recover(&env, &caller, &token, amount)
    }

    /// Owner-only. Mark the failed launch as fully refunded.
    pub fn complete_recovery(env: Env, caller: Address) -> Result<LaunchStatus, Error> {
        let _guard = ReentrancyGuard::acquire(&env)?;
        recovery::complete(&env, &caller)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_bootstrap_info(env: Env, contributor: Address) -> Result<BootstrapInfo, Error> {
        let window = storage::load_window(&env)?;
        let aggregate = storage::load_aggregate(&env);
        let contributed = storage::contributed_of(&env, &contributor);
        let claimed = storage::load_claim(&env, &contributor).is_some_and(|c| c.claimed);

        let state = state_machine::effective_status(&window, env.ledger().timestamp());

        let user_claimable = if claimed
            || contributed == 0
            || matches!(state, LaunchStatus::Failed | LaunchStatus::Recovered)
        {
            0
        } else if let Some(snapshot) = storage::load_snapshot(&env) {
            claims::claimable_of(&env, &contributor, &snapshot)?
        } else {
            claims::share_of(
                contributed,
                aggregate.total_contributed,
                constants::INITIAL_LIQUIDITY_VOTS,
            )?
        };

        Ok(BootstrapInfo {
            contributed,
            user_claimable,
            total_contributed: aggregate.total_contributed,
            total_volume: aggregate.total_volume,
            state,
            claimed,
        })
    }

    pub fn get_window(env: Env) -> Result<LaunchWindow, Error> {
        storage::load_window(&env)
    }

    pub fn get_aggregate(env: Env) -> AggregateState {
        storage::load_aggregate(&env)
    }

    pub fn get_pool(env: Env) -> Option<PoolRecord> {
        storage::load_pool(&env)
    }

    pub fn get_contribution(env: Env, index: u64) -> Option<Contribution> {
        storage::load_contribution(&env, index)
    }

    pub fn contribution_count(env: Env) -> u64 {
        storage::load_aggregate(&env).contribution_count
    }

    pub fn get_claim(env: Env, contributor: Address) -> Option<ClaimRecord> {
        storage::load_claim(&env, &contributor)
    }

    pub fn get_total_claimed(env: Env) -> i128 {
        storage::total_claimed(&env)
    }

    pub fn get_trade(env: Env, correlation: BytesN<32>) -> Option<TradeRecord> {
        storage::load_trade(&env, &correlation)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::load_owner(&env)
    }
}
