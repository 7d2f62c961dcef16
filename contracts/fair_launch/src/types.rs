//! # Types
//!
//! Shared data structures used across all modules of the fair-launch ledger.
//!
//! ## Design decisions
//!
//! ### Config / window / aggregate split
//!
//! The launch is stored as several small ledger entries instead of one
//! struct:
//!
//! - [`LaunchConfig`] — written once at `init`; never mutated.
//! - [`LaunchWindow`] — timestamps (immutable) plus the authoritative status.
//! - [`AggregateState`] — running totals, written on every contribution and
//!   every settled trade.
//!
//! Contributions, claims and trades live in their own per-key entries so the
//! hot entries above stay a fixed size.
//!
//! ### Status as a Finite-State Machine
//!
//! [`LaunchStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Open ──► ThresholdReached ──► Bootstrapping ──► Bootstrapped
//!   │                               │
//!   └──────────► Failed ◄───────────┘
//!                  │
//!                  └──► Recovered
//! ```
//!
//! The edge table lives in `state_machine::can_transition`.

use soroban_sdk::{contracttype, Address, BytesN};

/// Lifecycle status of the fair-launch window.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LaunchStatus {
    /// Accepting contributions; no trigger has fired.
    Open,
    /// A trigger fired; waiting for `bootstrap`.
    ThresholdReached,
    /// Pool creation in flight.
    Bootstrapping,
    /// Pool created; claims are served.
    Bootstrapped,
    /// Window expired untriggered, or pool creation failed.
    Failed,
    /// Owner finished the emergency recovery.
    Recovered,
}

/// Which signal moved the window out of `Open`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// Aggregate contributions reached `MIN_ETH_THRESHOLD`.
    Contributions,
    /// Observed trade volume reached `BOOTSTRAP_VOLUME_THRESHOLD`.
    Volume,
}

/// Immutable launch configuration, written once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchConfig {
    /// Launch (VOTS) token. This contract must be its SAC admin.
    pub launch_token: Address,
    /// ETH-equivalent asset contributors deposit.
    pub paired_token: Address,
    /// Contract implementing the `PoolManager` interface.
    pub pool_manager: Address,
}

/// The contribution window and its authoritative status.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchWindow {
    pub start_time: u64,
    /// Fixed at creation: `start_time + FAIR_LAUNCH_DURATION`.
    pub end_time: u64,
    pub status: LaunchStatus,
}

/// Running totals over the contribution log and the trade stream.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AggregateState {
    /// Always equal to the sum of every logged `Contribution::amount`.
    pub total_contributed: i128,
    pub total_volume: i128,
    /// Number of entries in the append-only contribution log.
    pub contribution_count: u64,
}

/// One accepted deposit. Never mutated or deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub contributor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Returned by `contribute`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceipt {
    pub accepted: bool,
    pub total_contributed: i128,
    /// Status after the aggregate trigger was re-evaluated.
    pub status: LaunchStatus,
}

/// Settlement state of a correlated trade.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TradeState {
    Pending,
    Settled,
}

/// A trade reported by the swap pipeline, keyed by its correlation token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeRecord {
    pub pool_key: BytesN<32>,
    pub quoted: i128,
    /// Zero until settled.
    pub settled: i128,
    pub state: TradeState,
}

/// Arguments handed to the pool manager on bootstrap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub launch_token: Address,
    pub paired_token: Address,
    pub launch_amount: i128,
    pub paired_amount: i128,
}

/// The one-time liquidity pool. Created at most once, immutable thereafter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRecord {
    pub pool_id: BytesN<32>,
    pub vots_amount: i128,
    pub eth_amount: i128,
    pub created_at: u64,
}

/// Why a bootstrap attempt routed the launch to `Failed`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BootstrapFailure {
    /// The contract holds less of the paired asset than the pool needs.
    InsufficientFunds,
    /// The pool manager rejected or aborted `create_pool`.
    PoolCreationFailed,
}

/// Result of a `bootstrap` call that got past its preconditions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BootstrapOutcome {
    Created(PoolRecord),
    Failed(BootstrapFailure),
}

/// Totals frozen at the `Bootstrapped` transition. Claims divide by these,
/// never by a live sum.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimSnapshot {
    pub total_contributed: i128,
    pub vots_amount: i128,
}

/// A contributor's claim. Created on first claim; `claimed` flips once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRecord {
    pub contributor: Address,
    pub claimable: i128,
    pub claimed: bool,
}

/// Per-contributor view returned by `get_bootstrap_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootstrapInfo {
    pub contributed: i128,
    /// Projected share until claimed, zero afterwards.
    pub user_claimable: i128,
    pub total_contributed: i128,
    pub total_volume: i128,
    /// Effective status: an expired `Open` window reads as `Failed`.
    pub state: LaunchStatus,
    pub claimed: bool,
}
