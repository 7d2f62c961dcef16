//! Canonical event types emitted by the fair-launch contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/fair_launch/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the fair-launch contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contribution was accepted (`contrib` topic).
    Contributed,
    /// A trigger moved the window out of `Open` (`threshold` topic).
    ThresholdReached,
    /// A trade settled and added volume (`volume` topic).
    VolumeObserved,
    /// The liquidity pool was created (`bootstrap` topic).
    PoolBootstrapped,
    /// Pool creation failed and the launch failed (`boot_fail` topic).
    BootstrapFailed,
    /// A contributor claimed their share (`claimed` topic).
    TokensClaimed,
    /// The window ran out without a trigger (`expired` topic).
    WindowExpired,
    /// The owner pulled funds from a failed launch (`recover` topic).
    FundsRecovered,
    /// The owner closed recovery (`rec_done` topic).
    RecoveryCompleted,
    /// Ownership moved to a new address (`owner` topic).
    OwnerChanged,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "contrib" => Self::Contributed,
            "threshold" => Self::ThresholdReached,
            "volume" => Self::VolumeObserved,
            "bootstrap" => Self::PoolBootstrapped,
            "boot_fail" => Self::BootstrapFailed,
            "claimed" => Self::TokensClaimed,
            "expired" => Self::WindowExpired,
            "recover" => Self::FundsRecovered,
            "rec_done" => Self::RecoveryCompleted,
            "owner" => Self::OwnerChanged,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contributed => "contributed",
            Self::ThresholdReached => "threshold_reached",
            Self::VolumeObserved => "volume_observed",
            Self::PoolBootstrapped => "pool_bootstrapped",
            Self::BootstrapFailed => "bootstrap_failed",
            Self::TokensClaimed => "tokens_claimed",
            Self::WindowExpired => "window_expired",
            Self::FundsRecovered => "funds_recovered",
            Self::RecoveryCompleted => "recovery_completed",
            Self::OwnerChanged => "owner_changed",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`].
    pub fn from_stored(s: &str) -> Self {
        match s {
            "contributed" => Self::Contributed,
            "threshold_reached" => Self::ThresholdReached,
            "volume_observed" => Self::VolumeObserved,
            "pool_bootstrapped" => Self::PoolBootstrapped,
            "bootstrap_failed" => Self::BootstrapFailed,
            "tokens_claimed" => Self::TokensClaimed,
            "window_expired" => Self::WindowExpired,
            "funds_recovered" => Self::FundsRecovered,
            "recovery_completed" => Self::RecoveryCompleted,
            "owner_changed" => Self::OwnerChanged,
            _ => Self::Unknown,
        }
    }
}

/// A fully decoded fair-launch event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchEvent {
    /// RPC event id; unique per event, used for idempotent inserts.
    pub event_id: String,
    pub event_type: String,
    /// Second topic: contributor, correlation token, pool id, token or owner.
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Kind-specific extra: trigger, failure reason, pool key, previous owner.
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
