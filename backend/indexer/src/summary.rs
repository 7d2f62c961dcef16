//! Launch-wide rollup computed from the stored event log.
//!
//! The contract is the source of truth; this is a read model rebuilt from
//! indexed events, so it is only as fresh as the last poll.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchSummary {
    /// Last status implied by the event stream, in the contract's lifecycle
    /// naming (`open`, `threshold_reached`, `bootstrapped`, `failed`,
    /// `recovered`).
    pub status: &'static str,
    /// `Contributions` or `Volume`, once a trigger has fired.
    pub trigger: Option<String>,
    pub pool_id: Option<String>,
    pub contribution_count: usize,
    pub contributor_count: usize,
    /// Amounts are base-unit integers rendered as strings.
    pub total_contributed: String,
    pub total_volume: String,
    pub total_claimed: String,
    pub total_recovered: String,
    pub claim_count: usize,
}

/// Fold events (ledger order) into a [`LaunchSummary`].
pub fn summarize(events: &[EventRecord]) -> Result<LaunchSummary> {
    let mut status = "open";
    let mut trigger = None;
    let mut pool_id = None;
    let mut contributors = BTreeSet::new();
    let mut contribution_count = 0;
    let mut claim_count = 0;
    let (mut contributed, mut volume, mut claimed, mut recovered) = (0i128, 0i128, 0i128, 0i128);

    for ev in events {
        match EventKind::from_stored(&ev.event_type) {
            EventKind::Contributed => {
                contributed = add(contributed, ev)?;
                contribution_count += 1;
                if let Some(who) = ev.actor.as_ref().or(ev.subject.as_ref()) {
                    contributors.insert(who.clone());
                }
            }
            EventKind::ThresholdReached => {
                status = "threshold_reached";
                trigger = ev.detail.clone();
            }
            EventKind::VolumeObserved => volume = add(volume, ev)?,
            EventKind::PoolBootstrapped => {
                status = "bootstrapped";
                pool_id = ev.subject.clone();
            }
            EventKind::BootstrapFailed | EventKind::WindowExpired => status = "failed",
            EventKind::TokensClaimed => {
                claimed = add(claimed, ev)?;
                claim_count += 1;
            }
            EventKind::FundsRecovered => recovered = add(recovered, ev)?,
            EventKind::RecoveryCompleted => status = "recovered",
            EventKind::OwnerChanged | EventKind::Unknown => {}
        }
    }

    Ok(LaunchSummary {
        status,
        trigger,
        pool_id,
        contribution_count,
        contributor_count: contributors.len(),
        total_contributed: contributed.to_string(),
        total_volume: volume.to_string(),
        total_claimed: claimed.to_string(),
        total_recovered: recovered.to_string(),
        claim_count,
    })
}

fn add(total: i128, ev: &EventRecord) -> Result<i128> {
    let raw = ev.amount.as_deref().unwrap_or("0");
    let amount: i128 = raw
        .parse()
        .map_err(|_| IndexerError::Amount(raw.to_string()))?;
    total
        .checked_add(amount)
        .ok_or_else(|| IndexerError::Amount(raw.to_string()))
}
