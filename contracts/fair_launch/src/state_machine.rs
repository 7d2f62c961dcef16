//! The launch lifecycle. [`transition`] is the only writer of
//! `LaunchWindow::status`.
//!
//! Expiry is lazy: nothing fires at `end_time`. The next operation that
//! touches the window observes it through [`expire_if_due`] or
//! [`effective_status`].

use soroban_sdk::Env;

use crate::constants::{BOOTSTRAP_VOLUME_THRESHOLD, MIN_ETH_THRESHOLD};
use crate::types::{AggregateState, LaunchStatus, LaunchWindow, Trigger};
use crate::{events, storage, Error};

/// Forward-only edge table.
pub fn can_transition(from: LaunchStatus, to: LaunchStatus) -> bool {
    use LaunchStatus::*;
    matches!(
        (from, to),
        (Open, ThresholdReached)
            | (Open, Failed)
            | (ThresholdReached, Bootstrapping)
            | (Bootstrapping, Bootstrapped)
            | (Bootstrapping, Failed)
            | (Failed, Recovered)
    )
}

/// Move `window` to `to` and persist it.
pub fn transition(env: &Env, window: &mut LaunchWindow, to: LaunchStatus) -> Result<(), Error> {
    if !can_transition(window.status, to) {
        return Err(Error::InvalidTransition);
    }
    window.status = to;
    storage::save_window(env, window);
    Ok(())
}

pub fn is_expired(window: &LaunchWindow, now: u64) -> bool {
    now >= window.end_time
}

/// Status as an observer at `now` should see it. An `Open` window past its
/// end reads as `Failed` even before the transition is persisted.
pub fn effective_status(window: &LaunchWindow, now: u64) -> LaunchStatus {
    if window.status == LaunchStatus::Open && is_expired(window, now) {
        LaunchStatus::Failed
    } else {
        window.status
    }
}

/// Which trigger `aggregate` satisfies, if any. When both are satisfied the
/// aggregate wins; it is still one event.
pub fn satisfied_trigger(aggregate: &AggregateState) -> Option<Trigger> {
    if aggregate.total_contributed >= MIN_ETH_THRESHOLD {
        Some(Trigger::Contributions)
    } else if aggregate.total_volume >= BOOTSTRAP_VOLUME_THRESHOLD {
        Some(Trigger::Volume)
    } else {
        None
    }
}

/// Persist `Open -> Failed` if the window has run out. Returns whether the
/// transition happened on this call.
pub fn expire_if_due(env: &Env, window: &mut LaunchWindow, now: u64) -> Result<bool, Error> {
    if window.status != LaunchStatus::Open || !is_expired(window, now) {
        return Ok(false);
    }
    transition(env, window, LaunchStatus::Failed)?;
    let aggregate = storage::load_aggregate(env);
    events::window_expired(env, window.end_time, aggregate.total_contributed);
    Ok(true)
}

/// Re-check both triggers after a ledger or volume update.
///
/// Only an `Open`, unexpired window can fire; every later signal is a no-op.
/// An expired window is failed instead.
pub fn evaluate_triggers(
    env: &Env,
    window: &mut LaunchWindow,
    aggregate: &AggregateState,
    now: u64,
) -> Result<Option<Trigger>, Error> {
    if window.status != LaunchStatus::Open {
        return Ok(None);
    }
    if expire_if_due(env, window, now)? {
        return Ok(None);
    }

    let trigger = satisfied_trigger(aggregate);
    if let Some(trigger) = trigger {
        transition(env, window, LaunchStatus::ThresholdReached)?;
        events::threshold_reached(
            env,
            trigger,
            aggregate.total_contributed,
            aggregate.total_volume,
        );
    }
    Ok(trigger)
}
