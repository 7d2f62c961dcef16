//! Volume observer: the two trade callbacks the swap pipeline invokes around
//! every trade.
//!
//! Each trade carries a correlation token. `before_trade` opens a pending
//! record for it and `after_trade` settles it, adding the settled amount to
//! the observed volume exactly once. Repeated callbacks for the same token
//! are no-ops, so a trade that re-enters the hook cannot count twice.
//!
//! Volume accumulates in every lifecycle state. Rejecting a callback would
//! block the swap, so state only decides whether the volume can still fire
//! the trigger.

use soroban_sdk::{BytesN, Env};

use crate::types::{TradeRecord, TradeState};
use crate::{events, state_machine, storage, Error};

/// Record the quote for a trade. Returns `false` if the correlation token
/// was already seen.
pub fn before_trade(
    env: &Env,
    pool_key: &BytesN<32>,
    quoted: i128,
    correlation: &BytesN<32>,
) -> Result<bool, Error> {
    storage::load_config(env)?;
    if quoted < 0 {
        return Err(Error::InvalidAmount);
    }
    if storage::load_trade(env, correlation).is_some() {
        return Ok(false);
    }

    storage::save_trade(
        env,
        correlation,
        &TradeRecord {
            pool_key: pool_key.clone(),
            quoted,
            settled: 0,
            state: TradeState::Pending,
        },
    );
    Ok(true)
}

/// Settle a trade and accumulate its realized volume. Returns the delta
/// added, or zero if the trade was already settled.
pub fn after_trade(
    env: &Env,
    pool_key: &BytesN<32>,
    settled: i128,
    correlation: &BytesN<32>,
) -> Result<i128, Error> {
    storage::load_config(env)?;
    if settled < 0 {
        return Err(Error::InvalidAmount);
    }

    let mut trade = storage::load_trade(env, correlation).ok_or(Error::TradeNotStarted)?;
    if trade.state == TradeState::Settled {
        return Ok(0);
    }
    if trade.pool_key != *pool_key {
        return Err(Error::PoolKeyMismatch);
    }

    let mut aggregate = storage::load_aggregate(env);
    aggregate.total_volume = aggregate
        .total_volume
        .checked_add(settled)
        .ok_or(Error::ArithmeticOverflow)?;

    trade.settled = settled;
    trade.state = TradeState::Settled;
    storage::save_trade(env, correlation, &trade);
    storage::save_aggregate(env, &aggregate);
    events::volume_observed(
        env,
        correlation,
        pool_key,
        trade.quoted,
        settled,
        aggregate.total_volume,
    );

    let mut window = storage::load_window(env)?;
    state_machine::evaluate_triggers(env, &mut window, &aggregate, env.ledger().timestamp())?;

    Ok(settled)
}
