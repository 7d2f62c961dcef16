//! Contribution ledger: the append-only deposit log and its running totals.

use soroban_sdk::{token, Address, Env};

use crate::types::{Contribution, ContributionReceipt, LaunchStatus};
use crate::{events, state_machine, storage, Error};

/// Accept `amount` of the paired asset from `contributor`.
///
/// The log entry, the per-contributor total and the aggregate are written
/// before the token transfer, and the aggregate trigger is re-evaluated
/// against the new total.
pub fn accept(env: &Env, contributor: &Address, amount: i128) -> Result<ContributionReceipt, Error> {
    let config = storage::load_config(env)?;
    let mut window = storage::load_window(env)?;

    if window.status != LaunchStatus::Open {
        return Err(Error::WindowClosed);
    }
    let now = env.ledger().timestamp();
    if state_machine::is_expired(&window, now) {
        return Err(Error::WindowExpired);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let mut aggregate = storage::load_aggregate(env);
    let user_total = storage::contributed_of(env, contributor)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    aggregate.total_contributed = aggregate
        .total_contributed
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    let index = aggregate.contribution_count;
    aggregate.contribution_count = index.checked_add(1).ok_or(Error::ArithmeticOverflow)?;

    storage::append_contribution(
        env,
        index,
        &Contribution {
            contributor: contributor.clone(),
            amount,
            timestamp: now,
        },
    );
    storage::save_contributed(env, contributor, user_total);
    storage::save_aggregate(env, &aggregate);
    events::contributed(env, contributor, amount, aggregate.total_contributed, index);

    state_machine::evaluate_triggers(env, &mut window, &aggregate, now)?;

    token::Client::new(env, &config.paired_token).transfer(
        contributor,
        &env.current_contract_address(),
        &amount,
    );

    Ok(ContributionReceipt {
        accepted: true,
        total_contributed: aggregate.total_contributed,
        status: window.status,
    })
}
