//! Claim distributor: pro-rata VOTS shares against the frozen snapshot.
//!
//! Shares are floored, so the sum of all claims never exceeds the
//! snapshot's `vots_amount`. The remainder (dust) stays unminted.

use soroban_sdk::{token, Address, Env};

use crate::types::{ClaimRecord, ClaimSnapshot, LaunchStatus};
use crate::{events, storage, Error};

/// `floor(contributed * vots_amount / total_contributed)`, zero when nothing
/// was contributed.
pub fn share_of(contributed: i128, total_contributed: i128, vots_amount: i128) -> Result<i128, Error> {
    if total_contributed <= 0 {
        return Ok(0);
    }
    contributed
        .checked_mul(vots_amount)
        .ok_or(Error::ArithmeticOverflow)?
        .checked_div(total_contributed)
        .ok_or(Error::ArithmeticOverflow)
}

/// Share of `contributor` under `snapshot`.
pub fn claimable_of(env: &Env, contributor: &Address, snapshot: &ClaimSnapshot) -> Result<i128, Error> {
    share_of(
        storage::contributed_of(env, contributor),
        snapshot.total_contributed,
        snapshot.vots_amount,
    )
}

pub fn claim(env: &Env, contributor: &Address) -> Result<i128, Error> {
    let config = storage::load_config(env)?;
    let window = storage::load_window(env)?;
    if window.status != LaunchStatus::Bootstrapped {
        return Err(Error::NotBootstrapped);
    }
    if storage::load_claim(env, contributor).is_some_and(|c| c.claimed) {
        return Err(Error::AlreadyClaimed);
    }
    if storage::contributed_of(env, contributor) == 0 {
        return Err(Error::NoContribution);
    }

    let snapshot = storage::load_snapshot(env).ok_or(Error::NotBootstrapped)?;
    let claimable = claimable_of(env, contributor, &snapshot)?;
    let total_claimed = storage::total_claimed(env)
        .checked_add(claimable)
        .ok_or(Error::ArithmeticOverflow)?;

    // Flag before paying out: a re-entrant claim must see `claimed`.
    storage::save_claim(
        env,
        &ClaimRecord {
            contributor: contributor.clone(),
            claimable,
            claimed: true,
        },
    );
    storage::save_total_claimed(env, total_claimed);
    events::tokens_claimed(env, contributor, claimable);

    if claimable > 0 {
        token::StellarAssetClient::new(env, &config.launch_token).mint(contributor, &claimable);
    }
    Ok(claimable)
}
