//! Emergency recovery: the owner's escape hatch once the launch has failed.
//!
//! Refunding contributors is the owner's job off-ledger; this module only
//! releases funds to the owner and records when recovery is finished.
//! Nothing here can run against a bootstrapped launch.

use soroban_sdk::{token, Address, Env};

use crate::types::LaunchStatus;
use crate::{auth, events, state_machine, storage, Error};

/// Transfer up to `amount` of `token` held by the contract to the owner.
/// Returns the amount actually moved.
pub fn recover(env: &Env, caller: &Address, token: &Address, amount: i128) -> Result<i128, Error> {
    auth::require_owner(env, caller)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let mut window = storage::load_window(env)?;
    state_machine::expire_if_due(env, &mut window, env.ledger().timestamp())?;
    if window.status != LaunchStatus::Failed {
        return Err(Error::NotFailed);
    }

    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    let recovered = amount.min(client.balance(&this));

    events::funds_recovered(env, token, caller, recovered);
    if recovered > 0 {
        client.transfer(&this, caller, &recovered);
    }
    Ok(recovered)
}

/// Close the failed launch: `Failed -> Recovered`. Terminal.
pub fn complete(env: &Env, caller: &Address) -> Result<LaunchStatus, Error> {
    auth::require_owner(env, caller)?;

    let mut window = storage::load_window(env)?;
    state_machine::expire_if_due(env, &mut window, env.ledger().timestamp())?;
    if window.status != LaunchStatus::Failed {
        return Err(Error::NotFailed);
    }

    state_machine::transition(env, &mut window, LaunchStatus::Recovered)?;
    events::recovery_completed(env, caller);
    Ok(window.status)
}
