//! Owner and trade-hook capabilities.
//!
//! Both are single addresses in instance storage. A capability check always
//! demands the holder's signature first, then compares against the stored
//! holder.

use soroban_sdk::{Address, Env};

use crate::{events, storage, Error};

/// Require `caller` to sign and to be the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = storage::load_owner(env)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Require the registered swap pipeline to have authorized this call.
pub fn require_trade_hook(env: &Env) -> Result<Address, Error> {
    let hook = storage::load_trade_hook(env)?;
    hook.require_auth();
    Ok(hook)
}

/// Hand the owner capability to `new_owner`. The previous owner loses it
/// immediately.
pub fn transfer_ownership(env: &Env, current: &Address, new_owner: &Address) -> Result<(), Error> {
    require_owner(env, current)?;
    storage::set_owner(env, new_owner);
    events::owner_changed(env, current, new_owner);
    Ok(())
}

/// Replace the address allowed to invoke the trade callbacks.
pub fn set_trade_hook(env: &Env, caller: &Address, hook: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;
    storage::set_trade_hook(env, hook);
    Ok(())
}
