//! Scoped reentrancy guard shared by every state-mutating entry point.
//!
//! The lock is a flag in instance storage. Holding a [`ReentrancyGuard`]
//! means the flag is set; dropping it clears the flag, so `?` early returns
//! release it like a normal exit. When an entry point returns `Err` the host
//! also discards the write.
//!
//! The Soroban host is the first line: it refuses to invoke a contract that
//! is already on the call stack, so a callback from the pool manager or a
//! token into this contract aborts with a host error before any entry point
//! runs. `ReentrancyDetected` is what an entry point reports when it finds
//! the flag held by a frame the host did let through.

use soroban_sdk::Env;

use crate::storage;
use crate::Error;

pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    /// Take the lock, or fail with `ReentrancyDetected` if an outer call holds it.
    pub fn acquire(env: &'a Env) -> Result<Self, Error> {
        if storage::is_locked(env) {
            return Err(Error::ReentrancyDetected);
        }
        storage::set_locked(env);
        Ok(Self { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        storage::clear_locked(self.env);
    }
}
