extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::constants::{ETH_UNIT, INITIAL_LIQUIDITY_VOTS};
use crate::storage;
use crate::test_support::{
    correlation_token, pool_key, setup, setup_with, Launch, PoolKind, ReenteringPoolManagerClient,
};
use crate::{BootstrapOutcome, Error, LaunchStatus};

/// Simulate being inside another guarded call.
fn hold_lock(l: &Launch) {
    l.env
        .as_contract(&l.client.address, || storage::set_locked(&l.env));
}

#[test]
fn test_every_guarded_entry_point_rejects_nested_calls() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.eth_sac.mint(&a, &ETH_UNIT);
    hold_lock(&l);

    let key = pool_key(&l.env);
    let token = correlation_token(&l.env, 1);
    let reentered = Err(Ok(Error::ReentrancyDetected));

    assert_eq!(l.client.try_contribute(&a, &ETH_UNIT).map(|_| ()), reentered);
    assert_eq!(l.client.try_on_trade_before(&key, &5, &token).map(|_| ()), reentered);
    assert_eq!(l.client.try_on_trade_after(&key, &5, &token).map(|_| ()), reentered);
    assert_eq!(l.client.try_bootstrap().map(|_| ()), reentered);
    assert_eq!(l.client.try_claim_tokens(&a).map(|_| ()), reentered);
    assert_eq!(l.client.try_sync_status().map(|_| ()), reentered);
    assert_eq!(
        l.client
            .try_emergency_recover(&l.owner, &l.eth.address, &1)
            .map(|_| ()),
        reentered
    );
    assert_eq!(l.client.try_complete_recovery(&l.owner).map(|_| ()), reentered);

    // Nothing leaked through.
    assert_eq!(l.client.contribution_count(), 0);
    assert_eq!(l.eth.balance(&a), ETH_UNIT);
}

#[test]
fn test_lock_is_released_after_each_call() {
    let l = setup();
    let a = Address::generate(&l.env);

    l.fund_and_contribute(&a, 10);
    l.fund_and_contribute(&a, 10);
    assert_eq!(l.client.try_contribute(&a, &0), Err(Ok(Error::InvalidAmount)));
    l.fund_and_contribute(&a, ETH_UNIT);

    assert_eq!(l.client.get_window().status, LaunchStatus::ThresholdReached);
    let locked = l
        .env
        .as_contract(&l.client.address, || storage::is_locked(&l.env));
    assert!(!locked);
}

#[test]
fn test_pool_manager_callback_cannot_reenter_bootstrap() {
    let l = setup_with(PoolKind::Reentering);
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT);

    let outcome = l.client.bootstrap();
    assert!(matches!(outcome, BootstrapOutcome::Created(_)));

    // Both nested calls from inside `create_pool` were aborted by the host.
    let pool_manager = ReenteringPoolManagerClient::new(&l.env, &l.pool_manager);
    assert_eq!(pool_manager.nested_calls_refused(), Some(true));

    // Exactly one pool, funded once.
    assert_eq!(l.client.get_window().status, LaunchStatus::Bootstrapped);
    assert_eq!(l.vots.balance(&l.pool_manager), INITIAL_LIQUIDITY_VOTS);
    assert_eq!(l.eth.balance(&l.pool_manager), ETH_UNIT);
    assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::AlreadyBootstrapped)));
    assert_eq!(l.client.get_claim(&l.pool_manager), None);
    assert_eq!(l.client.get_total_claimed(), 0);
}
