extern crate std;

use soroban_sdk::{testutils::Address as _, Address, BytesN, Env};

use crate::constants::{ETH_UNIT, INITIAL_LIQUIDITY_VOTS};
use crate::invariants::assert_forward_progress;
use crate::test_support::{
    setup, setup_with_rejecting_pool, AcceptingPoolManager, AcceptingPoolManagerClient, POOL_ID,
};
use crate::{
    BootstrapFailure, BootstrapOutcome, Error, FairLaunch, FairLaunchClient, LaunchStatus,
    PoolParams, PoolRecord,
};

#[test]
fn test_bootstrap_creates_pool_from_collected_funds() {
    let l = setup();
    for tenths in [5i128, 3, 2] {
        let who = Address::generate(&l.env);
        l.fund_and_contribute(&who, tenths * ETH_UNIT / 10);
    }

    let outcome = l.client.bootstrap();
    let expected = PoolRecord {
        pool_id: BytesN::from_array(&l.env, &POOL_ID),
        vots_amount: INITIAL_LIQUIDITY_VOTS,
        eth_amount: ETH_UNIT,
        created_at: 0,
    };
    assert_eq!(outcome, BootstrapOutcome::Created(expected.clone()));
    assert_eq!(l.client.get_pool(), Some(expected));
    assert_eq!(l.client.get_window().status, LaunchStatus::Bootstrapped);

    // Both legs landed with the pool manager.
    assert_eq!(l.vots.balance(&l.pool_manager), INITIAL_LIQUIDITY_VOTS);
    assert_eq!(l.eth.balance(&l.pool_manager), ETH_UNIT);
    assert_eq!(l.eth.balance(&l.client.address), 0);

    let params = AcceptingPoolManagerClient::new(&l.env, &l.pool_manager)
        .last_params()
        .unwrap();
    assert_eq!(
        params,
        PoolParams {
            launch_token: l.vots.address.clone(),
            paired_token: l.eth.address.clone(),
            launch_amount: INITIAL_LIQUIDITY_VOTS,
            paired_amount: ETH_UNIT,
        }
    );
    assert_forward_progress(LaunchStatus::Open, LaunchStatus::Bootstrapped);
}

#[test]
fn test_bootstrap_uses_everything_above_minimum() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, 3 * ETH_UNIT / 2);

    match l.client.bootstrap() {
        BootstrapOutcome::Created(pool) => assert_eq!(pool.eth_amount, 3 * ETH_UNIT / 2),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_bootstrap_succeeds_at_most_once() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT);

    l.client.bootstrap();
    for _ in 0..3 {
        assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::AlreadyBootstrapped)));
    }
    assert_eq!(l.vots.balance(&l.pool_manager), INITIAL_LIQUIDITY_VOTS);
}

#[test]
fn test_bootstrap_before_threshold_is_rejected() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT / 2);

    assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::NotThresholdReached)));
    assert_eq!(l.client.get_window().status, LaunchStatus::Open);
}

#[test]
fn test_bootstrap_mid_flight_is_rejected() {
    let l = setup();
    l.env.as_contract(&l.client.address, || {
        let mut window = crate::storage::load_window(&l.env).unwrap();
        window.status = LaunchStatus::Bootstrapping;
        crate::storage::save_window(&l.env, &window);
    });

    assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::BootstrapInProgress)));
}

#[test]
fn test_thresholded_window_bootstraps_after_end_time() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT);
    l.expire_window();

    assert_eq!(l.client.sync_status(), LaunchStatus::ThresholdReached);
    assert!(matches!(l.client.bootstrap(), BootstrapOutcome::Created(_)));
}

#[test]
fn test_rejected_pool_creation_routes_to_failed() {
    let l = setup_with_rejecting_pool();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT);

    assert_eq!(
        l.client.bootstrap(),
        BootstrapOutcome::Failed(BootstrapFailure::PoolCreationFailed)
    );
    assert_eq!(l.client.get_window().status, LaunchStatus::Failed);
    assert_eq!(l.client.get_pool(), None);
    // Funds never left.
    assert_eq!(l.eth.balance(&l.client.address), ETH_UNIT);

    assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::LaunchFailed)));
    assert_eq!(l.client.try_claim_tokens(&a), Err(Ok(Error::NotBootstrapped)));
    assert_eq!(
        l.client.emergency_recover(&l.owner, &l.eth.address, &ETH_UNIT),
        ETH_UNIT
    );
}

#[test]
fn test_volume_trigger_without_funds_routes_to_failed() {
    let l = setup();
    l.trade(1, ETH_UNIT);

    assert_eq!(
        l.client.bootstrap(),
        BootstrapOutcome::Failed(BootstrapFailure::InsufficientFunds)
    );
    assert_eq!(l.client.get_window().status, LaunchStatus::Failed);
    assert_eq!(l.vots.balance(&l.pool_manager), 0);
}

#[test]
fn test_failed_pool_funding_routes_to_failed_and_stays_recoverable() {
    let l = setup();
    let a = Address::generate(&l.env);
    l.fund_and_contribute(&a, ETH_UNIT);

    // The pool manager already holds the largest representable VOTS balance,
    // so minting the allotment to it fails.
    l.env.as_contract(&l.client.address, || {
        l.vots_sac.mint(&l.pool_manager, &i128::MAX);
    });

    assert_eq!(
        l.client.bootstrap(),
        BootstrapOutcome::Failed(BootstrapFailure::PoolCreationFailed)
    );
    assert_eq!(l.client.get_window().status, LaunchStatus::Failed);
    assert_eq!(l.client.get_pool(), None);
    assert_eq!(l.eth.balance(&l.client.address), ETH_UNIT);
    assert_eq!(l.client.try_bootstrap(), Err(Ok(Error::LaunchFailed)));

    assert_eq!(
        l.client.emergency_recover(&l.owner, &l.eth.address, &ETH_UNIT),
        ETH_UNIT
    );
    assert_eq!(l.eth.balance(&l.owner), ETH_UNIT);
}

#[test]
fn test_init_rejects_launch_token_administered_elsewhere() {
    let env = Env::default();
    env.mock_all_auths();
    let client = FairLaunchClient::new(&env, &env.register(FairLaunch, ()));

    let owner = Address::generate(&env);
    let foreign = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let eth = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let pool_manager = env.register(AcceptingPoolManager, ());

    assert_eq!(
        client.try_init(
            &owner,
            &foreign.address(),
            &eth.address(),
            &pool_manager,
            &Address::generate(&env),
        ),
        Err(Ok(Error::InvalidLaunchToken))
    );
    assert_eq!(client.try_get_window(), Err(Ok(Error::NotInitialized)));
}
