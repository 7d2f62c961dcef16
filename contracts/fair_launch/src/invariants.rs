#![allow(dead_code)]

extern crate std;

use crate::state_machine::can_transition;
use crate::types::LaunchStatus;
use crate::FairLaunchClient;

/// Ledger: the aggregate total equals the sum of the contribution log.
pub fn assert_total_matches_log(client: &FairLaunchClient) {
    let aggregate = client.get_aggregate();
    let mut sum = 0i128;
    for i in 0..aggregate.contribution_count {
        let entry = client
            .get_contribution(&i)
            .unwrap_or_else(|| panic!("ledger invariant violated: log entry {i} missing"));
        assert!(entry.amount > 0, "ledger invariant violated: non-positive entry {i}");
        sum += entry.amount;
    }
    assert_eq!(
        sum, aggregate.total_contributed,
        "ledger invariant violated: log sums to {} but total is {}",
        sum, aggregate.total_contributed
    );
}

/// Claims: claims never exceed the VOTS allotment.
pub fn assert_claims_bounded(claims: &[i128], vots_amount: i128) {
    let total: i128 = claims.iter().sum();
    assert!(
        total <= vots_amount,
        "claim invariant violated: claims sum to {} over allotment {}",
        total,
        vots_amount
    );
}

/// Lifecycle: an observed status change follows the forward-only edge table,
/// possibly through several edges.
pub fn assert_forward_progress(from: LaunchStatus, to: LaunchStatus) {
    assert!(
        reachable(from, to),
        "lifecycle invariant violated: status moved from {:?} to {:?}",
        from,
        to
    );
}

fn reachable(from: LaunchStatus, to: LaunchStatus) -> bool {
    const ALL: [LaunchStatus; 6] = [
        LaunchStatus::Open,
        LaunchStatus::ThresholdReached,
        LaunchStatus::Bootstrapping,
        LaunchStatus::Bootstrapped,
        LaunchStatus::Failed,
        LaunchStatus::Recovered,
    ];
    from == to
        || ALL
            .iter()
            .any(|&next| can_transition(from, next) && reachable(next, to))
}
