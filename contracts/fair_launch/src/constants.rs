//! Launch parameters, fixed at compile time.
//!
//! Paired-asset amounts are expressed in 7-decimal base units, the precision
//! of Stellar assets. VOTS amounts are whole launch-token units.

/// One ETH-equivalent of the paired asset.
pub const ETH_UNIT: i128 = 10_000_000;

/// Length of the contribution window: 7 days, in seconds.
pub const FAIR_LAUNCH_DURATION: u64 = 7 * 24 * 60 * 60;

/// Aggregate contributions at which the window is thresholded.
pub const MIN_ETH_THRESHOLD: i128 = ETH_UNIT;

/// Observed trade volume at which the window is thresholded.
pub const BOOTSTRAP_VOLUME_THRESHOLD: i128 = ETH_UNIT / 10;

/// Launch tokens seeded into the pool, and distributed pro rata to contributors.
pub const INITIAL_LIQUIDITY_VOTS: i128 = 1_000_000;

/// Floor on the paired-asset side of the initial pool.
pub const INITIAL_LIQUIDITY_ETH_MIN: i128 = ETH_UNIT;
