//! # Domain Entities
//!
//! The HTLC record, creation parameters and configuration.

use super::errors::ConfigError;
use super::value_objects::{Asset, ClaimState, Routing};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, Hashlock, HtlcId, Secret, Timestamp, EMPTY_SECRET};
use tracing::warn;

/// One HTLC, keyed by `id`.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcRecord {
    pub id: HtlcId,
    /// Funded the swap; authority for `addLock`, recipient of refunds.
    pub sender: Address,
    /// Entitled to the redeemed amount.
    pub src_receiver: Address,
    /// Principal, excluding `reward`.
    pub amount: u128,
    pub asset: Asset,
    /// `Hashlock::SENTINEL` until set.
    pub hashlock: Hashlock,
    /// `EMPTY_SECRET` until redeemed.
    #[serde_as(as = "Hex")]
    pub secret: Secret,
    pub timelock: Timestamp,
    pub reward: u128,
    /// Zero when `reward` is zero.
    pub reward_timelock: Timestamp,
    pub claim_state: ClaimState,
    pub routing: Routing,
}

impl HtlcRecord {
    /// Whether this is still a pre-HTLC.
    pub fn is_pre_htlc(&self) -> bool {
        !self.hashlock.is_set()
    }

    /// Total held in custody for this record.
    pub fn escrowed(&self) -> Option<u128> {
        self.amount.checked_add(self.reward)
    }

    pub fn reward_details(&self) -> RewardDetails {
        RewardDetails {
            amount: self.reward,
            timelock: self.reward_timelock,
        }
    }
}

/// Reward attached to a lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDetails {
    pub amount: u128,
    pub timelock: Timestamp,
}

/// Parameters for `commit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub id: HtlcId,
    pub src_receiver: Address,
    pub amount: u128,
    pub asset: Asset,
    pub timelock: Timestamp,
    #[serde(default)]
    pub routing: Routing,
}

/// Parameters for `lock`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRequest {
    pub id: HtlcId,
    pub hashlock: Hashlock,
    pub src_receiver: Address,
    pub amount: u128,
    pub asset: Asset,
    pub timelock: Timestamp,
    #[serde(default)]
    pub reward: u128,
    #[serde(default)]
    pub reward_timelock: Timestamp,
    #[serde(default)]
    pub routing: Routing,
}

impl HtlcRecord {
    /// A pre-HTLC: no hashlock, no reward.
    pub fn pre_htlc(sender: Address, req: CommitRequest) -> Self {
        Self {
            id: req.id,
            sender,
            src_receiver: req.src_receiver,
            amount: req.amount,
            asset: req.asset,
            hashlock: Hashlock::SENTINEL,
            secret: EMPTY_SECRET,
            timelock: req.timelock,
            reward: 0,
            reward_timelock: 0,
            claim_state: ClaimState::Open,
            routing: req.routing,
        }
    }

    /// A locked HTLC. `reward_timelock` is dropped when there is no reward.
    pub fn locked(sender: Address, req: LockRequest) -> Self {
        let reward_timelock = if req.reward == 0 {
            0
        } else {
            req.reward_timelock
        };
        Self {
            id: req.id,
            sender,
            src_receiver: req.src_receiver,
            amount: req.amount,
            asset: req.asset,
            hashlock: req.hashlock,
            secret: EMPTY_SECRET,
            timelock: req.timelock,
            reward: req.reward,
            reward_timelock,
            claim_state: ClaimState::Open,
            routing: req.routing,
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable overriding `commit_min_horizon_secs`.
pub const ENV_COMMIT_MIN_HORIZON: &str = "TRAIN_COMMIT_MIN_HORIZON_SECS";
/// Environment variable overriding `add_lock_min_horizon_secs`.
pub const ENV_ADD_LOCK_MIN_HORIZON: &str = "TRAIN_ADD_LOCK_MIN_HORIZON_SECS";
/// Environment variable overriding `lock_min_horizon_secs`.
pub const ENV_LOCK_MIN_HORIZON: &str = "TRAIN_LOCK_MIN_HORIZON_SECS";

/// Minimum distance between now and a new timelock, per operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcConfig {
    pub commit_min_horizon_secs: u64,
    pub add_lock_min_horizon_secs: u64,
    pub lock_min_horizon_secs: u64,
}

impl Default for HtlcConfig {
    fn default() -> Self {
        Self {
            commit_min_horizon_secs: 900,   // 15 minutes
            add_lock_min_horizon_secs: 900, // 15 minutes
            lock_min_horizon_secs: 1800,    // 30 minutes
        }
    }
}

impl HtlcConfig {
    /// Defaults overridden from the environment. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        for (key, slot) in [
            (ENV_COMMIT_MIN_HORIZON, &mut config.commit_min_horizon_secs),
            (ENV_ADD_LOCK_MIN_HORIZON, &mut config.add_lock_min_horizon_secs),
            (ENV_LOCK_MIN_HORIZON, &mut config.lock_min_horizon_secs),
        ] {
            if let Ok(val) = std::env::var(key) {
                match val.parse() {
                    Ok(secs) => *slot = secs,
                    Err(_) => warn!("[train-htlc] ignoring {}={:?}: not a number", key, val),
                }
            }
        }

        config
    }

    /// Reject zero horizons.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commit_min_horizon_secs == 0 {
            return Err(ConfigError::ZeroHorizon("commit"));
        }
        if self.add_lock_min_horizon_secs == 0 {
            return Err(ConfigError::ZeroHorizon("add_lock"));
        }
        if self.lock_min_horizon_secs == 0 {
            return Err(ConfigError::ZeroHorizon("lock"));
        }
        Ok(())
    }
}
