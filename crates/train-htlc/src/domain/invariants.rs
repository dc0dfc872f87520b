//! # Domain Invariants
//!
//! Guard predicates shared by every transition. Each returns the error the
//! caller sees when the guard fails.

use super::entities::HtlcRecord;
use super::errors::HtlcError;
use super::value_objects::ClaimState;
use shared_types::{Address, Hashlock, Secret, Timestamp};

/// Invariant: timelock at creation is at least `now + horizon`.
pub fn invariant_timelock_horizon(
    timelock: Timestamp,
    now: Timestamp,
    horizon_secs: u64,
) -> Result<(), HtlcError> {
    let earliest = now.saturating_add(horizon_secs);
    if timelock < earliest {
        return Err(HtlcError::InvalidTimelock { timelock, earliest });
    }
    Ok(())
}

/// Invariant: a non-zero reward needs `now < reward_timelock < timelock`.
pub fn invariant_reward_window(
    reward: u128,
    reward_timelock: Timestamp,
    timelock: Timestamp,
    now: Timestamp,
) -> Result<(), HtlcError> {
    if reward == 0 {
        return Ok(());
    }
    if reward_timelock <= now || reward_timelock >= timelock {
        return Err(HtlcError::InvalidRewardTimelock {
            reward_timelock,
            timelock,
            now,
        });
    }
    Ok(())
}

/// Invariant: amount > 0 at creation.
pub fn invariant_funds_sent(amount: u128) -> Result<(), HtlcError> {
    if amount == 0 {
        return Err(HtlcError::FundsNotSent);
    }
    Ok(())
}

/// Invariant: a supplied hashlock is a real commitment.
pub fn invariant_hashlock_supplied(hashlock: &Hashlock) -> Result<(), HtlcError> {
    if !hashlock.is_set() {
        return Err(HtlcError::InvalidHashlock);
    }
    Ok(())
}

/// Invariant: only Open records transition.
pub fn invariant_open(record: &HtlcRecord) -> Result<(), HtlcError> {
    if record.claim_state != ClaimState::Open {
        return Err(HtlcError::AlreadyClaimed(record.claim_state));
    }
    Ok(())
}

/// Invariant: the hashlock is set exactly once.
pub fn invariant_hashlock_unset(record: &HtlcRecord) -> Result<(), HtlcError> {
    if record.hashlock.is_set() {
        return Err(HtlcError::HashlockAlreadySet);
    }
    Ok(())
}

/// Invariant: `sha256(secret) == hashlock`, and the hashlock exists.
pub fn invariant_secret_matches(record: &HtlcRecord, secret: &Secret) -> Result<(), HtlcError> {
    if !record.hashlock.is_set() {
        return Err(HtlcError::HashlockNotSet);
    }
    if !record.hashlock.matches(secret) {
        return Err(HtlcError::HashlockNotMatch);
    }
    Ok(())
}

/// Invariant: refunds only strictly after the timelock.
pub fn invariant_timelock_passed(record: &HtlcRecord, now: Timestamp) -> Result<(), HtlcError> {
    if now <= record.timelock {
        return Err(HtlcError::NotPassedTimelock {
            timelock: record.timelock,
            now,
        });
    }
    Ok(())
}

/// Invariant: only the recorded sender may set the hashlock directly.
pub fn invariant_authorized_sender(record: &HtlcRecord, caller: &Address) -> Result<(), HtlcError> {
    if record.sender != *caller {
        return Err(HtlcError::NotAuthorized);
    }
    Ok(())
}

/// Invariant: timelock ordering between the two legs of a swap.
///
/// The destination leg must expire no later than the source leg, so a
/// secret revealed on the destination can still redeem the source.
pub fn invariant_timelock_ordering(
    source_timelock: Timestamp,
    destination_timelock: Timestamp,
) -> Result<(), HtlcError> {
    if destination_timelock > source_timelock {
        return Err(HtlcError::InvalidTimelockOrdering {
            source_timelock,
            destination: destination_timelock,
        });
    }
    Ok(())
}

/// Invariant: both legs commit to the same secret.
pub fn invariant_hashlock_match(source: &Hashlock, destination: &Hashlock) -> bool {
    source.is_set() && source == destination
}
