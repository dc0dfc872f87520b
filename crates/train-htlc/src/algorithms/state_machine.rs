//! # HTLC Transitions
//!
//! Pure transition functions. Each takes the latest committed record and
//! returns the replacement record plus any payouts; nothing here touches
//! storage or funds.
//!
//! ```text
//! commit ──► Open (pre-HTLC) ──addLock/addLockSig──► Open (hashlock set)
//! lock   ─────────────────────────────────────────►  Open (hashlock set)
//!                        Open ──redeem──► Redeemed
//!                        Open ──refund──► Refunded
//! ```

use crate::domain::{
    invariant_authorized_sender, invariant_funds_sent, invariant_hashlock_supplied,
    invariant_hashlock_unset, invariant_open, invariant_reward_window, invariant_secret_matches,
    invariant_timelock_horizon, invariant_timelock_passed, ClaimState, CommitRequest, HtlcConfig,
    HtlcError, HtlcRecord, LockRequest, Payout,
};
use shared_types::{Address, Hashlock, Secret, Timestamp};

/// Build the pre-HTLC for `commit`.
pub fn commit(
    sender: Address,
    req: CommitRequest,
    now: Timestamp,
    config: &HtlcConfig,
) -> Result<HtlcRecord, HtlcError> {
    invariant_funds_sent(req.amount)?;
    invariant_timelock_horizon(req.timelock, now, config.commit_min_horizon_secs)?;
    Ok(HtlcRecord::pre_htlc(sender, req))
}

/// Build the HTLC for `lock`.
pub fn lock(
    sender: Address,
    req: LockRequest,
    now: Timestamp,
    config: &HtlcConfig,
) -> Result<HtlcRecord, HtlcError> {
    invariant_funds_sent(req.amount)?;
    invariant_hashlock_supplied(&req.hashlock)?;
    invariant_timelock_horizon(req.timelock, now, config.lock_min_horizon_secs)?;
    invariant_reward_window(req.reward, req.reward_timelock, req.timelock, now)?;

    let record = HtlcRecord::locked(sender, req);
    record.escrowed().ok_or(HtlcError::AmountOverflow)?;
    Ok(record)
}

/// Guards shared by `addLock` and `addLockSig`, after authorization.
fn check_add_lock(
    record: &HtlcRecord,
    hashlock: &Hashlock,
    timelock: Timestamp,
    now: Timestamp,
    config: &HtlcConfig,
) -> Result<(), HtlcError> {
    invariant_open(record)?;
    invariant_hashlock_unset(record)?;
    invariant_hashlock_supplied(hashlock)?;
    invariant_timelock_horizon(timelock, now, config.add_lock_min_horizon_secs)
}

fn with_hashlock(record: &HtlcRecord, hashlock: Hashlock, timelock: Timestamp) -> HtlcRecord {
    let mut next = record.clone();
    next.hashlock = hashlock;
    next.timelock = timelock;
    next
}

/// `addLock` by `caller`.
pub fn add_lock(
    record: &HtlcRecord,
    caller: &Address,
    hashlock: Hashlock,
    timelock: Timestamp,
    now: Timestamp,
    config: &HtlcConfig,
) -> Result<HtlcRecord, HtlcError> {
    invariant_authorized_sender(record, caller)?;
    check_add_lock(record, &hashlock, timelock, now, config)?;
    Ok(with_hashlock(record, hashlock, timelock))
}

/// `addLockSig`. `authorize` checks the signature against the recorded
/// sender and runs after the state guards.
pub fn add_lock_signed<F>(
    record: &HtlcRecord,
    hashlock: Hashlock,
    timelock: Timestamp,
    now: Timestamp,
    config: &HtlcConfig,
    authorize: F,
) -> Result<HtlcRecord, HtlcError>
where
    F: FnOnce(&Address) -> Result<(), HtlcError>,
{
    check_add_lock(record, &hashlock, timelock, now, config)?;
    authorize(&record.sender)?;
    Ok(with_hashlock(record, hashlock, timelock))
}

/// Who gets what on redeem.
///
/// Before `reward_timelock` the reward goes back to the sender and the
/// receiver gets the principal. From `reward_timelock` on, the receiver
/// gets both.
pub fn redeem_payouts(record: &HtlcRecord, now: Timestamp) -> Result<Vec<Payout>, HtlcError> {
    if record.reward > 0 && now < record.reward_timelock {
        return Ok(vec![
            Payout::new(record.sender, record.reward),
            Payout::new(record.src_receiver, record.amount),
        ]);
    }
    let total = record.escrowed().ok_or(HtlcError::AmountOverflow)?;
    Ok(vec![Payout::new(record.src_receiver, total)])
}

/// `redeem` with `secret`.
pub fn redeem(
    record: &HtlcRecord,
    secret: &Secret,
    now: Timestamp,
) -> Result<(HtlcRecord, Vec<Payout>), HtlcError> {
    invariant_open(record)?;
    invariant_secret_matches(record, secret)?;

    let payouts = redeem_payouts(record, now)?;
    let mut next = record.clone();
    next.secret = *secret;
    next.claim_state = ClaimState::Redeemed;
    Ok((next, payouts))
}

/// `refund` after the timelock.
pub fn refund(
    record: &HtlcRecord,
    now: Timestamp,
) -> Result<(HtlcRecord, Vec<Payout>), HtlcError> {
    invariant_open(record)?;
    invariant_timelock_passed(record, now)?;

    let total = record.escrowed().ok_or(HtlcError::AmountOverflow)?;
    let mut next = record.clone();
    next.claim_state = ClaimState::Refunded;
    Ok((next, vec![Payout::new(record.sender, total)]))
}
