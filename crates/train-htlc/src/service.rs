//! # HTLC Service
//!
//! Implements `HtlcApi` over the outbound ports. Every mutating operation
//! is one `RecordStore::transition`: the guards, the escrow movement and
//! the record write happen together under the store's per-key exclusion,
//! so a failed guard or a failed escrow leaves both state and funds as
//! they were.

use crate::algorithms::state_machine;
use crate::domain::{
    invariant_hashlock_match, invariant_timelock_ordering, CommitRequest, ConfigError,
    HtlcConfig, HtlcError, HtlcRecord, LockRequest, RewardDetails, SecureSecret, StoreError,
};
use crate::ports::inbound::HtlcApi;
use crate::ports::outbound::{FundsEscrow, RecordStore, TimeSource};
use async_trait::async_trait;
use shared_types::{Address, Hashlock, HtlcId, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};
use train_signatures::{
    AddLockMessage, AddLockSignature, SignatureScheme, SignatureVerificationApi,
};

/// HTLC state machine bound to a store, an escrow, a clock and a verifier.
pub struct HtlcService<S: RecordStore, E: FundsEscrow, C: TimeSource> {
    store: Arc<S>,
    escrow: Arc<E>,
    clock: Arc<C>,
    verifier: Arc<dyn SignatureVerificationApi>,
    config: HtlcConfig,
}

impl<S: RecordStore, E: FundsEscrow, C: TimeSource> HtlcService<S, E, C> {
    /// Create a service. Fails if `config` has a zero horizon.
    pub fn new(
        store: Arc<S>,
        escrow: Arc<E>,
        clock: Arc<C>,
        verifier: Arc<dyn SignatureVerificationApi>,
        config: HtlcConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            escrow,
            clock,
            verifier,
            config,
        })
    }

    pub fn config(&self) -> &HtlcConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Check that `destination` may be locked against `source`.
    ///
    /// Both legs must share the hashlock, and the destination must expire
    /// no later than the source.
    pub fn latest_timelock_ordering(
        &self,
        source: &HtlcRecord,
        destination: &HtlcRecord,
    ) -> Result<(), HtlcError> {
        if !invariant_hashlock_match(&source.hashlock, &destination.hashlock) {
            return Err(HtlcError::HashlockNotMatch);
        }
        invariant_timelock_ordering(source.timelock, destination.timelock)
    }

    fn existing(record: Option<&HtlcRecord>, id: HtlcId) -> Result<&HtlcRecord, HtlcError> {
        record.ok_or(HtlcError::NotFound(id))
    }
}

/// Reject a next state keyed under another id. Runs before any escrow call.
fn keyed(id: &HtlcId, next: HtlcRecord) -> Result<HtlcRecord, HtlcError> {
    if next.id != *id {
        return Err(StoreError::IdMismatch {
            expected: *id,
            actual: next.id,
        }
        .into());
    }
    Ok(next)
}

fn log_outcome(op: &str, id: &HtlcId, result: &Result<HtlcRecord, HtlcError>) {
    match result {
        Ok(record) => info!(
            "[train-htlc] {} {} ok ({:?})",
            op,
            id.short(),
            record.claim_state
        ),
        Err(e @ (HtlcError::NotAuthorized | HtlcError::InvalidSignature(_))) => {
            warn!("[train-htlc] {} {} rejected: {}", op, id.short(), e)
        }
        Err(e) => debug!("[train-htlc] {} {} failed: {}", op, id.short(), e),
    }
}

#[async_trait]
impl<S: RecordStore, E: FundsEscrow, C: TimeSource> HtlcApi for HtlcService<S, E, C> {
    async fn commit(&self, caller: Address, req: CommitRequest) -> Result<HtlcRecord, HtlcError> {
        let id = req.id;
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            if existing.is_some() {
                return Err(HtlcError::IdExists(id));
            }
            let record = keyed(&id, state_machine::commit(caller, req, now, &self.config)?)?;
            self.escrow.escrow(&caller, &record.asset, record.amount)?;
            Ok(record)
        });

        log_outcome("commit", &id, &result);
        result
    }

    async fn lock(&self, caller: Address, req: LockRequest) -> Result<HtlcRecord, HtlcError> {
        let id = req.id;
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            if existing.is_some() {
                return Err(HtlcError::IdExists(id));
            }
            let record = keyed(&id, state_machine::lock(caller, req, now, &self.config)?)?;
            let total = record.escrowed().ok_or(HtlcError::AmountOverflow)?;
            self.escrow.escrow(&caller, &record.asset, total)?;
            Ok(record)
        });

        log_outcome("lock", &id, &result);
        result
    }

    async fn add_lock(
        &self,
        caller: Address,
        id: HtlcId,
        hashlock: Hashlock,
        timelock: Timestamp,
    ) -> Result<HtlcRecord, HtlcError> {
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            let record = Self::existing(existing, id)?;
            state_machine::add_lock(record, &caller, hashlock, timelock, now, &self.config)
        });

        log_outcome("addLock", &id, &result);
        result
    }

    async fn add_lock_sig(
        &self,
        message: AddLockMessage,
        scheme: SignatureScheme,
        signature: AddLockSignature,
    ) -> Result<HtlcRecord, HtlcError> {
        let id = message.id;
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            let record = Self::existing(existing, id)?;
            state_machine::add_lock_signed(
                record,
                message.hashlock,
                message.timelock,
                now,
                &self.config,
                |sender| {
                    self.verifier
                        .verify_signer(scheme, &message, &signature, sender)
                        .map_err(HtlcError::InvalidSignature)
                },
            )
        });

        log_outcome("addLockSig", &id, &result);
        result
    }

    async fn redeem(&self, id: HtlcId, secret: SecureSecret) -> Result<HtlcRecord, HtlcError> {
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            let record = Self::existing(existing, id)?;
            let (next, payouts) = state_machine::redeem(record, secret.as_bytes(), now)?;
            let next = keyed(&id, next)?;
            self.escrow.release(&record.asset, &payouts)?;
            Ok(next)
        });

        log_outcome("redeem", &id, &result);
        result
    }

    async fn refund(&self, id: HtlcId) -> Result<HtlcRecord, HtlcError> {
        let now = self.clock.now();

        let result = self.store.transition(&id, |existing| {
            let record = Self::existing(existing, id)?;
            let (next, payouts) = state_machine::refund(record, now)?;
            let next = keyed(&id, next)?;
            self.escrow.release(&record.asset, &payouts)?;
            Ok(next)
        });

        log_outcome("refund", &id, &result);
        result
    }

    async fn get_details(&self, id: HtlcId) -> Result<HtlcRecord, HtlcError> {
        debug!("[train-htlc] getDetails {}", id.short());
        self.store.get(&id).ok_or(HtlcError::NotFound(id))
    }

    async fn get_reward_details(&self, id: HtlcId) -> Result<RewardDetails, HtlcError> {
        debug!("[train-htlc] getRewardDetails {}", id.short());
        self.store
            .get(&id)
            .map(|record| record.reward_details())
            .ok_or(HtlcError::NotFound(id))
    }
}
