//! # Inbound Ports
//!
//! The operations a ledger transaction may invoke. One call is one
//! transaction: it either succeeds completely or changes nothing.

use crate::domain::{
    CommitRequest, HtlcError, HtlcRecord, LockRequest, RewardDetails, SecureSecret,
};
use async_trait::async_trait;
use shared_types::{Address, Hashlock, HtlcId, Timestamp};
use train_signatures::{AddLockMessage, AddLockSignature, SignatureScheme};

/// HTLC API - inbound port.
#[async_trait]
pub trait HtlcApi: Send + Sync {
    /// Create a pre-HTLC funded by `caller`.
    async fn commit(&self, caller: Address, req: CommitRequest) -> Result<HtlcRecord, HtlcError>;

    /// Create an HTLC with its hashlock (and optional reward) funded by `caller`.
    async fn lock(&self, caller: Address, req: LockRequest) -> Result<HtlcRecord, HtlcError>;

    /// Set the hashlock of a pre-HTLC as its sender.
    async fn add_lock(
        &self,
        caller: Address,
        id: HtlcId,
        hashlock: Hashlock,
        timelock: Timestamp,
    ) -> Result<HtlcRecord, HtlcError>;

    /// Set the hashlock of a pre-HTLC on the sender's signed authorization.
    async fn add_lock_sig(
        &self,
        message: AddLockMessage,
        scheme: SignatureScheme,
        signature: AddLockSignature,
    ) -> Result<HtlcRecord, HtlcError>;

    /// Reveal the secret and pay out. Anyone may submit.
    async fn redeem(&self, id: HtlcId, secret: SecureSecret) -> Result<HtlcRecord, HtlcError>;

    /// Return funds to the sender after the timelock. Anyone may submit.
    async fn refund(&self, id: HtlcId) -> Result<HtlcRecord, HtlcError>;

    /// Read a record.
    async fn get_details(&self, id: HtlcId) -> Result<HtlcRecord, HtlcError>;

    /// Read a record's reward.
    async fn get_reward_details(&self, id: HtlcId) -> Result<RewardDetails, HtlcError>;
}
