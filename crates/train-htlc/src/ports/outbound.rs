//! # Outbound Ports
//!
//! Collaborators the state machine is invoked through: keyed record
//! storage, funds custody and a clock.

use crate::domain::{Asset, EscrowError, HtlcError, HtlcRecord, Payout};
use shared_types::{Address, HtlcId, Timestamp};

/// Keyed HTLC storage with an atomic read-modify-write per id.
pub trait RecordStore: Send + Sync {
    /// Latest committed record.
    fn get(&self, id: &HtlcId) -> Option<HtlcRecord>;

    /// Whether any record (live or terminal) exists under `id`.
    fn contains(&self, id: &HtlcId) -> bool;

    /// Run `f` against the latest committed record and store its result.
    ///
    /// `f` runs under the store's per-key exclusion, so guards inside it
    /// always see the current state. If `f` fails nothing is written.
    ///
    /// A result whose `id` differs from `id` is rejected with
    /// `StoreError::IdMismatch` after `f` has returned, so `f` must check
    /// the id itself before any side effect such as an escrow call.
    fn transition<F>(&self, id: &HtlcId, f: F) -> Result<HtlcRecord, HtlcError>
    where
        F: FnOnce(Option<&HtlcRecord>) -> Result<HtlcRecord, HtlcError>;

    /// Number of records.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All ids, for audit listing.
    fn ids(&self) -> Vec<HtlcId>;
}

/// Funds custody for escrowed principal and rewards.
pub trait FundsEscrow: Send + Sync {
    /// Move `amount` of `asset` from `from` into custody.
    ///
    /// Balance and allowance are checked before anything moves.
    fn escrow(&self, from: &Address, asset: &Asset, amount: u128) -> Result<(), EscrowError>;

    /// Pay out of custody. The whole set is applied or none of it.
    fn release(&self, asset: &Asset, payouts: &[Payout]) -> Result<(), EscrowError>;
}

/// Abstract interface for time.
pub trait TimeSource: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> Timestamp;
}
