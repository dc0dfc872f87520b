//! # Domain Errors
//!
//! Every guard failure aborts the whole operation: no record is written and
//! no funds move.

use super::value_objects::ClaimState;
use shared_types::{HtlcId, Timestamp};
use thiserror::Error;
use train_signatures::SignatureError;

/// HTLC state machine errors.
#[derive(Debug, Error)]
pub enum HtlcError {
    /// A record already exists under this id.
    #[error("HTLC id already exists: {0}")]
    IdExists(HtlcId),

    /// No record under this id.
    #[error("HTLC not found: {0}")]
    NotFound(HtlcId),

    /// Zero amount at creation.
    #[error("Funds not sent")]
    FundsNotSent,

    /// Caller balance cannot cover the escrow.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the escrow needs
        required: u128,
        /// Caller balance
        available: u128,
    },

    /// Token allowance toward the contract is too small.
    #[error("No allowance: required {required}, allowed {allowed}")]
    NoAllowance {
        /// Amount the escrow needs
        required: u128,
        /// Current allowance
        allowed: u128,
    },

    /// Timelock is closer than the minimum horizon.
    #[error("Invalid timelock: {timelock} is before {earliest}")]
    InvalidTimelock {
        /// Requested timelock
        timelock: Timestamp,
        /// Earliest acceptable timelock
        earliest: Timestamp,
    },

    /// Reward timelock is not strictly between now and the timelock.
    #[error("Invalid reward timelock: {reward_timelock} not in ({now}, {timelock})")]
    InvalidRewardTimelock {
        /// Requested reward timelock
        reward_timelock: Timestamp,
        /// HTLC timelock
        timelock: Timestamp,
        /// Current time
        now: Timestamp,
    },

    /// The all-zero hashlock was supplied where a commitment is required.
    #[error("Invalid hashlock: the zero hashlock is reserved")]
    InvalidHashlock,

    /// Hashlock can only be set once.
    #[error("Hashlock already set")]
    HashlockAlreadySet,

    /// Redeem attempted on a pre-HTLC.
    #[error("Hashlock not set")]
    HashlockNotSet,

    /// Record is Redeemed or Refunded.
    #[error("HTLC already claimed: {0:?}")]
    AlreadyClaimed(ClaimState),

    /// Caller is not the recorded sender.
    #[error("Not authorized")]
    NotAuthorized,

    /// Refund attempted at or before the timelock.
    #[error("Timelock not passed: now {now}, timelock {timelock}")]
    NotPassedTimelock {
        /// HTLC timelock
        timelock: Timestamp,
        /// Current time
        now: Timestamp,
    },

    /// Secret does not hash to the hashlock.
    #[error("Hashlock does not match")]
    HashlockNotMatch,

    /// Add-lock signature failed verification or came from someone else.
    #[error("Invalid signature")]
    InvalidSignature(#[source] SignatureError),

    /// Destination leg outlives the source leg.
    #[error("Invalid timelock ordering: destination {destination} > source {source_timelock}")]
    InvalidTimelockOrdering {
        /// Source leg timelock
        source_timelock: Timestamp,
        /// Destination leg timelock
        destination: Timestamp,
    },

    /// `amount + reward` does not fit.
    #[error("Amount overflow")]
    AmountOverflow,

    /// Record store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Escrow failure other than the caller-side funding checks.
    #[error("Escrow error: {0}")]
    Escrow(EscrowError),
}

/// Record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A transition tried to write a record under a different id.
    #[error("Record id mismatch: stored under {expected}, record says {actual}")]
    IdMismatch {
        /// Key of the transition
        expected: HtlcId,
        /// Id inside the produced record
        actual: HtlcId,
    },
}

/// Funds custody errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Depositor balance too low.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested
        required: u128,
        /// Balance available
        available: u128,
    },

    /// Token allowance too low.
    #[error("Insufficient allowance: required {required}, allowed {allowed}")]
    InsufficientAllowance {
        /// Amount requested
        required: u128,
        /// Allowance available
        allowed: u128,
    },

    /// Custody holds less than the payout set.
    #[error("Custody shortfall: required {required}, held {held}")]
    CustodyShortfall {
        /// Payout total
        required: u128,
        /// Custody balance
        held: u128,
    },

    /// Balance arithmetic overflowed.
    #[error("Balance overflow")]
    Overflow,
}

impl From<EscrowError> for HtlcError {
    fn from(err: EscrowError) -> Self {
        match err {
            EscrowError::InsufficientBalance {
                required,
                available,
            } => HtlcError::InsufficientFunds {
                required,
                available,
            },
            EscrowError::InsufficientAllowance { required, allowed } => {
                HtlcError::NoAllowance { required, allowed }
            }
            other => HtlcError::Escrow(other),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A minimum horizon of zero would accept already-expired timelocks.
    #[error("Minimum horizon must be non-zero: {0}")]
    ZeroHorizon(&'static str),
}
