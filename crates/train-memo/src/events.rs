//! # Memo Events
//!
//! Protocol events as observed in OP_RETURN payloads. The payload length
//! alone selects the variant:
//!
//! | Length | Event | Layout |
//! |---|---|---|
//! | 32 | `Refund` | commit id |
//! | 70 | `AddLock` | commit id, hashlock, timelock (u48 BE) |
//! | 77 | `Lock` | lock id, hashlock, CSV delay (u40 BE), dst chain (4), dst asset (4) |
//! | 78 | `CommitLog` | commit id, timelock (u48 BE), dst chain (4), dst address (20), dst asset (4), src receiver (12) |
//! | 79 | `Redeem` | commit id prefix (15), hashlock, secret |

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Hashlock, HtlcId, Secret};

pub const REFUND_LEN: usize = 32;
pub const ADD_LOCK_LEN: usize = 70;
pub const LOCK_LEN: usize = 77;
pub const COMMIT_LOG_LEN: usize = 78;
pub const REDEEM_LEN: usize = 79;

/// Bytes of the commit id kept in a redeem memo.
pub const REDEEM_COMMIT_ID_LEN: usize = 15;
/// ASCII slot for chain and asset tickers.
pub const TICKER_LEN: usize = 4;
/// Destination address slot (EVM width).
pub const DST_ADDRESS_LEN: usize = 20;
/// ASCII slot for the source receiver.
pub const SRC_RECEIVER_LEN: usize = 12;

/// Width of timelock fields.
pub const TIMELOCK_BITS: u32 = 48;
/// Width of the CSV delay field.
pub const CSV_DELAY_BITS: u32 = 40;

/// A decoded memo payload.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MemoEvent {
    Refund {
        commit_id: HtlcId,
    },
    AddLock {
        commit_id: HtlcId,
        hashlock: Hashlock,
        timelock: u64,
    },
    Lock {
        lock_id: HtlcId,
        hashlock: Hashlock,
        delay_csv_seconds: u64,
        dst_chain: String,
        dst_asset: String,
    },
    CommitLog {
        commit_id: HtlcId,
        timelock: u64,
        dst_chain: String,
        #[serde_as(as = "Hex")]
        dst_address: [u8; DST_ADDRESS_LEN],
        dst_asset: String,
        src_receiver: String,
    },
    /// Only the first 15 bytes of the commit id survive.
    Redeem {
        #[serde_as(as = "Hex")]
        commit_id_prefix: [u8; REDEEM_COMMIT_ID_LEN],
        hashlock: Hashlock,
        #[serde_as(as = "Hex")]
        secret: Secret,
    },
    /// Payload that matched no layout.
    Unknown { raw_hex: String, note: String },
}

impl MemoEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            MemoEvent::Refund { .. } => "refund",
            MemoEvent::AddLock { .. } => "addLock",
            MemoEvent::Lock { .. } => "lock",
            MemoEvent::CommitLog { .. } => "commitLog",
            MemoEvent::Redeem { .. } => "redeem",
            MemoEvent::Unknown { .. } => "unknown",
        }
    }

    /// Encoded size, `None` for `Unknown`.
    pub fn payload_len(&self) -> Option<usize> {
        match self {
            MemoEvent::Refund { .. } => Some(REFUND_LEN),
            MemoEvent::AddLock { .. } => Some(ADD_LOCK_LEN),
            MemoEvent::Lock { .. } => Some(LOCK_LEN),
            MemoEvent::CommitLog { .. } => Some(COMMIT_LOG_LEN),
            MemoEvent::Redeem { .. } => Some(REDEEM_LEN),
            MemoEvent::Unknown { .. } => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, MemoEvent::Unknown { .. })
    }

    /// Whether a redeem memo may belong to `id`.
    ///
    /// A prefix match is all the memo can prove.
    pub fn redeem_matches(&self, id: &HtlcId) -> bool {
        match self {
            MemoEvent::Redeem {
                commit_id_prefix, ..
            } => id.as_bytes()[..REDEEM_COMMIT_ID_LEN] == commit_id_prefix[..],
            _ => false,
        }
    }
}
