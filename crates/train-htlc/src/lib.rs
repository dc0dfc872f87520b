//! # Train HTLC
//!
//! Hashed-timelock escrow for one leg of a cross-chain swap. A sender
//! escrows funds under a `(hashlock, timelock)` pair; whoever reveals the
//! preimage before anyone refunds pays the receiver, and after the
//! timelock anyone may return the funds to the sender.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): records, guards, errors, configuration
//! - **Algorithms** (`algorithms/`): pure transitions and secret handling
//! - **Ports Layer** (`ports/`): `HtlcApi` inbound; store, escrow and clock outbound
//! - **Adapters** (`adapters/`): in-memory store, ledger escrow, clocks
//! - **Service Layer** (`service.rs`): one atomic store transition per call
//!
//! ## Lifecycle
//!
//! | Operation | From | To | Funds |
//! |---|---|---|---|
//! | `commit` | absent | Open, no hashlock | `amount` in |
//! | `lock` | absent | Open, hashlock set | `amount + reward` in |
//! | `add_lock` / `add_lock_sig` | Open, no hashlock | Open, hashlock set | none |
//! | `redeem` | Open, hashlock set | Redeemed | to receiver (reward split by time) |
//! | `refund` | Open, past timelock | Refunded | all to sender |
//!
//! Ids are never reused: terminal records stay readable and block a new
//! `commit` or `lock` under the same id.

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryEscrow, InMemoryRecordStore, ManualClock, SystemTimeSource};
pub use algorithms::{generate_random_secret, new_secret_pair, verify_secret};
pub use domain::{
    Asset, ClaimState, CommitRequest, ConfigError, EscrowError, Hop, HtlcConfig, HtlcError,
    HtlcRecord, LockRequest, Payout, RewardDetails, Routing, SecureSecret, StoreError,
};
pub use ports::{FundsEscrow, HtlcApi, RecordStore, TimeSource};
pub use service::HtlcService;
