//! # Adapters
//!
//! In-memory implementations of the outbound ports, shared by hosts that
//! simulate a ledger and by tests.

pub mod clock;
pub mod escrow;
pub mod memory_store;

pub use clock::{ManualClock, SystemTimeSource};
pub use escrow::InMemoryEscrow;
pub use memory_store::InMemoryRecordStore;
