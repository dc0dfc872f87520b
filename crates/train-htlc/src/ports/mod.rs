//! # Ports Module

pub mod inbound;
pub mod outbound;

pub use inbound::HtlcApi;
pub use outbound::{FundsEscrow, RecordStore, TimeSource};
