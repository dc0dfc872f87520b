//! # Domain Layer
//!
//! Pure message construction and signature checks, one module per scheme.

pub mod ecdsa;
pub mod eip712;
pub mod entities;
pub mod errors;
pub mod intent;
pub mod offchain;
pub mod snip12;
