//! # Shared Types Crate
//!
//! Protocol primitives used by every Train crate.
//!
//! ## Design Principles
//!
//! - **Chain-neutral encoding**: identifiers, hashlocks and addresses are
//!   fixed 32-byte values. Chains with shorter native addresses (20-byte
//!   EVM accounts) are left-padded, the same way ABI encoding does it.
//! - **Explicit sentinels**: "no hashlock yet" and "no secret yet" are the
//!   all-zero value, never an `Option` that a chain could not store.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
