//! # Algorithms Module
//!
//! Secret handling and the pure HTLC transition functions.

pub mod secret;
pub mod state_machine;

pub use secret::{generate_random_secret, new_secret_pair, verify_secret};
