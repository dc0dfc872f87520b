//! # Signature Errors
//!
//! Error types for add-lock signature verification.

use crate::domain::entities::SignatureScheme;
use shared_types::Address;
use thiserror::Error;

/// Errors that can occur while verifying an add-lock authorization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, out-of-range scalar)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature verification failed (signature doesn't match message/signer)
    #[error("Signature verification failed")]
    VerificationFailed,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Public key bytes are not a point on the scheme's curve
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature kind cannot be checked under the requested scheme
    #[error("Scheme mismatch: {scheme} cannot verify a {signature} signature")]
    SchemeMismatch {
        scheme: SignatureScheme,
        signature: &'static str,
    },

    /// A message field does not fit the scheme's encoding width
    #[error("Message out of range: {0}")]
    MessageOutOfRange(String),

    /// Domain configuration cannot be encoded
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: Address, actual: Address },
}
