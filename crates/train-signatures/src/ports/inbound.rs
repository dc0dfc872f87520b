//! # Inbound Ports (Driving Ports / API)
//!
//! The verifier consulted by `addLockSig`.

use crate::domain::entities::{AddLockMessage, AddLockSignature, SignatureScheme};
use crate::domain::errors::SignatureError;
use shared_types::Address;

/// Add-lock signature verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Verify `signature` over `message` under `scheme` and return the signer.
    ///
    /// # Errors
    /// - `SchemeMismatch` if the signature kind does not belong to `scheme`
    /// - any scheme-specific format or verification failure
    fn verify(
        &self,
        scheme: SignatureScheme,
        message: &AddLockMessage,
        signature: &AddLockSignature,
    ) -> Result<Address, SignatureError>;

    /// Verify and require the signer to be `expected`.
    fn verify_signer(
        &self,
        scheme: SignatureScheme,
        message: &AddLockMessage,
        signature: &AddLockSignature,
        expected: &Address,
    ) -> Result<(), SignatureError> {
        let actual = self.verify(scheme, message, signature)?;
        if actual != *expected {
            return Err(SignatureError::SignerMismatch {
                expected: *expected,
                actual,
            });
        }
        Ok(())
    }
}
