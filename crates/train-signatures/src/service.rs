//! # Signature Verification Service
//!
//! Implements `SignatureVerificationApi` by dispatching each scheme to its
//! domain module with the configured domain separators.

use crate::domain::entities::{
    AddLockMessage, AddLockSignature, SchemeDomains, SignatureScheme,
};
use crate::domain::errors::SignatureError;
use crate::domain::{eip712, intent, offchain, snip12};
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::Address;
use tracing::{debug, warn};

/// Multi-scheme add-lock verifier.
#[derive(Clone, Debug, Default)]
pub struct SignatureVerificationService {
    domains: SchemeDomains,
}

impl SignatureVerificationService {
    /// Create a verifier bound to `domains`.
    pub fn new(domains: SchemeDomains) -> Self {
        Self { domains }
    }

    /// Configured domains.
    pub fn domains(&self) -> &SchemeDomains {
        &self.domains
    }

    fn dispatch(
        &self,
        scheme: SignatureScheme,
        message: &AddLockMessage,
        signature: &AddLockSignature,
    ) -> Result<Address, SignatureError> {
        match (scheme, signature) {
            (SignatureScheme::Eip712, AddLockSignature::Ecdsa(sig)) => {
                eip712::recover(&self.domains.eip712, message, sig)
            }
            (SignatureScheme::Snip12, AddLockSignature::Stark(sig)) => {
                snip12::verify(&self.domains.snip12, message, sig)
            }
            (SignatureScheme::OffchainMessage, AddLockSignature::Ed25519(sig)) => {
                offchain::verify(&self.domains.offchain, message, sig)
            }
            (SignatureScheme::IntentBcs, AddLockSignature::Ed25519(sig)) => {
                intent::verify(message, sig)
            }
            (scheme, signature) => Err(SignatureError::SchemeMismatch {
                scheme,
                signature: signature.kind(),
            }),
        }
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn verify(
        &self,
        scheme: SignatureScheme,
        message: &AddLockMessage,
        signature: &AddLockSignature,
    ) -> Result<Address, SignatureError> {
        match self.dispatch(scheme, message, signature) {
            Ok(signer) => {
                debug!(
                    "[train-sig] {} signature for {} recovered {}",
                    scheme,
                    message.id.short(),
                    signer.short()
                );
                Ok(signer)
            }
            Err(e) => {
                warn!(
                    "[train-sig] {} signature for {} rejected: {}",
                    scheme,
                    message.id.short(),
                    e
                );
                Err(e)
            }
        }
    }
}
