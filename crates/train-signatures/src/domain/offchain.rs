//! # Offchain Message (ed25519)
//!
//! The triple is hashed, `h = sha256(Id ‖ hashlock ‖ timelock_le_u64)`, and
//! wrapped in the offchain-message preamble:
//!
//! ```text
//! "\xffsolana offchain" ‖ version(0) ‖ app_domain[32] ‖ format(0) ‖ signers(1)
//!     ‖ signer_pubkey[32] ‖ len_le_u16(32) ‖ h
//! ```
//!
//! Wallets sign the lowercase hex text of that preamble, as UTF-8 bytes,
//! not the preamble itself.

use super::entities::{AddLockMessage, Ed25519Signature, OffchainDomain};
use super::errors::SignatureError;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use shared_types::{Address, Hash};

const SIGNING_DOMAIN: &[u8; 16] = b"\xffsolana offchain";
const HEADER_VERSION: u8 = 0;
const MESSAGE_FORMAT: u8 = 0;
const SIGNER_COUNT: u8 = 1;

/// `sha256(Id ‖ hashlock ‖ timelock_le_u64)`.
pub fn message_hash(message: &AddLockMessage) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(message.id.as_bytes());
    hasher.update(message.hashlock.as_bytes());
    hasher.update(message.timelock.to_le_bytes());
    hasher.finalize().into()
}

fn application_domain(domain: &OffchainDomain) -> Result<[u8; 32], SignatureError> {
    let name = domain.application_domain.as_bytes();
    if name.len() > 32 {
        return Err(SignatureError::InvalidDomain(format!(
            "application domain longer than 32 bytes: {}",
            domain.application_domain
        )));
    }
    let mut padded = [0u8; 32];
    padded[..name.len()].copy_from_slice(name);
    Ok(padded)
}

/// The binary preamble for `signer`.
pub fn preamble(
    domain: &OffchainDomain,
    signer: &[u8; 32],
    message: &AddLockMessage,
) -> Result<Vec<u8>, SignatureError> {
    let hash = message_hash(message);

    let mut raw = Vec::with_capacity(16 + 1 + 32 + 1 + 1 + 32 + 2 + 32);
    raw.extend_from_slice(SIGNING_DOMAIN);
    raw.push(HEADER_VERSION);
    raw.extend_from_slice(&application_domain(domain)?);
    raw.push(MESSAGE_FORMAT);
    raw.push(SIGNER_COUNT);
    raw.extend_from_slice(signer);
    raw.extend_from_slice(&(hash.len() as u16).to_le_bytes());
    raw.extend_from_slice(&hash);
    Ok(raw)
}

/// Bytes handed to the ed25519 signer: hex text of the preamble.
pub fn signing_bytes(
    domain: &OffchainDomain,
    signer: &[u8; 32],
    message: &AddLockMessage,
) -> Result<Vec<u8>, SignatureError> {
    Ok(hex::encode(preamble(domain, signer, message)?).into_bytes())
}

/// Verify and return the signer's public key as its address.
pub fn verify(
    domain: &OffchainDomain,
    message: &AddLockMessage,
    signature: &Ed25519Signature,
) -> Result<Address, SignatureError> {
    let verifying_key = VerifyingKey::from_bytes(&signature.public_key)
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let sig = Signature::from_bytes(&signature.signature);

    let bytes = signing_bytes(domain, &signature.public_key, message)?;
    verifying_key
        .verify(&bytes, &sig)
        .map_err(|_| SignatureError::VerificationFailed)?;

    Ok(Address::new(signature.public_key))
}
