//! # Intent-Scoped BCS (ed25519)
//!
//! ```text
//! struct AddLockMessage { htlc_id: u256, hashlock: vector<u8>, timelock: u64 }
//! digest = sha256([3, 0, 0] ‖ bcs(AddLockMessage))
//! ```
//!
//! The intent header is scope `PersonalMessage` (3), version 0, app id 0.
//! The ed25519 signature covers the 32-byte digest.

use super::entities::{AddLockMessage, Ed25519Signature};
use super::errors::SignatureError;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use shared_types::{Address, Hash};

const INTENT_PERSONAL_MESSAGE: [u8; 3] = [3, 0, 0];

fn write_uleb128(out: &mut Vec<u8>, mut value: usize) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// BCS encoding of the message struct.
pub fn bcs_encode(message: &AddLockMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + 1 + 32 + 8);

    // u256 is little-endian in BCS; HtlcId holds it big-endian
    let mut id = *message.id.as_bytes();
    id.reverse();
    out.extend_from_slice(&id);

    let hashlock = message.hashlock.as_bytes();
    write_uleb128(&mut out, hashlock.len());
    out.extend_from_slice(hashlock);

    out.extend_from_slice(&message.timelock.to_le_bytes());
    out
}

/// `sha256(intent ‖ bcs(message))`, the bytes the wallet signs.
pub fn digest(message: &AddLockMessage) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(INTENT_PERSONAL_MESSAGE);
    hasher.update(bcs_encode(message));
    hasher.finalize().into()
}

/// Verify and return the signer's public key as its address.
pub fn verify(
    message: &AddLockMessage,
    signature: &Ed25519Signature,
) -> Result<Address, SignatureError> {
    let verifying_key = VerifyingKey::from_bytes(&signature.public_key)
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let sig = Signature::from_bytes(&signature.signature);

    verifying_key
        .verify(&digest(message), &sig)
        .map_err(|_| SignatureError::VerificationFailed)?;

    Ok(Address::new(signature.public_key))
}
