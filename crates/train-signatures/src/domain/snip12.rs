//! # SNIP-12 Typed Data (revision 1)
//!
//! Felt-native chains cannot hold a 256-bit value in one field element, so
//! `Id`, `hashlock` and `timelock` are each split into `low`/`high` u128
//! limbs and hashed as the preset `u256` struct. Hashing is Poseidon.
//!
//! ```text
//! message_hash = poseidon("StarkNet Message", hash(StarknetDomain), account, hash(AddLockMsg))
//! ```
//!
//! The account element is the signer's Stark public key.

use super::entities::{AddLockMessage, Snip12Domain, StarkSignature};
use super::errors::SignatureError;
use sha3::{Digest, Keccak256};
use shared_types::Address;
use starknet_crypto::{poseidon_hash_many, Felt};

const DOMAIN_TYPE: &str = r#""StarknetDomain"("name":"shortstring","version":"shortstring","chainId":"shortstring","revision":"shortstring")"#;
const ADD_LOCK_TYPE: &str = r#""AddLockMsg"("Id":"u256","hashlock":"u256","timelock":"u256")"u256"("low":"u128","high":"u128")"#;
const U256_TYPE: &str = r#""u256"("low":"u128","high":"u128")"#;
const MESSAGE_PREFIX: &[u8] = b"StarkNet Message";

/// Keccak-256 truncated to 250 bits.
pub fn starknet_keccak(data: &[u8]) -> Felt {
    let mut hash: [u8; 32] = Keccak256::digest(data).into();
    hash[0] &= 0x03;
    Felt::from_bytes_be(&hash)
}

/// Encode a short string field.
///
/// Decimal and `0x`-prefixed hex strings are numeric felts (so revision
/// `"1"` is `1` and `"0x7631"` equals `"v1"`); anything else is the
/// big-endian ASCII value, at most 31 characters.
pub fn encode_short_string(value: &str) -> Result<Felt, SignatureError> {
    if let Some(digits) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return hex_felt(digits);
    }
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        let number: u128 = value
            .parse()
            .map_err(|_| SignatureError::InvalidDomain(format!("numeric overflow: {value}")))?;
        return Ok(Felt::from(number));
    }
    if value.len() > 31 || !value.is_ascii() {
        return Err(SignatureError::InvalidDomain(format!(
            "not a short string: {value:?}"
        )));
    }
    Ok(Felt::from_bytes_be_slice(value.as_bytes()))
}

/// Hex digits as a felt of at most 251 bits.
fn hex_felt(digits: &str) -> Result<Felt, SignatureError> {
    let invalid = || SignatureError::InvalidDomain(format!("not a felt: 0x{digits}"));
    if digits.is_empty() || digits.len() > 64 {
        return Err(invalid());
    }
    let padded = format!("{digits:0>64}");
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(&padded, &mut bytes).map_err(|_| invalid())?;
    if bytes[0] & 0xf8 != 0 {
        return Err(invalid());
    }
    Ok(Felt::from_bytes_be(&bytes))
}

/// Hash a 32-byte big-endian value as the `u256` preset struct.
fn hash_u256(bytes: &[u8; 32]) -> Felt {
    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&bytes[..16]);
    low.copy_from_slice(&bytes[16..]);

    poseidon_hash_many(&[
        starknet_keccak(U256_TYPE.as_bytes()),
        Felt::from(u128::from_be_bytes(low)),
        Felt::from(u128::from_be_bytes(high)),
    ])
}

/// `hashStruct(StarknetDomain)`.
pub fn domain_hash(domain: &Snip12Domain) -> Result<Felt, SignatureError> {
    Ok(poseidon_hash_many(&[
        starknet_keccak(DOMAIN_TYPE.as_bytes()),
        encode_short_string(&domain.name)?,
        encode_short_string(&domain.version)?,
        encode_short_string(&domain.chain_id)?,
        encode_short_string(&domain.revision)?,
    ]))
}

/// `hashStruct(AddLockMsg)`.
pub fn struct_hash(message: &AddLockMessage) -> Felt {
    let mut timelock = [0u8; 32];
    timelock[24..].copy_from_slice(&message.timelock.to_be_bytes());

    poseidon_hash_many(&[
        starknet_keccak(ADD_LOCK_TYPE.as_bytes()),
        hash_u256(message.id.as_bytes()),
        hash_u256(message.hashlock.as_bytes()),
        hash_u256(&timelock),
    ])
}

/// Full message hash signed by `account`.
pub fn message_hash(
    domain: &Snip12Domain,
    account: &Felt,
    message: &AddLockMessage,
) -> Result<Felt, SignatureError> {
    Ok(poseidon_hash_many(&[
        Felt::from_bytes_be_slice(MESSAGE_PREFIX),
        domain_hash(domain)?,
        *account,
        struct_hash(message),
    ]))
}

/// Verify a Stark-curve signature and return the signing key as the signer.
pub fn verify(
    domain: &Snip12Domain,
    message: &AddLockMessage,
    signature: &StarkSignature,
) -> Result<Address, SignatureError> {
    let public_key = Felt::from_bytes_be(&signature.public_key);
    if public_key.to_bytes_be() != signature.public_key {
        return Err(SignatureError::InvalidPublicKey);
    }
    let r = Felt::from_bytes_be(&signature.r);
    let s = Felt::from_bytes_be(&signature.s);
    if r.to_bytes_be() != signature.r || s.to_bytes_be() != signature.s {
        return Err(SignatureError::InvalidFormat);
    }

    let hash = message_hash(domain, &public_key, message)?;
    match starknet_crypto::verify(&public_key, &hash, &r, &s) {
        Ok(true) => Ok(Address::new(signature.public_key)),
        Ok(false) => Err(SignatureError::VerificationFailed),
        Err(_) => Err(SignatureError::InvalidFormat),
    }
}
