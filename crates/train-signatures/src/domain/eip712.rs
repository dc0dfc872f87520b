//! # EIP-712 Structured Data
//!
//! `addLockMsg(bytes32 Id,bytes32 hashlock,uint48 timelock)` under the
//! `EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)`
//! domain. The digest is `keccak256(0x19 0x01 ‖ domainSeparator ‖ structHash)`
//! and the signer is recovered from a secp256k1 signature.

use super::ecdsa::{keccak256, recover_address};
use super::entities::{AddLockMessage, EcdsaSignature, Eip712Domain};
use super::errors::SignatureError;
use shared_types::{Address, Hash};

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const ADD_LOCK_TYPE: &str = "addLockMsg(bytes32 Id,bytes32 hashlock,uint48 timelock)";

/// Largest timelock representable as `uint48`.
pub const MAX_UINT48: u64 = (1 << 48) - 1;

fn word_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// `hashStruct(EIP712Domain)`.
pub fn domain_separator(domain: &Eip712Domain) -> Hash {
    let mut contract = [0u8; 32];
    contract[12..].copy_from_slice(&domain.verifying_contract);

    let mut encoded = Vec::with_capacity(32 * 5);
    encoded.extend_from_slice(&keccak256(DOMAIN_TYPE.as_bytes()));
    encoded.extend_from_slice(&keccak256(domain.name.as_bytes()));
    encoded.extend_from_slice(&keccak256(domain.version.as_bytes()));
    encoded.extend_from_slice(&word_u64(domain.chain_id));
    encoded.extend_from_slice(&contract);
    keccak256(&encoded)
}

/// `hashStruct(addLockMsg)`.
pub fn struct_hash(message: &AddLockMessage) -> Result<Hash, SignatureError> {
    if message.timelock > MAX_UINT48 {
        return Err(SignatureError::MessageOutOfRange(format!(
            "timelock {} exceeds uint48",
            message.timelock
        )));
    }

    let mut encoded = Vec::with_capacity(32 * 4);
    encoded.extend_from_slice(&keccak256(ADD_LOCK_TYPE.as_bytes()));
    encoded.extend_from_slice(message.id.as_bytes());
    encoded.extend_from_slice(message.hashlock.as_bytes());
    encoded.extend_from_slice(&word_u64(message.timelock));
    Ok(keccak256(&encoded))
}

/// The 32-byte digest a wallet signs with `signTypedData`.
pub fn digest(domain: &Eip712Domain, message: &AddLockMessage) -> Result<Hash, SignatureError> {
    let mut encoded = Vec::with_capacity(2 + 32 + 32);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(&domain_separator(domain));
    encoded.extend_from_slice(&struct_hash(message)?);
    Ok(keccak256(&encoded))
}

/// Recover the address that signed `message` under `domain`.
pub fn recover(
    domain: &Eip712Domain,
    message: &AddLockMessage,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    recover_address(&digest(domain, message)?, signature)
}
