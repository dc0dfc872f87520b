//! # Domain Entities
//!
//! The signed triple, the per-scheme signature shapes and the domain
//! separators each scheme binds the triple to.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Hashlock, HtlcId, Timestamp};
use std::fmt;

/// Protocol name every scheme binds into its domain.
pub const PROTOCOL_NAME: &str = "Train";

// =============================================================================
// Schemes and Message
// =============================================================================

/// Off-chain encodings a sender may use to authorize `addLockSig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// EIP-712 typed structured data, secp256k1 recovery.
    Eip712,
    /// SNIP-12 revision 1 typed data with u256 low/high limbs, Stark curve.
    Snip12,
    /// Hex-wrapped offchain message preamble, ed25519.
    OffchainMessage,
    /// BCS struct behind a personal-message intent header, ed25519.
    IntentBcs,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eip712 => "eip712",
            Self::Snip12 => "snip12",
            Self::OffchainMessage => "offchain-message",
            Self::IntentBcs => "intent-bcs",
        };
        f.write_str(name)
    }
}

/// The triple every scheme signs over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLockMessage {
    pub id: HtlcId,
    pub hashlock: Hashlock,
    pub timelock: Timestamp,
}

impl AddLockMessage {
    pub fn new(id: HtlcId, hashlock: Hashlock, timelock: Timestamp) -> Self {
        Self {
            id,
            hashlock,
            timelock,
        }
    }
}

// =============================================================================
// Signature Shapes
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    #[serde_as(as = "Hex")]
    pub r: [u8; 32],
    /// S component (32 bytes)
    #[serde_as(as = "Hex")]
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse the 65-byte `r ‖ s ‖ v` form produced by wallets.
    pub fn from_rsv(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }
}

/// ECDSA signature on the Stark curve, with the key it verifies under.
///
/// Stark signatures carry no recovery id, so the signer's public key
/// travels with the signature and is the signer identity.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkSignature {
    #[serde_as(as = "Hex")]
    pub public_key: [u8; 32],
    #[serde_as(as = "Hex")]
    pub r: [u8; 32],
    #[serde_as(as = "Hex")]
    pub s: [u8; 32],
}

/// Ed25519 signature with the signer's public key.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519Signature {
    #[serde_as(as = "Hex")]
    pub public_key: [u8; 32],
    #[serde_as(as = "Hex")]
    pub signature: [u8; 64],
}

/// A signature submitted with `addLockSig`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddLockSignature {
    Ecdsa(EcdsaSignature),
    Stark(StarkSignature),
    Ed25519(Ed25519Signature),
}

impl AddLockSignature {
    /// Short kind name for errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ecdsa(_) => "ecdsa",
            Self::Stark(_) => "stark",
            Self::Ed25519(_) => "ed25519",
        }
    }
}

// =============================================================================
// Domain Separators
// =============================================================================

/// EIP-712 domain (`name`, `version`, `chainId`, `verifyingContract`).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    #[serde_as(as = "Hex")]
    pub verifying_contract: [u8; 20],
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Self {
            name: PROTOCOL_NAME.to_string(),
            version: "1".to_string(),
            chain_id: 1,
            verifying_contract: [0u8; 20],
        }
    }
}

/// SNIP-12 `StarknetDomain`. Every field is a short string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snip12Domain {
    pub name: String,
    pub version: String,
    pub chain_id: String,
    pub revision: String,
}

impl Default for Snip12Domain {
    fn default() -> Self {
        Self {
            name: PROTOCOL_NAME.to_string(),
            version: "v1".to_string(),
            chain_id: "SN_MAIN".to_string(),
            revision: "1".to_string(),
        }
    }
}

/// Offchain message application domain (NUL-padded to 32 bytes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffchainDomain {
    pub application_domain: String,
}

impl Default for OffchainDomain {
    fn default() -> Self {
        Self {
            application_domain: PROTOCOL_NAME.to_string(),
        }
    }
}

/// Domain configuration for every scheme a verifier accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDomains {
    #[serde(default)]
    pub eip712: Eip712Domain,
    #[serde(default)]
    pub snip12: Snip12Domain,
    #[serde(default)]
    pub offchain: OffchainDomain,
}
