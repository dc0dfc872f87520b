//! # Core Protocol Entities
//!
//! Fixed-width values every HTLC implementation agrees on.
//!
//! ## Clusters
//!
//! - **Identity**: `HtlcId`, `Address`
//! - **Commitment**: `Hashlock`, `Secret`
//! - **Time**: `Timestamp` (Unix seconds)

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use sha2::{Digest, Sha256};
use std::fmt;

pub use primitive_types::U256;

/// A 32-byte hash (SHA-256 or Keccak-256 output).
pub type Hash = [u8; 32];

/// A 32-byte HTLC secret (preimage of a hashlock).
pub type Secret = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The all-zero secret stored on a record until it is redeemed.
pub const EMPTY_SECRET: Secret = [0u8; 32];

macro_rules! bytes32_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[serde_as]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        pub struct $name(#[serde_as(as = "Hex")] pub [u8; 32]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Parse from hex, with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self, TypeError> {
                let bytes = hex::decode(s.trim_start_matches("0x"))
                    .map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                let actual = bytes.len();
                let arr: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| TypeError::InvalidLength { expected: 32, actual })?;
                Ok(Self(arr))
            }

            /// Interpret as a big-endian 256-bit integer.
            pub fn to_u256(&self) -> U256 {
                U256::from_big_endian(&self.0)
            }

            /// Build from a 256-bit integer (big-endian layout).
            pub fn from_u256(value: U256) -> Self {
                let mut bytes = [0u8; 32];
                value.to_big_endian(&mut bytes);
                Self(bytes)
            }

            /// First two bytes as hex, for log lines.
            pub fn short(&self) -> String {
                format!("{:02x}{:02x}..", self.0[0], self.0[1])
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

bytes32_newtype!(
    /// Swap identifier. One HTLC record exists per id for the lifetime of the store.
    HtlcId
);

bytes32_newtype!(
    /// SHA-256 commitment to a secret. The zero value means "not set yet".
    Hashlock
);

bytes32_newtype!(
    /// Chain-neutral account identifier.
    ///
    /// 32-byte native keys (ed25519, Stark felts) are stored as-is; 20-byte
    /// EVM addresses are left-padded with zeros.
    Address
);

impl Hashlock {
    /// The unset hashlock of a pre-HTLC.
    pub const SENTINEL: Hashlock = Hashlock([0u8; 32]);

    /// Commitment for `secret` (`sha256(secret)`).
    pub fn from_secret(secret: &Secret) -> Self {
        let digest: [u8; 32] = Sha256::digest(secret).into();
        Self(digest)
    }

    /// Whether a real commitment has been attached.
    pub fn is_set(&self) -> bool {
        self.0 != Self::SENTINEL.0
    }

    /// Whether `secret` opens this hashlock.
    pub fn matches(&self, secret: &Secret) -> bool {
        Self::from_secret(secret) == *self
    }
}

impl Address {
    /// Left-pad a 20-byte EVM address.
    pub fn from_evm(addr: [u8; 20]) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..].copy_from_slice(&addr);
        Self(bytes)
    }

    /// The 20-byte EVM form, if the upper 12 bytes are zero.
    pub fn as_evm(&self) -> Option<[u8; 20]> {
        if self.0[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&self.0[12..]);
        Some(addr)
    }
}
