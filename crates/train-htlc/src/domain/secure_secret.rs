//! # Secure Secret Type
//!
//! HTLC preimage wrapper that zeroizes memory on drop and never prints its
//! bytes. Used between secret generation and `redeem`; once redeemed, the
//! secret is public and stored on the record as plain bytes.

use serde::{Deserialize, Serialize};
use shared_types::{Hashlock, Secret};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure secret that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureSecret {
    inner: Secret,
}

impl SecureSecret {
    pub fn new(bytes: Secret) -> Self {
        Self { inner: bytes }
    }

    /// Copy from a slice; `None` unless it is exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let inner: Secret = slice.try_into().ok()?;
        Some(Self { inner })
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = hex::decode(s.trim_start_matches("0x")).ok()?;
        let secret = Self::from_slice(&bytes);
        bytes.zeroize();
        secret
    }

    /// Borrow the bytes. Do not keep the reference around.
    pub fn as_bytes(&self) -> &Secret {
        &self.inner
    }

    /// The commitment this secret opens.
    pub fn hashlock(&self) -> Hashlock {
        Hashlock::from_secret(&self.inner)
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureSecret(***)")
    }
}

impl Serialize for SecureSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.inner))
    }
}

impl<'de> Deserialize<'de> for SecureSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| serde::de::Error::custom("invalid 32-byte hex secret"))
    }
}
