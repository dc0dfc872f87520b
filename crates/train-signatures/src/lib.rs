//! # Train Signature Verification
//!
//! Lets a third party submit `addLockSig` while the original sender stays
//! the cryptographic authority. Every scheme signs the same triple
//! `(Id, hashlock, timelock)`; only the encoding differs.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): message construction and per-scheme checks, no I/O
//! - **Ports Layer** (`ports/`): `SignatureVerificationApi`
//! - **Service Layer** (`service.rs`): scheme dispatch with configured domains
//!
//! ## Schemes
//!
//! | Scheme | Curve | Signer identity |
//! |---|---|---|
//! | `Eip712` | secp256k1 | recovered EVM address (left-padded) |
//! | `Snip12` | Stark | Stark public key |
//! | `OffchainMessage` | ed25519 | public key |
//! | `IntentBcs` | ed25519 | public key |
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: high-S ECDSA signatures are rejected
//! - **Fail closed**: a signature kind that does not belong to the requested
//!   scheme is `SchemeMismatch`, never a best-effort check

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::ecdsa::{address_from_pubkey, keccak256};
pub use domain::entities::{
    AddLockMessage, AddLockSignature, EcdsaSignature, Ed25519Signature, Eip712Domain,
    OffchainDomain, SchemeDomains, SignatureScheme, Snip12Domain, StarkSignature, PROTOCOL_NAME,
};
pub use domain::errors::SignatureError;
pub use domain::{eip712, intent, offchain, snip12};
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;
