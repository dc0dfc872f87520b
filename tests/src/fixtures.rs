//! # Test Fixtures
//!
//! Real signers for every add-lock scheme, and a wired-up HTLC service per
//! simulated chain.

use std::sync::Arc;

use ed25519_dalek::Signer as _;
use k256::ecdsa::SigningKey as EcdsaKey;
use rand::RngCore;
use starknet_crypto::{get_public_key, rfc6979_generate_k, Felt};

use shared_types::Address;
use train_htlc::{
    HtlcConfig, HtlcService, InMemoryEscrow, InMemoryRecordStore, ManualClock,
};
use train_signatures::{
    address_from_pubkey, eip712, intent, offchain, snip12, AddLockMessage, AddLockSignature,
    EcdsaSignature, Ed25519Signature, SchemeDomains, SignatureScheme,
    SignatureVerificationService, StarkSignature,
};

pub const GENESIS: u64 = 1_700_000_000;

pub type ChainService = HtlcService<InMemoryRecordStore, InMemoryEscrow, ManualClock>;

/// One simulated chain: its own store, ledger and clock.
pub struct Chain {
    pub service: ChainService,
    pub escrow: Arc<InMemoryEscrow>,
    pub clock: Arc<ManualClock>,
}

impl Chain {
    pub fn new(domains: SchemeDomains) -> Self {
        let escrow = Arc::new(InMemoryEscrow::new());
        let clock = Arc::new(ManualClock::new(GENESIS));
        let service = HtlcService::new(
            Arc::new(InMemoryRecordStore::new()),
            escrow.clone(),
            clock.clone(),
            Arc::new(SignatureVerificationService::new(domains)),
            HtlcConfig::default(),
        )
        .expect("default config is valid");
        Self {
            service,
            escrow,
            clock,
        }
    }
}

/// A key able to sign add-lock messages under one scheme.
pub enum TestSigner {
    Evm(EcdsaKey),
    Stark(Felt),
    Solana(ed25519_dalek::SigningKey),
    Sui(ed25519_dalek::SigningKey),
}

impl TestSigner {
    pub fn random(scheme: SignatureScheme) -> Self {
        let mut rng = rand::thread_rng();
        match scheme {
            SignatureScheme::Eip712 => TestSigner::Evm(EcdsaKey::random(&mut rng)),
            SignatureScheme::Snip12 => {
                let mut bytes = [0u8; 31];
                rng.fill_bytes(&mut bytes);
                bytes[0] |= 0x01;
                TestSigner::Stark(Felt::from_bytes_be_slice(&bytes))
            }
            SignatureScheme::OffchainMessage => {
                TestSigner::Solana(ed25519_dalek::SigningKey::generate(&mut rng))
            }
            SignatureScheme::IntentBcs => {
                TestSigner::Sui(ed25519_dalek::SigningKey::generate(&mut rng))
            }
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        match self {
            TestSigner::Evm(_) => SignatureScheme::Eip712,
            TestSigner::Stark(_) => SignatureScheme::Snip12,
            TestSigner::Solana(_) => SignatureScheme::OffchainMessage,
            TestSigner::Sui(_) => SignatureScheme::IntentBcs,
        }
    }

    /// The identity a verifier reports for this key.
    pub fn address(&self) -> Address {
        match self {
            TestSigner::Evm(key) => address_from_pubkey(key.verifying_key()),
            TestSigner::Stark(key) => Address::new(get_public_key(key).to_bytes_be()),
            TestSigner::Solana(key) | TestSigner::Sui(key) => {
                Address::new(key.verifying_key().to_bytes())
            }
        }
    }

    pub fn sign(&self, domains: &SchemeDomains, message: &AddLockMessage) -> AddLockSignature {
        match self {
            TestSigner::Evm(key) => sign_eip712(key, domains, message),
            TestSigner::Stark(key) => sign_snip12(key, domains, message),
            TestSigner::Solana(key) => {
                let public_key = key.verifying_key().to_bytes();
                let bytes = offchain::signing_bytes(&domains.offchain, &public_key, message)
                    .expect("default application domain fits");
                AddLockSignature::Ed25519(Ed25519Signature {
                    public_key,
                    signature: key.sign(&bytes).to_bytes(),
                })
            }
            TestSigner::Sui(key) => AddLockSignature::Ed25519(Ed25519Signature {
                public_key: key.verifying_key().to_bytes(),
                signature: key.sign(&intent::digest(message)).to_bytes(),
            }),
        }
    }
}

fn sign_eip712(
    key: &EcdsaKey,
    domains: &SchemeDomains,
    message: &AddLockMessage,
) -> AddLockSignature {
    let digest = eip712::digest(&domains.eip712, message).expect("timelock fits uint48");
    let (sig, recid) = key
        .sign_prehash_recoverable(&digest)
        .expect("prehash signing");
    let (sig, v) = match sig.normalize_s() {
        Some(low) => (low, recid.to_byte() ^ 1),
        None => (sig, recid.to_byte()),
    };

    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    AddLockSignature::Ecdsa(EcdsaSignature { r, s, v: v + 27 })
}

fn sign_snip12(
    key: &Felt,
    domains: &SchemeDomains,
    message: &AddLockMessage,
) -> AddLockSignature {
    let public_key = get_public_key(key);
    let hash = snip12::message_hash(&domains.snip12, &public_key, message)
        .expect("default domain encodes");
    let k = rfc6979_generate_k(&hash, key, None);
    let sig = starknet_crypto::sign(key, &hash, &k).expect("stark signing");
    AddLockSignature::Stark(StarkSignature {
        public_key: public_key.to_bytes_be(),
        r: sig.r.to_bytes_be(),
        s: sig.s.to_bytes_be(),
    })
}

/// Every scheme, in declaration order.
pub const ALL_SCHEMES: [SignatureScheme; 4] = [
    SignatureScheme::Eip712,
    SignatureScheme::Snip12,
    SignatureScheme::OffchainMessage,
    SignatureScheme::IntentBcs,
];
