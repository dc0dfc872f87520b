//! # Secret Generation and Verification

use crate::domain::SecureSecret;
use rand::RngCore;
use shared_types::{Hashlock, Secret};

/// Generate a cryptographically secure random secret.
pub fn generate_random_secret() -> SecureSecret {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    SecureSecret::new(secret)
}

/// Fresh secret and the hashlock it opens.
pub fn new_secret_pair() -> (SecureSecret, Hashlock) {
    let secret = generate_random_secret();
    let hashlock = secret.hashlock();
    (secret, hashlock)
}

/// Verify that a secret matches a hashlock.
pub fn verify_secret(secret: &Secret, hashlock: &Hashlock) -> bool {
    hashlock.is_set() && hashlock.matches(secret)
}
