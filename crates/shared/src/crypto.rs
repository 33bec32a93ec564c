//! One-time token generation and hashing.
//!
//! Invitation and password-reset tokens are handed to the user in plain form
//! and only their SHA-256 digest is stored.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a generated one-time token.
pub const TOKEN_BYTES: usize = 32;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a random URL-safe one-time token (hex encoded).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generates a plain token together with the digest that gets persisted.
pub fn generate_hashed_token() -> (String, String) {
    let plain = generate_token();
    let hashed = sha256_hex(&plain);
    (plain, hashed)
}
