//! API token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// API token prefix.
pub const API_TOKEN_PREFIX: &str = "vnd_";

/// Number of random bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a new raw token: the prefix followed by hex-encoded random bytes.
#[must_use]
pub fn generate_api_token() -> String {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    format!("{API_TOKEN_PREFIX}{}", encode_hex(&secret))
}

/// Whether `token` has the shape of a token this service issues.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.strip_prefix(API_TOKEN_PREFIX).is_some_and(|secret| {
        secret.len() == API_TOKEN_SECRET_BYTES * 2
            && secret
                .bytes()
                .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
    })
}

/// The digest stored in place of the raw token.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    encode_hex(&Sha256::digest(token.as_bytes()))
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}
