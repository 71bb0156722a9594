//! Request auth material derived from the wallet credential.
//!
//! Dev-grade possession proof: the payment service knows the credential's
//! key commitment and checks the HMAC on each request. The credential itself
//! never leaves the machine.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Hex SHA-256 of the canonical credential bytes; identifies the wallet to
/// the payment service without revealing key material.
pub fn key_commitment(credential: &[u8]) -> String {
    hex::encode(Sha256::digest(credential))
}

/// Hex HMAC-SHA256 over `<commitment>:<amount>:<nonce>`, keyed by the
/// credential bytes.
pub fn sign_top_up(
    credential: &[u8],
    commitment: &str,
    raw_amount: u64,
    nonce: u64,
) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(credential)?;
    mac.update(format!("{commitment}:{raw_amount}:{nonce}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
