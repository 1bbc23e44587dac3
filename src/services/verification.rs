//! Webhook authenticity checks.
//!
//! Both checks are pure and never fail: anything that cannot be verified is
//! reported as `false`. Comparisons run in constant time.

use {
    hmac::{Hmac, Mac},
    sha2::Sha256,
    subtle::ConstantTimeEq,
};

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `raw_body` under `secret`.
pub fn sign(secret: &[u8], raw_body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a provider signature (hex, either case) against the raw body.
/// An empty key verifies nothing.
pub fn verify_signature(secret: &[u8], raw_body: &[u8], provided_signature_hex: &str) -> bool {
    if secret.is_empty() || provided_signature_hex.is_empty() || raw_body.is_empty() {
        return false;
    }

    let Ok(expected) = hex::decode(provided_signature_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(raw_body);
    mac.verify_slice(&expected).is_ok()
}

/// Compare the received shared-secret header with the site's expected value.
pub fn verify_auth_header(expected: &str, received: &str) -> bool {
    if expected.is_empty() || received.is_empty() {
        return false;
    }
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
