//! HMAC-SHA1 webhook signing
//!
//! Produces and checks the `X-Hub-Signature` header value.

use eyre::{Result, eyre};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the signature
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Scheme tag prefixed to the hex digest
pub const SIGNATURE_PREFIX: &str = "sha1=";

fn mac(secret: &str) -> Result<HmacSha1> {
    HmacSha1::new_from_slice(secret.as_bytes()).map_err(|e| eyre!("Invalid HMAC key: {}", e))
}

/// Sign a payload with HMAC-SHA1 and return the lowercase hex digest.
pub fn sign_payload(secret: &str, payload: &[u8]) -> Result<String> {
    let mut mac = mac(secret)?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Full header value: `sha1=<hex>`
pub fn signature_header(secret: &str, payload: &[u8]) -> Result<String> {
    Ok(format!("{}{}", SIGNATURE_PREFIX, sign_payload(secret, payload)?))
}

/// Verify a header value (with or without the `sha1=` prefix) against a payload.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let digest = signature.trim();
    let digest = digest.strip_prefix(SIGNATURE_PREFIX).unwrap_or(digest);

    let Ok(expected) = hex::decode(digest) else {
        return false;
    };
    let Ok(mut mac) = mac(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // RFC 2202 test case 2
        let sig = sign_payload("Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(sig, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn test_header_has_prefix_and_lowercase_hex() {
        let header = signature_header("s3cr3t", b"{}").unwrap();
        let digest = header.strip_prefix("sha1=").expect("missing prefix");
        assert_eq!(digest.len(), 40);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_and_verify() {
        let secret = "test_secret_12345";
        let payload = b"hello world";
        let header = signature_header(secret, payload).unwrap();
        assert!(verify_signature(secret, payload, &header));
        assert!(verify_signature(secret, payload, header.trim_start_matches("sha1=")));
        assert!(!verify_signature("wrong_secret", payload, &header));
        assert!(!verify_signature(secret, b"wrong payload", &header));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(!verify_signature("s", b"body", "sha1=not-hex"));
        assert!(!verify_signature("s", b"body", ""));
    }

    #[test]
    fn test_empty_secret_still_signs() {
        assert!(sign_payload("", b"body").is_ok());
    }
}
