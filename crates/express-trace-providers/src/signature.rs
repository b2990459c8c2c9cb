// ABOUTME: Authenticity verification for signed push callbacks (MD5 of payload plus shared salt)
// ABOUTME: Checked before any payload field is trusted; mismatches are a hard rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Callback signature verification
//!
//! Push callbacks arrive on an open network endpoint. A provider that signs its
//! callbacks sends `sign = uppercase(hex(md5(payload + salt)))` next to the
//! payload, where `salt` is the secret registered at subscribe time. The
//! payload must not be decoded until this check passes.

use std::fmt;

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// Signature validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureValidation {
    /// Signature matches the payload
    Valid,
    /// Signature does not match the payload
    Invalid,
    /// No signature was supplied
    Missing,
}

impl SignatureValidation {
    /// Whether the callback may be trusted
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Uppercase hex MD5 digest of the concatenation of `parts`
#[must_use]
pub fn md5_upper_hex(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode_upper(hasher.finalize())
}

/// Validates salted MD5 callback signatures
#[derive(Clone)]
pub struct SignatureVerifier {
    salt: String,
}

impl SignatureVerifier {
    /// Create a verifier for a shared salt
    #[must_use]
    pub const fn new(salt: String) -> Self {
        Self { salt }
    }

    /// Expected signature for `payload`
    #[must_use]
    pub fn sign(&self, payload: &str) -> String {
        md5_upper_hex(&[payload, self.salt.as_str()])
    }

    /// Validate a supplied signature against `payload`
    ///
    /// The supplied value is normalized to uppercase hex and compared in
    /// constant time.
    #[must_use]
    pub fn validate(&self, signature: Option<&str>, payload: &str) -> SignatureValidation {
        let Some(signature) = signature.filter(|value| !value.is_empty()) else {
            return SignatureValidation::Missing;
        };

        let expected = self.sign(payload);
        let supplied = signature.to_ascii_uppercase();

        if supplied.as_bytes().ct_eq(expected.as_bytes()).into() {
            SignatureValidation::Valid
        } else {
            SignatureValidation::Invalid
        }
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("salt", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"state":"3"}"#;

    #[test]
    fn test_digest_is_uppercase_hex_md5() {
        assert_eq!(md5_upper_hex(&[]), "D41D8CD98F00B204E9800998ECF8427E");
        assert_eq!(
            md5_upper_hex(&[PAYLOAD, "abc"]),
            "892A016B03B7D59BC4D495EA0AAC7D6D"
        );
    }

    #[test]
    fn test_valid_signature() {
        let verifier = SignatureVerifier::new("abc".to_owned());
        let signature = verifier.sign(PAYLOAD);
        assert_eq!(
            verifier.validate(Some(&signature), PAYLOAD),
            SignatureValidation::Valid
        );
    }

    #[test]
    fn test_lowercase_signature_is_normalized() {
        let verifier = SignatureVerifier::new("abc".to_owned());
        let signature = verifier.sign(PAYLOAD).to_ascii_lowercase();
        assert!(verifier.validate(Some(&signature), PAYLOAD).is_valid());
    }

    #[test]
    fn test_flipping_any_payload_byte_fails() {
        let verifier = SignatureVerifier::new("abc".to_owned());
        let signature = verifier.sign(PAYLOAD);
        for index in 0..PAYLOAD.len() {
            let mut bytes = PAYLOAD.as_bytes().to_vec();
            bytes[index] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(
                verifier.validate(Some(&signature), &tampered),
                SignatureValidation::Invalid,
                "byte {index} flipped"
            );
        }
    }

    #[test]
    fn test_flipping_any_salt_byte_fails() {
        let signature = SignatureVerifier::new("abc".to_owned()).sign(PAYLOAD);
        for salt in ["abb", "bbc", "acc", "ab", "abcd"] {
            let verifier = SignatureVerifier::new(salt.to_owned());
            assert_eq!(
                verifier.validate(Some(&signature), PAYLOAD),
                SignatureValidation::Invalid
            );
        }
    }

    #[test]
    fn test_missing_signature() {
        let verifier = SignatureVerifier::new("abc".to_owned());
        assert_eq!(verifier.validate(None, PAYLOAD), SignatureValidation::Missing);
        assert_eq!(
            verifier.validate(Some(""), PAYLOAD),
            SignatureValidation::Missing
        );
    }

    #[test]
    fn test_truncated_signature_is_invalid() {
        let verifier = SignatureVerifier::new("abc".to_owned());
        let signature = verifier.sign(PAYLOAD);
        assert_eq!(
            verifier.validate(Some(&signature[..31]), PAYLOAD),
            SignatureValidation::Invalid
        );
    }
}
