//! One-way anonymization and partial masking
//!
//! Both transforms are pure and infallible. `anonymize_name` is deterministic
//! and unsalted on purpose: the same name must always map to the same token so
//! cached and freshly computed displays agree. That also means equal names
//! across records share a token, which is a known weakness of the scheme, not
//! something to silently fix here.

use sha2::{Digest, Sha256};

/// Constant tag prefixed to anonymized name tokens
const ANON_TAG: &str = "ANON_";

/// Fixed redaction prefix kept in masked contacts
const MASK_PREFIX: &str = "XXX-XXX-";

/// Number of digest hex characters kept in the token
const TOKEN_HEX_LEN: usize = 8;

/// Anonymizes a name into a short, stable, non-reversible token
///
/// Empty input maps to empty output; otherwise the token is `ANON_` followed
/// by the first 8 lowercase hex characters of the SHA-256 digest of the name.
pub fn anonymize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let hex = format!("{digest:x}");
    format!("{ANON_TAG}{}", &hex[..TOKEN_HEX_LEN])
}

/// Masks a contact number down to its last four digits
///
/// Strips everything that is not an ASCII digit. With fewer than five digits
/// the whole remainder is kept after the fixed prefix; otherwise only the
/// last four digits survive. Never fails; empty input maps to empty output.
pub fn mask_contact(contact: &str) -> String {
    if contact.is_empty() {
        return String::new();
    }
    let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
    if digits.len() <= 4 {
        format!("{MASK_PREFIX}{digits}")
    } else {
        format!("{MASK_PREFIX}{}", &digits[digits.len() - 4..])
    }
}
