//! Secret comparison against stored directory hashes.
//!
//! Directories store secrets as `{SCHEME}base64` values (RFC 2307 style)
//! or as `{CRYPT}` values carrying a crypt(3) string. [`needs_update`]
//! recomputes the stored hash from the desired plaintext and reports
//! whether the record has to be rewritten. A stored value in an unknown
//! or malformed format never matches, so such records are rewritten into
//! a known scheme on the next pass.
//!
//! This module is pure: it neither logs nor returns any secret material.
//!
//! Supported schemes: `{SHA}`, `{SSHA}`, `{SHA256}`, `{SSHA256}`,
//! `{SHA512}`, `{SSHA512}` and `{CRYPT}` with `$5$`/`$6$` strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

const SHA1_LEN: usize = 20;
const SHA256_LEN: usize = 32;
const SHA512_LEN: usize = 64;

/// Whether the stored secret value must be rewritten for `plain` to
/// verify against it.
///
/// Returns `false` only when `stored` parses as a supported scheme and
/// its hash matches the recomputed hash of `plain`. An unset, empty,
/// unknown-scheme or malformed stored value always reports `true`.
#[must_use]
pub fn needs_update(plain: &str, stored: Option<&str>) -> bool {
    let stored = match stored {
        Some(value) if !value.is_empty() => value,
        _ => return true,
    };

    !matches(plain, stored)
}

fn matches(plain: &str, stored: &str) -> bool {
    let Some(without_brace) = stored.strip_prefix('{') else {
        return false;
    };
    let Some((scheme, payload)) = without_brace.split_once('}') else {
        return false;
    };

    match scheme.to_ascii_uppercase().as_str() {
        "SHA" => digest_matches::<Sha1>(plain, payload, SHA1_LEN, false),
        "SSHA" => digest_matches::<Sha1>(plain, payload, SHA1_LEN, true),
        "SHA256" => digest_matches::<Sha256>(plain, payload, SHA256_LEN, false),
        "SSHA256" => digest_matches::<Sha256>(plain, payload, SHA256_LEN, true),
        "SHA512" => digest_matches::<Sha512>(plain, payload, SHA512_LEN, false),
        "SSHA512" => digest_matches::<Sha512>(plain, payload, SHA512_LEN, true),
        "CRYPT" => crypt_matches(plain, payload),
        _ => false,
    }
}

/// Compares against an RFC 2307 payload: `base64(digest)` for plain
/// schemes, `base64(digest || salt)` for salted ones.
fn digest_matches<D: Digest>(plain: &str, payload: &str, digest_len: usize, salted: bool) -> bool {
    let Ok(decoded) = STANDARD.decode(payload) else {
        return false;
    };

    if salted {
        if decoded.len() < digest_len {
            return false;
        }
        let (digest, salt) = decoded.split_at(digest_len);
        let mut hasher = D::new();
        hasher.update(plain.as_bytes());
        hasher.update(salt);
        hasher.finalize().as_slice() == digest
    } else {
        if decoded.len() != digest_len {
            return false;
        }
        D::digest(plain.as_bytes()).as_slice() == decoded
    }
}

/// Compares against a crypt(3) string. Only the SHA-256 (`$5$`) and
/// SHA-512 (`$6$`) forms are recognized.
fn crypt_matches(plain: &str, payload: &str) -> bool {
    if payload.starts_with("$6$") {
        sha_crypt::sha512_check(plain, payload).is_ok()
    } else if payload.starts_with("$5$") {
        sha_crypt::sha256_check(plain, payload).is_ok()
    } else {
        false
    }
}
