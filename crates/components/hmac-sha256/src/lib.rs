//! This crate implements SHA-256, HMAC-SHA256 and the HKDF functions of the
//! TLS 1.3 key schedule.
//!
//! Besides plain hashing, the SHA-256 engine can resume from a saved
//! intermediate [`HashState`] (a checkpoint) and only compress the tail of a
//! message. This allows hashing several transcripts that share a long prefix
//! without compressing that prefix more than once.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod hmac;
mod kdf;
mod sha256;
#[cfg(test)]
mod test_utils;

pub use error::HashError;
pub use hmac::{hmac_sha256, HmacSha256};
pub use kdf::{
    derive_iv, derive_key, derive_secret, hkdf_expand, hkdf_extract, label::hkdf_label,
};
pub use sha256::{
    checkpoint::{sha256_prefix, sha256_resume, sha256_resume_pair, MAX_TAIL_LEN},
    pad::{pad_len, padding},
    sha256, HashState, Sha256, BLOCK_LEN, EMPTY_HASH, SHA256_IV,
};
