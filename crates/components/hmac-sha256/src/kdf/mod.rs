//! HKDF (RFC 5869) and the TLS 1.3 derivation helpers (RFC 8446 Section 7.1).
//!
//! Every output of the TLS 1.3 key schedule used here is at most 32 bytes,
//! so HKDF-Expand runs a single round.

use hss_common::prefix;

use crate::hmac::HmacSha256;

pub(crate) mod label;

use label::hkdf_label;

/// Computes HKDF-Extract(`salt`, `ikm`).
pub fn hkdf_extract(salt: &[u8; 32], ikm: &[u8]) -> [u8; 32] {
    HmacSha256::from_secret(salt).finalize(ikm)
}

/// Computes the first 32 bytes of HKDF-Expand(`prk`, `info`).
pub fn hkdf_expand(prk: &[u8; 32], info: &[u8]) -> [u8; 32] {
    let mut msg = Vec::with_capacity(info.len() + 1);
    msg.extend_from_slice(info);
    msg.push(0x01);

    HmacSha256::from_secret(prk).finalize(&msg)
}

/// Computes Derive-Secret(`secret`, `label`, `ctx`), where `ctx` is a
/// transcript hash.
pub fn derive_secret(secret: &[u8; 32], label: &[u8], ctx: &[u8]) -> [u8; 32] {
    hkdf_expand(secret, &hkdf_label(32, label, ctx))
}

/// Derives a traffic key of `N` bytes from a traffic secret.
///
/// # Panics
///
/// Panics if `N` is larger than 32.
pub fn derive_key<const N: usize>(secret: &[u8; 32]) -> [u8; N] {
    expand_to(secret, b"key")
}

/// Derives a traffic IV of `N` bytes from a traffic secret.
///
/// # Panics
///
/// Panics if `N` is larger than 32.
pub fn derive_iv<const N: usize>(secret: &[u8; 32]) -> [u8; N] {
    expand_to(secret, b"iv")
}

fn expand_to<const N: usize>(secret: &[u8; 32], label: &[u8]) -> [u8; N] {
    assert!(N <= 32, "output length larger than 32 not supported");

    let okm = hkdf_expand(secret, &hkdf_label(N, label, &[]));

    let mut out = [0u8; N];
    out.copy_from_slice(&prefix(&okm, N));
    out
}
