//! Computation of HMAC-SHA256.
//!
//! HMAC-SHA256 is defined as
//!
//! HMAC(m) = H((key' xor opad) || H((key' xor ipad) || m))
//!
//! * H     - SHA256 hash function
//! * key'  - key padded with zero bytes to 64 bytes (we do not support longer
//!   keys)
//! * opad  - 64 bytes of 0x5c
//! * ipad  - 64 bytes of 0x36
//! * m     - message
//!
//! The padded key blocks are compressed once into `inner_partial` and
//! `outer_partial`. Every MAC under the same key then resumes from these
//! states.

use hss_common::xor_with_byte;

use crate::{
    sha256::{HashState, Sha256, BLOCK_LEN},
    HashError,
};

/// HMAC-SHA256 keyed with precomputed partial states.
#[derive(Clone)]
pub struct HmacSha256 {
    inner_partial: HashState,
    outer_partial: HashState,
}

impl std::fmt::Debug for HmacSha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha256")
            .field("inner_partial", &"{{...}}")
            .field("outer_partial", &"{{...}}")
            .finish()
    }
}

impl HmacSha256 {
    pub(crate) const IPAD: u8 = 0x36;
    pub(crate) const OPAD: u8 = 0x5c;

    /// Creates a new instance.
    ///
    /// Returns an error if `key` is longer than 64 bytes.
    pub fn new(key: &[u8]) -> Result<Self, HashError> {
        if key.len() > BLOCK_LEN {
            return Err(HashError::key(format!(
                "keys longer than {BLOCK_LEN} bytes are not supported, got {}",
                key.len()
            )));
        }

        let mut padded = key.to_vec();
        padded.resize(BLOCK_LEN, 0);

        let inner_partial =
            HashState::default().compress_blocks(&xor_with_byte(&padded, Self::IPAD))?;
        let outer_partial =
            HashState::default().compress_blocks(&xor_with_byte(&padded, Self::OPAD))?;

        Ok(Self {
            inner_partial,
            outer_partial,
        })
    }

    /// Creates a new instance keyed with a 32-byte secret.
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        let mut padded = [0u8; BLOCK_LEN];
        padded[..32].copy_from_slice(secret);

        Self {
            inner_partial: HashState::default().compress(&pad_block(&padded, Self::IPAD)),
            outer_partial: HashState::default().compress(&pad_block(&padded, Self::OPAD)),
        }
    }

    /// Returns the MAC of `msg`.
    pub fn finalize(&self, msg: &[u8]) -> [u8; 32] {
        let inner_local = Sha256::new()
            .set_state(self.inner_partial, BLOCK_LEN)
            .update(msg)
            .finalize();

        Sha256::new()
            .set_state(self.outer_partial, BLOCK_LEN)
            .update(&inner_local)
            .finalize()
    }
}

fn pad_block(key: &[u8; BLOCK_LEN], pad: u8) -> [u8; BLOCK_LEN] {
    key.map(|b| b ^ pad)
}

/// Computes HMAC-SHA256 of `msg` under `key`.
///
/// Returns an error if `key` is longer than 64 bytes.
pub fn hmac_sha256(key: &[u8], msg: &[u8]) -> Result<[u8; 32], HashError> {
    Ok(HmacSha256::new(key)?.finalize(msg))
}
