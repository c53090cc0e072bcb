//! GCM counter-mode keystream.
//!
//! The counter block for keystream block `i` of a call is
//! `nonce || BE32(starting_block + i + 2)`. Counters 0 and 1 belong to the
//! GCM authentication tag in a real AEAD and are never produced here.

use hss_common::xor_prefix;
use tracing::trace;

use crate::{Aes128, Block, BlockCipher, CipherError, Key, Nonce};

/// The counter of the first keystream block of a record.
pub const GCM_FIRST_KEYSTREAM_COUNTER: u32 = 2;

const BLOCK_LEN: usize = 16;

/// Returns the 16-byte counter block `nonce || BE32(counter)`.
pub fn counter_block(nonce: &Nonce, counter: u32) -> Block {
    let mut block = [0u8; BLOCK_LEN];
    block[..12].copy_from_slice(nonce);
    block[12..].copy_from_slice(&counter.to_be_bytes());
    block
}

/// A counter-mode keystream over a block cipher.
pub struct Keystream<C> {
    cipher: C,
    nonce: Nonce,
}

impl<C> std::fmt::Debug for Keystream<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keystream")
            .field("cipher", &"{{...}}")
            .field("nonce", &"{{...}}")
            .finish()
    }
}

impl<C: BlockCipher> Keystream<C> {
    /// Creates a new keystream.
    pub fn new(cipher: C, nonce: Nonce) -> Self {
        Self { cipher, nonce }
    }

    /// Returns `block_count` consecutive keystream blocks, the first one being
    /// block `starting_block` of the record.
    pub fn blocks(&self, starting_block: u32, block_count: usize) -> Result<Vec<u8>, CipherError> {
        let first = starting_block
            .checked_add(GCM_FIRST_KEYSTREAM_COUNTER)
            .ok_or_else(|| CipherError::counter("starting block overflows the counter"))?;

        let mut stream = Vec::with_capacity(block_count * BLOCK_LEN);
        for i in 0..block_count {
            let counter = u32::try_from(i)
                .ok()
                .and_then(|i| first.checked_add(i))
                .ok_or_else(|| CipherError::counter("keystream overflows the counter"))?;

            stream.extend_from_slice(
                &self
                    .cipher
                    .encrypt_block(&counter_block(&self.nonce, counter)),
            );
        }

        Ok(stream)
    }

    /// XORs `data` with the keystream starting at block `starting_block`.
    ///
    /// Encryption and decryption are the same operation.
    pub fn apply(&self, data: &[u8], starting_block: u32) -> Result<Vec<u8>, CipherError> {
        let block_count = data.len().div_ceil(BLOCK_LEN);
        trace!(len = data.len(), starting_block, block_count, "applying keystream");

        let stream = self.blocks(starting_block, block_count)?;

        Ok(xor_prefix(data, &stream, data.len()))
    }

    /// XORs `window` with the keystream beginning `offset` bytes into block
    /// `starting_block`.
    ///
    /// This recovers data which does not start on a block boundary of the
    /// record.
    pub fn apply_window(
        &self,
        window: &[u8],
        starting_block: u32,
        offset: usize,
    ) -> Result<Vec<u8>, CipherError> {
        if offset >= BLOCK_LEN {
            return Err(CipherError::window(format!(
                "offset {offset} is not inside a single block"
            )));
        } else if window.is_empty() {
            return Ok(Vec::new());
        }

        let block_count = (offset + window.len()).div_ceil(BLOCK_LEN);
        trace!(
            len = window.len(),
            starting_block,
            offset,
            block_count,
            "applying keystream window"
        );

        let stream = self.blocks(starting_block, block_count)?;

        Ok(xor_prefix(window, &stream[offset..], window.len()))
    }
}

/// XORs `data` with the AES-128 GCM keystream for `key` and `nonce`, starting
/// at block `starting_block` of the record.
pub fn gcm_apply(
    key: &Key,
    nonce: &Nonce,
    data: &[u8],
    starting_block: u32,
) -> Result<Vec<u8>, CipherError> {
    Keystream::new(Aes128::new(key), *nonce).apply(data, starting_block)
}

/// Windowed variant of [`gcm_apply`].
///
/// See [`Keystream::apply_window`].
pub fn gcm_apply_window(
    key: &Key,
    nonce: &Nonce,
    window: &[u8],
    starting_block: u32,
    offset: usize,
) -> Result<Vec<u8>, CipherError> {
    Keystream::new(Aes128::new(key), *nonce).apply_window(window, starting_block, offset)
}
