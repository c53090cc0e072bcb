//! SHA-256 message padding.

use hss_common::length_to_be_bytes;

use super::BLOCK_LEN;

/// Residue above which the length field no longer fits into the last block.
const MAX_SINGLE_BLOCK_RESIDUE: usize = BLOCK_LEN - 9;

/// Returns the number of padding bytes appended to a message of `len` bytes.
///
/// The padding is `0x80`, zeros and the 64-bit big-endian bit length. It
/// fills the current block if at least 9 bytes are left in it, otherwise it
/// spills into one more block.
pub fn pad_len(len: usize) -> usize {
    let residue = len % BLOCK_LEN;
    if residue <= MAX_SINGLE_BLOCK_RESIDUE {
        BLOCK_LEN - residue
    } else {
        2 * BLOCK_LEN - residue
    }
}

/// Returns the padding for a message of `len` bytes.
pub fn padding(len: usize) -> Vec<u8> {
    let mut padding = vec![0u8; pad_len(len)];
    padding[0] = 0x80;

    let n = padding.len();
    padding[n - 8..].copy_from_slice(&length_to_be_bytes(len as u64));
    padding
}
