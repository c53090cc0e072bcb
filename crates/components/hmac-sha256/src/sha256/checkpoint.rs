//! Hashing from checkpoints and of exact-length prefixes.
//!
//! Transcript buffers are sized for the worst case, so every function here
//! takes the declared message length explicitly and never infers it from a
//! buffer's size.

use tracing::trace;

use super::{pad::padding, HashState, BLOCK_LEN};
use crate::HashError;

/// The maximum length of a tail together with its padding.
pub const MAX_TAIL_LEN: usize = 2 * BLOCK_LEN;

/// Computes SHA256 of the first `len` bytes of `input`.
///
/// The whole blocks are taken from `input`. The remaining `len % 64` bytes are
/// taken from the start of `final_block`, because the bytes of `input` past
/// the last whole block may not be those of the declared message.
///
/// Returns an error if `len` exceeds `input` or `final_block` is too short.
pub fn sha256_prefix(input: &[u8], len: usize, final_block: &[u8]) -> Result<[u8; 32], HashError> {
    if len > input.len() {
        return Err(HashError::length(format!(
            "declared length {len} exceeds the input length {}",
            input.len()
        )));
    }

    let whole = len - len % BLOCK_LEN;
    let residue = len % BLOCK_LEN;
    if final_block.len() < residue {
        return Err(HashError::length(format!(
            "final block has {} bytes, expected at least {residue}",
            final_block.len()
        )));
    }

    let mut last = final_block[..residue].to_vec();
    last.extend_from_slice(&padding(len));

    trace!(len, whole_blocks = whole / BLOCK_LEN, "hashing prefix");

    Ok(HashState::default()
        .compress_blocks(&input[..whole])?
        .compress_blocks(&last)?
        .to_bytes())
}

/// Computes SHA256 of a message of `total_len` bytes, resuming from
/// `checkpoint`.
///
/// # Arguments
///
/// * `checkpoint` - The state after all whole blocks preceding the tail.
/// * `tail` - The buffer holding the tail.
/// * `tail_len` - The number of bytes of `tail` belonging to the message.
/// * `total_len` - The declared length of the whole message.
///
/// The checkpoint itself is trusted: nothing here can detect that it does not
/// belong to the message. Returns an error if the lengths are inconsistent or
/// the tail and its padding exceed [`MAX_TAIL_LEN`].
pub fn sha256_resume(
    checkpoint: &HashState,
    tail: &[u8],
    tail_len: usize,
    total_len: usize,
) -> Result<[u8; 32], HashError> {
    if tail_len > tail.len() {
        return Err(HashError::length(format!(
            "tail length {tail_len} exceeds the tail buffer of {} bytes",
            tail.len()
        )));
    } else if tail_len > total_len {
        return Err(HashError::length(format!(
            "tail length {tail_len} exceeds the total length {total_len}"
        )));
    } else if (total_len - tail_len) % BLOCK_LEN != 0 {
        return Err(HashError::length(format!(
            "tail of {tail_len} bytes does not start on a block boundary of a \
             {total_len} byte message"
        )));
    }

    let mut last = tail[..tail_len].to_vec();
    last.extend_from_slice(&padding(total_len));

    if last.len() > MAX_TAIL_LEN {
        return Err(HashError::length(format!(
            "padded tail of {} bytes exceeds {MAX_TAIL_LEN} bytes",
            last.len()
        )));
    }

    trace!(
        tail_len,
        total_len,
        blocks = last.len() / BLOCK_LEN,
        "resuming from checkpoint"
    );

    Ok(checkpoint.compress_blocks(&last)?.to_bytes())
}

/// Hashes two messages sharing `checkpoint` and the start of `shared_tail`.
///
/// The prefix message is `prefix_len` bytes long and the full message is
/// `full_len` bytes long. Both must place the checkpoint at the same offset.
///
/// Returns `(prefix_digest, full_digest)`.
pub fn sha256_resume_pair(
    checkpoint: &HashState,
    full_len: usize,
    prefix_len: usize,
    shared_tail: &[u8],
    full_tail_len: usize,
    prefix_tail_len: usize,
) -> Result<([u8; 32], [u8; 32]), HashError> {
    if full_len.checked_sub(full_tail_len) != prefix_len.checked_sub(prefix_tail_len) {
        return Err(HashError::length(
            "prefix and full message do not share the checkpoint offset",
        ));
    }

    let prefix = sha256_resume(checkpoint, shared_tail, prefix_tail_len, prefix_len)?;
    let full = sha256_resume(checkpoint, shared_tail, full_tail_len, full_len)?;

    Ok((prefix, full))
}
