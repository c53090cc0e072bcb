//! Byte and word helpers shared between the cipher, hash and key schedule
//! crates.
//!
//! Every function here is pure. Length contracts are checked with assertions:
//! a violation is a programming error in the caller, not a recoverable
//! condition.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod convert;
mod ops;

pub use convert::{
    block_to_words, bytes_to_words, length_to_be_bytes, state_to_bytes, words_to_bytes,
};
pub use ops::{concat, prefix, xor_prefix, xor_with_byte};
