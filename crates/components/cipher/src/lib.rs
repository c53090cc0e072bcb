//! This crate provides AES-128 and a GCM-style counter-mode keystream.
//!
//! Both are written from first principles so every step reduces to byte
//! substitutions, rotations, XORs and GF(2^8) multiplications. The keystream
//! never computes or checks an authentication tag: it only produces the
//! confidentiality half of AES-GCM.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod aes;
mod error;
mod keystream;

pub use aes::Aes128;
pub use error::CipherError;
pub use keystream::{
    counter_block, gcm_apply, gcm_apply_window, Keystream, GCM_FIRST_KEYSTREAM_COUNTER,
};

/// AES-128 key.
pub type Key = [u8; 16];
/// GCM nonce, i.e. the TLS 1.3 per-record IV.
pub type Nonce = [u8; 12];
/// A single cipher block.
pub type Block = [u8; 16];

/// A 128-bit block cipher that can drive a counter-mode keystream.
pub trait BlockCipher {
    /// Encrypts a single block.
    fn encrypt_block(&self, block: &Block) -> Block;
}
