//! Fixed-width conversions between bytes and big-endian words.

/// Converts bytes into big-endian 32-bit words.
///
/// # Panics
///
/// Panics if the length of `bytes` is not a multiple of 4.
pub fn bytes_to_words(bytes: &[u8]) -> Vec<u32> {
    assert!(
        bytes.len() % 4 == 0,
        "byte length {} is not a multiple of 4",
        bytes.len()
    );

    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Converts 32-bit words into their big-endian byte representation.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}

/// Converts a 64-byte block into sixteen big-endian words.
pub fn block_to_words(block: &[u8; 64]) -> [u32; 16] {
    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Converts an eight-word hash state into its 32-byte digest form.
pub fn state_to_bytes(state: [u32; 8]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    bytes
}

/// Encodes a byte length as the 64-bit big-endian bit length used by SHA-256
/// padding.
pub fn length_to_be_bytes(len_in_bytes: u64) -> [u8; 8] {
    len_in_bytes.wrapping_mul(8).to_be_bytes()
}
