//! The SHA-256 compression engine.

use hss_common::{block_to_words, state_to_bytes};

use crate::HashError;

pub(crate) mod checkpoint;
pub(crate) mod pad;

use pad::padding;

/// Length of a SHA-256 block in bytes.
pub const BLOCK_LEN: usize = 64;

/// The initial hash state of SHA-256.
pub const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// The digest of SHA256("").
pub const EMPTY_HASH: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

/// Round constants.
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// An intermediate SHA-256 state of eight words.
///
/// A checkpoint is a `HashState` taken after all whole 64-byte blocks that two
/// or more messages have in common. States are plain values: resuming from
/// one never modifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashState([u32; 8]);

impl Default for HashState {
    fn default() -> Self {
        Self(SHA256_IV)
    }
}

impl From<[u32; 8]> for HashState {
    fn from(words: [u32; 8]) -> Self {
        Self(words)
    }
}

impl HashState {
    /// Creates a state from its eight words.
    pub const fn new(words: [u32; 8]) -> Self {
        Self(words)
    }

    /// Creates a state from its 32-byte big-endian encoding.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    /// Returns the eight words of the state.
    pub fn words(&self) -> [u32; 8] {
        self.0
    }

    /// Returns the big-endian encoding of the state. For a final state this
    /// is the digest.
    pub fn to_bytes(&self) -> [u8; 32] {
        state_to_bytes(self.0)
    }

    /// Returns the state after all whole blocks of `prefix`, starting from the
    /// SHA-256 IV.
    ///
    /// Returns an error if `prefix` is not a whole number of blocks.
    pub fn after_blocks(prefix: &[u8]) -> Result<Self, HashError> {
        Self::default().compress_blocks(prefix)
    }

    /// Runs the compression function over every block of `data`.
    ///
    /// Returns an error if `data` is not a whole number of blocks.
    pub fn compress_blocks(self, data: &[u8]) -> Result<Self, HashError> {
        if data.len() % BLOCK_LEN != 0 {
            return Err(HashError::length(format!(
                "{} bytes is not a whole number of blocks",
                data.len()
            )));
        }

        Ok(data
            .chunks_exact(BLOCK_LEN)
            .fold(self, |state, block| state.compress(&as_block(block))))
    }

    /// Runs the 64-round compression function over a single block.
    pub fn compress(self, block: &[u8; BLOCK_LEN]) -> Self {
        let mut w = [0u32; 64];
        w[..16].copy_from_slice(&block_to_words(block));
        for j in 16..64 {
            let s0 = w[j - 15].rotate_right(7) ^ w[j - 15].rotate_right(18) ^ (w[j - 15] >> 3);
            let s1 = w[j - 2].rotate_right(17) ^ w[j - 2].rotate_right(19) ^ (w[j - 2] >> 10);
            w[j] = w[j - 16]
                .wrapping_add(s0)
                .wrapping_add(w[j - 7])
                .wrapping_add(s1);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.0;
        for j in 0..64 {
            let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ (!e & g);
            let t1 = h
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(K[j])
                .wrapping_add(w[j]);

            let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let t2 = s0.wrapping_add(maj);

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        let mut state = self.0;
        for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *word = word.wrapping_add(value);
        }
        Self(state)
    }
}

/// Copies a chunk yielded by `chunks_exact(BLOCK_LEN)` into a block.
fn as_block(chunk: &[u8]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(chunk);
    block
}

/// Computes SHA256(`input`).
pub fn sha256(input: &[u8]) -> [u8; 32] {
    if input.is_empty() {
        return EMPTY_HASH;
    }

    let mut padded = Vec::with_capacity(input.len() + 2 * BLOCK_LEN);
    padded.extend_from_slice(input);
    padded.extend_from_slice(&padding(input.len()));

    padded
        .chunks_exact(BLOCK_LEN)
        .fold(HashState::default(), |state, block| {
            state.compress(&as_block(block))
        })
        .to_bytes()
}

/// An incremental SHA-256 hasher which can start from an intermediate state.
#[derive(Debug, Clone, Default)]
pub struct Sha256 {
    state: HashState,
    /// Number of bytes already compressed into `state`.
    processed: usize,
    /// Bytes not yet forming a whole block.
    buffer: Vec<u8>,
}

impl Sha256 {
    /// Creates a new hasher starting from the SHA-256 IV.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state of the hasher.
    ///
    /// # Arguments
    ///
    /// * `state` - The intermediate state.
    /// * `processed` - The number of message bytes compressed into `state`.
    ///
    /// # Panics
    ///
    /// Panics if `processed` is not a multiple of the block length.
    pub fn set_state(&mut self, state: HashState, processed: usize) -> &mut Self {
        assert!(
            processed % BLOCK_LEN == 0,
            "a state can only be taken at a block boundary"
        );

        self.state = state;
        self.processed = processed;
        self.buffer.clear();
        self
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);

        let whole = self.buffer.len() - self.buffer.len() % BLOCK_LEN;
        for block in self.buffer[..whole].chunks_exact(BLOCK_LEN) {
            self.state = self.state.compress(&as_block(block));
        }
        self.processed += whole;
        self.buffer.drain(..whole);
        self
    }

    /// Returns the intermediate state and the number of bytes compressed into
    /// it. Buffered bytes are not included.
    pub fn state(&self) -> (HashState, usize) {
        (self.state, self.processed)
    }

    /// Pads the message and returns the digest.
    pub fn finalize(&self) -> [u8; 32] {
        let len = self.processed + self.buffer.len();

        let mut last = self.buffer.clone();
        last.extend_from_slice(&padding(len));

        last.chunks_exact(BLOCK_LEN)
            .fold(self.state, |state, block| state.compress(&as_block(block)))
            .to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{compress_256, reference_sha256};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")]
    #[case::abc(b"abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")]
    #[case::two_blocks(
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    )]
    fn test_sha256_known_answer(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(hex::encode(sha256(input)), expected);
    }

    #[test]
    fn test_empty_hash_constant() {
        let computed = HashState::default()
            .compress_blocks(&padding(0))
            .unwrap()
            .to_bytes();

        assert_eq!(computed, EMPTY_HASH);
    }

    #[test]
    fn test_sha256_reference() {
        let mut rng = StdRng::seed_from_u64(0);
        for len in [1, 55, 56, 63, 64, 65, 119, 120, 128, 300, 1000] {
            let mut input = vec![0u8; len];
            rng.fill(&mut input[..]);

            assert_eq!(sha256(&input), reference_sha256(&input), "length {len}");
        }
    }

    #[test]
    fn test_compress_reference() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut data = [0u8; 192];
        rng.fill(&mut data[..]);

        let state = HashState::after_blocks(&data).unwrap();

        assert_eq!(state.words(), compress_256(SHA256_IV, &data));
    }

    #[test]
    fn test_compress_blocks_unaligned() {
        let err = HashState::default().compress_blocks(&[0u8; 65]).unwrap_err();
        assert!(err.to_string().contains("whole number of blocks"));
    }

    #[test]
    fn test_state_bytes() {
        let state = HashState::new(SHA256_IV);
        assert_eq!(HashState::from_bytes(&state.to_bytes()), state);
    }

    #[test]
    fn test_hasher_resume() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut data = vec![0u8; 250];
        rng.fill(&mut data[..]);

        let mut hasher = Sha256::new();
        hasher.update(&data[..10]).update(&data[10..150]);
        let (state, processed) = hasher.state();
        assert_eq!(processed, 128);

        let mut resumed = Sha256::new();
        resumed.set_state(state, processed).update(&data[128..]);

        hasher.update(&data[150..]);

        assert_eq!(hasher.finalize(), reference_sha256(&data));
        assert_eq!(resumed.finalize(), reference_sha256(&data));
    }
}
