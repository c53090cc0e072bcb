//! The AES-128 block cipher.
//!
//! [`Aes128`] implements [`crate::BlockCipher`] using a key schedule of 44
//! words and a 4x4 byte state that is transformed by value each round.

use std::fmt::Debug;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Block, BlockCipher, CipherError, Key};

mod tables;

use tables::{INV_SBOX, RCON, REDUCTION, SBOX};

/// Number of rounds of AES-128.
const ROUNDS: usize = 10;
/// Number of words in the AES-128 key schedule.
const SCHEDULE_WORDS: usize = 4 * (ROUNDS + 1);

/// The expanded AES-128 key: 11 round keys of 4 words each.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys([u32; SCHEDULE_WORDS]);

impl RoundKeys {
    /// Returns the words of the whole schedule.
    pub fn words(&self) -> &[u32; SCHEDULE_WORDS] {
        &self.0
    }

    /// Returns the round key for `round`.
    fn round(&self, round: usize) -> [u32; 4] {
        let mut key = [0u32; 4];
        key.copy_from_slice(&self.0[4 * round..4 * round + 4]);
        key
    }
}

impl Debug for RoundKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RoundKeys").field(&"{{...}}").finish()
    }
}

/// Expands a 128-bit key into the AES-128 key schedule.
pub fn expand_key(key: &Key) -> RoundKeys {
    let mut w = [0u32; SCHEDULE_WORDS];

    for (word, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in 4..SCHEDULE_WORDS {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / 4]) << 24);
        }
        w[i] = w[i - 4] ^ temp;
    }

    RoundKeys(w)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(|b| SBOX[b as usize]))
}

/// Multiplies `x` by the constant `c` in GF(2^8).
pub fn gal_mul(mut x: u8, mut c: u8) -> u8 {
    let mut p = 0u8;
    while c != 0 {
        if c & 1 != 0 {
            p ^= x;
        }
        c >>= 1;

        let hi = x & 0x80;
        x <<= 1;
        if hi != 0 {
            x ^= REDUCTION;
        }
    }
    p
}

/// The AES state, indexed as `state[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State([[u8; 4]; 4]);

impl State {
    /// Loads a block column-major.
    fn from_block(block: &Block) -> Self {
        let mut s = [[0u8; 4]; 4];
        for (i, byte) in block.iter().enumerate() {
            s[i % 4][i / 4] = *byte;
        }
        Self(s)
    }

    fn to_block(self) -> Block {
        let mut block = [0u8; 16];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = self.0[i % 4][i / 4];
        }
        block
    }

    fn add_round_key(self, key: [u32; 4]) -> Self {
        let mut s = self.0;
        for (col, word) in key.iter().enumerate() {
            for (row, byte) in word.to_be_bytes().iter().enumerate() {
                s[row][col] ^= byte;
            }
        }
        Self(s)
    }

    fn sub_bytes(self) -> Self {
        Self(self.0.map(|row| row.map(|b| SBOX[b as usize])))
    }

    fn inv_sub_bytes(self) -> Self {
        Self(self.0.map(|row| row.map(|b| INV_SBOX[b as usize])))
    }

    /// Rotates row `r` left by `r` positions.
    fn shift_rows(self) -> Self {
        let mut s = [[0u8; 4]; 4];
        for (r, row) in s.iter_mut().enumerate() {
            for (c, byte) in row.iter_mut().enumerate() {
                *byte = self.0[r][(c + r) % 4];
            }
        }
        Self(s)
    }

    fn inv_shift_rows(self) -> Self {
        let mut s = [[0u8; 4]; 4];
        for (r, row) in self.0.iter().enumerate() {
            for (c, byte) in row.iter().enumerate() {
                s[r][(c + r) % 4] = *byte;
            }
        }
        Self(s)
    }

    fn mix_columns(self) -> Self {
        self.mix_with([2, 3, 1, 1])
    }

    fn inv_mix_columns(self) -> Self {
        self.mix_with([14, 11, 13, 9])
    }

    /// Multiplies every column by the circulant matrix whose first row is
    /// `coeffs`.
    fn mix_with(self, coeffs: [u8; 4]) -> Self {
        let mut s = [[0u8; 4]; 4];
        for c in 0..4 {
            let a = [self.0[0][c], self.0[1][c], self.0[2][c], self.0[3][c]];
            for (r, row) in s.iter_mut().enumerate() {
                row[c] = (0..4).fold(0u8, |acc, k| acc ^ gal_mul(a[k], coeffs[(k + 4 - r) % 4]));
            }
        }
        Self(s)
    }
}

/// AES-128 with an expanded key.
#[derive(Clone)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Debug for Aes128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes128")
            .field("round_keys", &"{{...}}")
            .finish()
    }
}

impl Aes128 {
    /// Creates a new cipher from a 128-bit key.
    pub fn new(key: &Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Creates a new cipher from a key slice.
    ///
    /// Returns an error if the slice is not exactly 16 bytes.
    pub fn new_from_slice(key: &[u8]) -> Result<Self, CipherError> {
        let key: &Key = key.try_into().map_err(|_| {
            CipherError::key(format!("AES-128 key must be 16 bytes, got {}", key.len()))
        })?;

        Ok(Self::new(key))
    }

    /// Returns the expanded key.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts a single block.
    pub fn encrypt_block(&self, plaintext: &Block) -> Block {
        let mut state = State::from_block(plaintext).add_round_key(self.round_keys.round(0));

        for round in 1..ROUNDS {
            state = state
                .sub_bytes()
                .shift_rows()
                .mix_columns()
                .add_round_key(self.round_keys.round(round));
        }

        state
            .sub_bytes()
            .shift_rows()
            .add_round_key(self.round_keys.round(ROUNDS))
            .to_block()
    }

    /// Decrypts a single block.
    pub fn decrypt_block(&self, ciphertext: &Block) -> Block {
        let mut state = State::from_block(ciphertext).add_round_key(self.round_keys.round(ROUNDS));

        for round in (1..ROUNDS).rev() {
            state = state
                .inv_shift_rows()
                .inv_sub_bytes()
                .add_round_key(self.round_keys.round(round))
                .inv_mix_columns();
        }

        state
            .inv_shift_rows()
            .inv_sub_bytes()
            .add_round_key(self.round_keys.round(0))
            .to_block()
    }
}

impl BlockCipher for Aes128 {
    fn encrypt_block(&self, block: &Block) -> Block {
        Aes128::encrypt_block(self, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    fn from_hex<const N: usize>(s: &str) -> [u8; N] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    fn aes128(key: [u8; 16], msg: [u8; 16]) -> [u8; 16] {
        use ::aes::Aes128 as TestAes128;
        use ::cipher::{BlockEncrypt, KeyInit};

        let mut msg = msg.into();
        let cipher = TestAes128::new(&key.into());
        cipher.encrypt_block(&mut msg);
        msg.into()
    }

    // FIPS-197 Appendix C.1 and Appendix B.
    #[rstest]
    #[case(
        "000102030405060708090a0b0c0d0e0f",
        "00112233445566778899aabbccddeeff",
        "69c4e0d86a7b0430d8cdb78070b4c55a"
    )]
    #[case(
        "2b7e151628aed2a6abf7158809cf4f3c",
        "3243f6a8885a308d313198a2e0370734",
        "3925841d02dc09fbdc118597196a0b32"
    )]
    fn test_aes_known_answer(#[case] key: &str, #[case] pt: &str, #[case] ct: &str) {
        let aes = Aes128::new(&from_hex(key));

        assert_eq!(aes.encrypt_block(&from_hex(pt)), from_hex::<16>(ct));
        assert_eq!(aes.decrypt_block(&from_hex(ct)), from_hex::<16>(pt));
    }

    #[test]
    fn test_aes_reference() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..32 {
            let key: [u8; 16] = rng.random();
            let msg: [u8; 16] = rng.random();

            let aes = Aes128::new(&key);
            let ciphertext = aes.encrypt_block(&msg);

            assert_eq!(ciphertext, aes128(key, msg));
            assert_eq!(aes.decrypt_block(&ciphertext), msg);
        }
    }

    // FIPS-197 Appendix A.1.
    #[test]
    fn test_expand_key() {
        let schedule = expand_key(&from_hex("2b7e151628aed2a6abf7158809cf4f3c"));
        let words = schedule.words();

        assert_eq!(words[0], 0x2b7e1516);
        assert_eq!(words[4], 0xa0fafe17);
        assert_eq!(words[10], 0x5935807a);
        assert_eq!(words[43], 0xb6630ca6);
    }

    #[test]
    fn test_new_from_slice() {
        assert!(Aes128::new_from_slice(&[0u8; 16]).is_ok());

        let err = Aes128::new_from_slice(&[0u8; 15]).unwrap_err();
        assert!(err.to_string().contains("must be 16 bytes"));
    }

    #[test]
    fn test_tables() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
        for x in 0..=255u8 {
            assert_eq!(INV_SBOX[SBOX[x as usize] as usize], x);
        }
        assert_eq!(RCON[1..], [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36]);
    }

    // FIPS-197 Section 4.2.
    #[rstest]
    #[case(0x57, 0x01, 0x57)]
    #[case(0x57, 0x02, 0xae)]
    #[case(0x57, 0x03, 0xf9)]
    #[case(0x57, 0x13, 0xfe)]
    #[case(0x57, 0x83, 0xc1)]
    #[case(0x00, 0x0e, 0x00)]
    fn test_gal_mul(#[case] x: u8, #[case] c: u8, #[case] expected: u8) {
        assert_eq!(gal_mul(x, c), expected);
    }

    #[test]
    fn test_mix_columns_inverse() {
        let state = State::from_block(&from_hex("db135345f20a225c01010101c6c6c6c6"));
        let mixed = state.mix_columns();

        // FIPS-197 MixColumns example column: db 13 53 45 -> 8e 4d a1 bc
        assert_eq!(
            [mixed.0[0][0], mixed.0[1][0], mixed.0[2][0], mixed.0[3][0]],
            [0x8e, 0x4d, 0xa1, 0xbc]
        );
        assert_eq!(mixed.inv_mix_columns(), state);
        assert_eq!(state.shift_rows().inv_shift_rows(), state);
    }
}
