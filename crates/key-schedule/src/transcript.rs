//! Layout of the handshake transcript around the checkpoint.
//!
//! ```text
//! TR3 = ClientHello || ServerHello || EncryptedExtensions..ServerFinished
//!       |<-------- ch_sh_len ------>|<----------- serv_ext_len ------------>|
//!       |<-- whole blocks (checkpoint) -->|<------------ tail ------------->|
//!                                         |<---- h7 tail ---->|<- finished ->|
//! ```
//!
//! TR7 is TR3 without the trailing ServerFinished message. The checkpoint is
//! taken at the last 64-byte boundary at or before the end of TR7, so both
//! transcripts resume from it.

use hmac_sha256::{HashState, BLOCK_LEN};

use crate::{config::check_finished_len, ShortcutError};

/// AES block length, i.e. the granularity of the GCM keystream.
const CIPHER_BLOCK_LEN: usize = 16;

/// Offsets of the transcript pieces the shortcut works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLayout {
    ch_sh_len: usize,
    serv_ext_len: usize,
    finished_len: usize,
}

impl TranscriptLayout {
    /// Creates a new layout.
    ///
    /// # Arguments
    ///
    /// * `ch_sh_len` - Length of ClientHello || ServerHello.
    /// * `serv_ext_len` - Length of the encrypted server handshake messages,
    ///   ServerFinished included.
    /// * `finished_len` - Length of the ServerFinished message.
    ///
    /// Returns an error if `finished_len` is outside the supported range, if
    /// the extensions cannot hold ServerFinished or if the tail reaches back
    /// into the ServerHello.
    pub fn new(
        ch_sh_len: usize,
        serv_ext_len: usize,
        finished_len: usize,
    ) -> Result<Self, ShortcutError> {
        check_finished_len(finished_len).map_err(ShortcutError::input)?;

        if serv_ext_len < finished_len {
            return Err(ShortcutError::input(format!(
                "extensions of {serv_ext_len} bytes cannot hold a {finished_len} byte finished message"
            )));
        }

        let layout = Self {
            ch_sh_len,
            serv_ext_len,
            finished_len,
        };

        if layout.checkpoint_len() < ch_sh_len {
            return Err(ShortcutError::input(format!(
                "tail of {} bytes starts before the extensions",
                layout.tail_len()
            )));
        }

        Ok(layout)
    }

    /// Returns the length of ClientHello || ServerHello.
    pub fn ch_sh_len(&self) -> usize {
        self.ch_sh_len
    }

    /// Returns the length of the encrypted server handshake messages.
    pub fn serv_ext_len(&self) -> usize {
        self.serv_ext_len
    }

    /// Returns the length of TR3.
    pub fn tr3_len(&self) -> usize {
        self.ch_sh_len + self.serv_ext_len
    }

    /// Returns the length of TR7, i.e. TR3 without ServerFinished.
    pub fn tr7_len(&self) -> usize {
        self.tr3_len() - self.finished_len
    }

    /// Returns the number of transcript bytes covered by the checkpoint.
    pub fn checkpoint_len(&self) -> usize {
        self.tr7_len() / BLOCK_LEN * BLOCK_LEN
    }

    /// Returns the length of the TR3 tail after the checkpoint.
    pub fn tail_len(&self) -> usize {
        self.tr3_len() - self.checkpoint_len()
    }

    /// Returns the length of the TR7 tail after the checkpoint.
    pub fn h7_tail_len(&self) -> usize {
        self.tr7_len() - self.checkpoint_len()
    }

    /// Returns the offset of the tail within the extensions.
    pub fn tail_start(&self) -> usize {
        self.serv_ext_len - self.tail_len()
    }

    /// Returns the keystream block in which the tail starts.
    ///
    /// This is `tail_start / 16` for any tail start; `(serv_ext_len / 64) * 4`
    /// only agrees with it when the tail starts on that 64-byte boundary.
    pub fn tail_block(&self) -> usize {
        self.tail_start() / CIPHER_BLOCK_LEN
    }

    /// Returns the offset of the tail within its first keystream block.
    pub fn tail_offset(&self) -> usize {
        self.tail_start() % CIPHER_BLOCK_LEN
    }

    /// Returns the tail of `transcript`.
    ///
    /// Returns an error if `transcript` is shorter than TR3.
    pub fn tail_of<'a>(&self, transcript: &'a [u8]) -> Result<&'a [u8], ShortcutError> {
        self.check_len(transcript)?;

        Ok(&transcript[self.checkpoint_len()..self.tr3_len()])
    }

    /// Returns the checkpoint of `transcript`.
    ///
    /// The shortcut itself never calls this: it trusts the checkpoint it is
    /// given.
    pub fn checkpoint_of(&self, transcript: &[u8]) -> Result<HashState, ShortcutError> {
        self.check_len(transcript)?;

        Ok(HashState::after_blocks(
            &transcript[..self.checkpoint_len()],
        )?)
    }

    fn check_len(&self, transcript: &[u8]) -> Result<(), ShortcutError> {
        if transcript.len() < self.tr3_len() {
            return Err(ShortcutError::input(format!(
                "transcript of {} bytes is shorter than TR3 of {} bytes",
                transcript.len(),
                self.tr3_len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 384, 36, 448, 36)]
    #[case(200, 300, 36, 448, 52)]
    #[case(128, 100, 36, 192, 36)]
    #[case(0, 99, 36, 0, 99)]
    fn test_layout(
        #[case] ch_sh_len: usize,
        #[case] serv_ext_len: usize,
        #[case] finished_len: usize,
        #[case] checkpoint_len: usize,
        #[case] tail_len: usize,
    ) {
        let layout = TranscriptLayout::new(ch_sh_len, serv_ext_len, finished_len).unwrap();

        assert_eq!(layout.checkpoint_len(), checkpoint_len);
        assert_eq!(layout.tail_len(), tail_len);
        assert_eq!(layout.h7_tail_len() + finished_len, tail_len);
        assert_eq!(layout.checkpoint_len() % 64, 0);
        assert_eq!(layout.tail_start() + tail_len, serv_ext_len);
        assert_eq!(
            layout.tail_block() * 16 + layout.tail_offset(),
            layout.tail_start()
        );
    }

    #[test]
    fn test_tail_before_extensions() {
        let err = TranscriptLayout::new(100, 40, 36).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[rstest]
    #[case::no_verify_data(0)]
    #[case::short(31)]
    #[case::tail_overflows(57)]
    fn test_unsupported_finished_len(#[case] finished_len: usize) {
        let err = TranscriptLayout::new(64, 200, finished_len).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_largest_tail() {
        let layout = TranscriptLayout::new(64, 119, 56).unwrap();

        assert_eq!(layout.tr7_len() % 64, 63);
        assert_eq!(layout.tail_len(), 119);
    }

    #[test]
    fn test_short_extensions() {
        assert!(TranscriptLayout::new(100, 20, 36).is_err());
    }

    #[test]
    fn test_tail_of() {
        let transcript: Vec<u8> = (0..=255).collect();
        let layout = TranscriptLayout::new(64, 150, 36).unwrap();

        let tail = layout.tail_of(&transcript).unwrap();
        assert_eq!(tail, &transcript[128..214]);

        assert!(layout.tail_of(&transcript[..200]).is_err());
    }
}
