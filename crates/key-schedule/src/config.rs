//! Configuration of the key-schedule shortcut.

use hmac_sha256::{BLOCK_LEN, MAX_TAIL_LEN};
use serde::{Deserialize, Serialize};

/// Length of the ServerFinished handshake message: a 4-byte header and 32
/// bytes of verify data.
pub const DEFAULT_FINISHED_LEN: usize = 36;

/// Length of the ServerFinished verify data for SHA-256 cipher suites.
pub(crate) const VERIFY_DATA_LEN: usize = 32;

/// Largest ServerFinished length whose tail always fits the checkpoint buffer.
///
/// The tail holds up to 63 bytes before ServerFinished and needs at least 9
/// bytes of padding.
pub const MAX_FINISHED_LEN: usize = MAX_TAIL_LEN - (BLOCK_LEN - 1) - 9;

/// Checks that ServerFinished fits between the verify data and the tail
/// buffer.
pub(crate) fn check_finished_len(finished_len: usize) -> Result<(), String> {
    if !(VERIFY_DATA_LEN..=MAX_FINISHED_LEN).contains(&finished_len) {
        return Err(format!(
            "finished_len must be between {VERIFY_DATA_LEN} and {MAX_FINISHED_LEN}, got {finished_len}"
        ));
    }

    Ok(())
}

/// Configuration for the [`KeySchedule`](crate::KeySchedule).
#[derive(derive_builder::Builder, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ShortcutConfig {
    /// Length of the ServerFinished message at the end of the encrypted
    /// extensions.
    #[builder(default = "DEFAULT_FINISHED_LEN")]
    finished_len: usize,
    /// Whether the checkpoint-derived transcript hash must match the one
    /// recomputed from the decrypted extensions.
    #[builder(default = "true")]
    check_transcript_hash: bool,
}

impl ShortcutConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        check_finished_len(self.finished_len.unwrap_or(DEFAULT_FINISHED_LEN))
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            finished_len: DEFAULT_FINISHED_LEN,
            check_transcript_hash: true,
        }
    }
}

impl ShortcutConfig {
    /// Creates a new builder for `ShortcutConfig`.
    pub fn builder() -> ShortcutConfigBuilder {
        ShortcutConfigBuilder::default()
    }

    /// Returns the length of the ServerFinished message.
    pub fn finished_len(&self) -> usize {
        self.finished_len
    }

    /// Returns whether the two H3 computations must agree.
    pub fn check_transcript_hash(&self) -> bool {
        self.check_transcript_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_matches_builder() {
        assert_eq!(
            ShortcutConfig::builder().build().unwrap(),
            ShortcutConfig::default()
        );
    }

    #[rstest]
    #[case::verify_data_only(32, true)]
    #[case::largest(56, true)]
    #[case::short(31, false)]
    #[case::tail_overflows(57, false)]
    #[case::tail_overflows_block(64, false)]
    fn test_finished_len_bounds(#[case] finished_len: usize, #[case] valid: bool) {
        let config = ShortcutConfig::builder().finished_len(finished_len).build();

        assert_eq!(config.is_ok(), valid);
    }

    #[test]
    fn test_serde() {
        let config = ShortcutConfig::builder()
            .check_transcript_hash(false)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<ShortcutConfig>(&json).unwrap(), config);

        let partial: ShortcutConfig = serde_json::from_str(r#"{"finished_len":36}"#).unwrap();
        assert_eq!(partial, ShortcutConfig::default());
    }
}
