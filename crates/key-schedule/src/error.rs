use std::{error::Error, fmt};

use hmac_sha256::HashError;
use hss_cipher::CipherError;

/// An error returned by the key-schedule shortcut.
///
/// Errors fall into two classes. Contract violations mean the input was
/// malformed. Verification failures mean the input was well formed but does
/// not belong to an authentic session.
#[derive(Debug, thiserror::Error)]
pub struct ShortcutError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ShortcutError {
    fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, msg.into())
    }

    pub(crate) fn finished_length(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::FinishedLength, msg.into())
    }

    pub(crate) fn finished_mismatch() -> Self {
        Self {
            kind: ErrorKind::FinishedMismatch,
            source: None,
        }
    }

    pub(crate) fn transcript_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::TranscriptMismatch, msg.into())
    }

    /// Returns `true` if the input was malformed.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self.kind, ErrorKind::Input)
    }

    /// Returns `true` if the input was well formed but the session could not
    /// be authenticated.
    pub fn is_verification_failure(&self) -> bool {
        !self.is_contract_violation()
    }

    /// Returns `true` if the ServerFinished value did not match.
    pub fn is_finished_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::FinishedMismatch)
    }

    /// Returns `true` if two transcript hashes disagreed.
    pub fn is_transcript_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TranscriptMismatch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    Input,
    FinishedLength,
    FinishedMismatch,
    TranscriptMismatch,
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Input => write!(f, "invalid input")?,
            ErrorKind::FinishedLength => write!(f, "finished length mismatch")?,
            ErrorKind::FinishedMismatch => write!(f, "finished verification failed")?,
            ErrorKind::TranscriptMismatch => write!(f, "transcript hash mismatch")?,
        }

        if let Some(ref source) = self.source {
            write!(f, " caused by: {}", source)?;
        }

        Ok(())
    }
}

impl From<HashError> for ShortcutError {
    fn from(err: HashError) -> Self {
        Self::new(ErrorKind::Input, err)
    }
}

impl From<CipherError> for ShortcutError {
    fn from(err: CipherError) -> Self {
        Self::new(ErrorKind::Input, err)
    }
}
