//! This crate implements the TLS 1.3 key-schedule shortcut.
//!
//! Given the handshake secret of an established TLS 1.3 session, a checkpoint
//! of the handshake transcript hash and the session's ciphertexts, the
//! shortcut recovers the traffic keys, verifies the ServerFinished MAC and
//! decrypts the client's application data. It does so without replaying the
//! handshake and without rehashing the transcript prefix covered by the
//! checkpoint.
//!
//! Only AES-128-GCM with SHA-256 is supported.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod shortcut;
mod transcript;

pub use config::{
    ShortcutConfig, ShortcutConfigBuilder, ShortcutConfigBuilderError, DEFAULT_FINISHED_LEN,
    MAX_FINISHED_LEN,
};
pub use error::ShortcutError;
pub use shortcut::{
    run_key_schedule_shortcut, HandshakeSecret, KeySchedule, ShortcutInput, ShortcutOutput,
    TrafficKeys,
};
pub use transcript::TranscriptLayout;
