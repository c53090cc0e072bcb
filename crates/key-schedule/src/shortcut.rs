//! The key-schedule shortcut.
//!
//! Starting from the handshake secret, the shortcut
//!
//! 1. derives the server handshake traffic keys and decrypts the server's
//!    encrypted handshake messages,
//! 2. hashes TR3 and TR7 by resuming from a checkpoint,
//! 3. verifies ServerFinished over TR7,
//! 4. derives the client application traffic keys and decrypts the client's
//!    application data.
//!
//! No AEAD tag is checked along the way. The session is authenticated by the
//! ServerFinished MAC alone, which binds the handshake secret to the
//! transcript.

use hmac_sha256::{
    derive_iv, derive_key, derive_secret, hkdf_extract, sha256_prefix, sha256_resume_pair,
    HashState, HmacSha256, BLOCK_LEN, EMPTY_HASH,
};
use hss_cipher::{gcm_apply, gcm_apply_window, Key, Nonce};
use hss_common::concat;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{config::VERIFY_DATA_LEN, ShortcutConfig, ShortcutError, TranscriptLayout};

const SERVER_HS_TRAFFIC: &[u8] = b"s hs traffic";
const CLIENT_AP_TRAFFIC: &[u8] = b"c ap traffic";
const FINISHED: &[u8] = b"finished";
const DERIVED: &[u8] = b"derived";

/// The TLS 1.3 handshake secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HandshakeSecret([u8; 32]);

impl HandshakeSecret {
    /// Creates a new handshake secret.
    pub fn new(secret: [u8; 32]) -> Self {
        Self(secret)
    }

    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for HandshakeSecret {
    fn from(secret: [u8; 32]) -> Self {
        Self(secret)
    }
}

impl std::fmt::Debug for HandshakeSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HandshakeSecret").field(&"{{...}}").finish()
    }
}

/// An AES-128-GCM traffic key and IV.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TrafficKeys {
    key: Key,
    iv: Nonce,
}

impl TrafficKeys {
    /// Creates new traffic keys.
    pub fn new(key: Key, iv: Nonce) -> Self {
        Self { key, iv }
    }

    /// Derives the key and IV from a traffic secret.
    pub fn derive(secret: &[u8; 32]) -> Self {
        Self {
            key: derive_key::<16>(secret),
            iv: derive_iv::<12>(secret),
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns the IV.
    pub fn iv(&self) -> &Nonce {
        &self.iv
    }
}

impl std::fmt::Debug for TrafficKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficKeys")
            .field("key", &"{{...}}")
            .field("iv", &"{{...}}")
            .finish()
    }
}

/// Input of the key-schedule shortcut.
///
/// Every length is declared explicitly. Buffers may be longer than the
/// declared length; the excess is ignored.
#[derive(Debug, Clone)]
pub struct ShortcutInput<'a> {
    /// The handshake secret.
    pub handshake_secret: HandshakeSecret,
    /// SHA256(ClientHello || ServerHello).
    pub h2: [u8; 32],
    /// The expected hash of TR7, if the caller has one.
    pub h7: Option<[u8; 32]>,
    /// Length of ClientHello || ServerHello.
    pub ch_sh_len: u16,
    /// ClientHello || ServerHello.
    pub ch_sh: &'a [u8],
    /// Length of the encrypted server handshake messages.
    pub serv_ext_len: u16,
    /// The encrypted server handshake messages, ending with ServerFinished.
    pub serv_ext_ct: &'a [u8],
    /// The ciphertext of the transcript tail after the checkpoint.
    pub serv_ext_ct_tail: &'a [u8],
    /// Length of the transcript tail after the checkpoint.
    pub serv_ext_tail_len: u8,
    /// The SHA-256 state after all whole blocks before the tail.
    ///
    /// This is trusted: a checkpoint which does not belong to the transcript
    /// cannot be detected.
    pub checkpoint: HashState,
    /// The client's encrypted application data.
    pub appl_ct: &'a [u8],
}

/// Output of the key-schedule shortcut.
#[derive(Debug, Clone)]
pub struct ShortcutOutput {
    /// The client's application data.
    pub plaintext: Vec<u8>,
    /// The decrypted server handshake messages.
    pub extensions: Vec<u8>,
    /// Server handshake traffic keys.
    pub server_handshake: TrafficKeys,
    /// Client application traffic keys.
    pub client_application: TrafficKeys,
    /// Hash of TR3, resumed from the checkpoint.
    pub h3: [u8; 32],
    /// Hash of TR3, recomputed from the decrypted messages.
    pub h3_new: [u8; 32],
    /// Hash of TR7, resumed from the checkpoint.
    pub h7: [u8; 32],
    /// The ServerFinished verify data computed over `h7`.
    pub sf_calculated: [u8; 32],
}

/// Runs the key-schedule shortcut.
#[derive(Debug, Clone, Default)]
pub struct KeySchedule {
    config: ShortcutConfig,
}

impl KeySchedule {
    /// Creates a new instance.
    pub fn new(config: ShortcutConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ShortcutConfig {
        &self.config
    }

    /// Runs the shortcut on `input`.
    #[instrument(level = "debug", skip_all, err)]
    pub fn run(&self, input: &ShortcutInput<'_>) -> Result<ShortcutOutput, ShortcutError> {
        let layout = TranscriptLayout::new(
            input.ch_sh_len.into(),
            input.serv_ext_len.into(),
            self.config.finished_len(),
        )?;
        self.check_input(input, &layout)?;

        debug!(
            tr3_len = layout.tr3_len(),
            checkpoint_len = layout.checkpoint_len(),
            tail_len = layout.tail_len(),
            "transcript layout"
        );

        let hs = input.handshake_secret.as_bytes();
        let shts = Zeroizing::new(derive_secret(hs, SERVER_HS_TRAFFIC, &input.h2));
        let server_handshake = TrafficKeys::derive(&shts);

        let extensions = gcm_apply(
            server_handshake.key(),
            server_handshake.iv(),
            &input.serv_ext_ct[..layout.serv_ext_len()],
            0,
        )?;

        let tail_block = u32::try_from(layout.tail_block())
            .map_err(|_| ShortcutError::input("tail block does not fit the counter"))?;
        trace!(tail_block, tail_offset = layout.tail_offset(), "decrypting tail");
        let tail = gcm_apply_window(
            server_handshake.key(),
            server_handshake.iv(),
            &input.serv_ext_ct_tail[..layout.tail_len()],
            tail_block,
            layout.tail_offset(),
        )?;

        let tr3 = concat(&input.ch_sh[..layout.ch_sh_len()], &extensions);
        let h3_new = sha256_prefix(
            &tr3,
            layout.tr3_len(),
            &tr3[layout.tr3_len() / BLOCK_LEN * BLOCK_LEN..],
        )?;

        let (h7, h3) = sha256_resume_pair(
            &input.checkpoint,
            layout.tr3_len(),
            layout.tr7_len(),
            &tail,
            layout.tail_len(),
            layout.h7_tail_len(),
        )?;
        debug!(
            h3 = hex::encode(h3),
            h3_new = hex::encode(h3_new),
            h7 = hex::encode(h7),
            "computed transcript hashes"
        );

        if self.config.check_transcript_hash() && h3 != h3_new {
            return Err(ShortcutError::transcript_mismatch(
                "hash of TR3 resumed from the checkpoint differs from the recomputed hash",
            ));
        }

        if let Some(expected) = input.h7 {
            if expected != h7 {
                return Err(ShortcutError::transcript_mismatch(
                    "hash of TR7 differs from the expected hash",
                ));
            }
        }

        let finished_key = Zeroizing::new(derive_secret(&shts, FINISHED, &[]));
        let sf_calculated = HmacSha256::from_secret(&finished_key).finalize(&h7);
        let sf_transcript = &tail[tail.len() - VERIFY_DATA_LEN..];

        verify_finished(&sf_calculated, sf_transcript)?;
        debug!("server finished verified");

        let dhs = Zeroizing::new(derive_secret(hs, DERIVED, &EMPTY_HASH));
        let ms = Zeroizing::new(hkdf_extract(&dhs, &[0u8; 32]));
        let cats = Zeroizing::new(derive_secret(&ms, CLIENT_AP_TRAFFIC, &h3_new));
        let client_application = TrafficKeys::derive(&cats);

        let plaintext = gcm_apply(
            client_application.key(),
            client_application.iv(),
            input.appl_ct,
            0,
        )?;
        debug!(len = plaintext.len(), "decrypted application data");

        Ok(ShortcutOutput {
            plaintext,
            extensions,
            server_handshake,
            client_application,
            h3,
            h3_new,
            h7,
            sf_calculated,
        })
    }

    fn check_input(
        &self,
        input: &ShortcutInput<'_>,
        layout: &TranscriptLayout,
    ) -> Result<(), ShortcutError> {
        if input.ch_sh.len() < layout.ch_sh_len() {
            return Err(ShortcutError::input(format!(
                "ClientHello || ServerHello buffer of {} bytes is shorter than the declared {}",
                input.ch_sh.len(),
                layout.ch_sh_len()
            )));
        }

        if input.serv_ext_ct.len() < layout.serv_ext_len() {
            return Err(ShortcutError::input(format!(
                "extensions buffer of {} bytes is shorter than the declared {}",
                input.serv_ext_ct.len(),
                layout.serv_ext_len()
            )));
        }

        let tail_len = usize::from(input.serv_ext_tail_len);
        if tail_len != layout.tail_len() {
            return Err(ShortcutError::input(format!(
                "declared tail length {tail_len} does not match the transcript, expected {}",
                layout.tail_len()
            )));
        }

        if input.serv_ext_ct_tail.len() < tail_len {
            return Err(ShortcutError::input(format!(
                "tail buffer of {} bytes is shorter than the declared {tail_len}",
                input.serv_ext_ct_tail.len()
            )));
        }

        Ok(())
    }
}

/// Runs the key-schedule shortcut with the default configuration.
pub fn run_key_schedule_shortcut(
    input: &ShortcutInput<'_>,
) -> Result<ShortcutOutput, ShortcutError> {
    KeySchedule::default().run(input)
}

/// Compares the computed and received ServerFinished verify data.
fn verify_finished(calculated: &[u8], received: &[u8]) -> Result<(), ShortcutError> {
    if calculated.len() != received.len() {
        return Err(ShortcutError::finished_length(format!(
            "computed {} bytes, received {}",
            calculated.len(),
            received.len()
        )));
    }

    if bool::from(calculated.ct_eq(received)) {
        Ok(())
    } else {
        Err(ShortcutError::finished_mismatch())
    }
}
