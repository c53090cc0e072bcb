use ring::{hkdf, hmac};

pub(crate) fn reference_sha256(msg: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    Sha256::digest(msg).into()
}

pub(crate) fn compress_256(mut state: [u32; 8], msg: &[u8]) -> [u32; 8] {
    use sha2::{
        compress256,
        digest::{
            block_buffer::{BlockBuffer, Eager},
            generic_array::typenum::U64,
        },
    };

    let mut buffer = BlockBuffer::<U64, Eager>::default();
    buffer.digest_blocks(msg, |b| compress256(&mut state, b));
    state
}

pub(crate) fn reference_hmac(key: &[u8], msg: &[u8]) -> [u8; 32] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&key, msg).as_ref().try_into().unwrap()
}

struct OutputLen(usize);

impl hkdf::KeyType for OutputLen {
    fn len(&self) -> usize {
        self.0
    }
}

pub(crate) fn reference_hkdf_expand(prk: &[u8; 32], info: &[u8]) -> [u8; 32] {
    let prk = hkdf::Prk::new_less_safe(hkdf::HKDF_SHA256, prk);
    let info = [info];
    let okm = prk.expand(&info, OutputLen(32)).unwrap();

    let mut out = [0u8; 32];
    okm.fill(&mut out).unwrap();
    out
}
