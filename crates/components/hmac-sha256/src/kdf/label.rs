//! Computation of HkdfLabel as specified in TLS 1.3.

/// Prefix of every TLS 1.3 label.
const LABEL_PREFIX: &[u8] = b"tls13 ";

/// Returns the byte representation of an HKDF label.
///
/// The layout is `BE16(out_len) || u8 len || "tls13 " || label || u8 len ||
/// ctx`, see RFC 8446 Section 7.1.
///
/// # Panics
///
/// Panics if `out_len`, `label` or `ctx` do not fit their length fields.
pub fn hkdf_label(out_len: usize, label: &[u8], ctx: &[u8]) -> Vec<u8> {
    assert!(
        out_len <= u16::MAX as usize,
        "output length larger than 65535 not supported"
    );
    assert!(
        LABEL_PREFIX.len() + label.len() <= u8::MAX as usize,
        "label too long"
    );
    assert!(ctx.len() <= u8::MAX as usize, "context too long");

    let mut hkdf_label = Vec::with_capacity(hkdf_label_length(label.len(), ctx.len()));
    hkdf_label.extend_from_slice(&(out_len as u16).to_be_bytes());
    hkdf_label.push((LABEL_PREFIX.len() + label.len()) as u8);
    hkdf_label.extend_from_slice(LABEL_PREFIX);
    hkdf_label.extend_from_slice(label);
    hkdf_label.push(ctx.len() as u8);
    hkdf_label.extend_from_slice(ctx);
    hkdf_label
}

/// Returns the length of an HKDF label.
fn hkdf_label_length(label_len: usize, ctx_len: usize) -> usize {
    // 2 : output length as u16
    // 1 : label length as u8
    // 6 : length of "tls13 "
    // 1 : context length as u8
    2 + 1 + LABEL_PREFIX.len() + label_len + 1 + ctx_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hkdf_label() {
        for fixture in test_fixtures() {
            let (label, ctx, expected, out_len) = fixture;
            let hkdf_label = hkdf_label(out_len, label, &ctx);

            assert_eq!(hkdf_label.len(), hkdf_label_length(label.len(), ctx.len()));
            assert_eq!(hkdf_label, expected);
        }
    }

    #[test]
    #[should_panic(expected = "context too long")]
    fn test_hkdf_label_long_context() {
        hkdf_label(32, b"derived", &[0u8; 256]);
    }

    // Test vectors from https://datatracker.ietf.org/doc/html/draft-ietf-tls-tls13-vectors-06
    // (in that ref, `hash` is the context, `info` is the hkdf label).
    #[allow(clippy::type_complexity)]
    fn test_fixtures() -> Vec<(&'static [u8], Vec<u8>, Vec<u8>, usize)> {
        vec![
        (
            b"derived",
            from_hex_str("e3 b0 c4 42 98 fc 1c 14 9a fb f4 c8 99 6f b9 24 27 ae 41 e4 64 9b 93 4c a4 95 99 1b 78 52 b8 55"),
            from_hex_str("00 20 0d 74 6c 73 31 33 20 64 65 72 69 76 65 64 20 e3 b0 c4 42 98 fc 1c 14 9a fb f4 c8 99 6f b9 24 27 ae 41 e4 64 9b 93 4c a4 95 99 1b 78 52 b8 55"),
            32,
        ),
        (
            b"c hs traffic",
            from_hex_str("c6 c9 18 ad 2f 41 99 d5 59 8e af 01 16 cb 7a 5c 2c 14 cb 54 78 12 18 88 8d b7 03 0d d5 0d 5e 6d"),
            from_hex_str("00 20 12 74 6c 73 31 33 20 63 20 68 73 20 74 72 61 66 66 69 63 20 c6 c9 18 ad 2f 41 99 d5 59 8e af 01 16 cb 7a 5c 2c 14 cb 54 78 12 18 88 8d b7 03 0d d5 0d 5e 6d"),
            32,
        ),
        (
            b"s hs traffic",
            from_hex_str("c6 c9 18 ad 2f 41 99 d5 59 8e af 01 16 cb 7a 5c 2c 14 cb 54 78 12 18 88 8d b7 03 0d d5 0d 5e 6d"),
            from_hex_str("00 20 12 74 6c 73 31 33 20 73 20 68 73 20 74 72 61 66 66 69 63 20 c6 c9 18 ad 2f 41 99 d5 59 8e af 01 16 cb 7a 5c 2c 14 cb 54 78 12 18 88 8d b7 03 0d d5 0d 5e 6d"),
            32,
        ),
        (
            b"key",
            from_hex_str(""),
            from_hex_str("00 10 09 74 6c 73 31 33 20 6b 65 79 00"),
            16,
        ),
        (
            b"iv",
            from_hex_str(""),
            from_hex_str("00 0c 08 74 6c 73 31 33 20 69 76 00"),
            12,
        ),
        (
            b"finished",
            from_hex_str(""),
            from_hex_str("00 20 0e 74 6c 73 31 33 20 66 69 6e 69 73 68 65 64 00"),
            32,
        ),
        (
            b"c ap traffic",
            from_hex_str("f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            from_hex_str("00 20 12 74 6c 73 31 33 20 63 20 61 70 20 74 72 61 66 66 69 63 20 f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            32,
        ),
        (
            b"s ap traffic",
            from_hex_str("f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            from_hex_str("00 20 12 74 6c 73 31 33 20 73 20 61 70 20 74 72 61 66 66 69 63 20 f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            32,
        ),
        (
            b"exp master",
            from_hex_str("f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            from_hex_str("00 20 10 74 6c 73 31 33 20 65 78 70 20 6d 61 73 74 65 72 20 f8 c1 9e 8c 77 c0 38 79 bb c8 eb 6d 56 e0 0d d5 d8 6e f5 59 27 ee fc 08 e1 b0 02 b6 ec e0 5d bf"),
            32,
        ),
        (
            b"res master",
            from_hex_str("50 2f 86 b9 57 9e c0 53 d3 28 24 e2 78 0e f6 5c c4 37 a3 56 43 45 35 6b df 79 13 ec 3b 87 96 14"),
            from_hex_str("00 20 10 74 6c 73 31 33 20 72 65 73 20 6d 61 73 74 65 72 20 50 2f 86 b9 57 9e c0 53 d3 28 24 e2 78 0e f6 5c c4 37 a3 56 43 45 35 6b df 79 13 ec 3b 87 96 14"),
            32,
        ),
        (
            b"resumption",
            from_hex_str("00 00"),
            from_hex_str("00 20 10 74 6c 73 31 33 20 72 65 73 75 6d 70 74 69 6f 6e 02 00 00"),
            32,
        ),
    ]
    }

    fn from_hex_str(s: &str) -> Vec<u8> {
        hex::decode(s.split_whitespace().collect::<String>()).unwrap()
    }
}
