//! Concatenation, prefix extraction and XOR.

/// Returns `a || b`.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// Returns the first `len` bytes of `input`.
///
/// # Panics
///
/// Panics if `input` is shorter than `len`.
pub fn prefix(input: &[u8], len: usize) -> Vec<u8> {
    assert!(
        input.len() >= len,
        "prefix length {len} exceeds input length {}",
        input.len()
    );

    input[..len].to_vec()
}

/// XORs the first `len` bytes of `a` and `b`.
///
/// # Panics
///
/// Panics if either input is shorter than `len`.
pub fn xor_prefix(a: &[u8], b: &[u8], len: usize) -> Vec<u8> {
    assert!(
        a.len() >= len && b.len() >= len,
        "inputs of length {} and {} are too short to xor {len} bytes",
        a.len(),
        b.len()
    );

    a[..len].iter().zip(&b[..len]).map(|(a, b)| a ^ b).collect()
}

/// XORs every byte of `input` with `byte`.
pub fn xor_with_byte(input: &[u8], byte: u8) -> Vec<u8> {
    input.iter().map(|b| b ^ byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_concat() {
        assert_eq!(concat(b"hello ", b"world"), b"hello world".to_vec());
        assert_eq!(concat(b"", b""), Vec::<u8>::new());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix(b"transcript", 5), b"trans".to_vec());
        assert_eq!(prefix(b"transcript", 0), Vec::<u8>::new());
    }

    #[test]
    #[should_panic(expected = "exceeds input length")]
    fn test_prefix_too_long() {
        prefix(b"abc", 4);
    }

    #[rstest]
    #[case::full(&[0xff, 0x0f], &[0x0f, 0xff], 2, vec![0xf0, 0xf0])]
    #[case::truncated(&[0x01, 0x02, 0x03], &[0x01, 0x00, 0x00, 0x00], 2, vec![0x00, 0x02])]
    #[case::empty(&[], &[], 0, vec![])]
    fn test_xor_prefix(
        #[case] a: &[u8],
        #[case] b: &[u8],
        #[case] len: usize,
        #[case] expected: Vec<u8>,
    ) {
        assert_eq!(xor_prefix(a, b, len), expected);
    }

    #[test]
    #[should_panic(expected = "too short")]
    fn test_xor_prefix_too_short() {
        xor_prefix(&[0u8; 3], &[0u8; 2], 3);
    }

    #[test]
    fn test_xor_with_byte() {
        assert_eq!(xor_with_byte(&[0x00, 0x36, 0xff], 0x36), vec![0x36, 0x00, 0xc9]);
    }
}
