//! Fixed-width Base62 encoding of folded ids.

/// Digits in significance order: `0-9`, `A-Z`, `a-z`.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Characters in a short key.
pub const KEY_LENGTH: usize = 8;

/// `62^8`, the number of distinct 8-character keys.
pub const KEY_SPACE: u64 = 218_340_105_584_896;

/// Encodes `value` as Base62, most-significant digit first, left-padded
/// with `'0'` to at least `width` characters.
///
/// # Examples
///
/// ```
/// use zaplink_core::keygen::base62::encode_padded;
///
/// assert_eq!(encode_padded(0, 8), "00000000");
/// assert_eq!(encode_padded(61, 8), "0000000z");
/// assert_eq!(encode_padded(62, 3), "010");
/// ```
pub fn encode_padded(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(width.max(11));
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    while digits.len() < width {
        digits.push(b'0');
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Folds an id into the key space and encodes it as an 8-character key.
///
/// `modulus` must be in `1..=KEY_SPACE` for the result to fit.
pub fn fold_to_key(id: u64, modulus: u64) -> String {
    encode_padded(id % modulus, KEY_LENGTH)
}
