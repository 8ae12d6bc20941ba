use rand::RngExt;

/// Charset for generating random session identifiers and tokens (lowercase hex).
const CHARSET: &[u8] = b"0123456789abcdef";

/// Generate a random key of `len` hex characters from the thread RNG
/// (cryptographically secure). Used for both session ids and bearer tokens;
/// the two are drawn independently, so neither is derivable from the other.
pub fn generate_key(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
