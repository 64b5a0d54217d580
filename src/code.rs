use rand::Rng;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Base-36: digits followed by lowercase ASCII letters.
pub const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random short code. Uniqueness is the caller's problem: the
/// shorten handler checks the result against the current links.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `true` if `code` has the length and alphabet `generate` produces.
pub fn is_generated_shape(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
