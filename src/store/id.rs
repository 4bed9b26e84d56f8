use chrono::{DateTime, Utc};
use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Creates an id of the form `<unix millis>-<9 random base36 chars>`. Unique enough for entries
/// created within one session, not a global guarantee.
pub fn generate_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{suffix}", now.timestamp_millis())
}
