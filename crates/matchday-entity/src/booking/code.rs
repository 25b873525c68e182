//! Booking code and QR token generation.

use rand::Rng;

/// Prefix for human-readable booking codes.
const CODE_PREFIX: &str = "MD-";

/// Alphabet for booking codes. Excludes `0/O` and `1/I` so codes can be
/// read out over the phone without ambiguity.
const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Generate a human-readable booking code like `MD-7KF3QX`.
///
/// Uniqueness is enforced by the database; the code space is large
/// enough that collisions on insert are practically unheard of.
pub fn generate_booking_code(random_len: usize) -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(CODE_PREFIX.len() + random_len);
    code.push_str(CODE_PREFIX);
    for _ in 0..random_len {
        let idx = rng.random_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Generate a random hex token for the scannable QR code.
pub fn generate_qr_token(num_bytes: usize) -> String {
    let mut rng = rand::rng();
    let mut token = String::with_capacity(num_bytes * 2);
    for _ in 0..num_bytes {
        let byte: u8 = rng.random();
        token.push_str(&format!("{byte:02x}"));
    }
    token
}
