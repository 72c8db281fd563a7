use sha2::Digest;
use sha2::Sha256;
use std::fmt::Write;

/// Lowercase hex SHA-256 of `text`'s UTF-8 bytes.
pub fn sha256_hex(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(64);
    for b in digest {
        let _ = write!(hex, "{b:02x}");
    }
    hex
}

/// The first eight hex characters of [`sha256_hex`].
pub(crate) fn short_hash(text: &str) -> String {
    let mut hash = sha256_hex(text);
    hash.truncate(8);
    hash
}
