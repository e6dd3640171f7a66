//! Random identifiers for generated bucket and user names

use crate::domain::ports::EntropySource;
use crate::error::Result;

const ALPHABET_LEN: usize = 62;

/// Characters random identifiers are drawn from
pub const ALPHABET: &[u8; ALPHABET_LEN] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Largest multiple of 62 that fits in a byte; bytes at or above it are
// rejected so every character is equally likely.
const REJECT_AT: u8 = (256 / ALPHABET_LEN * ALPHABET_LEN) as u8;

/// Generate `len` random alphanumeric characters from `entropy`.
///
/// `len == 0` returns `Ok("")`; an entropy failure is always an `Err`.
pub fn random_identifier_from(entropy: &dyn EntropySource, len: usize) -> Result<String> {
    let mut out = String::with_capacity(len);
    let mut buf = vec![0u8; len];

    while out.len() < len {
        let missing = len - out.len();
        let chunk = &mut buf[..missing];
        entropy.fill(chunk)?;
        out.extend(
            chunk
                .iter()
                .filter(|b| **b < REJECT_AT)
                .map(|b| ALPHABET[(*b as usize) % ALPHABET_LEN] as char),
        );
    }

    Ok(out)
}

/// Generate `len` random alphanumeric characters from the OS CSPRNG
pub fn random_identifier(len: usize) -> Result<String> {
    random_identifier_from(&crate::adapters::OsEntropy, len)
}
