//! OS entropy adapter

use crate::domain::ports::EntropySource;
use rand::rngs::OsRng;
use rand::RngCore;

/// Reads from the operating system CSPRNG.
///
/// Stateless; every call goes straight to the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(buf)
    }
}
