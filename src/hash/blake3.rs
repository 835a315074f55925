//! BLAKE3-based source hashing.

use std::io;

use crate::source::ByteProcessor;

use super::ContentHash;

/// An incremental BLAKE3 hasher over streamed source bytes.
///
/// Implements [`ByteProcessor`], so a source can be hashed without
/// materializing it:
///
/// ```
/// use bytesource::{wrap, Blake3Hasher, ByteSource};
///
/// let source = wrap(&b"some content"[..]);
/// let streamed = source.read_with(Blake3Hasher::new())?;
/// assert_eq!(streamed, source.hash()?);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the hash.
    pub fn finalize(&self) -> ContentHash {
        ContentHash::new(self.state.finalize().into())
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Convenience method to hash in-memory data in one shot.
    pub fn hash(data: &[u8]) -> ContentHash {
        ContentHash::new(blake3::hash(data).into())
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteProcessor for Blake3Hasher {
    type Output = ContentHash;

    fn process(&mut self, bytes: &[u8]) -> io::Result<bool> {
        self.update(bytes);
        Ok(true)
    }

    fn finish(self) -> ContentHash {
        self.finalize()
    }
}
