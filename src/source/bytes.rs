//! In-memory source over [`bytes::Bytes`].

use std::io::{self, Read, Write};

use bytes::{Buf, Bytes};

use crate::stream::SourceStream;

use super::ByteSource;

#[cfg(feature = "hash-blake3")]
use crate::hash::ContentHash;

/// A source backed by an in-memory byte buffer.
///
/// Cloning is cheap ([`Bytes`] is reference-counted) and slicing is
/// zero-copy. Every derived operation short-circuits to direct buffer
/// access instead of going through a stream.
///
/// # Example
///
/// ```
/// use bytesource::{wrap, ByteSource};
///
/// let source = wrap(&b"hello world"[..]);
/// assert_eq!(source.size()?, 11);
/// assert_eq!(source.slice(6, 5).read()?, b"world");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BytesSource {
    data: Bytes,
}

impl BytesSource {
    /// Creates a source over the given bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// The backing bytes.
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// A zero-copy view of a sub-range, clamped to the available data.
    ///
    /// Unlike the [`ByteSource::slice`] view (which this inherent method
    /// shadows), an in-memory slice never fails to open: a range that
    /// reaches past the end is clamped instead.
    pub fn slice(&self, offset: u64, length: u64) -> BytesSource {
        let len = self.data.len() as u64;
        let start = offset.min(len);
        let end = offset.saturating_add(length).min(len);
        Self {
            data: self.data.slice(start as usize..end as usize),
        }
    }
}

impl ByteSource for BytesSource {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        Ok(Box::new(BytesStream {
            data: self.data.clone(),
        }))
    }

    /// Already sequential and allocation-free; buffering would only copy.
    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        self.open_stream()
    }

    fn size_if_known(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn is_empty(&self) -> io::Result<bool> {
        Ok(self.data.is_empty())
    }

    fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        out.write_all(&self.data)?;
        Ok(self.data.len() as u64)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.to_vec())
    }

    #[cfg(feature = "hash-blake3")]
    fn hash(&self) -> io::Result<ContentHash> {
        Ok(ContentHash::new(blake3::hash(&self.data).into()))
    }
}

impl From<Bytes> for BytesSource {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&'static [u8]> for BytesSource {
    fn from(data: &'static [u8]) -> Self {
        Self::new(data)
    }
}

/// A view of the given bytes as a source.
///
/// To view only a range, use `wrap(data).slice(offset, length)`.
pub fn wrap(data: impl Into<Bytes>) -> BytesSource {
    BytesSource::new(data)
}

/// A source that contains no bytes.
pub fn empty() -> BytesSource {
    BytesSource::new(Bytes::new())
}

/// Stream over a [`BytesSource`], consuming the shared buffer from the
/// front.
struct BytesStream {
    data: Bytes,
}

impl Read for BytesStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(buf.len());
        if n > 0 {
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data.advance(n);
        }
        Ok(n)
    }
}

impl SourceStream for BytesStream {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let n = usize::try_from(n).unwrap_or(usize::MAX).min(self.data.len());
        self.data.advance(n);
        Ok(n as u64)
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.data.len())
    }
}
