//! Sub-range views of another source.

use std::io::{self, Read};

use crate::error::SuppressedCloseError;
use crate::stream::{SourceStream, skip_fully};

use super::ByteSource;
use super::contract::probe_empty;

/// A view of a sub-range of another source.
///
/// Opening the view opens the parent's stream, skips `offset` bytes into
/// it, and exposes at most `length` bytes. The parent is held by value;
/// sources are cheap to clone (see [`ByteSource::slice`]).
///
/// Skipping to `offset` happens at open time, so a view whose offset lies
/// past the parent's end-of-data fails to open with
/// [`io::ErrorKind::UnexpectedEof`]. In-memory sources clamp instead via
/// their own [`slice`](crate::BytesSource::slice).
#[derive(Debug, Clone)]
pub struct SliceSource<S> {
    source: S,
    offset: u64,
    length: u64,
}

impl<S: ByteSource + Clone> SliceSource<S> {
    pub(crate) fn new(source: S, offset: u64, length: u64) -> Self {
        Self {
            source,
            offset,
            length,
        }
    }

    /// A view of a sub-range of this view.
    ///
    /// Composes the offsets against the parent source instead of nesting
    /// one view inside another, so re-slicing stays one level deep. This
    /// inherent method shadows [`ByteSource::slice`].
    pub fn slice(&self, offset: u64, length: u64) -> SliceSource<S> {
        let max_length = self.length.saturating_sub(offset);
        SliceSource::new(
            self.source.clone(),
            self.offset.saturating_add(offset),
            length.min(max_length),
        )
    }
}

impl<S: ByteSource> ByteSource for SliceSource<S> {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        limit(self.source.open_stream()?, self.offset, self.length)
    }

    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        limit(self.source.open_buffered_stream()?, self.offset, self.length)
    }

    fn size_if_known(&self) -> Option<u64> {
        let parent = self.source.size_if_known()?;
        let end = self.offset.saturating_add(self.length).min(parent);
        Some(end.saturating_sub(self.offset))
    }

    fn is_empty(&self) -> io::Result<bool> {
        if self.length == 0 {
            return Ok(true);
        }
        probe_empty(self)
    }
}

/// Positions `stream` at `offset` and caps it at `length` bytes.
///
/// Closes the stream before propagating a failed skip.
fn limit(
    mut stream: Box<dyn SourceStream>,
    offset: u64,
    length: u64,
) -> io::Result<Box<dyn SourceStream>> {
    if offset > 0 {
        if let Err(err) = skip_fully(&mut *stream, offset) {
            let err = match stream.close() {
                Ok(()) => err,
                Err(close) => SuppressedCloseError::attach(err, close),
            };
            return Err(err);
        }
    }
    Ok(Box::new(SliceStream {
        inner: stream,
        remaining: length,
    }))
}

/// Caps an inner stream at a fixed number of remaining bytes.
struct SliceStream {
    inner: Box<dyn SourceStream>,
    remaining: u64,
}

impl Read for SliceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.remaining == 0 {
            return Ok(0);
        }
        let cap = buf
            .len()
            .min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let read = self.inner.read(&mut buf[..cap])?;
        self.remaining -= read as u64;
        Ok(read)
    }
}

impl SourceStream for SliceStream {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let want = n.min(self.remaining);
        if want == 0 {
            return Ok(0);
        }
        let skipped = self.inner.skip(want)?;
        self.remaining -= skipped;
        Ok(skipped)
    }

    fn available(&mut self) -> io::Result<usize> {
        let inner = self.inner.available()? as u64;
        Ok(usize::try_from(inner.min(self.remaining)).unwrap_or(usize::MAX))
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}
