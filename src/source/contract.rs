//! The source contract and its derived operations.
//!
//! A [`ByteSource`] is not an open stream; it is an immutable supplier of
//! streams. The trait has two kinds of methods:
//!
//! - **Stream factories** ([`open_stream`](ByteSource::open_stream),
//!   [`open_buffered_stream`](ByteSource::open_buffered_stream)): return a
//!   new, independent stream on every call. The caller owns and closes it.
//! - **Derived operations** (size, emptiness, copy, read-all, equality,
//!   slicing): implemented here purely in terms of "open a stream, use it,
//!   close it", with the stream released on every exit path.

use std::io::{self, Read, Write};

use crate::buffer::Buffer;
use crate::error::close_after;
use crate::stream::{BufferedStream, SourceStream, copy_all, read_full};

use super::{ByteProcessor, ByteSink, SliceSource};

#[cfg(feature = "hash-blake3")]
use crate::hash::ContentHash;

/// Upper bound on a single skip step during skip-based size counting.
const MAX_SKIP_STEP: u64 = 8 * 1024 * 1024;

/// Upper bound on the capacity reserved up front by [`ByteSource::read`].
const MAX_READ_PREALLOC: usize = 16 * 1024 * 1024;

/// An immutable, repeatable supplier of byte streams.
///
/// Implementors provide [`open_stream`](Self::open_stream) and, when the
/// size is cheaply known, [`size_if_known`](Self::size_if_known);
/// everything else has a default built on those two. Implementations with
/// direct access to their bytes (such as [`BytesSource`](crate::BytesSource))
/// override the derived operations to short-circuit the stream round trip.
///
/// Opening must be side-effect-free with respect to other calls: two
/// streams obtained from the same source are independently consumable.
///
/// # Example
///
/// ```
/// use bytesource::{concat, wrap, ByteSource};
///
/// let parts = vec![wrap(&b"hello "[..]), wrap(&b"world"[..])];
/// let joined = concat(parts);
///
/// assert_eq!(joined.size()?, 11);
/// assert_eq!(joined.read()?, b"hello world");
/// assert!(joined.content_equals(&wrap(&b"hello world"[..]))?);
/// # Ok::<(), std::io::Error>(())
/// ```
pub trait ByteSource {
    /// Opens a new, independent stream over this source's bytes.
    ///
    /// The caller is responsible for closing the returned stream.
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>>;

    /// Opens a new stream with read-ahead buffering.
    ///
    /// Implementations whose streams do not benefit from buffering (an
    /// in-memory source is already sequential and allocation-free) return
    /// the plain stream instead.
    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        Ok(Box::new(BufferedStream::new(self.open_stream()?)))
    }

    /// The size of this source in bytes, if cheaply determinable without
    /// opening a stream.
    ///
    /// `None` means "not without reading", not "empty". Note that for
    /// mutable backing resources the value may disagree with what a
    /// subsequent read produces.
    fn size_if_known(&self) -> Option<u64> {
        None
    }

    /// The exact size of this source in bytes, even if that requires
    /// consuming an entire stream.
    ///
    /// Uses [`size_if_known`](Self::size_if_known) when present. Otherwise
    /// counts by skipping through a fresh stream; if that attempt fails in
    /// any way (some streams cannot skip), counts again by reading a
    /// second fresh stream to the end. Each attempt closes its stream on
    /// every exit path.
    fn size(&self) -> io::Result<u64> {
        if let Some(size) = self.size_if_known() {
            return Ok(size);
        }
        // Skip-based counting first; a failure here may just mean the
        // stream cannot skip, so it falls through rather than propagating
        if let Ok(mut stream) = self.open_stream() {
            let counted = count_by_skipping(&mut *stream);
            if let Ok(count) = close_after(counted, &mut *stream) {
                return Ok(count);
            }
        }
        let mut stream = self.open_stream()?;
        let counted = count_by_reading(&mut *stream);
        close_after(counted, &mut *stream)
    }

    /// Whether this source has zero bytes.
    ///
    /// True when [`size_if_known`](Self::size_if_known) reports zero;
    /// otherwise a stream is opened and probed for an immediate
    /// end-of-data. A known *nonzero* size does not short-circuit, since
    /// reported sizes may disagree with readable content.
    fn is_empty(&self) -> io::Result<bool> {
        probe_empty(self)
    }

    /// Copies this source's bytes into `out`, returning the count copied.
    ///
    /// Does not flush or close `out`. The stream opened here is closed on
    /// every exit path.
    fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        let mut stream = self.open_stream()?;
        let copied = copy_all(&mut *stream, out);
        close_after(copied, &mut *stream)
    }

    /// Copies this source's bytes into a writer opened from `sink`,
    /// returning the count copied.
    ///
    /// The writer is flushed on success and dropped in all cases; the
    /// source stream is closed on every exit path.
    fn copy_to_sink(&self, sink: &dyn ByteSink) -> io::Result<u64> {
        let mut stream = self.open_stream()?;
        let copied = copy_into_sink(&mut *stream, sink);
        close_after(copied, &mut *stream)
    }

    /// Reads the full contents of this source into memory.
    fn read(&self) -> io::Result<Vec<u8>> {
        let mut stream = self.open_stream()?;
        let mut data = Vec::new();
        if let Some(size) = self.size_if_known() {
            data.reserve(usize::try_from(size).unwrap_or(usize::MAX).min(MAX_READ_PREALLOC));
        }
        let drained = stream.read_to_end(&mut data).map(|_| data);
        close_after(drained, &mut *stream)
    }

    /// Feeds this source's bytes to `processor` as they are read.
    ///
    /// Stops when the stream ends or the processor returns `false`, then
    /// closes the stream and returns the processor's result.
    fn read_with<P>(&self, mut processor: P) -> io::Result<P::Output>
    where
        P: ByteProcessor,
        Self: Sized,
    {
        let mut stream = self.open_stream()?;
        let mut buf = Buffer::take();
        let fed = feed_processor(&mut *stream, &mut processor, buf.slice_mut());
        close_after(fed, &mut *stream)?;
        Ok(processor.finish())
    }

    /// Whether this source and `other` hold byte-for-byte equal content.
    ///
    /// Compares chunkwise through one stream per source without
    /// materializing either; both streams are closed on every exit path.
    fn content_equals(&self, other: &dyn ByteSource) -> io::Result<bool> {
        let mut buf = Buffer::take();
        let (seg1, seg2) = buf.halves_mut();

        let mut in1 = self.open_stream()?;
        let mut in2 = match other.open_stream() {
            Ok(stream) => stream,
            Err(err) => {
                let failed: io::Result<bool> = Err(err);
                return close_after(failed, &mut *in1);
            }
        };
        let compared = compare_streams(&mut *in1, &mut *in2, seg1, seg2);
        let compared = close_after(compared, &mut *in1);
        close_after(compared, &mut *in2)
    }

    /// A view of a sub-range of this source, at most `length` bytes long
    /// starting at `offset`.
    ///
    /// Opening the view skips `offset` bytes into a fresh parent stream;
    /// see [`SliceSource`] for the end-of-data behavior.
    fn slice(&self, offset: u64, length: u64) -> SliceSource<Self>
    where
        Self: Sized + Clone,
    {
        SliceSource::new(self.clone(), offset, length)
    }

    /// The BLAKE3 hash of this source's contents.
    ///
    /// Digesting is delegated to the `blake3` crate; this method only
    /// streams the bytes into it.
    #[cfg(feature = "hash-blake3")]
    fn hash(&self) -> io::Result<ContentHash> {
        let mut hasher = blake3::Hasher::new();
        self.copy_to(&mut hasher)?;
        Ok(ContentHash::new(hasher.finalize().into()))
    }
}

/// Shared body of [`ByteSource::is_empty`], reachable from overrides.
pub(crate) fn probe_empty<S: ByteSource + ?Sized>(source: &S) -> io::Result<bool> {
    if source.size_if_known() == Some(0) {
        return Ok(true);
    }
    let mut stream = source.open_stream()?;
    let probed = stream.read_byte().map(|byte| byte.is_none());
    close_after(probed, &mut *stream)
}

/// Counts the bytes in `stream` using skip where possible.
///
/// Skips at most the reported availability per step. When a step skips
/// nothing, a single byte is read to distinguish end-of-data from a
/// stream that merely cannot skip; if that very first probe reads a byte
/// while availability stays at zero, skipping is assumed to never make
/// progress here and the attempt is abandoned so the caller can count by
/// reading instead.
fn count_by_skipping(stream: &mut dyn SourceStream) -> io::Result<u64> {
    let mut count = 0u64;
    loop {
        let step = (stream.available()? as u64).min(MAX_SKIP_STEP);
        let skipped = stream.skip(step)?;
        if skipped == 0 {
            match stream.read_byte()? {
                None => return Ok(count),
                Some(_) => {
                    if count == 0 && stream.available()? == 0 {
                        return Err(io::Error::new(
                            io::ErrorKind::Unsupported,
                            "stream reports no availability; counting requires reading",
                        ));
                    }
                    count += 1;
                }
            }
        } else {
            count += skipped;
        }
    }
}

/// Counts the bytes in `stream` by reading it to the end.
fn count_by_reading(stream: &mut dyn SourceStream) -> io::Result<u64> {
    let mut buf = Buffer::take();
    let scratch = buf.slice_mut();
    let mut count = 0u64;
    loop {
        match stream.read(scratch) {
            Ok(0) => return Ok(count),
            Ok(read) => count += read as u64,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Opens a writer from `sink`, copies `stream` into it and flushes it.
fn copy_into_sink(stream: &mut dyn SourceStream, sink: &dyn ByteSink) -> io::Result<u64> {
    let mut out = sink.open_stream()?;
    let copied = copy_all(stream, &mut *out)?;
    out.flush()?;
    Ok(copied)
}

/// Feeds `stream` to `processor` chunk by chunk until end-of-data or the
/// processor declines more input.
fn feed_processor<P: ByteProcessor>(
    stream: &mut dyn SourceStream,
    processor: &mut P,
    scratch: &mut [u8],
) -> io::Result<()> {
    loop {
        let read = match stream.read(scratch) {
            Ok(0) => return Ok(()),
            Ok(read) => read,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if !processor.process(&scratch[..read])? {
            return Ok(());
        }
    }
}

/// Chunkwise comparison of two streams through a shared split buffer.
///
/// Mismatched chunk lengths or any byte difference ends the comparison
/// immediately; a chunk shorter than the buffer half means both streams
/// ended, and everything up to that point matched.
fn compare_streams(
    in1: &mut dyn SourceStream,
    in2: &mut dyn SourceStream,
    seg1: &mut [u8],
    seg2: &mut [u8],
) -> io::Result<bool> {
    loop {
        let read1 = read_full(in1, seg1)?;
        let read2 = read_full(in2, seg2)?;
        if read1 != read2 || seg1[..read1] != seg2[..read2] {
            return Ok(false);
        }
        if read1 < seg1.len() {
            return Ok(true);
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_stream()
    }

    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_buffered_stream()
    }

    fn size_if_known(&self) -> Option<u64> {
        (**self).size_if_known()
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }

    fn is_empty(&self) -> io::Result<bool> {
        (**self).is_empty()
    }

    fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        (**self).copy_to(out)
    }

    fn copy_to_sink(&self, sink: &dyn ByteSink) -> io::Result<u64> {
        (**self).copy_to_sink(sink)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn content_equals(&self, other: &dyn ByteSource) -> io::Result<bool> {
        (**self).content_equals(other)
    }

    #[cfg(feature = "hash-blake3")]
    fn hash(&self) -> io::Result<ContentHash> {
        (**self).hash()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_stream()
    }

    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_buffered_stream()
    }

    fn size_if_known(&self) -> Option<u64> {
        (**self).size_if_known()
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }

    fn is_empty(&self) -> io::Result<bool> {
        (**self).is_empty()
    }

    fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        (**self).copy_to(out)
    }

    fn copy_to_sink(&self, sink: &dyn ByteSink) -> io::Result<u64> {
        (**self).copy_to_sink(sink)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn content_equals(&self, other: &dyn ByteSource) -> io::Result<bool> {
        (**self).content_equals(other)
    }

    #[cfg(feature = "hash-blake3")]
    fn hash(&self) -> io::Result<ContentHash> {
        (**self).hash()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for std::sync::Arc<S> {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_stream()
    }

    fn open_buffered_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        (**self).open_buffered_stream()
    }

    fn size_if_known(&self) -> Option<u64> {
        (**self).size_if_known()
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }

    fn is_empty(&self) -> io::Result<bool> {
        (**self).is_empty()
    }

    fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        (**self).copy_to(out)
    }

    fn copy_to_sink(&self, sink: &dyn ByteSink) -> io::Result<u64> {
        (**self).copy_to_sink(sink)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn content_equals(&self, other: &dyn ByteSource) -> io::Result<bool> {
        (**self).content_equals(other)
    }

    #[cfg(feature = "hash-blake3")]
    fn hash(&self) -> io::Result<ContentHash> {
        (**self).hash()
    }
}
