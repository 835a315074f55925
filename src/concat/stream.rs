//! The concatenation engine.

use std::io::{self, Read};
use std::mem;
use std::sync::Arc;

use crate::source::ByteSource;
use crate::stream::SourceStream;

/// A forward-only stream over the concatenated bytes of a source
/// sequence.
///
/// Sub-streams are opened lazily, one at a time: nothing is opened until
/// the first read or skip, and advancing to the next source always closes
/// the previous source's stream first. At any instant at most one
/// underlying stream is open, including across every error path.
///
/// A read never reports end-of-data while a later source still has bytes;
/// empty sources anywhere in the sequence are crossed without an
/// observable gap. Within a single call, however, a read draws from the
/// current sub-stream only, so a partial fill is a valid non-final
/// result.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use std::sync::Arc;
/// use bytesource::{wrap, ByteSource, ConcatStream};
///
/// let mut stream = ConcatStream::new([
///     Arc::new(wrap(&b"ab"[..])) as Arc<dyn ByteSource>,
///     Arc::new(wrap(&b""[..])),
///     Arc::new(wrap(&b"cd"[..])),
/// ]);
///
/// let mut all = Vec::new();
/// stream.read_to_end(&mut all)?;
/// assert_eq!(all, b"abcd");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ConcatStream {
    sources: Arc<[Arc<dyn ByteSource>]>,
    pos: usize,
    cursor: Cursor,
}

/// Where the engine stands in the source sequence.
///
/// The invariant that at most one sub-stream exists lives here: `Open`
/// is the only state holding a stream, and every transition out of it
/// closes that stream first.
enum Cursor {
    /// No read has happened yet; nothing is open.
    NotStarted,
    /// The current source's stream, not yet known to be exhausted.
    Open(Box<dyn SourceStream>),
    /// All sources consumed, or the stream was closed. Nothing reopens.
    Exhausted,
}

impl ConcatStream {
    /// Creates a stream over the given sources, in order.
    ///
    /// The sequence is snapshotted here; nothing is opened until the
    /// first read.
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ByteSource>>,
    {
        Self::from_shared(sources.into_iter().collect())
    }

    pub(crate) fn from_shared(sources: Arc<[Arc<dyn ByteSource>]>) -> Self {
        Self {
            sources,
            pos: 0,
            cursor: Cursor::NotStarted,
        }
    }

    /// Closes the current sub-stream, if any, and opens the next
    /// source's stream.
    ///
    /// The cursor is parked at `Exhausted` before anything fallible
    /// runs, so a failing close or open leaves zero streams open and the
    /// engine drained rather than half-advanced.
    fn advance(&mut self) -> io::Result<()> {
        if let Cursor::Open(mut stream) = mem::replace(&mut self.cursor, Cursor::Exhausted) {
            stream.close()?;
        }
        if self.pos < self.sources.len() {
            let source = &self.sources[self.pos];
            self.pos += 1;
            self.cursor = Cursor::Open(source.open_stream()?);
        }
        Ok(())
    }
}

impl Read for ConcatStream {
    /// Reads from the current sub-stream, crossing source boundaries as
    /// they are exhausted.
    ///
    /// Returns `Ok(0)` for an empty `buf` without touching the sequence;
    /// otherwise `Ok(0)` means every source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.cursor {
                Cursor::Exhausted => return Ok(0),
                Cursor::NotStarted => self.advance()?,
                Cursor::Open(ref mut stream) => {
                    let read = stream.read(buf)?;
                    if read > 0 {
                        return Ok(read);
                    }
                    // Current source drained; close it and move on
                    self.advance()?;
                }
            }
        }
    }
}

impl SourceStream for ConcatStream {
    /// Skips within the current sub-stream.
    ///
    /// May skip fewer bytes than requested without having reached the
    /// end; crossing into the next source happens on subsequent calls.
    /// When the sub-stream itself reports no skip progress, a single
    /// byte is read through the engine instead, which both probes for
    /// end-of-data and crosses boundaries.
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        if n == 0 {
            return Ok(0);
        }
        loop {
            match self.cursor {
                Cursor::Exhausted => return Ok(0),
                Cursor::NotStarted => self.advance()?,
                Cursor::Open(ref mut stream) => {
                    let skipped = stream.skip(n)?;
                    if skipped > 0 {
                        return Ok(skipped);
                    }
                    break;
                }
            }
        }
        match self.read_byte()? {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    /// The current sub-stream's availability, or 0 when nothing is open
    /// (before the first read and after exhaustion).
    fn available(&mut self) -> io::Result<usize> {
        match self.cursor {
            Cursor::Open(ref mut stream) => stream.available(),
            _ => Ok(0),
        }
    }

    /// Closes the open sub-stream, if any, and marks the engine
    /// exhausted. Idempotent; later reads report end-of-data.
    fn close(&mut self) -> io::Result<()> {
        match mem::replace(&mut self.cursor, Cursor::Exhausted) {
            Cursor::Open(mut stream) => stream.close(),
            _ => Ok(()),
        }
    }
}
