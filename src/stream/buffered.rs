//! Read-ahead wrapper that keeps the stream contract intact.

use std::io::{self, BufRead, BufReader, Read};

use super::SourceStream;

/// A [`SourceStream`] wrapped in a [`BufReader`].
///
/// Skip and availability account for the read-ahead buffer before
/// touching the inner stream; close passes straight through.
pub(crate) struct BufferedStream {
    inner: BufReader<Box<dyn SourceStream>>,
}

impl BufferedStream {
    pub(crate) fn new(stream: Box<dyn SourceStream>) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }
}

impl Read for BufferedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl SourceStream for BufferedStream {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        if n == 0 {
            return Ok(0);
        }
        // Drain buffered bytes first; the inner stream's position is
        // already past them
        let buffered = self.inner.buffer().len();
        if buffered > 0 {
            let take = usize::try_from(n).unwrap_or(usize::MAX).min(buffered);
            self.inner.consume(take);
            return Ok(take as u64);
        }
        self.inner.get_mut().skip(n)
    }

    fn available(&mut self) -> io::Result<usize> {
        let buffered = self.inner.buffer().len();
        Ok(buffered.saturating_add(self.inner.get_mut().available()?))
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.get_mut().close()
    }
}
