//! Error handling for stream cleanup.
//!
//! Compound operations (copy, read-all, size-by-reading, content
//! equality) open streams they must release on every exit path. When the
//! operation fails *and* closing the stream it opened also fails, the
//! close-time failure must not mask the primary one. This module provides
//! the carrier for that case, [`SuppressedCloseError`], and the
//! guaranteed-release helper used throughout the crate.

use std::error::Error;
use std::fmt;
use std::io;

use crate::stream::SourceStream;

/// A primary I/O failure with a close-time failure attached.
///
/// Surfaces through [`io::Error::get_ref`] when a compound source
/// operation fails and the cleanup close fails too. The primary failure
/// is preserved as [`Error::source`]; the close failure is auxiliary.
#[derive(Debug)]
pub struct SuppressedCloseError {
    primary: io::Error,
    close: io::Error,
}

impl SuppressedCloseError {
    /// The failure of the operation itself.
    pub fn primary(&self) -> &io::Error {
        &self.primary
    }

    /// The failure reported when closing the stream afterwards.
    pub fn close_error(&self) -> &io::Error {
        &self.close
    }

    /// Wraps both failures into an [`io::Error`] that reports the
    /// primary failure's kind.
    pub(crate) fn attach(primary: io::Error, close: io::Error) -> io::Error {
        let kind = primary.kind();
        io::Error::new(kind, Self { primary, close })
    }
}

impl fmt::Display for SuppressedCloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (closing the stream also failed: {})",
            self.primary, self.close
        )
    }
}

impl Error for SuppressedCloseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.primary)
    }
}

/// Closes `stream` after `result` has been produced, folding any
/// close-time failure into the outcome.
///
/// - operation ok, close ok: the operation's value
/// - operation ok, close fails: the close failure
/// - operation fails, close ok: the operation's failure
/// - both fail: the operation's failure, with the close failure attached
///   via [`SuppressedCloseError`]
pub(crate) fn close_after<T>(
    result: io::Result<T>,
    stream: &mut dyn SourceStream,
) -> io::Result<T> {
    match (result, stream.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close)) => Err(close),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(close)) => Err(SuppressedCloseError::attach(primary, close)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    /// A stream that fails reads and, optionally, its close.
    struct Broken {
        close_fails: bool,
    }

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("read exploded"))
        }
    }

    impl SourceStream for Broken {
        fn close(&mut self) -> io::Result<()> {
            if self.close_fails {
                Err(io::Error::other("close exploded"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_ok_result_ok_close() {
        let mut stream = Broken { close_fails: false };
        assert_eq!(close_after(Ok(7), &mut stream).unwrap(), 7);
    }

    #[test]
    fn test_close_failure_surfaces_after_success() {
        let mut stream = Broken { close_fails: true };
        let err = close_after(Ok(7), &mut stream).unwrap_err();
        assert!(err.to_string().contains("close exploded"));
    }

    #[test]
    fn test_primary_failure_wins_over_close_failure() {
        let mut stream = Broken { close_fails: true };
        let primary = io::Error::other("read exploded");
        let err = close_after::<u64>(Err(primary), &mut stream).unwrap_err();

        let suppressed = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<SuppressedCloseError>())
            .expect("both failures should be carried");
        assert!(suppressed.primary().to_string().contains("read exploded"));
        assert!(suppressed.close_error().to_string().contains("close exploded"));
        // The reported failure is still the primary one
        assert!(err.to_string().contains("read exploded"));
    }

    #[test]
    fn test_primary_failure_passes_through_clean_close() {
        let mut stream = Broken { close_fails: false };
        let primary = io::Error::other("read exploded");
        let err = close_after::<u64>(Err(primary), &mut stream).unwrap_err();
        assert_eq!(err.to_string(), "read exploded");
    }
}
