//! Write-side seam.

use std::io::{self, Write};

/// A destination that can open a fresh writer on demand.
///
/// The narrow write-side counterpart of [`ByteSource`](crate::ByteSource):
/// [`ByteSource::copy_to_sink`](crate::ByteSource::copy_to_sink) opens one
/// writer per call, transfers the source's bytes into it, and flushes it.
/// What a writer writes *to* is entirely the implementation's business.
pub trait ByteSink {
    /// Opens a new, independent writer. The caller drives and flushes it.
    fn open_stream(&self) -> io::Result<Box<dyn Write>>;
}
