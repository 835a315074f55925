//! Streaming consumer seam.

use std::io;

/// A consumer fed successive chunks of a source's bytes.
///
/// Used with [`ByteSource::read_with`](crate::ByteSource::read_with) to
/// process a stream without materializing it: the source machinery opens
/// the stream, feeds every chunk to [`process`](Self::process), and closes
/// the stream before [`finish`](Self::finish) produces the result.
///
/// # Example
///
/// ```
/// use std::io;
/// use bytesource::{wrap, ByteProcessor, ByteSource};
///
/// /// Counts bytes above a threshold.
/// struct CountAbove {
///     threshold: u8,
///     count: u64,
/// }
///
/// impl ByteProcessor for CountAbove {
///     type Output = u64;
///
///     fn process(&mut self, bytes: &[u8]) -> io::Result<bool> {
///         self.count += bytes.iter().filter(|&&b| b > self.threshold).count() as u64;
///         Ok(true)
///     }
///
///     fn finish(self) -> u64 {
///         self.count
///     }
/// }
///
/// let source = wrap(vec![1u8, 200, 3, 250]);
/// let above = source.read_with(CountAbove { threshold: 100, count: 0 })?;
/// assert_eq!(above, 2);
/// # Ok::<(), io::Error>(())
/// ```
pub trait ByteProcessor {
    /// The value produced once the stream has been consumed.
    type Output;

    /// Handles the next chunk. Returning `Ok(false)` stops consumption
    /// early; remaining bytes are never read.
    fn process(&mut self, bytes: &[u8]) -> io::Result<bool>;

    /// Produces the final result.
    fn finish(self) -> Self::Output;
}
