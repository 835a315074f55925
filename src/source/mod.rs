//! Byte sources: immutable suppliers of fresh byte streams.
//!
//! - [`ByteSource`] - The source contract with its derived operations
//! - [`BytesSource`] - In-memory source over [`bytes::Bytes`]
//! - [`SliceSource`] - View of a sub-range of another source
//! - [`ByteProcessor`] - Streaming consumer seam for [`ByteSource::read_with`]
//! - [`ByteSink`] - Write-side seam for [`ByteSource::copy_to_sink`]

mod bytes;
mod contract;
mod process;
mod sink;
mod slice;

pub use self::bytes::{BytesSource, empty, wrap};
pub use contract::ByteSource;
pub use process::ByteProcessor;
pub use sink::ByteSink;
pub use slice::SliceSource;
