//! bytesource
//!
//! Lazily-openable byte sources for Rust.
//!
//! A [`ByteSource`] is not an open stream: it is an immutable *supplier*
//! of streams. Open it as many times as you like; every call yields a
//! fresh, independent stream the caller owns and closes. On top of that
//! one capability the crate derives the common whole-source operations
//! (size, emptiness, copy, read-all, content equality, slicing) and a
//! concatenation engine that presents many sources as one stream while
//! keeping **at most one underlying stream open at a time** — handy for
//! re-joining chunked file parts without holding a handle per part.
//!
//! The crate intentionally:
//! - does NOT manage files or paths (implement [`ByteSource`] for yours)
//! - does NOT manage concurrency
//! - does NOT decode characters
//! - does NOT implement digests (hashing delegates to `blake3`)
//!
//! It only does one thing: **open streams on demand → drive them safely**
//!
//! # Concatenation
//!
//! ```
//! use bytesource::{concat, wrap, ByteSource};
//!
//! fn main() -> std::io::Result<()> {
//!     let parts = vec![wrap(&b"lazy "[..]), wrap(&b""[..]), wrap(&b"streams"[..])];
//!     let joined = concat(parts);
//!
//!     assert_eq!(joined.size()?, 12);
//!     assert_eq!(joined.read()?, b"lazy streams");
//!     Ok(())
//! }
//! ```
//!
//! # Slicing
//!
//! ```
//! use bytesource::{wrap, ByteSource};
//!
//! let source = wrap(&b"0123456789"[..]);
//! let middle = source.slice(3, 4);
//! assert_eq!(middle.read()?, b"3456");
//! # Ok::<(), std::io::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod concat;
mod error;
mod source;
mod stream;

mod buffer; // internal (thread-local reuse)

#[cfg(feature = "hash-blake3")]
mod hash; // internal blake3 impl

//
// Public surface (intentionally tiny)
//

pub use concat::{ConcatSource, ConcatStream, concat};
pub use error::SuppressedCloseError;
pub use source::{ByteProcessor, ByteSink, ByteSource, BytesSource, SliceSource, empty, wrap};
pub use stream::{SourceStream, read_full, skip_fully};

#[cfg(feature = "hash-blake3")]
pub use hash::{Blake3Hasher, ContentHash};
