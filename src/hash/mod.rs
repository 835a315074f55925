//! Content hashing for byte sources.
//!
//! Digesting itself is delegated entirely to the `blake3` crate; this
//! module only provides the value type and a thin streaming wrapper.
//!
//! - [`ContentHash`] - 32-byte content hash value
//! - [`Blake3Hasher`] - Incremental BLAKE3 hasher, usable as a
//!   [`ByteProcessor`](crate::ByteProcessor)

mod blake3;
mod digest;

pub use self::blake3::Blake3Hasher;
pub use digest::ContentHash;
