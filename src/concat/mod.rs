//! Concatenation of byte sources.
//!
//! - [`ConcatSource`] - A source over the logical concatenation of others
//! - [`ConcatStream`] - The engine: one stream over many sources, with at
//!   most one underlying stream open at a time
//! - [`concat`] - Convenience constructor

mod source;
mod stream;

pub use source::{ConcatSource, concat};
pub use stream::ConcatStream;
