//! Internal buffer management for the copy, count and compare loops.
//!
//! This module provides a thread-local buffer pool so that the derived
//! source operations (copy, size-by-reading, content equality) do not
//! allocate a fresh scratch buffer per call. It is an implementation
//! detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
