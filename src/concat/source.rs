//! A source over the logical concatenation of other sources.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::source::ByteSource;
use crate::stream::SourceStream;

use super::ConcatStream;

/// Concatenates sources into a single source.
///
/// Streams returned by this source contain the concatenated data of the
/// member sources' streams, with only one member stream open at a time
/// (see [`ConcatStream`]). Closing the concatenated stream closes the
/// open member stream.
///
/// Each member is wrapped in an [`Arc`]; to reuse one source in several
/// positions of a sequence, share it yourself and use
/// [`ConcatSource::new`].
///
/// # Example
///
/// ```
/// use bytesource::{concat, wrap, ByteSource};
///
/// let joined = concat(vec![wrap(&b"ab"[..]), wrap(&b"cd"[..])]);
/// assert_eq!(joined.read()?, b"abcd");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn concat<I>(sources: I) -> ConcatSource
where
    I: IntoIterator,
    I::Item: ByteSource + 'static,
{
    ConcatSource::new(
        sources
            .into_iter()
            .map(|source| Arc::new(source) as Arc<dyn ByteSource>),
    )
}

/// A [`ByteSource`] over an ordered sequence of member sources.
///
/// The sequence is a snapshot taken at construction. Size and emptiness
/// are derived from the members: the size is the sum of member sizes
/// (never computed by consuming the concatenation itself), and the source
/// is empty only if every member is.
#[derive(Clone)]
pub struct ConcatSource {
    sources: Arc<[Arc<dyn ByteSource>]>,
}

impl ConcatSource {
    /// Creates a concatenated source over pre-shared members.
    ///
    /// The same `Arc` may appear at several positions; its source will
    /// be opened once per position as the stream advances.
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ByteSource>>,
    {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// The number of member sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the sequence has no members at all.
    ///
    /// Distinct from [`ByteSource::is_empty`]: a sequence of empty
    /// members is byte-empty but not member-empty.
    pub fn is_sequence_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ByteSource for ConcatSource {
    /// Opens lazily: no member stream exists until the first read.
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        Ok(Box::new(ConcatStream::from_shared(Arc::clone(
            &self.sources,
        ))))
    }

    /// Present only when every member's size is; absent members
    /// short-circuit.
    fn size_if_known(&self) -> Option<u64> {
        let mut total = 0u64;
        for source in self.sources.iter() {
            total = total.checked_add(source.size_if_known()?)?;
        }
        Some(total)
    }

    /// The sum of member sizes; each member resolves its own size.
    fn size(&self) -> io::Result<u64> {
        let mut total = 0u64;
        for source in self.sources.iter() {
            total += source.size()?;
        }
        Ok(total)
    }

    /// True iff every member is empty; stops at the first that is not.
    fn is_empty(&self) -> io::Result<bool> {
        for source in self.sources.iter() {
            if !source.is_empty()? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for ConcatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatSource")
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::wrap;

    /// In-memory data with the size hidden.
    #[derive(Clone)]
    struct OpaqueSource {
        data: Vec<u8>,
    }

    impl ByteSource for OpaqueSource {
        fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
            wrap(self.data.clone()).open_stream()
        }
    }

    #[test]
    fn test_read_joins_members() {
        let joined = concat(vec![wrap(&b"one"[..]), wrap(&b""[..]), wrap(&b"two"[..])]);
        assert_eq!(joined.read().unwrap(), b"onetwo");
    }

    #[test]
    fn test_size_if_known_sums() {
        let joined = concat(vec![wrap(vec![0u8; 10]), wrap(vec![0u8; 20])]);
        assert_eq!(joined.size_if_known(), Some(30));
        assert_eq!(joined.size().unwrap(), 30);
    }

    #[test]
    fn test_size_if_known_short_circuits_on_unknown_member() {
        let joined = ConcatSource::new([
            Arc::new(wrap(vec![0u8; 10])) as Arc<dyn ByteSource>,
            Arc::new(OpaqueSource {
                data: vec![0u8; 20],
            }),
        ]);
        assert_eq!(joined.size_if_known(), None);
        // size() still resolves by sizing each member individually
        assert_eq!(joined.size().unwrap(), 30);
    }

    #[test]
    fn test_is_empty_requires_all_empty() {
        let all_empty = concat(vec![wrap(&b""[..]), wrap(&b""[..])]);
        assert!(all_empty.is_empty().unwrap());
        assert_eq!(all_empty.size().unwrap(), 0);

        let one_full = concat(vec![wrap(&b""[..]), wrap(&b"x"[..])]);
        assert!(!one_full.is_empty().unwrap());
    }

    #[test]
    fn test_no_members() {
        let joined = ConcatSource::new(Vec::new());
        assert!(joined.is_sequence_empty());
        assert!(joined.is_empty().unwrap());
        assert_eq!(joined.size().unwrap(), 0);
        assert_eq!(joined.read().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_concat_of_concat() {
        let inner = concat(vec![wrap(&b"ab"[..]), wrap(&b"cd"[..])]);
        let outer = concat(vec![inner, concat(vec![wrap(&b"ef"[..])])]);
        assert_eq!(outer.read().unwrap(), b"abcdef");
        assert_eq!(outer.size().unwrap(), 6);
    }

    #[test]
    fn test_slices_of_concat() {
        let joined = concat(vec![wrap(&b"hello "[..]), wrap(&b"world"[..])]);
        let view = joined.slice(3, 5);
        assert_eq!(view.read().unwrap(), b"lo wo");
    }
}
