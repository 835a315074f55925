//! Thread-local buffer pool for efficient memory reuse.

use std::cell::RefCell;

/// Size of pooled scratch buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024; // 8 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable byte buffer, always `DEFAULT_BUFFER_SIZE` long.
///
/// Contents are scratch: callers overwrite before reading and must not
/// assume anything about the bytes a pooled buffer arrives with.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if let Some(data) = pool.pop() {
                Self { data }
            } else {
                Self {
                    data: vec![0u8; DEFAULT_BUFFER_SIZE],
                }
            }
        })
    }

    /// The whole buffer as a mutable read target.
    pub fn slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The buffer split into two equal halves.
    ///
    /// Used by content comparison, which reads matched-size chunks from
    /// two streams into one shared buffer.
    pub fn halves_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        let mid = self.data.len() / 2;
        self.data.split_at_mut(mid)
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Only full-size buffers go back to the pool
        if self.data.len() == DEFAULT_BUFFER_SIZE {
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let mut buf = Buffer::take();
        assert_eq!(buf.slice_mut().len(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_buffer_halves() {
        let mut buf = Buffer::take();
        let (left, right) = buf.halves_mut();
        assert_eq!(left.len(), DEFAULT_BUFFER_SIZE / 2);
        assert_eq!(right.len(), DEFAULT_BUFFER_SIZE / 2);
    }

    #[test]
    fn test_buffer_reuse() {
        // Take a buffer, scribble into it, then drop it
        {
            let mut buf = Buffer::take();
            buf.slice_mut()[0] = 0xAB;
        }

        // The buffer should come back from the pool, full-size
        let mut buf2 = Buffer::take();
        assert_eq!(buf2.slice_mut().len(), DEFAULT_BUFFER_SIZE);
    }
}
