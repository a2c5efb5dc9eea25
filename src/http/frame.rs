//! Header framing.
//!
//! A header frame is everything up to and including the first `\r\n\r\n`
//! in the byte stream. [`FrameBuffer`] accumulates incoming chunks until the
//! delimiter shows up, growing its capacity by doubling whenever a chunk
//! would not fit.

use bytes::{Bytes, BytesMut};

/// Terminates the header block of a request.
pub const DELIMITER: &[u8; 4] = b"\r\n\r\n";

/// Starting capacity of a frame buffer, also the size of a single socket read.
pub const INITIAL_BUFFER_SIZE: usize = 10_000;

/// Growth factor applied when a chunk does not fit.
pub const RESIZE_MULTIPLIER: usize = 2;

/// Growable byte buffer with an explicit logical capacity.
///
/// The logical capacity only ever changes by multiplying it with
/// [`RESIZE_MULTIPLIER`], independently of whatever the allocator hands back
/// to `BytesMut`.
#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Logical capacity, i.e. the initial size times a power of two.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `chunk`, doubling the capacity until it fits.
    pub fn push(&mut self, chunk: &[u8]) {
        let needed = self.buf.len() + chunk.len();
        if needed > self.capacity {
            while needed > self.capacity {
                self.capacity *= RESIZE_MULTIPLIER;
            }
            self.buf.reserve(self.capacity - self.buf.len());
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Position one past the end of the first delimiter, if any.
    ///
    /// Always rescans from the start so a delimiter split across two chunks
    /// is still found.
    pub fn find_delimiter(&self) -> Option<usize> {
        find_delimiter(&self.buf)
    }

    /// Splits the buffer at `end`: the frame is returned, the bytes after it
    /// are handed back as leftovers.
    pub fn split_frame(mut self, end: usize) -> (Bytes, BytesMut) {
        let frame = self.buf.split_to(end);
        (frame.freeze(), self.buf)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(DELIMITER.len())
        .position(|w| w == DELIMITER)
        .map(|start| start + DELIMITER.len())
}
