//! Byte-counting reader with an upper bound.
//!
//! Decompressors happily produce gigabytes from a few kilobytes of input.
//! [`BoundedReader`] counts the bytes it hands out and refuses to go past a
//! limit, so every inflate and member read in this crate has a known memory
//! ceiling.

use std::io::Read;
use std::io::{self};

/// Wrapper reader that tracks total bytes read and enforces a limit.
///
/// Reading past the limit never fails mid-buffer: the reader returns data up
/// to the limit, then reports [`exceeded`](Self::exceeded) once one more byte
/// was available from the inner reader.
///
/// # Examples
///
/// ```
/// use archtext_core::io::BoundedReader;
/// use std::io::Read;
///
/// let mut reader = BoundedReader::new(&b"Hello, World!"[..], 5);
/// let mut out = Vec::new();
/// reader.read_to_end(&mut out)?;
///
/// assert_eq!(out, b"Hello");
/// assert!(reader.exceeded());
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct BoundedReader<R> {
    inner: R,
    limit: u64,
    bytes_read: u64,
    exceeded: bool,
}

impl<R: Read> BoundedReader<R> {
    /// Creates a reader that yields at most `limit` bytes from `inner`.
    #[must_use]
    pub const fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            limit,
            bytes_read: 0,
            exceeded: false,
        }
    }

    /// Returns the total number of bytes handed out so far.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.bytes_read
    }

    /// Returns `true` if the inner reader had more data than the limit.
    #[must_use]
    pub const fn exceeded(&self) -> bool {
        self.exceeded
    }

    /// Consumes the wrapper and returns the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let remaining = self.limit - self.bytes_read;
        if remaining == 0 {
            if !self.exceeded {
                let mut probe = [0u8; 1];
                self.exceeded = loop {
                    match self.inner.read(&mut probe) {
                        Ok(n) => break n > 0,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => return Err(e),
                    }
                };
            }
            return Ok(0);
        }

        let max = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.inner.read(&mut buf[..max])?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

/// Outcome of [`read_bounded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounded {
    /// The whole stream fit within the limit.
    Complete(Vec<u8>),
    /// The stream was longer than the limit; nothing is returned.
    Exceeded,
}

/// Reads a whole stream into memory unless it is longer than `limit`.
///
/// # Errors
///
/// Returns an error if the inner reader fails.
///
/// # Examples
///
/// ```
/// use archtext_core::io::bounded::Bounded;
/// use archtext_core::io::read_bounded;
///
/// assert_eq!(read_bounded(&b"abc"[..], 3)?, Bounded::Complete(b"abc".to_vec()));
/// assert_eq!(read_bounded(&b"abcd"[..], 3)?, Bounded::Exceeded);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_bounded<R: Read>(reader: R, limit: u64) -> io::Result<Bounded> {
    let mut bounded = BoundedReader::new(reader, limit);
    let mut buf = Vec::new();
    bounded.read_to_end(&mut buf)?;
    if bounded.exceeded() {
        Ok(Bounded::Exceeded)
    } else {
        Ok(Bounded::Complete(buf))
    }
}
