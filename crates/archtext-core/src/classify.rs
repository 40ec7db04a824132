//! Plain-text versus binary classification.
//!
//! Follows the allow/block byte model from zlib's `txtvsbin.txt`: a stream is
//! text if it contains at least one allowed byte and no blocked byte.
//!
//! | Class | Bytes |
//! |-------|-------|
//! | allow | 9 (TAB), 10 (LF), 13 (CR), 32..=255 |
//! | block | 0..=6, 14..=31 |
//! | neutral | 7 (BEL), 8 (BS), 11 (VT), 12 (FF) |
//!
//! SUB (26) and ESC (27) fall inside the blocked range and block here, unlike
//! zlib's gray list.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::{self};

/// Size of every chunk read after the first.
pub const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    Allow,
    Block,
    Neutral,
}

const BYTE_CLASSES: [ByteClass; 256] = build_byte_classes();

const fn build_byte_classes() -> [ByteClass; 256] {
    let mut table = [ByteClass::Allow; 256];
    let mut byte = 0;
    while byte < 32 {
        table[byte] = match byte {
            9 | 10 | 13 => ByteClass::Allow,
            7 | 8 | 11 | 12 => ByteClass::Neutral,
            _ => ByteClass::Block,
        };
        byte += 1;
    }
    table
}

/// Outcome of classifying one byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether the stream looks like plain text.
    pub is_text: bool,
    /// The first chunk read from the stream, at most [`CHUNK_SIZE`] bytes.
    ///
    /// Reused by the encoding resolver so the member is not read twice.
    pub sample: Vec<u8>,
}

impl Classification {
    const fn binary(sample: Vec<u8>) -> Self {
        Self {
            is_text: false,
            sample,
        }
    }
}

/// Classifies a stream as plain text or binary.
///
/// The stream is rewound to its start before scanning and again afterwards,
/// so callers can read it from the beginning once this returns. The first
/// chunk is one byte short of [`CHUNK_SIZE`] because a single byte is peeked
/// up front to detect empty input.
///
/// Empty input is binary. This is a deliberate policy: an empty member has no
/// content worth rendering.
///
/// Scanning stops at the first blocked byte. A stream made only of neutral
/// bytes has no allowed byte and is binary too.
///
/// # Errors
///
/// Returns an error if reading or seeking the stream fails.
///
/// # Examples
///
/// ```
/// use archtext_core::classify::classify;
/// use std::io::Cursor;
///
/// let text = classify(&mut Cursor::new(b"fn main() {}\n"))?;
/// assert!(text.is_text);
///
/// let png = classify(&mut Cursor::new(b"\x89PNG\r\n\x1a\n\x00\x00"))?;
/// assert!(!png.is_text);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn classify<R: Read + Seek>(reader: &mut R) -> io::Result<Classification> {
    reader.seek(SeekFrom::Start(0))?;
    let result = scan(reader);
    reader.seek(SeekFrom::Start(0))?;
    result
}

/// Classifies a forward-only stream, appending every byte consumed to `kept`.
///
/// Nothing is rewound. Reading stops at the first blocked byte, so a binary
/// stream costs at most the chunk holding that byte, while for a text stream
/// `kept` ends up holding the whole stream.
///
/// # Errors
///
/// Returns an error if reading the stream fails.
///
/// # Examples
///
/// ```
/// use archtext_core::classify::classify_stream;
///
/// let mut kept = Vec::new();
/// let result = classify_stream(&mut &b"line one\nline two\n"[..], &mut kept)?;
/// assert!(result.is_text);
/// assert_eq!(kept, b"line one\nline two\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn classify_stream<R: Read>(
    reader: &mut R,
    kept: &mut Vec<u8>,
) -> io::Result<Classification> {
    scan(&mut Keep { inner: reader, kept })
}

/// Passes reads through, recording the bytes handed out.
struct Keep<'a, R> {
    inner: &'a mut R,
    kept: &'a mut Vec<u8>,
}

impl<R: Read> Read for Keep<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.kept.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

fn scan<R: Read>(reader: &mut R) -> io::Result<Classification> {
    let mut first = [0u8; 1];
    if read_chunk(reader, &mut first)? == 0 {
        return Ok(Classification::binary(Vec::new()));
    }

    let mut sample = Vec::with_capacity(CHUNK_SIZE);
    sample.push(first[0]);
    let mut rest = [0u8; CHUNK_SIZE - 1];
    let n = read_chunk(reader, &mut rest)?;
    sample.extend_from_slice(&rest[..n]);

    let mut allow_found = false;
    if !scan_chunk(&sample, &mut allow_found) {
        return Ok(Classification::binary(sample));
    }

    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = read_chunk(reader, &mut chunk)?;
        if n == 0 {
            break;
        }
        if !scan_chunk(&chunk[..n], &mut allow_found) {
            return Ok(Classification::binary(sample));
        }
    }

    Ok(Classification {
        is_text: allow_found,
        sample,
    })
}

/// Returns `false` as soon as a blocked byte is seen.
fn scan_chunk(chunk: &[u8], allow_found: &mut bool) -> bool {
    for &byte in chunk {
        match BYTE_CLASSES[usize::from(byte)] {
            ByteClass::Allow => *allow_found = true,
            ByteClass::Block => return false,
            ByteClass::Neutral => {}
        }
    }
    true
}

/// Fills `buf` as far as the stream allows, returning the byte count.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Classifies an in-memory byte slice.
///
/// # Examples
///
/// ```
/// use archtext_core::classify::classify_bytes;
///
/// assert!(classify_bytes(b"hello\n").is_text);
/// assert!(!classify_bytes(b"").is_text);
/// ```
#[must_use]
pub fn classify_bytes(bytes: &[u8]) -> Classification {
    let mut cursor = io::Cursor::new(bytes);
    match classify(&mut cursor) {
        Ok(classification) => classification,
        // Reading from a slice cannot fail.
        Err(_) => Classification::binary(Vec::new()),
    }
}
