//! Codec registry: maps declared encoding names to decoders.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use super::ebcdic;
use super::ebcdic::CodePage;

/// A text decoder known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Any WHATWG encoding supported by `encoding_rs`.
    Whatwg(&'static Encoding),
    /// UTF-32 in the given byte order.
    Utf32 {
        /// `true` for big-endian.
        big_endian: bool,
    },
    /// A single-byte EBCDIC code page.
    Ebcdic(&'static CodePage),
}

impl Codec {
    /// UTF-8, the default when nothing is declared.
    #[must_use]
    pub fn utf8() -> Self {
        Self::Whatwg(encoding_rs::UTF_8)
    }

    /// Looks up a codec by a declared encoding name.
    ///
    /// Accepts WHATWG labels as well as the spellings common in source files
    /// (`utf_8`, `latin-1`, `cp932`, `utf-8-sig`, ...). Returns `None` for
    /// names the registry does not know, including the labels that WHATWG maps
    /// to its `replacement` encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::encoding::Codec;
    ///
    /// assert_eq!(Codec::for_label("UTF-8").map(|c| c.name()), Some("UTF-8"));
    /// assert_eq!(Codec::for_label("shift_jis").map(|c| c.name()), Some("Shift_JIS"));
    /// assert_eq!(Codec::for_label("cp1140").map(|c| c.name()), Some("cp1140"));
    /// assert!(Codec::for_label("klingon").is_none());
    /// ```
    #[must_use]
    pub fn for_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        lookup(trimmed)
            .or_else(|| lookup(&normalized))
            .or_else(|| alias(&normalized).and_then(|name| lookup(&name)))
    }

    /// Canonical name of the codec.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whatwg(encoding) => encoding.name(),
            Self::Utf32 { big_endian: false } => "UTF-32LE",
            Self::Utf32 { big_endian: true } => "UTF-32BE",
            Self::Ebcdic(page) => page.name(),
        }
    }

    /// Decodes bytes, returning `None` on any malformed sequence.
    ///
    /// No byte-order mark is stripped.
    #[must_use]
    pub fn decode_strict(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            Self::Utf32 { big_endian } => decode_utf32(bytes, *big_endian, true),
            Self::Ebcdic(page) => Some(page.decode(bytes)),
        }
    }

    /// Decodes bytes, substituting U+FFFD for malformed sequences.
    ///
    /// No byte-order mark is stripped.
    #[must_use]
    pub fn decode_lossy(&self, bytes: &[u8]) -> String {
        match self {
            Self::Whatwg(encoding) => encoding.decode_without_bom_handling(bytes).0.into_owned(),
            Self::Utf32 { big_endian } => {
                decode_utf32(bytes, *big_endian, false).unwrap_or_default()
            }
            Self::Ebcdic(page) => page.decode(bytes),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn lookup(label: &str) -> Option<Codec> {
    native(label).or_else(|| Encoding::for_label_no_replacement(label.as_bytes()).map(Codec::Whatwg))
}

/// Codecs that `encoding_rs` does not provide.
fn native(label: &str) -> Option<Codec> {
    let codec = match label.to_ascii_lowercase().as_str() {
        "utf-32" | "utf32" | "utf-32le" | "utf-32-le" | "utf32le" => {
            Codec::Utf32 { big_endian: false }
        }
        "utf-32be" | "utf-32-be" | "utf32be" => Codec::Utf32 { big_endian: true },
        "cp037" | "ibm037" | "ibm-037" | "ebcdic-cp-us" => Codec::Ebcdic(&ebcdic::CP037),
        "cp875" | "ibm875" | "ibm-875" => Codec::Ebcdic(&ebcdic::CP875),
        "cp1026" | "ibm1026" | "ibm-1026" => Codec::Ebcdic(&ebcdic::CP1026),
        "cp1140" | "ibm1140" | "ibm-1140" => Codec::Ebcdic(&ebcdic::CP1140),
        _ => return None,
    };
    Some(codec)
}

/// Maps common non-WHATWG spellings onto WHATWG labels.
fn alias(normalized: &str) -> Option<String> {
    let target = match normalized {
        "latin-1" | "iso-latin-1" => "latin1",
        "utf-8-sig" | "utf8-sig" | "u8" => "utf-8",
        "utf-16-le" | "utf16le" => "utf-16le",
        "utf-16-be" | "utf16be" => "utf-16be",
        "cp932" | "ms932" | "mskanji" | "ms-kanji" => "shift_jis",
        "cp936" | "ms936" => "gbk",
        "cp949" | "ms949" | "uhc" => "euc-kr",
        "cp950" | "ms950" => "big5",
        "cp874" => "windows-874",
        "mac-roman" | "macroman" => "macintosh",
        "mac-cyrillic" | "maccyrillic" => "x-mac-cyrillic",
        "iso2022-jp" => "iso-2022-jp",
        _ => {
            return normalized
                .strip_prefix("iso8859-")
                .map(|part| format!("iso-8859-{part}"));
        }
    };
    Some(target.to_string())
}

fn decode_utf32(bytes: &[u8], big_endian: bool, strict: bool) -> Option<String> {
    let chunks = bytes.chunks_exact(4);
    let remainder = chunks.remainder();
    if strict && !remainder.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(bytes.len() / 4);
    for chunk in chunks {
        let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let value = if big_endian {
            u32::from_be_bytes(raw)
        } else {
            u32::from_le_bytes(raw)
        };
        match char::from_u32(value) {
            Some(ch) => out.push(ch),
            None if strict => return None,
            None => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    if !remainder.is_empty() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    Some(out)
}
