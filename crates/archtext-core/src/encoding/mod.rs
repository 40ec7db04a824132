//! Encoding resolution for text samples.
//!
//! Source and markup files often declare their own encoding near the top.
//! [`resolve`] recovers that declaration from a bounded sample so the full
//! member can be decoded correctly even though archives carry no per-file
//! encoding metadata.

mod codec;
mod dialect;
pub mod ebcdic;

pub use codec::Codec;
pub use dialect::Declaration;
pub use dialect::Dialect;
pub use dialect::find_declaration;

use serde::Serialize;

/// Byte-order marks, longest first: the UTF-32-LE mark starts with the
/// UTF-16-LE mark.
static BOMS: [(&[u8], Codec); 5] = [
    (&[0xFF, 0xFE, 0x00, 0x00], Codec::Utf32 { big_endian: false }),
    (&[0x00, 0x00, 0xFE, 0xFF], Codec::Utf32 { big_endian: true }),
    (&[0xFF, 0xFE], Codec::Whatwg(&encoding_rs::UTF_16LE_INIT)),
    (&[0xFE, 0xFF], Codec::Whatwg(&encoding_rs::UTF_16BE_INIT)),
    (&[0xEF, 0xBB, 0xBF], Codec::Whatwg(&encoding_rs::UTF_8_INIT)),
];

/// Legacy code pages tried, in order, when the first decode finds nothing.
static FALLBACK_PAGES: [&ebcdic::CodePage; 3] = [&ebcdic::CP875, &ebcdic::CP1026, &ebcdic::CP1140];

/// Result of resolving a sample's declared encoding.
///
/// `dialect` is set whenever a declaration was found. `encoding_name` is set
/// only when the declared name is known to the [`Codec`] registry, so a set
/// dialect with no name means "declared, but unusable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodingGuess {
    /// The declaration idiom that matched, if any.
    pub dialect: Option<Dialect>,
    /// The declared encoding name, verbatim, if it is a known encoding.
    pub encoding_name: Option<String>,
    #[serde(skip)]
    codec: Option<Codec>,
}

impl EncodingGuess {
    /// The codec for the declared encoding, if usable.
    #[must_use]
    pub const fn codec(&self) -> Option<Codec> {
        self.codec
    }

    /// Returns `true` if a declaration was found but names no known encoding.
    #[must_use]
    pub const fn is_unusable_declaration(&self) -> bool {
        self.dialect.is_some() && self.encoding_name.is_none()
    }

    fn from_declaration(declaration: &Declaration<'_>) -> Self {
        let codec = Codec::for_label(declaration.token);
        Self {
            dialect: Some(declaration.dialect),
            encoding_name: codec.map(|_| declaration.token.to_string()),
            codec,
        }
    }
}

/// Returns the codec whose byte-order mark starts `sample`, if any.
///
/// # Examples
///
/// ```
/// use archtext_core::encoding::sniff_bom;
///
/// let codec = sniff_bom(b"\xff\xfe\x00\x00h\x00\x00\x00").unwrap();
/// assert_eq!(codec.name(), "UTF-32LE");
/// assert!(sniff_bom(b"plain").is_none());
/// ```
#[must_use]
pub fn sniff_bom(sample: &[u8]) -> Option<Codec> {
    BOMS.iter()
        .find(|(bom, _)| sample.starts_with(bom))
        .map(|&(_, codec)| codec)
}

/// Decodes a sample for declaration search.
///
/// A byte-order mark selects the codec and is stripped. Without one, strict
/// UTF-8 is tried, then ASCII with every non-ASCII byte dropped. Never fails.
#[must_use]
pub fn decode_sample(sample: &[u8]) -> String {
    if let Some((bom, codec)) = BOMS.iter().find(|(bom, _)| sample.starts_with(bom)) {
        return codec.decode_lossy(&sample[bom.len()..]);
    }

    match std::str::from_utf8(sample) {
        Ok(text) => text.to_string(),
        Err(_) => sample
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| char::from(b))
            .collect(),
    }
}

/// Resolves the declared encoding of a text sample.
///
/// 1. Decode the sample via [`decode_sample`] and search it for a
///    declaration. A declaration naming a known encoding wins.
/// 2. Otherwise re-decode the raw sample with cp875, cp1026 and cp1140 in
///    turn and search again; the first known encoding wins.
/// 3. Otherwise report what step 1 found: an unusable declaration keeps its
///    dialect, no declaration at all yields an empty guess.
///
/// # Examples
///
/// ```
/// use archtext_core::encoding::Dialect;
/// use archtext_core::encoding::resolve;
///
/// let guess = resolve(b"<?xml version=\"1.0\" encoding=\"koi8-r\"?>");
/// assert_eq!(guess.dialect, Some(Dialect::Xml));
/// assert_eq!(guess.encoding_name.as_deref(), Some("koi8-r"));
///
/// let guess = resolve(b"# coding: no-such-codec");
/// assert_eq!(guess.dialect, Some(Dialect::Python));
/// assert_eq!(guess.encoding_name, None);
///
/// assert_eq!(resolve(b"plain text").dialect, None);
/// ```
#[must_use]
pub fn resolve(sample: &[u8]) -> EncodingGuess {
    let text = decode_sample(sample);
    let first = find_declaration(&text).map(|d| EncodingGuess::from_declaration(&d));
    if first.as_ref().is_some_and(|guess| guess.codec.is_some()) {
        return first.unwrap_or_default();
    }

    let fallback = FALLBACK_PAGES.iter().find_map(|page| {
        let text = page.decode(sample);
        find_declaration(&text)
            .map(|d| EncodingGuess::from_declaration(&d))
            .filter(|guess| guess.codec.is_some())
    });

    fallback.or(first).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn encode_utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    fn encode_utf32(text: &str, big_endian: bool) -> Vec<u8> {
        text.chars()
            .flat_map(|c| {
                if big_endian {
                    u32::from(c).to_be_bytes()
                } else {
                    u32::from(c).to_le_bytes()
                }
            })
            .collect()
    }

    #[test]
    fn test_resolve_each_dialect() {
        let cases = [
            ("# -*- coding: utf-8 -*-\n\nprint('Hello, World!')\n", "utf-8"),
            ("# encoding: utf-8\n\nputs 'Hello, World!'\n", "utf-8"),
            ("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>Hello</root>\n", "UTF-8"),
            ("<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n</html>\n", "utf-8"),
            ("use encoding 'utf-8';\n\nprint 'Hello';\n", "utf-8"),
            ("@charset \"utf-8\";\n\nbody {\n  color: blue;\n}\n", "utf-8"),
            ("% !TEX encoding = UTF-8\n\n\\documentclass{article}\n", "UTF-8"),
        ];
        for (content, expected) in cases {
            let guess = resolve(content.as_bytes());
            assert_eq!(guess.encoding_name.as_deref(), Some(expected), "{content:?}");
            assert!(guess.codec().is_some());
        }
    }

    #[test]
    fn test_resolve_declared_legacy_encoding() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("# coding: shift_jis\nprint('こんにちは')\n");
        let guess = resolve(&bytes);
        assert_eq!(guess.encoding_name.as_deref(), Some("shift_jis"));
        assert_eq!(guess.codec().unwrap().name(), "Shift_JIS");
    }

    #[test]
    fn test_resolve_invalid_declaration() {
        let guess = resolve(b"# -*- coding: invalid -*-\n\nprint('Hello, World!')\n");
        assert_eq!(guess.encoding_name, None);
        assert_eq!(guess.dialect, Some(Dialect::Python));
        assert!(guess.is_unusable_declaration());
        assert!(guess.codec().is_none());
    }

    #[test]
    fn test_resolve_without_declaration() {
        for content in [
            "print('Hello, World!')\n",
            "<root>Hello, World!</root>\n",
            "body {\n  color: blue;\n}\n",
        ] {
            let guess = resolve(content.as_bytes());
            assert_eq!(guess, EncodingGuess::default(), "{content:?}");
        }
    }

    #[test]
    fn test_resolve_empty_sample() {
        assert_eq!(resolve(b""), EncodingGuess::default());
    }

    #[test]
    fn test_bom_precedence_utf32_over_utf16() {
        let mut bytes = vec![0xFF, 0xFE, 0x00, 0x00];
        bytes.extend(encode_utf32("# coding: utf_32_le\n", false));
        assert_eq!(sniff_bom(&bytes).unwrap().name(), "UTF-32LE");

        let guess = resolve(&bytes);
        assert_eq!(guess.encoding_name.as_deref(), Some("utf_32_le"));
    }

    #[test]
    fn test_bom_utf32_be() {
        let mut bytes = vec![0x00, 0x00, 0xFE, 0xFF];
        bytes.extend(encode_utf32("# coding: utf_32_be\n", true));
        assert_eq!(resolve(&bytes).encoding_name.as_deref(), Some("utf_32_be"));
    }

    #[test]
    fn test_bom_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(encode_utf16le("# coding: utf_16_le\n"));
        assert_eq!(sniff_bom(&bytes).unwrap().name(), "UTF-16LE");
        assert_eq!(resolve(&bytes).encoding_name.as_deref(), Some("utf_16_le"));
    }

    #[test]
    fn test_bom_utf8_is_stripped() {
        let text = decode_sample(b"\xef\xbb\xbf@charset \"utf-8\";");
        assert_eq!(text, "@charset \"utf-8\";");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_ascii() {
        let text = decode_sample(b"caf\xe9 # coding: latin-1");
        assert_eq!(text, "caf # coding: latin-1");
        assert_eq!(
            resolve(b"caf\xe9 # coding: latin-1").encoding_name.as_deref(),
            Some("latin-1")
        );
    }

    #[test]
    fn test_ebcdic_fallbacks() {
        for page in [&ebcdic::CP875, &ebcdic::CP1026, &ebcdic::CP1140] {
            let content = format!("# -*- coding: {} -*-\n\nprint('Hello, World!')\n", page.name());
            let bytes = ebcdic::encode(page, &content);
            let guess = resolve(&bytes);
            assert_eq!(guess.encoding_name.as_deref(), Some(page.name()));
            assert_eq!(guess.dialect, Some(Dialect::Python));
        }
    }

    #[test]
    fn test_ebcdic_unknown_declaration_is_not_a_fallback_match() {
        let bytes = ebcdic::encode(&ebcdic::CP1140, "# coding: bogus\n");
        assert_eq!(resolve(&bytes), EncodingGuess::default());
    }

    #[test]
    fn test_guess_serializes_without_codec() {
        let guess = resolve(b"@charset \"utf-8\";");
        let json = serde_json::to_string(&guess).unwrap();
        assert_eq!(json, r#"{"dialect":"Css","encoding_name":"utf-8"}"#);
    }
}
