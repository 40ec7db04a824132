//! Single-byte EBCDIC code pages.
//!
//! `encoding_rs` covers the WHATWG encodings only, so the EBCDIC pages used
//! as legacy fallbacks are table-driven here. Every byte maps to a character,
//! so decoding never fails.

/// A single-byte code page mapping every byte to one character.
#[derive(Debug, PartialEq, Eq)]
pub struct CodePage {
    name: &'static str,
    table: [char; 256],
}

impl CodePage {
    /// Canonical name of the code page, e.g. `cp1140`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes bytes through the table.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.table[usize::from(b)]).collect()
    }
}

/// US/Canada EBCDIC.
pub static CP037: CodePage = CodePage {
    name: "cp037",
    table: assemble(CP037_GRAPHIC),
};

/// Greek EBCDIC.
pub static CP875: CodePage = CodePage {
    name: "cp875",
    table: assemble(CP875_GRAPHIC),
};

/// Turkish (Latin-5) EBCDIC.
pub static CP1026: CodePage = CodePage {
    name: "cp1026",
    table: assemble(CP1026_GRAPHIC),
};

/// US/Canada EBCDIC with the euro sign at 0x9F.
pub static CP1140: CodePage = CodePage {
    name: "cp1140",
    table: replace(assemble(CP037_GRAPHIC), 0x9F, '\u{20AC}'),
};

const fn assemble(graphic: [char; 192]) -> [char; 256] {
    let mut table = ['\0'; 256];
    let mut i = 0;
    while i < 64 {
        table[i] = CONTROLS[i];
        i += 1;
    }
    while i < 256 {
        table[i] = graphic[i - 64];
        i += 1;
    }
    table
}

const fn replace(mut table: [char; 256], byte: usize, ch: char) -> [char; 256] {
    table[byte] = ch;
    table
}

/// 0x00..=0x3F, shared by all EBCDIC pages here.
#[rustfmt::skip]
const CONTROLS: [char; 64] = [
    '\u{00}', '\u{01}', '\u{02}', '\u{03}', '\u{9C}', '\u{09}', '\u{86}', '\u{7F}',
    '\u{97}', '\u{8D}', '\u{8E}', '\u{0B}', '\u{0C}', '\u{0D}', '\u{0E}', '\u{0F}',
    '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{9D}', '\u{85}', '\u{08}', '\u{87}',
    '\u{18}', '\u{19}', '\u{92}', '\u{8F}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{1F}',
    '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{0A}', '\u{17}', '\u{1B}',
    '\u{88}', '\u{89}', '\u{8A}', '\u{8B}', '\u{8C}', '\u{05}', '\u{06}', '\u{07}',
    '\u{90}', '\u{91}', '\u{16}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{04}',
    '\u{98}', '\u{99}', '\u{9A}', '\u{9B}', '\u{14}', '\u{15}', '\u{9E}', '\u{1A}',
];

/// 0x40..=0xFF.
#[rustfmt::skip]
const CP037_GRAPHIC: [char; 192] = [
    ' ', '\u{A0}', 'â', 'ä', 'à', 'á', 'ã', 'å', 'ç', 'ñ', '¢', '.', '<', '(', '+', '|',
    '&', 'é', 'ê', 'ë', 'è', 'í', 'î', 'ï', 'ì', 'ß', '!', '$', '*', ')', ';', '¬',
    '-', '/', 'Â', 'Ä', 'À', 'Á', 'Ã', 'Å', 'Ç', 'Ñ', '¦', ',', '%', '_', '>', '?',
    'ø', 'É', 'Ê', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', '`', ':', '#', '@', '\'', '=', '"',
    'Ø', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', '«', '»', 'ð', 'ý', 'þ', '±',
    '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 'ª', 'º', 'æ', '¸', 'Æ', '¤',
    'µ', '~', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '¡', '¿', 'Ð', 'Ý', 'Þ', '®',
    '^', '£', '¥', '·', '©', '§', '¶', '¼', '½', '¾', '[', ']', '¯', '¨', '´', '×',
    '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', '\u{AD}', 'ô', 'ö', 'ò', 'ó', 'õ',
    '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', '¹', 'û', 'ü', 'ù', 'ú', 'ÿ',
    '\\', '÷', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '²', 'Ô', 'Ö', 'Ò', 'Ó', 'Õ',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '³', 'Û', 'Ü', 'Ù', 'Ú', '\u{9F}',
];

/// 0x40..=0xFF. Unassigned positions decode to SUB.
#[rustfmt::skip]
const CP875_GRAPHIC: [char; 192] = [
    ' ', 'Α', 'Β', 'Γ', 'Δ', 'Ε', 'Ζ', 'Η', 'Θ', 'Ι', '[', '.', '<', '(', '+', '!',
    '&', 'Κ', 'Λ', 'Μ', 'Ν', 'Ξ', 'Ο', 'Π', 'Ρ', 'Σ', ']', '$', '*', ')', ';', '^',
    '-', '/', 'Τ', 'Υ', 'Φ', 'Χ', 'Ψ', 'Ω', 'Ϊ', 'Ϋ', '|', ',', '%', '_', '>', '?',
    '¨', 'Ά', 'Έ', 'Ή', '\u{A0}', 'Ί', 'Ό', 'Ύ', 'Ώ', '`', ':', '#', '@', '\'', '=', '"',
    '΅', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'α', 'β', 'γ', 'δ', 'ε', 'ζ',
    '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 'η', 'θ', 'ι', 'κ', 'λ', 'μ',
    '´', '~', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ',
    '£', 'ά', 'έ', 'ή', 'ϊ', 'ί', 'ό', 'ύ', 'ϋ', 'ώ', 'ς', 'τ', 'υ', 'φ', 'χ', 'ψ',
    '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', '\u{AD}', 'ω', 'ΐ', 'ΰ', '‘', '―',
    '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', '±', '½', '\u{1A}', '·', '’', '¦',
    '\\', '\u{1A}', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '²', '§', '\u{1A}', '\u{1A}', '«', '¬',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '³', '©', '\u{1A}', '\u{1A}', '»', '\u{9F}',
];

/// 0x40..=0xFF.
#[rustfmt::skip]
const CP1026_GRAPHIC: [char; 192] = [
    ' ', '\u{A0}', 'â', 'ä', 'à', 'á', 'ã', 'å', '{', 'ñ', 'Ç', '.', '<', '(', '+', '!',
    '&', 'é', 'ê', 'ë', 'è', 'í', 'î', 'ï', 'ì', 'ß', 'Ğ', 'İ', '*', ')', ';', '^',
    '-', '/', 'Â', 'Ä', 'À', 'Á', 'Ã', 'Å', '[', 'Ñ', 'ş', ',', '%', '_', '>', '?',
    'ø', 'É', 'Ê', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'ı', ':', 'Ö', 'Ş', '\'', '=', 'Ü',
    'Ø', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', '«', '»', '}', '`', '¦', '±',
    '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 'ª', 'º', 'æ', '¸', 'Æ', '¤',
    'µ', 'ö', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '¡', '¿', ']', '$', '@', '®',
    '¢', '£', '¥', '·', '©', '§', '¶', '¼', '½', '¾', '¬', '|', '¯', '¨', '´', '×',
    'ç', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', '\u{AD}', 'ô', '~', 'ò', 'ó', 'õ',
    'ğ', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', '¹', 'û', '\\', 'ù', 'ú', 'ÿ',
    'ü', '÷', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '²', 'Ô', '#', 'Ò', 'Ó', 'Õ',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '³', 'Û', '"', 'Ù', 'Ú', '\u{9F}',
];

/// Encodes text through a code page, for building test fixtures.
#[cfg(test)]
pub(crate) fn encode(page: &CodePage, text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            page.table
                .iter()
                .position(|&c| c == ch)
                .and_then(|pos| u8::try_from(pos).ok())
                .unwrap_or(0x3F)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp037_letters_and_digits() {
        assert_eq!(CP037.decode(&[0xC8, 0x85, 0x93, 0x93, 0x96]), "Hello");
        assert_eq!(CP037.decode(&[0xF0, 0xF9]), "09");
        assert_eq!(CP037.decode(&[0x40, 0x25]), " \n");
    }

    #[test]
    fn test_cp1140_differs_from_cp037_only_at_euro() {
        for byte in 0..=255u8 {
            let a = CP037.decode(&[byte]);
            let b = CP1140.decode(&[byte]);
            if byte == 0x9F {
                assert_eq!(b, "\u{20AC}");
                assert_ne!(a, b);
            } else {
                assert_eq!(a, b, "byte {byte:#04x}");
            }
        }
    }

    #[test]
    fn test_cp1026_turkish_positions() {
        assert_eq!(CP1026.decode(&[0x5A, 0x5B, 0x79]), "Ğİı");
        assert_eq!(CP1026.decode(&[0xFC, 0xEC, 0xAE]), "\"#@");
    }

    #[test]
    fn test_cp875_greek_positions() {
        assert_eq!(CP875.decode(&[0x41, 0x42, 0x43]), "ΑΒΓ");
        assert_eq!(CP875.decode(&[0x8A, 0x8B]), "αβ");
    }

    #[test]
    fn test_encode_roundtrip_for_declaration_text() {
        let text = "# -*- coding: cp1026 -*-\n";
        for page in [&CP037, &CP875, &CP1026, &CP1140] {
            let bytes = encode(page, text);
            assert_eq!(page.decode(&bytes), text, "{}", page.name());
        }
    }

    #[test]
    fn test_decode_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        for page in [&CP037, &CP875, &CP1026, &CP1140] {
            assert_eq!(page.decode(&all).chars().count(), 256);
        }
    }
}
