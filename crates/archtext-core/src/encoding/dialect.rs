//! In-file encoding declaration idioms.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A file-type convention for declaring a text encoding inside the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dialect {
    /// `# -*- coding: utf-8 -*-`
    Python,
    /// `# encoding: utf-8`
    Ruby,
    /// `<?xml version="1.0" encoding="UTF-8"?>`
    Xml,
    /// `<meta charset="utf-8">`
    Html,
    /// `use encoding 'utf-8';`
    Perl,
    /// `@charset "utf-8";`
    Css,
    /// `% !TEX encoding = UTF-8`
    Latex,
    /// XHTML documents are XML and declare the same way.
    Xhtml,
}

impl Dialect {
    /// All dialects, in the order they are tried.
    pub const ALL: [Self; 8] = [
        Self::Python,
        Self::Ruby,
        Self::Xml,
        Self::Html,
        Self::Perl,
        Self::Css,
        Self::Latex,
        Self::Xhtml,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Ruby => "Ruby",
            Self::Xml => "XML",
            Self::Html => "HTML",
            Self::Perl => "Perl",
            Self::Css => "CSS",
            Self::Latex => "LaTeX",
            Self::Xhtml => "XHTML",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            // Ruby's magic comment is the same idiom; Python is tried first.
            Self::Python | Self::Ruby => &CODING_COMMENT,
            Self::Xml | Self::Xhtml => &XML_DECLARATION,
            Self::Html => &HTML_META,
            Self::Perl => &PERL_PRAGMA,
            Self::Css => &CSS_CHARSET,
            Self::Latex => &LATEX_MAGIC,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("declaration patterns are valid regexes")
}

static CODING_COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"coding[=:]\s*([-\w.]+)"));
static XML_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"<\?xml\s+.*encoding=["']([-\w.]+)["'].*\?>"#));
static HTML_META: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"<meta\s+.*charset=["']([-\w.]+)["'].*>"#));
static PERL_PRAGMA: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"use\s+encoding\s+["']([-\w.]+)["']"#));
static CSS_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"@charset\s+["']([-\w.]+)["']"#));
static LATEX_MAGIC: LazyLock<Regex> =
    LazyLock::new(|| compile(r"%\s*!TEX\s+encoding\s*=\s*([-\w.]+)"));

/// An encoding declaration found in decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The idiom that matched.
    pub dialect: Dialect,
    /// The declared encoding name, verbatim.
    pub token: &'a str,
}

/// Finds the first encoding declaration in `text`.
///
/// Dialects are tried in [`Dialect::ALL`] order and the first match wins,
/// even if a later dialect would also match.
///
/// # Examples
///
/// ```
/// use archtext_core::encoding::Dialect;
/// use archtext_core::encoding::find_declaration;
///
/// let found = find_declaration("# -*- coding: latin-1 -*-").unwrap();
/// assert_eq!(found.dialect, Dialect::Python);
/// assert_eq!(found.token, "latin-1");
///
/// assert!(find_declaration("print('hi')").is_none());
/// ```
#[must_use]
pub fn find_declaration(text: &str) -> Option<Declaration<'_>> {
    Dialect::ALL.iter().find_map(|&dialect| {
        dialect
            .pattern()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|token| Declaration {
                dialect,
                token: token.as_str(),
            })
    })
}
