//! Archive scanning and text extraction.
//!
//! `archtext-core` takes an archive (ZIP or TAR, optionally compressed),
//! decides for every member whether it is plain text or binary, works out
//! each text file's character encoding, and returns the decoded contents in
//! listing order, ready to be rendered into a single document.
//!
//! The pieces, bottom up:
//!
//! - [`classify`]: allow/block byte heuristic for plain text.
//! - [`encoding`]: byte-order marks, in-file encoding declarations in eight
//!   dialects, EBCDIC fallbacks, and the codec registry.
//! - [`formats`]: archive providers with random member access.
//! - [`extraction`]: the bounded scan that applies the above to every member.
//! - [`render`]: templates that turn a result into one document.
//!
//! # Examples
//!
//! ```
//! use archtext_core::ExtractionConfig;
//! use archtext_core::extract_text;
//! use archtext_core::render::MarkdownTemplate;
//! use archtext_core::test_utils::create_test_zip;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = create_test_zip(vec![("hello.py", b"print('hi')\n")]);
//! let config = ExtractionConfig::default().with_max_files(100);
//!
//! let result = extract_text(data, &config)?;
//! let doc = result.render("hello", &MarkdownTemplate)?;
//! assert!(doc.starts_with("# hello\n"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod classify;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod io;
pub mod render;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::extract_text;
pub use api::extract_text_from_path;
pub use api::extract_text_from_path_with_progress;
#[cfg(feature = "async")]
pub use api::extract_text_offloaded;
pub use classify::Classification;
pub use config::ExtractionConfig;
pub use encoding::EncodingGuess;
pub use error::ExtractionError;
pub use error::QuotaResource;
pub use error::Result;
pub use extraction::extract_text_files;
pub use extraction::extract_with_progress;
pub use inspection::inspect_archive;
pub use report::ExtractionResult;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::SkipReason;
pub use report::SkippedMember;
pub use report::TextFile;
