//! Archive inspection without limits.
//!
//! Reports what the extraction engine would decide for every member, which
//! is useful when a rendered document is missing a file and you want to know
//! why.
//!
//! # Examples
//!
//! ```
//! use archtext_core::ExtractionConfig;
//! use archtext_core::formats::open_archive;
//! use archtext_core::inspect_archive;
//! use archtext_core::inspection::Verdict;
//! use archtext_core::test_utils::create_test_zip;
//!
//! let data = create_test_zip(vec![("a.py", b"# coding: bogus\n"), ("b.bin", b"\x00")]);
//! let config = ExtractionConfig::default();
//! let mut source = open_archive(data, &config)?;
//!
//! let report = inspect_archive(source.as_mut(), &config);
//! assert!(matches!(report[0].verdict, Verdict::Text { declared_encoding: None, .. }));
//! assert!(matches!(report[1].verdict, Verdict::Binary));
//! # Ok::<(), archtext_core::ExtractionError>(())
//! ```

pub mod list;

pub use list::MemberInspection;
pub use list::Verdict;
pub use list::inspect_archive;
