//! Property-based tests for classification, resolution and extraction.
//!
//! These tests use proptest to generate arbitrary inputs and verify the
//! byte-set laws of the classifier and the invariants of the engine hold
//! across a wide range of cases.

#![allow(clippy::expect_used)]

use archtext_core::ExtractionConfig;
use archtext_core::classify::classify_bytes;
use archtext_core::encoding::resolve;
use archtext_core::extract_text;
use archtext_core::test_utils::create_test_zip;
use proptest::prelude::*;

const NEUTRAL: [u8; 4] = [7, 8, 11, 12];

fn allowed_byte() -> impl Strategy<Value = u8> {
    prop_oneof![Just(9u8), Just(10u8), Just(13u8), 32u8..=255]
}

fn blocked_byte() -> impl Strategy<Value = u8> {
    prop_oneof![0u8..=6, 14u8..=31]
}

fn neutral_byte() -> impl Strategy<Value = u8> {
    prop::sample::select(NEUTRAL.to_vec())
}

fn non_blocking_byte() -> impl Strategy<Value = u8> {
    prop_oneof![allowed_byte(), neutral_byte()]
}

proptest! {
    /// Allowed bytes plus neutral bytes, with at least one allowed byte,
    /// is always text.
    #[test]
    fn prop_allowed_bytes_are_text(
        mut data in prop::collection::vec(non_blocking_byte(), 0..10_000),
        anchor in allowed_byte(),
        at in any::<prop::sample::Index>(),
    ) {
        let pos = at.index(data.len() + 1);
        data.insert(pos, anchor);
        prop_assert!(classify_bytes(&data).is_text);
    }

    /// A single blocked byte anywhere makes the input binary.
    #[test]
    fn prop_any_blocked_byte_is_binary(
        mut data in prop::collection::vec(any::<u8>(), 0..10_000),
        blocked in blocked_byte(),
        at in any::<prop::sample::Index>(),
    ) {
        let pos = at.index(data.len() + 1);
        data.insert(pos, blocked);
        prop_assert!(!classify_bytes(&data).is_text);
    }

    /// Neutral bytes alone never make text.
    #[test]
    fn prop_neutral_only_is_binary(
        data in prop::collection::vec(neutral_byte(), 0..500),
    ) {
        prop_assert!(!classify_bytes(&data).is_text);
    }

    /// The sample is always the leading bytes of the input.
    #[test]
    fn prop_sample_is_prefix(data in prop::collection::vec(any::<u8>(), 0..10_000)) {
        let classification = classify_bytes(&data);
        prop_assert!(data.starts_with(&classification.sample));
        prop_assert!(classification.sample.len() <= archtext_core::classify::CHUNK_SIZE);
        if !data.is_empty() {
            prop_assert_eq!(
                classification.sample.len(),
                data.len().min(archtext_core::classify::CHUNK_SIZE)
            );
        }
    }

    /// Resolution never panics and a name is only reported with a dialect.
    #[test]
    fn prop_resolve_is_total(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let guess = resolve(&data);
        if guess.encoding_name.is_some() {
            prop_assert!(guess.dialect.is_some());
            prop_assert!(guess.codec().is_some());
        }
    }

    /// A well-formed declaration of a known encoding round-trips.
    #[test]
    fn prop_python_declaration_round_trip(
        name in prop::sample::select(vec![
            "utf-8", "latin-1", "koi8-r", "shift_jis", "euc-jp", "gbk", "windows-1251", "big5",
        ]),
        body in "[a-zA-Z0-9 =()'\n]{0,200}",
    ) {
        let source = format!("# -*- coding: {name} -*-\n{body}");
        let guess = resolve(source.as_bytes());
        prop_assert_eq!(guess.encoding_name.as_deref(), Some(name));
    }

    /// Extraction never exceeds either limit.
    #[test]
    fn prop_extraction_respects_limits(
        sizes in prop::collection::vec(1usize..200, 1..30),
        max_files in 1usize..20,
        max_total_size in 1usize..2000,
    ) {
        let names: Vec<String> = (0..sizes.len()).map(|i| format!("f{i}.txt")).collect();
        let contents: Vec<Vec<u8>> = sizes.iter().map(|&n| vec![b'x'; n]).collect();
        let entries = names
            .iter()
            .zip(&contents)
            .map(|(name, content)| (name.as_str(), content.as_slice()))
            .collect();
        let data = create_test_zip(entries);

        let config = ExtractionConfig::default()
            .with_max_files(max_files)
            .with_max_total_size(max_total_size);
        let result = extract_text(data, &config).expect("valid archive");

        prop_assert!(result.len() <= max_files);
        prop_assert!(result.total_chars <= max_total_size);
        prop_assert_eq!(
            result.total_chars,
            result.files.iter().map(|f| f.content.chars().count()).sum::<usize>()
        );
        prop_assert_eq!(result.total_member_count, sizes.len());
        if result.len() < sizes.len() {
            prop_assert!(result.file_limit_reached || result.size_limit_reached);
        }
    }
}
