//! Integration tests for archtext-core.
//!
//! These tests run the public API end to end over in-memory archives in
//! every supported container format.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use archtext_core::ExtractionConfig;
use archtext_core::ExtractionError;
use archtext_core::SkipReason;
use archtext_core::encoding::Dialect;
use archtext_core::encoding::resolve;
use archtext_core::extract_text;
use archtext_core::extract_text_from_path;
use archtext_core::formats::open_archive;
use archtext_core::inspect_archive;
use archtext_core::inspection::Verdict;
use archtext_core::render::JsonTemplate;
use archtext_core::render::MarkdownTemplate;
use archtext_core::test_utils::TarTestBuilder;
use archtext_core::test_utils::ZipTestBuilder;
use archtext_core::test_utils::corrupt_first;
use archtext_core::test_utils::create_test_tar;
use archtext_core::test_utils::create_test_tar_gz;
use archtext_core::test_utils::create_test_zip;

fn four_text_members() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("repo-main/README.md", b"# Repo\n"),
        ("repo-main/src/lib.rs", b"pub fn add(a: i32, b: i32) -> i32 { a + b }\n"),
        ("repo-main/setup.py", b"from setuptools import setup\n"),
        ("repo-main/LICENSE", b"MIT License\n"),
    ]
}

#[test]
fn test_four_text_members_in_every_format() {
    let archives = [
        create_test_zip(four_text_members()),
        create_test_tar(four_text_members()),
        create_test_tar_gz(four_text_members()),
    ];

    for data in archives {
        let result = extract_text(data, &ExtractionConfig::default()).unwrap();
        assert_eq!(result.len(), 4);
        assert!(!result.file_limit_reached);
        assert!(!result.size_limit_reached);
        assert_eq!(result.total_member_count, 4);
        assert_eq!(
            result.paths().collect::<Vec<_>>(),
            [
                "repo-main/README.md",
                "repo-main/src/lib.rs",
                "repo-main/setup.py",
                "repo-main/LICENSE"
            ]
        );
    }
}

#[test]
fn test_file_limit_of_three_over_five_members() {
    let data = create_test_zip(vec![
        ("1.txt", b"one"),
        ("2.txt", b"two"),
        ("3.txt", b"three"),
        ("4.txt", b"four"),
        ("5.txt", b"five"),
    ]);
    let config = ExtractionConfig::default().with_max_files(3);
    let result = extract_text(data, &config).unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.file_limit_reached);
    assert!(!result.size_limit_reached);
}

#[test]
fn test_size_limit_hit_on_third_member() {
    let data = create_test_tar(vec![
        ("a.txt", &[b'a'; 400]),
        ("b.txt", &[b'b'; 400]),
        ("c.txt", &[b'c'; 400]),
    ]);
    let config = ExtractionConfig::default().with_max_total_size(1000);
    let result = extract_text(data, &config).unwrap();

    assert_eq!(result.paths().collect::<Vec<_>>(), ["a.txt", "b.txt"]);
    assert_eq!(result.get("c.txt"), None);
    assert!(result.size_limit_reached);
    assert_eq!(result.total_chars, 800);
}

#[test]
fn test_excluded_path_never_extracted_or_counted() {
    let data = create_test_zip(four_text_members());
    let config = ExtractionConfig::default().with_excluded_path("repo-main/setup.py");
    let result = extract_text(data, &config).unwrap();

    assert_eq!(result.get("repo-main/setup.py"), None);
    assert!(result.skipped.iter().all(|s| s.path != "repo-main/setup.py"));
    assert_eq!(result.len(), 3);
    assert_eq!(result.total_member_count, 3);
}

#[test]
fn test_excluded_path_after_file_limit_stays_counted() {
    let data = create_test_zip(vec![
        ("a", b"a"),
        ("b", b"b"),
        ("excluded", b"x"),
        ("c", b"c"),
    ]);
    let config = ExtractionConfig::default()
        .with_max_files(1)
        .with_excluded_path("excluded");
    let result = extract_text(data, &config).unwrap();

    // The scan stops at "b", before it ever reaches "excluded".
    assert_eq!(result.len(), 1);
    assert!(result.file_limit_reached);
    assert_eq!(result.total_member_count, 4);
}

#[test]
fn test_mixed_archive_skips_are_reported() {
    let data = ZipTestBuilder::new()
        .add_directory("pkg/")
        .add_file("pkg/__init__.py", b"")
        .add_deflated_file("pkg/core.py", b"def run():\n    return 42\n")
        .add_file("pkg/data.bin", b"\x00\x01\x02\x03")
        .add_file("pkg/CORRUPT.txt", b"THIS-WILL-FAIL-CRC")
        .build();
    let data = corrupt_first(data, b"THIS-WILL-FAIL-CRC");
    let result = extract_text(data, &ExtractionConfig::default()).unwrap();

    assert_eq!(result.paths().collect::<Vec<_>>(), ["pkg/core.py"]);
    assert_eq!(result.total_member_count, 5);

    let reasons: Vec<_> = result
        .skipped
        .iter()
        .map(|s| (s.path.as_str(), s.reason.clone()))
        .collect();
    assert_eq!(reasons[0], ("pkg/", SkipReason::Directory));
    assert_eq!(reasons[1], ("pkg/__init__.py", SkipReason::Binary));
    assert_eq!(reasons[2], ("pkg/data.bin", SkipReason::Binary));
    assert!(matches!(reasons[3], ("pkg/CORRUPT.txt", SkipReason::Unreadable(_))));
}

#[test]
fn test_declared_encodings_are_honoured() {
    let (shift_jis, _, _) = encoding_rs::SHIFT_JIS.encode("# coding: shift_jis\nprint('こんにちは')\n");
    let (gbk, _, _) = encoding_rs::GBK.encode("<?xml version=\"1.0\" encoding=\"GBK\"?>\n<p>你好</p>\n");
    let (cp1251, _, _) =
        encoding_rs::WINDOWS_1251.encode("<html><meta charset=\"windows-1251\"><p>Привет</p></html>");

    let data = create_test_zip(vec![
        ("hello.py", &*shift_jis),
        ("hello.xml", &*gbk),
        ("hello.html", &*cp1251),
    ]);
    let result = extract_text(data, &ExtractionConfig::default()).unwrap();

    assert_eq!(
        result.get("hello.py"),
        Some("# coding: shift_jis\nprint('こんにちは')\n")
    );
    assert_eq!(
        result.get("hello.xml"),
        Some("<?xml version=\"1.0\" encoding=\"GBK\"?>\n<p>你好</p>\n")
    );
    assert_eq!(
        result.get("hello.html"),
        Some("<html><meta charset=\"windows-1251\"><p>Привет</p></html>")
    );
    let encodings: Vec<_> = result.files.iter().map(|f| f.encoding).collect();
    assert_eq!(encodings, ["Shift_JIS", "GBK", "windows-1251"]);
}

#[test]
fn test_each_dialect_round_trips() {
    let samples = [
        ("# -*- coding: NAME -*-\nx = 1\n", Dialect::Python),
        ("<?xml version=\"1.0\" encoding=\"NAME\"?>\n<root/>\n", Dialect::Xml),
        ("<html><head><meta charset=\"NAME\"></head></html>\n", Dialect::Html),
        ("use encoding \"NAME\";\nprint 1;\n", Dialect::Perl),
        ("@charset \"NAME\";\nbody { margin: 0; }\n", Dialect::Css),
        ("% !TEX encoding = NAME\n\\begin{document}\n", Dialect::Latex),
    ];

    for (template, dialect) in samples {
        for name in ["utf-8", "koi8-r", "windows-1252", "EUC-JP"] {
            let text = template.replace("NAME", name);
            let codec = encoding_rs::Encoding::for_label(name.as_bytes()).unwrap();
            let (bytes, _, _) = codec.encode(&text);
            let guess = resolve(&bytes);
            assert_eq!(guess.encoding_name.as_deref(), Some(name), "{template}");
            assert_eq!(guess.dialect, Some(dialect), "{template}");
        }
    }
}

#[test]
fn test_unknown_declared_encoding_falls_back_to_utf8() {
    let data = create_test_zip(vec![("a.py", "# coding: klingon\nnom = 'ñ'\n".as_bytes())]);
    let result = extract_text(data, &ExtractionConfig::default()).unwrap();

    assert_eq!(result.get("a.py"), Some("# coding: klingon\nnom = 'ñ'\n"));
    assert_eq!(result.files[0].encoding, "UTF-8");
}

#[test]
fn test_inflate_limit_is_structural() {
    let data = create_test_tar_gz(vec![("big.txt", &[b'a'; 100_000])]);
    let config = ExtractionConfig::default().with_max_inflated_size(10_000);
    let err = extract_text(data, &config).unwrap_err();

    assert!(err.is_structural());
    assert!(err.quota_resource().is_some());
}

#[test]
fn test_malformed_archives_fail_before_extraction() {
    for data in [
        b"PK\x03\x04garbage that is not a zip".to_vec(),
        b"\x1f\x8b\x08\x00 broken gzip".to_vec(),
        Vec::new(),
    ] {
        let err = extract_text(data, &ExtractionConfig::default()).unwrap_err();
        assert!(err.is_structural(), "{err}");
    }
}

#[test]
fn test_render_markdown_and_json() {
    let data = create_test_zip(vec![("a.md", b"```\ncode\n```\n"), ("b.txt", b"plain")]);
    let result = extract_text(data, &ExtractionConfig::default()).unwrap();

    let markdown = result.render("demo", &MarkdownTemplate).unwrap();
    assert_eq!(
        markdown,
        "# demo\n\n## a.md\n\n````\n```\ncode\n```\n````\n\n## b.txt\n\n```\nplain\n```\n"
    );

    let json = result.render("demo", &JsonTemplate).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["repo_name"], "demo");
    assert_eq!(value["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_inspect_matches_extraction_decisions() {
    let data = TarTestBuilder::new()
        .add_file("ok.txt", b"fine")
        .add_file("img.bin", b"\x00\x00")
        .add_symlink("link", "ok.txt")
        .build_gz();
    let config = ExtractionConfig::default();
    let mut source = open_archive(data, &config).unwrap();

    let report = inspect_archive(source.as_mut(), &config);
    assert_eq!(report.len(), 3);
    assert!(report[0].verdict.is_text());
    assert_eq!(report[1].verdict, Verdict::Binary);
    // Links carry no data, and empty members are binary.
    assert_eq!(report[2].verdict, Verdict::Binary);
}

#[test]
fn test_extract_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload");
    std::fs::write(&path, create_test_zip(four_text_members())).unwrap();

    let result = extract_text_from_path(&path, &ExtractionConfig::default()).unwrap();
    assert_eq!(result.len(), 4);
}

#[test]
fn test_invalid_config_is_rejected() {
    let data = create_test_zip(four_text_members());
    let config = ExtractionConfig::default().with_max_member_size(0);
    assert!(matches!(
        extract_text(data, &config),
        Err(ExtractionError::InvalidConfig { .. })
    ));
}
