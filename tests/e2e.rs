//! End-to-end tests for md2pdf-merge.
//!
//! Each test builds a throwaway directory tree with `tempfile`, runs the
//! public API over it, and reads the generated PDF back with `lopdf` to
//! count its pages.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use md2pdf_merge::{
    merge, merge_to_file, FileError, MergeConfig, MergeError, MergeStats, PageSize,
};
use std::fs;
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let p = root.join(rel);
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&p, content).unwrap();
    p
}

fn pdf_page_count(path: &Path) -> usize {
    let doc = lopdf::Document::load(path)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    doc.get_pages().len()
}

/// Assert the stats are internally consistent.
fn assert_stats_consistent(stats: &MergeStats) {
    assert_eq!(stats.files.len(), stats.discovered_files);
    assert_eq!(stats.merged_files + stats.failed_files, stats.discovered_files);
    assert_eq!(stats.errors().count(), stats.failed_files);
    let page_sum: usize = stats.files.iter().map(|f| f.page_count).sum();
    assert_eq!(page_sum, stats.total_pages);
}

/// A small docs tree: three Markdown files at different depths plus noise.
fn docs_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "index.md", "# Welcome\n\nStart here.\n");
    write(root, "guide/install.md", "## Install\n\n```sh\ncargo install md2pdf\n```\n");
    write(root, "guide/usage/cli.md", "- `--input`\n- `--output`\n");
    write(root, "guide/notes.txt", "not markdown");
    write(root, "guide/README.MD", "wrong case");
    write(root, ".hidden.json", "{}");
    dir
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn merges_tree_into_one_page_per_file() {
    let docs = docs_tree();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("merged.pdf");

    let stats = merge_to_file(docs.path(), &out, &MergeConfig::default()).unwrap();

    assert_stats_consistent(&stats);
    assert_eq!(stats.discovered_files, 3);
    assert_eq!(stats.merged_files, 3);
    assert_eq!(stats.total_pages, 3);
    assert_eq!(pdf_page_count(&out), 3);
}

#[test]
fn page_order_follows_discovery_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.md", "second");
    write(dir.path(), "a.md", "first");
    write(dir.path(), "a/z.md", "nested, after a.md");

    let doc = merge(dir.path(), &MergeConfig::default()).unwrap();
    let order: Vec<_> = doc
        .stats
        .files
        .iter()
        .map(|f| (f.path.strip_prefix(dir.path()).unwrap().to_path_buf(), f.start_page))
        .collect();

    assert_eq!(
        order,
        vec![
            (PathBuf::from("a/z.md"), Some(1)),
            (PathBuf::from("a.md"), Some(2)),
            (PathBuf::from("b.md"), Some(3)),
        ]
    );
}

#[test]
fn empty_tree_still_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "no markdown here");
    let out = dir.path().join("empty.pdf");

    let stats = merge_to_file(dir.path(), &out, &MergeConfig::default()).unwrap();

    assert_eq!(stats.discovered_files, 0);
    assert_eq!(stats.total_pages, 0);
    assert!(out.exists());
    assert_eq!(pdf_page_count(&out), 0);
}

#[test]
fn long_file_overflows_onto_continuation_pages() {
    let dir = tempfile::tempdir().unwrap();
    let paragraph = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(12);
    let long: String = (0..40).map(|i| format!("{i}. {paragraph}\n\n")).collect();
    write(dir.path(), "a.md", &long);
    write(dir.path(), "b.md", "short");
    let out = dir.path().join("out.pdf");

    let stats = merge_to_file(dir.path(), &out, &MergeConfig::default()).unwrap();

    assert_stats_consistent(&stats);
    assert_eq!(stats.merged_files, 2);
    assert!(stats.files[0].page_count > 1);
    assert_eq!(stats.files[1].start_page, Some(stats.files[0].page_count + 1));
    assert_eq!(pdf_page_count(&out), stats.total_pages);
}

#[test]
fn page_size_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "letter-sized");
    let out = dir.path().join("letter.pdf");
    let config = MergeConfig::builder()
        .page_size(PageSize::Letter)
        .build()
        .unwrap();

    merge_to_file(dir.path(), &out, &config).unwrap();

    let doc = lopdf::Document::load(&out).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = match media_box[2] {
        lopdf::Object::Integer(i) => i as f32,
        lopdf::Object::Real(r) => r as f32,
        ref other => panic!("unexpected MediaBox entry: {other:?}"),
    };
    // 8.5 in = 612 pt
    assert!((width - 612.0).abs() < 1.0, "width = {width}");
}

#[test]
fn missing_output_directory_is_fatal() {
    let docs = docs_tree();
    let out = docs.path().join("no-such-dir/out.pdf");

    let err = merge_to_file(docs.path(), &out, &MergeConfig::default()).unwrap_err();

    match err {
        MergeError::OutputWriteFailed { path, .. } => assert_eq!(path, out),
        other => panic!("expected OutputWriteFailed, got {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn missing_input_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.pdf");

    let err = merge_to_file(dir.path().join("absent"), &out, &MergeConfig::default())
        .unwrap_err();

    assert!(matches!(err, MergeError::Traversal { .. }), "got {err:?}");
    assert!(!out.exists(), "nothing may be written when discovery fails");
}

#[cfg(unix)]
#[test]
fn unreadable_files_are_skipped() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "1.md", "one");
    write(root, "sub/2.md", "two");
    write(root, "sub/3.md", "three");
    // Dangling symlinks are discovered but cannot be read.
    symlink(root.join("missing-a"), root.join("broken-a.md")).unwrap();
    symlink(root.join("missing-b"), root.join("sub/broken-b.md")).unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("out.pdf");

    let stats = merge_to_file(root, &out, &MergeConfig::default()).unwrap();

    assert_stats_consistent(&stats);
    assert_eq!(stats.discovered_files, 5);
    assert_eq!(stats.merged_files, 3);
    assert_eq!(stats.failed_files, 2);
    assert!(stats
        .errors()
        .all(|e| matches!(e, FileError::NotFound { .. })));
    assert_eq!(pdf_page_count(&out), 3);
}

#[cfg(unix)]
#[test]
fn permission_denied_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "readable");
    let locked = write(dir.path(), "b.md", "locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read(&locked).is_ok() {
        println!("SKIP — file permissions are not enforced for this user");
        return;
    }

    let doc = merge(dir.path(), &MergeConfig::default()).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(doc.stats.merged_files, 1);
    assert!(matches!(
        doc.stats.files[1].error,
        Some(FileError::PermissionDenied { .. })
    ));
    assert_eq!(doc.stats.total_pages, 1);
}

#[test]
fn in_memory_bytes_parse_as_pdf() {
    let docs = docs_tree();
    let doc = merge(docs.path(), &MergeConfig::default()).unwrap();
    let expected = doc.stats.total_pages;

    let bytes = doc.into_bytes().unwrap();

    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), expected);
}
