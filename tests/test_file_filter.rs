use gitsummarize::filter::{is_allowed_path, FileFilter};
use gitsummarize::github::TreeEntry;

fn file(path: &str, size: u64) -> TreeEntry {
    TreeEntry::file(path, size, "https://api.example/blob")
}

#[test]
fn default_ceiling_is_exclusive_at_fifty_kib() {
    let filter = FileFilter::default();
    assert_eq!(filter.max_file_size, 51200);
    assert!(!filter.accepts(&file("src/main.rs", 51200)));
    assert!(filter.accepts(&file("src/main.rs", 51199)));
}

#[test]
fn excluded_suffix_is_rejected_regardless_of_size() {
    let filter = FileFilter::default();
    assert!(!filter.accepts(&file("assets/logo.png", 10)));
    assert!(!filter.accepts(&file("target/libfoo.so", 1)));
}

#[test]
fn allowed_file_within_ceiling_is_included() {
    let filter = FileFilter::default();
    assert!(filter.accepts(&file("README.md", 1200)));
    assert!(filter.accepts(&file("src/lib.rs", 0)));
}

#[test]
fn exact_file_names_are_allowed_anywhere() {
    for path in [
        "Dockerfile",
        "build/Dockerfile",
        "Cargo.lock",
        "cmake/CMakeLists.txt",
        ".gitignore",
    ] {
        assert!(is_allowed_path(path), "{path}");
    }
    assert!(!is_allowed_path("Dockerfile.bak"));
}

#[test]
fn matching_is_case_sensitive() {
    assert!(is_allowed_path("main.py"));
    assert!(!is_allowed_path("MAIN.PY"));
}

#[test]
fn directories_and_unsized_entries_are_rejected() {
    let filter = FileFilter::default();
    assert!(!filter.accepts(&TreeEntry::directory("src.rs")));

    let mut unsized_entry = file("src/lib.rs", 10);
    unsized_entry.size = None;
    assert!(!filter.accepts(&unsized_entry));
}

#[test]
fn custom_ceiling_applies_to_archive_members() {
    let filter = FileFilter::new(100);
    assert!(filter.accepts_member("docs/guide.md", 99));
    assert!(!filter.accepts_member("docs/guide.md", 100));
    assert!(!filter.accepts_member("docs/diagram.png", 10));
}
