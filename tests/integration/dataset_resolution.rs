//! Dataset resolution against a canned catalog.

use super::test_utils::CannedQuery;
use anagen::filelist::FileList;
use anagen::resolver::{DatasetResolver, Redirector, GLOBAL_REDIRECTOR};
use tempfile::TempDir;

#[test]
fn test_two_files_are_prefixed_and_written() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("file_list.txt");
    let resolver = DatasetResolver::new(
        CannedQuery("/store/a.root\n/store/b.root\n"),
        Redirector::Global,
    );

    let resolution = resolver
        .resolve_to_file("/TTToSemiLeptonic/Run3/NANOAODSIM", &output)
        .unwrap();

    assert_eq!(resolution.files.len(), 2);
    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("{}/store/a.root", GLOBAL_REDIRECTOR),
            format!("{}/store/b.root", GLOBAL_REDIRECTOR),
        ]
    );
    assert_eq!(FileList::read(&output).unwrap(), resolution.files);
}

#[test]
fn test_whitespace_separated_tokens_each_become_an_entry() {
    let resolver = DatasetResolver::new(
        CannedQuery("/store/a.root /store/b.root\t/store/c.root\n\n"),
        Redirector::Custom("root://eoscms.cern.ch/".to_string()),
    );
    let resolution = resolver.resolve("/X/Y/NANOAOD").unwrap();
    assert_eq!(resolution.files.len(), 3);
    assert!(resolution
        .files
        .iter()
        .all(|entry| entry.starts_with("root://eoscms.cern.ch//store/")));
}

#[test]
fn test_empty_result_overwrites_previous_list() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("file_list.txt");
    std::fs::write(&output, "stale entry\n").unwrap();

    let resolver = DatasetResolver::new(CannedQuery(""), Redirector::Global);
    let resolution = resolver.resolve_to_file("/Empty/Set/NANOAOD", &output).unwrap();

    assert!(resolution.diagnostic.is_some());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}
