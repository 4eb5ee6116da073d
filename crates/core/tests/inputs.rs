use std::fs;
use std::path::PathBuf;

use chdgui_core::inputs::{collect_directory, has_extension, InputList};
use chdgui_core::Error;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|e| e.to_string()).collect()
}

#[test]
fn add_files_skips_duplicates_and_keeps_order() {
    let mut list = InputList::new();
    assert_eq!(list.add_files(["b.cue", "a.cue"]), 2);
    assert_eq!(list.add_files(["a.cue", "c.cue"]), 1);
    assert_eq!(
        list.paths(),
        &[
            PathBuf::from("b.cue"),
            PathBuf::from("a.cue"),
            PathBuf::from("c.cue")
        ]
    );
}

#[test]
fn remove_drops_selected_indices() {
    let mut list = InputList::new();
    list.add_files(["a", "b", "c", "d"]);
    list.remove(&[1, 3, 42]);
    assert_eq!(list.paths(), &[PathBuf::from("a"), PathBuf::from("c")]);
    list.clear();
    assert!(list.is_empty());
}

#[test]
fn directory_scan_is_recursive_and_filters_by_extension() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("disc2");
    fs::create_dir_all(&nested).unwrap();
    fs::write(temp.path().join("game.cue"), "").unwrap();
    fs::write(temp.path().join("game.bin"), "").unwrap();
    fs::write(nested.join("other.CUE"), "").unwrap();
    fs::write(nested.join("notes.txt"), "").unwrap();

    let mut list = InputList::new();
    let added = list.add_directory(temp.path(), &exts(&["cue"])).unwrap();
    assert_eq!(added, 2);
    assert_eq!(
        list.paths(),
        &[nested.join("other.CUE"), temp.path().join("game.cue")]
    );

    // Re-adding the same directory changes nothing.
    assert_eq!(list.add_directory(temp.path(), &exts(&["cue"])).unwrap(), 0);
}

#[test]
fn directory_scan_rejects_missing_directory() {
    let temp = TempDir::new().unwrap();
    let err = collect_directory(&temp.path().join("nope"), &exts(&["cue"])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn extension_match_is_case_insensitive() {
    let wanted = exts(&["chd"]);
    assert!(has_extension(&PathBuf::from("x.CHD"), &wanted));
    assert!(!has_extension(&PathBuf::from("x.chd.bak"), &wanted));
    assert!(!has_extension(&PathBuf::from("chd"), &wanted));
}
