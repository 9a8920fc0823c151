use std::fs;
use std::path::{Path, PathBuf};

use super::source_loader::{LoadError, collect_cs_files, load_sources};

fn touch(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn directories_are_walked_in_sorted_order() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_path_buf();
    touch(&dir.join("b.cs"), "class B { }");
    touch(&dir.join("a.cs"), "class A { }");
    touch(&dir.join("nested/c.cs"), "class C { }");
    touch(&dir.join("notes.txt"), "not C#");
    touch(&dir.join("obj/Generated.cs"), "class Skipped { }");
    touch(&dir.join("bin/Debug/Skipped.cs"), "class Skipped { }");

    let files: Vec<_> = collect_cs_files(&dir)
        .unwrap()
        .into_iter()
        .map(|p| p.strip_prefix(&dir).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        [
            PathBuf::from("a.cs"),
            PathBuf::from("b.cs"),
            PathBuf::from("nested").join("c.cs"),
        ]
    );

    let map = load_sources(&[dir.clone()]).unwrap();
    assert_eq!(map.len(), 3);
    let contents: Vec<_> = map.iter().map(|s| s.as_str().to_string()).collect();
    assert_eq!(contents, ["class A { }", "class B { }", "class C { }"]);
}

#[test]
fn files_keep_their_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_path_buf();
    let file = dir.join("Schema.cs");
    touch(&file, "class Schema { }");

    let map = load_sources(std::slice::from_ref(&file)).unwrap();
    let source = map.iter().next().unwrap();
    assert_eq!(source.kind.display_name(), file.to_string_lossy());
}

#[test]
fn directory_without_sources_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_path_buf();
    touch(&dir.join("README.md"), "# nothing");

    let err = load_sources(&[dir.clone()]).unwrap_err();
    assert!(matches!(err, LoadError::NoSources(_)));
}

#[test]
fn missing_file_reports_its_path() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_path_buf();
    let missing = dir.join("Missing.cs");

    let err = load_sources(&[missing]).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().contains("Missing.cs"));
}

#[cfg(unix)]
#[test]
fn symlink_cycles_are_not_followed() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    touch(&dir.join("nested/Query.cs"), "class Query { }");
    std::os::unix::fs::symlink(dir, dir.join("nested/loop")).unwrap();

    let files = collect_cs_files(dir).unwrap();
    assert_eq!(files, [dir.join("nested").join("Query.cs")]);
}
