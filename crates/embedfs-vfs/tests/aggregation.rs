//! Integration tests for mounting mixed sources.
//!
//! Fixture trees are built in temporary directories, including zip and tar
//! archives written on the fly.

use embedfs_vfs::{EntryKind, PathMatcher, Vfs};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, bytes) in members {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

fn write_tar(path: &Path, members: &[(&str, &[u8])]) {
    let mut builder = tar::Builder::new(File::create(path).unwrap());
    for (name, bytes) in members {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(bytes.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(1_600_000_000);
        builder.append_data(&mut header, name, *bytes).unwrap();
    }
    builder.into_inner().unwrap();
}

fn project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("site");
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("index.html"), "<html></html>").unwrap();
    write_zip(
        &root.join("lib").join("theme.jar"),
        &[("css/site.css", b"body{}"), ("js/app.js", b"go()")],
    );
    write_tar(&root.join("lib").join("data.tar"), &[("rows.csv", b"1,2\n")]);
    (dir, root)
}

#[test]
fn test_zip_source_flattens_at_root() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("bundle.zip");
    write_zip(&archive, &[("a/b/c.txt", b"abc"), ("top.txt", b"t")]);

    let mut vfs = Vfs::new();
    vfs.add_source(&archive, false).unwrap();

    assert_eq!(
        vfs.list_matches(None, None, false).unwrap(),
        ["a", "a/b", "a/b/c.txt", "top.txt"]
    );
    let synthesized = vfs.find("a/b").unwrap();
    assert!(synthesized.is_synthetic());
    assert!(synthesized.mod_time().is_zero());

    let entry = vfs.find("a/b/c.txt").unwrap();
    assert_eq!(vfs.read_to_vec(entry).unwrap(), b"abc");
}

#[test]
fn test_tar_source_flattens_at_root() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("rows.tar");
    write_tar(&archive, &[("x/y.csv", b"y"), ("z.csv", b"zz")]);

    let mut vfs = Vfs::new();
    vfs.add_source(&archive, false).unwrap();

    assert_eq!(
        vfs.list_matches(None, None, false).unwrap(),
        ["x", "x/y.csv", "z.csv"]
    );
    let entry = vfs.find("z.csv").unwrap();
    assert_eq!(entry.mod_time().secs(), 1_600_000_000);
    assert_eq!(vfs.read_to_vec(entry).unwrap(), b"zz");
}

#[test]
fn test_nested_archives_stay_files_without_recursion() {
    let (_dir, root) = project();

    let mut vfs = Vfs::new();
    vfs.add_source(&root, false).unwrap();

    assert_eq!(
        vfs.list_matches(None, None, false).unwrap(),
        ["index.html", "lib", "lib/data.tar", "lib/theme.jar"]
    );
    assert_eq!(vfs.find("lib/theme.jar").unwrap().kind(), EntryKind::File);
}

#[test]
fn test_nested_archives_expand_with_recursion() {
    let (_dir, root) = project();

    let mut vfs = Vfs::new();
    vfs.add_source(&root, true).unwrap();

    assert_eq!(
        vfs.list_matches(None, None, false).unwrap(),
        [
            "index.html",
            "lib",
            "lib/data.tar",
            "lib/data.tar/rows.csv",
            "lib/theme.jar",
            "lib/theme.jar/css",
            "lib/theme.jar/css/site.css",
            "lib/theme.jar/js",
            "lib/theme.jar/js/app.js",
        ]
    );

    let jar = vfs.find("lib/theme.jar").unwrap();
    assert!(jar.is_dir());
    assert!(!jar.is_synthetic());

    let css = vfs.find("lib/theme.jar/css/site.css").unwrap();
    assert_eq!(vfs.read_to_vec(css).unwrap(), b"body{}");

    let rows = vfs.find("lib/data.tar/rows.csv").unwrap();
    assert_eq!(vfs.read_to_vec(rows).unwrap(), b"1,2\n");
}

#[test]
fn test_directories_only_listing() {
    let (_dir, root) = project();

    let mut vfs = Vfs::new();
    vfs.add_source(&root, true).unwrap();

    let matcher = PathMatcher::new(Some("theme"), None).unwrap();
    assert_eq!(
        vfs.matches(&matcher, true),
        ["lib/theme.jar", "lib/theme.jar/css", "lib/theme.jar/js"]
    );
}

#[test]
fn test_mixed_sources_merge_into_one_tree() {
    let (dir, root) = project();
    let extra = dir.path().join("extra.zip");
    write_zip(&extra, &[("index.html", b"shadowed"), ("robots.txt", b"")]);

    let mut vfs = Vfs::new();
    vfs.add_sources(false, [root.as_path(), extra.as_path()])
        .unwrap();

    let index = vfs.find("index.html").unwrap();
    assert_eq!(vfs.read_to_vec(index).unwrap(), b"<html></html>");

    let robots = vfs.find("robots.txt").unwrap();
    assert_eq!(robots.size(), 0);
    assert_eq!(robots.source().index(), 1);
}
