//! Exercises `MemFs` the way a generated builder function does: constants
//! borrowed as file data, parents resolved by `lookup`, then sealed.

use embedfs_memfs::{MemFs, MemFsError, ModTime};
use std::io::Read;

const EMBED_612E747874: &[u8] = b"\x68\x69";
const EMBED_7375622F622E62696E: &[u8] = b"\x00\xff";
const EMBED_726F6F742E6D64: &[u8] = b"";

fn embed_fs() -> Result<MemFs, MemFsError> {
    let mut fs = MemFs::new();
    fs.add_file(fs.lookup(""), "a.txt", 2, ModTime::new(1_700_000_000, 0), EMBED_612E747874)?;
    fs.add_file(fs.lookup(""), "root.md", 0, ModTime::ZERO, EMBED_726F6F742E6D64)?;
    fs.add_dir(fs.lookup(""), "sub", ModTime::new(1_700_000_100, 500))?;
    fs.add_file(
        fs.lookup("sub"),
        "sub/b.bin",
        2,
        ModTime::new(1_700_000_200, 0),
        EMBED_7375622F622E62696E,
    )?;
    fs.seal();
    Ok(fs)
}

#[test]
fn test_builder_produces_expected_tree() {
    let fs = embed_fs().unwrap();

    assert!(fs.is_sealed());
    assert_eq!(fs.file_count(), 3);
    assert_eq!(fs.dir_count(), 2);

    let walked: Vec<_> = fs.walk().map(|node| node.path().to_string()).collect();
    assert_eq!(walked, ["", "a.txt", "root.md", "sub", "sub/b.bin"]);
}

#[test]
fn test_contents_and_metadata() {
    let fs = embed_fs().unwrap();

    assert_eq!(fs.read("a.txt").unwrap(), b"hi");
    assert_eq!(fs.read("sub/b.bin").unwrap(), [0x00, 0xff]);
    assert!(fs.read("root.md").unwrap().is_empty());

    let sub = fs.get("sub").unwrap();
    assert!(sub.is_dir());
    assert_eq!(sub.size(), 0);
    assert_eq!(sub.mod_time(), ModTime::new(1_700_000_100, 500));

    let mut text = String::new();
    fs.open("a.txt").unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, "hi");
}

#[test]
fn test_parent_back_references() {
    let fs = embed_fs().unwrap();

    let file = fs.get("sub/b.bin").unwrap();
    let parent = fs.parent(file).unwrap();
    assert_eq!(parent.path(), "sub");
    assert_eq!(fs.parent(parent).unwrap().path(), "");
    assert!(fs.parent(fs.get("").unwrap()).is_none());
}

#[test]
fn test_read_dir_sorted() {
    let fs = embed_fs().unwrap();

    let names: Vec<_> = fs.read_dir("").unwrap().iter().map(|n| n.name()).collect();
    assert_eq!(names, ["a.txt", "root.md", "sub"]);

    assert!(matches!(
        fs.read_dir("a.txt"),
        Err(MemFsError::NotADirectory { .. })
    ));
    assert!(fs.read_dir("nope").unwrap_err().is_not_found());
}

#[test]
fn test_sealed_rejects_insertions() {
    let mut fs = embed_fs().unwrap();

    let err = fs
        .add_file(fs.lookup("sub"), "sub/c.txt", 0, ModTime::ZERO, &b""[..])
        .unwrap_err();
    assert!(err.is_sealed());
    assert!(fs.add_dir(None, "late", ModTime::ZERO).unwrap_err().is_sealed());
    assert!(fs.get_or_create_dir("new/dir").unwrap_err().is_sealed());

    // Existing directories are still resolvable.
    assert!(fs.get_or_create_dir("sub").is_ok());
    fs.seal();
    assert!(fs.is_sealed());
}

#[test]
fn test_implicit_ancestors() {
    let mut fs = MemFs::new();
    fs.add_file(None, "a/b/c.txt", 1, ModTime::ZERO, &b"c"[..])
        .unwrap();

    let a = fs.get("a").unwrap();
    assert!(a.is_dir());
    assert!(a.mod_time().is_zero());
    assert!(fs.get("a/b").unwrap().is_dir());
    assert_eq!(fs.len(), 4);
}

#[test]
fn test_conflicting_insertions() {
    let mut fs = MemFs::new();
    fs.add_file(None, "x", 1, ModTime::ZERO, &b"x"[..]).unwrap();

    assert!(matches!(
        fs.add_file(None, "x", 1, ModTime::ZERO, &b"y"[..]),
        Err(MemFsError::AlreadyExists { .. })
    ));
    assert!(matches!(
        fs.add_file(None, "x/y", 1, ModTime::ZERO, &b"y"[..]),
        Err(MemFsError::NotADirectory { .. })
    ));
    assert!(matches!(
        fs.add_file(None, "z", 5, ModTime::ZERO, &b"y"[..]),
        Err(MemFsError::SizeMismatch { .. })
    ));
    assert!(matches!(
        fs.add_dir(fs.lookup("x"), "other/dir", ModTime::ZERO),
        Err(MemFsError::ParentMismatch { .. } | MemFsError::NotADirectory { .. })
    ));
}
