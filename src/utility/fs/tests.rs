// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_dir_contents_async, copy_file_async, copy_files_with_extensions_async};
use super::remove::{clear_vcs_readonly, remove_dir_all_forced};
use super::walk::{WalkOptions, find_vcs_files, parallel_walk};
use super::write::write_atomic;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();
    names.sort();
    names
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, path.display().to_string()).unwrap();
}

#[test]
fn test_parallel_walk() {
    let temp = temp_dir();
    touch(&temp.path().join("file1.txt"));
    touch(&temp.path().join("subdir/file2.txt"));

    let result = parallel_walk(temp.path(), &WalkOptions::default()).unwrap();

    assert_eq!(file_names(result.files()), ["file1.txt", "file2.txt"]);
    // root + subdir
    assert_eq!(result.directories().len(), 2);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_parallel_walk_hidden_and_depth() {
    let temp = temp_dir();
    touch(&temp.path().join(".hidden/inner.txt"));
    touch(&temp.path().join("a/b/deep.txt"));
    touch(&temp.path().join("top.txt"));

    let default = parallel_walk(temp.path(), &WalkOptions::default()).unwrap();
    assert_eq!(file_names(default.files()), ["deep.txt", "top.txt"]);

    let everything = parallel_walk(temp.path(), &WalkOptions::everything()).unwrap();
    assert_eq!(
        file_names(everything.files()),
        ["deep.txt", "inner.txt", "top.txt"]
    );

    let shallow = WalkOptions::builder().with_max_depth(1).build();
    let shallow = parallel_walk(temp.path(), &shallow).unwrap();
    assert_eq!(file_names(shallow.files()), ["top.txt"]);
}

#[test]
fn test_parallel_walk_many_files() {
    let temp = temp_dir();
    for i in 0..1500 {
        std::fs::write(temp.path().join(format!("f{i}.txt")), "").unwrap();
    }

    let result = parallel_walk(temp.path(), &WalkOptions::default()).unwrap();
    assert_eq!(result.files().len(), 1500);
}

#[test]
fn test_parallel_walk_missing_root() {
    let temp = temp_dir();
    assert!(parallel_walk(temp.path().join("missing"), &WalkOptions::default()).is_err());
}

#[test]
fn test_find_vcs_files() {
    let temp = temp_dir();
    touch(&temp.path().join("bgfx/.git/objects/ab/cdef"));
    touch(&temp.path().join("bgfx/.git/HEAD"));
    touch(&temp.path().join("bgfx/src/bgfx.cpp"));
    touch(&temp.path().join("bgfx/.gitignore"));

    let files = find_vcs_files(temp.path()).unwrap();
    assert_eq!(file_names(&files), ["HEAD", "cdef"]);
}

#[cfg(unix)]
#[test]
fn test_clear_vcs_readonly() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let object = temp.path().join("stb/.git/objects/pack/pack-1.idx");
    let source = temp.path().join("stb/stb_image.h");
    touch(&object);
    touch(&source);
    for path in [&object, &source] {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o444)).unwrap();
    }

    assert_eq!(clear_vcs_readonly(temp.path()).unwrap(), 1);

    let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&object), 0o644);
    assert_eq!(mode(&source), 0o444);
}

#[tokio::test]
async fn test_remove_dir_all_forced() {
    let temp = temp_dir();
    let tree = temp.path().join("tmp");
    touch(&tree.join("glew/.git/objects/00/11"));
    touch(&tree.join("glew/include/GL/glew.h"));

    remove_dir_all_forced(&tree).await.unwrap();
    assert!(!tree.exists());

    // already gone
    remove_dir_all_forced(&tree).await.unwrap();
}

#[tokio::test]
async fn test_copy_dir_contents() {
    let temp = temp_dir();
    let src = temp.path().join("src");
    touch(&src.join("SDL2/SDL.h"));
    touch(&src.join("SDL2/nested/SDL_config.h"));

    let dst = temp.path().join("dst");
    copy_dir_contents_async(&src.join("SDL2"), &dst.join("SDL2"))
        .await
        .unwrap();

    assert!(dst.join("SDL2/SDL.h").is_file());
    assert!(dst.join("SDL2/nested/SDL_config.h").is_file());
}

#[tokio::test]
async fn test_copy_files_with_extensions() {
    let temp = temp_dir();
    let src = temp.path().join("stb");
    touch(&src.join("stb_image.h"));
    touch(&src.join("stb_ds.inl"));
    touch(&src.join("README.md"));
    touch(&src.join("tests/test.h"));

    let dst = temp.path().join("include");
    let copied = copy_files_with_extensions_async(&src, &dst, &["h", "inl"])
        .await
        .unwrap();

    assert_eq!(copied, 2);
    assert!(dst.join("stb_image.h").is_file());
    assert!(dst.join("stb_ds.inl").is_file());
    assert!(!dst.join("README.md").exists());
    assert!(!dst.join("tests").exists());
}

#[tokio::test]
async fn test_copy_file_missing_source() {
    let temp = temp_dir();
    let err = copy_file_async(&temp.path().join("nope.so"), &temp.path().join("out"), true)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("nope.so"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_copy_file_symlink_modes() {
    let temp = temp_dir();
    let real = temp.path().join("libcglm.so.0.9.4");
    std::fs::write(&real, b"ELF").unwrap();
    let link = temp.path().join("libcglm.so.0");
    std::os::unix::fs::symlink("libcglm.so.0.9.4", &link).unwrap();

    let bin = temp.path().join("bin");
    copy_file_async(&link, &bin.join("followed"), true).await.unwrap();
    copy_file_async(&link, &bin.join("kept"), false).await.unwrap();

    let followed = std::fs::symlink_metadata(bin.join("followed")).unwrap();
    assert!(followed.is_file());
    assert_eq!(std::fs::read(bin.join("followed")).unwrap(), b"ELF");

    let kept = std::fs::symlink_metadata(bin.join("kept")).unwrap();
    assert!(kept.file_type().is_symlink());
    assert_eq!(
        std::fs::read_link(bin.join("kept")).unwrap(),
        Path::new("libcglm.so.0.9.4")
    );

    // replacing an existing link works
    copy_file_async(&link, &bin.join("kept"), false).await.unwrap();
}

#[test]
fn test_write_atomic() {
    let temp = temp_dir();
    let path = temp.path().join("gen/exports.c");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    let leftovers = std::fs::read_dir(temp.path().join("gen")).unwrap().count();
    assert_eq!(leftovers, 1);
}
