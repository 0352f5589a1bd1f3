use std::path::{Path, PathBuf};

use raven_filesystem::{FileSystem, MemoryFileSystem, NativeFileSystem};

fn paths(files: &[raven_filesystem::FileInfo]) -> Vec<PathBuf> {
    files.iter().map(|f| f.path.clone()).collect()
}

fn populate(fs: &dyn FileSystem, root: &str) {
    for dir in ["", "day", "day/cloudy", ".cache"] {
        fs.create_directory(&Path::new(root).join(dir)).unwrap();
    }
    for (file, size) in [("sky.dds", 4), ("day/noon.dds", 8), ("day/cloudy/grey.dds", 2), ("day/notes.txt", 1), (".cache/old.dds", 3)] {
        fs.write_bytes(&Path::new(root).join(file), &vec![7u8; size]).unwrap();
    }
}

#[test]
fn native_find_files_recurses_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_string_lossy().replace('\\', "/");
    let fs = NativeFileSystem;
    populate(&fs, &root);

    let files = fs.find_files(&format!("{}/*.dds", root)).unwrap();
    assert_eq!(paths(&files), vec![
        PathBuf::from(format!("{}/day/cloudy/grey.dds", root)),
        PathBuf::from(format!("{}/day/noon.dds", root)),
        PathBuf::from(format!("{}/sky.dds", root)),
    ]);
    assert_eq!(files[1].size, 8);
    assert!(files[1].modified.is_some());

    let all = fs.find_files(&format!("{}/*", root)).unwrap();
    assert_eq!(all.len(), 4);

    let nested = fs.find_files(&format!("{}/day/*/grey.dds", root)).unwrap();
    assert_eq!(nested.len(), 1);

    assert!(fs.find_files(&format!("{}/missing/*.dds", root)).is_err());
}

#[test]
fn native_read_write_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let fs = NativeFileSystem;

    let nested = dir.path().join("a").join("b");
    fs.create_directory(&nested).unwrap();
    fs.create_directory(&nested).unwrap();
    assert!(fs.is_dir(&nested));

    let file = nested.join("coefficients.json");
    fs.write_bytes(&file, b"[1, 2]").unwrap();
    fs.write_bytes(&file, b"[3]").unwrap();
    assert!(fs.exists(&file));
    assert!(!fs.is_dir(&file));
    assert_eq!(&fs.read_bytes(&file).unwrap()[..], b"[3]");

    assert!(fs.read_bytes(&nested.join("missing.json")).is_err());
    assert!(fs.create_directory(&file).is_err());
}

#[test]
fn memory_matches_native_listing() {
    let fs = MemoryFileSystem::new();
    populate(&fs, "envs");

    let files = fs.find_files("envs/*.dds").unwrap();
    // memory trees have no hidden entries
    assert_eq!(paths(&files), vec![
        PathBuf::from("envs/.cache/old.dds"),
        PathBuf::from("envs/day/cloudy/grey.dds"),
        PathBuf::from("envs/day/noon.dds"),
        PathBuf::from("envs/sky.dds"),
    ]);
    assert_eq!(files[2].size, 8);

    let backslashes = fs.find_files("envs\\day\\*.txt").unwrap();
    assert_eq!(paths(&backslashes), vec![PathBuf::from("envs/day/notes.txt")]);
}

#[test]
fn memory_directories_and_errors() {
    let fs = MemoryFileSystem::new();
    fs.insert("envs/day/noon.dds", vec![1u8, 2, 3]);

    assert!(fs.is_dir(Path::new("envs")));
    assert!(fs.is_dir(Path::new("envs/day/")));
    assert!(!fs.is_dir(Path::new("envs/day/noon.dds")));
    assert!(fs.exists(Path::new("envs/day/noon.dds")));
    assert!(!fs.exists(Path::new("envs/night")));

    // parent must exist
    assert!(fs.write_bytes(Path::new("out/a.json"), b"[]").is_err());
    fs.create_directory(Path::new("out")).unwrap();
    fs.write_bytes(Path::new("out/a.json"), b"[]").unwrap();
    assert_eq!(&fs.read_bytes(Path::new("./out/a.json")).unwrap()[..], b"[]");

    // a file cannot become a directory and the other way around
    assert!(fs.create_directory(Path::new("out/a.json")).is_err());
    assert!(fs.write_bytes(Path::new("envs/day"), b"").is_err());

    assert!(fs.find_files("night/*.dds").is_err());
    assert_eq!(fs.paths(), vec![PathBuf::from("envs/day/noon.dds"), PathBuf::from("out/a.json")]);
}

#[test]
fn memory_find_files_from_current_directory() {
    let fs = MemoryFileSystem::new();
    fs.insert("sky.dds", vec![1u8]);
    fs.insert("envs/noon.dds", vec![2u8]);
    fs.insert("envs/notes.txt", vec![3u8]);

    let files = fs.find_files("./*.dds").unwrap();
    assert_eq!(paths(&files), vec![PathBuf::from("envs/noon.dds"), PathBuf::from("sky.dds")]);

    let files = fs.find_files(".\\envs\\*.dds").unwrap();
    assert_eq!(paths(&files), vec![PathBuf::from("envs/noon.dds")]);
}
