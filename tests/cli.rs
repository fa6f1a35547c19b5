// cli.rs

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const EXIT_FUZZY_FALLBACK: i32 = 2;
const EXIT_CACHE_LOCATION: i32 = 3;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn cache(&self) -> PathBuf {
        self.dir.path().join(".active.txt")
    }

    fn mkdir(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::create_dir(&path).unwrap();
        path.display().to_string()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_active"))
            .args(args)
            .env("ACTIVE_CACHE", self.cache())
            .env_remove("ACTIVE_LOG")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn record_then_lookup() {
    let sandbox = Sandbox::new();
    let a = sandbox.mkdir("a");
    let b = sandbox.mkdir("b");

    for path in [&a, &b, &a] {
        let output = sandbox.run(&[path.as_str()]);
        assert!(output.status.success());
        assert_eq!(stdout(&output), format!("{path}\n"));
    }

    assert_eq!(stdout(&sandbox.run(&[])), format!("{a}\n"));
    assert_eq!(stdout(&sandbox.run(&["-p", "1"])), format!("{b}\n"));
    assert_eq!(stdout(&sandbox.run(&["-1"])), format!("{b}\n"));
    // Clamp to oldest.
    assert_eq!(stdout(&sandbox.run(&["--previous=50"])), format!("{a}\n"));
}

#[test]
fn list_mode_pads_indices() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.cache(), "/1\n/2\n\n/3\n/4\n/5\n").unwrap();

    let output = sandbox.run(&["-l"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "00: /5\n01: /4\n02: /3\n03: /2\n04: /1\n");

    let output = sandbox.run(&["--list=2"]);
    assert_eq!(stdout(&output), "0: /5\n1: /4\n");

    // A bare `-l` never swallows the following path.
    let output = sandbox.run(&["-l", "/some/dir"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "00: /5\n01: /4\n02: /3\n03: /2\n04: /1\n");
}

#[test]
fn missing_path_shows_fuzzy_list() {
    let sandbox = Sandbox::new();
    let a = sandbox.mkdir("a");
    let b = sandbox.mkdir("b");
    for path in [&a, &b, &a] {
        sandbox.run(&[path.as_str()]);
    }

    let missing = sandbox.dir.path().join("gone").display().to_string();
    let output = sandbox.run(&[missing.as_str()]);
    assert_eq!(output.status.code(), Some(EXIT_FUZZY_FALLBACK));
    assert_eq!(stdout(&output), format!("0: {a}\n1: {b}\n"));
}

#[test]
fn cache_path_mode_prints_location() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--cache-path"]);
    assert_eq!(output.status.code(), Some(EXIT_CACHE_LOCATION));
    assert_eq!(stdout(&output).trim_end(), sandbox.cache().display().to_string());
    assert!(!Path::new(&sandbox.cache()).exists());
}

#[test]
fn too_many_arguments_is_fatal() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["/a", "/b"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Too many arguments: 2"));
}

#[test]
fn unwritable_cache_is_fatal() {
    let sandbox = Sandbox::new();
    let output = Command::new(env!("CARGO_BIN_EXE_active"))
        .env("ACTIVE_CACHE", sandbox.dir.path().join("no").join("cache.txt"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to get or create cache"));
}
