//! Binary-level tests for `modinit`.
//!
//! The toolchain is replaced by a shell stub placed on an isolated `PATH`, so
//! these tests never need a real Go installation.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated working directory, PATH and config home for one run.
struct Sandbox {
    project: TempDir,
    bin: TempDir,
    config_home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
            config_home: TempDir::new().unwrap(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_modinit"));
        cmd.current_dir(self.project.path())
            .env("PATH", self.bin.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env_remove("RUST_LOG");
        cmd
    }

    fn entries(&self) -> Vec<PathBuf> {
        let mut entries: Vec<_> = fs::read_dir(self.project.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        entries.sort();
        entries
    }

    /// Argument lines recorded by [`RECORDING_GO`], one per invocation.
    #[cfg(unix)]
    fn go_calls(&self) -> Vec<String> {
        fs::read_to_string(self.bin.path().join("calls"))
            .map(|calls| calls.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[cfg(unix)]
    fn install_go(&self, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join("go");
        fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }
}

/// A go stub that answers `version` and accepts every `mod` subcommand.
#[cfg(unix)]
const WORKING_GO: &str = r#"
case "$1" in
  version) echo "go version go1.22.0 linux/amd64" ;;
  mod) exit 0 ;;
  *) echo "unexpected: $*" >&2; exit 2 ;;
esac
"#;

/// Like [`WORKING_GO`], but appends each argument line to `calls` beside itself.
#[cfg(unix)]
const RECORDING_GO: &str = r#"
echo "$*" >> "${0%/*}/calls"
case "$1" in
  version) echo "go version go1.22.0 linux/amd64" ;;
  mod) exit 0 ;;
  *) exit 2 ;;
esac
"#;

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_missing_argument_prints_usage() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: modinit <module-name>"));

    assert!(sandbox.entries().is_empty());
}

#[cfg(unix)]
#[test]
fn test_missing_argument_runs_no_command() {
    let sandbox = Sandbox::new();
    sandbox.install_go(RECORDING_GO);

    sandbox
        .command()
        .arg("-v")
        .assert()
        .code(1)
        .stdout(predicate::str::diff("Usage: modinit <module-name>\n"));

    assert!(sandbox.go_calls().is_empty());
    assert!(sandbox.entries().is_empty());
}

#[test]
fn test_unknown_flag_prints_usage_and_exits_one() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .args(["myapp", "--bogus"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: modinit <module-name>"));

    assert!(sandbox.entries().is_empty());
}

#[test]
fn test_help_exits_zero() {
    Sandbox::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-overwrite"));
}

#[cfg(unix)]
#[test]
fn test_extra_arguments_are_ignored() {
    let sandbox = Sandbox::new();
    sandbox.install_go(RECORDING_GO);

    sandbox
        .command()
        .args(["myapp", "extra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Initialized Go module: myapp"));

    assert_eq!(
        sandbox.go_calls(),
        vec!["version", "mod init myapp", "mod tidy"]
    );
}

#[cfg(unix)]
#[test]
fn test_hyphenated_name_passes_through() {
    let sandbox = Sandbox::new();
    sandbox.install_go(RECORDING_GO);

    sandbox
        .command()
        .arg("-myapp")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Initialized Go module: -myapp"));

    assert!(sandbox.go_calls().contains(&"mod init -myapp".to_string()));
    let root = sandbox.project.path();
    assert!(read(&root.join("Makefile")).contains("BINARY_NAME=-myapp\n"));
    assert_eq!(read(&root.join("README.md")).lines().next(), Some("# -myapp"));
}

#[cfg(unix)]
#[test]
fn test_log_dir_receives_json_lines() {
    let sandbox = Sandbox::new();
    sandbox.install_go(WORKING_GO);
    let logs = TempDir::new().unwrap();

    sandbox
        .command()
        .arg("-v")
        .arg("--log-dir")
        .arg(logs.path())
        .arg("myapp")
        .assert()
        .success();

    let log_files: Vec<PathBuf> = fs::read_dir(logs.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("modinit.log"))
        })
        .collect();
    assert_eq!(log_files.len(), 1, "expected one log file, got {log_files:?}");

    let content = read(&log_files[0]);
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!lines.is_empty());
    for line in &lines {
        assert!(line.starts_with('{') && line.ends_with('}'), "not JSON: {line}");
    }
    assert!(content.contains("module initialized"));
}

#[test]
fn test_missing_toolchain_exits_nonzero_without_writing() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .arg("myapp")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("go is not installed or not in PATH"))
        .stdout(predicate::str::contains("Searched PATH"));

    assert!(sandbox.entries().is_empty());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let sandbox = Sandbox::new();
    let missing = sandbox.config_home.path().join("nope.yaml");

    sandbox
        .command()
        .arg("--config")
        .arg(&missing)
        .arg("myapp")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Configuration not found"));

    assert!(sandbox.entries().is_empty());
}

#[cfg(unix)]
#[test]
fn test_initializes_myapp() {
    let sandbox = Sandbox::new();
    sandbox.install_go(WORKING_GO);

    sandbox
        .command()
        .arg("myapp")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Initialized Go module: myapp"))
        .stdout(predicate::str::contains("Project structure:"));

    let root = sandbox.project.path();
    for dir in ["cmd", "internal", "pkg", "api", "scripts", "configs"] {
        assert!(root.join(dir).is_dir(), "missing {dir}/");
    }
    assert_eq!(sandbox.entries().len(), 10);

    assert!(read(&root.join("main.go")).contains("Hello, myapp!"));
    assert!(read(&root.join("Makefile")).contains("BINARY_NAME=myapp"));
    assert_eq!(read(&root.join("README.md")).lines().next(), Some("# myapp"));
    assert!(read(&root.join(".gitignore")).contains("vendor/"));
}

#[cfg(unix)]
#[test]
fn test_running_twice_succeeds() {
    let sandbox = Sandbox::new();
    sandbox.install_go(WORKING_GO);

    sandbox.command().arg("myapp").assert().success();
    let first = read(&sandbox.project.path().join("README.md"));

    sandbox.command().arg("myapp").assert().success();
    assert_eq!(read(&sandbox.project.path().join("README.md")), first);
    assert_eq!(sandbox.entries().len(), 10);
}

#[cfg(unix)]
#[test]
fn test_no_overwrite_flag_refuses_existing_files() {
    let sandbox = Sandbox::new();
    sandbox.install_go(WORKING_GO);
    fs::write(sandbox.project.path().join("main.go"), "package main\n").unwrap();

    sandbox
        .command()
        .args(["--no-overwrite", "myapp"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Refusing to overwrite"));

    assert_eq!(read(&sandbox.project.path().join("main.go")), "package main\n");
    assert!(!sandbox.project.path().join("cmd").exists());
}

#[cfg(unix)]
#[test]
fn test_mod_init_failure_prints_stderr() {
    let sandbox = Sandbox::new();
    sandbox.install_go(
        r#"
case "$1" in
  version) echo "go version go1.22.0 linux/amd64" ;;
  mod) echo "go: malformed module path \"$3\"" >&2; exit 1 ;;
esac
"#,
    );

    sandbox
        .command()
        .arg("bad path")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Error: go: malformed module path \"bad path\"",
        ));

    assert!(sandbox.entries().is_empty());
}

#[cfg(unix)]
#[test]
fn test_tidy_failure_policy() {
    let failing_tidy = r#"
case "$1 $2" in
  "version ") echo "go version go1.22.0 linux/amd64" ;;
  "mod init") exit 0 ;;
  "mod tidy") echo "go: network unreachable" >&2; exit 1 ;;
esac
"#;

    let sandbox = Sandbox::new();
    sandbox.install_go(failing_tidy);
    sandbox
        .command()
        .arg("myapp")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("go: network unreachable"));
    // files written before the tidy pass stay on disk
    assert!(sandbox.project.path().join("Makefile").exists());

    let sandbox = Sandbox::new();
    sandbox.install_go(failing_tidy);
    sandbox
        .command()
        .args(["--keep-going-on-tidy", "myapp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go mod tidy failed"))
        .stdout(predicate::str::contains("✅ Initialized Go module: myapp"));
}

// dirs::config_dir only honours XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_config_file_sets_policy() {
    let sandbox = Sandbox::new();
    sandbox.install_go(WORKING_GO);
    fs::write(sandbox.project.path().join("Makefile"), "keep\n").unwrap();

    let config_dir = sandbox.config_home.path().join("modinit");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yaml"), "overwrite_existing: false\n").unwrap();

    sandbox.command().arg("myapp").assert().code(1);
    assert_eq!(read(&sandbox.project.path().join("Makefile")), "keep\n");
}
