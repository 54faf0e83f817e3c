//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the alarm binary against piped input.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

/// Upper bound for a single run; every spec finishes in a few seconds.
const RUN_TIMEOUT: Duration = Duration::from_secs(20);

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Create a CLI builder in a fresh state directory
pub fn alarm() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    stdin: String,
    state: tempfile::TempDir,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: vec!["--no-prompt".into()],
            stdin: String::new(),
            state: tempfile::tempdir().unwrap(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Keep the `Alarm> ` prompt
    pub fn with_prompt(mut self) -> Self {
        self.args.retain(|a| a != "--no-prompt");
        self
    }

    /// Lines piped to stdin; a trailing newline is added.
    pub fn input(mut self, lines: &[&str]) -> Self {
        for line in lines {
            self.stdin.push_str(line);
            self.stdin.push('\n');
        }
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    fn run(self) -> RunAssert {
        let mut cmd = assert_cmd::Command::new(binary_path("alarm"));
        cmd.args(&self.args)
            .env("ALARM_STATE_DIR", self.state.path())
            .env_remove("ALARM_LOG")
            .env_remove("ALARM_MAX_MESSAGE_LEN")
            .write_stdin(self.stdin)
            .timeout(RUN_TIMEOUT);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("command should run");
        RunAssert {
            output,
            state: self.state,
        }
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
    state: tempfile::TempDir,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    /// Contents of the log file written during the run
    pub fn log(&self) -> String {
        std::fs::read_to_string(self.state.path().join("alarm.log")).unwrap_or_default()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert the fired lines (`(<seconds>) <message>`) appear in this order.
    pub fn fired_eq(self, expected: &[&str]) -> Self {
        let fired: Vec<String> = self
            .stdout_lines()
            .into_iter()
            .filter(|l| l.starts_with('('))
            .collect();
        similar_asserts::assert_eq!(fired, expected);
        self
    }
}
