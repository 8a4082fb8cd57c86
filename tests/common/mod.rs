//! Common test utilities for herbicalib CLI tests.
//!
//! `TestEnv` gives each test its own working directory, HOME and ledger,
//! and runs the real binary inside them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host cannot leak in
const HERBICALIB_VARS: &[&str] = &[
    "HERBICALIB_DELETE_SECRET",
    "HERBICALIB_SECRET",
    "HERBICALIB_LEDGER_BACKEND",
    "HERBICALIB_LEDGER_PATH",
    "HERBICALIB_VERBOSITY",
    "HERBICALIB_LOG",
];

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Parse every stdout line as a JSON event
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("bad JSON line {l:?}: {e}"))
            })
            .collect()
    }

    /// The single `data` event of a `--json` run
    pub fn data(&self) -> serde_json::Value {
        self.json_lines()
            .into_iter()
            .find(|v| v["event"] == "data")
            .unwrap_or_else(|| panic!("no data event in:\n{}", self.stdout))
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("project tempdir"),
            home_dir: tempfile::tempdir().expect("home tempdir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_herbicalib")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Ledger file used unless a test overrides `HERBICALIB_LEDGER_PATH`
    pub fn ledger_path(&self) -> PathBuf {
        self.project_path("data/ledger.jsonl")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.project_path("herbicalib.toml"), content).expect("write config");
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path()).args(args);
        for key in HERBICALIB_VARS {
            cmd.env_remove(key);
        }
        with_test_home(&mut cmd, self.home_dir.path());
        cmd.env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .env("HERBICALIB_LEDGER_PATH", self.ledger_path());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute herbicalib");
        to_result(output)
    }
}

fn with_test_home(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"));
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// `|a - b| <= 1e-9 * max(1, |a|, |b|)`
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * 1f64.max(a.abs()).max(b.abs())
}
