//! TestWorld pattern for declarative integration test setup.
//!
//! Each world owns a temporary data directory. Commands run against it with
//! `--data-dir` set and the user's own environment scrubbed, so a developer's
//! real workspace or password never leaks into a test.

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the binary reads that must not leak in from the host.
const SCRUBBED_ENV: &[&str] = &["BATTLECARDS_PATH", "BATTLECARDS_PASSWORD", "RUST_LOG"];

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use battlecards_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let result = world.run(&["get", "acme-cloud.title"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".battlecards");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the durable snapshot for the default storage key.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("storage").join("battleCardData.json")
    }

    /// Set an environment variable for commands run in this world.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Use `document` as the seed instead of the embedded one.
    pub fn with_seed(self, document: &Value) -> Self {
        let seed = serde_json::to_string_pretty(document).expect("Failed to encode seed");
        std::fs::write(self.data_dir.join("seed.json"), seed).expect("Failed to write seed");
        self.with_config("[seed]\npath = \"seed.json\"\n")
    }

    /// Pre-populate the durable snapshot, as if a previous session had saved it.
    pub fn with_snapshot(self, raw: &str) -> Self {
        let path = self.snapshot_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create storage dir");
        }
        std::fs::write(path, raw).expect("Failed to write snapshot");
        self
    }

    /// Read back the durable snapshot, `None` if nothing has been saved.
    pub fn snapshot(&self) -> Result<Option<Value>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Apply the world's data directory and environment to `cmd`.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd.current_dir(self.temp_dir.path());
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd.envs(&self.env_vars);
        cmd
    }

    /// A configured command for the binary, for tests that need assert_cmd directly.
    #[allow(deprecated)]
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("battlecards")
            .map_err(|e| anyhow::anyhow!("Failed to find battlecards binary: {}", e))?;
        self.configure_command(&mut cmd);
        Ok(cmd)
    }

    /// Execute a command and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.run_with_stdin(args, "")
    }

    /// Execute a command with `input` piped to stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Result<CliResult> {
        let mut cmd = self.command()?;
        cmd.args(args).write_stdin(input);
        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not JSON:\n{}", self.stdout))
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
