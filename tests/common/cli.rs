//! Helpers for running the `sqa` binary against a throwaway data directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Temporary working directory with its own `.sqa` data directory.
pub struct SqaWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl SqaWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(".sqa")
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Captured result of one invocation.
pub struct SqaOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl SqaOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

fn command(root: &Path, data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sqa").expect("sqa binary");
    cmd.current_dir(root)
        .env("SQA_DATA_DIR", data_dir)
        .env_remove("RUST_LOG");
    cmd
}

/// Run `sqa` with `args` inside `workspace`. `label` tags failure output.
pub fn run_sqa<I, S>(workspace: &SqaWorkspace, args: I, label: &str) -> SqaOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(&workspace.root, &workspace.data_dir())
        .args(args)
        .output()
        .expect("run sqa");
    let result = SqaOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] sqa exited with {}:\n{}", result.status, result.stderr);
    }
    result
}

/// Run and assert success.
pub fn run_ok<I, S>(workspace: &SqaWorkspace, args: I, label: &str) -> SqaOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let result = run_sqa(workspace, args, label);
    assert!(
        result.status.success(),
        "[{label}] expected success, stderr:\n{}",
        result.stderr
    );
    result
}

/// Workspace initialized with the demo projects.
pub fn demo_workspace() -> SqaWorkspace {
    let workspace = SqaWorkspace::new();
    run_ok(&workspace, ["init"], "init");
    workspace
}

/// Workspace initialized empty with one active project named `name`.
pub fn project_workspace(name: &str) -> SqaWorkspace {
    let workspace = SqaWorkspace::new();
    run_ok(&workspace, ["init", "--empty"], "init");
    run_ok(&workspace, ["project", "create", name], "project create");
    workspace
}

/// Add a valid issue to the active project and return its ID.
pub fn add_issue(workspace: &SqaWorkspace, title: &str, extra: &[&str]) -> String {
    let mut args = vec![
        "--json", "issue", "add", title, "--reporter", "QA Team", "--page", "Home",
        "--test-case", "TC-1",
    ];
    args.extend_from_slice(extra);
    let output = run_ok(workspace, args, "issue add");
    output.json()["id"]
        .as_str()
        .expect("issue id in output")
        .to_string()
}
