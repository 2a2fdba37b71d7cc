#![allow(dead_code)]
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;
use assert_cmd::prelude::*; // cargo_bin() on std::process::Command
use tempfile::{Builder, TempDir};

/// Sandbox for one CLI run: a working directory, an isolated XDG config home
/// and a `bin` directory placed first on `PATH` for fake `git`/`npm` tools.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("company-init-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    for dir in ["work", "xdg", "bin", "template", "logs"] {
      std::fs::create_dir_all(temp.path().join(dir)).expect("sandbox dir");
    }
    Self { temp }
  }

  /// Working directory the CLI runs in; projects get cloned below it.
  pub fn path(&self) -> PathBuf {
    self.temp.path().join("work")
  }

  pub fn xdg_home_dir(&self) -> PathBuf {
    self.temp.path().join("xdg")
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  /// Files the fake `git clone` copies into the new project directory.
  pub fn template_dir(&self) -> PathBuf {
    self.temp.path().join("template")
  }

  /// Each fake tool appends its argv to `logs/<name>.log`.
  pub fn tool_log(&self, name: &str) -> PathBuf {
    self.temp.path().join("logs").join(format!("{name}.log"))
  }

  pub fn read_tool_log(&self, name: &str) -> Result<String> {
    let path = self.tool_log(name);
    std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
  }

  fn path_with_bin(&self) -> String {
    match std::env::var("PATH") {
      Ok(existing) if !existing.is_empty() => format!("{}:{existing}", self.bin_dir().display()),
      _ => self.bin_dir().display().to_string(),
    }
  }

  pub fn bin_cmd(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("company-init")?;
    cmd
      .current_dir(self.path())
      .env("PATH", self.path_with_bin())
      .env("XDG_CONFIG_HOME", self.xdg_home_dir())
      .env_remove("RUST_LOG");
    Ok(cmd)
  }

  /// Same sandbox as [`TestEnv::bin_cmd`], as a plain `std::process::Command`
  /// for spawning under a PTY.
  pub fn pty_cmd(&self) -> Result<std::process::Command> {
    let mut cmd = std::process::Command::cargo_bin("company-init")?;
    cmd
      .current_dir(self.path())
      .env("PATH", self.path_with_bin())
      .env("XDG_CONFIG_HOME", self.xdg_home_dir())
      .env("TERM", "xterm-256color")
      .env_remove("RUST_LOG");
    Ok(cmd)
  }

  /// Shortcut for `company-init init` with the given stdin answers.
  pub fn init(&self, answers: &str) -> Result<Command> {
    let mut cmd = self.bin_cmd()?;
    cmd.arg("init").write_stdin(answers.to_string());
    Ok(cmd)
  }

  pub fn write_template_file(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.template_dir().join(relative);
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
  }

  pub fn write_xdg_config(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.xdg_home_dir().join(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
  }

  /// Install a fake tool whose body runs after its argv was logged.
  pub fn add_tool(&self, name: &str, body: &str) -> Result<PathBuf> {
    let script = format!(
      "#!/bin/sh\necho \"$@\" >> '{}'\n{body}\n",
      self.tool_log(name).display()
    );
    let path = self.bin_dir().join(name);
    write_executable_script(&path, &script)?;
    Ok(path)
  }

  /// `git clone <url> <dir>` that copies the template dir into `<dir>`.
  pub fn add_cloning_git(&self) -> Result<PathBuf> {
    let body = format!(
      "[ \"$1\" = \"clone\" ] || exit 1\nmkdir -p \"$3\"\ncp -R '{}/.' \"$3\"\n",
      self.template_dir().display()
    );
    self.add_tool("git", &body)
  }

  /// A tool that always exits with `code`.
  pub fn add_failing_tool(&self, name: &str, code: i32) -> Result<PathBuf> {
    self.add_tool(name, &format!("exit {code}"))
  }

  pub fn add_succeeding_tool(&self, name: &str) -> Result<PathBuf> {
    self.add_tool(name, "exit 0")
  }
}

fn write_executable_script(path: &Path, body: &str) -> Result<()> {
  std::fs::write(path, body).with_context(|| format!("write script {}", path.display()))?;
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt as _;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
      .with_context(|| format!("set script executable at {}", path.display()))?;
  }
  Ok(())
}

/// Returns a workspace-local temp root for tests under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // crates/company-init -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}
