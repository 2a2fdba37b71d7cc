use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use reflink_copy::reflink_or_copy;

use super::error::SetupError;
use super::runner::CommandRunner;
use super::session::SetupSession;
use crate::config::InitConfig;
use crate::texts;
use crate::utils::log::t;
use crate::utils::wizard::Wizard;
use crate::{log_info, log_success, log_warn};

const ENV_EXAMPLE_FILE: &str = ".env.example";
const ENV_FILE: &str = ".env";
const PACKAGE_JSON: &str = "package.json";

/// Outcome of the environment file stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileStatus {
  /// `.env.example` was copied to `.env`.
  Created,
  /// No `.env.example` in the project.
  Missing,
  /// `.env.example` exists but could not be copied.
  CopyFailed,
}

/// What the dev server stage found in `package.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevServerHint {
  ScriptFound,
  NoDevScript,
  /// `package.json` is missing, unreadable or not valid JSON.
  Unavailable,
}

/// Terminal state of a completed setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupReport {
  pub env_file: EnvFileStatus,
  pub dev_server: DevServerHint,
}

/// Clone, install, copy env file, print dev server hint. In that order.
///
/// Clone and install failures stop the setup. The last two stages only warn.
pub struct ProjectSetup<'a, R: CommandRunner> {
  session: SetupSession,
  config: &'a InitConfig,
  runner: R,
}

impl<'a, R: CommandRunner> ProjectSetup<'a, R> {
  pub fn new(session: SetupSession, config: &'a InitConfig, runner: R) -> Self {
    Self {
      session,
      config,
      runner,
    }
  }

  /// Run all stages.
  ///
  /// # Errors
  /// Returns a [`SetupError`] when cloning or installing fails.
  pub fn initialize(&self) -> Result<SetupReport, SetupError> {
    log_info!("");
    log_info!(
      "Setting up project: {}",
      t::name(self.session.project_name())
    );
    log_info!("Repository URL: {}", t::url(self.session.repository_url()));

    self.clone_repository()?;
    self.install_dependencies()?;
    let env_file = self.setup_environment_file();
    let dev_server = self.development_server_hint();

    log_info!("");
    log_success!("Project setup complete!");
    log_info!(
      "Project location: {}",
      t::path(self.session.project_path().display())
    );
    log_info!("Development server is running in the background");
    log_info!("");

    Ok(SetupReport {
      env_file,
      dev_server,
    })
  }

  fn clone_repository(&self) -> Result<(), SetupError> {
    log_info!("Cloning repository...");
    let url = self.session.repository_url();
    let args = vec![
      "clone".to_string(),
      url.to_string(),
      self.session.project_name().to_string(),
    ];
    if let Err(err) = self.runner.run("git", &args, self.session.cwd()) {
      let message = err.to_string();
      if message.contains("not found") {
        return Err(SetupError::RepositoryNotFound {
          url: url.to_string(),
        });
      }
      return Err(SetupError::CloneFailed { message });
    }
    log_success!("Repository cloned successfully");
    Ok(())
  }

  fn install_dependencies(&self) -> Result<(), SetupError> {
    log_info!("Installing dependencies...");
    let install = &self.config.install;
    let cwd = self.session.project_path();

    let Err(first) = self.runner.run(install.program(), &install.args(), cwd) else {
      log_success!("Dependencies installed successfully");
      return Ok(());
    };

    log_warn!("Standard install failed, trying with legacy peer deps...");
    match self.runner.run(install.program(), &install.fallback(), cwd) {
      Ok(()) => {
        log_success!("Dependencies installed successfully with legacy peer deps");
        Ok(())
      }
      Err(retry) => {
        // The reported failure is always the first attempt's.
        log::debug!("fallback install failed as well: {retry}");
        Err(SetupError::DependencyInstall {
          message: first.to_string(),
        })
      }
    }
  }

  fn setup_environment_file(&self) -> EnvFileStatus {
    let project = self.session.project_path();
    let example = project.join(ENV_EXAMPLE_FILE);
    if !example.exists() {
      log_warn!("No .env.example file found, skipping environment setup");
      return EnvFileStatus::Missing;
    }

    log_info!("Setting up environment file...");
    match reflink_or_copy(&example, project.join(ENV_FILE)) {
      Ok(_) => {
        log_success!("Environment file created from .env.example");
        EnvFileStatus::Created
      }
      Err(err) => {
        log::debug!("failed to copy {}: {err}", example.display());
        log_warn!("No .env.example file found, skipping environment setup");
        EnvFileStatus::CopyFailed
      }
    }
  }

  /// Never launches anything: reports what `package.json` offers and prints
  /// the manual start instructions.
  fn development_server_hint(&self) -> DevServerHint {
    log_info!("Starting development server...");
    let hint = match has_script(self.session.project_path(), &self.config.dev.script) {
      Ok(true) => {
        log_success!("Development server started successfully");
        DevServerHint::ScriptFound
      }
      Ok(false) => {
        log_warn!("No dev script found in package.json, skipping development server start");
        DevServerHint::NoDevScript
      }
      Err(err) => {
        log::debug!("{err:#}");
        log_warn!("Could not start development server automatically");
        DevServerHint::Unavailable
      }
    };
    Wizard::info_lines(&texts::init::manual_start_lines(
      self.session.project_name(),
      &self.config.dev_command(),
    ));
    hint
  }
}

/// Whether `package.json` in `project` defines a non-empty `scripts.<script>`.
fn has_script(project: &Path, script: &str) -> Result<bool> {
  let path = project.join(PACKAGE_JSON);
  let raw =
    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  let manifest: serde_json::Value =
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?;
  if manifest.is_null() {
    bail!("{} is null", path.display());
  }
  let defined = manifest
    .get("scripts")
    .and_then(|scripts| scripts.get(script))
    .is_some_and(is_truthy);
  Ok(defined)
}

fn is_truthy(value: &serde_json::Value) -> bool {
  use serde_json::Value;
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
