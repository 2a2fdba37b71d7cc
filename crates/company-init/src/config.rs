use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

/// Known top-level config keys.
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["repository", "install", "dev"];

/// Known keys within `[repository]` section.
const KNOWN_REPOSITORY_KEYS: &[&str] = &["host", "organization"];

/// Known keys within `[install]` section.
const KNOWN_INSTALL_KEYS: &[&str] = &["cmd", "fallback_args"];

/// Known keys within `[dev]` section.
const KNOWN_DEV_KEYS: &[&str] = &["script"];

const CONFIG_DIR: &str = "company-init";
const CONFIG_FILE: &str = "company-init.toml";

// Embed repository defaults
const DEFAULT_TOML: &str = include_str!(concat!(
  env!("CARGO_MANIFEST_DIR"),
  "/defaults/company-init.toml"
));

/// Resolve the global config file path.
///
/// # Errors
/// Returns an error if the XDG config home cannot be resolved.
pub fn global_config_path() -> Result<PathBuf> {
  let xdg = xdg::BaseDirectories::with_prefix(CONFIG_DIR);
  let config_home = xdg
    .get_config_home()
    .ok_or_else(|| anyhow::anyhow!("unable to resolve XDG config home"))?;
  Ok(config_home.join(CONFIG_FILE))
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RepositoryConfig {
  pub host: String,
  /// Answer used when the organization prompt is left blank.
  pub organization: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InstallConfig {
  pub cmd: Vec<String>,
  #[serde(default)]
  pub fallback_args: Vec<String>,
}

impl InstallConfig {
  /// Program used for installs and for the manual `run` hint.
  #[must_use]
  pub fn program(&self) -> &str {
    self.cmd.first().map_or("npm", String::as_str)
  }

  #[must_use]
  pub fn args(&self) -> Vec<String> {
    self.cmd.iter().skip(1).cloned().collect()
  }

  /// Install args with the fallback flags appended.
  #[must_use]
  pub fn fallback(&self) -> Vec<String> {
    let mut args = self.args();
    args.extend(self.fallback_args.iter().cloned());
    args
  }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DevConfig {
  pub script: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InitConfig {
  pub repository: RepositoryConfig,
  pub install: InstallConfig,
  pub dev: DevConfig,
}

impl InitConfig {
  /// The command a user runs to start the dev server by hand, e.g. `npm run dev`.
  #[must_use]
  pub fn dev_command(&self) -> String {
    format!("{} run {}", self.install.program(), self.dev.script)
  }
}

/// Configuration made of the embedded defaults only.
///
/// # Errors
/// Returns an error if the embedded defaults fail to parse.
pub fn default_config() -> Result<InitConfig> {
  toml::from_str(DEFAULT_TOML).context("invalid embedded default config")
}

#[derive(Debug, Clone)]
pub struct AppContext {
  pub cwd: PathBuf,
  pub config: InitConfig,
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys in a parsed TOML config file.
///
/// Unknown keys are logged as warnings to help users catch typos.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  for key in table.keys() {
    if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
      eprintln!(
        "{}: unknown config key '{}' in {} (did you mean one of: {}?)",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_TOP_LEVEL_KEYS.join(", ")
      );
    }
  }

  for (section, known) in [
    ("repository", KNOWN_REPOSITORY_KEYS),
    ("install", KNOWN_INSTALL_KEYS),
    ("dev", KNOWN_DEV_KEYS),
  ] {
    let Some(TomlValue::Table(inner)) = table.get(section) else {
      continue;
    };
    for key in inner.keys() {
      if !known.contains(&key.as_str()) {
        eprintln!(
          "{}: unknown config key '{}.{}' in {} (known keys: {})",
          "warning".yellow(),
          section,
          key,
          file_path.display(),
          known.join(", ")
        );
      }
    }
  }
}

/// Load the configuration: embedded defaults merged with the global XDG file.
///
/// # Errors
/// Returns an error if the global file cannot be read or parsed as valid
/// TOML, or if the merged result does not match the expected shape.
pub fn load_config() -> Result<InitConfig> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  let xdg = xdg::BaseDirectories::with_prefix(CONFIG_DIR);
  if let Some(global_path) = xdg.find_config_file(CONFIG_FILE) {
    log::debug!("loading config from {}", global_path.display());
    let data = fs::read_to_string(&global_path)
      .with_context(|| format!("failed to read {}", global_path.display()))?;
    let val: TomlValue = toml::from_str(&data)
      .with_context(|| format!("invalid TOML in {}", global_path.display()))?;
    warn_unknown_keys(&val, &global_path);
    merge_values(&mut merged, val);
  }

  // Deserialize into strongly typed config
  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: InitConfig = toml::from_str(&merged_str).context("failed to parse merged config")?;
  if cfg.install.cmd.is_empty() {
    anyhow::bail!("install.cmd must not be empty");
  }
  Ok(cfg)
}
