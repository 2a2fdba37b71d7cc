use std::path::{Path, PathBuf};

/// Everything one setup run needs to know about the project it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSession {
  repository_url: String,
  project_name: String,
  project_path: PathBuf,
  cwd: PathBuf,
}

impl SetupSession {
  /// Derive the project name from the last path segment of `repository_url`
  /// and place the project directly under `cwd`.
  pub fn new(repository_url: impl Into<String>, cwd: &Path) -> Self {
    let repository_url = repository_url.into();
    let project_name = project_name_from_url(&repository_url);
    let project_path = cwd.join(&project_name);
    Self {
      repository_url,
      project_name,
      project_path,
      cwd: cwd.to_path_buf(),
    }
  }

  #[must_use]
  pub fn repository_url(&self) -> &str {
    &self.repository_url
  }

  #[must_use]
  pub fn project_name(&self) -> &str {
    &self.project_name
  }

  #[must_use]
  pub fn project_path(&self) -> &Path {
    &self.project_path
  }

  /// Directory the clone runs in.
  #[must_use]
  pub fn cwd(&self) -> &Path {
    &self.cwd
  }
}

/// `git@github.com:acme/widget.git` -> `widget`
fn project_name_from_url(url: &str) -> String {
  let last = url.rsplit('/').next().unwrap_or(url);
  last.strip_suffix(".git").unwrap_or(last).to_string()
}
