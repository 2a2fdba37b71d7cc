use thiserror::Error;

/// Rejected prompt answer. Recoverable: the prompt is shown again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("Project name is required")]
  ProjectNameRequired,
  #[error("Organization name is required")]
  OrganizationRequired,
  #[error("Project name can only contain letters, numbers, hyphens, and underscores")]
  InvalidProjectName,
  #[error("Organization name can only contain letters, numbers, hyphens, and underscores")]
  InvalidOrganization,
}

/// Failure of an external command: either it could not be spawned or it
/// exited unsuccessfully.
#[derive(Debug, Error)]
pub enum CommandError {
  #[error("Command failed to start: {command}: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },
  #[error("Command failed with {status}: {command}")]
  Exit { command: String, status: String },
}

/// Fatal pipeline failures. Any of these stops the setup.
#[derive(Debug, Error)]
pub enum SetupError {
  #[error("Repository {url} not found. Please check the project name and ensure you have access.")]
  RepositoryNotFound { url: String },
  #[error("Failed to clone repository: {message}")]
  CloneFailed { message: String },
  #[error("Failed to install dependencies: {message}")]
  DependencyInstall { message: String },
}
