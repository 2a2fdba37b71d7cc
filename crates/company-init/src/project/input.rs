use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;

use super::error::ValidationError;
use crate::config::RepositoryConfig;
use crate::texts;
use crate::utils::wizard::Wizard;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn is_valid_name(input: &str) -> bool {
  let re = NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));
  re.is_match(input)
}

/// Validate a project name answer. Surrounding whitespace is ignored.
pub fn validate_project_name(input: &str) -> Result<(), ValidationError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::ProjectNameRequired);
  }
  if !is_valid_name(trimmed) {
    return Err(ValidationError::InvalidProjectName);
  }
  Ok(())
}

/// Validate an organization answer. Surrounding whitespace is ignored.
pub fn validate_organization(input: &str) -> Result<(), ValidationError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::OrganizationRequired);
  }
  if !is_valid_name(trimmed) {
    return Err(ValidationError::InvalidOrganization);
  }
  Ok(())
}

/// Validated, trimmed answers of the init prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnswers {
  pub project_name: String,
  pub organization: String,
}

impl ProjectAnswers {
  /// Build answers from raw input, applying the same rules as the prompts.
  pub fn new(project_name: &str, organization: &str) -> Result<Self, ValidationError> {
    validate_project_name(project_name)?;
    validate_organization(organization)?;
    Ok(Self {
      project_name: project_name.trim().to_string(),
      organization: organization.trim().to_string(),
    })
  }

  /// SSH clone URL, e.g. `git@github.com:acme/widget.git`.
  #[must_use]
  pub fn repository_url(&self, host: &str) -> String {
    format!(
      "git@{host}:{}/{}.git",
      self.organization, self.project_name
    )
  }
}

/// Ask for project name and organization, re-prompting until both are valid.
pub fn collect(wizard: &Wizard, repo: &RepositoryConfig) -> Result<ProjectAnswers> {
  let project_name = wizard.text(
    &texts::init::project_name_prompt(),
    None,
    validate_project_name,
  )?;
  let organization = wizard.text(
    &texts::init::organization_prompt(),
    Some(repo.organization.as_str()),
    validate_organization,
  )?;
  Ok(ProjectAnswers::new(&project_name, &organization)?)
}
