use owo_colors::OwoColorize as _;

use crate::utils::log::t;

fn highlight_name() -> String {
  "Company Init".bright_cyan().bold().to_string()
}

pub fn welcome_lines(config_path: Option<&str>) -> Vec<String> {
  let mut lines = vec![String::new(), format!("Welcome to {}!", highlight_name())];
  if let Some(path) = config_path {
    lines.push(format!("Defaults can be changed in {}.", t::path(path)));
  }
  lines.push(String::new());
  lines
}

pub fn project_name_prompt() -> String {
  "What is the project name? (e.g., the-dev-guy)".to_string()
}

pub fn organization_prompt() -> String {
  "What is the GitHub organization? (e.g., Developers-at-G)".to_string()
}

/// The hint printed after setup: change into the project, then run the dev script.
pub fn manual_start_lines(project_name: &str, dev_command: &str) -> Vec<String> {
  vec![
    String::new(),
    "To start the development server manually, run:".to_string(),
    format!("   {}", t::cmd(format!("cd {project_name}"))),
    format!("   {}", t::cmd(dev_command)),
  ]
}
