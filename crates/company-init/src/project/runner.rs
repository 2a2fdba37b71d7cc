use std::path::Path;
use std::process::ExitStatus;

use super::error::CommandError;
use crate::utils::child::run_child_process;

/// Runs external programs for the setup pipeline.
pub trait CommandRunner {
  /// Run `program args...` in `cwd` and wait for it to finish.
  ///
  /// # Errors
  /// Returns a [`CommandError`] when the program cannot be started or exits
  /// unsuccessfully.
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), CommandError>;
}

/// Runs programs as real child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), CommandError> {
    let command = display_command(program, args);
    let status = run_child_process(program, args, cwd)
      .map_err(|source| CommandError::Spawn {
        command: command.clone(),
        source,
      })?;
    if status.success() {
      return Ok(());
    }
    Err(CommandError::Exit {
      command,
      status: describe_status(status),
    })
  }
}

pub(crate) fn display_command(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}

fn describe_status(status: ExitStatus) -> String {
  if let Some(code) = status.code() {
    return format!("exit code {code}");
  }
  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt as _;
    if let Some(signal) = status.signal() {
      return format!("signal {signal}");
    }
  }
  status.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn sh(script: &str) -> Vec<String> {
    vec!["-c".to_string(), script.to_string()]
  }

  #[test]
  #[serial]
  fn success_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    SystemRunner
      .run("/bin/sh", &sh("exit 0"), dir.path())
      .expect("exit 0 succeeds");
  }

  #[test]
  #[serial]
  fn non_zero_exit_names_code_and_command() {
    let dir = tempfile::tempdir().unwrap();
    let err = SystemRunner
      .run("/bin/sh", &sh("exit 7"), dir.path())
      .expect_err("exit 7 fails");
    assert_eq!(
      err.to_string(),
      "Command failed with exit code 7: /bin/sh -c exit 7"
    );
  }

  #[test]
  fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SystemRunner
      .run("company-init-missing-tool", &[], dir.path())
      .expect_err("spawn fails");
    assert!(matches!(err, CommandError::Spawn { .. }), "{err}");
    assert!(err.to_string().contains("company-init-missing-tool"));
  }

  #[test]
  fn display_command_joins_argv() {
    let args = vec!["install".to_string(), "--legacy-peer-deps".to_string()];
    assert_eq!(
      display_command("npm", &args),
      "npm install --legacy-peer-deps"
    );
  }
}
