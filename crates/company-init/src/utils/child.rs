use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::{log_info, log_warn};

/// Spawn a child process and wait for it.
///
/// - Without a log sink: inherit stdio so progress output reaches the user unchanged.
/// - When a log sink is set: route stdout lines as Info and stderr lines as Warn.
///   Stdin is set to null.
pub fn run_child_process(program: &str, args: &[String], cwd: &Path) -> std::io::Result<ExitStatus> {
  log::debug!(
    "running `{} {}` in {}",
    program,
    args.join(" "),
    cwd.display()
  );

  let mut cmd = Command::new(program);
  cmd.current_dir(cwd).args(args);

  if !crate::utils::log::is_sink_set() {
    cmd
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());
    return cmd.status();
  }

  cmd
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());
  let mut child = cmd.spawn()?;

  let stdout_handle = child.stdout.take().map(|out| {
    std::thread::spawn(move || {
      for line in BufReader::new(out).lines().map_while(Result::ok) {
        log_info!("{}", line);
      }
    })
  });
  let stderr_handle = child.stderr.take().map(|err| {
    std::thread::spawn(move || {
      for line in BufReader::new(err).lines().map_while(Result::ok) {
        log_warn!("{}", line);
      }
    })
  });

  let status = child.wait()?;
  if let Some(h) = stdout_handle {
    let _ = h.join();
  }
  if let Some(h) = stderr_handle {
    let _ = h.join();
  }
  Ok(status)
}
