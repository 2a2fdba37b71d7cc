use std::fmt::Display;
use std::io::{self, IsTerminal as _, Read, Write};

use anyhow::{Context, Result, anyhow, bail};
use inquire::{CustomUserError, Text};
use inquire::validator::Validation;
use owo_colors::OwoColorize as _;

use crate::{log_info, log_warn};

/// Prompt helpers for interactive flows.
#[derive(Clone, Debug)]
pub struct Wizard {
  is_tty: bool,
}

impl Wizard {
  #[must_use]
  pub fn new() -> Self {
    let stdin_tty = io::stdin().is_terminal();
    let stdout_tty = io::stdout().is_terminal();
    Self {
      is_tty: stdin_tty && stdout_tty,
    }
  }

  /// Print informational lines through the shared logger.
  pub fn info_lines(lines: &[String]) {
    for line in lines {
      if line.is_empty() {
        log_info!("");
      } else {
        log_info!("{}", line);
      }
    }
  }

  /// Prompt for textual input until `validate` accepts it.
  ///
  /// The answer is trimmed and an empty answer is replaced by `default`
  /// before validation runs. Uses `inquire` when attached to a TTY and a
  /// line based fallback otherwise (tests, piped input).
  pub fn text<E>(
    &self,
    prompt: &str,
    default: Option<&str>,
    validate: fn(&str) -> Result<(), E>,
  ) -> Result<String>
  where
    E: Display + 'static,
  {
    if self.is_tty {
      let mut text = Text::new(prompt).with_validator(move |input: &str| {
        Ok::<_, CustomUserError>(match validate(input.trim()) {
          Ok(()) => Validation::Valid,
          Err(err) => Validation::Invalid(err.to_string().into()),
        })
      });
      if let Some(default) = default {
        text = text.with_default(default);
      }
      return text
        .prompt()
        .map(|ans| ans.trim().to_string())
        .map_err(|err| anyhow!(err));
    }
    Self::fallback_text(prompt, default, validate)
  }

  fn fallback_text<E: Display>(
    prompt: &str,
    default: Option<&str>,
    validate: fn(&str) -> Result<(), E>,
  ) -> Result<String> {
    loop {
      match default {
        Some(def) => log_info!("{} [{}]", prompt, def),
        None => log_info!("{}", prompt),
      }
      anstream::print!("{}", "-> ".bright_cyan());
      io::stdout().flush().ok();

      let Some(input) = read_line()? else {
        bail!("input closed before an answer to \"{prompt}\" was provided");
      };
      let trimmed = input.trim();
      let answer = match default {
        Some(def) if trimmed.is_empty() => def,
        _ => trimmed,
      };
      match validate(answer) {
        Ok(()) => return Ok(answer.to_string()),
        Err(err) => log_warn!("{}", err),
      }
    }
  }
}

/// Read a single line from stdin without buffering past the newline, so
/// child processes inheriting stdin see the remaining input.
fn read_line() -> Result<Option<String>> {
  read_line_from(&mut io::stdin().lock()).context("failed to read from stdin")
}

/// Read bytes up to and including `\n`. A trailing `\r` is dropped.
///
/// Returns `None` on end of input when no bytes were read.
fn read_line_from(reader: &mut impl Read) -> io::Result<Option<String>> {
  let mut bytes = Vec::new();
  let mut saw_any = false;
  loop {
    let mut buf = [0u8; 1];
    match reader.read(&mut buf) {
      Ok(0) => break,
      Ok(_) => {
        saw_any = true;
        if buf[0] == b'\n' {
          break;
        }
        bytes.push(buf[0]);
      }
      Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
      Err(err) => return Err(err),
    }
  }
  if !saw_any {
    return Ok(None);
  }
  if bytes.last() == Some(&b'\r') {
    bytes.pop();
  }
  Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  fn lines(input: &str) -> Vec<Option<String>> {
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    (0..3)
      .map(|_| read_line_from(&mut reader).expect("read"))
      .collect()
  }

  #[test]
  fn reads_whole_lines_of_any_length() {
    let long = "a".repeat(250);
    let got = lines(&format!("{long}\nacme\n"));
    assert_eq!(got, vec![Some(long), Some("acme".to_string()), None]);
  }

  #[test]
  fn crlf_line_endings_yield_one_answer_per_line() {
    let got = lines("widget\r\nacme\r\n");
    assert_eq!(
      got,
      vec![Some("widget".to_string()), Some("acme".to_string()), None]
    );
  }

  #[test]
  fn blank_line_is_distinct_from_end_of_input() {
    let got = lines("\nlast");
    assert_eq!(
      got,
      vec![Some(String::new()), Some("last".to_string()), None]
    );
  }
}
