use anyhow::{Context, Result, bail};
use clap::{CommandFactory as _, Parser, Subcommand};

mod commands;
pub mod config;
pub mod project;
mod texts;
pub mod utils;

use crate::config::AppContext;

/// Initialize a new project for development
#[derive(Debug, Parser)]
#[command(name = "company-init", version, about, long_about = None)]
pub struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Set up a new project: clone it, install dependencies and prepare .env
  Init,
}

pub fn parse() -> Cli {
  Cli::parse()
}

pub fn run() -> Result<()> {
  let cli = parse();

  match cli.command {
    Some(Commands::Init) => {
      let cwd = std::env::current_dir().context("failed to resolve current directory")?;
      let config = config::load_config()?;
      let ctx = AppContext { cwd, config };
      commands::init::run(&ctx)?;
    }
    None => {
      anstream::eprintln!("{}", Cli::command().render_help().ansi());
      bail!("no command given; run `company-init init`");
    }
  }

  Ok(())
}
