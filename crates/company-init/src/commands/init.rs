use anyhow::Result;

use crate::config::{self, AppContext};
use crate::project::input;
use crate::project::{ProjectSetup, SetupReport, SetupSession, SystemRunner};
use crate::texts;
use crate::utils::wizard::Wizard;

pub fn run(ctx: &AppContext) -> Result<SetupReport> {
  let wizard = Wizard::new();
  let config_path = config::global_config_path()
    .ok()
    .map(|path| path.display().to_string());
  Wizard::info_lines(&texts::init::welcome_lines(config_path.as_deref()));

  let answers = input::collect(&wizard, &ctx.config.repository)?;
  let repository_url = answers.repository_url(&ctx.config.repository.host);
  let session = SetupSession::new(repository_url, &ctx.cwd);

  let setup = ProjectSetup::new(session, &ctx.config, SystemRunner);
  let report = setup.initialize()?;
  log::debug!("setup finished: {report:?}");
  Ok(report)
}
