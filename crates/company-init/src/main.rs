use owo_colors::OwoColorize as _;

fn main() {
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .format_timestamp(None)
    .try_init();

  if let Err(err) = company_init::run() {
    anstream::eprintln!("{} {}", "Error:".red().bold(), format!("{err:#}").red());
    std::process::exit(1);
  }
}
