use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use tax_cli::{
    app,
    cli::Cli,
    config::{CliConfig, Settings},
    logging,
};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), config);

    logging::init_logging(settings.log_level.as_deref(), settings.log_file.as_deref())?;
    debug!(?settings, "resolved settings");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::execute(&cli.command, &settings, &mut out)?;
    out.flush()?;

    Ok(())
}
