mod app;
mod brew;
mod cli;
mod clipboard;
mod config;
mod logging;
mod runtime;
mod task;
mod theme;
mod ui;

#[cfg(test)]
mod test_support;

use clap::Parser;
use tracing::{error, info};

use cli::Cli;
use config::{Settings, default_log_path};
use logging::init_logging;
use runtime::event_loop::run_app;
use runtime::terminal::{install_panic_hook, restore_terminal, setup_terminal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Before settings, so problems in the settings file get logged.
    let log_path = cli.log_file.clone().or_else(default_log_path);
    let _log_guard = init_logging(log_path.as_deref(), cli.verbose);

    let settings = Settings::resolve(&cli);
    info!(version = env!("CARGO_PKG_VERSION"), brew = %settings.brew, "brewdeck launching");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, settings).await;
    restore_terminal(&mut terminal)?;

    if let Err(err) = &result {
        error!(error = %err, "exited with error");
    }
    result
}
