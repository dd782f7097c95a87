// src/bin/cli.rs
use sheet_tabs::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // Keep the guard alive so the log file is flushed on exit.
    let _log = sheet_tabs::log::init()?;
    cli::run()
}
