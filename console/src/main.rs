use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use escola_console::{
    run_command, Command, Console, Event, Settings, TerminalPanel, UreqTransport, USAGE, WINDOW,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref()).context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let console = Console::init(
        &settings,
        Arc::new(UreqTransport::new()),
        Arc::new(TerminalPanel::new(io::stdout())),
    );
    let outcome = console.dispatch(WINDOW, Event::Load);
    tracing::debug!(?outcome, "startup probe finished");

    let mut out = io::stdout();
    writeln!(out, "{USAGE}")?;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let Some(command) = Command::parse(&line) else {
            writeln!(out, "{USAGE}")?;
            continue;
        };
        if !run_command(&console, command, &mut out)? {
            break;
        }
    }
    Ok(())
}
