//! LifeOS CLI - ingest journal files and exports into the LifeOS store.

use clap::Parser;
use lifeos_cli::commands;
use lifeos_cli::{Cli, Command, Config, Formatter, Overrides};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

async fn run(cli: Cli) -> lifeos_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(Overrides {
        journal_dir: cli.journal_dir,
        memory_dir: cli.memory_dir,
        export_dir: cli.export_dir,
        store_url: cli.store_url,
        store_key: cli.store_key,
    });

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let command = cli.command.unwrap_or(Command::Run);
    commands::execute(command, config, &formatter).await
}
