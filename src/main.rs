use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xfendgame::cli::Cli;
use xfendgame::core::{default_settings_path, load_settings, save_settings};
use xfendgame::game::{append_pgn, play_batch, BatchSummary, Oracles};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    // Settings: file (or defaults), then command-line overrides
    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);
    cli.apply(&mut settings);
    settings.validate()?;

    if let Some(path) = &cli.dump_settings {
        save_settings(&settings, path).with_context(|| format!("writing settings to {}", path.display()))?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let mut oracles = Oracles::from_settings(&settings);
    let records = play_batch(&settings, &mut oracles);

    for record in &records {
        println!("{}", record.summary_line());
    }

    match &settings.pgn_output {
        Some(path) => append_pgn(path, &records).with_context(|| format!("writing PGN to {}", path.display()))?,
        None => {
            for record in &records {
                println!("\n{}", record.to_pgn());
            }
        }
    }

    let summary = BatchSummary::from_records(&records);
    info!("[GAME] {}", summary);
    println!("{summary}");
    Ok(())
}

/// `RUST_LOG` filter (default `info`), written to stderr or to `log_file`
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
