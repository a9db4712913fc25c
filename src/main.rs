use anyhow::{Context, Result};
use clap::Parser;
use album_converter::{
    cli::commands::Cli,
    config::{AppConfig, RunConfig},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let file_config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let config = RunConfig::from_cli(&cli, file_config);

    println!("\nPerforming conversion:");
    println!("    Input directory: {}", config.root.display());
    println!("    Output format: {}", config.format);
    if let Some(quality) = config.quality.as_ref().filter(|_| !config.format.is_lossless()) {
        println!("    Output quality: {}", quality);
    }

    album_converter::run(&config)
        .with_context(|| format!("Conversion of {} failed", config.root.display()))?;

    println!("\n=== Conversion Complete ===");
    Ok(())
}
