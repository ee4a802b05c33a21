use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

mod cli;
mod demo;

use cli::{Cli, Commands};
use viewstack::NavigatorConfig;

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &cli.log_file {
        // truncate on each run
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!("Starting viewstack-demo");

    let mut config = NavigatorConfig::load(cli.config.as_deref())?;
    if cli.no_animations {
        config.animations = false;
    }
    debug!("Effective navigator config: {:?}", config);

    match cli.command {
        Commands::Run(args) => {
            demo::run(config, &args).await?;
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
