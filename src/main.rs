use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zoom_meet::{
    app,
    cli::{handle_config_command, load_config, load_dotenv, Cli, CliCommand},
    config::Credentials,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for the join URL
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(CliCommand::Create) {
        CliCommand::Version => {
            println!("zoom-meet {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Config(args) => handle_config_command(args, cli.config.as_deref()),
        CliCommand::Create => {
            load_dotenv();
            let config = load_config(cli.config.as_deref())?;
            let credentials = Credentials::from_env();

            let join_url = app::run_create(&config, &credentials).await?;
            println!("{}", join_url);
            Ok(())
        }
    }
}
