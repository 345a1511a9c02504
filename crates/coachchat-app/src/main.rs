use anyhow::Result;
use clap::Parser;

use coachchat::{run_message_mode, run_repl_mode, setup_from_cli, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = setup_from_cli(&cli)?;

    if let Some(ref command) = cli.command {
        return command.execute(&config, &mut std::io::stdout());
    }

    if let Some(message) = cli.message.as_deref() {
        return run_message_mode(&config, message).await;
    }

    run_repl_mode(config).await
}
