mod cli;
mod commands;

use clap::Parser;
use tracing::debug;

use cli::{Cli, Command};
use commands::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    debug!(base_url = %cli.base_url, "starting tripctl");
    let session = Session::new(&cli.base_url);

    match cli.command {
        Command::List => cmd_list(&session).await,
        Command::Get { id } => cmd_get(&session, &id).await,
        Command::Create { fields } => cmd_create(&session, fields).await,
        Command::Update { id, fields, status } => cmd_update(&session, &id, fields, status).await,
        Command::Delete { id } => cmd_delete(&session, &id).await,
        Command::Cities { query } => {
            cmd_cities(query.as_deref());
            Ok(())
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // stdout carries command output; logs go to stderr.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
