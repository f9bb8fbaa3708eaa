mod cli;
mod commands;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lx_client::HttpApi;
use lx_storage::Preferences;
use tracing::info;

use crate::cli::Cli;

fn default_state_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lexstream").join("state.json"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let state_file = cli.state_file.clone().or_else(default_state_file);
    let store = lx_storage::open_store(state_file.as_deref()).await?;
    info!("💾 Keeping preferences in {} store", store.name());
    let preferences = Preferences::new(store);

    let api = HttpApi::new(&cli.api_url)?.with_preferences(preferences.clone());
    info!("🌐 Using API at {}", api.base_url());

    commands::handle_command(cli.command, Arc::new(api), preferences).await
}
