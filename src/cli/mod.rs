pub mod commands;

use clap::{Parser, Subcommand};

use crate::catalog::CatalogClient;

#[derive(Parser)]
#[command(name = "clothier")]
#[command(about = "Clothier CLI - catalog client for the Clothier API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CLOTHIER_SERVER",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the Clothier API server"
    )]
    pub server: String,

    #[arg(
        long,
        global = true,
        env = "CLOTHIER_TOKEN",
        help = "Session token for mutating operations"
    )]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse and manage the product catalog")]
    Products {
        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },

    #[command(about = "Account registration and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut client = CatalogClient::new(cli.server.clone());
    if let Some(token) = cli.token.clone() {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Products { cmd } => commands::products::handle(cmd, &client).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client).await,
    }
}
