use clap::Subcommand;

use crate::catalog::CatalogClient;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account")]
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    #[command(about = "Sign in and print a session token")]
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    #[command(about = "Show the current session")]
    Session,
}

pub async fn handle(cmd: AuthCommands, client: &CatalogClient) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let message = client.register(&name, &email, &password).await?;
            println!("{}", message);
            Ok(())
        }

        AuthCommands::Login { email, password } => {
            let token = client.login(&email, &password).await?;
            println!("{}", token);
            Ok(())
        }

        AuthCommands::Session => {
            let session = client.session().await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            Ok(())
        }
    }
}
