pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio-api")]
#[command(about = "Folio API - portfolio content server with a session-gated admin surface")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides SERVER_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Keep all data in memory instead of Postgres")]
        in_memory: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Create an admin account directly in the database")]
    CreateAdmin {
        #[arg(long, help = "Login email")]
        email: String,
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Password")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        in_memory: false,
    });

    match command {
        Commands::Serve { port, in_memory } => commands::serve::handle(port, in_memory).await,
        Commands::Migrate => commands::migrate::handle().await,
        Commands::CreateAdmin { email, name, password } => {
            commands::admin::create(email, name, password).await
        }
    }
}
