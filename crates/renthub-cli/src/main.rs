// Renthub CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: One SessionHandle per process, initialized from the
// persisted credential before any command runs (mirrors the web shell, which
// restores the session before the first route is guarded).

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use renthub_client::{ClientConfig, SessionHandle};

#[derive(Parser)]
#[command(name = "renthub")]
#[command(about = "Renthub CLI - Sign in to the rent platform and manage your account")]
#[command(version)]
pub struct Cli {
    /// User service base URL
    #[arg(
        long,
        env = "RENTHUB_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub api_url: String,

    /// Token file location (defaults to ~/.renthub/token)
    #[arg(long, env = "RENTHUB_CREDENTIALS_PATH")]
    pub credentials_path: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json", "yaml"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long, short)]
        email: String,

        /// Account password
        #[arg(long, short)]
        password: String,
    },

    /// Create an account (does not sign in)
    Register {
        /// Full name
        #[arg(long)]
        full_name: String,

        /// Account email
        #[arg(long, short)]
        email: String,

        /// Account password
        #[arg(long, short)]
        password: String,

        /// Account role
        #[arg(long, default_value = "tenant", value_parser = ["tenant", "owner", "admin", "broker"])]
        role: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Sign out and discard the stored credential
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Show session state and what each route class would do
    Status,

    /// Update the signed-in account's profile
    UpdateProfile {
        /// New full name
        #[arg(long)]
        full_name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Change the signed-in account's password
    ChangePassword {
        /// Current password
        #[arg(long)]
        old_password: String,

        /// New password
        #[arg(long)]
        new_password: String,
    },

    /// Print the Google sign-in URL (open it in a browser)
    GoogleUrl,

    /// Finish a Google sign-in with the token from the callback redirect
    GoogleCallback {
        /// Token carried by the callback
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renthub=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    config.api_base_url = cli.api_url.clone();
    if let Some(path) = &cli.credentials_path {
        config.credentials_path = path.clone();
    }

    let session = SessionHandle::from_config(&config);
    session.initialize().await;

    let output_format = output::OutputFormat::from_str(&cli.output);

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, output_format, cli.quiet, email, password).await
        }
        Commands::Register {
            full_name,
            email,
            password,
            role,
            phone,
        } => {
            commands::auth::register(
                &session,
                output_format,
                cli.quiet,
                full_name,
                email,
                password,
                role,
                phone,
            )
            .await
        }
        Commands::Logout => commands::auth::logout(&session, cli.quiet).await,
        Commands::Whoami => commands::profile::whoami(&session, output_format).await,
        Commands::Status => commands::status::run(&session, output_format).await,
        Commands::UpdateProfile { full_name, phone } => {
            commands::profile::update(&session, output_format, cli.quiet, full_name, phone).await
        }
        Commands::ChangePassword {
            old_password,
            new_password,
        } => commands::profile::change_password(&session, cli.quiet, old_password, new_password).await,
        Commands::GoogleUrl => commands::auth::google_url(&session).await,
        Commands::GoogleCallback { token } => {
            commands::auth::google_callback(&session, output_format, cli.quiet, token).await
        }
    }
}
