//! Flarum forum CLI.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{discussion, forum, user};
use flarum::FlarumClient;

/// Flarum forum CLI
#[derive(Parser)]
#[command(name = "flarum")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Forum API root, e.g. https://forum.example.com/api
    #[arg(long, global = true, env = "FLARUM_URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Forum information
    #[command(alias = "f")]
    Forum {
        #[command(subcommand)]
        action: forum::ForumAction,
    },

    /// Discussion operations
    #[command(alias = "d")]
    Discussion {
        #[command(subcommand)]
        action: discussion::DiscussionAction,
    },

    /// User operations
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        action: user::UserAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with username or email and password
    Login {
        /// Username or email
        #[arg(short, long)]
        identification: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Request a long-lived token
        #[arg(long)]
        remember: bool,
    },
    /// Store a forum master key
    Key {
        /// Master key
        key: String,
    },
    /// Forget stored credentials
    Logout,
    /// Show current auth status
    Status,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let url = cli.url.as_deref();

    match cli.command {
        Commands::Auth { action } => handle_auth(action, url).await,
        Commands::Forum { action } => forum::handle(action, cli.format, url).await,
        Commands::Discussion { action } => discussion::handle(action, cli.format, url).await,
        Commands::User { action } => user::handle(action, cli.format, url).await,
        Commands::Config => {
            let cfg = config::load_config()?;
            println!("Config file: {}", config::config_path()?.display());
            println!("Forum URL: {}", url.or(cfg.url.as_deref()).unwrap_or("-"));
            println!("Authenticated: {}", cfg.auth.is_some());
            if let Some(auth) = &cfg.auth {
                match auth.user_id {
                    Some(uid) => println!("User ID: {}", uid),
                    None => println!("Using master key"),
                }
            }
            Ok(())
        }
    }
}

async fn handle_auth(action: AuthAction, url: Option<&str>) -> Result<()> {
    match action {
        AuthAction::Login {
            identification,
            password,
            remember,
        } => {
            let mut cfg = config::load_config()?;
            let base_url = config::resolve_url(url, &cfg)?;

            let client = FlarumClient::new(&base_url).context("Failed to build Flarum client")?;
            let session = client
                .login(&identification, &password, remember)
                .await
                .context("Login failed")?;
            let creds = session
                .credentials()
                .context("Login returned no credentials")?;

            cfg.url = Some(base_url);
            cfg.auth = Some(config::AuthConfig {
                token: creds.token.clone(),
                user_id: creds.user_id.map(|id| id.get()),
            });
            config::save_config(&cfg)?;

            match creds.user_id {
                Some(uid) => println!("Logged in as user {}", uid),
                None => println!("Logged in"),
            }
            Ok(())
        }
        AuthAction::Key { key } => {
            let mut cfg = config::load_config()?;
            if let Some(url) = url {
                cfg.url = Some(url.to_string());
            }
            cfg.auth = Some(config::AuthConfig {
                token: key,
                user_id: None,
            });
            config::save_config(&cfg)?;
            println!("Master key stored");
            Ok(())
        }
        AuthAction::Logout => {
            let mut cfg = config::load_config()?;
            cfg.auth = None;
            config::save_config(&cfg)?;
            println!("Logged out");
            Ok(())
        }
        AuthAction::Status => {
            let cfg = config::load_config()?;
            match &cfg.auth {
                Some(config::AuthConfig {
                    user_id: Some(uid), ..
                }) => println!("Logged in as user {}", uid),
                Some(_) => println!("Using master key"),
                None => println!("Not logged in"),
            }
            Ok(())
        }
    }
}
