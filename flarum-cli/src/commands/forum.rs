//! Forum commands.

use anyhow::Result;
use clap::Subcommand;
use flarum::UserId;

use crate::config::{build_authed_client, build_client};
use crate::output::{print_response, OutputFormat};

#[derive(Subcommand)]
pub enum ForumAction {
    /// Show forum information
    Show,

    /// Send a password reset email
    Forgot {
        /// Account email
        email: String,
        /// User to act as (defaults to the token's user, then 1)
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },
}

pub async fn handle(action: ForumAction, format: OutputFormat, url: Option<&str>) -> Result<()> {
    match action {
        ForumAction::Show => show(format, url).await,
        ForumAction::Forgot { email, acting_user } => {
            forgot(&email, acting_user, format, url).await
        }
    }
}

async fn show(format: OutputFormat, url: Option<&str>) -> Result<()> {
    let client = build_client(url)?;
    let response = client.root().show().await?;

    print_response(&response, format)
}

async fn forgot(
    email: &str,
    acting_user: Option<u64>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let response = client
        .root()
        .forgot_as(email, acting_user.map(UserId::from))
        .await?;

    print_response(&response, format)
}
