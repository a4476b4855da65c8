//! User commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use flarum::api::DEFAULT_ACTING_USER;
use serde_json::{Map, Value};

use crate::config::{auth_for, build_authed_client, build_client};
use crate::output::{print_response, OutputFormat};

#[derive(Subcommand)]
pub enum UserAction {
    /// List users
    #[command(alias = "ls")]
    List {
        /// User to list as
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },

    /// Show a user
    Show {
        /// User ID
        user_id: u64,
    },

    /// Register a user
    Create {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Mark the email as confirmed (master key only)
        #[arg(long)]
        confirmed: bool,
        /// User to act as (required with a master key)
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },

    /// Edit a user's attributes
    Update {
        /// User ID
        user_id: u64,
        /// Attribute as key=value; values are parsed as JSON when possible
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, Value)>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        /// User ID
        user_id: u64,
    },

    /// Upload an avatar
    AvatarUpload {
        /// User ID
        user_id: u64,
    },

    /// Remove an avatar
    AvatarDelete {
        /// User ID
        user_id: u64,
    },

    /// Resend the confirmation email
    Confirm {
        /// User ID
        user_id: u64,
    },
}

pub async fn handle(action: UserAction, format: OutputFormat, url: Option<&str>) -> Result<()> {
    match action {
        UserAction::List { acting_user } => list(acting_user, format, url).await,
        UserAction::Show { user_id } => show(user_id, format, url).await,
        UserAction::Create {
            username,
            email,
            password,
            confirmed,
            acting_user,
        } => {
            let new_user = Registration {
                username,
                email,
                password,
                confirmed,
            };
            create(new_user, acting_user, format, url).await
        }
        UserAction::Update {
            user_id,
            attributes,
        } => update(user_id, attributes, format, url).await,
        UserAction::Delete { user_id } => {
            account_action(Account::Delete, user_id, format, url).await
        }
        UserAction::AvatarUpload { user_id } => {
            account_action(Account::UploadAvatar, user_id, format, url).await
        }
        UserAction::AvatarDelete { user_id } => {
            account_action(Account::DeleteAvatar, user_id, format, url).await
        }
        UserAction::Confirm { user_id } => {
            account_action(Account::SendConfirmation, user_id, format, url).await
        }
    }
}

/// Parse `key=value`, reading the value as JSON and falling back to a string.
fn parse_attribute(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .context("attribute must look like key=value")?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("attribute name must not be empty");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

async fn list(acting_user: Option<u64>, format: OutputFormat, url: Option<&str>) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, user) = auth_for(&client, acting_user, Some(DEFAULT_ACTING_USER))?;

    let response = client
        .users()
        .index(&token, user.unwrap_or(DEFAULT_ACTING_USER))
        .await?;

    print_response(&response, format)
}

async fn show(user_id: u64, format: OutputFormat, url: Option<&str>) -> Result<()> {
    let client = build_client(url)?;
    let response = client.users().show(user_id).await?;

    print_response(&response, format)
}

/// Fields of a new account.
struct Registration {
    username: String,
    email: String,
    password: String,
    confirmed: bool,
}

async fn create(
    new_user: Registration,
    acting_user: Option<u64>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, user) = auth_for(&client, acting_user, None)?;

    let mut request = client
        .users()
        .create(token, new_user.username, new_user.email, new_user.password)
        .email_confirmed(new_user.confirmed);

    if let Some(user) = user {
        request = request.acting_user(user);
    }

    let response = request.send().await?;

    print_response(&response, format)
}

async fn update(
    user_id: u64,
    attributes: Vec<(String, Value)>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, _) = auth_for(&client, None, None)?;

    let attributes: Map<String, Value> = attributes.into_iter().collect();
    let response = client
        .users()
        .update(user_id, token)
        .attributes(attributes)
        .send()
        .await?;

    print_response(&response, format)
}

/// Single-account actions without a request body.
#[derive(Debug, Clone, Copy)]
enum Account {
    Delete,
    UploadAvatar,
    DeleteAvatar,
    SendConfirmation,
}

async fn account_action(
    action: Account,
    user_id: u64,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, _) = auth_for(&client, None, None)?;
    let users = client.users();

    tracing::debug!(?action, user_id, "user account action");

    let response = match action {
        Account::Delete => users.delete(&token, user_id).await?,
        Account::UploadAvatar => users.upload_avatar(&token, user_id).await?,
        Account::DeleteAvatar => users.delete_avatar(&token, user_id).await?,
        Account::SendConfirmation => users.send_confirmation_email(&token, user_id).await?,
    };

    print_response(&response, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("username=bob").unwrap(),
            ("username".to_string(), json!("bob"))
        );
        assert_eq!(
            parse_attribute("isEmailConfirmed=true").unwrap(),
            ("isEmailConfirmed".to_string(), json!(true))
        );
        assert_eq!(
            parse_attribute("bio=a=b").unwrap(),
            ("bio".to_string(), json!("a=b"))
        );
        assert!(parse_attribute("novalue").is_err());
        assert!(parse_attribute("=x").is_err());
    }
}
