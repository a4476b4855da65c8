//! Configuration management for the Flarum CLI.

use anyhow::{Context, Result};
use flarum::{Credentials, FlarumClient, UserId};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Forum API root, e.g. `https://forum.example.com/api`.
    pub url: Option<String>,
    /// Authentication credentials.
    pub auth: Option<AuthConfig>,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Master key or access token.
    pub token: String,
    /// User the token was issued to. Absent for a master key.
    pub user_id: Option<u64>,
}

impl From<&AuthConfig> for Credentials {
    fn from(auth: &AuthConfig) -> Self {
        match auth.user_id {
            Some(uid) => Credentials::access_token(&auth.token, uid),
            None => Credentials::master_key(&auth.token),
        }
    }
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.join("flarum.toml"))
}

/// Load configuration from file.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).context("Failed to read config file")?;

    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("Failed to parse config file")
}

/// Save configuration to file.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content).context("Failed to write config file")?;

    Ok(())
}

/// Pick the forum URL: command line / environment first, then the file.
pub fn resolve_url(url: Option<&str>, config: &Config) -> Result<String> {
    url.map(str::to_owned)
        .or_else(|| config.url.clone())
        .context("Forum URL not set. Pass --url, set FLARUM_URL, or run 'flarum auth login --url ...'.")
}

/// Build a client from the current configuration.
pub fn build_client(url: Option<&str>) -> Result<FlarumClient> {
    let config = load_config()?;
    let url = resolve_url(url, &config)?;

    let mut builder = FlarumClient::builder(url);

    if let Some(auth) = &config.auth {
        builder = builder.credentials(auth.into());
    }

    builder.build().context("Failed to build Flarum client")
}

/// Build a client that requires stored credentials.
pub fn build_authed_client(url: Option<&str>) -> Result<FlarumClient> {
    let client = build_client(url)?;

    if !client.is_authenticated() {
        anyhow::bail!("Authentication required. Run 'flarum auth login' or 'flarum auth key' first.");
    }

    Ok(client)
}

/// Token and acting user for an authenticated call.
///
/// An explicit `--as` wins; otherwise the token's own user, then `fallback`.
pub fn auth_for(
    client: &FlarumClient,
    acting_user: Option<u64>,
    fallback: Option<UserId>,
) -> Result<(String, Option<UserId>)> {
    client
        .stored_auth(acting_user.map(UserId::from), fallback)
        .context("Authentication required. Run 'flarum auth login' first.")
}
