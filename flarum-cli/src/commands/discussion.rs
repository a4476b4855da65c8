//! Discussion commands.

use anyhow::Result;
use clap::Subcommand;
use flarum::api::DEFAULT_ACTING_USER;

use crate::config::{auth_for, build_authed_client, build_client};
use crate::output::{print_response, OutputFormat};

#[derive(Subcommand)]
pub enum DiscussionAction {
    /// List discussions
    #[command(alias = "ls")]
    List,

    /// Show a discussion
    Show {
        /// Discussion ID
        id: u64,
    },

    /// Start a discussion
    Create {
        /// Title
        #[arg(short, long)]
        title: String,
        /// First post content
        #[arg(short, long)]
        content: String,
        /// Tag ID (repeatable)
        #[arg(long = "tag")]
        tags: Vec<u64>,
        /// User to post as
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },

    /// Edit a discussion
    Update {
        /// Discussion ID
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// Hide the discussion
        #[arg(long)]
        hidden: bool,
        /// Lock the discussion
        #[arg(long)]
        locked: bool,
        /// Stick the discussion
        #[arg(long)]
        sticky: bool,
        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<u64>,
        /// Remove every tag
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
        /// User to edit as
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },

    /// Delete a discussion
    #[command(alias = "rm")]
    Delete {
        /// Discussion ID
        id: u64,
        /// User to delete as
        #[arg(long = "as")]
        acting_user: Option<u64>,
    },
}

pub async fn handle(
    action: DiscussionAction,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    match action {
        DiscussionAction::List => list(format, url).await,
        DiscussionAction::Show { id } => show(id, format, url).await,
        DiscussionAction::Create {
            title,
            content,
            tags,
            acting_user,
        } => create(&title, &content, tags, acting_user, format, url).await,
        DiscussionAction::Update {
            id,
            title,
            hidden,
            locked,
            sticky,
            tags,
            clear_tags,
            acting_user,
        } => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let edit = Edit {
                title,
                hidden,
                locked,
                sticky,
                tags,
            };
            update(id, edit, acting_user, format, url).await
        }
        DiscussionAction::Delete { id, acting_user } => delete(id, acting_user, format, url).await,
    }
}

async fn list(format: OutputFormat, url: Option<&str>) -> Result<()> {
    let client = build_client(url)?;
    let response = client.discussions().index().await?;

    print_response(&response, format)
}

async fn show(id: u64, format: OutputFormat, url: Option<&str>) -> Result<()> {
    let client = build_client(url)?;
    let response = client.discussions().show(id).await?;

    print_response(&response, format)
}

async fn create(
    title: &str,
    content: &str,
    tags: Vec<u64>,
    acting_user: Option<u64>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, user) = auth_for(&client, acting_user, Some(DEFAULT_ACTING_USER))?;

    let response = client
        .discussions()
        .create(token, title, content)
        .tags(tags)
        .acting_user(user.unwrap_or(DEFAULT_ACTING_USER))
        .send()
        .await?;

    print_response(&response, format)
}

/// Requested discussion edits.
struct Edit {
    title: Option<String>,
    hidden: bool,
    locked: bool,
    sticky: bool,
    tags: Option<Vec<u64>>,
}

async fn update(
    id: u64,
    edit: Edit,
    acting_user: Option<u64>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, user) = auth_for(&client, acting_user, Some(DEFAULT_ACTING_USER))?;

    let mut request = client
        .discussions()
        .update(token, id)
        .acting_user(user.unwrap_or(DEFAULT_ACTING_USER))
        .hidden(edit.hidden)
        .locked(edit.locked)
        .sticky(edit.sticky);

    if let Some(title) = edit.title {
        request = request.title(title);
    }
    if let Some(tags) = edit.tags {
        request = request.tags(tags);
    }

    let response = request.send().await?;

    print_response(&response, format)
}

async fn delete(
    id: u64,
    acting_user: Option<u64>,
    format: OutputFormat,
    url: Option<&str>,
) -> Result<()> {
    let client = build_authed_client(url)?;
    let (token, user) = auth_for(&client, acting_user, Some(DEFAULT_ACTING_USER))?;

    let response = client
        .discussions()
        .delete(token, id)
        .acting_user(user.unwrap_or(DEFAULT_ACTING_USER))
        .send()
        .await?;

    print_response(&response, format)
}
