//! Output formatting.

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use flarum::ApiResponse;
use serde::Serialize;
use serde_json::Value;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table format
    Table,
    /// Raw JSON body
    Json,
    /// TOON format
    Toon,
    /// Plain text format
    #[default]
    Plain,
}

/// Trait for plain text output.
pub trait PlainPrint {
    /// Print as plain text with formatting.
    fn plain_print(&self);
}

/// Trait for table row generation.
pub trait TableRow {
    /// Get table headers.
    fn headers() -> Vec<&'static str>;
    /// Get row data as strings.
    fn row(&self) -> Vec<String>;
}

/// Print items in plain text format.
pub fn print_plain<T: PlainPrint>(items: &[T]) {
    if items.is_empty() {
        println!("No results");
        return;
    }
    for item in items {
        item.plain_print();
    }
}

/// Format an RFC 3339 timestamp in local time.
pub fn format_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => "-".to_string(),
    }
}

/// Print a table of items with proper formatting for each output mode.
pub fn print_table<T: TableRow + Serialize + PlainPrint>(items: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items).unwrap_or_default());
        }
        OutputFormat::Toon => {
            let value = serde_json::to_value(&items).unwrap_or_default();
            println!("{}", toon_format::encode_default(&value).unwrap_or_default());
        }
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results");
                return;
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::headers());
            for item in &items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
        OutputFormat::Plain => {
            print_plain(&items);
        }
    }
}

/// Print a forum reply, failing on non-success statuses.
pub fn print_response(response: &ApiResponse, format: OutputFormat) -> Result<()> {
    if !response.is_success() {
        for error in response.errors() {
            eprintln!("{}", describe_error(error).red());
        }
        bail!("Request failed with status {}", response.status);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response.body)?);
        }
        OutputFormat::Toon => {
            println!(
                "{}",
                toon_format::encode_default(&response.body).unwrap_or_default()
            );
        }
        OutputFormat::Table | OutputFormat::Plain => {
            if response.body.is_null() {
                println!("Done ({})", response.status);
                return Ok(());
            }
            print_table(resource_rows(&response.body), format);
        }
    }

    Ok(())
}

fn describe_error(error: &Value) -> String {
    let code = error.get("code").and_then(Value::as_str).unwrap_or("error");
    match error.get("detail").and_then(Value::as_str) {
        Some(detail) => format!("{code}: {detail}"),
        None => code.to_string(),
    }
}

/// Rows for the primary data of a JSON:API document.
pub fn resource_rows(body: &Value) -> Vec<ResourceRow> {
    match body.get("data") {
        Some(Value::Array(items)) => items.iter().map(ResourceRow::from).collect(),
        Some(item @ Value::Object(_)) => vec![ResourceRow::from(item)],
        _ => Vec::new(),
    }
}

// ============================================================================
// Display implementations for resources
// ============================================================================

/// Row for any JSON:API resource.
#[derive(Debug, Serialize)]
pub struct ResourceRow {
    pub kind: String,
    pub id: String,
    pub name: String,
    pub detail: String,
    pub created: String,
}

impl From<&Value> for ResourceRow {
    fn from(resource: &Value) -> Self {
        let attrs = &resource["attributes"];
        let text = |key: &str| attrs.get(key).and_then(Value::as_str);
        let count = |key: &str| attrs.get(key).and_then(Value::as_u64);

        let kind = resource["type"].as_str().unwrap_or_default().to_string();

        let name = text("title")
            .or_else(|| text("displayName"))
            .or_else(|| text("username"))
            .unwrap_or_default()
            .to_string();

        let detail = match kind.as_str() {
            "discussions" => {
                let mut flags = Vec::new();
                if attrs["isSticky"].as_bool() == Some(true) {
                    flags.push("sticky");
                }
                if attrs["isLocked"].as_bool() == Some(true) {
                    flags.push("locked");
                }
                if attrs["isHidden"].as_bool() == Some(true) {
                    flags.push("hidden");
                }
                let comments = count("commentCount")
                    .map(|n| format!("{n} comments"))
                    .unwrap_or_default();
                if flags.is_empty() {
                    comments
                } else {
                    format!("{comments} [{}]", flags.join(", "))
                }
            }
            "users" => text("email")
                .map(str::to_string)
                .or_else(|| count("discussionCount").map(|n| format!("{n} discussions")))
                .unwrap_or_default(),
            "forums" => text("version")
                .map(|v| format!("Flarum {v}"))
                .unwrap_or_default(),
            _ => String::new(),
        };

        let created = text("createdAt")
            .or_else(|| text("joinTime"))
            .map(format_time)
            .unwrap_or_else(|| "-".to_string());

        Self {
            kind,
            id: match &resource["id"] {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            },
            name,
            detail,
            created,
        }
    }
}

impl TableRow for ResourceRow {
    fn headers() -> Vec<&'static str> {
        vec!["Type", "ID", "Name", "Detail", "Created"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.kind.clone(),
            self.id.clone(),
            self.name.clone(),
            self.detail.clone(),
            self.created.clone(),
        ]
    }
}

impl PlainPrint for ResourceRow {
    fn plain_print(&self) {
        println!(
            "{} {}",
            format!("[{} {}]", self.kind, self.id).cyan(),
            self.name.bold()
        );
        if !self.detail.is_empty() || self.created != "-" {
            println!("   {} | {}", self.detail, self.created.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discussion_row() {
        let row = ResourceRow::from(&json!({
            "type": "discussions",
            "id": "12",
            "attributes": {
                "title": "Hello",
                "commentCount": 3,
                "isLocked": true,
                "createdAt": "2024-01-02T03:04:05+00:00"
            }
        }));

        assert_eq!(row.kind, "discussions");
        assert_eq!(row.id, "12");
        assert_eq!(row.name, "Hello");
        assert_eq!(row.detail, "3 comments [locked]");
        assert_ne!(row.created, "-");
    }

    #[test]
    fn test_user_row() {
        let row = ResourceRow::from(&json!({
            "type": "users",
            "id": "4",
            "attributes": {"username": "alice", "displayName": "Alice", "discussionCount": 2}
        }));

        assert_eq!(row.name, "Alice");
        assert_eq!(row.detail, "2 discussions");
        assert_eq!(row.created, "-");
    }

    #[test]
    fn test_resource_rows_shapes() {
        assert_eq!(resource_rows(&json!({"data": []})).len(), 0);
        let tags = json!({"data": [{"type": "tags", "id": "1"}, {"type": "tags", "id": "2"}]});
        assert_eq!(resource_rows(&tags).len(), 2);
        assert_eq!(resource_rows(&json!({"data": {"type": "forums", "id": "1"}})).len(), 1);
        assert!(resource_rows(&json!({"token": "x"})).is_empty());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("not a date"), "-");
        assert_eq!(format_time("2024-01-02T03:04:05+00:00").len(), 16);
    }
}
