//! CLI commands.

pub mod discussion;
pub mod forum;
pub mod user;
