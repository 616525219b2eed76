//! # Worktrack
//!
//! Work-day tracking driven by screen lock activity.
//!
//! - **Sessions**: work and break intervals per calendar day, stored in SQLite
//! - **State machine**: idle, working, on break, day complete
//! - **Reminders**: periodic break prompts while working
//! - **Reports**: daily summaries, history and a monthly chart
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worktrack::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
