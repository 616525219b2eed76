//! Output macros for user-facing and diagnostic messages.
//!
//! Every macro takes anything implementing `Display` (usually a [`Message`])
//! and picks its destination at runtime:
//!
//! ```text
//! msg_info!(..) ──▶ WORKTRACK_DEBUG or RUST_LOG set? ──▶ tracing::info!
//!                                        │
//!                                        └── otherwise ──▶ println!
//! ```
//!
//! | Macro               | Prefix | Normal mode | Debug mode        |
//! |---------------------|--------|-------------|-------------------|
//! | `msg_print!`        |        | stdout      | `tracing::info!`  |
//! | `msg_success!`      | ✅     | stdout      | `tracing::info!`  |
//! | `msg_info!`         | ℹ️     | stdout      | `tracing::info!`  |
//! | `msg_warning!`      | ⚠️     | stdout      | `tracing::warn!`  |
//! | `msg_error!`        | ❌     | stderr      | `tracing::error!` |
//! | `msg_debug!`        | 🔍     | suppressed  | `tracing::debug!` |
//!
//! `msg_error_anyhow!` and `msg_bail_anyhow!` build an `anyhow::Error` from a
//! message instead of printing it.
//!
//! ```rust
//! use worktrack::{msg_debug, msg_info};
//! use worktrack::libs::messages::Message;
//!
//! msg_info!(Message::WatchStarted);
//! msg_debug!(format!("tick at {}", "09:00"));
//! ```
//!
//! [`Message`]: crate::libs::messages::Message

use std::sync::OnceLock;

/// Debug mode is decided once per process.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `WORKTRACK_DEBUG` or `RUST_LOG` is present in the environment.
///
/// `main` uses the same check to decide whether to install a tracing
/// subscriber, so the macros never log into a void.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("WORKTRACK_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a plain message. The `true` form surrounds it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error. Goes to stderr outside debug mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Debug-only output. Nothing is printed, or evaluated, outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
