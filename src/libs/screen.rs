//! Screen lock detection and the lock effector.
//!
//! The tracker learns about locks and unlocks from a [`ScreenEventSource`]
//! and asks a [`ScreenLocker`] to lock the session when the user takes a
//! break. Both talk to the OS through its own command line tools:
//!
//! | Platform | Probe                                         | Lock                          |
//! |----------|-----------------------------------------------|-------------------------------|
//! | macOS    | `ioreg -n Root -d1` (`CGSSessionScreenIsLocked`) | `osascript` ctrl-cmd-q        |
//! | Linux    | `loginctl show-session -p LockedHint`         | `loginctl lock-session`       |
//! | Windows  | not available                                 | `LockWorkStation` via rundll32 |

use crate::libs::config::MonitorConfig;
use crate::libs::error::ScreenLockError;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use std::process::Command;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Locked,
    Unlocked,
}

/// Produces lock and unlock notifications.
///
/// Each call to `subscribe` starts an independent stream. A stream ends when
/// its receiver is dropped.
pub trait ScreenEventSource: Send + Sync {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ScreenEvent>;
}

/// Returns `Some(true)` while the session is locked, `None` if the state can't be read.
pub type LockProbe = Arc<dyn Fn() -> Option<bool> + Send + Sync>;

/// Polls the platform lock state and reports transitions.
pub struct PollingScreenMonitor {
    poll_interval: Duration,
    probe: LockProbe,
}

impl PollingScreenMonitor {
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_probe(Duration::from_millis(config.poll_interval), Arc::new(probe_locked))
    }

    pub fn with_probe(poll_interval: Duration, probe: LockProbe) -> Self {
        PollingScreenMonitor {
            poll_interval: poll_interval.max(Duration::from_millis(100)),
            probe,
        }
    }
}

impl ScreenEventSource for PollingScreenMonitor {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ScreenEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let probe = self.probe.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            // The first reading only sets the baseline.
            let mut last: Option<bool> = None;
            let mut warned = false;

            while !tx.is_closed() {
                let probe = probe.clone();
                let current = tokio::task::spawn_blocking(move || probe()).await.ok().flatten();

                match (last, current) {
                    (Some(was), Some(is)) if was != is => {
                        let event = if is { ScreenEvent::Locked } else { ScreenEvent::Unlocked };
                        msg_debug!(Message::ScreenEventDetected(format!("{:?}", event)));
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    (_, None) if !warned => {
                        msg_warning!(Message::ScreenStateUnavailable);
                        warned = true;
                    }
                    _ => {}
                }
                if current.is_some() {
                    last = current;
                }

                time::sleep(poll_interval).await;
            }
        });

        rx
    }
}

#[cfg(target_os = "macos")]
fn probe_locked() -> Option<bool> {
    let output = Command::new("ioreg").args(["-n", "Root", "-d1"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(stdout.contains("\"CGSSessionScreenIsLocked\"=Yes"))
}

#[cfg(target_os = "linux")]
fn probe_locked() -> Option<bool> {
    let session = std::env::var("XDG_SESSION_ID").unwrap_or_else(|_| "self".to_string());
    let output = Command::new("loginctl")
        .args(["show-session", &session, "-p", "LockedHint"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().strip_prefix("LockedHint=")? {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn probe_locked() -> Option<bool> {
    None
}

/// Locks the user's session.
pub trait ScreenLocker: Send + Sync {
    fn lock_screen(&self) -> Result<(), ScreenLockError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemScreenLocker;

impl ScreenLocker for SystemScreenLocker {
    fn lock_screen(&self) -> Result<(), ScreenLockError> {
        let mut command = lock_command()?;
        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ScreenLockError::LockFailed(status.code().unwrap_or(-1)))
        }
    }
}

#[cfg(target_os = "macos")]
fn lock_command() -> Result<Command, ScreenLockError> {
    let mut command = Command::new("osascript");
    command.args([
        "-e",
        r#"tell application "System Events" to keystroke "q" using {control down, command down}"#,
    ]);
    Ok(command)
}

#[cfg(target_os = "linux")]
fn lock_command() -> Result<Command, ScreenLockError> {
    let mut command = Command::new("loginctl");
    command.arg("lock-session");
    Ok(command)
}

#[cfg(windows)]
fn lock_command() -> Result<Command, ScreenLockError> {
    let mut command = Command::new("rundll32.exe");
    command.arg("user32.dll,LockWorkStation");
    Ok(command)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", windows)))]
fn lock_command() -> Result<Command, ScreenLockError> {
    Err(ScreenLockError::Unsupported)
}
