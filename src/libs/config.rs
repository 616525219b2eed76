//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory. The file
//! is optional: a missing file, or a file missing whole sections, falls back to
//! the defaults below.
//!
//! ```json
//! {
//!   "tracking": {
//!     "target_hours": 8.0,
//!     "auto_stop_enabled": false,
//!     "auto_stop_hour": 20,
//!     "register_externally": true,
//!     "tick_interval": 60
//!   },
//!   "reminder": { "enabled": true, "interval_minutes": 60, "dismiss_after": 30 },
//!   "monitor": { "poll_interval": 2000 },
//!   "messages": { "api_url": "https://example.com/messages", "auth_token": "..." },
//!   "launch_at_login": false
//! }
//! ```
//!
//! Long-running components never read the file directly. They go through the
//! [`Settings`] trait, implemented by [`SettingsStore`], which keeps the
//! current values in memory, writes them back on every change and picks up
//! edits made by other processes (`init`, `target`, `autostart`) as soon as
//! the file's modification time or size changes.

use super::data_storage::DataStorage;
use crate::db::workdays::DEFAULT_TARGET_HOURS;
use crate::libs::autostart;
use crate::libs::messages::Message;
use crate::libs::reminder::DEFAULT_DISMISS_AFTER;
use crate::{msg_debug, msg_error, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Daily goal and automatic end-of-day behavior.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Default target for newly created work days.
    pub target_hours: f64,
    pub auto_stop_enabled: bool,
    /// Local hour (0-23) from which an active day is closed automatically.
    pub auto_stop_hour: u32,
    /// Remind the user to register the day's hours once the goal is reached.
    pub register_externally: bool,
    /// Seconds between tracker ticks.
    pub tick_interval: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub interval_minutes: u64,
    /// Seconds before an unanswered break prompt closes itself.
    pub dismiss_after: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Milliseconds between screen lock state probes.
    pub poll_interval: u64,
}

/// Remote endpoint for motivational and reminder texts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MessagesConfig {
    pub api_url: String,
    #[serde(default)]
    pub auth_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tracking: TrackingConfig,
    pub reminder: ReminderConfig,
    pub monitor: MonitorConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<MessagesConfig>,
    pub launch_at_login: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            target_hours: DEFAULT_TARGET_HOURS,
            auto_stop_enabled: false,
            auto_stop_hour: 20,
            register_externally: true,
            tick_interval: 60,
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            enabled: true,
            interval_minutes: 60,
            dismiss_after: DEFAULT_DISMISS_AFTER.as_secs(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig { poll_interval: 2000 }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads the configuration file, or returns defaults if there is none.
    pub fn read() -> Result<Config> {
        Self::read_from(Self::path()?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path()?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive wizard that walks through every setting, starting from the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleTracking);
        let tracking = TrackingConfig {
            target_hours: Input::with_theme(&theme)
                .with_prompt(Message::PromptTargetHours.to_string())
                .default(current.tracking.target_hours)
                .interact_text()?,
            auto_stop_enabled: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptAutoStopEnabled.to_string())
                .default(current.tracking.auto_stop_enabled)
                .interact()?,
            auto_stop_hour: Input::with_theme(&theme)
                .with_prompt(Message::PromptAutoStopHour.to_string())
                .default(current.tracking.auto_stop_hour)
                .validate_with(|hour: &u32| if *hour < 24 { Ok(()) } else { Err(Message::InvalidHour.to_string()) })
                .interact_text()?,
            register_externally: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptRegisterExternally.to_string())
                .default(current.tracking.register_externally)
                .interact()?,
            tick_interval: current.tracking.tick_interval,
        };

        msg_print!(Message::ConfigModuleReminder);
        let reminder = ReminderConfig {
            enabled: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptRemindersEnabled.to_string())
                .default(current.reminder.enabled)
                .interact()?,
            interval_minutes: Input::with_theme(&theme)
                .with_prompt(Message::PromptReminderInterval.to_string())
                .default(current.reminder.interval_minutes)
                .interact_text()?,
            dismiss_after: current.reminder.dismiss_after,
        };

        msg_print!(Message::ConfigModuleMonitor);
        let monitor = MonitorConfig {
            poll_interval: Input::with_theme(&theme)
                .with_prompt(Message::PromptPollInterval.to_string())
                .default(current.monitor.poll_interval)
                .interact_text()?,
        };

        let launch_at_login = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptLaunchAtLogin.to_string())
            .default(current.launch_at_login)
            .interact()?;

        Ok(Config {
            tracking,
            reminder,
            monitor,
            messages: current.messages,
            launch_at_login,
        })
    }
}

/// Synchronous access to the user-editable settings.
pub trait Settings: Send + Sync {
    fn target_hours(&self) -> f64;
    fn set_target_hours(&self, hours: f64);

    fn reminders_enabled(&self) -> bool;
    fn set_reminders_enabled(&self, enabled: bool);

    fn reminder_interval_minutes(&self) -> u64;
    fn set_reminder_interval_minutes(&self, minutes: u64);

    fn auto_stop_enabled(&self) -> bool;
    fn set_auto_stop_enabled(&self, enabled: bool);

    fn auto_stop_hour(&self) -> u32;
    fn set_auto_stop_hour(&self, hour: u32);

    fn register_externally_enabled(&self) -> bool;
    fn set_register_externally_enabled(&self, enabled: bool);

    fn launch_at_login(&self) -> bool;
    /// Also registers or removes the OS login item.
    fn set_launch_at_login(&self, enabled: bool);
}

type LoginItemHook = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

/// [`Settings`] backed by a [`Config`] held in memory.
///
/// A file-backed store rewrites `config.json` after every change; an
/// in-memory store only keeps the values for the lifetime of the process.
/// Write failures are logged and the in-memory value is kept.
pub struct SettingsStore {
    config: RwLock<Config>,
    path: Option<PathBuf>,
    /// Stamp of the file version held in `config`.
    stamp: Mutex<Option<FileStamp>>,
    login_item: LoginItemHook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl FileStamp {
    fn of(path: &Path) -> Option<FileStamp> {
        let meta = fs::metadata(path).ok()?;
        Some(FileStamp {
            modified: meta.modified().ok()?,
            len: meta.len(),
        })
    }
}

impl SettingsStore {
    /// Loads the configuration from the data directory.
    pub fn load() -> Result<Self> {
        let path = Config::path()?;
        Self::load_from(path)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stamp = FileStamp::of(&path);
        let config = Config::read_from(&path)?;
        Ok(SettingsStore {
            config: RwLock::new(config),
            path: Some(path),
            stamp: Mutex::new(stamp),
            login_item: Box::new(apply_login_item),
        })
    }

    pub fn in_memory(config: Config) -> Self {
        SettingsStore {
            config: RwLock::new(config),
            path: None,
            stamp: Mutex::new(None),
            login_item: Box::new(|_| Ok(())),
        }
    }

    /// Replaces the login item side effect.
    pub fn with_login_item(mut self, hook: impl Fn(bool) -> Result<()> + Send + Sync + 'static) -> Self {
        self.login_item = Box::new(hook);
        self
    }

    /// Copy of the full configuration.
    pub fn config(&self) -> Config {
        self.current().clone()
    }

    fn current(&self) -> RwLockReadGuard<'_, Config> {
        self.reload_if_changed(&mut self.stamp.lock());
        self.config.read()
    }

    /// Re-reads the file when it changed since it was last loaded or written.
    /// An unreadable file keeps the previous values and is retried on the next call.
    fn reload_if_changed(&self, seen: &mut Option<FileStamp>) {
        let Some(path) = &self.path else {
            return;
        };
        let stamp = FileStamp::of(path);
        if *seen == stamp {
            return;
        }
        match Config::read_from(path) {
            Ok(config) => {
                *self.config.write() = config;
                *seen = stamp;
                msg_debug!(Message::ConfigReloaded);
            }
            Err(e) => msg_debug!(Message::ConfigReloadFailed(e.to_string())),
        }
    }

    fn update(&self, f: impl FnOnce(&mut Config)) {
        let mut seen = self.stamp.lock();
        self.reload_if_changed(&mut seen);
        let snapshot = {
            let mut config = self.config.write();
            f(&mut config);
            config.clone()
        };
        if let Some(path) = &self.path {
            match snapshot.save_to(path) {
                Ok(()) => *seen = FileStamp::of(path),
                Err(e) => msg_error!(Message::ConfigSaveError(e.to_string())),
            }
        }
    }
}

fn apply_login_item(enabled: bool) -> Result<()> {
    if enabled {
        autostart::enable()
    } else {
        autostart::disable()
    }
}

impl Settings for SettingsStore {
    fn target_hours(&self) -> f64 {
        self.current().tracking.target_hours
    }

    fn set_target_hours(&self, hours: f64) {
        self.update(|c| c.tracking.target_hours = hours);
    }

    fn reminders_enabled(&self) -> bool {
        self.current().reminder.enabled
    }

    fn set_reminders_enabled(&self, enabled: bool) {
        self.update(|c| c.reminder.enabled = enabled);
    }

    fn reminder_interval_minutes(&self) -> u64 {
        self.current().reminder.interval_minutes
    }

    fn set_reminder_interval_minutes(&self, minutes: u64) {
        self.update(|c| c.reminder.interval_minutes = minutes);
    }

    fn auto_stop_enabled(&self) -> bool {
        self.current().tracking.auto_stop_enabled
    }

    fn set_auto_stop_enabled(&self, enabled: bool) {
        self.update(|c| c.tracking.auto_stop_enabled = enabled);
    }

    fn auto_stop_hour(&self) -> u32 {
        self.current().tracking.auto_stop_hour
    }

    fn set_auto_stop_hour(&self, hour: u32) {
        self.update(|c| c.tracking.auto_stop_hour = hour.min(23));
    }

    fn register_externally_enabled(&self) -> bool {
        self.current().tracking.register_externally
    }

    fn set_register_externally_enabled(&self, enabled: bool) {
        self.update(|c| c.tracking.register_externally = enabled);
    }

    fn launch_at_login(&self) -> bool {
        self.current().launch_at_login
    }

    fn set_launch_at_login(&self, enabled: bool) {
        self.update(|c| c.launch_at_login = enabled);
        if let Err(e) = (self.login_item)(enabled) {
            msg_error!(Message::LoginItemFailed(e.to_string()));
        }
    }
}
