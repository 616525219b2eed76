//! Display text for [`Message`].

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === AUTOSTART MESSAGES ===
            Message::AutostartEnabled => "Autostart has been enabled. Worktrack will start when you log in.".to_string(),
            Message::AutostartDisabled => "Autostart has been disabled.".to_string(),
            Message::AutostartAlreadyDisabled => "Autostart was already disabled.".to_string(),
            Message::AutostartEnableFailed(error) => format!("Failed to enable autostart: {}", error),
            Message::AutostartDisableFailed(error) => format!("Failed to disable autostart: {}", error),
            Message::AutostartStatus(status) => format!("Autostart is currently: {}", status),
            Message::HomeDirectoryNotFound => "Could not determine the home directory.".to_string(),
            Message::LoginItemFailed(error) => format!("Failed to update the login item: {}", error),

            // === WORKDAY MESSAGES ===
            Message::NoWorkdayToday => "No work tracked today yet.".to_string(),
            Message::NoWorkdaysFound => "No work days found.".to_string(),
            Message::WorkdayNotFoundForDate(date) => format!("No work day found for {}.", date),
            Message::RegisteredToggled(date, registered) => {
                if *registered {
                    format!("Work day {} marked as registered.", date)
                } else {
                    format!("Work day {} marked as not registered.", date)
                }
            }
            Message::TargetUpdated(hours) => format!("Daily target set to {:.1} hours.", hours),
            Message::InvalidTargetHours(value) => format!("Invalid target '{}': expected hours greater than 0 and at most 24.", value),

            // === TRACKING MESSAGES ===
            Message::StateChanged(state, text) => format!("{}: {}", state, text),
            Message::StatusLine(state, text, worked) => format!("{} | {} | worked {}", state, text, worked),
            Message::ProgressLine(percent) => format!("Progress: {}", percent),
            Message::TrackingActionFailed(action, error) => format!("Failed to {}: {}", action, error),
            Message::BreakIgnoredNotWorking => "Not working, break request ignored.".to_string(),
            Message::DayRollover(from, to) => format!("New day: closing {} and switching to {}.", from, to),
            Message::AutoStopReached(hour) => format!("Auto-stop hour {}:00 reached, day completed.", hour),

            // === SCREEN MESSAGES ===
            Message::ScreenEventDetected(event) => format!("Screen event: {}", event),
            Message::ScreenEventDuplicate(event) => format!("Ignoring repeated screen event: {}", event),
            Message::ScreenEventsEnded => "Screen event stream closed.".to_string(),
            Message::ScreenStateUnavailable => "Could not read the screen lock state.".to_string(),
            Message::ScreenLockFailed(error) => format!("Failed to lock the screen: {}", error),

            // === REMINDER MESSAGES ===
            Message::BreakReminder(worked) => format!(
                "You have worked {} today. Time for a break? Type 'take-break' or 'dismiss'.",
                worked
            ),
            Message::BreakReminderClosed => "Break reminder closed.".to_string(),
            Message::BreakReminderExpired => "Break reminder dismissed automatically.".to_string(),
            Message::NoReminderShowing => "No break reminder is showing.".to_string(),
            Message::RegistrationReminder(text) => format!("Reminder: {}", text),
            Message::GeneratedMessage(text) => text.clone(),
            Message::MessageServiceEmpty => "Message service returned an empty text.".to_string(),
            Message::MessageServiceFailed(error) => format!("Message service request failed: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully.".to_string(),
            Message::ConfigSaveError(error) => format!("Failed to save configuration: {}", error),
            Message::ConfigReloaded => "Configuration file changed, settings reloaded.".to_string(),
            Message::ConfigReloadFailed(error) => format!("Failed to reload configuration: {}", error),
            Message::ConfigModuleTracking => "Tracking".to_string(),
            Message::ConfigModuleReminder => "Break reminders".to_string(),
            Message::ConfigModuleMonitor => "Screen monitor".to_string(),
            Message::PromptTargetHours => "Target hours per day".to_string(),
            Message::PromptAutoStopEnabled => "Stop tracking automatically in the evening?".to_string(),
            Message::PromptAutoStopHour => "Auto-stop hour (0-23)".to_string(),
            Message::InvalidHour => "Hour must be between 0 and 23".to_string(),
            Message::PromptRegisterExternally => "Remind to register completed days externally?".to_string(),
            Message::PromptRemindersEnabled => "Enable break reminders?".to_string(),
            Message::PromptReminderInterval => "Reminder interval (minutes)".to_string(),
            Message::PromptPollInterval => "Screen lock poll interval (ms)".to_string(),
            Message::PromptLaunchAtLogin => "Start watching at login?".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date.".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version {}.", version),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s).", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed.".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatchStarted => "Watching screen activity. Commands: start, stop, toggle, break, target <hours>, status.".to_string(),
            Message::WatchStopped => "Watcher stopped.".to_string(),
            Message::WatchTaskPanicked(error) => format!("Watcher task failed: {}", error),
            Message::UnknownConsoleCommand(command) => format!("Unknown command '{}'.", command),
            Message::WatcherStarted(pid) => format!("Watcher started in the background (PID: {}).", pid),
            Message::WatcherStopped(pid) => format!("Watcher process (PID: {}) stopped successfully.", pid),
            Message::WatcherNotRunning => "Watcher is not running.".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})...", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Warning: Failed to stop existing watcher: {}", error),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Warning: Signal handling not supported on this platform".to_string(),
            Message::DaemonModeNotSupported => "Background mode is not supported on this platform.".to_string(),
            Message::InvalidPidFileContent => "PID file content is invalid.".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process, error code {}", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process, error code {}", code),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform.".to_string(),
        };
        write!(f, "{}", text)
    }
}
