//! Every user-facing message of the application.
//!
//! Text lives in [`display`](super::display); call sites only pick a variant
//! and pass its parameters.

#[derive(Debug, Clone)]
pub enum Message {
    // === AUTOSTART MESSAGES ===
    AutostartEnabled,
    AutostartDisabled,
    AutostartAlreadyDisabled,
    AutostartEnableFailed(String),
    AutostartDisableFailed(String),
    AutostartStatus(String),
    HomeDirectoryNotFound,
    LoginItemFailed(String),

    // === WORKDAY MESSAGES ===
    NoWorkdayToday,
    NoWorkdaysFound,
    WorkdayNotFoundForDate(String),
    RegisteredToggled(String, bool),
    TargetUpdated(f64),
    InvalidTargetHours(String),

    // === TRACKING MESSAGES ===
    StateChanged(String, String),
    StatusLine(String, String, String),
    ProgressLine(String),
    TrackingActionFailed(String, String),
    BreakIgnoredNotWorking,
    DayRollover(String, String),
    AutoStopReached(u32),

    // === SCREEN MESSAGES ===
    ScreenEventDetected(String),
    ScreenEventDuplicate(String),
    ScreenEventsEnded,
    ScreenStateUnavailable,
    ScreenLockFailed(String),

    // === REMINDER MESSAGES ===
    BreakReminder(String),
    BreakReminderClosed,
    BreakReminderExpired,
    NoReminderShowing,
    RegistrationReminder(String),
    GeneratedMessage(String),
    MessageServiceEmpty,
    MessageServiceFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigSaveError(String),
    ConfigReloaded,
    ConfigReloadFailed(String),
    ConfigModuleTracking,
    ConfigModuleReminder,
    ConfigModuleMonitor,
    PromptTargetHours,
    PromptAutoStopEnabled,
    PromptAutoStopHour,
    InvalidHour,
    PromptRegisterExternally,
    PromptRemindersEnabled,
    PromptReminderInterval,
    PromptPollInterval,
    PromptLaunchAtLogin,

    // === DATABASE MESSAGES ===
    DatabaseUpToDate,
    DatabaseVersion(u32),
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === WATCHER MESSAGES ===
    WatchStarted,
    WatchStopped,
    WatchTaskPanicked(String),
    UnknownConsoleCommand(String),
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherNotRunning,
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    DaemonModeNotSupported,
    InvalidPidFileContent,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),
    ProcessTerminationNotSupported,
}
