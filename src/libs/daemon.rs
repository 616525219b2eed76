//! The `watch` process: tracker, screen monitor and reminders wired together.
//!
//! `watch` runs in the foreground until SIGINT/SIGTERM (Ctrl-C on Windows).
//! In the foreground it also accepts one command per line on stdin:
//!
//! | Command        | Effect                                |
//! |----------------|---------------------------------------|
//! | `start`        | start working                         |
//! | `stop`         | stop working                          |
//! | `toggle`       | start or stop, depending on the state |
//! | `break`        | lock the screen and start a break     |
//! | `target <h>`   | set today's target hours              |
//! | `take-break`   | answer the break reminder with a break |
//! | `dismiss`      | close the break reminder              |
//! | `status`       | print the current status line         |
//!
//! `watch --background` re-launches the binary detached from the terminal and
//! records its PID in `worktrack-watch.pid` in the data directory, which
//! `watch --stop` uses to terminate it.

use crate::db::db::Db;
use crate::db::store::SqliteStore;
use crate::libs::clock::SystemClock;
use crate::libs::config::{Settings, SettingsStore};
use crate::libs::data_storage::DataStorage;
use crate::libs::formatter::format_hours_minutes;
use crate::libs::messages::Message;
use crate::libs::motivation::{MessageGenerator, MessageKind};
use crate::libs::reminder::{ConsolePresenter, PromptChoice, ReminderPrompt, ReminderScheduler};
use crate::libs::screen::{PollingScreenMonitor, ScreenEventSource, SystemScreenLocker};
use crate::libs::status::TrackingState;
use crate::libs::tracker::Tracker;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const PID_FILE: &str = "worktrack-watch.pid";

/// Runs the tracker until a termination signal arrives.
pub async fn run_with_signal_handling() -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => msg_info!(Message::WatcherReceivedSigterm),
                _ = sigint.recv() => msg_info!(Message::WatcherReceivedSigint),
            }
            let _ = shutdown_tx.send(true);
        });
    }

    #[cfg(windows)]
    {
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => msg_info!(Message::WatcherReceivedCtrlC),
                Err(e) => msg_error!(Message::WatcherCtrlCListenFailed(e.to_string())),
            }
            let _ = shutdown_tx.send(true);
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
    }

    let result = run_tracking(shutdown_rx).await;
    drop(shutdown_tx);

    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if pid_path.exists() {
        let _ = std::fs::remove_file(&pid_path);
    }

    result
}

/// Builds every component from the on-disk configuration and runs them
/// until `shutdown` flips to `true`.
pub async fn run_tracking(shutdown: watch::Receiver<bool>) -> Result<()> {
    let settings = Arc::new(SettingsStore::load()?);
    let config = settings.config();

    // Without a usable database there is nothing to track.
    let store = Arc::new(SqliteStore::new(Db::new()?));

    let tracker = Arc::new(
        Tracker::new(store, settings.clone(), Arc::new(SystemClock), Arc::new(SystemScreenLocker))
            .with_tick_interval(Duration::from_secs(config.tracking.tick_interval)),
    );
    let monitor = PollingScreenMonitor::new(&config.monitor);
    let prompt = Arc::new(ReminderPrompt::new(
        Arc::new(ConsolePresenter),
        tracker.clone(),
        Duration::from_secs(config.reminder.dismiss_after),
    ));
    let scheduler = ReminderScheduler::new(settings.clone(), tracker.clone(), prompt.clone());
    let messages = MessageGenerator::new(config.messages.clone());

    msg_info!(Message::WatchStarted);

    let announcer = spawn_announcer(tracker.clone(), settings.clone(), messages, shutdown.clone());
    let console = spawn_console_commands(tracker.clone(), prompt, shutdown.clone());
    let tracking = tracker.spawn(monitor.subscribe(), shutdown.clone());
    let reminders = scheduler.spawn(shutdown);

    let (announcer, console, tracking, reminders) = tokio::join!(announcer, console, tracking, reminders);
    for result in [announcer, console, tracking, reminders] {
        if let Err(e) = result {
            msg_error!(Message::WatchTaskPanicked(e.to_string()));
        }
    }

    msg_info!(Message::WatchStopped);
    Ok(())
}

/// Reports state changes and, when the day completes with the goal reached,
/// reminds the user to register the hours.
fn spawn_announcer(
    tracker: Arc<Tracker>,
    settings: Arc<SettingsStore>,
    messages: MessageGenerator,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let mut snapshots = tracker.subscribe();
    tokio::spawn(async move {
        let mut last_state = snapshots.borrow().state;
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = snapshots.borrow_and_update().clone();
                    if snapshot.state == last_state {
                        continue;
                    }
                    last_state = snapshot.state;
                    msg_info!(Message::StateChanged(snapshot.state.label().to_string(), snapshot.text.clone()));

                    let kind = MessageKind::for_progress(snapshot.progress, settings.register_externally_enabled());
                    if snapshot.state == TrackingState::Completed && kind == MessageKind::RegistrationReminder {
                        let text = messages.generate(kind).await;
                        msg_info!(Message::RegistrationReminder(text));
                    }
                }
            }
        }
    })
}

/// Reads stdin on its own thread so a pending read never holds up shutdown.
fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn spawn_console_commands(
    tracker: Arc<Tracker>,
    prompt: Arc<ReminderPrompt>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let mut lines = stdin_lines();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                line = lines.recv() => match line {
                    Some(line) => run_console_command(&tracker, &prompt, line.trim()).await,
                    None => break,
                },
            }
        }
    })
}

async fn run_console_command(tracker: &Tracker, prompt: &ReminderPrompt, line: &str) {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) => {}
        (Some("start"), _) => tracker.start_work().await,
        (Some("stop"), _) => tracker.stop_work().await,
        (Some("toggle"), _) => tracker.toggle_work().await,
        (Some("break"), _) => tracker.take_break().await,
        (Some("target"), Some(hours)) => match hours.parse::<f64>() {
            Ok(hours) if hours > 0.0 && hours <= 24.0 => tracker.update_target_hours(hours).await,
            _ => msg_warning!(Message::InvalidTargetHours(hours.to_string())),
        },
        (Some("take-break"), _) => {
            if !prompt.respond(PromptChoice::TakeBreak).await {
                msg_warning!(Message::NoReminderShowing);
            }
        }
        (Some("dismiss"), _) => {
            if !prompt.respond(PromptChoice::Dismiss).await {
                msg_warning!(Message::NoReminderShowing);
            }
        }
        (Some("status"), _) => {
            let snapshot = tracker.snapshot();
            msg_print!(Message::StatusLine(
                snapshot.state.label().to_string(),
                snapshot.text,
                format_hours_minutes(&snapshot.worked),
            ));
        }
        (Some(other), _) => msg_warning!(Message::UnknownConsoleCommand(other.to_string())),
    }
}

/// Starts a detached `worktrack watch`, replacing one that is already running.
pub fn spawn() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_internal() {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                let _ = std::fs::remove_file(&pid_path);
            }
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    let current_exe = std::env::current_exe()?;
    let mut command = std::process::Command::new(current_exe);
    command
        .arg("watch")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    let child = command.spawn()?;
    let pid = child.id();
    std::fs::write(pid_path, pid.to_string())?;
    msg_info!(Message::WatcherStarted(pid));

    Ok(())
}

pub fn stop() -> Result<()> {
    if !stop_internal()? {
        msg_info!(Message::WatcherNotRunning);
    }
    Ok(())
}

/// Returns `false` when no watcher was running.
fn stop_internal() -> Result<bool> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        return Ok(false);
    }

    let pid_str = std::fs::read_to_string(&pid_path)?;
    let pid: u32 = pid_str.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))?;

    let killed = kill_process(pid)?;
    std::fs::remove_file(pid_path)?;

    if killed {
        msg_info!(Message::WatcherStopped(pid));
    }
    Ok(killed)
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    // SAFETY: the handle is checked for null and closed on every path.
    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            // ERROR_INVALID_PARAMETER: no such process
            if error == 87 {
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            msg_bail_anyhow!(Message::FailedToTerminateProcess(GetLastError()));
        }
        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use std::process::Command;

    let alive = |pid: u32| -> Result<bool> { Ok(Command::new("ps").arg("-p").arg(pid.to_string()).output()?.status.success()) };

    if !alive(pid)? {
        return Ok(false);
    }

    Command::new("kill").arg("-TERM").arg(pid.to_string()).output()?;

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        if !alive(pid)? {
            return Ok(true);
        }
    }

    Command::new("kill").arg("-9").arg(pid.to_string()).output()?;
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
