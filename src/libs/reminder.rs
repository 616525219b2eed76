//! Periodic break reminders.
//!
//! [`ReminderScheduler`] wakes up every configured interval and, while the
//! tracker is in the `Working` state, shows a break prompt through a
//! [`ReminderPrompt`]. The prompt offers two choices: dismiss, or take a
//! break, which stops work the same way a manual stop does. An unanswered
//! prompt closes itself after `dismiss_after`.

use crate::libs::config::Settings;
use crate::libs::formatter::format_hours_minutes;
use crate::libs::messages::Message;
use crate::libs::status::TrackingState;
use crate::libs::tracker::Tracker;
use crate::{msg_debug, msg_info};
use chrono::Duration as ChronoDuration;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Close the prompt and keep working.
    Dismiss,
    TakeBreak,
}

/// Displays and hides the break prompt.
pub trait PromptPresenter: Send + Sync {
    /// `worked` is the day's worked time formatted as `H:MM`.
    fn present(&self, worked: &str);
    fn close(&self);
}

/// Writes the reminder to the terminal.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl PromptPresenter for ConsolePresenter {
    fn present(&self, worked: &str) {
        msg_info!(Message::BreakReminder(worked.to_string()));
    }

    fn close(&self) {
        msg_debug!(Message::BreakReminderClosed);
    }
}

struct Pending {
    id: u64,
    timer: JoinHandle<()>,
}

/// The single outstanding break prompt, if any.
pub struct ReminderPrompt {
    presenter: Arc<dyn PromptPresenter>,
    tracker: Arc<Tracker>,
    dismiss_after: Duration,
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
}

impl ReminderPrompt {
    pub fn new(presenter: Arc<dyn PromptPresenter>, tracker: Arc<Tracker>, dismiss_after: Duration) -> Self {
        ReminderPrompt {
            presenter,
            tracker,
            dismiss_after,
            pending: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    /// Shows a prompt, replacing the one still on screen along with its timer.
    pub fn show(self: &Arc<Self>, worked: ChronoDuration) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.timer.abort();
            self.presenter.close();
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.presenter.present(&format_hours_minutes(&worked));

        let prompt = Arc::clone(self);
        let dismiss_after = self.dismiss_after;
        let timer = tokio::spawn(async move {
            time::sleep(dismiss_after).await;
            prompt.expire(id);
        });
        *pending = Some(Pending { id, timer });
    }

    pub fn is_showing(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Applies the user's choice. Returns `false` if no prompt was showing.
    pub async fn respond(&self, choice: PromptChoice) -> bool {
        if !self.close_pending() {
            return false;
        }
        if choice == PromptChoice::TakeBreak {
            self.tracker.stop_work().await;
        }
        true
    }

    /// Closes the prompt without acting on it.
    pub fn dismiss(&self) {
        self.close_pending();
    }

    fn close_pending(&self) -> bool {
        let Some(pending) = self.pending.lock().take() else {
            return false;
        };
        pending.timer.abort();
        self.presenter.close();
        true
    }

    fn expire(&self, id: u64) {
        let mut pending = self.pending.lock();
        if pending.as_ref().map(|p| p.id) == Some(id) {
            pending.take();
            self.presenter.close();
            msg_debug!(Message::BreakReminderExpired);
        }
    }
}

pub struct ReminderScheduler {
    settings: Arc<dyn Settings>,
    tracker: Arc<Tracker>,
    prompt: Arc<ReminderPrompt>,
}

impl ReminderScheduler {
    pub fn new(settings: Arc<dyn Settings>, tracker: Arc<Tracker>, prompt: Arc<ReminderPrompt>) -> Self {
        ReminderScheduler { settings, tracker, prompt }
    }

    pub fn prompt(&self) -> &Arc<ReminderPrompt> {
        &self.prompt
    }

    /// Sleeps for the configured interval, re-read every cycle, then checks
    /// whether to remind. Stops when `shutdown` flips to `true` or its sender
    /// is dropped, closing any prompt still showing.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let minutes = self.settings.reminder_interval_minutes().max(1);
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                        continue;
                    }
                    _ = time::sleep(Duration::from_secs(minutes.saturating_mul(60))) => {}
                }
                self.check().await;
            }
            self.prompt.dismiss();
        })
    }

    /// Shows the prompt if reminders are on and the user is working.
    pub async fn check(&self) {
        if !self.settings.reminders_enabled() {
            return;
        }
        if self.tracker.state().await != TrackingState::Working {
            return;
        }
        let worked = self.tracker.snapshot().worked;
        self.prompt.show(worked);
    }
}
