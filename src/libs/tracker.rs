//! The work day state machine.
//!
//! [`Tracker`] turns three kinds of input into work and break sessions:
//!
//! - screen lock and unlock events ([`Tracker::handle_screen_event`]),
//! - periodic ticks that detect day rollover and the auto-stop hour ([`Tracker::tick`]),
//! - user commands ([`Tracker::start_work`], [`Tracker::stop_work`],
//!   [`Tracker::toggle_work`], [`Tracker::take_break`], [`Tracker::update_target_hours`]).
//!
//! | From              | Input                        | To          |
//! |-------------------|------------------------------|-------------|
//! | Idle, Completed   | start / toggle               | Working     |
//! | Working, OnBreak  | stop / toggle                | Idle        |
//! | Working, OnBreak  | screen locked                | OnBreak     |
//! | Idle, Working, OnBreak | screen unlocked         | Working     |
//! | Working, OnBreak  | tick past the auto-stop hour | Completed   |
//! | Working, OnBreak  | refresh with the goal reached | Completed  |
//! | any               | tick on a new calendar day   | Idle        |
//!
//! All mutations run under one async mutex, so an event, a tick and a user
//! command never interleave. After every mutation the derived statistics are
//! recomputed from the store and published as a [`Snapshot`] on a watch
//! channel.
//!
//! Store failures never escape: they are logged and the in-memory state is
//! left as it was.
//!
//! ## State reconciliation
//!
//! A refresh only adopts the active session kind found in the store while the
//! tracker is `Idle` (recovering after a restart). In any other state it only
//! checks whether the goal has been reached. A `stop_work` racing with an
//! in-flight refresh can therefore be undone by the next refresh if the store
//! still showed the session as open when it was read.

use crate::db::store::SessionStore;
use crate::db::workdays::WorkDay;
use crate::libs::clock::Clock;
use crate::libs::config::Settings;
use crate::libs::error::StorageError;
use crate::libs::messages::Message;
use crate::libs::screen::{ScreenEvent, ScreenLocker};
use crate::libs::status::{status_text, StatusColor, TrackingState};
use crate::libs::summary::DailySummary;
use crate::{msg_debug, msg_error, msg_warning};
use chrono::{Duration, NaiveDateTime, Timelike};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Identical screen events closer together than this are treated as duplicates.
pub const EVENT_DEDUP_WINDOW: Duration = Duration::seconds(2);

pub const DEFAULT_TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Everything a UI needs to render the current status.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: TrackingState,
    pub color: StatusColor,
    pub text: String,
    pub worked: Duration,
    pub remaining: Duration,
    /// Completed breaks only.
    pub break_count: usize,
    pub break_time: Duration,
    pub progress: f64,
    pub work_day: Option<WorkDay>,
}

#[derive(Debug, Clone, PartialEq)]
struct Stats {
    worked: Duration,
    remaining: Duration,
    break_count: usize,
    break_time: Duration,
    progress: f64,
}

impl Stats {
    fn empty(target_hours: f64) -> Self {
        Stats {
            worked: Duration::zero(),
            remaining: Duration::milliseconds((target_hours.max(0.0) * 3_600_000.0).round() as i64),
            break_count: 0,
            break_time: Duration::zero(),
            progress: 0.0,
        }
    }

    fn from_summary(summary: &DailySummary, now: NaiveDateTime) -> Self {
        Stats {
            worked: summary.worked(now),
            remaining: summary.remaining(now),
            break_count: summary.break_count(),
            break_time: summary.break_time(now),
            progress: summary.progress(now),
        }
    }
}

struct Inner {
    state: TrackingState,
    work_day: Option<WorkDay>,
    stats: Stats,
    last_event: Option<(ScreenEvent, NaiveDateTime)>,
    started: bool,
}

pub struct Tracker {
    store: Arc<dyn SessionStore>,
    settings: Arc<dyn Settings>,
    clock: Arc<dyn Clock>,
    locker: Arc<dyn ScreenLocker>,
    tick_interval: std::time::Duration,
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<Snapshot>,
}

fn log_failure(action: &str, err: &StorageError) {
    msg_error!(Message::TrackingActionFailed(action.to_string(), err.to_string()));
}

impl Tracker {
    pub fn new(
        store: Arc<dyn SessionStore>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
        locker: Arc<dyn ScreenLocker>,
    ) -> Self {
        let stats = Stats::empty(settings.target_hours());
        let inner = Inner {
            state: TrackingState::Idle,
            work_day: None,
            stats,
            last_event: None,
            started: false,
        };
        let (snapshot_tx, _) = watch::channel(Self::build_snapshot(&inner));
        Tracker {
            store,
            settings,
            clock,
            locker,
            tick_interval: DEFAULT_TICK_INTERVAL,
            inner: Mutex::new(inner),
            snapshot_tx,
        }
    }

    pub fn with_tick_interval(mut self, interval: std::time::Duration) -> Self {
        self.tick_interval = interval.max(std::time::Duration::from_secs(1));
        self
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Receives a new snapshot after every mutation, tick and refresh.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn state(&self) -> TrackingState {
        self.inner.lock().await.state
    }

    pub async fn work_day(&self) -> Option<WorkDay> {
        self.inner.lock().await.work_day.clone()
    }

    /// Ensures today's work day, recovers state from the store and starts
    /// working if nothing was in progress. Only the first call has an effect.
    pub async fn start(&self) {
        let mut inner = self.inner.lock().await;
        if inner.started {
            return;
        }
        inner.started = true;

        let now = self.clock.now();
        self.ensure_today(&mut inner, now);
        self.refresh(&mut inner, now);
        if inner.state == TrackingState::Idle {
            self.begin_work(&mut inner, now);
        }
        self.publish(&inner);
    }

    pub async fn start_work(&self) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        self.begin_work(&mut inner, now);
        self.publish(&inner);
    }

    pub async fn stop_work(&self) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        self.end_work(&mut inner, now);
        self.publish(&inner);
    }

    pub async fn toggle_work(&self) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        match inner.state {
            TrackingState::Idle | TrackingState::Completed => self.begin_work(&mut inner, now),
            TrackingState::Working | TrackingState::OnBreak => self.end_work(&mut inner, now),
        }
        self.publish(&inner);
    }

    /// Locks the screen so the resulting lock event starts the break. If the
    /// screen can't be locked the break is started directly.
    pub async fn take_break(&self) {
        if self.inner.lock().await.state != TrackingState::Working {
            msg_debug!(Message::BreakIgnoredNotWorking);
            return;
        }

        // The lock command may block and its lock event must not wait on us.
        let locker = self.locker.clone();
        let locked = match tokio::task::spawn_blocking(move || locker.lock_screen()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                msg_warning!(Message::ScreenLockFailed(e.to_string()));
                false
            }
            Err(e) => {
                msg_warning!(Message::ScreenLockFailed(e.to_string()));
                false
            }
        };
        if locked {
            return;
        }

        let mut inner = self.inner.lock().await;
        if inner.state != TrackingState::Working {
            return;
        }
        let now = self.clock.now();
        self.begin_break(&mut inner, now);
        self.publish(&inner);
    }

    /// Sets today's target without touching the tracking state.
    pub async fn update_target_hours(&self, hours: f64) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        let Some(day) = self.current_day(&mut inner, now) else {
            return;
        };
        if let Err(e) = self.store.update_target_hours(day.id, hours) {
            log_failure("update target hours", &e);
            return;
        }
        self.refresh(&mut inner, now);
        self.publish(&inner);
    }

    pub async fn handle_screen_event(&self, event: ScreenEvent) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();

        if let Some((last, at)) = inner.last_event {
            if last == event && now - at < EVENT_DEDUP_WINDOW {
                msg_debug!(Message::ScreenEventDuplicate(format!("{:?}", event)));
                return;
            }
        }
        inner.last_event = Some((event, now));

        if inner.work_day.is_none() {
            return;
        }

        match event {
            ScreenEvent::Locked => {
                if !inner.state.is_active() {
                    return;
                }
                self.begin_break(&mut inner, now);
            }
            ScreenEvent::Unlocked => {
                if inner.state == TrackingState::Completed {
                    return;
                }
                self.begin_work(&mut inner, now);
            }
        }
        self.publish(&inner);
    }

    /// Day rollover, auto-stop and a stats refresh.
    pub async fn tick(&self) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();

        match inner.work_day.clone() {
            Some(day) if day.date != now.date() => {
                msg_debug!(Message::DayRollover(day.date.to_string(), now.date().to_string()));
                self.end_work(&mut inner, now);
                inner.work_day = None;
                self.ensure_today(&mut inner, now);
            }
            Some(_) => {}
            None => self.ensure_today(&mut inner, now),
        }

        if self.settings.auto_stop_enabled() && inner.state.is_active() && now.hour() >= self.settings.auto_stop_hour() {
            msg_debug!(Message::AutoStopReached(self.settings.auto_stop_hour()));
            self.end_work(&mut inner, now);
            inner.state = TrackingState::Completed;
        }

        self.refresh(&mut inner, now);
        self.publish(&inner);
    }

    /// Recomputes statistics from the store.
    pub async fn refresh_stats(&self) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        self.refresh(&mut inner, now);
        self.publish(&inner);
    }

    /// Runs the tick loop and consumes screen events until `shutdown` flips
    /// to `true` or its sender is dropped.
    pub fn spawn(
        self: &Arc<Self>,
        mut events: mpsc::UnboundedReceiver<ScreenEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let tracker = Arc::clone(self);
        tokio::spawn(async move {
            tracker.start().await;

            let mut ticker = time::interval_at(Instant::now() + tracker.tick_interval, tracker.tick_interval);
            let mut events_open = true;

            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                    event = events.recv(), if events_open => match event {
                        Some(event) => tracker.handle_screen_event(event).await,
                        None => {
                            msg_debug!(Message::ScreenEventsEnded);
                            events_open = false;
                        }
                    },
                    _ = ticker.tick() => tracker.tick().await,
                }
            }
        })
    }

    fn current_day(&self, inner: &mut Inner, now: NaiveDateTime) -> Option<WorkDay> {
        if inner.work_day.is_none() {
            self.ensure_today(inner, now);
        }
        inner.work_day.clone()
    }

    fn ensure_today(&self, inner: &mut Inner, now: NaiveDateTime) {
        match self.store.ensure_work_day(now.date(), self.settings.target_hours()) {
            Ok(day) => inner.work_day = Some(day),
            Err(e) => log_failure("ensure work day", &e),
        }
    }

    fn begin_work(&self, inner: &mut Inner, now: NaiveDateTime) {
        let Some(day) = self.current_day(inner, now) else {
            return;
        };
        if let Err(e) = self.store.end_active_break_session(day.id, now) {
            log_failure("start work", &e);
            return;
        }
        if let Err(e) = self.store.start_work_session(day.id, now) {
            log_failure("start work", &e);
            return;
        }
        inner.state = TrackingState::Working;
        self.refresh(inner, now);
    }

    fn end_work(&self, inner: &mut Inner, now: NaiveDateTime) {
        let Some(day) = inner.work_day.clone() else {
            return;
        };
        if let Err(e) = self.store.end_active_work_session(day.id, now) {
            log_failure("stop work", &e);
            return;
        }
        if let Err(e) = self.store.end_active_break_session(day.id, now) {
            log_failure("stop work", &e);
            return;
        }
        inner.state = TrackingState::Idle;
        self.refresh(inner, now);
    }

    fn begin_break(&self, inner: &mut Inner, now: NaiveDateTime) {
        let Some(day) = self.current_day(inner, now) else {
            return;
        };
        if let Err(e) = self.store.end_active_work_session(day.id, now) {
            log_failure("start break", &e);
            return;
        }
        if let Err(e) = self.store.start_break_session(day.id, now) {
            log_failure("start break", &e);
            return;
        }
        inner.state = TrackingState::OnBreak;
        self.refresh(inner, now);
    }

    fn refresh(&self, inner: &mut Inner, now: NaiveDateTime) {
        let Some(day) = inner.work_day.clone() else {
            inner.stats = Stats::empty(self.settings.target_hours());
            inner.state = TrackingState::Idle;
            return;
        };

        let summary = match self.store.daily_summary(day.date) {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                inner.stats = Stats::empty(self.settings.target_hours());
                inner.state = TrackingState::Idle;
                return;
            }
            Err(e) => {
                log_failure("refresh stats", &e);
                return;
            }
        };

        inner.stats = Stats::from_summary(&summary, now);
        inner.work_day = Some(summary.work_day.clone());

        match inner.state {
            TrackingState::Idle => {
                if summary.is_on_break() {
                    inner.state = TrackingState::OnBreak;
                } else if summary.is_working() {
                    inner.state = TrackingState::Working;
                }
            }
            TrackingState::Completed => {}
            _ => {
                if inner.stats.worked > Duration::zero() && inner.stats.remaining <= Duration::zero() {
                    inner.state = TrackingState::Completed;
                }
            }
        }
    }

    fn build_snapshot(inner: &Inner) -> Snapshot {
        let stats = &inner.stats;
        Snapshot {
            state: inner.state,
            color: StatusColor::for_progress(stats.progress, inner.state),
            text: status_text(inner.state, stats.remaining),
            worked: stats.worked,
            remaining: stats.remaining,
            break_count: stats.break_count,
            break_time: stats.break_time,
            progress: stats.progress,
            work_day: inner.work_day.clone(),
        }
    }

    fn publish(&self, inner: &Inner) {
        self.snapshot_tx.send_replace(Self::build_snapshot(inner));
    }
}
