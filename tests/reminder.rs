#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;
    use worktrack::db::db::Db;
    use worktrack::db::store::SqliteStore;
    use worktrack::libs::clock::ManualClock;
    use worktrack::libs::config::{Config, Settings, SettingsStore};
    use worktrack::libs::error::ScreenLockError;
    use worktrack::libs::reminder::{PromptChoice, PromptPresenter, ReminderPrompt, ReminderScheduler};
    use worktrack::libs::screen::ScreenLocker;
    use worktrack::libs::status::TrackingState;
    use worktrack::libs::tracker::Tracker;

    #[derive(Default)]
    struct RecordingPresenter {
        shown: Mutex<Vec<String>>,
        closed: Mutex<usize>,
    }

    impl PromptPresenter for RecordingPresenter {
        fn present(&self, worked: &str) {
            self.shown.lock().push(worked.to_string());
        }

        fn close(&self) {
            *self.closed.lock() += 1;
        }
    }

    struct NoLocker;

    impl ScreenLocker for NoLocker {
        fn lock_screen(&self) -> Result<(), ScreenLockError> {
            Err(ScreenLockError::Unsupported)
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    struct Harness {
        tracker: Arc<Tracker>,
        settings: Arc<SettingsStore>,
        clock: Arc<ManualClock>,
        presenter: Arc<RecordingPresenter>,
        prompt: Arc<ReminderPrompt>,
    }

    impl Harness {
        fn new() -> Self {
            let mut config = Config::default();
            config.reminder.interval_minutes = 1;
            let settings = Arc::new(SettingsStore::in_memory(config));
            let clock = Arc::new(ManualClock::new(at(9, 0)));
            let tracker = Arc::new(Tracker::new(
                Arc::new(SqliteStore::new(Db::in_memory().unwrap())),
                settings.clone(),
                clock.clone(),
                Arc::new(NoLocker),
            ));
            let presenter = Arc::new(RecordingPresenter::default());
            let prompt = Arc::new(ReminderPrompt::new(presenter.clone(), tracker.clone(), Duration::from_secs(30)));
            Harness {
                tracker,
                settings,
                clock,
                presenter,
                prompt,
            }
        }

        fn scheduler(&self) -> ReminderScheduler {
            ReminderScheduler::new(self.settings.clone(), self.tracker.clone(), self.prompt.clone())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_shows_worked_time() {
        let h = Harness::new();
        h.prompt.show(chrono::Duration::minutes(125));

        assert!(h.prompt.is_showing());
        assert_eq!(*h.presenter.shown.lock(), vec!["2:05".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_prompt_closes_itself() {
        let h = Harness::new();
        h.prompt.show(chrono::Duration::minutes(60));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(h.prompt.is_showing());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!h.prompt.is_showing());
        assert_eq!(*h.presenter.closed.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_prompt_replaces_previous() {
        let h = Harness::new();
        h.prompt.show(chrono::Duration::minutes(60));
        tokio::time::sleep(Duration::from_secs(20)).await;
        h.prompt.show(chrono::Duration::minutes(61));
        assert_eq!(*h.presenter.closed.lock(), 1);

        // The first timer was cancelled, so the second prompt survives its deadline.
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert!(h.prompt.is_showing());

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!h.prompt.is_showing());
        assert_eq!(*h.presenter.closed.lock(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_break_stops_work() {
        let h = Harness::new();
        h.tracker.start_work().await;
        h.prompt.show(chrono::Duration::minutes(60));

        h.clock.set(at(10, 0));
        assert!(h.prompt.respond(PromptChoice::TakeBreak).await);
        assert_eq!(h.tracker.state().await, TrackingState::Idle);
        assert!(!h.prompt.is_showing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_keeps_working() {
        let h = Harness::new();
        h.tracker.start_work().await;
        h.prompt.show(chrono::Duration::minutes(60));

        assert!(h.prompt.respond(PromptChoice::Dismiss).await);
        assert_eq!(h.tracker.state().await, TrackingState::Working);
        assert!(!h.prompt.respond(PromptChoice::Dismiss).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_only_reminds_while_working() {
        let h = Harness::new();
        let scheduler = h.scheduler();

        scheduler.check().await;
        assert!(!h.prompt.is_showing());

        h.tracker.start_work().await;
        h.clock.set(at(10, 30));
        h.tracker.refresh_stats().await;
        scheduler.check().await;
        assert!(h.prompt.is_showing());
        assert_eq!(*h.presenter.shown.lock(), vec!["1:30".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_respects_disabled_reminders() {
        let h = Harness::new();
        h.tracker.start_work().await;
        h.settings.set_reminders_enabled(false);

        h.scheduler().check().await;
        assert!(!h.prompt.is_showing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_fires_every_interval() {
        let h = Harness::new();
        h.tracker.start_work().await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = h.scheduler().spawn(shutdown_rx);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(h.presenter.shown.lock().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(h.presenter.shown.lock().len(), 1);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
        assert!(!h.prompt.is_showing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_counts_as_one_minute() {
        let h = Harness::new();
        h.settings.set_reminder_interval_minutes(0);
        h.tracker.start_work().await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = h.scheduler().spawn(shutdown_rx);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(h.presenter.shown.lock().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(h.presenter.shown.lock().len(), 1);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_applies_to_next_cycle() {
        let h = Harness::new();
        h.tracker.start_work().await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = h.scheduler().spawn(shutdown_rx);

        tokio::time::sleep(Duration::from_secs(30)).await;
        h.settings.set_reminder_interval_minutes(2);

        // The running cycle keeps the interval it started with.
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(h.presenter.shown.lock().len(), 1);

        tokio::time::sleep(Duration::from_secs(118)).await;
        assert_eq!(h.presenter.shown.lock().len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(h.presenter.shown.lock().len(), 2);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_does_not_overflow() {
        let h = Harness::new();
        h.settings.set_reminder_interval_minutes(u64::MAX);
        h.tracker.start_work().await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = h.scheduler().spawn(shutdown_rx);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(h.presenter.shown.lock().is_empty());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
