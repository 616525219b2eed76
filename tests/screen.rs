#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;
    use worktrack::libs::screen::{PollingScreenMonitor, ScreenEvent, ScreenEventSource};

    /// Probe that replays readings and then repeats the last one.
    fn scripted(readings: &[Option<bool>]) -> Arc<dyn Fn() -> Option<bool> + Send + Sync> {
        let queue = Mutex::new(readings.iter().copied().collect::<VecDeque<_>>());
        let last = Mutex::new(None);
        Arc::new(move || match queue.lock().pop_front() {
            Some(reading) => {
                *last.lock() = reading;
                reading
            }
            None => *last.lock(),
        })
    }

    async fn collect(monitor: &PollingScreenMonitor, polls: u64) -> Vec<ScreenEvent> {
        let mut rx = monitor.subscribe();
        tokio::time::sleep(Duration::from_millis(100 * polls + 50)).await;
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_reports_transitions_only() {
        let monitor = PollingScreenMonitor::with_probe(
            Duration::from_millis(100),
            scripted(&[Some(false), Some(false), Some(true), Some(true), Some(false)]),
        );
        let events = collect(&monitor, 6).await;
        assert_eq!(events, vec![ScreenEvent::Locked, ScreenEvent::Unlocked]);
    }

    #[tokio::test]
    async fn test_first_reading_is_baseline() {
        let monitor = PollingScreenMonitor::with_probe(Duration::from_millis(100), scripted(&[Some(true), Some(true)]));
        assert!(collect(&monitor, 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_state_is_skipped() {
        let monitor = PollingScreenMonitor::with_probe(
            Duration::from_millis(100),
            scripted(&[Some(false), None, None, Some(true)]),
        );
        let events = collect(&monitor, 5).await;
        assert_eq!(events, vec![ScreenEvent::Locked]);
    }
}
