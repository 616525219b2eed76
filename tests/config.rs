#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use worktrack::libs::config::{Config, MessagesConfig, Settings, SettingsStore};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("config.json");
            ConfigTestContext {
                _temp_dir: temp_dir,
                path,
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tracking.target_hours, 8.0);
        assert!(!config.tracking.auto_stop_enabled);
        assert_eq!(config.tracking.auto_stop_hour, 20);
        assert!(config.tracking.register_externally);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.interval_minutes, 60);
        assert_eq!(config.monitor.poll_interval, 2000);
        assert!(config.messages.is_none());
        assert!(!config.launch_at_login);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_defaults(ctx: &mut ConfigTestContext) {
        assert_eq!(Config::read_from(&ctx.path).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.tracking.target_hours = 6.5;
        config.reminder.interval_minutes = 45;
        config.messages = Some(MessagesConfig {
            api_url: "https://api.example.com/messages".to_string(),
            auth_token: "token123".to_string(),
        });
        config.save_to(&ctx.path).unwrap();

        assert_eq!(Config::read_from(&ctx.path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, r#"{ "tracking": { "target_hours": 7.0 }, "launch_at_login": true }"#).unwrap();

        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config.tracking.target_hours, 7.0);
        assert_eq!(config.tracking.auto_stop_hour, 20);
        assert!(config.reminder.enabled);
        assert!(config.launch_at_login);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_file_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "not json").unwrap();
        assert!(Config::read_from(&ctx.path).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_settings_store_persists_changes(ctx: &mut ConfigTestContext) {
        let settings = SettingsStore::load_from(&ctx.path).unwrap();
        settings.set_target_hours(6.0);
        settings.set_reminders_enabled(false);
        settings.set_reminder_interval_minutes(90);
        settings.set_auto_stop_enabled(true);
        settings.set_register_externally_enabled(false);

        let reloaded = SettingsStore::load_from(&ctx.path).unwrap();
        assert_eq!(reloaded.target_hours(), 6.0);
        assert!(!reloaded.reminders_enabled());
        assert_eq!(reloaded.reminder_interval_minutes(), 90);
        assert!(reloaded.auto_stop_enabled());
        assert!(!reloaded.register_externally_enabled());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_settings_store_picks_up_external_edits(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.path).unwrap();
        let settings = SettingsStore::load_from(&ctx.path).unwrap();
        assert_eq!(settings.reminder_interval_minutes(), 60);

        let mut edited = Config::default();
        edited.reminder.interval_minutes = 5;
        edited.tracking.target_hours = 6.0;
        edited.tracking.auto_stop_enabled = true;
        edited.save_to(&ctx.path).unwrap();

        assert_eq!(settings.reminder_interval_minutes(), 5);
        assert_eq!(settings.target_hours(), 6.0);
        assert!(settings.auto_stop_enabled());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_set_keeps_external_edits(ctx: &mut ConfigTestContext) {
        let settings = SettingsStore::load_from(&ctx.path).unwrap();

        let mut edited = Config::default();
        edited.reminder.interval_minutes = 15;
        edited.save_to(&ctx.path).unwrap();

        settings.set_reminders_enabled(false);

        let on_disk = Config::read_from(&ctx.path).unwrap();
        assert_eq!(on_disk.reminder.interval_minutes, 15);
        assert!(!on_disk.reminder.enabled);
        assert_eq!(settings.reminder_interval_minutes(), 15);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_broken_file_keeps_last_values(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.reminder.interval_minutes = 45;
        config.save_to(&ctx.path).unwrap();
        let settings = SettingsStore::load_from(&ctx.path).unwrap();

        std::fs::write(&ctx.path, "{ not json").unwrap();
        assert_eq!(settings.reminder_interval_minutes(), 45);

        config.reminder.interval_minutes = 120;
        config.save_to(&ctx.path).unwrap();
        assert_eq!(settings.reminder_interval_minutes(), 120);
    }

    #[test]
    fn test_auto_stop_hour_is_clamped() {
        let settings = SettingsStore::in_memory(Config::default());
        settings.set_auto_stop_hour(30);
        assert_eq!(settings.auto_stop_hour(), 23);
        settings.set_auto_stop_hour(7);
        assert_eq!(settings.auto_stop_hour(), 7);
    }

    #[test]
    fn test_launch_at_login_calls_hook() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let settings = SettingsStore::in_memory(Config::default()).with_login_item(move |enabled| {
            recorded.lock().push(enabled);
            Ok(())
        });

        settings.set_launch_at_login(true);
        settings.set_launch_at_login(false);
        assert_eq!(*calls.lock(), vec![true, false]);
        assert!(!settings.launch_at_login());
    }

    #[test]
    fn test_failing_hook_keeps_value() {
        let settings = SettingsStore::in_memory(Config::default()).with_login_item(|_| Err(anyhow::anyhow!("no login items")));
        settings.set_launch_at_login(true);
        assert!(settings.launch_at_login());
        assert!(settings.config().launch_at_login);
    }
}
