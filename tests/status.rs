#[cfg(test)]
mod tests {
    use chrono::Duration;
    use worktrack::libs::status::{status_text, StatusColor, TrackingState};

    #[test]
    fn test_labels() {
        assert_eq!(TrackingState::Idle.label(), "Not Working");
        assert_eq!(TrackingState::Working.to_string(), "Working");
        assert_eq!(TrackingState::OnBreak.label(), "On Break");
        assert_eq!(TrackingState::Completed.label(), "Day Complete");
    }

    #[test]
    fn test_active_states() {
        assert!(TrackingState::Working.is_active());
        assert!(TrackingState::OnBreak.is_active());
        assert!(!TrackingState::Idle.is_active());
        assert!(!TrackingState::Completed.is_active());
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(StatusColor::band(0.0), StatusColor::Red);
        assert_eq!(StatusColor::band(0.49), StatusColor::Red);
        assert_eq!(StatusColor::band(0.5), StatusColor::Yellow);
        assert_eq!(StatusColor::band(0.89), StatusColor::Yellow);
        assert_eq!(StatusColor::band(0.9), StatusColor::Green);
        assert_eq!(StatusColor::band(1.4), StatusColor::Green);
    }

    #[test]
    fn test_inactive_states_are_gray() {
        assert_eq!(StatusColor::for_progress(0.95, TrackingState::Idle), StatusColor::Gray);
        assert_eq!(StatusColor::for_progress(1.0, TrackingState::Completed), StatusColor::Gray);
        assert_eq!(StatusColor::for_progress(0.95, TrackingState::OnBreak), StatusColor::Green);
        assert_eq!(StatusColor::for_progress(0.2, TrackingState::Working), StatusColor::Red);
    }

    #[test]
    fn test_status_text() {
        let left = Duration::minutes(185);
        assert_eq!(status_text(TrackingState::Idle, left), "worktrack");
        assert_eq!(status_text(TrackingState::Working, left), "3:05 left");
        assert_eq!(status_text(TrackingState::OnBreak, left), "3:05 left (break)");
        assert_eq!(status_text(TrackingState::Working, Duration::zero()), "Goal reached!");
        assert_eq!(status_text(TrackingState::OnBreak, Duration::zero()), "Goal reached! (break)");
        assert_eq!(status_text(TrackingState::Completed, left), "Day complete");
    }
}
