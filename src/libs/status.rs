//! Tracking state and its presentation.

use crate::libs::data_storage::APP_NAME;
use crate::libs::formatter::format_hours_minutes;
use chrono::Duration;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingState {
    Idle,
    Working,
    OnBreak,
    Completed,
}

impl TrackingState {
    pub fn label(&self) -> &'static str {
        match self {
            TrackingState::Idle => "Not Working",
            TrackingState::Working => "Working",
            TrackingState::OnBreak => "On Break",
            TrackingState::Completed => "Day Complete",
        }
    }

    /// Working or on a break, i.e. the day is still being tracked.
    pub fn is_active(&self) -> bool {
        matches!(self, TrackingState::Working | TrackingState::OnBreak)
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Yellow,
    Green,
    Gray,
}

impl StatusColor {
    /// Progress band while active, gray otherwise.
    pub fn for_progress(progress: f64, state: TrackingState) -> Self {
        if !state.is_active() {
            return StatusColor::Gray;
        }
        Self::band(progress)
    }

    /// Red below half the target, yellow below 90%, green from there on.
    pub fn band(progress: f64) -> Self {
        if progress < 0.5 {
            StatusColor::Red
        } else if progress < 0.9 {
            StatusColor::Yellow
        } else {
            StatusColor::Green
        }
    }
}

/// Short status line shown next to the tray icon.
pub fn status_text(state: TrackingState, remaining: Duration) -> String {
    let left = || {
        if remaining > Duration::zero() {
            format!("{} left", format_hours_minutes(&remaining))
        } else {
            "Goal reached!".to_string()
        }
    };

    match state {
        TrackingState::Idle => APP_NAME.to_string(),
        TrackingState::Working => left(),
        TrackingState::OnBreak => format!("{} (break)", left()),
        TrackingState::Completed => "Day complete".to_string(),
    }
}
