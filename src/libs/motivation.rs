//! Short texts shown alongside the day's status.
//!
//! [`MessageGenerator::generate`] asks the configured HTTP endpoint for a
//! fresh text and falls back to a random entry from a built-in pool when no
//! endpoint is configured, the request fails, or the reply is empty. It never
//! returns an error.

use crate::libs::config::MessagesConfig;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    Motivational,
    RegistrationReminder,
}

impl MessageKind {
    /// The registration reminder replaces the motivational text once the
    /// goal is reached, if the user asked to be reminded.
    pub fn for_progress(progress: f64, register_externally: bool) -> Self {
        if register_externally && progress >= 1.0 {
            MessageKind::RegistrationReminder
        } else {
            MessageKind::Motivational
        }
    }
}

#[derive(Serialize)]
struct MessageRequest {
    kind: MessageKind,
}

#[derive(Deserialize)]
struct MessageResponse {
    text: String,
}

pub struct MessageGenerator {
    client: Client,
    endpoint: Option<MessagesConfig>,
}

impl MessageGenerator {
    pub fn new(endpoint: Option<MessagesConfig>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.filter(|e| !e.api_url.trim().is_empty()),
        }
    }

    /// Pool-only generator.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub async fn generate(&self, kind: MessageKind) -> String {
        if let Some(endpoint) = &self.endpoint {
            match self.fetch(endpoint, kind).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => msg_debug!(Message::MessageServiceEmpty),
                Err(e) => msg_debug!(Message::MessageServiceFailed(e.to_string())),
            }
        }
        fallback_message(kind).to_string()
    }

    async fn fetch(&self, endpoint: &MessagesConfig, kind: MessageKind) -> Result<String> {
        let mut request = self
            .client
            .post(&endpoint.api_url)
            .timeout(REQUEST_TIMEOUT)
            .json(&MessageRequest { kind });
        if !endpoint.auth_token.is_empty() {
            request = request.bearer_auth(&endpoint.auth_token);
        }

        let response = request.send().await?.error_for_status()?;
        let body: MessageResponse = response.json().await?;
        Ok(body.text)
    }
}

/// Random entry from the built-in pool for `kind`.
pub fn fallback_message(kind: MessageKind) -> &'static str {
    let pool = match kind {
        MessageKind::Motivational => MOTIVATIONAL,
        MessageKind::RegistrationReminder => REGISTRATION_REMINDERS,
    };
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or(pool[0])
}

pub const MOTIVATIONAL: &[&str] = &[
    "Small consistent efforts compound into remarkable achievements over time.",
    "Your focus today builds the foundation for tomorrow's success.",
    "Take a moment to appreciate how far you've come this week.",
    "Progress, not perfection, is what drives meaningful change.",
    "The best work happens when you balance intensity with rest.",
    "Every hour of focused work is an investment in your future self.",
    "Remember: sustainable pace beats burnout every single time.",
    "Your dedication today is writing the story of your career.",
    "Deep work requires deep rest. Honor both equally.",
    "The most productive people know when to stop and recharge.",
    "Your attention is your most valuable resource. Spend it wisely.",
    "Great ideas need space to breathe. Take breaks without guilt.",
    "Consistency over intensity. Show up every day and the results follow.",
    "You are building something meaningful, one focused session at a time.",
    "The quality of your rest determines the quality of your work.",
    "Trust the process. Each day adds another layer to your expertise.",
    "Working smart means knowing when to push and when to pause.",
    "Your future self will thank you for the boundaries you set today.",
    "Excellence is a habit, not an act. Keep showing up.",
    "The rhythm of work and rest creates the music of achievement.",
];

pub const REGISTRATION_REMINDERS: &[&str] = &[
    "Great work today! Don't forget to register your completed hours in your time tracking system.",
    "You've hit your daily goal! Remember to log these hours in your external system before signing off.",
    "Excellent job reaching your target! Time to register your work hours for the day.",
    "Daily target achieved! Make sure to record your completed hours in your tracking system.",
    "Well done on completing your work goal! Don't forget to update your time logs.",
    "Target hours reached! Remember to register today's work in your external tracking system.",
    "Success! You've completed your daily hours. Time to log them in your system.",
    "Fantastic work today! Please remember to register your hours externally.",
    "You've met your daily goal! Don't forget to document your hours in the tracking system.",
    "Great day of work! Make sure to register your completed hours before you finish.",
];
