use anyhow::{Context, Result};

use crate::scheduling::mailer::SmtpSettings;

/// Application configuration loaded from environment variables once at startup.
/// Collaborators receive the pieces they need from here; nothing re-reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables summaries (and, with `enable_llm_entities`, entity recognition).
    pub anthropic_api_key: Option<String>,
    pub enable_llm_entities: bool,
    pub google_calendar_token: Option<String>,
    pub calendar_id: String,
    pub interview_timezone: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub from_name: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            enable_llm_entities: parse_bool(&env_or("ENABLE_LLM_ENTITIES", "false")),
            google_calendar_token: optional_env("GOOGLE_CALENDAR_TOKEN"),
            calendar_id: env_or("CALENDAR_ID", "primary"),
            interview_timezone: env_or("INTERVIEW_TIMEZONE", "Asia/Kolkata"),
            smtp_server: env_or("SMTP_SERVER", "smtp.gmail.com"),
            smtp_port: env_or("SMTP_PORT", "587")
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            smtp_user: optional_env("SMTP_USER"),
            smtp_pass: optional_env("SMTP_PASS"),
            from_name: env_or("FROM_NAME", "HR Team"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "20971520")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }

    /// SMTP settings, or `None` when the user or password is missing.
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        match (&self.smtp_user, &self.smtp_pass) {
            (Some(user), Some(pass)) => Some(SmtpSettings {
                server: self.smtp_server.clone(),
                port: self.smtp_port,
                username: user.clone(),
                password: pass.clone(),
                from_name: self.from_name.clone(),
            }),
            _ => None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
