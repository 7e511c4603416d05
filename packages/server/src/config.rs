use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mollie_api_key: String,
    /// Optional: without it confirmation emails are disabled (bookings still record)
    pub resend_api_key: Option<String>,
    /// Externally reachable base URL, used to build webhook and redirect URLs
    pub public_base_url: String,
    pub mail_from: String,
    /// Route every outbound email here instead of the booking's address
    /// (Resend sandbox accounts can only deliver to the account owner)
    pub mail_override_to: Option<String>,
    /// Restrict room bookings to windows that start and end on the same UTC day
    pub same_day_rooms: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            mollie_api_key: env::var("MOLLIE_API_KEY")
                .context("MOLLIE_API_KEY must be set")?,
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .context("PUBLIC_BASE_URL must be set")?,
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "onboarding@resend.dev".to_string()),
            mail_override_to: env::var("MAIL_OVERRIDE_TO").ok(),
            same_day_rooms: env::var("SAME_DAY_ROOMS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
