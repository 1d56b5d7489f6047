//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the
//! detailbook API server. It retrieves configuration values from
//! environment variables and provides defaults where appropriate. The
//! booking policy is validated here, once, so the engine can assume it is
//! well-formed.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `BUSINESS_HOURS_START` / `BUSINESS_HOURS_END`: Opening hours as
//!   "HH:MM" (defaults: "09:00" / "18:00")
//! - `SLOT_INTERVAL_MINUTES`: Step between candidate slots (default: 30)
//! - `ADVANCE_BOOKING_HOURS`: Minimum notice before a slot (default: 24)
//! - `LIMITED_SLOT_THRESHOLD`: Free-slot count at or below which a day is
//!   reported as "limited" (default: 3)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

use detailbook_core::scheduling::settings::{BookingSettings, BusinessHours};

/// Configuration for the detailbook API server.
///
/// Encapsulates networking, database, logging, and booking-policy
/// settings. Construct it with [`ApiConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Booking policy handed to the scheduling engine
    pub booking: BookingSettings,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables.
    ///
    /// Loads configuration values from the environment, providing sensible
    /// defaults where possible. `DATABASE_URL` is required. The booking
    /// policy is parsed and validated here; malformed business hours or a
    /// zero slot interval fail startup rather than producing an engine that
    /// silently generates nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unset, a numeric variable
    /// cannot be parsed, or the booking policy is invalid.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let booking = booking_settings_from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            booking,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn booking_settings_from_env() -> Result<BookingSettings> {
    let hours_start = env::var("BUSINESS_HOURS_START").unwrap_or_else(|_| "09:00".to_string());
    let hours_end = env::var("BUSINESS_HOURS_END").unwrap_or_else(|_| "18:00".to_string());
    let business_hours = BusinessHours::parse(&hours_start, &hours_end)
        .wrap_err("Invalid BUSINESS_HOURS_START/BUSINESS_HOURS_END")?;

    let slot_interval_minutes = env::var("SLOT_INTERVAL_MINUTES")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .wrap_err("Invalid SLOT_INTERVAL_MINUTES value")?;
    let advance_booking_hours = env::var("ADVANCE_BOOKING_HOURS")
        .unwrap_or_else(|_| "24".to_string())
        .parse()
        .wrap_err("Invalid ADVANCE_BOOKING_HOURS value")?;
    let limited_slot_threshold = env::var("LIMITED_SLOT_THRESHOLD")
        .unwrap_or_else(|_| "3".to_string())
        .parse()
        .wrap_err("Invalid LIMITED_SLOT_THRESHOLD value")?;

    let settings = BookingSettings::new(
        business_hours,
        slot_interval_minutes,
        advance_booking_hours,
        limited_slot_threshold,
    )?;
    Ok(settings)
}
