//! Application configuration loaded from environment variables.

pub mod db;

use std::env;

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::services::assignment::DEFAULT_MAX_CLAIM_ATTEMPTS;

/// Default JSON body limit for the HTTP API (bytes)
const DEFAULT_MAX_JSON_PAYLOAD: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_profile: DbProfile,
    pub max_json_payload_size: usize,
    /// Turn claims an allocation tries before answering `ALLOCATION_RACE`
    pub max_claim_attempts: u32,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let db_profile = DbProfile::from_env()?;

        let max_json_payload_size = match env::var("BACKEND_MAX_JSON_PAYLOAD") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::config(format!(
                    "BACKEND_MAX_JSON_PAYLOAD must be a byte count, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_JSON_PAYLOAD,
        };

        let max_claim_attempts = match env::var("BACKEND_MAX_CLAIM_ATTEMPTS") {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "BACKEND_MAX_CLAIM_ATTEMPTS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            Err(_) => DEFAULT_MAX_CLAIM_ATTEMPTS,
        };

        Ok(Self {
            host,
            port,
            db_profile,
            max_json_payload_size,
            max_claim_attempts,
        })
    }
}
