//! Environment-driven settings.
//!
//! Production and test runs read different connection strings so a test
//! run never touches the production store.

use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "data/blog-posts.db";
pub const DEFAULT_TEST_DATABASE_URL: &str = crate::db::MEMORY_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for environment variable '{key}'")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: Option<u16>,
    pub seed_posts: usize,
}

fn parsed<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key: key.to_string(), value }),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the environment.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = match environment {
            Environment::Production => env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            Environment::Test => env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string()),
        };

        Ok(Self {
            database_url,
            port: parsed("PORT")?,
            seed_posts: parsed("SEED_POSTS")?.unwrap_or(0),
        })
    }
}
