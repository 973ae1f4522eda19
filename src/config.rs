//! Server configuration read from environment variables.
//!
//! | Variable                   | Default                 |
//! |----------------------------|-------------------------|
//! | `COMPANY_POSTINGS_HOST`    | `0.0.0.0`               |
//! | `PORT`                     | `3001`                  |
//! | `POSTING_API_URL`          | `http://localhost:3000` |
//! | `POSTING_API_TIMEOUT_SECS` | `30`                    |
//! | `POSTING_SOURCE`           | `http` (or `memory`)    |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where postings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Upstream posting API over HTTP.
    Http,
    /// In-process store, no upstream required.
    Memory,
}

impl FromStr for SourceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub posting_api_url: String,
    pub posting_api_timeout: Duration,
    pub source: SourceKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            posting_api_url: "http://localhost:3000".to_string(),
            posting_api_timeout: Duration::from_secs(30),
            source: SourceKind::Http,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => parse_var("PORT", "a port number", &v)?,
            None => defaults.port,
        };
        let timeout_secs = match lookup("POSTING_API_TIMEOUT_SECS") {
            Some(v) => parse_var("POSTING_API_TIMEOUT_SECS", "a number of seconds", &v)?,
            None => defaults.posting_api_timeout.as_secs(),
        };
        let source = match lookup("POSTING_SOURCE") {
            Some(v) => v.parse::<SourceKind>().map_err(|_| ConfigError::Invalid {
                var: "POSTING_SOURCE",
                expected: "'http' or 'memory'",
                value: v.clone(),
            })?,
            None => defaults.source,
        };

        Ok(Self {
            host: lookup("COMPANY_POSTINGS_HOST").unwrap_or(defaults.host),
            port,
            posting_api_url: lookup("POSTING_API_URL").unwrap_or(defaults.posting_api_url),
            posting_api_timeout: Duration::from_secs(timeout_secs),
            source,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(var: &'static str, expected: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: value.to_string(),
    })
}
