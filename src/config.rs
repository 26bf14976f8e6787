//! Configuration for the pastebin service
//!
//! Centralized configuration with sensible defaults. Values are validated
//! once at startup so that the store never runs with a nonsensical TTL.

use std::time::{Duration, Instant};

use crate::error::{PasteError, Result};
use crate::protocol::MAX_PAYLOAD_SIZE;

/// Longest accepted TTL or sweep interval (ten years)
pub const MAX_DURATION: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Main configuration for a pastebin instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// How long an entry stays live after insertion
    pub ttl: Duration,

    /// How often the background sweeper removes expired entries
    pub sweep_interval: Duration,

    /// Number of characters in a generated id
    pub id_length: usize,

    /// How many ids to try before giving up on an insert
    pub max_id_attempts: usize,

    /// Largest accepted payload (in bytes)
    pub max_payload_size: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
            id_length: 8,
            max_id_attempts: 32,
            max_payload_size: 4 * 1024 * 1024, // 4 MB
            listen_addr: "127.0.0.1:8000".to_string(),
            max_connections: 1024,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the store cannot run with
    pub fn validate(&self) -> Result<()> {
        check_duration("ttl", self.ttl)?;
        check_duration("sweep interval", self.sweep_interval)?;
        if self.id_length == 0 {
            return Err(PasteError::Config("id length must be at least 1".to_string()));
        }
        if self.max_id_attempts == 0 {
            return Err(PasteError::Config(
                "max id attempts must be at least 1".to_string(),
            ));
        }
        if self.max_payload_size == 0 {
            return Err(PasteError::Config(
                "max payload size must be greater than zero".to_string(),
            ));
        }
        // A larger limit could never be reached through the wire protocol
        if self.max_payload_size > MAX_PAYLOAD_SIZE as usize {
            return Err(PasteError::Config(format!(
                "max payload size {} exceeds the frame limit of {} bytes",
                self.max_payload_size, MAX_PAYLOAD_SIZE
            )));
        }
        if self.max_connections == 0 {
            return Err(PasteError::Config(
                "max connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Durations must be non-zero, at most [`MAX_DURATION`] and addable to the
/// current instant
fn check_duration(name: &str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(PasteError::Config(format!("{} must be greater than zero", name)));
    }
    if value > MAX_DURATION || Instant::now().checked_add(value).is_none() {
        return Err(PasteError::Config(format!(
            "{} of {:?} exceeds the maximum of {:?}",
            name, value, MAX_DURATION
        )));
    }
    Ok(())
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the entry time-to-live
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    /// Set the background sweep interval
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config.sweep_interval = interval;
        self
    }

    /// Set the generated id length
    pub fn id_length(mut self, length: usize) -> Self {
        self.config.id_length = length;
        self
    }

    /// Set the collision retry bound for inserts
    pub fn max_id_attempts(mut self, attempts: usize) -> Self {
        self.config.max_id_attempts = attempts;
        self
    }

    /// Set the maximum payload size (in bytes)
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Set the maximum payload size in KiB
    ///
    /// Saturates instead of wrapping, so a huge value fails validation.
    pub fn max_payload_kb(mut self, kb: usize) -> Self {
        self.config.max_payload_size = kb.saturating_mul(1024);
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
