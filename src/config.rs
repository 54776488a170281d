//! Configuration for roslink
//!
//! Centralized connection configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, RosError};

/// Default API port for plain TCP
pub const DEFAULT_PORT: u16 = 8728;

/// Default API port for TLS (api-ssl service)
pub const DEFAULT_TLS_PORT: u16 = 8729;

/// Timeouts below this are raised to it
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Connection configuration for a router
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Router host name or IP address
    pub host: String,

    /// Explicit port; `None` picks 8728 or 8729 depending on `use_tls`
    pub port: Option<u16>,

    // -------------------------------------------------------------------------
    // TLS Configuration
    // -------------------------------------------------------------------------
    /// Wrap the TCP stream in TLS
    pub use_tls: bool,

    /// Accept any server certificate.
    ///
    /// UNSAFE outside trusted networks: this disables all certificate
    /// validation and exposes the session (credentials included) to
    /// man-in-the-middle attacks. Routers ship with self-signed
    /// certificates, which is the only reason this switch exists.
    pub allow_insecure_tls: bool,

    // -------------------------------------------------------------------------
    // Timeouts
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "192.168.88.1".to_string(),
            port: None,
            use_tls: false,
            allow_insecure_tls: false,
            connect_timeout_ms: 5000,
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

    /// Port actually dialed
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None if self.use_tls => DEFAULT_TLS_PORT,
            None => DEFAULT_PORT,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Check the config before dialing
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RosError::Config("host must not be empty".to_string()));
        }
        if self.port == Some(0) {
            return Err(RosError::Config("port must not be 0".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the router host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set an explicit port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = Some(port);
        self
    }

    /// Enable or disable TLS
    pub fn use_tls(mut self, enabled: bool) -> Self {
        self.config.use_tls = enabled;
        self
    }

    /// Trust every server certificate (see [`Config::allow_insecure_tls`])
    pub fn allow_insecure_tls(mut self, enabled: bool) -> Self {
        self.config.allow_insecure_tls = enabled;
        self
    }

    /// Set the connect timeout (in milliseconds, minimum 1000)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms.max(MIN_TIMEOUT_MS);
        self
    }

    /// Set the read timeout (in milliseconds, minimum 1000)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms.max(MIN_TIMEOUT_MS);
        self
    }

    /// Set the write timeout (in milliseconds, minimum 1000)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms.max(MIN_TIMEOUT_MS);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
