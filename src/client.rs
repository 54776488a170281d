//! Client Module
//!
//! The public session object: connect, log in, execute commands,
//! disconnect.
//!
//! ## Concurrency
//! The protocol carries no request id, so a client runs exactly one
//! command at a time. `execute` takes `&mut self`; callers that share a
//! client between threads wrap it in a mutex or give it to a single worker.
//! A blocked call can be cut short from another thread through
//! [`Client::abort_handle`].

use crate::auth::{self, LoginMode};
use crate::config::Config;
use crate::error::{Result, RosError};
use crate::network::{AbortHandle, Connection};
use crate::protocol::{command_words, CommandResult};

/// A router API session
#[derive(Debug)]
pub struct Client {
    /// Endpoint and timeouts
    config: Config,

    /// Transport to the router
    connection: Connection,

    /// Set by a successful login, cleared on disconnect
    authenticated: bool,
}

impl Client {
    /// Create a client; nothing is dialed yet
    pub fn new(config: Config) -> Self {
        Self {
            config,
            connection: Connection::new(),
            authenticated: false,
        }
    }

    /// Connect and log in in one step
    pub fn open(config: Config, username: &str, password: &str) -> Result<Self> {
        let mut client = Self::new(config);
        client.connect()?;
        if let Err(e) = client.login(username, password) {
            client.disconnect();
            return Err(e);
        }
        Ok(client)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the transport, replacing any previous connection
    pub fn connect(&mut self) -> Result<()> {
        self.authenticated = false;
        self.connection.connect(&self.config)
    }

    /// Run the login handshake
    ///
    /// Must complete before [`Client::execute`] is usable.
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginMode> {
        if !self.connection.is_connected() {
            return Err(RosError::NotConnected);
        }
        self.authenticated = false;
        let mode = auth::login(&mut self.connection, username, password)?;
        self.authenticated = true;
        Ok(mode)
    }

    /// Execute one command and collect its reply
    ///
    /// Parameters may be bare `key=value` pairs, explicit `=key=value`
    /// attributes, `.id=...` selectors or `?key=value` queries. A router
    /// trap comes back as an error outcome in the result, not as `Err`;
    /// `Err` means the connection itself failed.
    ///
    /// A `!trap` ends the reply. Routers that follow the trap with their
    /// own `!done` leave that sentence unread, and it becomes the reply to
    /// the next command on this connection. Reconnect after a trap when
    /// talking to such a router.
    pub fn execute(&mut self, path: &str, params: &[&str]) -> Result<CommandResult> {
        if !self.connection.is_connected() {
            return Err(RosError::NotConnected);
        }
        if !self.authenticated {
            return Err(RosError::Auth(
                "login required before executing commands".to_string(),
            ));
        }

        let words = command_words(path, params);
        let result = self.connection.request(words.as_slice())?;
        if result.is_error() {
            tracing::debug!(
                "{} trapped: {}",
                path,
                result.message.as_deref().unwrap_or("no message")
            );
        }
        Ok(result)
    }

    /// Live, usable connection
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.connection.is_connected()
    }

    /// Close the connection; idempotent
    pub fn disconnect(&mut self) {
        self.authenticated = false;
        self.connection.disconnect();
    }

    /// Handle that closes the current socket from another thread
    pub fn abort_handle(&self) -> AbortHandle {
        self.connection.abort_handle()
    }
}
