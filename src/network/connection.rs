//! Router Connection
//!
//! Owns the TCP or TLS stream to one router and speaks sentences over it.
//!
//! ## Lifecycle
//! ```text
//! disconnected ──connect()──► connected ──disconnect()──► disconnected
//!                                 │
//!                      I/O error, timeout, !fatal
//!                                 ▼
//!                              broken ──disconnect()──► disconnected
//! ```
//! A broken connection reports `is_connected() == false` and refuses all
//! further I/O; it is never recovered in place.

use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;

use parking_lot::Mutex;

use super::tls::{self, TlsStream};
use crate::config::Config;
use crate::error::{Result, RosError};
use crate::protocol::{self, encode_sentence, CommandResult, ParserState, ReplyParser};

// =============================================================================
// Stream
// =============================================================================

/// Plain or TLS byte stream
pub enum Stream {
    Plain(TcpStream),
    Tls(Box<TlsStream>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(socket) => socket.read(buf),
            Stream::Tls(tls) => tls.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(socket) => socket.write(buf),
            Stream::Tls(tls) => tls.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Plain(socket) => socket.flush(),
            Stream::Tls(tls) => tls.flush(),
        }
    }
}

// =============================================================================
// AbortHandle
// =============================================================================

/// Closes a connection's socket from any thread
///
/// A reader blocked inside the connection wakes up with
/// [`RosError::UnexpectedEof`]. Closing is idempotent and shared with
/// [`Connection::disconnect`], so concurrent double-close is harmless.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    socket: Arc<Mutex<Option<TcpStream>>>,
}

impl AbortHandle {
    fn new(socket: TcpStream) -> Self {
        Self {
            socket: Arc::new(Mutex::new(Some(socket))),
        }
    }

    /// Shut the socket down; returns `false` if it was already closed
    pub fn abort(&self) -> bool {
        match self.socket.lock().take() {
            Some(socket) => {
                // Already-closed sockets report NotConnected here
                let _ = socket.shutdown(Shutdown::Both);
                true
            }
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.socket.lock().is_none()
    }
}

// =============================================================================
// Connection
// =============================================================================

/// A single router connection
#[derive(Default)]
pub struct Connection {
    /// Buffered stream; writes go through `get_mut()` as whole sentences
    stream: Option<BufReader<Stream>>,

    /// Shared close switch for the current socket
    abort: AbortHandle,

    /// Set after any transport failure
    broken: bool,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a disconnected connection
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the socket (and TLS session) described by `config`
    ///
    /// A live connection on this instance is torn down first.
    pub fn connect(&mut self, config: &Config) -> Result<()> {
        config.validate()?;
        if self.stream.is_some() {
            tracing::debug!("Replacing existing connection to {}", self.peer_addr);
            self.disconnect();
        }

        let host = config.host.trim();
        let port = config.port();
        tracing::debug!("Connecting to {}:{} tls={}", host, port, config.use_tls);

        let socket = open_socket(host, port, config)?;
        let peer_addr = socket
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| format!("{}:{}", host, port));

        socket.set_nodelay(true)?;
        socket.set_read_timeout(Some(config.read_timeout()))?;
        socket.set_write_timeout(Some(config.write_timeout()))?;

        let abort_socket = socket.try_clone()?;
        let stream = if config.use_tls {
            Stream::Tls(Box::new(tls::handshake(
                socket,
                host,
                config.allow_insecure_tls,
            )?))
        } else {
            Stream::Plain(socket)
        };

        self.abort = AbortHandle::new(abort_socket);
        self.stream = Some(BufReader::new(stream));
        self.broken = false;
        self.peer_addr = peer_addr;

        tracing::debug!("Connected to {}", self.peer_addr);
        Ok(())
    }

    /// Close everything; safe to call any number of times
    pub fn disconnect(&mut self) {
        if let Some(reader) = self.stream.take() {
            tracing::debug!("Disconnecting from {}", self.peer_addr);
            let mut stream = reader.into_inner();
            if let Stream::Tls(tls) = &mut stream {
                if !self.broken && !self.abort.is_closed() {
                    tls.conn.send_close_notify();
                    let _ = tls.flush();
                }
            }
        }
        self.abort.abort();
        self.broken = false;
    }

    /// Open, not broken, and not aborted
    pub fn is_connected(&self) -> bool {
        self.stream.is_some() && !self.broken && !self.abort.is_closed()
    }

    /// Handle that can close this connection's socket from another thread
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    // -------------------------------------------------------------------------
    // Sentence I/O
    // -------------------------------------------------------------------------

    /// Write one sentence and flush it
    pub fn write_sentence<S: AsRef<str>>(&mut self, words: &[S]) -> Result<()> {
        let bytes = encode_sentence(words)?;
        if tracing::enabled!(tracing::Level::TRACE) {
            let shown: Vec<&str> = words.iter().map(|w| redact(w.as_ref())).collect();
            tracing::trace!("-> {} {:?}", self.peer_addr, shown);
        }

        let stream = self.stream_mut()?.get_mut();
        let outcome = stream.write_all(&bytes).and_then(|_| stream.flush());
        self.check(outcome.map_err(RosError::from))
    }

    /// Read one sentence
    pub fn read_sentence(&mut self) -> Result<Vec<String>> {
        let reader = self.stream_mut()?;
        let outcome = protocol::read_sentence(reader);
        let sentence = self.check(outcome)?;
        tracing::trace!("<- {} {:?}", self.peer_addr, sentence);
        Ok(sentence)
    }

    /// Read reply sentences until the reply is complete
    pub fn read_reply(&mut self) -> Result<CommandResult> {
        let mut parser = ReplyParser::new();
        while !parser.is_terminal() {
            let sentence = self.read_sentence()?;
            parser.feed(sentence.as_slice());
        }

        if *parser.state() == ParserState::Fatal {
            tracing::warn!("Router {} closed the session", self.peer_addr);
            self.broken = true;
        }
        Ok(parser.finish())
    }

    /// One request/reply exchange
    pub fn request<S: AsRef<str>>(&mut self, words: &[S]) -> Result<CommandResult> {
        self.write_sentence(words)?;
        self.read_reply()
    }

    fn stream_mut(&mut self) -> Result<&mut BufReader<Stream>> {
        if self.broken || self.abort.is_closed() {
            return Err(RosError::NotConnected);
        }
        self.stream.as_mut().ok_or(RosError::NotConnected)
    }

    /// Mark the connection broken on any transport failure
    fn check<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            tracing::warn!("Connection to {} failed: {}", self.peer_addr, e);
            self.broken = true;
        }
        outcome
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("peer_addr", &self.peer_addr)
            .field("connected", &self.is_connected())
            .field("tls", &matches!(self.stream.as_ref().map(|s| s.get_ref()), Some(Stream::Tls(_))))
            .finish()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Try every resolved address with the connect timeout
fn open_socket(host: &str, port: u16, config: &Config) -> Result<TcpStream> {
    let addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| RosError::Connection(format!("cannot resolve {}:{}: {}", host, port, e)))?;

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, config.connect_timeout()) {
            Ok(socket) => return Ok(socket),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
            RosError::Connection(format!("connect to {}:{} timed out", host, port))
        }
        Some(e) => RosError::Connection(format!("connect to {}:{} failed: {}", host, port, e)),
        None => RosError::Connection(format!("{}:{} resolved to no addresses", host, port)),
    })
}

/// Hide secrets in trace output
fn redact(word: &str) -> &str {
    if word.starts_with("=password=") {
        "=password=***"
    } else if word.starts_with("=response=") {
        "=response=***"
    } else {
        word
    }
}
