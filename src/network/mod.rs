//! Network Module
//!
//! TCP/TLS transport to the router.
//!
//! ## Architecture
//! - One blocking socket per [`Connection`], optionally wrapped in TLS
//! - Separate connect / read / write timeouts
//! - [`AbortHandle`] closes the socket from another thread

mod connection;
mod tls;

pub use connection::{AbortHandle, Connection, Stream};
pub use tls::{client_config, TlsStream};
