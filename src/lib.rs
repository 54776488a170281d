//! # roslink
//!
//! A blocking client for the RouterOS binary API with:
//! - Variable-length word framing and zero-word sentence terminators
//! - Plain TCP or TLS transport (standard or explicit trust-all validation)
//! - Dual-mode login (direct, or legacy MD5 challenge-response)
//! - Reply parsing into records with a success/error outcome
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Client (execute / login)                     │
//! │           endpoint helpers in `api` call execute             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    auth     │          │ ReplyParser │
//!   │ (handshake) │          │  (records)  │
//!   └──────┬──────┘          └──────▲──────┘
//!          │                        │
//!          ▼                        │
//! ┌─────────────────────────────────┴───────────────────────────┐
//! │           Connection: sentences over TCP / TLS               │
//! │              word length codec + framing                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use roslink::{Client, Config};
//!
//! let config = Config::builder().host("192.168.88.1").build();
//! let mut client = Client::open(config, "admin", "secret")?;
//! let result = client.execute("/system/identity/print", &[])?;
//! if let Some(identity) = result.first() {
//!     println!("{:?}", identity.get("name"));
//! }
//! client.disconnect();
//! # Ok::<(), roslink::RosError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod auth;
pub mod client;
pub mod api;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosError, Result};
pub use config::Config;
pub use client::Client;
pub use auth::LoginMode;
pub use protocol::{CommandResult, Outcome, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of roslink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
