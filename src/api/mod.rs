//! Endpoint helpers
//!
//! Thin wrappers that build command paths and parameters for common router
//! tasks. Each one calls [`Client::execute`] once (or twice for lookups)
//! and turns a trap into [`RosError::Trap`].
//!
//! [`Client::execute`]: crate::client::Client::execute
//! [`RosError::Trap`]: crate::error::RosError::Trap

mod active;
mod hotspot;
mod profile;
mod system;

pub use active::ActiveApi;
pub use hotspot::HotspotApi;
pub use profile::{ProfileApi, ProfileSpec};
pub use system::SystemApi;
