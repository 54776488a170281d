//! Login handshake
//!
//! Two generations of router firmware log in differently. The client does
//! not know which one it is talking to, so it tries the modern form first:
//!
//! 1. `/login =name=U =password=P`
//!    - `!done` → logged in (direct mode)
//!    - `!done =ret=<challenge>` → legacy firmware ignored the password and
//!      handed out a challenge; continue at step 3
//!    - `!trap` → fall back to the challenge exchange
//! 2. `/login` (no attributes) → `!done =ret=<hex challenge>`
//! 3. `/login =name=U =response=00<hex md5(0x00 || P || challenge)>`
//!    - `!done` → logged in (challenge mode)
//!    - `!trap` → bad credentials

use md5::{Digest, Md5};

use crate::error::{Result, RosError};
use crate::network::Connection;
use crate::protocol::CommandResult;

/// Fixed algorithm tag prepended to the hashed response
const RESPONSE_TAG: &str = "00";

/// How the login went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    /// Name and password accepted directly
    Direct,
    /// Legacy MD5 challenge-response
    Challenge,
}

/// Log in on an open connection
///
/// Credentials are only borrowed for the exchange and never stored.
pub fn login(conn: &mut Connection, username: &str, password: &str) -> Result<LoginMode> {
    tracing::debug!("Logging in to {} as {}", conn.peer_addr(), username);

    let name = format!("=name={}", username);
    let secret = format!("=password={}", password);
    let direct = conn.request(&["/login", name.as_str(), secret.as_str()])?;

    let challenge = match (direct.is_success(), direct.attribute("ret")) {
        (true, None) => {
            tracing::debug!("Direct login accepted");
            return Ok(LoginMode::Direct);
        }
        (true, Some(ret)) => {
            tracing::debug!("Router answered direct login with a challenge");
            ret.to_string()
        }
        (false, _) => {
            tracing::debug!(
                "Direct login rejected ({}), trying challenge login",
                direct.message.as_deref().unwrap_or("no message")
            );
            request_challenge(conn)?
        }
    };

    let response = format!(
        "=response={}{}",
        RESPONSE_TAG,
        challenge_response(password, &decode_challenge(&challenge)?)
    );
    let reply = conn.request(&["/login", name.as_str(), response.as_str()])?;
    if reply.is_error() {
        return Err(RosError::Auth(rejection(&reply)));
    }

    tracing::debug!("Challenge login accepted");
    Ok(LoginMode::Challenge)
}

/// `hex(md5(0x00 || password || challenge))`
pub fn challenge_response(password: &str, challenge: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hasher.update(challenge);
    hex::encode(hasher.finalize())
}

/// Send a bare `/login` and pull the challenge out of the reply
fn request_challenge(conn: &mut Connection) -> Result<String> {
    let reply = conn.request(&["/login"])?;
    if reply.is_error() {
        return Err(RosError::Auth(rejection(&reply)));
    }
    reply
        .attribute("ret")
        .map(str::to_string)
        .ok_or_else(|| RosError::Auth("router sent no login challenge".to_string()))
}

fn decode_challenge(challenge: &str) -> Result<Vec<u8>> {
    hex::decode(challenge.trim())
        .map_err(|e| RosError::Auth(format!("malformed login challenge {:?}: {}", challenge, e)))
}

fn rejection(reply: &CommandResult) -> String {
    reply
        .message
        .clone()
        .unwrap_or_else(|| "invalid user name or password".to_string())
}
