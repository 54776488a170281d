//! Active hotspot sessions

use crate::client::Client;
use crate::error::{Result, RosError};
use crate::protocol::Record;

/// `/ip/hotspot/active`
pub struct ActiveApi<'a> {
    client: &'a mut Client,
}

impl<'a> ActiveApi<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        Self { client }
    }

    pub fn list_active(&mut self) -> Result<Vec<Record>> {
        let result = self
            .client
            .execute("/ip/hotspot/active/print", &[])?
            .into_result()?;
        Ok(result.records)
    }

    pub fn remove_active_by_id(&mut self, id: &str) -> Result<()> {
        let selector = format!(".id={}", id);
        self.client
            .execute("/ip/hotspot/active/remove", &[selector.as_str()])?
            .into_result()?;
        Ok(())
    }

    /// `.id` of the session logged in as `username`
    pub fn find_active_id_by_user(&mut self, username: &str) -> Result<Option<String>> {
        let sessions = self.list_active()?;
        Ok(sessions
            .iter()
            .find(|r| r.get("user") == Some(username))
            .and_then(|r| r.id())
            .map(str::to_string))
    }

    /// Drop the session of `username`
    pub fn kick_user(&mut self, username: &str) -> Result<()> {
        match self.find_active_id_by_user(username)? {
            Some(id) if !id.is_empty() => self.remove_active_by_id(&id),
            _ => Err(RosError::NotFound(format!(
                "no active session for user {}",
                username
            ))),
        }
    }
}
