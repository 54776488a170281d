//! Hotspot users

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Record;

/// `/ip/hotspot/user` and `/ip/hotspot/active`
pub struct HotspotApi<'a> {
    client: &'a mut Client,
}

impl<'a> HotspotApi<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        Self { client }
    }

    /// Add a hotspot user; returns the new object id when the router
    /// reports one
    pub fn create_user(
        &mut self,
        username: &str,
        password: &str,
        profile: &str,
        comment: &str,
    ) -> Result<Option<String>> {
        let params = [
            format!("name={}", username),
            format!("password={}", password),
            format!("profile={}", profile),
            format!("comment={}", comment),
        ];
        let params: Vec<&str> = params.iter().map(String::as_str).collect();

        let result = self
            .client
            .execute("/ip/hotspot/user/add", &params)?
            .into_result()?;
        Ok(result.attribute("ret").map(str::to_string))
    }

    /// Remove a user by `.id` (or name, which the router also accepts)
    pub fn remove_user(&mut self, id: &str) -> Result<()> {
        let selector = format!(".id={}", id);
        self.client
            .execute("/ip/hotspot/user/remove", &[selector.as_str()])?
            .into_result()?;
        Ok(())
    }

    /// All hotspot users
    pub fn list_users(&mut self) -> Result<Vec<Record>> {
        let result = self
            .client
            .execute("/ip/hotspot/user/print", &[])?
            .into_result()?;
        Ok(result.records)
    }

    /// Drop an active session by `.id`
    pub fn disconnect_user(&mut self, id: &str) -> Result<()> {
        let selector = format!(".id={}", id);
        self.client
            .execute("/ip/hotspot/active/remove", &[selector.as_str()])?
            .into_result()?;
        Ok(())
    }
}
