//! Hotspot user profiles (time and rate limited vouchers)

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Record;

/// Profile settings sent on add/set
#[derive(Debug, Clone)]
pub struct ProfileSpec {
    pub name: String,
    /// e.g. `"700k/700k"`
    pub rate_limit: String,
    /// e.g. `"1h"`, `"30m"`, `"1d"`
    pub session_timeout: String,
    pub shared_users: u32,
}

impl ProfileSpec {
    fn limit_params(&self) -> Vec<String> {
        vec![
            format!("rate-limit={}", self.rate_limit),
            format!("session-timeout={}", self.session_timeout),
            format!("shared-users={}", self.shared_users),
        ]
    }
}

/// `/ip/hotspot/user/profile`
pub struct ProfileApi<'a> {
    client: &'a mut Client,
}

impl<'a> ProfileApi<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        Self { client }
    }

    pub fn list_profiles(&mut self) -> Result<Vec<Record>> {
        let result = self
            .client
            .execute("/ip/hotspot/user/profile/print", &[])?
            .into_result()?;
        Ok(result.records)
    }

    /// Create a profile
    pub fn add_profile(&mut self, spec: &ProfileSpec) -> Result<Option<String>> {
        let mut params = vec![format!("name={}", spec.name)];
        params.extend(spec.limit_params());
        let result = self.run("/ip/hotspot/user/profile/add", &params)?;
        Ok(result.attribute("ret").map(str::to_string))
    }

    /// Update the profile named `spec.name`
    pub fn set_profile(&mut self, spec: &ProfileSpec) -> Result<()> {
        let mut params = vec![format!("numbers={}", spec.name)];
        params.extend(spec.limit_params());
        self.run("/ip/hotspot/user/profile/set", &params)?;
        Ok(())
    }

    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        let params = [format!("numbers={}", name)];
        self.run("/ip/hotspot/user/profile/remove", &params)?;
        Ok(())
    }

    fn run(&mut self, path: &str, params: &[String]) -> Result<crate::protocol::CommandResult> {
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        self.client.execute(path, &params)?.into_result()
    }
}
