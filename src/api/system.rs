//! System information

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Record;

/// `/system/*` and `/ping`
pub struct SystemApi<'a> {
    client: &'a mut Client,
}

impl<'a> SystemApi<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        Self { client }
    }

    /// `/system/identity/print`
    pub fn identity(&mut self) -> Result<Record> {
        self.print_single("/system/identity/print")
    }

    /// `/system/resource/print`
    pub fn resources(&mut self) -> Result<Record> {
        self.print_single("/system/resource/print")
    }

    /// `/system/clock/print`
    pub fn clock(&mut self) -> Result<Record> {
        self.print_single("/system/clock/print")
    }

    /// Ping `address` from the router, one record per probe
    pub fn ping(&mut self, address: &str, count: u32) -> Result<Vec<Record>> {
        let address = format!("address={}", address);
        let count = format!("count={}", count);
        let result = self
            .client
            .execute("/ping", &[address.as_str(), count.as_str()])?
            .into_result()?;
        Ok(result.records)
    }

    /// First record of a singleton print, empty if the router sent none
    fn print_single(&mut self, path: &str) -> Result<Record> {
        let result = self.client.execute(path, &[])?.into_result()?;
        Ok(result.records.into_iter().next().unwrap_or_default())
    }
}
