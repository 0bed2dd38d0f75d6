use serde_json::Value;

use crate::api::{call, json_body};
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{ConfigEntry, ConfigUpdate, NewConfigEntry};

pub struct ConfigsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ConfigsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ClientResult<Vec<ConfigEntry>> {
        call(self.gateway, "v1/config", RequestOptions::get(), "Failed to fetch configs").await
    }

    pub async fn create(&self, entry: &NewConfigEntry) -> ClientResult<ConfigEntry> {
        let options = RequestOptions::post(json_body(entry)?);
        call(self.gateway, "v1/config", options, "Failed to create config").await
    }

    pub async fn update(&self, config_id: i64, update: &ConfigUpdate) -> ClientResult<ConfigEntry> {
        let options = RequestOptions::put(json_body(update)?);
        let path = format!("v1/config/{}", config_id);
        call(self.gateway, &path, options, "Failed to update config").await
    }

    /// Returns the backend's acknowledgment, e.g. `{"detail": "Config deleted"}`
    pub async fn delete(&self, config_id: i64) -> ClientResult<Value> {
        let path = format!("v1/config/{}", config_id);
        call(self.gateway, &path, RequestOptions::delete(), "Failed to delete config").await
    }
}
