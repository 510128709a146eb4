use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{Guild, List};

impl Client {
    pub async fn get_guild(&self, guild_id: &str) -> Result<Guild, ApiError> {
        self.call("guild.get", json!({ "guild_id": guild_id })).await
    }

    pub async fn list_guilds(&self, next: Option<&str>) -> Result<List<Guild>, ApiError> {
        self.call("guild.list", paged(json!({}), next)).await
    }

    /// Answer a guild invitation identified by the request message.
    pub async fn approve_guild(
        &self,
        message_id: &str,
        approve: bool,
        comment: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.approve",
            json!({ "message_id": message_id, "approve": approve, "comment": comment }),
        )
        .await
    }
}
