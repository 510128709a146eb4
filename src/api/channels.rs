use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{Channel, List};

impl Client {
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel, ApiError> {
        self.call("channel.get", json!({ "channel_id": channel_id })).await
    }

    pub async fn list_channels(
        &self,
        guild_id: &str,
        next: Option<&str>,
    ) -> Result<List<Channel>, ApiError> {
        self.call("channel.list", paged(json!({ "guild_id": guild_id }), next))
            .await
    }

    pub async fn create_channel(
        &self,
        guild_id: &str,
        data: &Channel,
    ) -> Result<Channel, ApiError> {
        self.call("channel.create", json!({ "guild_id": guild_id, "data": data }))
            .await
    }

    pub async fn update_channel(&self, channel_id: &str, data: &Channel) -> Result<(), ApiError> {
        self.call_void(
            "channel.update",
            json!({ "channel_id": channel_id, "data": data }),
        )
        .await
    }

    pub async fn delete_channel(&self, channel_id: &str) -> Result<(), ApiError> {
        self.call_void("channel.delete", json!({ "channel_id": channel_id }))
            .await
    }

    /// Open (or fetch) the direct-message channel with a user.
    pub async fn create_user_channel(&self, user_id: &str) -> Result<Channel, ApiError> {
        self.call("user.channel.create", json!({ "user_id": user_id }))
            .await
    }
}
