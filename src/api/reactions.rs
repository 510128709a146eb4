use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{List, User};

impl Client {
    pub async fn create_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "reaction.create",
            json!({ "channel_id": channel_id, "message_id": message_id, "emoji": emoji }),
        )
        .await
    }

    /// Remove one user's reaction. An empty `user_id` means our own.
    pub async fn delete_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "reaction.delete",
            json!({
                "channel_id": channel_id,
                "message_id": message_id,
                "emoji": emoji,
                "user_id": user_id,
            }),
        )
        .await
    }

    pub async fn clear_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "reaction.clear",
            json!({ "channel_id": channel_id, "message_id": message_id, "emoji": emoji }),
        )
        .await
    }

    pub async fn list_reactions(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
        next: Option<&str>,
    ) -> Result<List<User>, ApiError> {
        self.call(
            "reaction.list",
            paged(
                json!({ "channel_id": channel_id, "message_id": message_id, "emoji": emoji }),
                next,
            ),
        )
        .await
    }
}
