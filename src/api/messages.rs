use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{List, Message};

impl Client {
    pub async fn get_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Message, ApiError> {
        self.call(
            "message.get",
            json!({ "channel_id": channel_id, "message_id": message_id }),
        )
        .await
    }

    /// Send a message. The platform may split it, so several messages can
    /// come back.
    pub async fn create_message(
        &self,
        channel_id: &str,
        content: &str,
    ) -> Result<Vec<Message>, ApiError> {
        self.call(
            "message.create",
            json!({ "channel_id": channel_id, "content": content }),
        )
        .await
    }

    pub async fn update_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "message.update",
            json!({ "channel_id": channel_id, "message_id": message_id, "content": content }),
        )
        .await
    }

    pub async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), ApiError> {
        self.call_void(
            "message.delete",
            json!({ "channel_id": channel_id, "message_id": message_id }),
        )
        .await
    }

    pub async fn list_messages(
        &self,
        channel_id: &str,
        next: Option<&str>,
    ) -> Result<List<Message>, ApiError> {
        self.call(
            "message.list",
            paged(json!({ "channel_id": channel_id }), next),
        )
        .await
    }
}
