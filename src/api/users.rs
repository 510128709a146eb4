use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{List, Login, User};

impl Client {
    pub async fn get_login(&self) -> Result<Login, ApiError> {
        self.call("login.get", json!({})).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.call("user.get", json!({ "user_id": user_id })).await
    }

    pub async fn list_friends(&self, next: Option<&str>) -> Result<List<User>, ApiError> {
        self.call("friend.list", paged(json!({}), next)).await
    }

    pub async fn approve_friend(
        &self,
        message_id: &str,
        approve: bool,
        comment: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "friend.approve",
            json!({ "message_id": message_id, "approve": approve, "comment": comment }),
        )
        .await
    }
}
