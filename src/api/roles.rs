use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{GuildRole, List};

impl Client {
    pub async fn list_guild_roles(
        &self,
        guild_id: &str,
        next: Option<&str>,
    ) -> Result<List<GuildRole>, ApiError> {
        self.call("guild.role.list", paged(json!({ "guild_id": guild_id }), next))
            .await
    }

    pub async fn create_guild_role(
        &self,
        guild_id: &str,
        role: &GuildRole,
    ) -> Result<GuildRole, ApiError> {
        self.call(
            "guild.role.create",
            json!({ "guild_id": guild_id, "role": role }),
        )
        .await
    }

    pub async fn update_guild_role(
        &self,
        guild_id: &str,
        role_id: &str,
        role: &GuildRole,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.role.update",
            json!({ "guild_id": guild_id, "role_id": role_id, "role": role }),
        )
        .await
    }

    pub async fn delete_guild_role(&self, guild_id: &str, role_id: &str) -> Result<(), ApiError> {
        self.call_void(
            "guild.role.delete",
            json!({ "guild_id": guild_id, "role_id": role_id }),
        )
        .await
    }
}
