use serde_json::json;

use super::paged;
use crate::client::Client;
use crate::error::ApiError;
use crate::models::{GuildMember, List};

impl Client {
    pub async fn get_guild_member(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<GuildMember, ApiError> {
        self.call(
            "guild.member.get",
            json!({ "guild_id": guild_id, "user_id": user_id }),
        )
        .await
    }

    pub async fn list_guild_members(
        &self,
        guild_id: &str,
        next: Option<&str>,
    ) -> Result<List<GuildMember>, ApiError> {
        self.call(
            "guild.member.list",
            paged(json!({ "guild_id": guild_id }), next),
        )
        .await
    }

    /// Remove a member; `permanent` also bans them.
    pub async fn kick_guild_member(
        &self,
        guild_id: &str,
        user_id: &str,
        permanent: bool,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.member.kick",
            json!({ "guild_id": guild_id, "user_id": user_id, "permanent": permanent }),
        )
        .await
    }

    pub async fn approve_guild_member(
        &self,
        message_id: &str,
        approve: bool,
        comment: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.member.approve",
            json!({ "message_id": message_id, "approve": approve, "comment": comment }),
        )
        .await
    }

    pub async fn set_guild_member_role(
        &self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.member.role.set",
            json!({ "guild_id": guild_id, "user_id": user_id, "role_id": role_id }),
        )
        .await
    }

    pub async fn unset_guild_member_role(
        &self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<(), ApiError> {
        self.call_void(
            "guild.member.role.unset",
            json!({ "guild_id": guild_id, "user_id": user_id, "role_id": role_id }),
        )
        .await
    }
}
