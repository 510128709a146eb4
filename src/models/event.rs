use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::guild::Guild;
use super::login::Login;
use super::member::GuildMember;
use super::message::Message;
use super::role::GuildRole;
use super::user::User;

/// An event pushed by the server on the event stream.
///
/// Only the references relevant to `event_type` are populated; the rest are
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub platform: String,
    pub self_id: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild: Option<Guild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<Login>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<GuildRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
