use serde::{Deserialize, Serialize};

use super::user::User;

/// An account the server is logged into on some platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub self_id: String,
    pub platform: String,
    pub status: LoginStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum LoginStatus {
    #[default]
    Offline,
    Online,
    Connect,
    Disconnect,
    Reconnect,
    Other(i64),
}

impl From<i64> for LoginStatus {
    fn from(value: i64) -> Self {
        match value {
            0 => LoginStatus::Offline,
            1 => LoginStatus::Online,
            2 => LoginStatus::Connect,
            3 => LoginStatus::Disconnect,
            4 => LoginStatus::Reconnect,
            other => LoginStatus::Other(other),
        }
    }
}

impl From<LoginStatus> for i64 {
    fn from(value: LoginStatus) -> Self {
        match value {
            LoginStatus::Offline => 0,
            LoginStatus::Online => 1,
            LoginStatus::Connect => 2,
            LoginStatus::Disconnect => 3,
            LoginStatus::Reconnect => 4,
            LoginStatus::Other(other) => other,
        }
    }
}
