pub mod channel;
pub mod event;
pub mod guild;
pub mod login;
pub mod member;
pub mod message;
pub mod role;
pub mod user;

use serde::{Deserialize, Serialize};

pub use channel::{Channel, ChannelType};
pub use event::Event;
pub use guild::Guild;
pub use login::{Login, LoginStatus};
pub use member::GuildMember;
pub use message::Message;
pub use role::GuildRole;
pub use user::User;

/// Paginated list envelope returned by `*.list` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Cursor for the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> List<T> {
    pub fn has_more(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.is_empty())
    }
}
