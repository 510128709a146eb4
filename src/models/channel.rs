use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    pub parent_id: String,
    pub avatar: String,
}

/// Channel kind. Values the client does not know are kept as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ChannelType {
    #[default]
    Text,
    Voice,
    Category,
    Direct,
    Other(i64),
}

impl From<i64> for ChannelType {
    fn from(value: i64) -> Self {
        match value {
            0 => ChannelType::Text,
            1 => ChannelType::Voice,
            2 => ChannelType::Category,
            3 => ChannelType::Direct,
            other => ChannelType::Other(other),
        }
    }
}

impl From<ChannelType> for i64 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::Text => 0,
            ChannelType::Voice => 1,
            ChannelType::Category => 2,
            ChannelType::Direct => 3,
            ChannelType::Other(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_is_numeric_on_the_wire() {
        let channel = Channel {
            id: "c1".to_string(),
            channel_type: ChannelType::Direct,
            ..Default::default()
        };
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["type"], 3);
    }

    #[test]
    fn test_unknown_channel_type_is_preserved() {
        let channel: Channel = serde_json::from_str(r#"{"id":"c1","type":42}"#).unwrap();
        assert_eq!(channel.channel_type, ChannelType::Other(42));
        assert_eq!(serde_json::to_value(&channel).unwrap()["type"], 42);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let channel: Channel = serde_json::from_str(r#"{"id":"c1"}"#).unwrap();
        assert_eq!(channel.channel_type, ChannelType::Text);
        assert!(channel.name.is_empty());
    }
}
