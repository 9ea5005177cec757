use serde::{Deserialize, Serialize};

pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationAccount {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub content: serde_json::Value,
}

/// Bot Framework activity envelope. Only the fields the bot reads or
/// echoes back are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub from: ChannelAccount,
    #[serde(default)]
    pub recipient: ChannelAccount,
    pub conversation: ConversationAccount,
    #[serde(default)]
    pub service_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl Activity {
    pub fn is_message(&self) -> bool {
        self.kind == "message"
    }
}

/// Outbound message: text plus optional buttons and card attachments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<String>,
    pub attachments: Vec<Attachment>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_buttons(text: impl Into<String>, buttons: &[&str]) -> Self {
        Self {
            text: text.into(),
            buttons: buttons.iter().map(|b| b.to_string()).collect(),
            attachments: Vec::new(),
        }
    }

    pub fn card(content: serde_json::Value) -> Self {
        Self {
            text: String::new(),
            buttons: Vec::new(),
            attachments: vec![Attachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
                content,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inbound_message_activity() {
        let json = r#"{
            "type": "message",
            "id": "abc",
            "text": "I cannot print",
            "from": {"id": "user1", "name": "User"},
            "recipient": {"id": "bot"},
            "conversation": {"id": "conv-1"},
            "serviceUrl": "https://smba.trafficmanager.net/emea/",
            "channelId": "emulator"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.is_message());
        assert_eq!(activity.text.as_deref(), Some("I cannot print"));
        assert_eq!(activity.conversation.id, "conv-1");
        assert_eq!(activity.service_url, "https://smba.trafficmanager.net/emea/");
    }

    #[test]
    fn test_conversation_update_is_not_message() {
        let json = r#"{"type":"conversationUpdate","conversation":{"id":"c"}}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(!activity.is_message());
        assert!(activity.text.is_none());
    }
}
