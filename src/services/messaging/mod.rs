pub mod botframework;

use async_trait::async_trait;

use crate::models::{Activity, ChannelAccount, Reply};

/// Addressing information needed to post into an existing conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRef {
    pub service_url: String,
    pub conversation_id: String,
    pub bot: ChannelAccount,
    pub user: ChannelAccount,
}

impl ConversationRef {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            service_url: activity.service_url.clone(),
            conversation_id: activity.conversation.id.clone(),
            bot: activity.recipient.clone(),
            user: activity.from.clone(),
        }
    }
}

#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn send(&self, to: &ConversationRef, reply: &Reply) -> anyhow::Result<()>;
}
