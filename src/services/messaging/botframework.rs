use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use super::{ChannelConnector, ConversationRef};
use crate::models::Reply;

const TOKEN_URL: &str = "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token";
const TOKEN_SCOPE: &str = "https://api.botframework.com/.default";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Posts replies to the Bot Framework connector service of the channel the
/// conversation came from. Without app credentials (local emulator) requests
/// are sent unauthenticated.
pub struct BotFrameworkConnector {
    app_id: String,
    app_password: String,
    client: reqwest::Client,
    token: Mutex<Option<(String, Instant)>>,
}

impl BotFrameworkConnector {
    pub fn new(app_id: String, app_password: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build connector HTTP client")?;
        Ok(Self {
            app_id,
            app_password,
            client,
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> anyhow::Result<Option<String>> {
        if self.app_id.is_empty() {
            return Ok(None);
        }

        let mut cached = self.token.lock().await;
        if let Some((token, expires)) = cached.as_ref() {
            if Instant::now() < *expires {
                return Ok(Some(token.clone()));
            }
        }

        let resp: TokenResponse = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_password.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await
            .context("failed to request connector token")?
            .error_for_status()
            .context("token endpoint returned error")?
            .json()
            .await
            .context("failed to parse connector token")?;

        // Refresh a minute early.
        let lifetime = Duration::from_secs(resp.expires_in.saturating_sub(60));
        *cached = Some((resp.access_token.clone(), Instant::now() + lifetime));
        Ok(Some(resp.access_token))
    }
}

pub fn reply_activity(to: &ConversationRef, reply: &Reply) -> serde_json::Value {
    let mut activity = json!({
        "type": "message",
        "from": to.bot,
        "recipient": to.user,
        "conversation": { "id": to.conversation_id },
        "text": reply.text,
    });

    if !reply.buttons.is_empty() {
        let actions: Vec<_> = reply
            .buttons
            .iter()
            .map(|b| json!({ "type": "imBack", "title": b, "value": b }))
            .collect();
        activity["suggestedActions"] = json!({ "actions": actions });
    }

    if !reply.attachments.is_empty() {
        activity["attachments"] = json!(reply.attachments);
    }

    activity
}

#[async_trait]
impl ChannelConnector for BotFrameworkConnector {
    async fn send(&self, to: &ConversationRef, reply: &Reply) -> anyhow::Result<()> {
        let url = format!(
            "{}/v3/conversations/{}/activities",
            to.service_url.trim_end_matches('/'),
            urlencoding::encode(&to.conversation_id)
        );

        let mut request = self.client.post(&url).json(&reply_activity(to, reply));
        if let Some(token) = self.access_token().await? {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .context("failed to post reply activity")?
            .error_for_status()
            .context("connector service returned error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChannelAccount;

    fn target() -> ConversationRef {
        ConversationRef {
            service_url: "http://localhost:9000/".to_string(),
            conversation_id: "conv-1".to_string(),
            bot: ChannelAccount {
                id: "bot".to_string(),
                name: Some("Help Desk".to_string()),
            },
            user: ChannelAccount {
                id: "user".to_string(),
                name: None,
            },
        }
    }

    #[test]
    fn test_plain_reply_has_no_actions() {
        let activity = reply_activity(&target(), &Reply::text("hello"));
        assert_eq!(activity["text"], "hello");
        assert_eq!(activity["from"]["id"], "bot");
        assert_eq!(activity["recipient"]["id"], "user");
        assert!(activity.get("suggestedActions").is_none());
        assert!(activity.get("attachments").is_none());
    }

    #[test]
    fn test_buttons_become_suggested_actions() {
        let reply = Reply::with_buttons("pick one", &["high", "normal", "low"]);
        let activity = reply_activity(&target(), &reply);
        let actions = activity["suggestedActions"]["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1]["value"], "normal");
        assert_eq!(actions[1]["type"], "imBack");
    }

    #[test]
    fn test_card_attachment() {
        let reply = Reply::card(json!({"type": "AdaptiveCard"}));
        let activity = reply_activity(&target(), &reply);
        assert_eq!(
            activity["attachments"][0]["contentType"],
            "application/vnd.microsoft.card.adaptive"
        );
        assert_eq!(activity["attachments"][0]["content"]["type"], "AdaptiveCard");
    }
}
