use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::models::{Reply, TicketRequest, TicketResult};
use crate::services::card::render_ticket_card;
use crate::services::messaging::ConversationRef;
use crate::state::AppState;

pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Something went wrong while I was saving your ticket. Please try again later.";

#[async_trait]
pub trait TicketClient: Send + Sync {
    async fn create_ticket(&self, request: &TicketRequest) -> anyhow::Result<TicketResult>;
}

/// Calls the `/api/tickets` endpoint under the configured submission URL.
pub struct HttpTicketClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTicketClient {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build ticket HTTP client")?;
        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl TicketClient for HttpTicketClient {
    async fn create_ticket(&self, request: &TicketRequest) -> anyhow::Result<TicketResult> {
        let url = format!("{}/api/tickets", self.base_url.trim_end_matches('/'));

        let body: serde_json::Value = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("failed to call ticket service")?
            .error_for_status()
            .context("ticket service returned error")?
            .json()
            .await
            .context("failed to parse ticket service response")?;

        Ok(TicketResult::from_body(&body))
    }
}

/// Starts the one submission attempt for a confirmed ticket. The caller does
/// not wait on the returned handle; the task reports back to the
/// conversation on its own.
pub fn spawn_submission(
    state: Arc<AppState>,
    to: ConversationRef,
    request: TicketRequest,
) -> JoinHandle<()> {
    tokio::spawn(async move { submit_ticket(&state, &to, &request).await })
}

pub async fn submit_ticket(state: &AppState, to: &ConversationRef, request: &TicketRequest) {
    let result = match state.tickets.create_ticket(request).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(conversation = %to.conversation_id, error = %e, "ticket submission failed");
            TicketResult::Failed
        }
    };

    let ticket_id = match result {
        TicketResult::Created(id) => id,
        TicketResult::Failed => {
            tracing::warn!(conversation = %to.conversation_id, "ticket service could not create ticket");
            send(state, to, &Reply::text(SUBMISSION_FAILED_MESSAGE)).await;
            return;
        }
    };

    tracing::info!(conversation = %to.conversation_id, ticket_id = %ticket_id, "ticket created");
    let confirmation = format!("Awesome! Your ticket has been created with the number {ticket_id}.");
    send(state, to, &Reply::text(confirmation)).await;

    let template = Path::new(&state.config.card_template_path);
    match render_ticket_card(template, &ticket_id, request) {
        Ok(card) => send(state, to, &Reply::card(card)).await,
        Err(e) => {
            tracing::error!(ticket_id = %ticket_id, error = %e, "failed to render ticket card");
        }
    }
}

async fn send(state: &AppState, to: &ConversationRef, reply: &Reply) {
    if let Err(e) = state.connector.send(to, reply).await {
        tracing::error!(conversation = %to.conversation_id, error = %e, "failed to send follow-up");
    }
}
