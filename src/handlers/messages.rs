use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::db::queries;
use crate::models::{Activity, Reply};
use crate::services::conversation;
use crate::services::messaging::ConversationRef;
use crate::state::AppState;

const FALLBACK_MESSAGE: &str = "Sorry, I'm having trouble right now. Please try again in a moment.";

/// Inbound endpoint for the bot connector. Replies go out through the
/// connector; the HTTP response only acknowledges receipt.
pub async fn receive_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> StatusCode {
    if !activity.is_message() {
        tracing::debug!(kind = %activity.kind, "ignoring non-message activity");
        return StatusCode::ACCEPTED;
    }

    let to = ConversationRef::from_activity(&activity);
    let text = activity.text.as_deref().unwrap_or_default();

    tracing::info!(conversation = %to.conversation_id, text = %text, "incoming message");

    match conversation::process_message(&state, &to, text).await {
        Ok(turn) => {
            for reply in &turn.replies {
                if let Err(e) = state.connector.send(&to, reply).await {
                    tracing::error!(error = %e, "failed to send reply");
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, conversation = %to.conversation_id, "conversation processing failed");
            if let Err(e) = state.connector.send(&to, &Reply::text(FALLBACK_MESSAGE)).await {
                tracing::error!(error = %e, "failed to send fallback reply");
            }
        }
    }

    // Abandoned dialogs are reclaimed once their TTL passes.
    {
        let db = state.db.lock().unwrap();
        match queries::expire_old_conversations(&db) {
            Ok(0) => {}
            Ok(n) => tracing::debug!(expired = n, "expired abandoned conversations"),
            Err(e) => tracing::warn!(error = %e, "failed to expire conversations"),
        }
    }

    StatusCode::ACCEPTED
}
