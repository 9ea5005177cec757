use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::task::JoinHandle;

use crate::db::queries;
use crate::models::{Conversation, Intent, Reply, TicketDialog};
use crate::services::dialogs::ticket::{self, Step};
use crate::services::dialogs::{knowledge_base, not_understood, HELP_MESSAGE};
use crate::services::messaging::ConversationRef;
use crate::services::tickets::spawn_submission;
use crate::state::AppState;

/// Outcome of one user turn.
#[derive(Debug, Default)]
pub struct Turn {
    /// Replies to send now, in order.
    pub replies: Vec<Reply>,
    /// Set when the turn confirmed a ticket. The dialog has already ended;
    /// the task sends its own follow-ups when the ticket service answers.
    pub submission: Option<JoinHandle<()>>,
}

impl Turn {
    fn reply(reply: Reply) -> Self {
        Self {
            replies: vec![reply],
            submission: None,
        }
    }
}

pub async fn process_message(
    state: &Arc<AppState>,
    to: &ConversationRef,
    text: &str,
) -> anyhow::Result<Turn> {
    let active = {
        let db = state.db.lock().unwrap();
        queries::get_conversation(&db, &to.conversation_id)?
    }
    .and_then(|conv| conv.dialog);

    // A suspended dialog takes the message; the recognizer only sees
    // messages that start something new.
    let step = match active {
        Some(dialog) => {
            tracing::info!(
                conversation = %to.conversation_id,
                stage = dialog.stage.as_str(),
                "resuming ticket dialog"
            );
            ticket::resume(dialog, text)
        }
        None => {
            let recognized = state.recognizer.recognize(text).await?;
            tracing::info!(
                conversation = %to.conversation_id,
                intent = recognized.intent.as_str(),
                score = recognized.score,
                "recognized message"
            );

            match recognized.intent {
                Intent::SubmitTicket => ticket::begin(text, &recognized),
                Intent::ExploreKnowledgeBase => {
                    let reply =
                        knowledge_base::explore(state.knowledge_base.as_ref(), &recognized).await;
                    return Ok(Turn::reply(reply));
                }
                Intent::Help => return Ok(Turn::reply(Reply::text(HELP_MESSAGE))),
                Intent::Unknown => return Ok(Turn::reply(Reply::text(not_understood(text)))),
            }
        }
    };

    apply_step(state, to, step)
}

fn apply_step(state: &Arc<AppState>, to: &ConversationRef, step: Step) -> anyhow::Result<Turn> {
    match step {
        Step::Prompt { dialog, reply } => {
            save_dialog(state, &to.conversation_id, dialog)?;
            Ok(Turn::reply(reply))
        }
        Step::Submit(request) => {
            end_dialog(state, &to.conversation_id)?;
            tracing::info!(
                conversation = %to.conversation_id,
                category = %request.category,
                severity = %request.severity,
                "ticket confirmed, submitting"
            );
            let handle = spawn_submission(Arc::clone(state), to.clone(), request);
            Ok(Turn {
                replies: Vec::new(),
                submission: Some(handle),
            })
        }
        Step::Declined(reply) => {
            end_dialog(state, &to.conversation_id)?;
            tracing::info!(conversation = %to.conversation_id, "ticket declined");
            Ok(Turn::reply(reply))
        }
    }
}

fn save_dialog(state: &AppState, conversation_id: &str, dialog: TicketDialog) -> anyhow::Result<()> {
    let now = Utc::now().naive_utc();
    let conv = Conversation {
        id: conversation_id.to_string(),
        dialog: Some(dialog),
        last_activity: now,
        expires_at: now + Duration::minutes(state.config.conversation_ttl_minutes),
    };

    let db = state.db.lock().unwrap();
    queries::save_conversation(&db, &conv)
}

fn end_dialog(state: &AppState, conversation_id: &str) -> anyhow::Result<()> {
    let db = state.db.lock().unwrap();
    queries::delete_conversation(&db, conversation_id)
}
