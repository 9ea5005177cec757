use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::ticket::FAILED_TICKET_ID;
use crate::models::{Ticket, TicketRequest};
use crate::state::AppState;

// POST /api/tickets
//
// Responds with the bare id of the stored ticket, or -1 if it could not be
// stored.
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TicketRequest>,
) -> Json<i64> {
    let result = {
        let db = state.db.lock().unwrap();
        queries::create_ticket(&db, &request)
    };

    match result {
        Ok(id) => {
            tracing::info!(ticket_id = id, category = %request.category, severity = %request.severity, "ticket stored");
            Json(id)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to store ticket");
            Json(FAILED_TICKET_ID)
        }
    }
}

// GET /api/tickets
pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Ticket>>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(Json(queries::list_tickets(&db)?))
}

// GET /api/tickets/:id
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, AppError> {
    let db = state.db.lock().unwrap();
    queries::get_ticket(&db, id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ticket {id}")))
}
