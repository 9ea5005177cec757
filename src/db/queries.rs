use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Conversation, Ticket, TicketDialog, TicketRequest};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Conversations ──

pub fn get_conversation(conn: &Connection, id: &str) -> anyhow::Result<Option<Conversation>> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let row = conn
        .query_row(
            "SELECT id, dialog, last_activity, expires_at FROM conversations WHERE id = ?1 AND expires_at > ?2",
            params![id, now],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((id, dialog_json, last_activity, expires_at)) = row else {
        return Ok(None);
    };

    // A record we cannot decode is treated as no active dialog.
    let dialog = dialog_json.and_then(|json| match serde_json::from_str::<TicketDialog>(&json) {
        Ok(dialog) => Some(dialog),
        Err(e) => {
            tracing::warn!(conversation = %id, error = %e, "discarding undecodable dialog state");
            None
        }
    });

    Ok(Some(Conversation {
        id,
        dialog,
        last_activity: parse_timestamp(&last_activity),
        expires_at: parse_timestamp(&expires_at),
    }))
}

pub fn save_conversation(conn: &Connection, conv: &Conversation) -> anyhow::Result<()> {
    let dialog_json = conv
        .dialog
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let last_activity = conv.last_activity.format(TIMESTAMP_FORMAT).to_string();
    let expires_at = conv.expires_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO conversations (id, dialog, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
           dialog = excluded.dialog,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![conv.id, dialog_json, last_activity, expires_at],
    )?;
    Ok(())
}

pub fn delete_conversation(conn: &Connection, id: &str) -> anyhow::Result<()> {
    conn.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn expire_old_conversations(conn: &Connection) -> anyhow::Result<usize> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let count = conn.execute("DELETE FROM conversations WHERE expires_at <= ?1", params![now])?;
    Ok(count)
}

// ── Tickets ──

pub fn create_ticket(conn: &Connection, request: &TicketRequest) -> rusqlite::Result<i64> {
    let created_at = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    conn.execute(
        "INSERT INTO tickets (category, severity, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![request.category, request.severity, request.description, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
    let created_at: String = row.get(4)?;
    Ok(Ticket {
        id: row.get(0)?,
        category: row.get(1)?,
        severity: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_timestamp(&created_at),
    })
}

pub fn get_ticket(conn: &Connection, id: i64) -> rusqlite::Result<Option<Ticket>> {
    conn.query_row(
        "SELECT id, category, severity, description, created_at FROM tickets WHERE id = ?1",
        params![id],
        row_to_ticket,
    )
    .optional()
}

pub fn list_tickets(conn: &Connection) -> rusqlite::Result<Vec<Ticket>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, severity, description, created_at FROM tickets ORDER BY id DESC",
    )?;
    let tickets = stmt
        .query_map([], row_to_ticket)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}
