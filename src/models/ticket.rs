use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const SEVERITY_CHOICES: [&str; 3] = ["high", "normal", "low"];

/// Identifier the ticket service returns when it could not create a ticket.
pub const FAILED_TICKET_ID: i64 = -1;

/// Ticket fields collected over the course of one submit-ticket dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotSet {
    pub category: Option<String>,
    pub severity: Option<String>,
    pub description: String,
}

impl SlotSet {
    /// Projects the slots into a request once category and severity are known.
    pub fn to_request(&self) -> Option<TicketRequest> {
        Some(TicketRequest {
            category: self.category.clone()?,
            severity: self.severity.clone()?,
            description: self.description.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketRequest {
    pub category: String,
    pub severity: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TicketResult {
    Created(String),
    Failed,
}

impl TicketResult {
    /// Interprets the bare body returned by the ticket endpoint. Anything
    /// falsy or equal to the failure sentinel counts as a failure.
    pub fn from_body(body: &serde_json::Value) -> Self {
        match body {
            serde_json::Value::Number(n) => {
                let value = n.as_f64();
                if value == Some(FAILED_TICKET_ID as f64) || value == Some(0.0) {
                    TicketResult::Failed
                } else {
                    TicketResult::Created(n.to_string())
                }
            }
            serde_json::Value::String(s) => {
                let s = s.trim();
                if s.is_empty() || s == "-1" {
                    TicketResult::Failed
                } else {
                    TicketResult::Created(s.to_string())
                }
            }
            _ => TicketResult::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub category: String,
    pub severity: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}
