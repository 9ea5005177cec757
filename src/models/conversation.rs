use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::SlotSet;

/// Where a suspended submit-ticket dialog will resume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStage {
    CollectSeverity,
    CollectCategory,
    Confirm,
}

impl TicketStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStage::CollectSeverity => "collect_severity",
            TicketStage::CollectCategory => "collect_category",
            TicketStage::Confirm => "confirm",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketDialog {
    pub stage: TicketStage,
    pub slots: SlotSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub dialog: Option<TicketDialog>,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}
