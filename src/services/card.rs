use std::path::Path;

use anyhow::Context;

use crate::models::TicketRequest;

/// Escapes a value for placement inside a JSON string literal in the template.
fn escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Fills the ticket card template with the created ticket's data and parses
/// it as JSON. The template is read on every call.
pub fn render_ticket_card(
    template_path: &Path,
    ticket_id: &str,
    request: &TicketRequest,
) -> anyhow::Result<serde_json::Value> {
    let template = std::fs::read_to_string(template_path)
        .with_context(|| format!("failed to read card template {}", template_path.display()))?;

    let card_text = template
        .replace("{ticketId}", &escape(ticket_id))
        .replace("{severity}", &escape(&request.severity))
        .replace("{category}", &escape(&request.category))
        .replace("{description}", &escape(&request.description));

    serde_json::from_str(&card_text).context("rendered card is not valid JSON")
}
