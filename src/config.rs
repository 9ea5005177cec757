use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub ticket_submission_url: String,
    pub search_account: String,
    pub search_index: String,
    pub search_key: String,
    pub app_id: String,
    pub app_password: String,
    pub luis_model_url: String,
    pub card_template_path: String,
    pub http_timeout_secs: u64,
    pub conversation_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3978);

        Self {
            port,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "helpdesk.db".to_string()),
            ticket_submission_url: env::var("TICKET_SUBMISSION_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            search_account: env::var("AZURE_SEARCH_ACCOUNT").unwrap_or_default(),
            search_index: env::var("AZURE_SEARCH_INDEX").unwrap_or_default(),
            search_key: env::var("AZURE_SEARCH_KEY").unwrap_or_default(),
            app_id: env::var("MICROSOFT_APP_ID").unwrap_or_default(),
            app_password: env::var("MICROSOFT_APP_PASSWORD").unwrap_or_default(),
            luis_model_url: env::var("LUIS_MODEL_URL").unwrap_or_default(),
            card_template_path: env::var("CARD_TEMPLATE_PATH")
                .unwrap_or_else(|_| "cards/ticket.json".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            conversation_ttl_minutes: env::var("CONVERSATION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
