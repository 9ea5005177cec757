use std::sync::{Arc, Mutex};

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use helpdesk_bot::config::AppConfig;
use helpdesk_bot::db;
use helpdesk_bot::services::messaging::botframework::BotFrameworkConnector;
use helpdesk_bot::services::recognizer::luis::LuisRecognizer;
use helpdesk_bot::services::search::AzureSearchClient;
use helpdesk_bot::services::tickets::HttpTicketClient;
use helpdesk_bot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    if config.luis_model_url.is_empty() {
        tracing::warn!("LUIS_MODEL_URL not set, every message will fail recognition");
    }
    if config.app_id.is_empty() {
        tracing::warn!("MICROSOFT_APP_ID not set, replies are sent unauthenticated (emulator mode)");
    }
    tracing::info!(url = %config.ticket_submission_url, "submitting tickets");

    let timeout = config.http_timeout();
    let recognizer = LuisRecognizer::new(config.luis_model_url.clone(), timeout)?;
    let connector =
        BotFrameworkConnector::new(config.app_id.clone(), config.app_password.clone(), timeout)?;
    let tickets = HttpTicketClient::new(config.ticket_submission_url.clone(), timeout)?;
    let knowledge_base = AzureSearchClient::new(
        config.search_account.clone(),
        config.search_index.clone(),
        config.search_key.clone(),
        timeout,
    )?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        recognizer: Box::new(recognizer),
        connector: Box::new(connector),
        tickets: Box::new(tickets),
        knowledge_base: Box::new(knowledge_base),
    });

    let app = helpdesk_bot::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
