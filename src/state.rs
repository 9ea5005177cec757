use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::messaging::ChannelConnector;
use crate::services::recognizer::IntentRecognizer;
use crate::services::search::KnowledgeBase;
use crate::services::tickets::TicketClient;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub recognizer: Box<dyn IntentRecognizer>,
    pub connector: Box<dyn ChannelConnector>,
    pub tickets: Box<dyn TicketClient>,
    pub knowledge_base: Box<dyn KnowledgeBase>,
}
