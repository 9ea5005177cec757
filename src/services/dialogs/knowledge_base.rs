use crate::models::{RecognizedIntent, Reply};
use crate::services::recognizer::entity::find_entity;
use crate::services::search::{category_filter, KnowledgeBase};

pub const USAGE_HINT: &str = "Try typing something like _explore hardware_.";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Ooops! Something went wrong while contacting Azure Search. Please try again later.";

/// Single-turn lookup of knowledge-base articles for the recognized category.
pub async fn explore(knowledge_base: &dyn KnowledgeBase, intent: &RecognizedIntent) -> Reply {
    let Some(category) = find_entity(intent, "category").map(|e| e.entity.as_str()) else {
        return Reply::text(USAGE_HINT);
    };

    match knowledge_base.search(&category_filter(category)).await {
        Ok(result) => {
            let mut message = format!(
                "These are some articles I've found in the knowledge base for the _'{category}'_ category:"
            );
            for article in &result.value {
                message.push_str(&format!("\n * {}", article.title));
            }
            Reply::text(message)
        }
        Err(e) => {
            tracing::error!(category, error = %e, "knowledge base search failed");
            Reply::text(SEARCH_FAILED_MESSAGE)
        }
    }
}
