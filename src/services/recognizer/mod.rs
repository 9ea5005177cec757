pub mod entity;
pub mod luis;

use async_trait::async_trait;

use crate::models::RecognizedIntent;

#[async_trait]
pub trait IntentRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> anyhow::Result<RecognizedIntent>;
}
