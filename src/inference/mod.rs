pub mod error;
pub mod groq;

use std::sync::Arc;

use async_trait::async_trait;

pub use error::{CompletionError, Result};
pub use groq::GroqService;

/// A hosted model that turns one prompt into one block of text.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct InferenceService {
    engine: Arc<dyn CompletionEngine>,
}

impl InferenceService {
    pub fn new(engine: Arc<dyn CompletionEngine>) -> Self {
        Self { engine }
    }

    pub async fn generate_completion(&self, prompt: &str) -> Result<String> {
        self.engine.complete(prompt).await
    }
}
