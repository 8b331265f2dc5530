use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::classifier::{screen, Screening};
use crate::inference::InferenceService;
use crate::prompts::{messages, render_answer_prompt};

/// Trimmed model output shorter than this is not trusted.
pub const MIN_ANSWER_CHARS: usize = 10;

/// Which branch of the flow produced the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Invalid,
    Unsafe,
    Medical,
    Answered(String),
    TooShort,
    Failed,
}

impl Outcome {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Outcome::Invalid => "invalid",
            Outcome::Unsafe => "refused:unsafe",
            Outcome::Medical => "refused:medical",
            Outcome::Answered(_) => "answered",
            Outcome::TooShort => "fallback:too_short",
            Outcome::Failed => "fallback:failed",
        }
    }

    pub fn into_message(self) -> String {
        let fixed = messages();
        match self {
            Outcome::Answered(text) => text,
            Outcome::Invalid => fixed.invalid.clone(),
            Outcome::Unsafe => fixed.refused.clone(),
            Outcome::Medical => fixed.medical.clone(),
            Outcome::TooShort => fixed.too_short.clone(),
            Outcome::Failed => fixed.failed.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AnswerService {
    infer: InferenceService,
}

impl AnswerService {
    pub fn new(infer: InferenceService) -> Self {
        Self { infer }
    }

    /// Runs one question through validation, the keyword screens and, when
    /// both pass, a single completion call. Never fails: every error ends up
    /// as [`Outcome::Failed`].
    pub async fn answer(&self, question: Option<&Value>) -> Outcome {
        let request_id = Uuid::new_v4();

        let question = match question {
            None => "",
            Some(Value::String(text)) => text.as_str(),
            Some(_) => return Outcome::Invalid,
        };
        if question.is_empty() {
            return Outcome::Invalid;
        }

        let screening = screen(question);
        if screening != Screening::Pass {
            info!(%request_id, screening = screening.as_tag(), "question refused");
        }
        match screening {
            Screening::Unsafe => return Outcome::Unsafe,
            Screening::Medical => return Outcome::Medical,
            Screening::Pass => {}
        }

        let prompt = match render_answer_prompt(question) {
            Ok(prompt) => prompt,
            Err(err) => {
                error!(%request_id, error = %format!("{err:#}"), "prompt rendering failed");
                return Outcome::Failed;
            }
        };

        let raw = match self.infer.generate_completion(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                error!(%request_id, error = %err, "completion failed");
                return Outcome::Failed;
            }
        };

        let answer = raw.trim();
        if answer.chars().count() < MIN_ANSWER_CHARS {
            info!(%request_id, chars = answer.chars().count(), "answer too short, using fallback");
            return Outcome::TooShort;
        }

        info!(%request_id, question = %question, answer = %answer, "answered");
        Outcome::Answered(answer.to_string())
    }
}
