use anyhow::{Context, Result};
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Deserialize;

// NOTE:
// The answer template and every fixed reply live in lang/en/prompts.json
// so wording can change without touching the request flow.

pub const MAX_QUESTION_WORDS: usize = 50;

const ANSWER_TEMPLATE: &str = "answer_prompt";

#[derive(Deserialize)]
struct PromptFile {
    answer_template: String,
    messages: FixedMessages,
}

/// Replies sent back without consulting the model.
#[derive(Debug, Deserialize)]
pub struct FixedMessages {
    pub invalid: String,
    pub refused: String,
    pub medical: String,
    pub too_short: String,
    pub failed: String,
}

struct PromptSet {
    env: Environment<'static>,
    messages: FixedMessages,
}

macro_rules! prompt_file {
    ($lang:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/lang/",
            $lang,
            "/prompts.json"
        ))
    };
}

static EN_PROMPTS: Lazy<PromptSet> = Lazy::new(|| load_prompt_set(prompt_file!("en")));

fn load_prompt_set(raw: &str) -> PromptSet {
    let parsed: PromptFile = serde_json::from_str(raw).expect("invalid prompt config");
    let mut env = Environment::new();
    env.add_template_owned(ANSWER_TEMPLATE, parsed.answer_template)
        .expect("invalid answer template");
    PromptSet {
        env,
        messages: parsed.messages,
    }
}

pub fn messages() -> &'static FixedMessages {
    &EN_PROMPTS.messages
}

/// Keeps the first `max_words` whitespace-delimited words of a long question.
/// Short questions come back untouched, including their original spacing.
pub fn summarize_question(question: &str, max_words: usize) -> String {
    let words: Vec<&str> = question.split_whitespace().collect();
    if words.len() > max_words {
        words[..max_words].join(" ")
    } else {
        question.to_string()
    }
}

pub fn render_answer_prompt(question: &str) -> Result<String> {
    let question = summarize_question(question, MAX_QUESTION_WORDS);
    EN_PROMPTS
        .env
        .get_template(ANSWER_TEMPLATE)
        .and_then(|tpl| tpl.render(context! { question => question }))
        .context("failed to render answer prompt")
}
