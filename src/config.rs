use anyhow::{bail, Context, Result};

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Connection details for the hosted completion API.
#[derive(Clone)]
pub struct GroqSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub groq: GroqSettings,
    pub bind_addr: String,
    /// When set, `/ask` replies also carry the question as received.
    pub echo_question: bool,
}

impl AppConfig {
    /// Reads the process environment, with a `.env` file layered underneath.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if api_key.is_empty() {
            bail!("GROQ_API_KEY not set");
        }

        let model = lookup("GROQ_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup("GROQ_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("GROQ_TEMPERATURE is not a number: {raw}"))?,
            None => DEFAULT_TEMPERATURE,
        };

        let base_url = lookup("GROQ_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let echo_question = lookup("ECHO_QUESTION")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            groq: GroqSettings {
                api_key,
                model,
                temperature,
                base_url,
            },
            bind_addr,
            echo_question,
        })
    }
}
