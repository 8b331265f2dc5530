use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod answer;
mod api;
mod classifier;
mod config;
mod inference;
mod prompts;

use answer::AnswerService;
use api::AppState;
use config::AppConfig;
use inference::{GroqService, InferenceService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Config
    // -----------------------------
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // -----------------------------
    // Shared state / Dependencies
    // -----------------------------
    let groq = GroqService::new(&config.groq);
    info!(model = groq.model(), temperature = config.groq.temperature, "completion service ready");

    let infer = InferenceService::new(Arc::new(groq));
    let state = AppState {
        answers: Arc::new(AnswerService::new(infer)),
        echo_question: config.echo_question,
    };

    // -----------------------------
    // Routers
    // -----------------------------
    let app = api::router()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("HTTP listening on http://{}", config.bind_addr);
    info!("Ask endpoint at http://{}/ask", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
