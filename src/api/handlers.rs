use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{
    types::{AskRequest, AskResponse},
    AppState,
};

const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.html"));

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Always answers 200; an unreadable body is treated like a missing question.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Json<AskResponse> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable /ask body");
            AskRequest::default()
        }
    };

    let outcome = state.answers.answer(req.question.as_ref()).await;
    debug!(outcome = outcome.as_tag(), "ask handled");

    let question = state
        .echo_question
        .then(|| req.question.unwrap_or_else(|| Value::String(String::new())));

    Json(AskResponse {
        question,
        answer: outcome.into_message(),
    })
}
