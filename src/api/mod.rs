use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answer::AnswerService;

pub mod handlers;
pub mod types;

use handlers::{ask, index};

#[derive(Clone)]
pub struct AppState {
    pub answers: Arc<AnswerService>,
    pub echo_question: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        // GET / static page
        .route("/", get(index))
        // POST /ask {"question": "..."}
        .route("/ask", post(ask))
}
