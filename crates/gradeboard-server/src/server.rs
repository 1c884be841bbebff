use crate::proxy::EvaluatorClient;
use crate::routes;
use axum::routing::{get, post};
use axum::Router;
use gradeboard_core::storage::Store;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct App {
    pub store: Store,
    pub evaluator: EvaluatorClient,
}

pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/subject/{id}", get(routes::subject_detail))
        .route("/logs", get(routes::request_logs))
        .route("/api/subject/{id}/evaluate", post(routes::trigger_evaluation))
        .with_state(app)
}

pub async fn serve(listener: tokio::net::TcpListener, app: App) -> anyhow::Result<()> {
    axum::serve(listener, router(app)).await?;
    Ok(())
}
