use crate::proxy::{EvaluatorError, RelayedResponse};
use crate::render;
use crate::server::App;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use gradeboard_core::errors::DashboardError;
use gradeboard_core::stats::{accuracy, usage};
use serde_json::json;
use uuid::Uuid;

pub async fn index(State(app): State<App>) -> Response {
    match app.store.list_subjects() {
        Ok(subjects) => Html(render::index_page(&subjects)).into_response(),
        Err(e) => store_failure("/", &e),
    }
}

pub async fn subject_detail(State(app): State<App>, Path(id): Path<String>) -> Response {
    // malformed ids get the same 404 as unknown ones
    let Ok(subject_id) = Uuid::parse_str(&id) else {
        return not_found();
    };
    match load_subject_page(&app, subject_id) {
        Ok(page) => Html(page).into_response(),
        Err(DashboardError::SubjectNotFound(_)) => not_found(),
        Err(e) => store_failure("/subject", &e),
    }
}

fn load_subject_page(app: &App, subject_id: Uuid) -> gradeboard_core::errors::Result<String> {
    let Some(subject) = app.store.get_subject(subject_id)? else {
        return Err(DashboardError::SubjectNotFound(subject_id));
    };
    let subject_accuracy = accuracy::subject_accuracy(&app.store, subject_id)?;
    let questions = app.store.subject_questions(subject_id)?;
    Ok(render::subject_page(&subject, &subject_accuracy, &questions))
}

pub async fn request_logs(State(app): State<App>) -> Response {
    match usage::usage_summary(&app.store) {
        Ok(summary) => Html(render::logs_page(&summary)).into_response(),
        Err(e) => store_failure("/logs", &e),
    }
}

pub async fn trigger_evaluation(State(app): State<App>, Path(id): Path<String>) -> Response {
    let Ok(subject_id) = Uuid::parse_str(&id) else {
        return not_found();
    };
    match app.evaluator.trigger_subject_evaluation(subject_id).await {
        Ok(relayed) => {
            tracing::info!(
                event = "evaluation_relayed",
                subject_id = %subject_id,
                upstream_status = relayed.status
            );
            relay_response(relayed)
        }
        Err(e @ EvaluatorError::Unreachable(_)) => {
            tracing::error!(
                event = "evaluator_unreachable",
                subject_id = %subject_id,
                error = %e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn relay_response(relayed: RelayedResponse) -> Response {
    let mut builder = Response::builder().status(relayed.status);
    for (name, value) in &relayed.headers {
        builder = builder.header(name.as_str(), value.as_slice());
    }
    match builder.body(Body::from(relayed.body)) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(event = "relay_rebuild_failed", error = %e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to relay evaluator response" })),
            )
                .into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page())).into_response()
}

fn store_failure(route: &str, err: &DashboardError) -> Response {
    // detail stays in the log; the client gets a generic body
    tracing::error!(event = "aggregation_failure", route, error = %err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render::error_page("internal aggregation failure")),
    )
        .into_response()
}
