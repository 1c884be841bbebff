//! Relay contract: upstream responses pass through verbatim, transport
//! failures become a local JSON error.

use gradeboard_core::storage::Store;
use gradeboard_server::proxy::{EvaluatorClient, EvaluatorError};
use gradeboard_server::server::{self, App};
use tempfile::tempdir;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(evaluator_url: &str) -> anyhow::Result<(String, tempfile::TempDir)> {
    let dir = tempdir()?;
    let store = Store::open(&dir.path().join("gradeboard.db"))?;
    store.init_schema()?;
    let app = App {
        store,
        evaluator: EvaluatorClient::new(evaluator_url),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = server::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), dir))
}

#[tokio::test]
async fn upstream_success_is_relayed_verbatim() -> anyhow::Result<()> {
    let upstream = MockServer::start().await;
    let subject_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/evaluate/subject/{subject_id}")))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"queued\": true}")
                .insert_header("x-evaluation-run", "run-17"),
        )
        .mount(&upstream)
        .await;

    let client = EvaluatorClient::new(&upstream.uri());
    let relayed = client.trigger_subject_evaluation(subject_id).await?;

    assert_eq!(relayed.status, 200);
    assert_eq!(relayed.body, b"{\"queued\": true}");
    assert!(relayed
        .headers
        .iter()
        .any(|(name, value)| name == "x-evaluation-run" && value == b"run-17"));
    Ok(())
}

#[tokio::test]
async fn upstream_error_status_is_relayed_not_rewritten() -> anyhow::Result<()> {
    let upstream = MockServer::start().await;
    let subject_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/evaluate/subject/{subject_id}")))
        .respond_with(ResponseTemplate::new(502).set_body_string("evaluator overloaded"))
        .mount(&upstream)
        .await;

    let client = EvaluatorClient::new(&upstream.uri());
    let relayed = client.trigger_subject_evaluation(subject_id).await?;

    // an upstream failure is still a relayed response, not a local error
    assert_eq!(relayed.status, 502);
    assert_eq!(relayed.body, b"evaluator overloaded");
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_a_local_error() {
    let client = EvaluatorClient::new("http://127.0.0.1:1");
    let err = client
        .trigger_subject_evaluation(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluatorError::Unreachable(_)));
}

#[tokio::test]
async fn evaluate_route_passes_upstream_through() -> anyhow::Result<()> {
    let upstream = MockServer::start().await;
    let subject_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/evaluate/subject/{subject_id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"queued\": true}")
                .insert_header("x-evaluation-run", "run-17"),
        )
        .mount(&upstream)
        .await;

    let (base, _dir) = spawn_app(&upstream.uri()).await?;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/subject/{subject_id}/evaluate"))
        .send()
        .await?;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("x-evaluation-run")
            .and_then(|v| v.to_str().ok()),
        Some("run-17")
    );
    assert_eq!(resp.text().await?, "{\"queued\": true}");
    Ok(())
}

#[tokio::test]
async fn evaluate_route_reports_local_failure_as_json_error() -> anyhow::Result<()> {
    let (base, _dir) = spawn_app("http://127.0.0.1:1").await?;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/subject/{}/evaluate", Uuid::new_v4()))
        .send()
        .await?;

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await?;
    let message = body["error"].as_str().expect("error field present");
    assert!(message.contains("evaluator unreachable"));
    Ok(())
}

#[tokio::test]
async fn evaluate_route_rejects_malformed_ids_without_calling_upstream() -> anyhow::Result<()> {
    let upstream = MockServer::start().await;
    // no mock mounted: any upstream call would 404 the mock server, but the
    // route must 404 locally before reaching it
    let (base, _dir) = spawn_app(&upstream.uri()).await?;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/subject/not-a-uuid/evaluate"))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    assert_eq!(upstream.received_requests().await.unwrap_or_default().len(), 0);
    Ok(())
}
