//! Integration tests for the text-submission and job-status endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

use redraft_core::job::JobState;
use redraft_store::{JobQueue, JobStore};

const TEXT: &str = "This is a sufficiently long sample sentence.";

fn status_uri(job_id: &str, token: &str) -> String {
    format!("/api/v1/jobs?job_id={job_id}&token={token}")
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_returns_201_with_credentials() {
    let app = common::build_test_app();

    let response = post_json(app.router.clone(), "/api/v1/text", json!({ "text": TEXT })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Job created");
    assert_eq!(body["job_id"].as_str().unwrap().len(), 10);
    assert_eq!(body["token"].as_str().unwrap().len(), 20);

    // The id is queued for the worker.
    let queued = app.queue.peek().await.unwrap();
    assert_eq!(queued.as_deref(), body["job_id"].as_str());
}

#[tokio::test]
async fn submit_then_immediate_poll_reports_processing() {
    let app = common::build_test_app();

    let response = post_json(app.router.clone(), "/api/v1/text", json!({ "text": TEXT })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    let uri = status_uri(
        body["job_id"].as_str().unwrap(),
        body["token"].as_str().unwrap(),
    );
    let response = get(app.router, &uri).await;

    // Never "no job found": the record is readable as soon as the
    // creation response is out.
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Job is being processed");
}

#[tokio::test]
async fn short_text_is_rejected_before_the_core() {
    let app = common::build_test_app();

    let response = post_json(
        app.router.clone(),
        "/api/v1/text",
        json!({ "text": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Text is too short");

    // Nothing was created or queued.
    assert_eq!(app.queue.peek().await.unwrap(), None);
}

#[tokio::test]
async fn missing_text_field_is_rejected() {
    let app = common::build_test_app();

    let response = post_json(app.router, "/api/v1/text", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Text is required");
}

#[tokio::test]
async fn oversized_text_is_rejected() {
    let app = common::build_test_app();

    let response = post_json(
        app.router,
        "/api/v1/text",
        json!({ "text": "a".repeat(201) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Text is too long");
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completed_job_returns_output_text() {
    let app = common::build_test_app();
    let created = app.manager.create_job(TEXT).await.unwrap();

    // Simulate a successful worker cycle.
    app.store
        .update_state_and_output(&created.job_id, JobState::Completed, "Fixed sentence.")
        .await
        .unwrap();

    let response = get(app.router, &status_uri(&created.job_id, &created.token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["state"], "completed");
    assert_eq!(body["output_text"], "Fixed sentence.");
}

#[tokio::test]
async fn unknown_credentials_report_an_error() {
    let app = common::build_test_app();

    // Well-formed lengths, but no such job.
    let response = get(app.router, &status_uri("zzzzzzzzzz", &"t".repeat(20))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No job found");
}

#[tokio::test]
async fn malformed_credential_lengths_are_rejected() {
    let app = common::build_test_app();

    for uri in [
        &status_uri("short", &"t".repeat(20)),
        &status_uri("zzzzzzzzzz", "short"),
        &"/api/v1/jobs?job_id=zzzzzzzzzz".to_string(),
        &"/api/v1/jobs".to_string(),
    ] {
        let response = get(app.router.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Wrong job_id or token provided");
    }
}

#[tokio::test]
async fn wrong_token_never_exposes_output() {
    let app = common::build_test_app();
    let created = app.manager.create_job(TEXT).await.unwrap();
    app.store
        .update_state_and_output(&created.job_id, JobState::Completed, "Fixed sentence.")
        .await
        .unwrap();

    let response = get(
        app.router,
        &status_uri(&created.job_id, &"x".repeat(20)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Wrong job_id or token provided");
    assert!(
        body.get("output_text").is_none(),
        "Output must not leak on a wrong token"
    );
}

#[tokio::test]
async fn status_reads_are_idempotent() {
    let app = common::build_test_app();
    let created = app.manager.create_job(TEXT).await.unwrap();
    app.store
        .update_state_and_output(&created.job_id, JobState::Completed, "Fixed sentence.")
        .await
        .unwrap();

    let uri = status_uri(&created.job_id, &created.token);
    let first = body_json(get(app.router.clone(), &uri).await).await;
    let second = body_json(get(app.router.clone(), &uri).await).await;

    assert_eq!(first, second);
}
