//! Integration tests for [`ScoringClient`] against a local axum mock of
//! the scoring service. No external network access.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::json;

use veracity_core::{Config, RequestError, ScoringClient};

/// Serve `router` on an ephemeral port and return its address.
async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock");
    });
    addr
}

fn client_for(addr: SocketAddr) -> ScoringClient {
    let config = Config::default()
        .with_scoring_url(format!("http://{addr}/process"))
        .with_timeout(Duration::from_secs(5));
    ScoringClient::new(&config).expect("build client")
}

#[tokio::test]
async fn success_body_is_passed_through_unvalidated() {
    let router = Router::new().route(
        "/process",
        post(|| async {
            axum::Json(json!({
                "riskScore": 62,
                "redFlagsAnalysis": ["Vague metrics"],
                "strategicRecommendation": ["Verify references"],
                "extraField": true,
            }))
        }),
    );
    let addr = spawn(router).await;

    let raw = client_for(addr).submit("resume text").await.unwrap();
    assert_eq!(raw["riskScore"], 62);
    // Unknown fields survive: the client does not validate shape.
    assert_eq!(raw["extraField"], true);
}

#[tokio::test]
async fn request_carries_resume_text_as_sole_payload_field() {
    let router = Router::new().route(
        "/process",
        post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
            assert_eq!(body, json!({ "resumeText": "the resume" }));
            axum::Json(json!({ "riskScore": 1 }))
        }),
    );
    let addr = spawn(router).await;

    client_for(addr).submit("the resume").await.unwrap();
}

#[tokio::test]
async fn http_error_prefers_server_provided_message() {
    let router = Router::new().route(
        "/process",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": "Failed to process the resume." })),
            )
        }),
    );
    let addr = spawn(router).await;

    let err = client_for(addr).submit("text").await.unwrap_err();
    match err {
        RequestError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to process the resume.");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_without_json_body_falls_back_to_generic_message() {
    let router = Router::new().route(
        "/process",
        post(|| async { (StatusCode::BAD_REQUEST, "not json") }),
    );
    let addr = spawn(router).await;

    let err = client_for(addr).submit("text").await.unwrap_err();
    match err {
        RequestError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "scoring service returned HTTP 400");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_success_body_is_malformed_response() {
    let router = Router::new().route("/process", post(|| async { "<html>oops</html>" }));
    let addr = spawn(router).await;

    let err = client_for(addr).submit("text").await.unwrap_err();
    assert!(matches!(err, RequestError::MalformedResponse));
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Bind and immediately drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).submit("text").await.unwrap_err();
    assert!(matches!(err, RequestError::Network(_)));
}
