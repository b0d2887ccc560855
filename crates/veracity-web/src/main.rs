use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod state;
mod template;
mod upload;

use state::AppState;
use veracity_core::{Config, ScoringClient};
use veracity_pdf::TextExtractor;
use veracity_pdf_mupdf::MupdfBackend;

fn app(state: Arc<AppState>) -> Router {
    // Uploads past 10 MB are refused here; the extractor itself enforces
    // no limit.
    let body_limit = axum::extract::DefaultBodyLimit::max(10 * 1024 * 1024);

    Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route("/analyze", axum::routing::post(handlers::analyze::analyze))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    tracing::info!(scoring_url = %config.scoring_url, "starting veracity-web");

    // The extraction backend is constructed once here and passed in
    // explicitly; nothing in the pipeline reaches for global state.
    let extractor = TextExtractor::new(Arc::new(MupdfBackend::new()));
    let client = ScoringClient::new(&config)?;
    let state = Arc::new(AppState::new(extractor, client));

    let port = std::env::var("VERACITY_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let extractor = TextExtractor::new(Arc::new(MupdfBackend::new()));
        let client = ScoringClient::new(&Config::default()).expect("client");
        Arc::new(AppState::new(extractor, client))
    }

    fn multipart_upload(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let boundary = "veracity-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    #[tokio::test]
    async fn index_serves_the_upload_page() {
        let response = app(test_state())
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_without_resume_field_is_rejected() {
        let request = multipart_upload("unrelated", "a.pdf", b"%PDF-1.4");
        let response = app(test_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_with_non_pdf_upload_is_rejected() {
        let request = multipart_upload("resume", "resume.txt", b"plain text resume");
        let response = app(test_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_with_unreadable_pdf_fails_extraction() {
        let request = multipart_upload("resume", "resume.pdf", b"%PDF-1.4\nnot really a pdf");
        let response = app(test_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn analyze_while_busy_conflicts() {
        let state = test_state();
        {
            let mut session = state.session.lock().unwrap_or_else(|e| e.into_inner());
            session.select_document(veracity_core::SelectedDocument {
                name: "inflight.pdf".into(),
                data: b"%PDF-1.4".to_vec(),
            });
            session.begin().expect("begin");
        }

        let request = multipart_upload("resume", "resume.pdf", b"%PDF-1.4");
        let response = app(state).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
