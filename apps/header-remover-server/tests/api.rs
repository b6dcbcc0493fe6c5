//! HTTP API tests

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;
use tower::ServiceExt;

use common::{headed_pdf, lowercase_header_pdf, page_texts, single_header_pdf, BODY, HEADER};
use header_remover_server::{app, config::Config, state::AppState};

fn server() -> TestServer {
    TestServer::new(app(AppState::default())).unwrap()
}

fn pdf_part(bytes: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_type("application/pdf")
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn root_describes_the_endpoint() {
    let server = server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "PDF Header Remover API çalışıyor.");
    assert_eq!(body["endpoint"], "/remove-headers");
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn health_reports_version() {
    let server = server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn returns_redacted_pdf_attachment() {
    let server = server();

    let form = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_part("file", pdf_part(headed_pdf(2), "q3-report.pdf"));

    let response = server.post("/remove-headers").multipart(form).await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"q3-report_noheaders.pdf\""
    );

    let texts = page_texts(response.as_bytes());
    assert_eq!(texts.len(), 2);
    for text in texts {
        assert!(text.contains(BODY));
        assert_eq!(text.matches(HEADER).count(), 1);
    }
}

#[tokio::test]
async fn octet_stream_upload_is_accepted() {
    let server = server();

    let form = MultipartForm::new().add_text("header_texts", HEADER).add_part(
        "file",
        Part::bytes(headed_pdf(1))
            .file_name("scan")
            .mime_type("application/octet-stream"),
    );

    let response = server.post("/remove-headers").multipart(form).await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"scan_noheaders.pdf\""
    );
}

#[tokio::test]
async fn rejects_non_pdf_content_type() {
    let server = server();

    let form = MultipartForm::new().add_text("header_texts", HEADER).add_part(
        "file",
        Part::bytes(headed_pdf(1))
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );

    let response = server.post("/remove-headers").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(error_message(&body), "Lütfen PDF dosyası yükleyin.");
}

#[tokio::test]
async fn rejects_blank_header_texts() {
    let server = server();

    let form = MultipartForm::new()
        .add_text("header_texts", "  \n \n")
        .add_part("file", pdf_part(headed_pdf(1), "a.pdf"));

    let response = server.post("/remove-headers").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(error_message(&body), "En az bir header metni girilmelidir.");
}

#[tokio::test]
async fn rejects_missing_fields() {
    let server = server();

    let only_terms = MultipartForm::new().add_text("header_texts", HEADER);
    server
        .post("/remove-headers")
        .multipart(only_terms)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let only_file = MultipartForm::new().add_part("file", pdf_part(headed_pdf(1), "a.pdf"));
    server
        .post("/remove-headers")
        .multipart(only_file)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_unreadable_pdf() {
    let server = server();

    let form = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_part("file", pdf_part(b"PK\x03\x04 not a pdf".to_vec(), "broken.pdf"));

    let response = server.post("/remove-headers").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(error_message(&body).starts_with("PDF açılamadı"), "{body}");
}

#[tokio::test]
async fn rejects_malformed_numbers() {
    let server = server();

    let form = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_text("band_mm", "tall")
        .add_part("file", pdf_part(headed_pdf(1), "a.pdf"));

    server
        .post("/remove-headers")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_negative_band() {
    let server = server();

    let form = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_text("band_mm", "-5")
        .add_part("file", pdf_part(headed_pdf(1), "a.pdf"));

    server
        .post("/remove-headers")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ignore_case_field_is_honoured() {
    let server = server();

    let exact = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_part("file", pdf_part(lowercase_header_pdf(), "a.pdf"));
    let response = server.post("/remove-headers").multipart(exact).await;
    response.assert_status_ok();
    assert!(page_texts(response.as_bytes())[0].contains("confidential draft"));

    let folded = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_text("ignore_case", "true")
        .add_part("file", pdf_part(lowercase_header_pdf(), "a.pdf"));
    let response = server.post("/remove-headers").multipart(folded).await;
    response.assert_status_ok();
    let text = &page_texts(response.as_bytes())[0];
    assert!(!text.contains("confidential draft"));
    assert!(text.contains(BODY));
}

#[tokio::test]
async fn upload_limit_comes_from_config() {
    let mut config = Config::default();
    config.server.max_upload_bytes = 512;
    let server = TestServer::new(app(AppState::new(config))).unwrap();

    let form = MultipartForm::new()
        .add_text("header_texts", HEADER)
        .add_part("file", pdf_part(headed_pdf(4), "big.pdf"));

    let response = server.post("/remove-headers").multipart(form).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn ignore_case_matches_shouted_header() {
    let server = server();

    for (flag, survives) in [("false", true), ("true", false)] {
        let form = MultipartForm::new()
            .add_text("header_texts", "Header")
            .add_text("ignore_case", flag)
            .add_part("file", pdf_part(single_header_pdf("HEADER"), "a.pdf"));

        let response = server.post("/remove-headers").multipart(form).await;
        response.assert_status_ok();

        let text = &page_texts(response.as_bytes())[0];
        assert_eq!(text.contains("HEADER"), survives, "ignore_case={flag}: {text:?}");
        assert!(text.contains(BODY));
    }
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/remove-headers")
        .header(header::ORIGIN, "https://example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(AppState::default()).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
