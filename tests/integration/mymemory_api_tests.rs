/*!
 * Tests for the MyMemory client against a local HTTP server
 */

use std::time::Duration;

use chunkwise::errors::ProviderError;
use chunkwise::providers::mymemory::MyMemory;
use chunkwise::providers::{Provider, TranslationRequest};
use chunkwise::translation::TranslationService;

use crate::common::mock_server::{CannedResponse, MockServer};
use crate::common::{self, THREE_SEGMENT_TEXT, THREE_SEGMENTS};

fn client(server: &MockServer) -> MyMemory {
    MyMemory::new(server.endpoint.clone(), Duration::from_secs(5))
}

/// Test a successful request and its query string
#[tokio::test]
async fn test_translate_withSuccessfulReply_shouldReturnTranslatedText() {
    common::init_test_logging();
    let server = MockServer::start(vec![CannedResponse::translation("नमस्ते दुनिया")]).await;
    let provider = client(&server).with_contact_email("ops@example.com");

    let result = provider
        .translate(&TranslationRequest::new("Hello world", "en", "hi"))
        .await
        .unwrap();

    assert_eq!(result, "नमस्ते दुनिया");
    let lines = server.request_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("GET /get?"), "{}", lines[0]);
    assert!(lines[0].contains("q=Hello+world"), "{}", lines[0]);
    assert!(lines[0].contains("langpair=en%7Chi"), "{}", lines[0]);
    assert!(lines[0].contains("de=ops%40example.com"), "{}", lines[0]);
}

/// Test that the autodetect sentinel is passed through in the language pair
#[tokio::test]
async fn test_translate_withAutodetect_shouldSendSentinel() {
    let server = MockServer::start(vec![CannedResponse::translation("नमस्ते")]).await;
    let provider = client(&server);

    provider
        .translate(&TranslationRequest::autodetect("Hello", "hi"))
        .await
        .unwrap();

    assert!(server.request_lines()[0].contains("langpair=Autodetect%7Chi"));
}

/// Test that an HTTP 500 is an API error
#[tokio::test]
async fn test_translate_withServerError_shouldReturnApiError() {
    let server = MockServer::start(vec![CannedResponse::with_status(500, "oops")]).await;

    let error = client(&server)
        .translate(&TranslationRequest::new("Hello", "en", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::ApiError { status_code: 500, .. }));
    assert!(error.is_retryable());
}

/// Test that HTTP 429 is reported as rate limiting
#[tokio::test]
async fn test_translate_withTooManyRequests_shouldReturnRateLimit() {
    let server = MockServer::start(vec![CannedResponse::with_status(429, "slow down")]).await;

    let error = client(&server)
        .translate(&TranslationRequest::new("Hello", "en", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::RateLimitExceeded(_)));
}

/// Test that a non-JSON body is a parse error
#[tokio::test]
async fn test_translate_withInvalidJson_shouldReturnParseError() {
    let server = MockServer::start(vec![CannedResponse::ok("<html>maintenance</html>")]).await;

    let error = client(&server)
        .translate(&TranslationRequest::new("Hello", "en", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::ParseError(_)));
}

/// Test that the "select two distinct languages" reply is an error, not a translation
#[tokio::test]
async fn test_translate_withDistinctLanguagesReply_shouldReturnSameLanguageError() {
    let body = serde_json::json!({
        "responseData": { "translatedText": "PLEASE SELECT TWO DISTINCT LANGUAGES" },
        "responseStatus": "403",
        "responseDetails": "PLEASE SELECT TWO DISTINCT LANGUAGES"
    });
    let server = MockServer::start(vec![CannedResponse::ok(body.to_string())]).await;

    let error = client(&server)
        .translate(&TranslationRequest::autodetect("Hello", "en"))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::SameLanguage(_)));
}

/// Test that an unreachable endpoint is a transport error
#[tokio::test]
async fn test_translate_withClosedPort_shouldFail() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let provider = MyMemory::new(format!("http://{}/get", addr), Duration::from_secs(2));

    let error = provider
        .translate(&TranslationRequest::new("Hello", "en", "hi"))
        .await
        .unwrap_err();

    assert!(error.is_retryable(), "unexpected error: {:?}", error);
}

/// Test the whole pipeline over HTTP with one failing segment
#[tokio::test]
async fn test_pipeline_withMyMemoryAndOneFailure_shouldFallBackForThatSegment() {
    common::init_test_logging();
    let server = MockServer::start(vec![
        CannedResponse::translation("पहला"),
        CannedResponse::with_status(503, "busy"),
        CannedResponse::translation("तीसरा"),
    ])
    .await;
    let service = TranslationService::new(client(&server), common::fast_options(30));

    let outcome = service.translate_detailed(THREE_SEGMENT_TEXT, "hi", "en").await;

    assert_eq!(outcome.text, format!("पहला {} तीसरा", THREE_SEGMENTS[1]));
    assert_eq!(outcome.fell_back, vec![1]);
    assert_eq!(server.request_lines().len(), 3);
}

/// Test that the same-language reply keeps the original text
#[tokio::test]
async fn test_pipeline_withDistinctLanguagesReply_shouldKeepOriginalText() {
    let body = serde_json::json!({
        "responseData": { "translatedText": "PLEASE SELECT TWO DISTINCT LANGUAGES" },
        "responseStatus": 403
    });
    let server = MockServer::start(vec![CannedResponse::ok(body.to_string())]).await;
    let service = TranslationService::with_defaults(client(&server));

    let result = service.translate_text("Already English.", "en").await;

    assert_eq!(result, "Already English.");
}
