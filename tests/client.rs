use serde_json::json;
use thai_sentiment_desk::core::{
    http::SentimentClient,
    SentimentClass,
    SentimentError,
};
use wiremock::{
    matchers::{
        body_json,
        body_string_contains,
        header_regex,
        method,
        path,
    },
    Mock,
    MockServer,
    ResponseTemplate,
};

fn prediction(text: &str, sentiment: &str, probabilities: [f64; 3]) -> serde_json::Value {
    json!({
        "text": text,
        "sentiment": sentiment,
        "probabilities": [
            { "label": "เชิงลบ 😡", "probability": probabilities[0] },
            { "label": "เป็นกลาง 😐", "probability": probabilities[1] },
            { "label": "เชิงบวก 😄", "probability": probabilities[2] },
        ],
    })
}

fn client_for(server: &MockServer) -> SentimentClient {
    SentimentClient::new(server.uri()).unwrap()
}

#[tokio::test]
async fn test_predict_text_success() {
    let server = MockServer::start().await;
    let mut body = prediction("อาหารอร่อยมาก", "เชิงบวก 😄", [0.02, 0.08, 0.90]);
    body["summary"] = json!("ผู้เขียนชื่นชอบอาหาร");

    Mock::given(method("POST"))
        .and(path("/sentiment/predict"))
        .and(body_json(json!({ "text": "อาหารอร่อยมาก" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).predict_text("อาหารอร่อยมาก").await.unwrap();

    assert_eq!(result.sentiment, SentimentClass::Positive);
    assert_eq!(result.summary.as_deref(), Some("ผู้เขียนชื่นชอบอาหาร"));
    assert_eq!(result.formatted_confidence(), "90.0%");
}

#[tokio::test]
async fn test_empty_text_is_sent_and_detail_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sentiment/predict"))
        .and(body_json(json!({ "text": "" })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "กรุณากรอกข้อความ" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).predict_text("").await.unwrap_err();

    match &err {
        SentimentError::Service { status, detail } => {
            assert_eq!(*status, 400);
            assert_eq!(detail, "กรุณากรอกข้อความ");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.inline_message(),
        "เกิดข้อผิดพลาด: HTTP Error! Status: 400, ข้อความ: กรุณากรอกข้อความ"
    );
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sentiment/predict"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).predict_text("สวัสดี").await.unwrap_err();

    assert!(matches!(
        err,
        SentimentError::Service { status: 502, ref detail } if detail == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_unknown_label_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sentiment/predict"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(prediction("x", "โกรธ", [0.3, 0.3, 0.4])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).predict_text("x").await.unwrap_err();
    assert!(matches!(err, SentimentError::Json(_)));
}

#[tokio::test]
async fn test_predict_file_uploads_multipart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("comments.csv");
    std::fs::write(&file, "text\nดีมาก\nแย่มาก\n").unwrap();

    Mock::given(method("POST"))
        .and(path("/sentiment/predict_file"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\"; filename=\"comments.csv\""))
        .and(body_string_contains("ดีมาก"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                prediction("ดีมาก", "เชิงบวก 😄", [0.05, 0.10, 0.85]),
                prediction("แย่มาก", "เชิงลบ 😡", [0.80, 0.15, 0.05]),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).predict_file(&file).await.unwrap();

    let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["ดีมาก", "แย่มาก"]);
    assert_eq!(results[1].sentiment, SentimentClass::Negative);
}

#[tokio::test]
async fn test_missing_file_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let err =
        client_for(&server).predict_file(&dir.path().join("missing.csv")).await.unwrap_err();
    assert!(matches!(err, SentimentError::FailedToLoadFile(_)));
}

#[tokio::test]
async fn test_empty_batch_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sentiment/predict_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .predict_file_bytes("empty.txt".to_string(), Vec::new())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_predict_multiple_sends_texts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sentiment/predict_multiple"))
        .and(body_json(json!({ "texts": ["ดีมาก", "เฉยๆ"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                prediction("ดีมาก", "เชิงบวก 😄", [0.05, 0.10, 0.85]),
                prediction("เฉยๆ", "เป็นกลาง 😐", [0.20, 0.70, 0.10]),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let texts = vec!["ดีมาก".to_string(), "เฉยๆ".to_string()];
    let results = client_for(&server).predict_multiple(&texts).await.unwrap();
    assert_eq!(results[1].sentiment, SentimentClass::Neutral);
}

#[tokio::test]
async fn test_predict_youtube_sends_url() {
    let server = MockServer::start().await;
    let url = "https://www.youtube.com/watch?v=abc123";

    Mock::given(method("POST"))
        .and(path("/sentiment/youtube"))
        .and(body_json(json!({ "url": url })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [prediction("คลิปดีมาก", "เชิงบวก 😄", [0.01, 0.04, 0.95])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).predict_youtube(url).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = SentimentClient::new("http://127.0.0.1:9").unwrap();
    let err = client.predict_text("สวัสดี").await.unwrap_err();
    assert!(matches!(err, SentimentError::Reqwest(_)));
}
