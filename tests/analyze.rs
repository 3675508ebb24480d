//! Integration tests for the analyze endpoint, driven with the mock
//! provider so no network is involved.
//!
//! Run with: cargo test --test analyze

use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use water_quality_service::config::AnalyzerConfig;
use water_quality_service::services::providers::mock::MockTextProvider;
use water_quality_service::startup::Application;

/// Spawn the application with the given mock provider; returns the port and
/// a handle to the provider's call counter.
async fn spawn_app(provider: MockTextProvider) -> (u16, Arc<AtomicUsize>) {
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("GEMINI_API_KEY", "test-api-key");
    std::env::set_var("GEMINI_MODEL", "gemini-2.5-flash");

    let calls = provider.call_counter();
    let config = AnalyzerConfig::load().expect("Failed to load config");
    let app = Application::with_provider(config, Arc::new(provider))
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    (port, calls)
}

fn complete_record() -> Value {
    json!({
        "location": "Kisumu, Kenya",
        "water_source": "shallow well",
        "ph_level": 6.2,
        "turbidity": 8,
        "bacteria_count": 120
    })
}

async fn post_analyze(port: u16, body: &Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/api/analyze", port))
        .json(body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn analyze_returns_decoded_model_output() {
    let provider = MockTextProvider::replying(
        r#"Sure! {"quality_assessment":"Fair","risk_level":"Medium","key_issues":["low pH"]}"#,
    );
    let (port, _) = spawn_app(provider).await;

    let response = post_analyze(port, &complete_record()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["analysis"]["quality_assessment"], "Fair");
    assert_eq!(body["analysis"]["risk_level"], "Medium");
    assert_eq!(body["analysis"]["key_issues"], json!(["low pH"]));
}

#[tokio::test]
async fn analyze_wraps_unparseable_output_in_fallback() {
    let provider = MockTextProvider::replying("The water looks murky, boil before drinking.");
    let (port, _) = spawn_app(provider).await;

    let response = post_analyze(port, &complete_record()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["analysis"]["quality_assessment"], "Analysis completed");
    assert_eq!(
        body["analysis"]["recommendations"],
        "The water looks murky, boil before drinking."
    );
    assert_eq!(
        body["analysis"]["full_analysis"],
        "The water looks murky, boil before drinking."
    );
}

#[tokio::test]
async fn analyze_degrades_provider_failure_into_success_envelope() {
    let provider = MockTextProvider::failing("quota exceeded for project");
    let (port, _) = spawn_app(provider).await;

    let response = post_analyze(port, &complete_record()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["analysis"]["quality_assessment"], "Unable to assess");
    assert_eq!(body["analysis"]["risk_level"], "Unknown");
    assert_eq!(body["analysis"]["recommendations"], json!([]));

    let error = body["analysis"]["error"].as_str().expect("error message");
    assert!(error.contains("quota exceeded for project"));
}

#[tokio::test]
async fn analyze_rejects_missing_fields_without_calling_model() {
    let provider = MockTextProvider::replying("{}");
    let (port, calls) = spawn_app(provider).await;

    let response = post_analyze(port, &json!({ "location": "Dhaka" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["error"],
        "Missing required fields: water_source, ph_level, turbidity"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_rejects_empty_required_values() {
    let provider = MockTextProvider::replying("{}");
    let (port, calls) = spawn_app(provider).await;

    let response = post_analyze(
        port,
        &json!({
            "location": "",
            "water_source": "tap",
            "ph_level": 7.2,
            "turbidity": 1
        }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Missing required fields: location");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_rejects_empty_body() {
    let provider = MockTextProvider::replying("{}");
    let (port, calls) = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/api/analyze", port))
        .header("content-type", "application/json")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "No data provided");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_rejects_json_null_body() {
    let provider = MockTextProvider::replying("{}");
    let (port, _) = spawn_app(provider).await;

    let response = post_analyze(port, &Value::Null).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn analyze_returns_internal_error_for_malformed_json() {
    let provider = MockTextProvider::replying("{}");
    let (port, _) = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/api/analyze", port))
        .header("content-type", "application/json")
        .body("{not json")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 500);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "error");
    let error = body["error"].as_str().expect("error message");
    assert!(error.starts_with("Internal server error:"));
}
