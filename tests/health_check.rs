//! Integration tests for the health and landing endpoints.
//!
//! Run with: cargo test --test health_check

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use water_quality_service::config::AnalyzerConfig;
use water_quality_service::services::providers::mock::MockTextProvider;
use water_quality_service::startup::Application;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("GEMINI_API_KEY", "test-api-key");
    std::env::set_var("GEMINI_MODEL", "gemini-2.5-flash");

    let config = AnalyzerConfig::load().expect("Failed to load config");
    let app = Application::with_provider(config, Arc::new(MockTextProvider::replying("{}")))
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_fixed_payload() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Water Quality AI Analyzer");
    assert_eq!(body["sdg"], "SDG 6 - Clean Water and Sanitation");
}

#[tokio::test]
async fn landing_page_is_served() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Water Quality AI Analyzer"));
}
