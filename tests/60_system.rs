mod common;

use anyhow::Result;
use folio_api::database::Store;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_store() -> Result<()> {
    let app = common::spawn_app().await?;
    app.store.close().await;

    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(body["error"], "Database unavailable");
    Ok(())
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let app = common::spawn_app().await?;

    let body: Value = app.client.get(app.url("/")).send().await?.json().await?;
    assert_eq!(body["name"], "Folio API");
    assert_eq!(body["environment"], "development");
    assert!(body["endpoints"]["projects"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_json_404s() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.client.get(app.url("/nope")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn oversized_bodies_are_refused() -> Result<()> {
    let mut config = common::test_config();
    config.api.max_request_size_bytes = 64;
    let app = common::spawn_app_with(config).await?;

    let res = app
        .client
        .post(app.url("/api/contact"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(format!(r#"{{"name":"Bob","email":"bob@example.com","message":"{}"}}"#, "x".repeat(512)))
        .send()
        .await?;
    assert!(res.status().is_client_error(), "status {}", res.status());
    assert_eq!(app.store.contact_count().await, 0);
    Ok(())
}
