mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn level_out_of_range_is_rejected_and_nothing_persists() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    for level in [0, 101, -5] {
        let res = app
            .client
            .post(app.url("/api/skills"))
            .bearer_auth(&token)
            .json(&json!({"name": "Rust", "level": level, "image": "http://x/rust.png"}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "level {level}");
        assert_eq!(res.json::<Value>().await?["error"], "Level must be between 1 and 100");
    }
    assert_eq!(app.store.skill_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn boundary_levels_are_accepted() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    for level in [1, 100] {
        let res = app
            .client
            .post(app.url("/api/skills"))
            .bearer_auth(&token)
            .json(&json!({"name": format!("skill-{level}"), "level": level, "image": "http://x/s.png"}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.json::<Value>().await?["level"], level);
    }

    let list: Value = app.client.get(app.url("/api/skills")).send().await?.json().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn rejected_level_updates_leave_row_unchanged() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    let created: Value = app
        .client
        .post(app.url("/api/skills"))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust", "level": 80, "image": "http://x/rust.png"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let attempts = [
        (Method::PATCH, format!("/api/skills/{}", id), json!({"level": 150})),
        (Method::PATCH, format!("/api/skills?id={}", id), json!({"name": "Rust", "level": 0})),
        (Method::PUT, format!("/api/skills/{}", id), json!({"name": "Rust", "level": 0})),
        (Method::PUT, format!("/api/skills?id={}", id), json!({"name": "Rust", "level": 101})),
    ];

    for (method, path, body) in attempts {
        let res = app
            .client
            .request(method.clone(), app.url(&path))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{method} {path}");
        assert_eq!(res.json::<Value>().await?["error"], "Level must be between 1 and 100");

        let stored: Value = app
            .client
            .get(app.url(&format!("/api/skills/{}", id)))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(stored["level"], 80, "after {method} {path}");
        assert_eq!(stored, created);
    }
    Ok(())
}

#[tokio::test]
async fn full_update_keeps_image_when_omitted() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    let created: Value = app
        .client
        .post(app.url("/api/skills"))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust", "level": 80, "image": "http://x/rust.png"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let res = app
        .client
        .put(app.url(&format!("/api/skills/{}", id)))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust", "level": 95}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["level"], 95);
    assert_eq!(updated["image"], "http://x/rust.png");

    let fetched: Value = app
        .client
        .get(app.url(&format!("/api/skills?id={}", id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn patch_by_query_needs_name_and_level() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    let created: Value = app
        .client
        .post(app.url("/api/skills"))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust", "level": 80, "image": "http://x/rust.png"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    let url = app.url(&format!("/api/skills?id={}", id));

    let res = app.client.patch(&url).bearer_auth(&token).json(&json!({"level": 50})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Missing required fields");

    let res = app
        .client
        .patch(&url)
        .bearer_auth(&token)
        .json(&json!({"name": "Go", "level": 50}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["name"], "Go");
    assert_eq!(updated["level"], 50);
    assert_eq!(updated["image"], "http://x/rust.png");
    Ok(())
}

#[tokio::test]
async fn delete_of_non_uuid_id_fails_generically() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    let res = app
        .client
        .delete(app.url("/api/skills?id=missing-id"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["error"], "Failed to delete skill");
    Ok(())
}

#[tokio::test]
async fn level_must_be_an_integer() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.admin_token().await?;

    let res = app
        .client
        .post(app.url("/api/skills"))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust", "level": "high", "image": "http://x/rust.png"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.skill_count().await, 0);
    Ok(())
}
