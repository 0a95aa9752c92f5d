mod common;

use anyhow::{Context, Result};

#[test]
fn posts_collection_contract() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let health = client
        .get(format!("{}/healthz", guard.base_url))
        .send()
        .context("GET /healthz")?;
    assert!(health.status().is_success());

    // Bounded page.
    let page: Vec<serde_json::Value> = client
        .get(format!("{}/posts?_limit=3", guard.base_url))
        .send()
        .context("GET /posts?_limit=3")?
        .error_for_status()
        .context("GET /posts status")?
        .json()
        .context("parse page")?;
    assert_eq!(page.len(), 3);
    assert!(page[0].get("id").is_some());
    assert!(page[0].get("body").is_some());

    // Writes append and assign the next id.
    let created: serde_json::Value = client
        .post(format!("{}/posts", guard.base_url))
        .json(&serde_json::json!({ "title": "T", "body": "B", "local_id": "1" }))
        .send()
        .context("POST /posts")?
        .error_for_status()
        .context("POST /posts status")?
        .json()
        .context("parse created post")?;
    assert_eq!(created["title"], "T");
    assert!(created["id"].as_u64().unwrap_or(0) > 12);

    // Unknown routes 404 through the composed router.
    let missing = client
        .get(format!("{}/definitely-not-a-route", guard.base_url))
        .send()
        .context("GET unknown route")?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn reject_writes_mode_fails_posts_but_serves_reads() -> Result<()> {
    let guard = common::spawn_rejecting_server()?;
    let client = reqwest::blocking::Client::new();

    let page = client
        .get(format!("{}/posts?_limit=1", guard.base_url))
        .send()
        .context("GET /posts")?;
    assert!(page.status().is_success());

    let rejected = client
        .post(format!("{}/posts", guard.base_url))
        .json(&serde_json::json!({ "title": "T", "body": "B" }))
        .send()
        .context("POST /posts")?;
    assert_eq!(rejected.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    Ok(())
}
