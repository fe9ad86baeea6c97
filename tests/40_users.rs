mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
#[ignore] // Requires DATABASE_URL pointing at PostgreSQL
async fn users_never_expose_passwords() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let username = common::unique("alice");

    let res = client
        .post(server.url("/users"))
        .json(&json!({"username": username, "email": "alice@example.com", "password": "hunter2"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert!(created.get("password").is_none(), "{}", created);

    let res = client
        .get(server.url(&format!("/users/{}", created["id"])))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched["username"], username.as_str());
    assert!(fetched.get("password").is_none(), "{}", fetched);

    let res = client
        .delete(server.url(&format!("/users/{}", created["id"])))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL pointing at PostgreSQL
async fn deleting_missing_user_is_idempotent() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.delete(server.url("/users/2147483646")).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}
