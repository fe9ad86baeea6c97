mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
#[ignore] // Requires DATABASE_URL pointing at PostgreSQL
async fn login_checks_credentials() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let username = common::unique("login");

    let res = client
        .post(server.url("/users"))
        .json(&json!({"username": username, "email": "login@example.com", "password": "right"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(server.url("/login"))
        .json(&json!({"username": username, "password": "right"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["username"], username.as_str());
    assert!(body.get("message").is_some());
    assert!(body.get("password").is_none());

    let wrong = client
        .post(server.url("/login"))
        .json(&json!({"username": username, "password": "wrong"}))
        .send()
        .await?;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = wrong.json::<Value>().await?;

    let unknown = client
        .post(server.url("/login"))
        .json(&json!({"username": common::unique("nobody"), "password": "wrong"}))
        .send()
        .await?;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>().await?, wrong_body);
    Ok(())
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL pointing at PostgreSQL
async fn login_rejects_get() -> Result<()> {
    let server = common::spawn_server().await?;
    let res = reqwest::Client::new().get(server.url("/login")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
