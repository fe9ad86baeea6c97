#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::Executor;

const SCHEMA: &str = include_str!("../../db/schema.sql");

/// A server process bound to a free port; killed when dropped
pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_keepnotes-api"))
            .env("DATABASE_URL", database_url)
            .env("KEEPNOTES_PORT", port.to_string())
            .env("RUST_LOG", "keepnotes_api=warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Apply the schema and start a server against `DATABASE_URL`.
pub async fn spawn_server() -> Result<TestServer> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must point at a PostgreSQL database for integration tests")?;

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .context("failed to connect to test database")?;
    pool.execute(SCHEMA).await.context("failed to apply schema")?;
    pool.close().await;

    let server = TestServer::spawn(&database_url)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Name that will not collide with rows left behind by earlier runs
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}_{}_{}", prefix, std::process::id(), nanos)
}
