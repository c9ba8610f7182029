//! CLI Status Command
//!
//! Queries `/health` on a running server.

use std::time::Duration;

use anyhow::{bail, Result};

use crate::output::{note_error, note_success};

pub async fn run(host: &str, port: u16) -> Result<()> {
    let url = format!("http://{host}:{port}/health");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body: serde_json::Value = resp.json().await?;
            note_success(&format!("redactor is running on {host}:{port}"));
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Ok(resp) => {
            note_error(&format!("{url} answered {}", resp.status()));
            bail!("health check failed");
        }
        Err(_) => {
            note_error(&format!("redactor is not running on {host}:{port}"));
            bail!("health check failed");
        }
    }
}
