//! BlockRazor priority endpoint: JSON-RPC `sui_executeTransactionBlock`
//! with an `auth_token` header.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::settings::{ExecuteRequestType, Settings};
use crate::submit::iface::Submitter;

pub const AUTH_HEADER: &str = "auth_token";

#[derive(Clone)]
pub struct BlockRazorHttp {
    url: String,
    auth_token: Option<String>,
    request_type: ExecuteRequestType,
    client: Client,
}

impl BlockRazorHttp {
    pub fn new(
        url: String,
        auth_token: Option<String>,
        request_type: ExecuteRequestType,
    ) -> Result<Self> {
        if url.is_empty() {
            return Err(anyhow!("BlockRazor RPC url is not configured"));
        }
        info!("🚀 [BLOCKRZ] HTTP submitter initialized: {}", url);
        Ok(Self {
            url,
            auth_token,
            request_type,
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .context("building http client")?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.blockrz_rpc_url.clone(),
            settings.auth_token.clone(),
            settings.request_type,
        )
    }

    pub fn request_body(&self, tx_b64: &str, signatures: &[String]) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "sui_executeTransactionBlock",
            "params": [
                tx_b64,
                signatures,
                { "showEffects": true },
                self.request_type.to_string()
            ]
        })
    }
}

#[async_trait]
impl Submitter for BlockRazorHttp {
    async fn execute(&self, tx_b64: String, signatures: Vec<String>) -> Result<Value> {
        if signatures.is_empty() {
            return Err(anyhow!("refusing to submit an unsigned transaction"));
        }
        let start_time = Instant::now();
        let body = self.request_body(&tx_b64, &signatures);

        let mut req = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.auth_token {
            req = req.header(AUTH_HEADER, token);
        }
        let res = req.send().await?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            warn!("⚠️ [BLOCKRZ] HTTP {}: {}", status, err_text);
            return Err(anyhow!("BlockRazor HTTP {}: {}", status, err_text));
        }

        let resp: Value = res.json().await?;
        if let Some(err) = resp.get("error") {
            return Err(anyhow!("BlockRazor RPC error: {}", err));
        }
        let result = resp
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("Missing 'result' in response: {:?}", resp))?;

        info!(
            "⚡ [BLOCKRZ] Executed in {}ms: {}",
            start_time.elapsed().as_millis(),
            result["digest"].as_str().unwrap_or("<no digest>")
        );
        Ok(result)
    }
}
