pub mod client;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::fees::calculator::GasCostSummary;
pub use client::{DryRunResponse, SuiRpcClient, DEFAULT_MAINNET_RPC};

/// Read-only chain query the fee calculator depends on.
#[async_trait]
pub trait DryRunQuery: Send + Sync {
    /// Dry-run a base64 BCS transaction and return its gas-cost report.
    async fn dry_run(&self, tx_b64: &str) -> Result<GasCostSummary>;
}

#[async_trait]
impl<T: DryRunQuery + ?Sized> DryRunQuery for Arc<T> {
    async fn dry_run(&self, tx_b64: &str) -> Result<GasCostSummary> {
        (**self).dry_run(tx_b64).await
    }
}

/// Process-wide mainnet read client, built on first use.
static DEFAULT_CLIENT: OnceCell<Arc<SuiRpcClient>> = OnceCell::new();

pub fn default_client() -> Result<Arc<SuiRpcClient>> {
    DEFAULT_CLIENT
        .get_or_try_init(|| SuiRpcClient::new(DEFAULT_MAINNET_RPC).map(Arc::new))
        .cloned()
}
