use async_trait::async_trait;

/// Sends a signed transaction for execution.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    /// `tx_b64` is the BCS transaction data, `signatures` the base64
    /// serialized signatures. Returns the raw execution response.
    async fn execute(
        &self,
        tx_b64: String,
        signatures: Vec<String>,
    ) -> anyhow::Result<serde_json::Value>;
}
