//! Minimal Sui fullnode JSON-RPC client.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use crate::fees::calculator::GasCostSummary;
use crate::ptb::{parse_address, ObjectRef};
use crate::rpc::DryRunQuery;

/// Default official mainnet fullnode.
pub const DEFAULT_MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub gas_used: GasCostSummary,
    #[serde(default)]
    pub status: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResponse {
    pub effects: TransactionEffects,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    object_id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    digest: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
}

#[derive(Clone)]
pub struct SuiRpcClient {
    url: String,
    client: Client,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("building http client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!("[RPC] {} -> {}", method, self.url);

        let res = self.client.post(&self.url).json(&body).send().await?;
        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(anyhow!("{} HTTP {}: {}", method, status, err_text));
        }

        let resp: Value = res.json().await?;
        parse_rpc_result(method, resp)
    }

    /// `sui_dryRunTransactionBlock`: execute without committing, returns effects.
    pub async fn dry_run_transaction_block(&self, tx_b64: &str) -> Result<DryRunResponse> {
        self.call("sui_dryRunTransactionBlock", json!([tx_b64])).await
    }

    /// Latest `(version, digest)` of an object, e.g. the gas coin.
    pub async fn get_object_ref(&self, object_id: &str) -> Result<ObjectRef> {
        let resp: ObjectResponse = self
            .call("sui_getObject", json!([object_id, {}]))
            .await
            .with_context(|| format!("sui_getObject {object_id}"))?;
        object_ref_from(object_id, resp)
    }

    pub async fn get_reference_gas_price(&self) -> Result<u64> {
        // Returned as a JSON string (BigInt) by the fullnode.
        let v: Value = self.call("suix_getReferenceGasPrice", json!([])).await?;
        match &v {
            Value::String(s) => s.parse().with_context(|| format!("gas price {s:?}")),
            Value::Number(n) => n.as_u64().ok_or_else(|| anyhow!("gas price {n}")),
            other => Err(anyhow!("unexpected gas price: {other}")),
        }
    }
}

#[async_trait]
impl DryRunQuery for SuiRpcClient {
    async fn dry_run(&self, tx_b64: &str) -> Result<GasCostSummary> {
        Ok(self.dry_run_transaction_block(tx_b64).await?.effects.gas_used)
    }
}

fn parse_rpc_result<T: DeserializeOwned>(method: &str, mut resp: Value) -> Result<T> {
    if let Some(err) = resp.get("error") {
        let code = err["code"].as_i64().unwrap_or_default();
        let message = err["message"].as_str().unwrap_or_default();
        return Err(anyhow!("{} RPC error {}: {}", method, code, message));
    }
    let result = resp
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| anyhow!("Missing 'result' in {} response: {:?}", method, resp))?;
    serde_json::from_value(result).with_context(|| format!("decoding {method} result"))
}

fn object_ref_from(object_id: &str, resp: ObjectResponse) -> Result<ObjectRef> {
    let data = resp
        .data
        .ok_or_else(|| anyhow!("object not found or deleted: {object_id}"))?;
    if data.version.is_empty() || data.digest.is_empty() {
        return Err(anyhow!(
            "invalid object data: id={} version={} digest={}",
            data.object_id,
            data.version,
            data.digest
        ));
    }
    Ok(ObjectRef {
        object_id: parse_address(&data.object_id)?,
        version: data
            .version
            .parse()
            .with_context(|| format!("object version {:?}", data.version))?,
        digest: data.digest.parse()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ptb::ObjectDigest;

    #[test]
    fn dry_run_result_is_decoded() {
        let resp = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "effects": {
                    "status": { "status": "success" },
                    "gasUsed": {
                        "computationCost": "1000000",
                        "storageCost": "2000000",
                        "storageRebate": "978120",
                        "nonRefundableStorageFee": "9880"
                    }
                },
                "events": []
            }
        });
        let out: DryRunResponse = parse_rpc_result("sui_dryRunTransactionBlock", resp).unwrap();
        assert_eq!(out.effects.gas_used.computation_cost, "1000000");
        assert_eq!(out.effects.gas_used.storage_cost, "2000000");
    }

    #[test]
    fn rpc_error_is_surfaced() {
        let resp = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid params" }
        });
        let err = parse_rpc_result::<DryRunResponse>("sui_dryRunTransactionBlock", resp)
            .unwrap_err()
            .to_string();
        assert!(err.contains("-32602"));
        assert!(err.contains("Invalid params"));
    }

    #[test]
    fn object_ref_requires_data() {
        let missing = ObjectResponse { data: None };
        assert!(object_ref_from("0x5", missing).is_err());

        let empty = ObjectResponse {
            data: Some(ObjectData {
                object_id: "0x5".into(),
                version: String::new(),
                digest: String::new(),
            }),
        };
        assert!(object_ref_from("0x5", empty).is_err());

        let digest = ObjectDigest([9u8; 32]);
        let ok = ObjectResponse {
            data: Some(ObjectData {
                object_id: "0x5".into(),
                version: "42".into(),
                digest: digest.to_string(),
            }),
        };
        let r = object_ref_from("0x5", ok).unwrap();
        assert_eq!(r.version, 42);
        assert_eq!(r.digest, digest);
    }
}
