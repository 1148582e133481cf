//! Runtime configuration loader.

use std::{fmt, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::rpc::DEFAULT_MAINNET_RPC;
use crate::tip::builder::TIPMANAGER_PACKAGE_ID;
use crate::tip::pool::{SharedTipObject, TipObjectPool};

/// How long `sui_executeTransactionBlock` waits before answering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ExecuteRequestType {
    #[default]
    WaitForLocalExecution,
    WaitForEffectsCert,
}

/// ------------------------------------------------------------------
/// Main Settings object
/// ------------------------------------------------------------------
#[derive(Clone)]
pub struct Settings {
    /* -------- endpoints ----------------------------- */
    pub rpc_url: String,
    pub blockrz_rpc_url: String,
    pub auth_token: Option<String>,
    pub request_type: ExecuteRequestType,

    /* -------- tip contract -------------------------- */
    pub tip_package_id: String,
    /// `None` keeps the compiled-in pool.
    pub tip_objects: Option<Vec<SharedTipObject>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_MAINNET_RPC.to_string(),
            blockrz_rpc_url: String::new(),
            auth_token: None,
            request_type: ExecuteRequestType::default(),
            tip_package_id: TIPMANAGER_PACKAGE_ID.to_string(),
            tip_objects: None,
        }
    }
}

impl Settings {
    /// --------------------------------------------------------------
    /// Read `settings.json` from disk.
    /// --------------------------------------------------------------
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading settings file {:?}", path.as_ref()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(raw).context("parsing settings")?;
        let defaults = Self::default();

        /* -------- plain strings ---------------------------------- */
        let rpc_url = json["rpc_url"]
            .as_str()
            .map(str::to_string)
            .unwrap_or(defaults.rpc_url);
        let blockrz_rpc_url = json["blockrz_rpc_url"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let auth_token = json["auth_token"].as_str().map(|s| s.to_string());
        let tip_package_id = json["tip_package_id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or(defaults.tip_package_id);

        let request_type = match json["request_type"].as_str() {
            Some(s) => s
                .parse()
                .map_err(|_| anyhow!("unknown request_type {s:?}"))?,
            None => defaults.request_type,
        };

        /* -------- pinned tip objects ----------------------------- */
        let tip_objects = match json.get("tip_objects") {
            Some(v) if !v.is_null() => {
                let list: Vec<SharedTipObject> =
                    serde_json::from_value(v.clone()).context("parsing tip_objects")?;
                if list.is_empty() {
                    return Err(anyhow!("tip_objects must not be empty"));
                }
                Some(list)
            }
            _ => None,
        };

        Ok(Self {
            rpc_url,
            blockrz_rpc_url,
            auth_token,
            request_type,
            tip_package_id,
            tip_objects,
        })
    }

    /// --------------------------------------------------------------
    /// Load settings from default config/settings.json file.
    /// --------------------------------------------------------------
    pub fn load() -> Result<Self> {
        Self::load_from_file("config/settings.json")
    }

    /// Configured pool, or the compiled-in one.
    pub fn tip_pool(&self) -> Result<TipObjectPool> {
        match &self.tip_objects {
            Some(list) => TipObjectPool::new(list.clone()),
            None => Ok(TipObjectPool::default()),
        }
    }
}

/* ------------------------------------------------------------------ */
/*  Manual Debug: keep the auth token out of logs                      */
/* ------------------------------------------------------------------ */
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rpc_url", &self.rpc_url)
            .field("blockrz_rpc_url", &self.blockrz_rpc_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("request_type", &self.request_type)
            .field("tip_package_id", &self.tip_package_id)
            .finish_non_exhaustive()
    }
}
