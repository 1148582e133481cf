pub mod blockrz_http;
pub mod iface;

use std::sync::Arc;

use anyhow::Result;

use crate::config::settings::Settings;
use iface::Submitter;

/// Submitter for the configured BlockRazor endpoint.
pub fn default(settings: &Settings) -> Result<Arc<dyn Submitter>> {
    Ok(Arc::new(blockrz_http::BlockRazorHttp::from_settings(settings)?))
}
