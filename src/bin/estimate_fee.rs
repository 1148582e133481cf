//! Dry-run an encoded transaction and print the gas budget and tip to use.
//!
//! Usage: cargo run --bin estimate_fee -- --tx-b64 <BASE64>

use anyhow::{anyhow, Result};
use base64::Engine;
use clap::Parser;

use blockrz_sui_tip::config::Settings;
use blockrz_sui_tip::rpc::SuiRpcClient;
use blockrz_sui_tip::tip::{RandomSelector, TipObjectPool};
use blockrz_sui_tip::FeeCalculator;

#[derive(Parser, Debug)]
#[command(about = "Estimate gas budget and BlockRazor tip for a transaction")]
struct Args {
    /// Base64 BCS `TransactionData`
    #[arg(long, conflicts_with = "tx_file")]
    tx_b64: Option<String>,

    /// File holding raw BCS `TransactionData` bytes
    #[arg(long)]
    tx_file: Option<std::path::PathBuf>,

    /// Settings file; defaults apply when absent
    #[arg(long)]
    settings: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };

    let tx_b64 = match (args.tx_b64, args.tx_file) {
        (Some(b64), _) => b64,
        (None, Some(path)) => {
            base64::engine::general_purpose::STANDARD.encode(std::fs::read(path)?)
        }
        (None, None) => return Err(anyhow!("pass --tx-b64 or --tx-file")),
    };

    println!("🔍 Dry-running against {}", settings.rpc_url);
    let calculator = FeeCalculator::new(SuiRpcClient::new(settings.rpc_url.clone())?);
    let fee = calculator.calculate_fee_from_tx_b64(&tx_b64).await?;

    println!("💰 gasBudget: {} MIST", fee.gas_budget);
    println!("💰 tipAmount: {} MIST", fee.tip_amount);

    let pool: TipObjectPool = settings.tip_pool()?;
    let obj = pool.select(&RandomSelector::new());
    println!("🎯 tip object: {} (initial shared version {})", obj.object_id, obj.version);
    println!("{}", serde_json::to_string_pretty(&fee)?);

    Ok(())
}
