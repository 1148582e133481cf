//! Build a SUI transfer, size its budget from a dry-run, append the tip and
//! print the `TxBytes` to sign. A signed transaction is then sent to
//! BlockRazor with `submit`.
//!
//! Usage:
//!   cargo run --bin tip_plan -- build --sender 0x.. --receiver 0x.. --gas-object 0x..
//!   cargo run --bin tip_plan -- submit --tx-b64 <TxBytes> --signature <sig>

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use serde_json::json;

use blockrz_sui_tip::config::Settings;
use blockrz_sui_tip::ptb::{address_hex, parse_address, ObjectRef, TransactionData, TransactionGraph};
use blockrz_sui_tip::rpc::SuiRpcClient;
use blockrz_sui_tip::submit::{self, iface::Submitter};
use blockrz_sui_tip::tip::{RandomSelector, TipInjector};
use blockrz_sui_tip::FeeCalculator;

/// Budget used only for the estimating dry-run.
const DRY_RUN_GAS_BUDGET: u64 = 50_000_000;

#[derive(Parser, Debug)]
#[command(about = "Prepare a tipped transfer and submit it through BlockRazor")]
struct Args {
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build, dry-run, budget and tip a transfer; print TxBytes.
    Build {
        #[arg(long)]
        sender: String,

        #[arg(long)]
        receiver: String,

        /// Gas coin id
        #[arg(long)]
        gas_object: String,

        /// Version + digest of the gas coin; fetched from the fullnode when omitted
        #[arg(long, requires = "gas_digest")]
        gas_version: Option<u64>,
        #[arg(long, requires = "gas_version")]
        gas_digest: Option<String>,

        /// Fetched from the fullnode when omitted
        #[arg(long)]
        gas_price: Option<u64>,

        /// Transfer amount in MIST
        #[arg(long, default_value_t = 100_000)]
        amount: u64,

        #[arg(long, default_value_t = DRY_RUN_GAS_BUDGET)]
        dry_run_budget: u64,
    },
    /// Send signed TxBytes to the configured BlockRazor endpoint.
    Submit {
        #[arg(long)]
        tx_b64: String,

        /// Serialized signature, base64; repeat for sponsored transactions
        #[arg(long = "signature", required = true)]
        signatures: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };

    match args.command {
        Cmd::Build {
            sender,
            receiver,
            gas_object,
            gas_version,
            gas_digest,
            gas_price,
            amount,
            dry_run_budget,
        } => {
            let rpc = Arc::new(SuiRpcClient::new(settings.rpc_url.clone())?);

            let gas_ref = match (gas_version, &gas_digest) {
                (Some(version), Some(digest)) => ObjectRef {
                    object_id: parse_address(&gas_object)?,
                    version,
                    digest: digest.parse()?,
                },
                _ => rpc.get_object_ref(&gas_object).await?,
            };
            let gas_price = match gas_price {
                Some(p) => p,
                None => rpc.get_reference_gas_price().await?,
            };
            info!(
                "[GAS] gasObject={} version={} digest={} price={}",
                address_hex(&gas_ref.object_id),
                gas_ref.version,
                gas_ref.digest,
                gas_price
            );

            let mut tx = TransactionData::new(parse_address(&sender)?, vec![gas_ref], gas_price);
            tx.set_gas_budget(dry_run_budget);
            let gas = tx.gas();
            let amount = tx.pure(&amount)?;
            let coin = tx.split_coins(gas, vec![amount])?;
            let receiver = tx.pure(&parse_address(&receiver)?)?;
            tx.transfer_objects(vec![coin], receiver)?;

            let pool = settings.tip_pool()?;
            let selector = RandomSelector::new();
            let injector =
                TipInjector::new(&pool, &selector).with_package_id(settings.tip_package_id.clone());
            let (fee, obj) = FeeCalculator::new(rpc)
                .prepare_transaction(&mut tx, &injector)
                .await?;
            let tx_b64 = tx.to_base64()?;
            info!(
                "[PREP] gasPrice={} gasBudget={} tip={} tipObject={} txBytesLen={}",
                gas_price,
                fee.gas_budget,
                fee.tip_amount,
                obj.object_id,
                tx_b64.len()
            );

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "txBytes": tx_b64,
                    "fee": fee,
                    "tipObject": obj,
                    "transaction": tx,
                }))?
            );
        }
        Cmd::Submit { tx_b64, signatures } => {
            let submitter = submit::default(&settings)?;
            let result = submitter.execute(tx_b64, signatures).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
