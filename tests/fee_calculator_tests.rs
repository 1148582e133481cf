use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use blockrz_sui_tip::ptb::{parse_address, ObjectDigest, ObjectRef, TransactionData, TransactionGraph};
use blockrz_sui_tip::rpc::DryRunQuery;
use blockrz_sui_tip::tip::{FixedSelector, TipInjector, TipObjectPool};
use blockrz_sui_tip::{CalculatedFee, FeeCalculator, GasCostSummary, TipError};

/// Canned dry-run answers; records what it was asked.
struct FakeDryRun {
    reply: std::result::Result<GasCostSummary, String>,
    calls: AtomicUsize,
    last_tx: Mutex<Option<String>>,
}

impl FakeDryRun {
    fn ok(comp: &str, stor: &str) -> Self {
        Self {
            reply: Ok(GasCostSummary::new(comp, stor)),
            calls: AtomicUsize::new(0),
            last_tx: Mutex::new(None),
        }
    }

    fn failing(msg: &str) -> Self {
        Self {
            reply: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
            last_tx: Mutex::new(None),
        }
    }
}

#[async_trait]
impl DryRunQuery for FakeDryRun {
    async fn dry_run(&self, tx_b64: &str) -> Result<GasCostSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_tx.lock().unwrap() = Some(tx_b64.to_string());
        self.reply.clone().map_err(|m| anyhow!(m))
    }
}

#[tokio::test]
async fn test_fee_from_b64_uses_one_dry_run() -> Result<()> {
    let calc = FeeCalculator::new(FakeDryRun::ok("1000000", "2000000"));

    let fee = calc.calculate_fee_from_tx_b64("AAEC").await?;

    assert_eq!(
        fee,
        CalculatedFee {
            gas_budget: 3_600_000,
            tip_amount: 180_000
        }
    );
    assert_eq!(calc.query().calls.load(Ordering::SeqCst), 1);
    assert_eq!(calc.query().last_tx.lock().unwrap().as_deref(), Some("AAEC"));
    Ok(())
}

#[tokio::test]
async fn test_fee_from_bytes_encodes_standard_base64() -> Result<()> {
    let calc = FeeCalculator::new(FakeDryRun::ok("1", "0"));
    let raw = [0u8, 1, 2, 250, 251, 252];

    let fee = calc.calculate_fee_from_tx_bytes(&raw).await?;

    assert_eq!((fee.gas_budget, fee.tip_amount), (2, 1));
    let sent = calc.query().last_tx.lock().unwrap().clone().unwrap();
    assert_eq!(base64::engine::general_purpose::STANDARD.decode(sent)?, raw);
    Ok(())
}

#[tokio::test]
async fn test_query_errors_pass_through_without_retry() -> Result<()> {
    let calc = FeeCalculator::new(FakeDryRun::failing("connection reset"));

    let err = calc.calculate_fee_from_tx_b64("AAEC").await.unwrap_err();

    assert!(matches!(err, TipError::Query(_)));
    assert_eq!(err.to_string(), "connection reset");
    assert_eq!(calc.query().calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_bad_report_is_invalid_amount() -> Result<()> {
    let calc = FeeCalculator::new(FakeDryRun::ok("12 34", "0"));

    match calc.calculate_fee_from_tx_b64("AAEC").await {
        Err(TipError::InvalidAmount { label, value }) => {
            assert_eq!(label, "computationCost");
            assert_eq!(value, "12 34");
        }
        other => panic!("expected InvalidAmount, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_oversized_report_is_overflow() -> Result<()> {
    let calc = FeeCalculator::new(FakeDryRun::ok("99999999999999999999999999", "1"));

    let err = calc.calculate_fee_from_tx_b64("AAEC").await.unwrap_err();

    assert!(matches!(err, TipError::AmountOverflow { label: "gasBudget", .. }));
    Ok(())
}

/// split + transfer paid from one gas coin, with a provisional budget.
fn transfer_tx() -> Result<TransactionData> {
    let sender = parse_address("0xa11ce")?;
    let gas_ref = ObjectRef {
        object_id: parse_address("0x5")?,
        version: 9,
        digest: ObjectDigest([4u8; 32]),
    };
    let mut tx = TransactionData::new(sender, vec![gas_ref], 750);
    tx.set_gas_budget(50_000_000);
    let gas = tx.gas();
    let amount = tx.pure(&100_000u64)?;
    let coin = tx.split_coins(gas, vec![amount])?;
    let to = tx.pure(&parse_address("0xb0b")?)?;
    tx.transfer_objects(vec![coin], to)?;
    Ok(tx)
}

#[tokio::test]
async fn test_prepare_dry_runs_the_untipped_bytes() -> Result<()> {
    let mut tx = transfer_tx()?;
    let untipped = tx.to_base64()?;
    let pool = TipObjectPool::default();
    let sel = FixedSelector(2);
    let calc = FeeCalculator::new(FakeDryRun::ok("1000000", "2000000"));

    let (fee, obj) = calc
        .prepare_transaction(&mut tx, &TipInjector::new(&pool, &sel))
        .await?;

    assert_eq!(calc.query().last_tx.lock().unwrap().as_deref(), Some(untipped.as_str()));
    assert_eq!((fee.gas_budget, fee.tip_amount), (3_600_000, 180_000));
    assert_eq!(tx.gas_budget, 3_600_000);
    assert_eq!(obj, pool.objects()[2]);
    assert_eq!(tx.kind.commands().len(), 5);

    let signed_bytes = base64::engine::general_purpose::STANDARD.decode(tx.to_base64()?)?;
    assert_eq!(signed_bytes, tx.to_bytes()?);
    assert!(signed_bytes.len() > base64::engine::general_purpose::STANDARD.decode(&untipped)?.len());
    Ok(())
}

#[tokio::test]
async fn test_prepare_failure_keeps_transaction() -> Result<()> {
    let mut tx = transfer_tx()?;
    let before = tx.to_bytes()?;
    let pool = TipObjectPool::default();
    let sel = FixedSelector(0);

    let calc = FeeCalculator::new(FakeDryRun::failing("dry run rejected"));
    let err = calc
        .prepare_transaction(&mut tx, &TipInjector::new(&pool, &sel))
        .await
        .unwrap_err();
    assert!(matches!(err, TipError::Query(_)));
    assert_eq!(tx.to_bytes()?, before);

    let calc = FeeCalculator::new(FakeDryRun::ok("1", "0"));
    let err = calc
        .prepare_transaction(
            &mut tx,
            &TipInjector::new(&pool, &sel).with_package_id("0xnot-hex"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TipError::Graph(_)));
    assert_eq!(tx.to_bytes()?, before);
    Ok(())
}
