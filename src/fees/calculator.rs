//! Gas budget and priority tip derived from a dry-run gas report.
//!
//! `gas_budget = ceil((computation + storage) * 1.2)` and
//! `tip_amount = ceil(gas_budget * 0.05)`, both in exact integer arithmetic.

use base64::Engine;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TipResult;
use crate::fees::math::{ceil_mul_div, parse_decimal, to_u64};
use crate::ptb::TransactionData;
use crate::rpc::{default_client, DryRunQuery};
use crate::tip::{SharedTipObject, TipInjector};

/// Safety margin over the dry-run estimate, as a ratio.
pub const BUDGET_MARGIN_NUM: u32 = 120;
pub const BUDGET_MARGIN_DEN: u32 = 100;

/// Priority tip as a share of the padded budget.
pub const TIP_RATE_NUM: u32 = 5;
pub const TIP_RATE_DEN: u32 = 100;

/// Gas report as returned by the fullnode; amounts are decimal strings of
/// unbounded size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    pub computation_cost: String,
    pub storage_cost: String,
    #[serde(default)]
    pub storage_rebate: String,
    #[serde(default)]
    pub non_refundable_storage_fee: String,
}

impl GasCostSummary {
    pub fn new(computation_cost: impl Into<String>, storage_cost: impl Into<String>) -> Self {
        Self {
            computation_cost: computation_cost.into(),
            storage_cost: storage_cost.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedFee {
    pub gas_budget: u64,
    pub tip_amount: u64,
}

/// Returns `(gas_budget, tip_amount)`.
///
/// The storage rebate is not subtracted: the budget has to cover the upfront
/// charge before any rebate is credited.
pub fn compute_budget_and_tip(costs: &GasCostSummary) -> TipResult<(u64, u64)> {
    let comp = parse_decimal(&costs.computation_cost, "computationCost")?;
    let stor = parse_decimal(&costs.storage_cost, "storageCost")?;

    let gross = comp + stor;
    let gb = ceil_mul_div(&gross, BUDGET_MARGIN_NUM, BUDGET_MARGIN_DEN);
    let tip = ceil_mul_div(&gb, TIP_RATE_NUM, TIP_RATE_DEN);

    let gas_budget = to_u64(&gb, "gasBudget")?;
    let tip_amount = to_u64(&tip, "tipAmount")?;
    debug!(
        "[FEE] gross={} gasBudget={} tip={}",
        gross, gas_budget, tip_amount
    );
    Ok((gas_budget, tip_amount))
}

impl TryFrom<&GasCostSummary> for CalculatedFee {
    type Error = crate::error::TipError;

    fn try_from(costs: &GasCostSummary) -> TipResult<Self> {
        let (gas_budget, tip_amount) = compute_budget_and_tip(costs)?;
        Ok(Self {
            gas_budget,
            tip_amount,
        })
    }
}

/// Dry-runs a transaction through `Q` and sizes its budget and tip.
pub struct FeeCalculator<Q> {
    query: Q,
}

impl<Q: DryRunQuery> FeeCalculator<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub async fn calculate_fee_from_tx_bytes(&self, tx_bytes: &[u8]) -> TipResult<CalculatedFee> {
        let tx_b64 = base64::engine::general_purpose::STANDARD.encode(tx_bytes);
        self.calculate_fee_from_tx_b64(&tx_b64).await
    }

    /// One dry-run call; collaborator errors pass through unchanged.
    pub async fn calculate_fee_from_tx_b64(&self, tx_b64: &str) -> TipResult<CalculatedFee> {
        let gas_used = self.query.dry_run(tx_b64).await?;
        CalculatedFee::try_from(&gas_used)
    }

    /// Dry-run `tx` as it stands, replace its budget with the padded estimate
    /// and append the tip. `tx` must carry a provisional budget the fullnode
    /// accepts for the dry-run. On error `tx` is left as it was.
    pub async fn prepare_transaction(
        &self,
        tx: &mut TransactionData,
        injector: &TipInjector<'_>,
    ) -> TipResult<(CalculatedFee, SharedTipObject)> {
        let fee = self.calculate_fee_from_tx_b64(&tx.to_base64()?).await?;

        let provisional = tx.gas_budget;
        tx.set_gas_budget(fee.gas_budget);
        match injector.add_tip(tx, fee.tip_amount) {
            Ok(obj) => Ok((fee, obj)),
            Err(e) => {
                tx.set_gas_budget(provisional);
                Err(e)
            }
        }
    }
}

/// Same as [`FeeCalculator::calculate_fee_from_tx_bytes`] against the default mainnet client.
pub async fn calculate_fee_from_tx_bytes(tx_bytes: &[u8]) -> TipResult<CalculatedFee> {
    FeeCalculator::new(default_client()?)
        .calculate_fee_from_tx_bytes(tx_bytes)
        .await
}

/// Same as [`FeeCalculator::calculate_fee_from_tx_b64`] against the default mainnet client.
pub async fn calculate_fee_from_tx_b64(tx_b64: &str) -> TipResult<CalculatedFee> {
    FeeCalculator::new(default_client()?)
        .calculate_fee_from_tx_b64(tx_b64)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TipError;

    #[test]
    fn reference_scenarios() {
        let (gb, tip) = compute_budget_and_tip(&GasCostSummary::new("1000000", "2000000")).unwrap();
        assert_eq!((gb, tip), (3_600_000, 180_000));

        let (gb, tip) = compute_budget_and_tip(&GasCostSummary::new("1", "0")).unwrap();
        assert_eq!((gb, tip), (2, 1));

        let (gb, tip) = compute_budget_and_tip(&GasCostSummary::new("0", "0")).unwrap();
        assert_eq!((gb, tip), (0, 0));
    }

    #[test]
    fn rebate_does_not_reduce_budget() {
        let mut costs = GasCostSummary::new("750000", "1976000");
        costs.storage_rebate = "978120".into();
        // 2_726_000 * 1.2 = 3_271_200; * 0.05 = 163_560
        assert_eq!(compute_budget_and_tip(&costs).unwrap(), (3_271_200, 163_560));
    }

    #[test]
    fn large_intermediates_stay_exact() {
        // each input fits in u64, their padded sum does not
        let half = (u64::MAX / 2).to_string();
        match compute_budget_and_tip(&GasCostSummary::new(half.clone(), half)) {
            Err(TipError::AmountOverflow { label, .. }) => assert_eq!(label, "gasBudget"),
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn budget_boundary_at_u64_max() {
        // floor(u64::MAX * 5 / 6): the largest gross whose padded budget still fits
        let ok = GasCostSummary::new("15372286728091293012", "0");
        let (gb, tip) = compute_budget_and_tip(&ok).unwrap();
        assert_eq!(gb, u64::MAX);
        assert_eq!(tip, 922_337_203_685_477_581);

        // one more unit of gross pushes the budget past u64::MAX
        let over = GasCostSummary::new("15372286728091293013", "0");
        match compute_budget_and_tip(&over) {
            Err(TipError::AmountOverflow { label, value }) => {
                assert_eq!(label, "gasBudget");
                assert_eq!(value, "18446744073709551616");
            }
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn malformed_fields_name_the_offender() {
        match compute_budget_and_tip(&GasCostSummary::new("12x", "0")) {
            Err(TipError::InvalidAmount { label, .. }) => assert_eq!(label, "computationCost"),
            other => panic!("unexpected {other:?}"),
        }
        match compute_budget_and_tip(&GasCostSummary::new("1", "-5")) {
            Err(TipError::InvalidAmount { label, value }) => {
                assert_eq!(label, "storageCost");
                assert_eq!(value, "-5");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn calculated_fee_serialises_camel_case() {
        let fee = CalculatedFee {
            gas_budget: 2,
            tip_amount: 1,
        };
        assert_eq!(
            serde_json::to_string(&fee).unwrap(),
            r#"{"gasBudget":2,"tipAmount":1}"#
        );
    }
}
