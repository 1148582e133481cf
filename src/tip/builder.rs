//! Appends the tip deposit to a transaction:
//!
//! ```text
//! coin    = SplitCoins(GasCoin, [tip])
//! balance = 0x2::coin::into_balance<0x2::sui::SUI>(coin)
//! tipmanager::add_tip(&mut <shared tip object>, tip, balance)
//! ```

use log::debug;

use crate::error::TipResult;
use crate::ptb::{parse_address, parse_type, Argument, SuiAddress, TransactionGraph, TypeTag};
use crate::tip::pool::{SharedTipObject, TipObjectPool};
use crate::tip::selector::{default_selector, TipSelector, DEFAULT_POOL};

/// BlockRazor `tipmanager` package.
pub const TIPMANAGER_PACKAGE_ID: &str =
    "0xc07e7aac927814d8fd4f532d1c4a6216a5ecc20df3dc5d2967b3994f87ff6e87";
pub const TIPMANAGER_MODULE: &str = "tipmanager";
pub const ADD_TIP_FUNCTION: &str = "add_tip";

pub const SUI_FRAMEWORK_PACKAGE_ID: &str = "0x2";
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Builds tip commands against a pool and a selection strategy.
pub struct TipInjector<'a> {
    pool: &'a TipObjectPool,
    selector: &'a dyn TipSelector,
    package_id: String,
}

impl<'a> TipInjector<'a> {
    pub fn new(pool: &'a TipObjectPool, selector: &'a dyn TipSelector) -> Self {
        Self {
            pool,
            selector,
            package_id: TIPMANAGER_PACKAGE_ID.to_string(),
        }
    }

    /// Target a different `tipmanager` deployment.
    pub fn with_package_id(mut self, package_id: impl Into<String>) -> Self {
        self.package_id = package_id.into();
        self
    }

    /// Append split -> into_balance -> add_tip. Order matters: each command
    /// consumes the previous one's result. On error `tx` is left as it was.
    pub fn add_tip<G>(&self, tx: &mut G, tip_amount: u64) -> TipResult<SharedTipObject>
    where
        G: TransactionGraph + ?Sized,
    {
        let package = parse_address(&self.package_id)?;
        let framework = parse_address(SUI_FRAMEWORK_PACKAGE_ID)?;
        let sui = parse_type(SUI_COIN_TYPE)?;
        let obj = self.pool.select(self.selector).clone();
        let object_id = parse_address(&obj.object_id)?;

        let mark = tx.mark();
        if let Err(e) = append_tip(tx, package, framework, sui, object_id, obj.version, tip_amount) {
            tx.truncate(mark);
            return Err(e);
        }

        debug!(
            "[TIP] {} MIST -> {} (v{})",
            tip_amount, obj.object_id, obj.version
        );
        Ok(obj)
    }
}

fn append_tip<G>(
    tx: &mut G,
    package: SuiAddress,
    framework: SuiAddress,
    sui: TypeTag,
    object_id: SuiAddress,
    version: u64,
    tip_amount: u64,
) -> TipResult<Argument>
where
    G: TransactionGraph + ?Sized,
{
    let gas = tx.gas();
    let amount = tx.pure(&tip_amount)?;
    let tip_coin = tx.split_coins(gas, vec![amount])?;

    let balance = tx.move_call(framework, "coin", "into_balance", vec![sui], vec![tip_coin])?;

    let shared = tx.shared_object(object_id, version, true)?;
    let amount = tx.pure(&tip_amount)?;
    tx.move_call(
        package,
        TIPMANAGER_MODULE,
        ADD_TIP_FUNCTION,
        vec![],
        vec![shared, amount, balance],
    )
}

/// Add a tip using the compiled-in pool and the process-wide random selector.
pub fn add_tip<G>(tx: &mut G, tip_amount: u64) -> TipResult<()>
where
    G: TransactionGraph + ?Sized,
{
    TipInjector::new(&DEFAULT_POOL, default_selector()).add_tip(tx, tip_amount)?;
    Ok(())
}
