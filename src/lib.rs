//! Gas budget / priority tip sizing and tip injection for Sui transactions
//! routed through the BlockRazor `tipmanager` contract.

pub mod config;
pub mod error;
pub mod fees;
pub mod ptb;
pub mod rpc;
pub mod submit;
pub mod tip;

pub use error::{TipError, TipResult};
pub use fees::{
    calculate_fee_from_tx_b64, calculate_fee_from_tx_bytes, compute_budget_and_tip,
    CalculatedFee, FeeCalculator, GasCostSummary,
};
pub use tip::{add_tip, select_tip_object, SharedTipObject, TipInjector, TipObjectPool};
