pub mod calculator;
pub mod math;

pub use calculator::{
    calculate_fee_from_tx_b64, calculate_fee_from_tx_bytes, compute_budget_and_tip,
    CalculatedFee, FeeCalculator, GasCostSummary,
};
