pub mod settings;

pub use settings::{ExecuteRequestType, Settings};
