pub mod builder;
pub mod pool;
pub mod selector;

pub use builder::{add_tip, TipInjector, TIPMANAGER_PACKAGE_ID};
pub use pool::{SharedTipObject, TipObjectPool, DEFAULT_TIP_OBJECTS};
pub use selector::{select_tip_object, FixedSelector, RandomSelector, TipSelector};
