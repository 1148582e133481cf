pub mod builder;
pub mod types;

pub use builder::{
    address_hex, parse_address, parse_type, GraphMark, ProgrammableTransactionBuilder,
    TransactionData, TransactionGraph,
};
pub use types::{
    Argument, CallArg, Command, ObjectArg, ObjectDigest, ObjectId, ObjectRef, ProgrammableMoveCall,
    StructTag, SuiAddress, TypeTag,
};
