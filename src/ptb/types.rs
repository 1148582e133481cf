//! Value types of a programmable transaction: object references, inputs,
//! arguments and commands. Addresses, identifiers and type tags come from
//! `move-core-types`; every type here serialises to the BCS layout the
//! fullnode expects.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context, Result};
use move_core_types::identifier::Identifier;
use serde::{Serialize, Serializer};

pub use move_core_types::account_address::AccountAddress as SuiAddress;
pub use move_core_types::language_storage::{StructTag, TypeTag};

pub type ObjectId = SuiAddress;

/// Base58 object digest, 32 bytes once decoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectDigest(pub [u8; 32]);

impl FromStr for ObjectDigest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = bs58::decode(s)
            .into_vec()
            .with_context(|| format!("decoding base58 digest {s:?}"))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| anyhow!("digest must be 32 bytes, got {}", v.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for ObjectDigest {
    // base58 in JSON, length-prefixed bytes in BCS.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

/// `(id, version, digest)` of an owned object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

/// Entry of the transaction's input table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CallArg {
    /// BCS bytes of a value.
    Pure(Vec<u8>),
    Object(ObjectArg),
}

/// Reference to a value available to a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: Identifier,
    pub function: Identifier,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

/// Variant order is the wire order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
    MergeCoins(Argument, Vec<Argument>),
}

impl Command {
    /// Every argument this command reads, in order.
    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.clone(),
            Command::TransferObjects(objs, addr) => {
                let mut v = objs.clone();
                v.push(*addr);
                v
            }
            Command::SplitCoins(coin, amounts) | Command::MergeCoins(coin, amounts) => {
                let mut v = vec![*coin];
                v.extend(amounts.iter().copied());
                v
            }
        }
    }
}
