//! Append-only command graph used to assemble a programmable transaction,
//! and the `TransactionData` envelope that gets signed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use move_core_types::{identifier::Identifier, parser::parse_type_tag};
use serde::Serialize;

use crate::error::{TipError, TipResult};
use crate::ptb::types::{
    Argument, CallArg, Command, ObjectArg, ObjectId, ObjectRef, ProgrammableMoveCall, SuiAddress,
    TypeTag,
};

/// Input and command counts of a graph at some point, for [`TransactionGraph::truncate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphMark {
    pub inputs: usize,
    pub commands: usize,
}

/// The operations the tip injector needs from a transaction under construction.
///
/// Implementations must only ever append: earlier inputs and commands keep their
/// indices so references handed out stay valid. `truncate` is the one exception
/// and only drops entries appended after a [`GraphMark`].
pub trait TransactionGraph {
    /// The coin paying for gas.
    fn gas(&self) -> Argument;

    /// Register an entry in the input table.
    fn add_input(&mut self, arg: CallArg) -> TipResult<Argument>;

    /// Append a command and return a reference to its result.
    fn add_command(&mut self, command: Command) -> TipResult<Argument>;

    fn mark(&self) -> GraphMark;

    /// Drop every input and command appended after `mark`.
    fn truncate(&mut self, mark: GraphMark);

    /// Register a BCS-encoded pure value.
    fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> TipResult<Argument> {
        let bytes = bcs::to_bytes(value)?;
        self.add_input(CallArg::Pure(bytes))
    }

    fn shared_object(
        &mut self,
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    ) -> TipResult<Argument> {
        self.add_input(CallArg::Object(ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        }))
    }

    fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> TipResult<Argument> {
        self.add_command(Command::SplitCoins(coin, amounts))
    }

    fn transfer_objects(&mut self, objects: Vec<Argument>, address: Argument) -> TipResult<Argument> {
        self.add_command(Command::TransferObjects(objects, address))
    }

    fn move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> TipResult<Argument> {
        self.add_command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: identifier(module)?,
            function: identifier(function)?,
            type_arguments,
            arguments,
        })))
    }
}

/// Convert a textual address (`0x`-prefixed or bare, short forms allowed),
/// reporting failures as graph errors.
pub fn parse_address(s: &str) -> TipResult<SuiAddress> {
    let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if hex_part.is_empty() {
        return Err(TipError::Graph(format!("address {s:?}: empty")));
    }
    SuiAddress::from_hex_literal(&format!("0x{hex_part}"))
        .map_err(|e| TipError::Graph(format!("address {s:?}: {e}")))
}

/// Parse a Move type such as `0x2::sui::SUI`.
pub fn parse_type(s: &str) -> TipResult<TypeTag> {
    parse_type_tag(s).map_err(|e| TipError::Graph(format!("type {s:?}: {e}")))
}

fn identifier(s: &str) -> TipResult<Identifier> {
    Identifier::new(s).map_err(|e| TipError::Graph(format!("identifier {s:?}: {e}")))
}

/// `0x`-prefixed, full-width lowercase hex.
pub fn address_hex(address: &SuiAddress) -> String {
    format!("0x{}", hex::encode(address.to_vec()))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl ProgrammableTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn check_reference(&self, arg: &Argument, at: usize) -> TipResult<()> {
        match *arg {
            Argument::GasCoin => Ok(()),
            Argument::Input(i) if (i as usize) < self.inputs.len() => Ok(()),
            Argument::Result(c) | Argument::NestedResult(c, _) if (c as usize) < at => Ok(()),
            other => Err(TipError::Graph(format!(
                "command {at} references unavailable {other:?}"
            ))),
        }
    }
}

impl TransactionGraph for ProgrammableTransactionBuilder {
    fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    fn add_input(&mut self, arg: CallArg) -> TipResult<Argument> {
        let idx = u16::try_from(self.inputs.len())
            .map_err(|_| TipError::Graph("input table is full".into()))?;
        self.inputs.push(arg);
        Ok(Argument::Input(idx))
    }

    fn add_command(&mut self, command: Command) -> TipResult<Argument> {
        let at = self.commands.len();
        let idx = u16::try_from(at).map_err(|_| TipError::Graph("command list is full".into()))?;
        for arg in command.arguments() {
            self.check_reference(&arg, at)?;
        }
        self.commands.push(command);
        Ok(Argument::Result(idx))
    }

    fn mark(&self) -> GraphMark {
        GraphMark {
            inputs: self.inputs.len(),
            commands: self.commands.len(),
        }
    }

    fn truncate(&mut self, mark: GraphMark) {
        self.inputs.truncate(mark.inputs);
        self.commands.truncate(mark.commands);
    }
}

/// Sender, gas configuration and command graph of a transaction awaiting signature.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub sender: SuiAddress,
    pub gas_owner: SuiAddress,
    pub gas_payment: Vec<ObjectRef>,
    pub gas_price: u64,
    pub gas_budget: u64,
    pub kind: ProgrammableTransactionBuilder,
}

/* ------------------------------------------------------------------ */
/*  Wire envelope: TransactionData::V1 { kind, sender, gas_data, exp } */
/* ------------------------------------------------------------------ */
#[derive(Serialize)]
enum WireTransactionData<'a> {
    V1(WireTransactionDataV1<'a>),
}

#[derive(Serialize)]
struct WireTransactionDataV1<'a> {
    kind: WireTransactionKind<'a>,
    sender: SuiAddress,
    gas_data: WireGasData<'a>,
    expiration: WireExpiration,
}

#[derive(Serialize)]
enum WireTransactionKind<'a> {
    ProgrammableTransaction(&'a ProgrammableTransactionBuilder),
}

#[derive(Serialize)]
struct WireGasData<'a> {
    payment: &'a [ObjectRef],
    owner: SuiAddress,
    price: u64,
    budget: u64,
}

#[derive(Serialize)]
enum WireExpiration {
    None,
}

impl TransactionData {
    pub fn new(sender: SuiAddress, gas_payment: Vec<ObjectRef>, gas_price: u64) -> Self {
        Self {
            sender,
            gas_owner: sender,
            gas_payment,
            gas_price,
            gas_budget: 0,
            kind: ProgrammableTransactionBuilder::new(),
        }
    }

    pub fn set_gas_budget(&mut self, gas_budget: u64) -> &mut Self {
        self.gas_budget = gas_budget;
        self
    }

    /// BCS bytes to dry-run, sign and submit.
    pub fn to_bytes(&self) -> TipResult<Vec<u8>> {
        let wire = WireTransactionData::V1(WireTransactionDataV1 {
            kind: WireTransactionKind::ProgrammableTransaction(&self.kind),
            sender: self.sender,
            gas_data: WireGasData {
                payment: &self.gas_payment,
                owner: self.gas_owner,
                price: self.gas_price,
                budget: self.gas_budget,
            },
            expiration: WireExpiration::None,
        });
        Ok(bcs::to_bytes(&wire)?)
    }

    /// `TxBytes` as sent over JSON-RPC.
    pub fn to_base64(&self) -> TipResult<String> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }
}

impl TransactionGraph for TransactionData {
    fn gas(&self) -> Argument {
        self.kind.gas()
    }

    fn add_input(&mut self, arg: CallArg) -> TipResult<Argument> {
        self.kind.add_input(arg)
    }

    fn add_command(&mut self, command: Command) -> TipResult<Argument> {
        self.kind.add_command(command)
    }

    fn mark(&self) -> GraphMark {
        self.kind.mark()
    }

    fn truncate(&mut self, mark: GraphMark) {
        self.kind.truncate(mark)
    }
}
