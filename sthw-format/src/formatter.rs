//! The re-entrant, bidirectional formatter state machine.
//!
//! A [`Formatter`] never materializes a list of screens: `next_data` asks
//! the chain functions in `chain.rs` for exactly one more field, and
//! `previous_data` rebuilds state by resetting to the start and replaying
//! forward -- the same re-decode-on-demand approach `sthw-model` already
//! uses for operations, sub-invocations and contract arguments.

use crate::chain::{self, HeaderOutcome};
use crate::error::{FormatError, FormatResult};
use crate::field::Field;
use crate::plugin::{self, ContractPlugin};
use sthw_codec::BoundedVec;
use sthw_display::{Caption, Value};
use sthw_model::{
    AuthorizedFunction, AuthorizedInvocation, Envelope, InvokeContractArgs, OperationBody, SorobanAuthorizationEnvelope,
};

const MAX_INVOCATION_DEPTH: usize = 16;
/// Upper bound on consecutive "skip, nothing shown here" transitions the
/// formatter will walk through in one `next_data` call (absent optional
/// header fields, unit-like operations, exhausted invocation subtrees).
/// Bounded by the largest plausible run of such transitions, not by input
/// size, so it never turns into an unbounded loop over attacker input.
const MAX_SKIP_STEPS: u32 = 256;

#[derive(Clone, Copy)]
enum Subject<'a> {
    Tx(Envelope<'a>),
    Auth(SorobanAuthorizationEnvelope<'a>),
}

#[derive(Clone, Copy)]
enum Phase {
    /// Showing field `u8` of the current node's own function descriptor
    /// (and, for a contract call, its arguments).
    Fn(u8),
    /// About to show the intro field for child `u8` of the current node,
    /// then descend into it.
    ChildIntro(u8),
}

#[derive(Clone, Copy)]
struct InvocationCursor {
    path: BoundedVec<u8, MAX_INVOCATION_DEPTH>,
    phase: Phase,
}

impl InvocationCursor {
    fn start() -> Self {
        InvocationCursor {
            path: BoundedVec::new(),
            phase: Phase::Fn(0),
        }
    }
}

#[derive(Clone, Copy)]
enum Position {
    Header(u8),
    OperationIntro(u32),
    OperationTypeIntro(u32),
    OperationField(u32, u8),
    AuthRootIntro(u32, u8),
    TxInvocation(u32, u8, InvocationCursor),
    OperationSource(u32),
    AuthInvocation(InvocationCursor),
    TxSource,
    Done,
}

/// Walks a decoded transaction envelope or standalone Soroban
/// authorization entry one field at a time, front-to-back and back-to-front.
pub struct Formatter<'a, 'p> {
    input: &'a [u8],
    subject: Subject<'a>,
    position: Position,
    step_index: u64,
    plugin: Option<&'p mut dyn ContractPlugin>,
    unverified_contracts: bool,
}

impl<'a, 'p> Formatter<'a, 'p> {
    pub fn for_transaction(input: &'a [u8]) -> FormatResult<Self> {
        let envelope = Envelope::parse(input)?;
        Ok(Formatter {
            input,
            subject: Subject::Tx(envelope),
            position: Position::Header(0),
            step_index: 0,
            plugin: None,
            unverified_contracts: false,
        })
    }

    pub fn for_authorization(input: &'a [u8]) -> FormatResult<Self> {
        let auth = SorobanAuthorizationEnvelope::parse(input)?;
        Ok(Formatter {
            input,
            subject: Subject::Auth(auth),
            position: Position::AuthInvocation(InvocationCursor::start()),
            step_index: 0,
            plugin: None,
            unverified_contracts: false,
        })
    }

    /// Register the contract-display bridge consulted for every Soroban
    /// contract invocation's arguments. Without one, all contract calls
    /// render generically and `unverified_contracts` is set as soon as
    /// one is encountered.
    pub fn with_plugin(mut self, plugin: &'p mut dyn ContractPlugin) -> Self {
        self.plugin = Some(plugin);
        self
    }

    /// Return to the first field without re-parsing the underlying bytes.
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.unverified_contracts = false;
        self.position = match &self.subject {
            Subject::Tx(_) => Position::Header(0),
            Subject::Auth(_) => Position::AuthInvocation(InvocationCursor::start()),
        };
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Whether any contract invocation in this chain fell back to generic
    /// SCVal rendering because no plugin claimed it -- the host UI should
    /// present a blind-signing warning when this is set.
    pub fn unverified_contracts(&self) -> bool {
        self.unverified_contracts
    }

    /// Render the next field into the caller's buffers and advance.
    pub fn next_data(&mut self) -> FormatResult<(Caption, Value)> {
        for _ in 0..MAX_SKIP_STEPS {
            match self.advance_once()? {
                Some((label, field)) => {
                    let mut caption = Caption::new();
                    let mut value = Value::new();
                    field.render(label, &mut caption, &mut value)?;
                    self.step_index += 1;
                    return Ok((caption, value));
                }
                None => continue,
            }
        }
        Err(FormatError::StackOverflow)
    }

    /// Render the field shown before the one `next_data` would return next,
    /// by resetting and replaying forward. Re-entrant and deterministic:
    /// calling it repeatedly from the start of the chain always produces
    /// the same sequence.
    pub fn previous_data(&mut self) -> FormatResult<(Caption, Value)> {
        if self.step_index == 0 {
            return Err(FormatError::EndOfChain);
        }
        let target = self.step_index - 1;
        self.reset();
        for _ in 0..target {
            self.next_data()?;
        }
        self.next_data()
    }

    fn advance_once(&mut self) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        match self.position {
            Position::Header(idx) => self.advance_header(idx),
            Position::OperationIntro(i) => self.advance_operation_intro(i),
            Position::OperationTypeIntro(i) => self.advance_operation_type_intro(i),
            Position::OperationField(i, idx) => self.advance_operation_field(i, idx),
            Position::AuthRootIntro(i, auth_idx) => self.advance_auth_root_intro(i, auth_idx),
            Position::TxInvocation(i, auth_idx, cursor) => self.advance_tx_invocation(i, auth_idx, cursor),
            Position::OperationSource(i) => self.advance_operation_source(i),
            Position::AuthInvocation(cursor) => self.advance_auth_invocation(cursor),
            Position::TxSource => self.advance_tx_source(),
            Position::Done => Err(FormatError::EndOfChain),
        }
    }

    fn envelope(&self) -> &Envelope<'a> {
        match &self.subject {
            Subject::Tx(envelope) => envelope,
            Subject::Auth(_) => unreachable!("header steps only run against a transaction subject"),
        }
    }

    fn advance_header(&mut self, idx: u8) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        match chain::header_step(self.envelope(), idx) {
            HeaderOutcome::Show(label, field) => {
                self.position = Position::Header(idx + 1);
                Ok(Some((label, field)))
            }
            HeaderOutcome::Skip => {
                self.position = Position::Header(idx + 1);
                Ok(None)
            }
            HeaderOutcome::Exhausted => {
                let op_count = self.envelope().transaction().operations.count;
                self.position = if op_count > 0 { Position::OperationIntro(0) } else { Position::TxSource };
                Ok(None)
            }
        }
    }

    fn advance_operation_intro(&mut self, i: u32) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op_count = self.envelope().transaction().operations.count;
        if i >= op_count {
            self.position = Position::TxSource;
            return Ok(None);
        }
        if op_count == 1 {
            self.position = Position::OperationTypeIntro(i);
            return Ok(None);
        }
        self.position = Position::OperationTypeIntro(i);
        Ok(Some((
            "Operation",
            Field::OrdinalOf {
                index: i + 1,
                total: op_count,
            },
        )))
    }

    fn advance_operation_type_intro(&mut self, i: u32) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op = self.envelope().transaction().operations.operation_at(self.input, i)?;
        self.position = Position::OperationField(i, 0);
        Ok(Some(("Operation Type", Field::Plain(chain::operation_type_name(&op.body)))))
    }

    fn advance_operation_field(&mut self, i: u32, idx: u8) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op = self.envelope().transaction().operations.operation_at(self.input, i)?;
        let network_known = !matches!(self.envelope().network, sthw_model::Network::Unknown);
        match chain::operation_field(&op.body, self.input, idx, network_known)? {
            Some(shown) => {
                self.position = Position::OperationField(i, idx + 1);
                Ok(Some(shown))
            }
            None => {
                let auth_count = match &op.body {
                    OperationBody::InvokeHostFunction(ihf) => ihf.sub_invocation_positions.len(),
                    _ => 0,
                };
                self.position = if auth_count > 0 {
                    Position::AuthRootIntro(i, 0)
                } else {
                    Position::OperationSource(i)
                };
                Ok(None)
            }
        }
    }

    fn advance_auth_root_intro(&mut self, i: u32, auth_idx: u8) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op = self.envelope().transaction().operations.operation_at(self.input, i)?;
        let OperationBody::InvokeHostFunction(ihf) = &op.body else {
            self.position = Position::OperationSource(i);
            return Ok(None);
        };
        let count = ihf.sub_invocation_positions.len();
        if auth_idx as usize >= count {
            self.position = Position::OperationSource(i);
            return Ok(None);
        }
        self.position = Position::TxInvocation(i, auth_idx, InvocationCursor::start());
        Ok(Some((
            "Authorization",
            Field::OrdinalOf {
                index: auth_idx as u32 + 1,
                total: count as u32,
            },
        )))
    }

    fn advance_operation_source(&mut self, i: u32) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op = self.envelope().transaction().operations.operation_at(self.input, i)?;
        self.position = Position::OperationIntro(i + 1);
        Ok(chain::operation_source(&op).map(|field| ("Op Source", field)))
    }

    fn advance_tx_source(&mut self) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        self.position = Position::Done;
        Ok(Some(("Tx Source", Field::Account(self.envelope().transaction().source))))
    }

    fn advance_tx_invocation(
        &mut self,
        i: u32,
        auth_idx: u8,
        mut cursor: InvocationCursor,
    ) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let op = self.envelope().transaction().operations.operation_at(self.input, i)?;
        let OperationBody::InvokeHostFunction(ihf) = &op.body else {
            self.position = Position::OperationSource(i);
            return Ok(None);
        };
        let &pos = ihf
            .sub_invocation_positions
            .get(auth_idx as usize)
            .ok_or(FormatError::EndOfChain)?;
        let root = decode_invocation_at(self.input, pos)?;
        let input = self.input;
        match invocation_field_at(root, input, &mut cursor, reborrow_plugin(&mut self.plugin), &mut self.unverified_contracts)? {
            Some(shown) => {
                self.position = Position::TxInvocation(i, auth_idx, cursor);
                Ok(Some(shown))
            }
            None => {
                self.position = Position::AuthRootIntro(i, auth_idx + 1);
                Ok(None)
            }
        }
    }

    fn advance_auth_invocation(&mut self, mut cursor: InvocationCursor) -> FormatResult<Option<(&'static str, Field<'a>)>> {
        let Subject::Auth(auth) = &self.subject else {
            unreachable!("auth-invocation steps only run against a standalone authorization subject");
        };
        let root = auth.root_invocation;
        let input = self.input;
        match invocation_field_at(root, input, &mut cursor, reborrow_plugin(&mut self.plugin), &mut self.unverified_contracts)? {
            Some(shown) => {
                self.position = Position::AuthInvocation(cursor);
                Ok(Some(shown))
            }
            None => {
                self.position = Position::Done;
                Ok(None)
            }
        }
    }
}

/// The argument shown at `arg_idx` of a contract invocation: a
/// plugin-produced pair when one claims this contract and function, or a
/// generic SCVal otherwise. Sets `unverified_contracts` the moment a
/// contract invocation falls through to generic rendering, per SPEC_FULL
/// §4.6's blind-signing warning requirement.
/// Reborrows an `Option<&mut dyn ContractPlugin>` for a lifetime tied to
/// this call only, sidestepping the invariance of `&mut` that otherwise
/// forces the reborrow's lifetime to match the option's own.
fn reborrow_plugin<'s>(plugin: &'s mut Option<&mut dyn ContractPlugin>) -> Option<&'s mut dyn ContractPlugin> {
    match plugin {
        Some(p) => Some(&mut **p),
        None => None,
    }
}

fn contract_arg_field<'a>(
    plugin: Option<&mut dyn ContractPlugin>,
    args: &InvokeContractArgs<'a>,
    input: &'a [u8],
    arg_idx: u32,
    unverified_contracts: &mut bool,
) -> FormatResult<Option<(&'static str, Field<'a>)>> {
    if let Some(plugin) = plugin {
        if let Some(count) = plugin::resolve_pairs(plugin, args.contract_address, args.function_name, args, input) {
            if arg_idx >= count as u32 {
                return Ok(None);
            }
            return match plugin.query_pair(args.contract_address, arg_idx as u8) {
                (crate::plugin::PluginOutcome::Ok, Some(pair)) => Ok(Some((pair.caption, Field::Rendered(pair.value)))),
                _ => Err(FormatError::PluginError),
            };
        }
    }
    if arg_idx >= args.args_count {
        return Ok(None);
    }
    *unverified_contracts = true;
    let value = args.arg_at(input, arg_idx)?;
    Ok(Some(("Argument", Field::ScValField(value))))
}

fn decode_invocation_at<'a>(input: &'a [u8], position: usize) -> FormatResult<AuthorizedInvocation<'a>> {
    let mut c = sthw_codec::Cursor::new(input);
    c.seek(position)?;
    Ok(AuthorizedInvocation::decode(&mut c)?)
}

fn current_invocation<'a>(
    root: AuthorizedInvocation<'a>,
    input: &'a [u8],
    path: &BoundedVec<u8, MAX_INVOCATION_DEPTH>,
) -> FormatResult<AuthorizedInvocation<'a>> {
    let mut node = root;
    for i in 0..path.len() {
        let child_idx = *path.get(i).expect("index within bounds") as usize;
        node = node.sub_invocation_at(input, child_idx)?;
    }
    Ok(node)
}

/// Advance `cursor` through one node of the invocation tree rooted at
/// `root`, returning the next field to show, or `None` once the whole
/// tree (function descriptor, arguments, and every sub-invocation,
/// depth-first) has been walked.
fn invocation_field_at<'a>(
    root: AuthorizedInvocation<'a>,
    input: &'a [u8],
    cursor: &mut InvocationCursor,
    mut plugin: Option<&mut dyn ContractPlugin>,
    unverified_contracts: &mut bool,
) -> FormatResult<Option<(&'static str, Field<'a>)>> {
    loop {
        let node = current_invocation(root, input, &cursor.path)?;
        match cursor.phase {
            Phase::Fn(idx) => {
                if let Some(shown) = chain::function_header_field(&node.function, idx) {
                    cursor.phase = Phase::Fn(idx + 1);
                    return Ok(Some(shown));
                }
                let header_len = chain::function_header_len(&node.function);
                if idx < header_len {
                    cursor.phase = Phase::Fn(idx + 1);
                    continue;
                }
                let arg_idx = (idx - header_len) as u32;
                if let AuthorizedFunction::ContractFn(args) = &node.function {
                    if let Some(shown) =
                        contract_arg_field(reborrow_plugin(&mut plugin), args, input, arg_idx, unverified_contracts)?
                    {
                        cursor.phase = Phase::Fn(idx + 1);
                        return Ok(Some(shown));
                    }
                }
                cursor.phase = Phase::ChildIntro(0);
                continue;
            }
            Phase::ChildIntro(child_idx) => {
                let total = node.sub_invocation_count();
                if child_idx as usize >= total {
                    if cursor.path.is_empty() {
                        return Ok(None);
                    }
                    let parent_child_idx = cursor.path.pop().expect("non-empty path");
                    cursor.phase = Phase::ChildIntro(parent_child_idx + 1);
                    continue;
                }
                cursor
                    .path
                    .push(child_idx)
                    .map_err(|_| FormatError::StackOverflow)?;
                cursor.phase = Phase::Fn(0);
                return Ok(Some((
                    "Sub-Invocation",
                    Field::OrdinalOf {
                        index: child_idx as u32 + 1,
                        total: total as u32,
                    },
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE_TYPE_TX: u32 = 2;
    const OP_PAYMENT: u32 = 1;

    fn muxed_ed25519(byte: u8) -> Vec<u8> {
        let mut v = 0u32.to_be_bytes().to_vec();
        v.extend(std::iter::repeat(byte).take(32));
        v
    }

    fn native_asset() -> Vec<u8> {
        0u32.to_be_bytes().to_vec()
    }

    /// A single-operation payment transaction on an unrecognized network,
    /// with no preconditions or memo: source, fee, sequence, Network,
    /// Memo, then one Payment operation.
    fn payment_tx_envelope() -> Vec<u8> {
        let mut op = muxed_ed25519(9); // payment destination
        op.extend(native_asset());
        op.extend_from_slice(&250_000_000i64.to_be_bytes()); // 25.0000000

        let mut operations = 1u32.to_be_bytes().to_vec();
        operations.extend_from_slice(&0u32.to_be_bytes()); // no operation source
        operations.extend_from_slice(&OP_PAYMENT.to_be_bytes());
        operations.extend(op);

        let mut tx = muxed_ed25519(1); // tx source
        tx.extend_from_slice(&100u32.to_be_bytes()); // fee
        tx.extend_from_slice(&7i64.to_be_bytes()); // seq num
        tx.extend_from_slice(&0u32.to_be_bytes()); // preconditions none
        tx.extend_from_slice(&0u32.to_be_bytes()); // memo none
        tx.extend(operations);

        let mut buf = [0xAB; 32].to_vec(); // unrecognized network hash
        buf.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        buf.extend(tx);
        buf
    }

    #[test]
    fn walks_header_then_payment_operation_forward() {
        let buf = payment_tx_envelope();
        let mut formatter = Formatter::for_transaction(&buf).unwrap();

        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Network");
        assert_eq!(value.as_str(), "Unknown");

        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Max Fee");
        assert_eq!(value.as_str(), "0.00001 native");

        let (caption, _) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Sequence Num");

        // Single-operation transaction: no "Operation N of M" pair, straight
        // to the operation's type.
        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Operation Type");
        assert_eq!(value.as_str(), "Payment");

        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Send");
        assert_eq!(value.as_str(), "25 native");

        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Destination");
        assert!(value.as_str().starts_with('G'));

        // No per-operation source in this fixture, so the op-source step is
        // skipped straight through to the transaction source at the end.
        let (caption, value) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Tx Source");
        assert!(value.as_str().starts_with('G'));

        assert!(matches!(formatter.next_data(), Err(FormatError::EndOfChain)));
    }

    #[test]
    fn previous_data_replays_back_to_the_same_field() {
        let buf = payment_tx_envelope();
        let mut formatter = Formatter::for_transaction(&buf).unwrap();

        for _ in 0..4 {
            formatter.next_data().unwrap();
        }
        let (forward_caption, forward_value) = formatter.next_data().unwrap(); // Send

        formatter.previous_data().unwrap(); // back to the field before Send
        let (caption, value) = formatter.next_data().unwrap(); // forward again onto Send

        assert_eq!(caption.as_str(), forward_caption.as_str());
        assert_eq!(value.as_str(), forward_value.as_str());
    }

    #[test]
    fn reset_returns_to_the_first_field() {
        let buf = payment_tx_envelope();
        let mut formatter = Formatter::for_transaction(&buf).unwrap();
        formatter.next_data().unwrap();
        formatter.next_data().unwrap();
        formatter.reset();
        let (caption, _) = formatter.next_data().unwrap();
        assert_eq!(caption.as_str(), "Network");
        assert_eq!(formatter.step_index(), 1);
    }

    #[test]
    fn no_plugin_marks_unverified_only_on_contract_argument_fallback() {
        let buf = payment_tx_envelope();
        let formatter = Formatter::for_transaction(&buf).unwrap();
        assert!(!formatter.unverified_contracts());
    }
}
