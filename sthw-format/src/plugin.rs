//! Contract-display-override bridge.
//!
//! For a recognized contract invocation, a plugin replaces the generic
//! SCVal-argument walk with a small set of domain-appropriate
//! caption/value pairs (a scaled token amount, an address, a live-until
//! ledger). The formatter never depends on what a plugin is *for* --
//! only on this four-call shape, mirroring the callback contract the
//! device-side host exposes to collaborators.

use sthw_display::{amount, strkey, Value};
use sthw_model::{InvokeContractArgs, ScAddress, ScVal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginOutcome {
    Ok,
    Error,
    Unavailable,
}

const MAX_PAIRS: usize = 4;

/// One caption/value pair a plugin contributes in place of a generic
/// argument rendering.
#[derive(Clone, Copy)]
pub struct PluginPair {
    pub caption: &'static str,
    pub value: Value,
}

/// The four-callback contract a contract-display override implements.
/// `init_contract` additionally receives the function name and argument
/// accessor so a plugin can resolve and cache the pairs it will later
/// hand back through `query_pair` -- the wire signatures in the device
/// host's C API carry this same data through an opaque context pointer
/// set up by an earlier call, which a Rust trait has no equivalent for.
pub trait ContractPlugin {
    fn check_presence(&mut self, contract: ScAddress) -> bool;

    fn init_contract<'b>(
        &mut self,
        contract: ScAddress,
        function_name: &[u8],
        args: &InvokeContractArgs<'b>,
        input: &'b [u8],
    ) -> PluginOutcome;

    fn query_pair_count(&mut self, contract: ScAddress) -> (PluginOutcome, u8);

    fn query_pair(&mut self, contract: ScAddress, index: u8) -> (PluginOutcome, Option<PluginPair>);
}

/// Ask the bridge to take over argument rendering for a contract
/// invocation, per SPEC_FULL §4.6: `check_presence`, then `init_contract`,
/// then `query_pair_count`. Any non-`Ok` outcome (or a zero pair count)
/// means "no plugin applies" -- the caller falls back to generic
/// rendering and flags `unverified_contracts`.
pub fn resolve_pairs<'a>(
    plugin: &mut dyn ContractPlugin,
    contract: ScAddress,
    function_name: &[u8],
    args: &InvokeContractArgs<'a>,
    input: &'a [u8],
) -> Option<u8> {
    if !plugin.check_presence(contract) {
        return None;
    }
    if plugin.init_contract(contract, function_name, args, input) != PluginOutcome::Ok {
        return None;
    }
    match plugin.query_pair_count(contract) {
        (PluginOutcome::Ok, count) if count > 0 => Some(count),
        _ => None,
    }
}

struct TokenEntry {
    contract: [u8; 32],
    code: &'static str,
    decimals: u32,
}

/// Built-in plugin for a short registry of well-known token contracts.
/// Recognizes `transfer(from, to, amount)` and
/// `approve(from, spender, amount, live_until_ledger)`, formatting the
/// amount scaled by the token's decimals and suffixed with its code.
/// Unknown contracts, or functions other than these two, are left for
/// generic rendering.
pub struct TokenPlugin {
    registry: &'static [TokenEntry],
    active: Option<usize>,
    pairs: [Option<PluginPair>; MAX_PAIRS],
    pair_count: u8,
}

impl TokenPlugin {
    pub fn new() -> Self {
        TokenPlugin {
            registry: KNOWN_TOKENS,
            active: None,
            pairs: [None; MAX_PAIRS],
            pair_count: 0,
        }
    }

    fn find(&self, contract: ScAddress) -> Option<usize> {
        let ScAddress::Contract(id) = contract else {
            return None;
        };
        self.registry.iter().position(|e| e.contract == id)
    }

    fn store_pairs<const N: usize>(&mut self, pairs: [PluginPair; N]) {
        self.pair_count = pairs.len() as u8;
        for (slot, pair) in self.pairs.iter_mut().zip(pairs) {
            *slot = Some(pair);
        }
    }
}

impl Default for TokenPlugin {
    fn default() -> Self {
        Self::new()
    }
}

const KNOWN_TOKENS: &[TokenEntry] = &[TokenEntry {
    contract: *b"\x36\x3e\xaa\x38\x67\x84\x1f\xba\xb5\x4a\x88\x31\xaf\x06\xd4\x96\x4b\xdd\x13\x45\xf8\x57\x5f\x0c\x40\xaf\x13\x6d\xbe\xbf\xb2\x18",
    code: "USDC",
    decimals: 7,
}];

impl ContractPlugin for TokenPlugin {
    fn check_presence(&mut self, contract: ScAddress) -> bool {
        self.find(contract).is_some()
    }

    fn init_contract<'b>(
        &mut self,
        contract: ScAddress,
        function_name: &[u8],
        args: &InvokeContractArgs<'b>,
        input: &'b [u8],
    ) -> PluginOutcome {
        let Some(entry_idx) = self.find(contract) else {
            return PluginOutcome::Unavailable;
        };
        self.pairs = [None; MAX_PAIRS];
        self.pair_count = 0;
        let entry = &self.registry[entry_idx];
        let stored = match function_name {
            b"transfer" => build_transfer_pairs(args, input, entry).map(|pairs| self.store_pairs(pairs)),
            b"approve" => build_approve_pairs(args, input, entry).map(|pairs| self.store_pairs(pairs)),
            _ => None,
        };
        match stored {
            Some(()) => {
                self.active = Some(entry_idx);
                PluginOutcome::Ok
            }
            None => PluginOutcome::Unavailable,
        }
    }

    fn query_pair_count(&mut self, _contract: ScAddress) -> (PluginOutcome, u8) {
        if self.active.is_some() {
            (PluginOutcome::Ok, self.pair_count)
        } else {
            (PluginOutcome::Unavailable, 0)
        }
    }

    fn query_pair(&mut self, _contract: ScAddress, index: u8) -> (PluginOutcome, Option<PluginPair>) {
        match self.pairs.get(index as usize) {
            Some(Some(pair)) => (PluginOutcome::Ok, Some(*pair)),
            _ => (PluginOutcome::Error, None),
        }
    }
}

fn scval_i128(v: ScVal<'_>) -> Option<i128> {
    match v {
        ScVal::I128 { hi, lo } => Some(((hi as i128) << 64) | lo as i128),
        _ => None,
    }
}

fn address_pair(caption: &'static str, v: ScVal<'_>) -> Option<PluginPair> {
    let ScVal::Address(addr) = v else {
        return None;
    };
    let mut value = Value::new();
    match addr {
        ScAddress::Account(k) => strkey::encode_ed25519(&k, &mut value).ok()?,
        ScAddress::Contract(k) => strkey::encode_contract(&k, &mut value).ok()?,
    }
    Some(PluginPair { caption, value })
}

fn build_transfer_pairs<'a>(args: &InvokeContractArgs<'a>, input: &'a [u8], entry: &TokenEntry) -> Option<[PluginPair; 3]> {
    if args.args_count != 3 {
        return None;
    }
    let from = args.arg_at(input, 0).ok()?;
    let to = args.arg_at(input, 1).ok()?;
    let raw_amount = scval_i128(args.arg_at(input, 2).ok()?)?;
    let mut amount_value = Value::new();
    amount::format_scaled_amount(raw_amount, entry.decimals, &mut amount_value).ok()?;
    amount_value.push_str(" ").ok()?;
    amount_value.push_str(entry.code).ok()?;
    Some([
        PluginPair {
            caption: "Transfer",
            value: amount_value,
        },
        address_pair("From", from)?,
        address_pair("To", to)?,
    ])
}

fn build_approve_pairs<'a>(args: &InvokeContractArgs<'a>, input: &'a [u8], entry: &TokenEntry) -> Option<[PluginPair; 4]> {
    if args.args_count != 4 {
        return None;
    }
    let from = args.arg_at(input, 0).ok()?;
    let spender = args.arg_at(input, 1).ok()?;
    let raw_amount = scval_i128(args.arg_at(input, 2).ok()?)?;
    let ScVal::U32(live_until) = args.arg_at(input, 3).ok()? else {
        return None;
    };
    let mut amount_value = Value::new();
    amount::format_scaled_amount(raw_amount, entry.decimals, &mut amount_value).ok()?;
    amount_value.push_str(" ").ok()?;
    amount_value.push_str(entry.code).ok()?;
    let mut ledger_value = Value::new();
    sthw_display::integer::format_u32(live_until, &mut ledger_value).ok()?;
    Some([
        PluginPair {
            caption: "Approve",
            value: amount_value,
        },
        address_pair("From", from)?,
        address_pair("Spender", spender)?,
        PluginPair {
            caption: "Live Until",
            value: ledger_value,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_contract_is_not_present() {
        let mut plugin = TokenPlugin::new();
        assert!(!plugin.check_presence(ScAddress::Contract([1u8; 32])));
    }

    #[test]
    fn known_contract_is_present() {
        let mut plugin = TokenPlugin::new();
        assert!(plugin.check_presence(ScAddress::Contract(KNOWN_TOKENS[0].contract)));
    }
}
