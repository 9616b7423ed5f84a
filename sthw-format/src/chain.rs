//! Field sequences for the transaction header and each of the 27
//! operation bodies. Each function is a pure, idempotent lookup from a
//! step index to the field shown at that index -- the formatter never
//! materializes these as a list, it asks for index N again on every
//! re-entry (forward step, or reset-and-replay on the way back).

use crate::field::Field;
use sthw_codec::ParseResult;
use sthw_model::{
    Asset, AssetCode, AuthorizedFunction, ChangeTrustAsset, ContractExecutable, ContractIdPreimage, Envelope,
    EnvelopeKind, LedgerKey, MuxedAccount, Network, Operation, OperationBody, RevokeSponsorshipOp, ScAddress,
    TransactionEnvelope,
};

/// Whether the envelope's network is one the amount primitive can name
/// (`Public`/`Testnet`) rather than falling back to a generic `native`
/// label for the native asset.
fn network_known(envelope: &Envelope<'_>) -> bool {
    !matches!(envelope.network, Network::Unknown)
}

pub enum HeaderOutcome<'a> {
    Show(&'static str, Field<'a>),
    Skip,
    Exhausted,
}

/// `idx` walks: (fee-bump fee, fee-bump source) if applicable, then
/// network, memo, fee, sequence, the optional preconditions fields in
/// declaration order, then the transaction source account.
pub fn header_step<'a>(envelope: &Envelope<'a>, idx: u8) -> HeaderOutcome<'a> {
    let is_fee_bump = matches!(envelope.kind, EnvelopeKind::FeeBump(_));
    if is_fee_bump {
        if let EnvelopeKind::FeeBump(fb) = &envelope.kind {
            match idx {
                0 => return HeaderOutcome::Show("Fee Bump Fee", Field::amount(fb.fee, Asset::Native, network_known(envelope))),
                1 => return HeaderOutcome::Show("Fee Bump Source", Field::Account(fb.fee_source)),
                _ => {}
            }
        }
    }
    let base = if is_fee_bump { 2 } else { 0 };
    let tx = envelope.transaction();
    header_tx_step(tx, idx.saturating_sub(base), envelope)
}

fn header_tx_step<'a>(tx: &TransactionEnvelope<'a>, offset: u8, envelope: &Envelope<'a>) -> HeaderOutcome<'a> {
    match offset {
        0 => HeaderOutcome::Show("Network", network_field(envelope)),
        1 => match memo_field(tx) {
            Some(field) => HeaderOutcome::Show("Memo", field),
            None => HeaderOutcome::Skip,
        },
        2 => HeaderOutcome::Show("Max Fee", Field::amount(tx.fee as i64, Asset::Native, network_known(envelope))),
        3 => HeaderOutcome::Show("Sequence Num", Field::I64(tx.seq_num)),
        4 => match tx.preconditions.time_bounds {
            Some(tb) => HeaderOutcome::Show("Valid After", Field::Timestamp(tb.min_time)),
            None => HeaderOutcome::Skip,
        },
        5 => match tx.preconditions.time_bounds {
            Some(tb) if tb.max_time != 0 => HeaderOutcome::Show("Valid Before", Field::Timestamp(tb.max_time)),
            _ => HeaderOutcome::Skip,
        },
        6 => match tx.preconditions.ledger_bounds {
            Some(lb) => HeaderOutcome::Show("Min Ledger", Field::U32(lb.min_ledger)),
            None => HeaderOutcome::Skip,
        },
        7 => match tx.preconditions.ledger_bounds {
            Some(lb) if lb.max_ledger != 0 => HeaderOutcome::Show("Max Ledger", Field::U32(lb.max_ledger)),
            _ => HeaderOutcome::Skip,
        },
        8 => match tx.preconditions.min_seq_num {
            Some(n) => HeaderOutcome::Show("Min Seq Num", Field::I64(n)),
            None => HeaderOutcome::Skip,
        },
        9 => {
            if tx.preconditions.min_seq_age != 0 {
                HeaderOutcome::Show("Min Seq Age", Field::U64(tx.preconditions.min_seq_age))
            } else {
                HeaderOutcome::Skip
            }
        }
        10 => {
            if tx.preconditions.min_seq_ledger_gap != 0 {
                HeaderOutcome::Show("Min Seq Gap", Field::U32(tx.preconditions.min_seq_ledger_gap))
            } else {
                HeaderOutcome::Skip
            }
        }
        11 | 12 => {
            let signer_idx = (offset - 11) as usize;
            match tx.preconditions.extra_signers.get(signer_idx) {
                Some(key) => HeaderOutcome::Show("Extra Signer", Field::SignerKeyField(*key)),
                None => HeaderOutcome::Skip,
            }
        }
        _ => HeaderOutcome::Exhausted,
    }
}

/// The field shown for an operation's own source account, if it overrides
/// the transaction source. Checked before `operation_field` at index 0.
pub fn operation_source<'a>(op: &Operation<'a>) -> Option<Field<'a>> {
    op.source_account.map(Field::Account)
}

/// Field shown for a host function's own descriptor (contract + function
/// name for an invocation, preimage + executable for a contract
/// creation, or upload size for Wasm), before any contract arguments.
pub(crate) fn function_header_field<'a>(function: &AuthorizedFunction<'a>, idx: u8) -> Option<(&'static str, Field<'a>)> {
    match function {
        AuthorizedFunction::ContractFn(args) => match idx {
            0 => Some(("Contract", address_field(args.contract_address))),
            1 => Some(("Function", Field::Text(args.function_name))),
            _ => None,
        },
        AuthorizedFunction::CreateContract(args) => match idx {
            0 => Some(preimage_field(&args.preimage)),
            1 => Some(executable_field(&args.executable)),
            _ => None,
        },
        AuthorizedFunction::UploadWasm { size } => match idx {
            0 => Some(("Wasm Size", Field::U32(*size))),
            _ => None,
        },
    }
}

/// Number of header fields `function_header_field` shows before arguments
/// (only `ContractFn` has further, per-argument fields after these).
pub(crate) fn function_header_len(function: &AuthorizedFunction<'_>) -> u8 {
    match function {
        AuthorizedFunction::ContractFn(_) => 2,
        AuthorizedFunction::CreateContract(_) => 2,
        AuthorizedFunction::UploadWasm { .. } => 1,
    }
}

fn preimage_field<'a>(preimage: &ContractIdPreimage) -> (&'static str, Field<'a>) {
    match preimage {
        ContractIdPreimage::FromAddress { address, .. } => ("From Address", address_field(*address)),
        ContractIdPreimage::FromAsset(asset) => ("From Asset", Field::Asset(*asset)),
    }
}

fn executable_field<'a>(executable: &ContractExecutable) -> (&'static str, Field<'a>) {
    match executable {
        ContractExecutable::Wasm(hash) => ("Wasm Hash", Field::Hex32(*hash)),
        ContractExecutable::StellarAsset => ("Executable", Field::Plain("stellar asset contract")),
    }
}

fn address_field<'a>(address: ScAddress) -> Field<'a> {
    match address {
        ScAddress::Account(k) => Field::Account(MuxedAccount::Ed25519(k)),
        ScAddress::Contract(k) => Field::Contract(k),
    }
}

/// The field at `idx` in one of the 27 operation bodies. Returns `None`
/// once `idx` runs past the operation's own fields -- for
/// `InvokeHostFunction` this covers only the host function descriptor and
/// its contract arguments, never the authorization entries, which the
/// formatter walks separately as their own invocation trees.
pub fn operation_field<'a>(
    body: &OperationBody<'a>,
    input: &'a [u8],
    idx: u8,
    network_known: bool,
) -> ParseResult<Option<(&'static str, Field<'a>)>> {
    use OperationBody::*;
    let out = match body {
        CreateAccount(op) => match idx {
            0 => Some(("Destination", Field::Account(MuxedAccount::Ed25519(op.destination.0)))),
            1 => Some(("Starting Balance", Field::amount(op.starting_balance, Asset::Native, network_known))),
            _ => None,
        },
        Payment(op) => match idx {
            0 => Some(("Send", Field::amount(op.amount, op.asset, network_known))),
            1 => Some(("Destination", Field::Account(op.destination))),
            _ => None,
        },
        PathPaymentStrictReceive(op) => match idx {
            0 => Some(("Send Asset", Field::Asset(op.send_asset))),
            1 => Some(("Send Max", Field::amount(op.send_max, op.send_asset, network_known))),
            2 => Some(("Destination", Field::Account(op.destination))),
            3 => Some(("Dest Asset", Field::Asset(op.dest_asset))),
            4 => Some(("Dest Amount", Field::amount(op.dest_amount, op.dest_asset, network_known))),
            n if (n as usize) < 5 + op.path.len() => op.path.get(n as usize - 5).map(|a| ("Via", Field::Asset(*a))),
            _ => None,
        },
        PathPaymentStrictSend(op) => match idx {
            0 => Some(("Send Asset", Field::Asset(op.send_asset))),
            1 => Some(("Send Amount", Field::amount(op.send_amount, op.send_asset, network_known))),
            2 => Some(("Destination", Field::Account(op.destination))),
            3 => Some(("Dest Asset", Field::Asset(op.dest_asset))),
            4 => Some(("Dest Min", Field::amount(op.dest_min, op.dest_asset, network_known))),
            n if (n as usize) < 5 + op.path.len() => op.path.get(n as usize - 5).map(|a| ("Via", Field::Asset(*a))),
            _ => None,
        },
        ManageSellOffer(op) => match idx {
            0 => Some(("Selling", Field::Asset(op.selling))),
            1 => Some(("Buying", Field::Asset(op.buying))),
            2 => Some(("Amount", Field::amount(op.amount, op.selling, network_known))),
            3 => Some(("Price", Field::PriceField(op.price))),
            4 => Some(("Offer Id", Field::I64(op.offer_id))),
            _ => None,
        },
        ManageBuyOffer(op) => match idx {
            0 => Some(("Selling", Field::Asset(op.selling))),
            1 => Some(("Buying", Field::Asset(op.buying))),
            2 => Some(("Buy Amount", Field::amount(op.buy_amount, op.buying, network_known))),
            3 => Some(("Price", Field::PriceField(op.price))),
            4 => Some(("Offer Id", Field::I64(op.offer_id))),
            _ => None,
        },
        CreatePassiveSellOffer(op) => match idx {
            0 => Some(("Selling", Field::Asset(op.selling))),
            1 => Some(("Buying", Field::Asset(op.buying))),
            2 => Some(("Amount", Field::amount(op.amount, op.selling, network_known))),
            3 => Some(("Price", Field::PriceField(op.price))),
            _ => None,
        },
        SetOptions(op) => set_options_field(op, idx),
        ChangeTrust(op) => match idx {
            0 => Some(("Asset", change_trust_asset_field(&op.line))),
            1 => Some(("Limit", change_trust_limit_field(&op.line, op.limit, network_known))),
            _ => None,
        },
        AllowTrust(op) => match idx {
            0 => Some(("Trustor", Field::Account(MuxedAccount::Ed25519(op.trustor.0)))),
            1 => Some(("Asset Code", asset_code_field(&op.asset_code))),
            2 => Some(("Authorize", Field::TrustLineFlags(op.authorize))),
            _ => None,
        },
        AccountMerge(destination) => match idx {
            0 => Some(("Destination", Field::Account(*destination))),
            _ => None,
        },
        Inflation => None,
        ManageData(op) => match idx {
            0 => Some(("Data Name", Field::Text(op.data_name))),
            1 => Some(("Data Value", Field::OptText(op.data_value))),
            _ => None,
        },
        BumpSequence { bump_to } => match idx {
            0 => Some(("Bump To", Field::I64(*bump_to))),
            _ => None,
        },
        CreateClaimableBalance(op) => match idx {
            0 => Some(("Asset", Field::Asset(op.asset))),
            1 => Some(("Amount", Field::amount(op.amount, op.asset, network_known))),
            n if (n as usize) < 2 + op.claimants.len() => op
                .claimants
                .get(n as usize - 2)
                .map(|c| ("Claimant", Field::Account(MuxedAccount::Ed25519(c.destination.0)))),
            _ => None,
        },
        ClaimClaimableBalance { balance_id } => match idx {
            0 => Some(("Balance Id", Field::Hex32(balance_id.0))),
            _ => None,
        },
        BeginSponsoringFutureReserves { sponsored_id } => match idx {
            0 => Some(("Sponsored Id", Field::Account(MuxedAccount::Ed25519(sponsored_id.0)))),
            _ => None,
        },
        EndSponsoringFutureReserves => None,
        RevokeSponsorship(op) => revoke_sponsorship_field(op, idx),
        Clawback(op) => match idx {
            0 => Some(("Asset", Field::Asset(op.asset))),
            1 => Some(("From", Field::Account(op.from))),
            2 => Some(("Amount", Field::amount(op.amount, op.asset, network_known))),
            _ => None,
        },
        ClawbackClaimableBalance { balance_id } => match idx {
            0 => Some(("Balance Id", Field::Hex32(balance_id.0))),
            _ => None,
        },
        SetTrustLineFlags(op) => match idx {
            0 => Some(("Trustor", Field::Account(MuxedAccount::Ed25519(op.trustor.0)))),
            1 => Some(("Asset", Field::Asset(op.asset))),
            2 => Some(("Clear Flags", Field::TrustLineFlags(op.clear_flags))),
            3 => Some(("Set Flags", Field::TrustLineFlags(op.set_flags))),
            _ => None,
        },
        LiquidityPoolDeposit(op) => match idx {
            0 => Some(("Pool Id", Field::Hex32(op.liquidity_pool_id))),
            1 => Some(("Max A", Field::pool_amount(op.max_amount_a))),
            2 => Some(("Max B", Field::pool_amount(op.max_amount_b))),
            3 => Some(("Min Price", Field::PriceField(op.min_price))),
            4 => Some(("Max Price", Field::PriceField(op.max_price))),
            _ => None,
        },
        LiquidityPoolWithdraw(op) => match idx {
            0 => Some(("Pool Id", Field::Hex32(op.liquidity_pool_id))),
            1 => Some(("Amount", Field::pool_amount(op.amount))),
            2 => Some(("Min A", Field::pool_amount(op.min_amount_a))),
            3 => Some(("Min B", Field::pool_amount(op.min_amount_b))),
            _ => None,
        },
        InvokeHostFunction(op) => {
            if let Some(shown) = function_header_field(&op.host_function, idx) {
                return Ok(Some(shown));
            }
            let header_len = function_header_len(&op.host_function);
            if idx < header_len {
                return Ok(None);
            }
            let arg_idx = (idx - header_len) as u32;
            if let AuthorizedFunction::ContractFn(args) = &op.host_function {
                if arg_idx < args.args_count {
                    let value = args.arg_at(input, arg_idx)?;
                    return Ok(Some(("Argument", Field::ScValField(value))));
                }
            }
            None
        }
        ExtendFootprintTtl(op) => match idx {
            0 => Some(("Extend To", Field::U32(op.extend_to))),
            _ => None,
        },
        RestoreFootprint => None,
    };
    Ok(out)
}

/// The human-readable name shown as every operation's leading
/// "Operation Type" pair.
pub fn operation_type_name(body: &OperationBody<'_>) -> &'static str {
    use OperationBody::*;
    match body {
        CreateAccount(_) => "Create Account",
        Payment(_) => "Payment",
        PathPaymentStrictReceive(_) => "Path Payment Strict Receive",
        PathPaymentStrictSend(_) => "Path Payment Strict Send",
        ManageSellOffer(_) => "Manage Sell Offer",
        ManageBuyOffer(_) => "Manage Buy Offer",
        CreatePassiveSellOffer(_) => "Create Passive Sell Offer",
        SetOptions(_) => "Set Options",
        ChangeTrust(_) => "Change Trust",
        AllowTrust(_) => "Allow Trust",
        AccountMerge(_) => "Account Merge",
        Inflation => "Inflation",
        ManageData(_) => "Manage Data",
        BumpSequence { .. } => "Bump Sequence",
        CreateClaimableBalance(_) => "Create Claimable Balance",
        ClaimClaimableBalance { .. } => "Claim Claimable Balance",
        BeginSponsoringFutureReserves { .. } => "Begin Sponsoring Future Reserves",
        EndSponsoringFutureReserves => "End Sponsoring Future Reserves",
        RevokeSponsorship(_) => "Revoke Sponsorship",
        Clawback(_) => "Clawback",
        ClawbackClaimableBalance { .. } => "Clawback Claimable Balance",
        SetTrustLineFlags(_) => "Set Trust Line Flags",
        LiquidityPoolDeposit(_) => "Liquidity Pool Deposit",
        LiquidityPoolWithdraw(_) => "Liquidity Pool Withdraw",
        InvokeHostFunction(_) => "Invoke Host Function",
        ExtendFootprintTtl(_) => "Extend Footprint Ttl",
        RestoreFootprint => "Restore Footprint",
    }
}

fn set_options_field<'a>(op: &sthw_model::operation::SetOptionsOp<'a>, idx: u8) -> Option<(&'static str, Field<'a>)> {
    let mut slot = 0u8;
    macro_rules! field {
        ($present:expr, $label:expr, $make:expr) => {
            if let Some(v) = $present {
                if slot == idx {
                    return Some(($label, $make(v)));
                }
                slot += 1;
            }
        };
    }
    field!(op.inflation_dest, "Inflation Dest", |v: sthw_model::AccountId| Field::Account(
        MuxedAccount::Ed25519(v.0)
    ));
    field!(op.clear_flags, "Clear Flags", Field::AccountFlags);
    field!(op.set_flags, "Set Flags", Field::AccountFlags);
    field!(op.master_weight, "Master Weight", Field::U32);
    field!(op.low_threshold, "Low Threshold", Field::U32);
    field!(op.med_threshold, "Med Threshold", Field::U32);
    field!(op.high_threshold, "High Threshold", Field::U32);
    field!(op.home_domain, "Home Domain", Field::Text);
    field!(op.signer, "Signer Key", |v: sthw_model::Signer<'a>| Field::SignerKeyField(v.key));
    None
}

fn change_trust_asset_field<'a>(asset: &ChangeTrustAsset) -> Field<'a> {
    match asset {
        ChangeTrustAsset::Native => Field::Asset(sthw_model::Asset::Native),
        ChangeTrustAsset::Credit { code, issuer } => Field::Asset(sthw_model::Asset::Credit {
            code: *code,
            issuer: *issuer,
        }),
        ChangeTrustAsset::LiquidityPoolShare(_) => Field::Plain("liquidity pool share"),
    }
}

fn change_trust_limit_field<'a>(asset: &ChangeTrustAsset, limit: i64, network_known: bool) -> Field<'a> {
    match asset {
        ChangeTrustAsset::Native => Field::amount(limit, Asset::Native, network_known),
        ChangeTrustAsset::Credit { code, issuer } => Field::amount(
            limit,
            Asset::Credit { code: *code, issuer: *issuer },
            network_known,
        ),
        ChangeTrustAsset::LiquidityPoolShare(_) => Field::pool_amount(limit),
    }
}

fn asset_code_field<'a>(code: &AssetCode) -> Field<'a> {
    let mut bytes = [0u8; 12];
    match code {
        AssetCode::AlphaNum4(b) => bytes[..4].copy_from_slice(b),
        AssetCode::AlphaNum12(b) => bytes.copy_from_slice(b),
    }
    Field::AssetCode12(bytes)
}

fn revoke_sponsorship_field<'a>(op: &RevokeSponsorshipOp<'a>, idx: u8) -> Option<(&'static str, Field<'a>)> {
    match op {
        RevokeSponsorshipOp::LedgerEntry(key) => ledger_key_field(key, idx),
        RevokeSponsorshipOp::Signer { account_id, signer_key } => match idx {
            0 => Some(("Account", Field::Account(MuxedAccount::Ed25519(account_id.0)))),
            1 => Some(("Signer", Field::SignerKeyField(*signer_key))),
            _ => None,
        },
    }
}

fn ledger_key_field<'a>(key: &LedgerKey<'a>, idx: u8) -> Option<(&'static str, Field<'a>)> {
    match key {
        LedgerKey::Account { account_id } => match idx {
            0 => Some(("Ledger Key", Field::Plain("account"))),
            1 => Some(("Account", Field::Account(MuxedAccount::Ed25519(account_id.0)))),
            _ => None,
        },
        LedgerKey::TrustLine { account_id, .. } => match idx {
            0 => Some(("Ledger Key", Field::Plain("trust line"))),
            1 => Some(("Account", Field::Account(MuxedAccount::Ed25519(account_id.0)))),
            _ => None,
        },
        LedgerKey::Offer { seller_id, offer_id } => match idx {
            0 => Some(("Ledger Key", Field::Plain("offer"))),
            1 => Some(("Seller", Field::Account(MuxedAccount::Ed25519(seller_id.0)))),
            2 => Some(("Offer Id", Field::I64(*offer_id))),
            _ => None,
        },
        LedgerKey::Data { account_id, data_name } => match idx {
            0 => Some(("Ledger Key", Field::Plain("data"))),
            1 => Some(("Account", Field::Account(MuxedAccount::Ed25519(account_id.0)))),
            2 => Some(("Data Name", Field::Text(data_name))),
            _ => None,
        },
        LedgerKey::ClaimableBalance { balance_id } => match idx {
            0 => Some(("Ledger Key", Field::Plain("claimable balance"))),
            1 => Some(("Balance Id", Field::Hex32(balance_id.0))),
            _ => None,
        },
        LedgerKey::LiquidityPool { liquidity_pool_id } => match idx {
            0 => Some(("Ledger Key", Field::Plain("liquidity pool"))),
            1 => Some(("Pool Id", Field::Hex32(*liquidity_pool_id))),
            _ => None,
        },
    }
}

fn network_field<'a>(envelope: &Envelope<'a>) -> Field<'a> {
    match envelope.network {
        sthw_model::Network::Public => Field::Plain("Public"),
        sthw_model::Network::Testnet => Field::Plain("Testnet"),
        sthw_model::Network::Unknown => Field::Plain("Unknown"),
    }
}

fn memo_field<'a>(tx: &TransactionEnvelope<'a>) -> Option<Field<'a>> {
    match tx.memo {
        sthw_model::Memo::None => None,
        sthw_model::Memo::Text(t) => Some(Field::Text(t)),
        sthw_model::Memo::Id(id) => Some(Field::U64(id)),
        sthw_model::Memo::Hash(h) => Some(Field::Hex32(h)),
        sthw_model::Memo::Return(h) => Some(Field::Hex32(h)),
    }
}
