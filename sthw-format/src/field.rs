use crate::error::FormatResult;
use sthw_display::amount::AssetLabel;
use sthw_display::{amount, binary, integer, strkey, time, Caption, Value};
use sthw_model::{Asset, AssetCode, MuxedAccount, Price, ScAddress, ScVal, SignerKey};

/// The asset context an amount is denominated in, carried alongside the
/// raw stroop value so `render` can append the right label (§4.4).
#[derive(Clone, Copy)]
pub enum AmountAsset {
    Asset { asset: Asset, network_known: bool },
    /// No asset is recoverable from the operation's own wire bytes (the
    /// liquidity-pool reserve amounts); rendered with no label at all.
    Pool,
}

/// One caption/value pair's worth of underlying data, in the form every
/// display primitive in `sthw-display` understands. A step in the
/// formatter's chain names one `Field` and the caption to show beside it;
/// `render` does the actual printing into the caller's fixed buffers.
#[derive(Clone, Copy)]
pub enum Field<'a> {
    Account(MuxedAccount),
    Contract([u8; 32]),
    SignerKeyField(SignerKey<'a>),
    Asset(Asset),
    Amount(i64, AmountAsset),
    PriceField(Price),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    OptU32(Option<u32>),
    OptI64(Option<i64>),
    Text(&'a [u8]),
    OptText(Option<&'a [u8]>),
    Hex32([u8; 32]),
    AssetCode12([u8; 12]),
    AccountFlags(u32),
    TrustLineFlags(u32),
    ScValField(ScVal<'a>),
    Timestamp(u64),
    Plain(&'static str),
    Count(u32),
    /// A 1-based position within a known total, rendered as "N of M"
    /// (operation index, authorization index, sub-invocation index).
    OrdinalOf { index: u32, total: u32 },
    /// A value already rendered by a contract-display plugin; copied
    /// through verbatim rather than formatted again.
    Rendered(Value),
}

fn render_account(account: &MuxedAccount, caption: &mut Caption, value: &mut Value, label: &'static str) -> FormatResult<()> {
    caption.push_str(label)?;
    match account {
        MuxedAccount::Ed25519(key) => strkey::encode_ed25519(key, value)?,
        MuxedAccount::MuxedEd25519 { id, ed25519 } => strkey::encode_muxed(ed25519, *id, value)?,
    }
    Ok(())
}

fn render_signer_key(key: &SignerKey<'_>, caption: &mut Caption, value: &mut Value, label: &'static str) -> FormatResult<()> {
    caption.push_str(label)?;
    match key {
        SignerKey::Ed25519(k) => strkey::encode_ed25519(k, value)?,
        SignerKey::PreAuthTx(k) => strkey::encode_pre_auth_tx(k, value)?,
        SignerKey::HashX(k) => strkey::encode_hash_x(k, value)?,
        SignerKey::Ed25519SignedPayload { ed25519, payload } => {
            strkey::encode_signed_payload(ed25519, payload, value)?
        }
    }
    Ok(())
}

fn render_asset(asset: &Asset, caption: &mut Caption, value: &mut Value, label: &'static str) -> FormatResult<()> {
    caption.push_str(label)?;
    match asset {
        Asset::Native => value.push_str("XLM")?,
        Asset::Credit { code, issuer } => {
            let bytes: &[u8] = match code {
                AssetCode::AlphaNum4(b) => b,
                AssetCode::AlphaNum12(b) => b,
            };
            amount::format_asset_code(bytes, value)?;
            value.push_str("@")?;
            let mut full: Value = Value::new();
            strkey::encode_ed25519(&issuer.0, &mut full)?;
            strkey::abbreviate(full.as_str(), 4, 4, value)?;
        }
    }
    Ok(())
}

fn render_amount(raw: i64, ctx: &AmountAsset, value: &mut Value) -> FormatResult<()> {
    match ctx {
        AmountAsset::Pool => amount::format_amount(raw, AssetLabel::None, value)?,
        AmountAsset::Asset { asset: Asset::Native, network_known } => {
            let label = if *network_known { AssetLabel::Xlm } else { AssetLabel::NativeUnknownNetwork };
            amount::format_amount(raw, label, value)?;
        }
        AmountAsset::Asset { asset: Asset::Credit { code, issuer }, .. } => {
            let bytes: &[u8] = match code {
                AssetCode::AlphaNum4(b) => b,
                AssetCode::AlphaNum12(b) => b,
            };
            amount::format_amount(raw, AssetLabel::Credit { code: bytes, issuer: &issuer.0 }, value)?;
        }
    }
    Ok(())
}

fn write_text_value(bytes: &[u8], value: &mut Value) -> FormatResult<()> {
    if binary::is_printable_binary(bytes) {
        value.push_str(std::str::from_utf8(bytes).unwrap_or("?"))?;
    } else if bytes.is_empty() {
        value.push_str("[empty]")?;
    } else {
        binary::format_hex_truncated(bytes, 48, value)?;
    }
    Ok(())
}

fn render_text(bytes: &[u8], caption: &mut Caption, value: &mut Value, label: &'static str) -> FormatResult<()> {
    caption.push_str(label)?;
    write_text_value(bytes, value)
}

fn render_scval(val: &ScVal<'_>, caption: &mut Caption, value: &mut Value, label: &'static str) -> FormatResult<()> {
    caption.push_str(label)?;
    match val {
        ScVal::Bool(b) => value.push_str(if *b { "true" } else { "false" })?,
        ScVal::Void => value.push_str("[void]")?,
        ScVal::Error => value.push_str("[error]")?,
        ScVal::U32(v) => integer::format_u32(*v, value)?,
        ScVal::I32(v) => integer::format_i32(*v, value)?,
        ScVal::U64(v) => integer::format_u64(*v, value)?,
        ScVal::I64(v) => integer::format_i64(*v, value)?,
        ScVal::Timepoint(v) | ScVal::Duration(v) => integer::format_u64(*v, value)?,
        ScVal::U128 { hi, lo } => integer::format_u128(*hi, *lo, value)?,
        ScVal::I128 { hi, lo } => integer::format_i128(*hi, *lo, value)?,
        ScVal::U256 { hi_hi, hi_lo, lo_hi, lo_lo } => integer::format_u256(*hi_hi, *hi_lo, *lo_hi, *lo_lo, value)?,
        ScVal::I256 { hi_hi, hi_lo, lo_hi, lo_lo } => integer::format_i256(*hi_hi, *hi_lo, *lo_hi, *lo_lo, value)?,
        ScVal::Bytes(b) => binary::format_hex_truncated(b, 48, value)?,
        ScVal::String(b) | ScVal::Symbol(b) => write_text_value(b, value)?,
        ScVal::Vec { count } => {
            value.push_str("[vec, ")?;
            integer::format_u32(*count, value)?;
            value.push_str(" items]")?;
        }
        ScVal::Map { count } => {
            value.push_str("[map, ")?;
            integer::format_u32(*count, value)?;
            value.push_str(" entries]")?;
        }
        ScVal::Address(addr) => match addr {
            ScAddress::Account(k) => strkey::encode_ed25519(k, value)?,
            ScAddress::Contract(k) => strkey::encode_contract(k, value)?,
        },
        ScVal::ContractInstance => value.push_str("[contract instance]")?,
        ScVal::LedgerKeyContractInstance => value.push_str("[ledger key: instance]")?,
        ScVal::LedgerKeyNonce(n) => integer::format_i64(*n, value)?,
    }
    Ok(())
}

impl<'a> Field<'a> {
    /// An amount denominated in a known asset, suffixed with its label.
    pub fn amount(raw: i64, asset: Asset, network_known: bool) -> Field<'a> {
        Field::Amount(raw, AmountAsset::Asset { asset, network_known })
    }

    /// An amount with no asset recoverable from the wire bytes (a
    /// liquidity pool's own reserve amounts); renders with no label.
    pub fn pool_amount(raw: i64) -> Field<'a> {
        Field::Amount(raw, AmountAsset::Pool)
    }

    pub fn render(&self, label: &'static str, caption: &mut Caption, value: &mut Value) -> FormatResult<()> {
        match self {
            Field::Account(a) => render_account(a, caption, value, label),
            Field::Contract(id) => {
                caption.push_str(label)?;
                strkey::encode_contract(id, value)?;
                Ok(())
            }
            Field::SignerKeyField(k) => render_signer_key(k, caption, value, label),
            Field::Asset(a) => render_asset(a, caption, value, label),
            Field::Amount(raw, ctx) => {
                caption.push_str(label)?;
                render_amount(*raw, ctx, value)?;
                Ok(())
            }
            Field::PriceField(p) => {
                caption.push_str(label)?;
                integer::format_i32(p.n, value)?;
                value.push_str("/")?;
                integer::format_i32(p.d, value)?;
                Ok(())
            }
            Field::I32(v) => {
                caption.push_str(label)?;
                integer::format_i32(*v, value)?;
                Ok(())
            }
            Field::U32(v) => {
                caption.push_str(label)?;
                integer::format_u32(*v, value)?;
                Ok(())
            }
            Field::I64(v) => {
                caption.push_str(label)?;
                integer::format_i64(*v, value)?;
                Ok(())
            }
            Field::U64(v) => {
                caption.push_str(label)?;
                integer::format_u64(*v, value)?;
                Ok(())
            }
            Field::OptU32(v) => {
                caption.push_str(label)?;
                match v {
                    Some(v) => integer::format_u32(*v, value)?,
                    None => value.push_str("[none]")?,
                }
                Ok(())
            }
            Field::OptI64(v) => {
                caption.push_str(label)?;
                match v {
                    Some(v) => integer::format_i64(*v, value)?,
                    None => value.push_str("[none]")?,
                }
                Ok(())
            }
            Field::Text(bytes) => render_text(bytes, caption, value, label),
            Field::OptText(bytes) => {
                caption.push_str(label)?;
                match bytes {
                    Some(bytes) if !bytes.is_empty() => write_text_value(bytes, value)?,
                    _ => value.push_str("[none]")?,
                }
                Ok(())
            }
            Field::Hex32(bytes) => {
                caption.push_str(label)?;
                binary::format_hex(bytes, value)?;
                Ok(())
            }
            Field::AssetCode12(bytes) => {
                caption.push_str(label)?;
                amount::format_asset_code(bytes, value)?;
                Ok(())
            }
            Field::AccountFlags(mask) => {
                caption.push_str(label)?;
                sthw_display::flags::format_flags(*mask, sthw_display::flags::ACCOUNT_FLAGS, value)?;
                Ok(())
            }
            Field::TrustLineFlags(mask) => {
                caption.push_str(label)?;
                sthw_display::flags::format_flags(*mask, sthw_display::flags::TRUST_LINE_FLAGS, value)?;
                Ok(())
            }
            Field::ScValField(v) => render_scval(v, caption, value, label),
            Field::Timestamp(secs) => {
                caption.push_str(label)?;
                time::format_unix_timestamp(*secs as i64, value)?;
                Ok(())
            }
            Field::Plain(text) => {
                caption.push_str(label)?;
                value.push_str(text)?;
                Ok(())
            }
            Field::Count(n) => {
                caption.push_str(label)?;
                integer::format_u32(*n, value)?;
                Ok(())
            }
            Field::OrdinalOf { index, total } => {
                caption.push_str(label)?;
                integer::format_u32(*index, value)?;
                value.push_str(" of ")?;
                integer::format_u32(*total, value)?;
                Ok(())
            }
            Field::Rendered(rendered) => {
                caption.push_str(label)?;
                value.push_str(rendered.as_str())?;
                Ok(())
            }
        }
    }
}

