use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

pub const SCSYMBOL_MAX_LEN: usize = 32;
pub const SCSTRING_MAX_LEN: usize = 256;
pub const SCBYTES_MAX_LEN: usize = 256;

const SCV_BOOL: u32 = 0;
const SCV_VOID: u32 = 1;
const SCV_ERROR: u32 = 2;
const SCV_U32: u32 = 3;
const SCV_I32: u32 = 4;
const SCV_U64: u32 = 5;
const SCV_I64: u32 = 6;
const SCV_TIMEPOINT: u32 = 7;
const SCV_DURATION: u32 = 8;
const SCV_U128: u32 = 9;
const SCV_I128: u32 = 10;
const SCV_U256: u32 = 11;
const SCV_I256: u32 = 12;
const SCV_BYTES: u32 = 13;
const SCV_STRING: u32 = 14;
const SCV_SYMBOL: u32 = 15;
const SCV_VEC: u32 = 16;
const SCV_MAP: u32 = 17;
const SCV_ADDRESS: u32 = 18;
const SCV_CONTRACT_INSTANCE: u32 = 19;
const SCV_LEDGER_KEY_CONTRACT_INSTANCE: u32 = 20;
const SCV_LEDGER_KEY_NONCE: u32 = 21;

/// A contract address: an account or another contract, each a 32-byte key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScAddress {
    Account([u8; 32]),
    Contract([u8; 32]),
}

const SC_ADDRESS_TYPE_ACCOUNT: u32 = 0;
const SC_ADDRESS_TYPE_CONTRACT: u32 = 1;

impl ScAddress {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            // SCAddress wraps a full PublicKey union, not a bare key.
            SC_ADDRESS_TYPE_ACCOUNT => Ok(ScAddress::Account(crate::account::AccountId::decode(c)?.0)),
            SC_ADDRESS_TYPE_CONTRACT => {
                Ok(ScAddress::Contract(c.fixed_bytes(32)?.try_into().unwrap()))
            }
            _ => Err(ParseError::malformed(offset, "unsupported sc address type")),
        }
    }
}

/// A decoded Soroban value.
///
/// `Vec` and `Map` are never fully materialized: the parser records only
/// the element count (having already walked and discarded the elements to
/// confirm the input is well-formed), and the formatter renders a bounded
/// summary such as `[vec, 3 items]` rather than attempting to flatten an
/// unbounded tree into a fixed-size value buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScVal<'a> {
    Bool(bool),
    Void,
    Error,
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128 { hi: u64, lo: u64 },
    I128 { hi: i64, lo: u64 },
    U256 { hi_hi: u64, hi_lo: u64, lo_hi: u64, lo_lo: u64 },
    I256 { hi_hi: i64, hi_lo: u64, lo_hi: u64, lo_lo: u64 },
    Bytes(&'a [u8]),
    String(&'a [u8]),
    Symbol(&'a [u8]),
    Vec { count: u32 },
    Map { count: u32 },
    Address(ScAddress),
    ContractInstance,
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

impl<'a> ScVal<'a> {
    /// Fully decode the value at the cursor, recursing into (and
    /// discarding) any nested elements so the cursor ends up positioned
    /// immediately after the whole value.
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            SCV_BOOL => Ok(ScVal::Bool(c.bool()?)),
            SCV_VOID => Ok(ScVal::Void),
            SCV_ERROR => {
                // SCError is itself a small union; the core only needs to
                // know a value was an error, not which kind.
                c.u32_be()?;
                c.u32_be()?;
                Ok(ScVal::Error)
            }
            SCV_U32 => Ok(ScVal::U32(c.u32_be()?)),
            SCV_I32 => Ok(ScVal::I32(c.i32_be()?)),
            SCV_U64 => Ok(ScVal::U64(c.u64_be()?)),
            SCV_I64 => Ok(ScVal::I64(c.i64_be()?)),
            SCV_TIMEPOINT => Ok(ScVal::Timepoint(c.u64_be()?)),
            SCV_DURATION => Ok(ScVal::Duration(c.u64_be()?)),
            SCV_U128 => Ok(ScVal::U128 {
                hi: c.u64_be()?,
                lo: c.u64_be()?,
            }),
            SCV_I128 => Ok(ScVal::I128 {
                hi: c.i64_be()?,
                lo: c.u64_be()?,
            }),
            SCV_U256 => Ok(ScVal::U256 {
                hi_hi: c.u64_be()?,
                hi_lo: c.u64_be()?,
                lo_hi: c.u64_be()?,
                lo_lo: c.u64_be()?,
            }),
            SCV_I256 => Ok(ScVal::I256 {
                hi_hi: c.i64_be()?,
                hi_lo: c.u64_be()?,
                lo_hi: c.u64_be()?,
                lo_lo: c.u64_be()?,
            }),
            SCV_BYTES => Ok(ScVal::Bytes(c.bytes_padded(SCBYTES_MAX_LEN)?)),
            SCV_STRING => Ok(ScVal::String(c.bytes_padded(SCSTRING_MAX_LEN)?)),
            SCV_SYMBOL => Ok(ScVal::Symbol(c.bytes_padded(SCSYMBOL_MAX_LEN)?)),
            SCV_VEC => {
                let present = c.bool()?;
                if !present {
                    return Ok(ScVal::Vec { count: 0 });
                }
                let count = c.u32_be()?;
                for _ in 0..count {
                    ScVal::skip(c)?;
                }
                Ok(ScVal::Vec { count })
            }
            SCV_MAP => {
                let present = c.bool()?;
                if !present {
                    return Ok(ScVal::Map { count: 0 });
                }
                let count = c.u32_be()?;
                for _ in 0..count {
                    ScVal::skip(c)?; // key
                    ScVal::skip(c)?; // value
                }
                Ok(ScVal::Map { count })
            }
            SCV_ADDRESS => Ok(ScVal::Address(ScAddress::decode(c)?)),
            SCV_CONTRACT_INSTANCE => {
                skip_contract_instance(c)?;
                Ok(ScVal::ContractInstance)
            }
            SCV_LEDGER_KEY_CONTRACT_INSTANCE => Ok(ScVal::LedgerKeyContractInstance),
            SCV_LEDGER_KEY_NONCE => Ok(ScVal::LedgerKeyNonce(c.i64_be()?)),
            _ => Err(ParseError::malformed(offset, "unsupported scval type")),
        }
    }

    /// Advance past the value at the cursor without constructing one.
    /// Used by the formatter to skip to the N-th argument before decoding
    /// only that one.
    pub fn skip(c: &mut Cursor<'a>) -> ParseResult<()> {
        Self::decode(c).map(|_| ())
    }
}

/// A contract instance carries an executable (Wasm hash or built-in token
/// marker) and a key/value storage map; the core does not display either,
/// so this only validates structure.
fn skip_contract_instance(c: &mut Cursor<'_>) -> ParseResult<()> {
    let offset = c.tell();
    match c.u32_be()? {
        0 => {} // CONTRACT_EXECUTABLE_WASM
        1 => {} // CONTRACT_EXECUTABLE_STELLAR_ASSET
        _ => return Err(ParseError::malformed(offset, "unsupported contract executable type")),
    }
    if c.u32_be()? == 0 {
        c.fixed_bytes(32)?;
    }
    let present = c.bool()?;
    if present {
        let count = c.u32_be()?;
        for _ in 0..count {
            ScVal::skip(c)?;
            ScVal::skip(c)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_leaf_roundtrip_shape() {
        let mut buf = SCV_U32.to_be_bytes().to_vec();
        buf.extend_from_slice(&7u32.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert_eq!(ScVal::decode(&mut c).unwrap(), ScVal::U32(7));
    }

    #[test]
    fn vec_of_three_u32_reports_count_and_consumes_all() {
        let mut buf = SCV_VEC.to_be_bytes().to_vec();
        buf.extend_from_slice(&1u32.to_be_bytes()); // present
        buf.extend_from_slice(&3u32.to_be_bytes());
        for i in 0..3u32 {
            buf.extend_from_slice(&SCV_U32.to_be_bytes());
            buf.extend_from_slice(&i.to_be_bytes());
        }
        let mut c = Cursor::new(&buf);
        assert_eq!(ScVal::decode(&mut c).unwrap(), ScVal::Vec { count: 3 });
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn symbol_over_cap_rejected() {
        let mut buf = SCV_SYMBOL.to_be_bytes().to_vec();
        buf.extend_from_slice(&(SCSYMBOL_MAX_LEN as u32 + 1).to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(ScVal::decode(&mut c).is_err());
    }
}
