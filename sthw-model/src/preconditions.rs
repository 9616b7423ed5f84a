use crate::account::SignerKey;
use sthw_codec::{BoundedVec, Cursor, ParseError, ParseResult, PrimitiveRead};

pub const EXTRA_SIGNERS_MAX_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        Ok(TimeBounds {
            min_time: c.u64_be()?,
            max_time: c.u64_be()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

impl LedgerBounds {
    fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        Ok(LedgerBounds {
            min_ledger: c.u32_be()?,
            max_ledger: c.u32_be()?,
        })
    }
}

/// Wire-level discriminants for the preconditions union. Normalized into
/// `PreconditionsView` below: on the legacy (`NONE` / `TIME`) forms, every
/// `V2`-only field is simply absent.
pub struct Preconditions;

impl Preconditions {
    pub const NONE: u32 = 0;
    pub const TIME: u32 = 1;
    pub const V2: u32 = 2;
}

/// `SignerKey` decoding needs the input lifetime `'a`, but `Preconditions`
/// is parameterized by it too: this wrapper decodes into a
/// `BoundedVec<SignerKey<'a>, N>` and the caller re-borrows it alongside
/// the rest of the transaction view.
pub fn decode_preconditions<'a>(c: &mut Cursor<'a>) -> ParseResult<PreconditionsView<'a>> {
    let offset = c.tell();
    match c.u32_be()? {
        Preconditions::NONE => Ok(PreconditionsView::empty()),
        Preconditions::TIME => {
            let time_bounds = Some(TimeBounds::decode(c)?);
            Ok(PreconditionsView {
                time_bounds,
                ..PreconditionsView::empty()
            })
        }
        Preconditions::V2 => {
            let time_bounds = c.optional(TimeBounds::decode)?;
            let ledger_bounds = c.optional(LedgerBounds::decode)?;
            let min_seq_num = c.optional(|c| c.i64_be())?;
            let min_seq_age = c.u64_be()?;
            let min_seq_ledger_gap = c.u32_be()?;
            let count = c.u32_be()? as usize;
            if count > EXTRA_SIGNERS_MAX_LEN {
                return Err(ParseError::malformed(offset, "too many extra signers"));
            }
            let mut extra_signers = BoundedVec::new();
            for _ in 0..count {
                extra_signers
                    .push(SignerKey::decode(c)?)
                    .map_err(|_| ParseError::malformed(offset, "too many extra signers"))?;
            }
            Ok(PreconditionsView {
                time_bounds,
                ledger_bounds,
                min_seq_num,
                min_seq_age,
                min_seq_ledger_gap,
                extra_signers,
            })
        }
        _ => Err(ParseError::malformed(offset, "unsupported preconditions type")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreconditionsView<'a> {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<i64>,
    pub min_seq_age: u64,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: BoundedVec<SignerKey<'a>, EXTRA_SIGNERS_MAX_LEN>,
}

impl<'a> PreconditionsView<'a> {
    pub fn empty() -> Self {
        PreconditionsView {
            time_bounds: None,
            ledger_bounds: None,
            min_seq_num: None,
            min_seq_age: 0,
            min_seq_ledger_gap: 0,
            extra_signers: BoundedVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_none_has_empty_v2_fields() {
        let buf = Preconditions::NONE.to_be_bytes();
        let mut c = Cursor::new(&buf);
        let p = decode_preconditions(&mut c).unwrap();
        assert_eq!(p.min_seq_age, 0);
        assert!(p.extra_signers.is_empty());
    }

    #[test]
    fn too_many_extra_signers_rejected() {
        let mut buf = Preconditions::V2.to_be_bytes().to_vec();
        buf.extend_from_slice(&0u32.to_be_bytes()); // no time bounds
        buf.extend_from_slice(&0u32.to_be_bytes()); // no ledger bounds
        buf.extend_from_slice(&0u32.to_be_bytes()); // no min seq num
        buf.extend_from_slice(&0u64.to_be_bytes()); // min seq age
        buf.extend_from_slice(&0u32.to_be_bytes()); // min seq ledger gap
        buf.extend_from_slice(&3u32.to_be_bytes()); // 3 extra signers > cap of 2
        let mut c = Cursor::new(&buf);
        assert!(decode_preconditions(&mut c).is_err());
    }
}
