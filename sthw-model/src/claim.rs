use crate::account::AccountId;
use sthw_codec::{BoundedVec, Cursor, ParseError, ParseResult, PrimitiveRead};

pub const CLAIMANTS_MAX_LEN: usize = 10;

/// A claimant on a claimable balance.
///
/// The claim predicate tree is structurally validated (`skip_predicate`)
/// but never retained: it is unbounded and not safely displayable in a
/// fixed-size value buffer, so the formatter shows a fixed
/// "[NOT SUPPORTED]" placeholder for it instead (see `sthw-format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claimant {
    pub destination: AccountId,
}

const CLAIMANT_TYPE_V0: u32 = 0;

impl Claimant {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        if c.u32_be()? != CLAIMANT_TYPE_V0 {
            return Err(ParseError::malformed(offset, "unsupported claimant type"));
        }
        let destination = AccountId::decode(c)?;
        skip_predicate(c)?;
        Ok(Claimant { destination })
    }
}

const CLAIM_PREDICATE_UNCONDITIONAL: u32 = 0;
const CLAIM_PREDICATE_AND: u32 = 1;
const CLAIM_PREDICATE_OR: u32 = 2;
const CLAIM_PREDICATE_NOT: u32 = 3;
const CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME: u32 = 4;
const CLAIM_PREDICATE_BEFORE_RELATIVE_TIME: u32 = 5;

/// Recursively walk a claim predicate without retaining its content.
fn skip_predicate(c: &mut Cursor<'_>) -> ParseResult<()> {
    let offset = c.tell();
    match c.u32_be()? {
        CLAIM_PREDICATE_UNCONDITIONAL => Ok(()),
        CLAIM_PREDICATE_AND | CLAIM_PREDICATE_OR => {
            let count = c.u32_be()? as usize;
            if count != 2 {
                return Err(ParseError::malformed(offset, "and/or predicate must have 2 arms"));
            }
            skip_predicate(c)?;
            skip_predicate(c)
        }
        CLAIM_PREDICATE_NOT => {
            // XDR optional wrapper: only recurse when the inner predicate
            // is present; an absent inner value is structurally valid.
            if c.bool()? {
                skip_predicate(c)?;
            }
            Ok(())
        }
        CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME | CLAIM_PREDICATE_BEFORE_RELATIVE_TIME => {
            c.i64_be()?;
            Ok(())
        }
        _ => Err(ParseError::malformed(offset, "unsupported claim predicate type")),
    }
}

/// A `ClaimableBalanceId`: presently only the hash-backed variant (type 0)
/// is issued by the network, printed as uppercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimableBalanceId(pub [u8; 32]);

impl ClaimableBalanceId {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        if c.u32_be()? != 0 {
            return Err(ParseError::malformed(offset, "unsupported claimable balance id type"));
        }
        Ok(ClaimableBalanceId(c.fixed_bytes(32)?.try_into().unwrap()))
    }
}

pub fn decode_claimants(c: &mut Cursor<'_>) -> ParseResult<BoundedVec<Claimant, CLAIMANTS_MAX_LEN>> {
    let offset = c.tell();
    let count = c.u32_be()? as usize;
    if count > CLAIMANTS_MAX_LEN {
        return Err(ParseError::malformed(offset, "too many claimants"));
    }
    let mut claimants = BoundedVec::new();
    for _ in 0..count {
        claimants
            .push(Claimant::decode(c)?)
            .map_err(|_| ParseError::malformed(offset, "too many claimants"))?;
    }
    Ok(claimants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_bytes() -> Vec<u8> {
        let mut v = 0u32.to_be_bytes().to_vec();
        v.extend_from_slice(&[1u8; 32]);
        v
    }

    #[test]
    fn claimant_with_unconditional_predicate() {
        let mut buf = CLAIMANT_TYPE_V0.to_be_bytes().to_vec();
        buf.extend_from_slice(&account_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_UNCONDITIONAL.to_be_bytes());
        let mut c = Cursor::new(&buf);
        let claimant = Claimant::decode(&mut c).unwrap();
        assert_eq!(claimant.destination, AccountId([1u8; 32]));
    }

    #[test]
    fn claimant_with_and_predicate_of_two_absolute_times() {
        let mut buf = CLAIMANT_TYPE_V0.to_be_bytes().to_vec();
        buf.extend_from_slice(&account_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_AND.to_be_bytes());
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME.to_be_bytes());
        buf.extend_from_slice(&100i64.to_be_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME.to_be_bytes());
        buf.extend_from_slice(&200i64.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Claimant::decode(&mut c).is_ok());
    }

    #[test]
    fn claimant_with_not_predicate_and_absent_inner() {
        let mut buf = CLAIMANT_TYPE_V0.to_be_bytes().to_vec();
        buf.extend_from_slice(&account_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_NOT.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // inner predicate absent
        let mut c = Cursor::new(&buf);
        assert!(Claimant::decode(&mut c).is_ok());
    }

    #[test]
    fn claimant_with_not_predicate_and_present_inner() {
        let mut buf = CLAIMANT_TYPE_V0.to_be_bytes().to_vec();
        buf.extend_from_slice(&account_bytes());
        buf.extend_from_slice(&CLAIM_PREDICATE_NOT.to_be_bytes());
        buf.extend_from_slice(&1u32.to_be_bytes()); // inner predicate present
        buf.extend_from_slice(&CLAIM_PREDICATE_UNCONDITIONAL.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Claimant::decode(&mut c).is_ok());
    }

    #[test]
    fn too_many_claimants_rejected() {
        let mut buf = (CLAIMANTS_MAX_LEN as u32 + 1).to_be_bytes().to_vec();
        for _ in 0..CLAIMANTS_MAX_LEN + 1 {
            buf.extend_from_slice(&CLAIMANT_TYPE_V0.to_be_bytes());
            buf.extend_from_slice(&account_bytes());
            buf.extend_from_slice(&CLAIM_PREDICATE_UNCONDITIONAL.to_be_bytes());
        }
        let mut c = Cursor::new(&buf);
        assert!(decode_claimants(&mut c).is_err());
    }
}
