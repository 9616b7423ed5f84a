use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

pub const MEMO_TEXT_MAX_LEN: usize = 28;

/// A transaction's memo. `Text` borrows its bytes directly from the input;
/// whether they're printable is a display-layer concern (see
/// `sthw-display`), not a parse-time one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Memo<'a> {
    None,
    Text(&'a [u8]),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

const MEMO_NONE: u32 = 0;
const MEMO_TEXT: u32 = 1;
const MEMO_ID: u32 = 2;
const MEMO_HASH: u32 = 3;
const MEMO_RETURN: u32 = 4;

impl<'a> Memo<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            MEMO_NONE => Ok(Memo::None),
            MEMO_TEXT => Ok(Memo::Text(c.bytes_padded(MEMO_TEXT_MAX_LEN)?)),
            MEMO_ID => Ok(Memo::Id(c.u64_be()?)),
            MEMO_HASH => Ok(Memo::Hash(c.fixed_bytes(32)?.try_into().unwrap())),
            MEMO_RETURN => Ok(Memo::Return(c.fixed_bytes(32)?.try_into().unwrap())),
            _ => Err(ParseError::malformed(offset, "unsupported memo type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_text_over_cap_rejected() {
        let mut buf = MEMO_TEXT.to_be_bytes().to_vec();
        buf.extend_from_slice(&(MEMO_TEXT_MAX_LEN as u32 + 1).to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Memo::decode(&mut c).is_err());
    }

    #[test]
    fn memo_none_decodes() {
        let buf = MEMO_NONE.to_be_bytes();
        let mut c = Cursor::new(&buf);
        assert_eq!(Memo::decode(&mut c).unwrap(), Memo::None);
    }
}
