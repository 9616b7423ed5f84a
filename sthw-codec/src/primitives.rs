use crate::cursor::Cursor;
use crate::error::{ParseError, ParseResult};

/// Decode the fixed-width, big-endian, optional and length-prefixed
/// primitives every structural decoder is built from.
///
/// These mirror the wire rules of the original C parser one-for-one:
/// integers are always big-endian, bools are a `u32` restricted to {0, 1},
/// an "optional" is a bool-prefixed value, and a byte string is a `u32`
/// length followed by the bytes padded with zeroes to a 4-byte boundary.
pub trait PrimitiveRead<'a> {
    fn u32_be(&mut self) -> ParseResult<u32>;
    fn i32_be(&mut self) -> ParseResult<i32>;
    fn u64_be(&mut self) -> ParseResult<u64>;
    fn i64_be(&mut self) -> ParseResult<i64>;
    fn bool(&mut self) -> ParseResult<bool>;
    fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<Option<T>>;
    fn bytes_padded(&mut self, max_len: usize) -> ParseResult<&'a [u8]>;
    fn fixed_bytes(&mut self, n: usize) -> ParseResult<&'a [u8]>;
}

impl<'a> PrimitiveRead<'a> for Cursor<'a> {
    fn u32_be(&mut self) -> ParseResult<u32> {
        let b = self.read_exact(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32_be(&mut self) -> ParseResult<i32> {
        Ok(self.u32_be()? as i32)
    }

    fn u64_be(&mut self) -> ParseResult<u64> {
        let b = self.read_exact(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn i64_be(&mut self) -> ParseResult<i64> {
        Ok(self.u64_be()? as i64)
    }

    fn bool(&mut self) -> ParseResult<bool> {
        let offset = self.tell();
        match self.u32_be()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ParseError::malformed(offset, "bool outside {0, 1}")),
        }
    }

    fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<Option<T>> {
        if self.bool()? {
            Ok(Some(f(self)?))
        } else {
            Ok(None)
        }
    }

    fn bytes_padded(&mut self, max_len: usize) -> ParseResult<&'a [u8]> {
        let offset = self.tell();
        let len = self.u32_be()? as usize;
        if len > max_len {
            return Err(ParseError::malformed(offset, "length exceeds domain cap"));
        }
        let data = self.read_exact(len)?;
        let pad = pad_len(len);
        if pad > 0 {
            let padding = self.read_exact(pad)?;
            if padding.iter().any(|&b| b != 0) {
                return Err(ParseError::malformed(self.tell() - pad, "non-zero padding"));
            }
        }
        Ok(data)
    }

    fn fixed_bytes(&mut self, n: usize) -> ParseResult<&'a [u8]> {
        self.read_exact(n)
    }
}

/// Number of zero-padding bytes required to round `len` up to a multiple of 4.
fn pad_len(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn u32_be_roundtrip() {
        let buf = 0xDEADBEEFu32.to_be_bytes();
        let mut c = Cursor::new(&buf);
        assert_eq!(c.u32_be().unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn i64_be_negative() {
        let buf = (-5i64).to_be_bytes();
        let mut c = Cursor::new(&buf);
        assert_eq!(c.i64_be().unwrap(), -5);
    }

    #[test_case(0 => true)]
    #[test_case(1 => true)]
    #[test_case(2 => false)]
    fn bool_restricted_to_zero_or_one(tag: u32) -> bool {
        let buf = tag.to_be_bytes();
        let mut c = Cursor::new(&buf);
        c.bool().is_ok()
    }

    #[test]
    fn optional_absent_does_not_call_closure() {
        let buf = 0u32.to_be_bytes();
        let mut c = Cursor::new(&buf);
        let mut called = false;
        let v = c
            .optional(|_| {
                called = true;
                Ok(7u32)
            })
            .unwrap();
        assert_eq!(v, None);
        assert!(!called);
    }

    #[test]
    fn bytes_padded_rejects_over_cap() {
        let mut raw = 5u32.to_be_bytes().to_vec();
        raw.extend_from_slice(&[1, 2, 3, 4, 0, 0, 0]);
        let mut c = Cursor::new(&raw);
        assert!(c.bytes_padded(4).is_err());
    }

    #[test]
    fn bytes_padded_rejects_nonzero_padding() {
        let mut raw = 3u32.to_be_bytes().to_vec();
        raw.extend_from_slice(&[1, 2, 3, 9]);
        let mut c = Cursor::new(&raw);
        assert!(c.bytes_padded(16).is_err());
    }

    #[test]
    fn bytes_padded_accepts_exact_multiple_of_four() {
        let mut raw = 4u32.to_be_bytes().to_vec();
        raw.extend_from_slice(&[1, 2, 3, 4]);
        let mut c = Cursor::new(&raw);
        assert_eq!(c.bytes_padded(16).unwrap(), &[1, 2, 3, 4]);
    }
}
