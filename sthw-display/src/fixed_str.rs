use std::fmt;

/// A stack-allocated, fixed-capacity UTF-8 string buffer.
///
/// Every display primitive writes into one of these rather than returning
/// an owned `String`: captions are bounded to [`CAPTION_MAX_LEN`] bytes and
/// values to [`VALUE_MAX_LEN`] bytes, and a primitive that would overflow
/// its buffer fails cleanly instead of growing one.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
    len: usize,
}

/// Writing would exceed the buffer's fixed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

impl<const N: usize> FixedStr<N> {
    pub fn new() -> Self {
        FixedStr { buf: [0; N], len: 0 }
    }

    pub fn as_str(&self) -> &str {
        // Safety/invariant: only ever written to via push_str/write_fmt,
        // both of which reject non-UTF-8-boundary-violating input.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), Overflow> {
        let bytes = s.as_bytes();
        if self.len + bytes.len() > N {
            return Err(Overflow);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    pub fn push(&mut self, c: char) -> Result<(), Overflow> {
        let mut tmp = [0u8; 4];
        self.push_str(c.encode_utf8(&mut tmp))
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

/// Caption buffers must fit in 21 bytes including the terminator.
pub const CAPTION_MAX_LEN: usize = 20;
/// Value buffers must fit in 105 bytes including the terminator.
pub const VALUE_MAX_LEN: usize = 104;

pub type Caption = FixedStr<CAPTION_MAX_LEN>;
pub type Value = FixedStr<VALUE_MAX_LEN>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn push_str_rejects_overflow() {
        let mut s: FixedStr<4> = FixedStr::new();
        assert!(s.push_str("abcd").is_ok());
        assert!(s.push_str("e").is_err());
        assert_eq!(s.as_str(), "abcd");
    }

    #[test]
    fn write_fmt_composes() {
        let mut s: FixedStr<16> = FixedStr::new();
        write!(s, "{} XLM", 10).unwrap();
        assert_eq!(s.as_str(), "10 XLM");
    }

    #[test]
    fn caption_and_value_caps_match_spec() {
        assert_eq!(CAPTION_MAX_LEN, 20);
        assert_eq!(VALUE_MAX_LEN, 104);
    }
}
