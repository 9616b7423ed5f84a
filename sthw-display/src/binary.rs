use std::fmt;

/// Universal Invariant 7: arbitrary binary (manage-data values, Soroban
/// bytes) is only ever rendered as printable ASCII directly; anything
/// else goes through [`format_hex_truncated`].
pub fn is_printable_binary(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| (0x20..=0x7e).contains(&b))
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub fn format_hex(bytes: &[u8], out: &mut impl fmt::Write) -> fmt::Result {
    for &b in bytes {
        out.write_char(HEX_DIGITS[(b >> 4) as usize] as char)?;
        out.write_char(HEX_DIGITS[(b & 0xF) as usize] as char)?;
    }
    Ok(())
}

/// Uppercase hex, abbreviated to `max_display_bytes` worth of hex digits
/// with `..` in the middle when `bytes` is longer.
pub fn format_hex_truncated(bytes: &[u8], max_display_bytes: usize, out: &mut impl fmt::Write) -> fmt::Result {
    if bytes.len() <= max_display_bytes {
        return format_hex(bytes, out);
    }
    let head = max_display_bytes / 2;
    let tail = max_display_bytes - head;
    format_hex(&bytes[..head], out)?;
    out.write_str("..")?;
    format_hex(&bytes[bytes.len() - tail..], out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_str::FixedStr;

    #[test]
    fn printable_ascii_is_printable() {
        assert!(is_printable_binary(b"hello world"));
    }

    #[test]
    fn control_bytes_are_not_printable() {
        assert!(!is_printable_binary(&[0x01, 0x02]));
    }

    #[test]
    fn empty_is_not_printable() {
        assert!(!is_printable_binary(&[]));
    }

    #[test]
    fn short_hex_is_not_truncated() {
        let mut out: FixedStr<16> = FixedStr::new();
        format_hex_truncated(&[0xDE, 0xAD], 8, &mut out).unwrap();
        assert_eq!(out.as_str(), "DEAD");
    }

    #[test]
    fn long_hex_is_truncated_with_ellipsis() {
        let bytes = [0xAAu8; 32];
        let mut out: FixedStr<32> = FixedStr::new();
        format_hex_truncated(&bytes, 8, &mut out).unwrap();
        assert_eq!(out.as_str(), "AAAAAAAA..AAAAAAAA");
    }
}
