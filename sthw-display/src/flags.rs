use std::fmt;

pub struct FlagBit {
    pub bit: u32,
    pub name: &'static str,
}

pub const ACCOUNT_FLAGS: &[FlagBit] = &[
    FlagBit { bit: 1, name: "AUTH_REQUIRED" },
    FlagBit { bit: 2, name: "AUTH_REVOCABLE" },
    FlagBit { bit: 4, name: "AUTH_IMMUTABLE" },
    FlagBit { bit: 8, name: "AUTH_CLAWBACK_ENABLED" },
];

pub const TRUST_LINE_FLAGS: &[FlagBit] = &[
    FlagBit { bit: 1, name: "AUTHORIZED" },
    FlagBit { bit: 2, name: "AUTHORIZED_TO_MAINTAIN_LIABILITIES" },
    FlagBit { bit: 4, name: "CLAWBACK_ENABLED" },
];

/// Write the names of every set bit in `mask`, comma-separated in table
/// order, or `"none"` if no bit in the table is set.
pub fn format_flags(mask: u32, table: &[FlagBit], out: &mut impl fmt::Write) -> fmt::Result {
    if table.iter().all(|f| mask & f.bit == 0) {
        return out.write_str("none");
    }
    let mut first = true;
    for flag in table {
        if mask & flag.bit != 0 {
            if !first {
                out.write_str(", ")?;
            }
            out.write_str(flag.name)?;
            first = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_str::FixedStr;

    #[test]
    fn zero_mask_prints_none() {
        let mut out: FixedStr<48> = FixedStr::new();
        format_flags(0, ACCOUNT_FLAGS, &mut out).unwrap();
        assert_eq!(out.as_str(), "none");
    }

    #[test]
    fn combined_account_flags_join_with_commas() {
        let mut out: FixedStr<64> = FixedStr::new();
        format_flags(1 | 4, ACCOUNT_FLAGS, &mut out).unwrap();
        assert_eq!(out.as_str(), "AUTH_REQUIRED, AUTH_IMMUTABLE");
    }

    #[test]
    fn trust_line_flags_use_their_own_table() {
        let mut out: FixedStr<48> = FixedStr::new();
        format_flags(2, TRUST_LINE_FLAGS, &mut out).unwrap();
        assert_eq!(out.as_str(), "AUTHORIZED_TO_MAINTAIN_LIABILITIES");
    }
}
