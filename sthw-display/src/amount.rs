use crate::fixed_str::FixedStr;
use crate::strkey;
use std::fmt;

/// Stellar amounts are fixed-point integers scaled by `10^7` ("stroops").
pub const AMOUNT_SCALE: u64 = 10_000_000;

/// The asset label `format_amount` appends after the digits, mirroring
/// the `asset` display primitive: `XLM` for native on a recognized
/// network, `native` for native on an unrecognized one, `CODE@GXX..XXX`
/// for a credit asset, and no label at all where the wire format itself
/// carries no asset (a liquidity pool's own reserve amounts).
pub enum AssetLabel<'a> {
    Xlm,
    NativeUnknownNetwork,
    Credit { code: &'a [u8], issuer: &'a [u8; 32] },
    None,
}

/// Format a stroop amount as a grouped decimal -- `1,234,567.5000000`
/// trimmed to `1,234,567.5`, or `1,234,567` when the fractional part is
/// zero -- suffixed with its asset label, matching the original
/// `print_amount(amount, asset, network, …)`.
pub fn format_amount(raw: i64, label: AssetLabel<'_>, out: &mut impl fmt::Write) -> fmt::Result {
    format_amount_digits(raw, out)?;
    write_asset_label(label, out)
}

fn format_amount_digits(raw: i64, out: &mut impl fmt::Write) -> fmt::Result {
    let negative = raw < 0;
    let magnitude = raw.unsigned_abs();
    let whole = magnitude / AMOUNT_SCALE;
    let frac = magnitude % AMOUNT_SCALE;
    if negative {
        out.write_str("-")?;
    }
    write_grouped(whole, out)?;
    if frac != 0 {
        let mut digits = [0u8; 7];
        let mut v = frac;
        for slot in digits.iter_mut().rev() {
            *slot = b'0' + (v % 10) as u8;
            v /= 10;
        }
        let mut end = digits.len();
        while end > 0 && digits[end - 1] == b'0' {
            end -= 1;
        }
        out.write_char('.')?;
        for &d in &digits[..end] {
            out.write_char(d as char)?;
        }
    }
    Ok(())
}

fn write_asset_label(label: AssetLabel<'_>, out: &mut impl fmt::Write) -> fmt::Result {
    match label {
        AssetLabel::Xlm => out.write_str(" XLM"),
        AssetLabel::NativeUnknownNetwork => out.write_str(" native"),
        AssetLabel::Credit { code, issuer } => {
            out.write_char(' ')?;
            format_asset_code(code, out)?;
            out.write_char('@')?;
            let mut full: FixedStr<56> = FixedStr::new();
            strkey::encode_ed25519(issuer, &mut full)?;
            strkey::abbreviate(full.as_str(), 4, 4, out)
        }
        AssetLabel::None => Ok(()),
    }
}

fn write_grouped(mut v: u64, out: &mut impl fmt::Write) -> fmt::Result {
    let mut digits = [0u8; 20];
    let mut n = 0;
    if v == 0 {
        digits[0] = b'0';
        n = 1;
    } else {
        while v > 0 {
            digits[n] = b'0' + (v % 10) as u8;
            v /= 10;
            n += 1;
        }
    }
    for i in (0..n).rev() {
        out.write_char(digits[i] as char)?;
        if i > 0 && i % 3 == 0 {
            out.write_char(',')?;
        }
    }
    Ok(())
}

/// Format an arbitrary-precision token amount (as carried by a Soroban
/// `i128` argument) scaled by `decimals`, the same grouped/trimmed style
/// as [`format_amount`]. Native `i128` arithmetic is exact here: unlike
/// the 256-bit `ScVal` variants, a token amount's magnitude never
/// approaches `i128::MAX`, so no word-array long division is needed.
pub fn format_scaled_amount(raw: i128, decimals: u32, out: &mut impl fmt::Write) -> fmt::Result {
    const MAX_DECIMALS: u32 = 24;
    let decimals = decimals.min(MAX_DECIMALS);
    let negative = raw < 0;
    let magnitude = raw.unsigned_abs();
    let scale = 10u128.pow(decimals);
    let whole = magnitude / scale;
    let frac = magnitude % scale;
    if negative {
        out.write_str("-")?;
    }
    write_grouped_u128(whole, out)?;
    if frac != 0 {
        let mut digits = [0u8; MAX_DECIMALS as usize];
        let digits = &mut digits[..decimals as usize];
        let mut v = frac;
        for slot in digits.iter_mut().rev() {
            *slot = b'0' + (v % 10) as u8;
            v /= 10;
        }
        let mut end = digits.len();
        while end > 0 && digits[end - 1] == b'0' {
            end -= 1;
        }
        out.write_char('.')?;
        for &d in &digits[..end] {
            out.write_char(d as char)?;
        }
    }
    Ok(())
}

fn write_grouped_u128(mut v: u128, out: &mut impl fmt::Write) -> fmt::Result {
    let mut digits = [0u8; 40];
    let mut n = 0;
    if v == 0 {
        digits[0] = b'0';
        n = 1;
    } else {
        while v > 0 {
            digits[n] = b'0' + (v % 10) as u8;
            v /= 10;
            n += 1;
        }
    }
    for i in (0..n).rev() {
        out.write_char(digits[i] as char)?;
        if i > 0 && i % 3 == 0 {
            out.write_char(',')?;
        }
    }
    Ok(())
}

/// Trim the trailing zero-padding off a fixed-width asset code and write
/// the remaining characters. Operates on raw wire bytes so this crate
/// doesn't need to depend on `sthw-model`'s `AssetCode`.
pub fn format_asset_code(code: &[u8], out: &mut impl fmt::Write) -> fmt::Result {
    let end = code.iter().rposition(|&b| b != 0).map(|i| i + 1).unwrap_or(0);
    out.write_str(std::str::from_utf8(&code[..end]).unwrap_or("?"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_str::FixedStr;

    #[test]
    fn whole_amount_has_no_decimal_point() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(10_000_000, AssetLabel::Xlm, &mut out).unwrap();
        assert_eq!(out.as_str(), "10 XLM");
    }

    #[test]
    fn fractional_amount_trims_trailing_zeros() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(15_000_000, AssetLabel::Xlm, &mut out).unwrap();
        assert_eq!(out.as_str(), "1.5 XLM");
    }

    #[test]
    fn negative_amount_prints_sign_before_digits() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(-2_500_000, AssetLabel::Xlm, &mut out).unwrap();
        assert_eq!(out.as_str(), "-0.25 XLM");
    }

    #[test]
    fn large_whole_amount_is_comma_grouped() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(1_234_567_000_0000, AssetLabel::Xlm, &mut out).unwrap();
        assert_eq!(out.as_str(), "1,234,567,000 XLM");
    }

    #[test]
    fn native_amount_on_unknown_network_uses_generic_label() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(10_000_000, AssetLabel::NativeUnknownNetwork, &mut out).unwrap();
        assert_eq!(out.as_str(), "10 native");
    }

    #[test]
    fn amount_with_no_asset_context_has_no_label() {
        let mut out: FixedStr<32> = FixedStr::new();
        format_amount(10_000_000, AssetLabel::None, &mut out).unwrap();
        assert_eq!(out.as_str(), "10");
    }

    #[test]
    fn credit_amount_suffixes_code_and_abbreviated_issuer() {
        let mut out: FixedStr<80> = FixedStr::new();
        format_amount(10_000_000, AssetLabel::Credit { code: b"USDC", issuer: &[7u8; 32] }, &mut out).unwrap();
        assert!(out.as_str().starts_with("10 USDC@"));
        assert!(out.as_str().contains(".."));
    }

    #[test]
    fn asset_code_trims_trailing_zero_padding() {
        let mut out: FixedStr<16> = FixedStr::new();
        format_asset_code(b"USD\0", &mut out).unwrap();
        assert_eq!(out.as_str(), "USD");
    }

    #[test]
    fn scaled_amount_applies_seven_decimals() {
        let mut out: FixedStr<40> = FixedStr::new();
        format_scaled_amount(100_000_000, 7, &mut out).unwrap();
        assert_eq!(out.as_str(), "10");
    }

    #[test]
    fn scaled_amount_trims_and_groups() {
        let mut out: FixedStr<40> = FixedStr::new();
        format_scaled_amount(12_345_670_001, 7, &mut out).unwrap();
        assert_eq!(out.as_str(), "1,234.5670001");
    }

    #[test]
    fn scaled_amount_negative_has_sign() {
        let mut out: FixedStr<40> = FixedStr::new();
        format_scaled_amount(-50_000_000, 7, &mut out).unwrap();
        assert_eq!(out.as_str(), "-5");
    }
}
