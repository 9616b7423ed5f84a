use crate::account::AccountId;
use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

/// A credit asset's code: either 4 or 12 bytes, right-padded with zeroes
/// on the wire. Stored as the fixed-width wire bytes; trailing zero bytes
/// are trimmed by the display layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCode {
    AlphaNum4([u8; 4]),
    AlphaNum12([u8; 12]),
}

/// The asset that can appear on a payment, offer or balance line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Native,
    Credit { code: AssetCode, issuer: AccountId },
}

const ASSET_TYPE_NATIVE: u32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: u32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: u32 = 2;

impl Asset {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            ASSET_TYPE_NATIVE => Ok(Asset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => {
                let code = c.fixed_bytes(4)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(Asset::Credit {
                    code: AssetCode::AlphaNum4(code),
                    issuer,
                })
            }
            ASSET_TYPE_CREDIT_ALPHANUM12 => {
                let code = c.fixed_bytes(12)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(Asset::Credit {
                    code: AssetCode::AlphaNum12(code),
                    issuer,
                })
            }
            _ => Err(ParseError::malformed(offset, "unsupported asset type")),
        }
    }
}

/// Basis-point fee and the two pooled assets of a constant-product pool,
/// as supplied when creating a trust line to a liquidity pool share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityPoolParameters {
    pub asset_a: Asset,
    pub asset_b: Asset,
    pub fee_bp: i32,
}

const LIQUIDITY_POOL_CONSTANT_PRODUCT: u32 = 0;

impl LiquidityPoolParameters {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        if c.u32_be()? != LIQUIDITY_POOL_CONSTANT_PRODUCT {
            return Err(ParseError::malformed(offset, "unsupported liquidity pool type"));
        }
        let asset_a = Asset::decode(c)?;
        let asset_b = Asset::decode(c)?;
        let fee_bp = c.i32_be()?;
        Ok(LiquidityPoolParameters {
            asset_a,
            asset_b,
            fee_bp,
        })
    }
}

/// The asset argument of `ChangeTrustOp`: a plain asset, or a liquidity
/// pool share described by its full parameters (the pool id is derived
/// from them, not carried on the wire here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTrustAsset {
    Native,
    Credit { code: AssetCode, issuer: AccountId },
    LiquidityPoolShare(LiquidityPoolParameters),
}

const ASSET_TYPE_POOL_SHARE: u32 = 3;

impl ChangeTrustAsset {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            ASSET_TYPE_NATIVE => Ok(ChangeTrustAsset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => {
                let code = c.fixed_bytes(4)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(ChangeTrustAsset::Credit {
                    code: AssetCode::AlphaNum4(code),
                    issuer,
                })
            }
            ASSET_TYPE_CREDIT_ALPHANUM12 => {
                let code = c.fixed_bytes(12)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(ChangeTrustAsset::Credit {
                    code: AssetCode::AlphaNum12(code),
                    issuer,
                })
            }
            ASSET_TYPE_POOL_SHARE => {
                Ok(ChangeTrustAsset::LiquidityPoolShare(LiquidityPoolParameters::decode(c)?))
            }
            _ => Err(ParseError::malformed(offset, "unsupported change-trust asset type")),
        }
    }
}

/// The asset argument of operations that reference an existing trust line
/// by its pool id rather than its full parameters (allow-trust, clawback,
/// set-trust-line-flags, revoke-sponsorship).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLineAsset {
    Native,
    Credit { code: AssetCode, issuer: AccountId },
    LiquidityPoolId([u8; 32]),
}

impl TrustLineAsset {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            ASSET_TYPE_NATIVE => Ok(TrustLineAsset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => {
                let code = c.fixed_bytes(4)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(TrustLineAsset::Credit {
                    code: AssetCode::AlphaNum4(code),
                    issuer,
                })
            }
            ASSET_TYPE_CREDIT_ALPHANUM12 => {
                let code = c.fixed_bytes(12)?.try_into().unwrap();
                let issuer = AccountId::decode(c)?;
                Ok(TrustLineAsset::Credit {
                    code: AssetCode::AlphaNum12(code),
                    issuer,
                })
            }
            ASSET_TYPE_POOL_SHARE => {
                Ok(TrustLineAsset::LiquidityPoolId(c.fixed_bytes(32)?.try_into().unwrap()))
            }
            _ => Err(ParseError::malformed(offset, "unsupported trust line asset type")),
        }
    }
}

/// `n/d` price ratio, as found in offers and liquidity pool operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let n = c.i32_be()?;
        let offset = c.tell();
        let d = c.i32_be()?;
        if d == 0 {
            return Err(ParseError::malformed(offset, "zero price denominator"));
        }
        Ok(Price { n, d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_asset_decodes() {
        let buf = 0u32.to_be_bytes();
        let mut c = Cursor::new(&buf);
        assert_eq!(Asset::decode(&mut c).unwrap(), Asset::Native);
    }

    #[test]
    fn price_rejects_zero_denominator() {
        let mut buf = 5i32.to_be_bytes().to_vec();
        buf.extend_from_slice(&0i32.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Price::decode(&mut c).is_err());
    }
}
