use crate::account::AccountId;
use crate::asset::TrustLineAsset;
use crate::claim::ClaimableBalanceId;
use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

pub const DATA_NAME_MAX_LEN: usize = 64;

/// The ledger-entry key a `RevokeSponsorship` operation targets.
///
/// Only the first six `LedgerEntryType` wire tags are structurally
/// supported, matching the original firmware's ledger-key struct: the
/// Soroban-era entry types (contract data, contract code, config setting,
/// TTL) have no arm here and are rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKey<'a> {
    Account { account_id: AccountId },
    TrustLine { account_id: AccountId, asset: TrustLineAsset },
    Offer { seller_id: AccountId, offer_id: i64 },
    Data { account_id: AccountId, data_name: &'a [u8] },
    ClaimableBalance { balance_id: ClaimableBalanceId },
    LiquidityPool { liquidity_pool_id: [u8; 32] },
}

const LEDGER_ENTRY_ACCOUNT: u32 = 0;
const LEDGER_ENTRY_TRUSTLINE: u32 = 1;
const LEDGER_ENTRY_OFFER: u32 = 2;
const LEDGER_ENTRY_DATA: u32 = 3;
const LEDGER_ENTRY_CLAIMABLE_BALANCE: u32 = 4;
const LEDGER_ENTRY_LIQUIDITY_POOL: u32 = 5;

impl<'a> LedgerKey<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            LEDGER_ENTRY_ACCOUNT => Ok(LedgerKey::Account {
                account_id: AccountId::decode(c)?,
            }),
            LEDGER_ENTRY_TRUSTLINE => {
                let account_id = AccountId::decode(c)?;
                let asset = TrustLineAsset::decode(c)?;
                Ok(LedgerKey::TrustLine { account_id, asset })
            }
            LEDGER_ENTRY_OFFER => {
                let seller_id = AccountId::decode(c)?;
                let offer_id = c.i64_be()?;
                Ok(LedgerKey::Offer { seller_id, offer_id })
            }
            LEDGER_ENTRY_DATA => {
                let account_id = AccountId::decode(c)?;
                let data_name = c.bytes_padded(DATA_NAME_MAX_LEN)?;
                Ok(LedgerKey::Data { account_id, data_name })
            }
            LEDGER_ENTRY_CLAIMABLE_BALANCE => Ok(LedgerKey::ClaimableBalance {
                balance_id: ClaimableBalanceId::decode(c)?,
            }),
            LEDGER_ENTRY_LIQUIDITY_POOL => Ok(LedgerKey::LiquidityPool {
                liquidity_pool_id: c.fixed_bytes(32)?.try_into().unwrap(),
            }),
            _ => Err(ParseError::malformed(offset, "unsupported ledger entry type for revoke sponsorship")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_data_entry_type_rejected() {
        let buf = 6u32.to_be_bytes();
        let mut c = Cursor::new(&buf);
        assert!(LedgerKey::decode(&mut c).is_err());
    }

    #[test]
    fn account_entry_decodes() {
        let mut buf = LEDGER_ENTRY_ACCOUNT.to_be_bytes().to_vec();
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&[3u8; 32]);
        let mut c = Cursor::new(&buf);
        assert!(matches!(LedgerKey::decode(&mut c).unwrap(), LedgerKey::Account { .. }));
    }
}
