use crate::account::{AccountId, MuxedAccount, Signer, SignerKey};
use crate::asset::{Asset, AssetCode, ChangeTrustAsset, Price};
use crate::claim::{decode_claimants, Claimant, ClaimableBalanceId, CLAIMANTS_MAX_LEN};
use crate::invocation::{AuthorizedFunction, AuthorizedInvocation, SUB_INVOCATIONS_MAX_LEN};
use crate::ledger_key::{LedgerKey, DATA_NAME_MAX_LEN};
use crate::scval::ScVal;
use sthw_codec::{BoundedVec, Cursor, ParseError, ParseResult, PrimitiveRead};

pub const PATH_PAYMENT_MAX_LEN: usize = 5;
pub const HOME_DOMAIN_MAX_LEN: usize = 32;
pub const MANAGE_DATA_VALUE_MAX_LEN: usize = 64;
pub const AUTH_ENTRIES_MAX_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: BoundedVec<Asset, PATH_PAYMENT_MAX_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPaymentStrictSendOp {
    pub send_asset: Asset,
    pub send_amount: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_min: i64,
    pub path: BoundedVec<Asset, PATH_PAYMENT_MAX_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManageSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManageBuyOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub buy_amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePassiveSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOptionsOp<'a> {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<&'a [u8]>,
    pub signer: Option<Signer<'a>>,
}

impl<'a> SetOptionsOp<'a> {
    pub fn is_empty(&self) -> bool {
        self.inflation_dest.is_none()
            && self.clear_flags.is_none()
            && self.set_flags.is_none()
            && self.master_weight.is_none()
            && self.low_threshold.is_none()
            && self.med_threshold.is_none()
            && self.high_threshold.is_none()
            && self.home_domain.is_none()
            && self.signer.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset_code: AssetCode,
    pub authorize: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManageDataOp<'a> {
    pub data_name: &'a [u8],
    pub data_value: Option<&'a [u8]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateClaimableBalanceOp {
    pub asset: Asset,
    pub amount: i64,
    pub claimants: BoundedVec<Claimant, CLAIMANTS_MAX_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClawbackOp {
    pub asset: Asset,
    pub from: MuxedAccount,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTrustLineFlagsOp {
    pub trustor: AccountId,
    pub asset: Asset,
    pub clear_flags: u32,
    pub set_flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityPoolDepositOp {
    pub liquidity_pool_id: [u8; 32],
    pub max_amount_a: i64,
    pub max_amount_b: i64,
    pub min_price: Price,
    pub max_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityPoolWithdrawOp {
    pub liquidity_pool_id: [u8; 32],
    pub amount: i64,
    pub min_amount_a: i64,
    pub min_amount_b: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeSponsorshipOp<'a> {
    LedgerEntry(LedgerKey<'a>),
    Signer { account_id: AccountId, signer_key: SignerKey<'a> },
}

/// `InvokeHostFunctionOp` carries its own auth-entry list; only the entries
/// credentialed by the transaction's own source account require a
/// signature the device must show -- address-credentialed entries are
/// authorized by (and shown for) a different signer entirely, so they are
/// walked (to keep the cursor consistent) but not retained here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeHostFunctionOp<'a> {
    pub host_function: AuthorizedFunction<'a>,
    pub sub_invocation_positions: BoundedVec<usize, SUB_INVOCATIONS_MAX_LEN>,
}

const SOROBAN_CREDENTIALS_SOURCE_ACCOUNT: u32 = 0;
const SOROBAN_CREDENTIALS_ADDRESS: u32 = 1;

impl<'a> InvokeHostFunctionOp<'a> {
    fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let host_function = AuthorizedFunction::decode(c)?;
        let offset = c.tell();
        let count = c.u32_be()? as usize;
        if count > AUTH_ENTRIES_MAX_LEN {
            return Err(ParseError::malformed(offset, "too many auth entries"));
        }
        let mut sub_invocation_positions = BoundedVec::new();
        for _ in 0..count {
            let cred_offset = c.tell();
            match c.u32_be()? {
                SOROBAN_CREDENTIALS_SOURCE_ACCOUNT => {
                    let pos = c.tell();
                    sub_invocation_positions
                        .push(pos)
                        .map_err(|_| ParseError::malformed(offset, "too many sub-invocations"))?;
                    AuthorizedInvocation::decode(c)?;
                }
                SOROBAN_CREDENTIALS_ADDRESS => {
                    crate::scval::ScAddress::decode(c)?;
                    c.i64_be()?; // nonce
                    c.u32_be()?; // signature expiration ledger
                    ScVal::skip(c)?; // signature
                    AuthorizedInvocation::decode(c)?;
                }
                _ => return Err(ParseError::malformed(cred_offset, "unsupported soroban credentials type")),
            }
        }
        Ok(InvokeHostFunctionOp {
            host_function,
            sub_invocation_positions,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendFootprintTtlOp {
    pub extend_to: u32,
}

/// One of the 27 operation payloads. Variants carrying no fields of their
/// own (`Inflation`, `EndSponsoringFutureReserves`, `RestoreFootprint`) are
/// unit-like and exist purely to round out the union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationBody<'a> {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    CreatePassiveSellOffer(CreatePassiveSellOfferOp),
    SetOptions(SetOptionsOp<'a>),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData(ManageDataOp<'a>),
    BumpSequence { bump_to: i64 },
    ManageBuyOffer(ManageBuyOfferOp),
    PathPaymentStrictSend(PathPaymentStrictSendOp),
    CreateClaimableBalance(CreateClaimableBalanceOp),
    ClaimClaimableBalance { balance_id: ClaimableBalanceId },
    BeginSponsoringFutureReserves { sponsored_id: AccountId },
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorshipOp<'a>),
    Clawback(ClawbackOp),
    ClawbackClaimableBalance { balance_id: ClaimableBalanceId },
    SetTrustLineFlags(SetTrustLineFlagsOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
    InvokeHostFunction(InvokeHostFunctionOp<'a>),
    ExtendFootprintTtl(ExtendFootprintTtlOp),
    RestoreFootprint,
}

const OP_CREATE_ACCOUNT: u32 = 0;
const OP_PAYMENT: u32 = 1;
const OP_PATH_PAYMENT_STRICT_RECEIVE: u32 = 2;
const OP_MANAGE_SELL_OFFER: u32 = 3;
const OP_CREATE_PASSIVE_SELL_OFFER: u32 = 4;
const OP_SET_OPTIONS: u32 = 5;
const OP_CHANGE_TRUST: u32 = 6;
const OP_ALLOW_TRUST: u32 = 7;
const OP_ACCOUNT_MERGE: u32 = 8;
const OP_INFLATION: u32 = 9;
const OP_MANAGE_DATA: u32 = 10;
const OP_BUMP_SEQUENCE: u32 = 11;
const OP_MANAGE_BUY_OFFER: u32 = 12;
const OP_PATH_PAYMENT_STRICT_SEND: u32 = 13;
const OP_CREATE_CLAIMABLE_BALANCE: u32 = 14;
const OP_CLAIM_CLAIMABLE_BALANCE: u32 = 15;
const OP_BEGIN_SPONSORING_FUTURE_RESERVES: u32 = 16;
const OP_END_SPONSORING_FUTURE_RESERVES: u32 = 17;
const OP_REVOKE_SPONSORSHIP: u32 = 18;
const OP_CLAWBACK: u32 = 19;
const OP_CLAWBACK_CLAIMABLE_BALANCE: u32 = 20;
const OP_SET_TRUST_LINE_FLAGS: u32 = 21;
const OP_LIQUIDITY_POOL_DEPOSIT: u32 = 22;
const OP_LIQUIDITY_POOL_WITHDRAW: u32 = 23;
const OP_INVOKE_HOST_FUNCTION: u32 = 24;
const OP_EXTEND_FOOTPRINT_TTL: u32 = 25;
const OP_RESTORE_FOOTPRINT: u32 = 26;

const REVOKE_SPONSORSHIP_LEDGER_ENTRY: u32 = 0;
const REVOKE_SPONSORSHIP_SIGNER: u32 = 1;

fn decode_path(c: &mut Cursor<'_>) -> ParseResult<BoundedVec<Asset, PATH_PAYMENT_MAX_LEN>> {
    let offset = c.tell();
    let count = c.u32_be()? as usize;
    if count > PATH_PAYMENT_MAX_LEN {
        return Err(ParseError::malformed(offset, "payment path too long"));
    }
    let mut path = BoundedVec::new();
    for _ in 0..count {
        path.push(Asset::decode(c)?)
            .map_err(|_| ParseError::malformed(offset, "payment path too long"))?;
    }
    Ok(path)
}

impl<'a> OperationBody<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            OP_CREATE_ACCOUNT => Ok(OperationBody::CreateAccount(CreateAccountOp {
                destination: AccountId::decode(c)?,
                starting_balance: c.i64_be()?,
            })),
            OP_PAYMENT => Ok(OperationBody::Payment(PaymentOp {
                destination: MuxedAccount::decode(c)?,
                asset: Asset::decode(c)?,
                amount: c.i64_be()?,
            })),
            OP_PATH_PAYMENT_STRICT_RECEIVE => {
                let send_asset = Asset::decode(c)?;
                let send_max = c.i64_be()?;
                let destination = MuxedAccount::decode(c)?;
                let dest_asset = Asset::decode(c)?;
                let dest_amount = c.i64_be()?;
                let path = decode_path(c)?;
                Ok(OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
                    send_asset,
                    send_max,
                    destination,
                    dest_asset,
                    dest_amount,
                    path,
                }))
            }
            OP_MANAGE_SELL_OFFER => Ok(OperationBody::ManageSellOffer(ManageSellOfferOp {
                selling: Asset::decode(c)?,
                buying: Asset::decode(c)?,
                amount: c.i64_be()?,
                price: Price::decode(c)?,
                offer_id: c.i64_be()?,
            })),
            OP_CREATE_PASSIVE_SELL_OFFER => Ok(OperationBody::CreatePassiveSellOffer(CreatePassiveSellOfferOp {
                selling: Asset::decode(c)?,
                buying: Asset::decode(c)?,
                amount: c.i64_be()?,
                price: Price::decode(c)?,
            })),
            OP_SET_OPTIONS => {
                let inflation_dest = c.optional(AccountId::decode)?;
                let clear_flags = c.optional(|c| c.u32_be())?;
                let set_flags = c.optional(|c| c.u32_be())?;
                let master_weight = c.optional(|c| c.u32_be())?;
                let low_threshold = c.optional(|c| c.u32_be())?;
                let med_threshold = c.optional(|c| c.u32_be())?;
                let high_threshold = c.optional(|c| c.u32_be())?;
                let home_domain = c.optional(|c| c.bytes_padded(HOME_DOMAIN_MAX_LEN))?;
                let signer = c.optional(Signer::decode)?;
                Ok(OperationBody::SetOptions(SetOptionsOp {
                    inflation_dest,
                    clear_flags,
                    set_flags,
                    master_weight,
                    low_threshold,
                    med_threshold,
                    high_threshold,
                    home_domain,
                    signer,
                }))
            }
            OP_CHANGE_TRUST => {
                let line = ChangeTrustAsset::decode(c)?;
                let limit_offset = c.tell();
                let limit = c.i64_be()?;
                if limit < 0 {
                    return Err(ParseError::malformed(limit_offset, "trust-line limit must be non-negative"));
                }
                Ok(OperationBody::ChangeTrust(ChangeTrustOp { line, limit }))
            }
            OP_ALLOW_TRUST => {
                let trustor = AccountId::decode(c)?;
                let type_offset = c.tell();
                let asset_code = match c.u32_be()? {
                    1 => AssetCode::AlphaNum4(c.fixed_bytes(4)?.try_into().unwrap()),
                    2 => AssetCode::AlphaNum12(c.fixed_bytes(12)?.try_into().unwrap()),
                    _ => return Err(ParseError::malformed(type_offset, "unsupported asset type for allow trust")),
                };
                let authorize = c.u32_be()?;
                Ok(OperationBody::AllowTrust(AllowTrustOp {
                    trustor,
                    asset_code,
                    authorize,
                }))
            }
            OP_ACCOUNT_MERGE => Ok(OperationBody::AccountMerge(MuxedAccount::decode(c)?)),
            OP_INFLATION => Ok(OperationBody::Inflation),
            OP_MANAGE_DATA => {
                let data_name = c.bytes_padded(DATA_NAME_MAX_LEN)?;
                let data_value = c.optional(|c| c.bytes_padded(MANAGE_DATA_VALUE_MAX_LEN))?;
                Ok(OperationBody::ManageData(ManageDataOp { data_name, data_value }))
            }
            OP_BUMP_SEQUENCE => Ok(OperationBody::BumpSequence { bump_to: c.i64_be()? }),
            OP_MANAGE_BUY_OFFER => Ok(OperationBody::ManageBuyOffer(ManageBuyOfferOp {
                selling: Asset::decode(c)?,
                buying: Asset::decode(c)?,
                buy_amount: c.i64_be()?,
                price: Price::decode(c)?,
                offer_id: c.i64_be()?,
            })),
            OP_PATH_PAYMENT_STRICT_SEND => {
                let send_asset = Asset::decode(c)?;
                let send_amount = c.i64_be()?;
                let destination = MuxedAccount::decode(c)?;
                let dest_asset = Asset::decode(c)?;
                let dest_min = c.i64_be()?;
                let path = decode_path(c)?;
                Ok(OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
                    send_asset,
                    send_amount,
                    destination,
                    dest_asset,
                    dest_min,
                    path,
                }))
            }
            OP_CREATE_CLAIMABLE_BALANCE => {
                let asset = Asset::decode(c)?;
                let amount = c.i64_be()?;
                let claimants = decode_claimants(c)?;
                Ok(OperationBody::CreateClaimableBalance(CreateClaimableBalanceOp {
                    asset,
                    amount,
                    claimants,
                }))
            }
            OP_CLAIM_CLAIMABLE_BALANCE => Ok(OperationBody::ClaimClaimableBalance {
                balance_id: ClaimableBalanceId::decode(c)?,
            }),
            OP_BEGIN_SPONSORING_FUTURE_RESERVES => Ok(OperationBody::BeginSponsoringFutureReserves {
                sponsored_id: AccountId::decode(c)?,
            }),
            OP_END_SPONSORING_FUTURE_RESERVES => Ok(OperationBody::EndSponsoringFutureReserves),
            OP_REVOKE_SPONSORSHIP => {
                let tag_offset = c.tell();
                match c.u32_be()? {
                    REVOKE_SPONSORSHIP_LEDGER_ENTRY => {
                        Ok(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::LedgerEntry(LedgerKey::decode(c)?)))
                    }
                    REVOKE_SPONSORSHIP_SIGNER => {
                        let account_id = AccountId::decode(c)?;
                        let signer_key = SignerKey::decode(c)?;
                        Ok(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::Signer {
                            account_id,
                            signer_key,
                        }))
                    }
                    _ => Err(ParseError::malformed(tag_offset, "unsupported revoke sponsorship variant")),
                }
            }
            OP_CLAWBACK => Ok(OperationBody::Clawback(ClawbackOp {
                asset: Asset::decode(c)?,
                from: MuxedAccount::decode(c)?,
                amount: c.i64_be()?,
            })),
            OP_CLAWBACK_CLAIMABLE_BALANCE => Ok(OperationBody::ClawbackClaimableBalance {
                balance_id: ClaimableBalanceId::decode(c)?,
            }),
            OP_SET_TRUST_LINE_FLAGS => Ok(OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
                trustor: AccountId::decode(c)?,
                asset: Asset::decode(c)?,
                clear_flags: c.u32_be()?,
                set_flags: c.u32_be()?,
            })),
            OP_LIQUIDITY_POOL_DEPOSIT => Ok(OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
                liquidity_pool_id: c.fixed_bytes(32)?.try_into().unwrap(),
                max_amount_a: c.i64_be()?,
                max_amount_b: c.i64_be()?,
                min_price: Price::decode(c)?,
                max_price: Price::decode(c)?,
            })),
            OP_LIQUIDITY_POOL_WITHDRAW => Ok(OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
                liquidity_pool_id: c.fixed_bytes(32)?.try_into().unwrap(),
                amount: c.i64_be()?,
                min_amount_a: c.i64_be()?,
                min_amount_b: c.i64_be()?,
            })),
            OP_INVOKE_HOST_FUNCTION => Ok(OperationBody::InvokeHostFunction(InvokeHostFunctionOp::decode(c)?)),
            OP_EXTEND_FOOTPRINT_TTL => Ok(OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp {
                extend_to: c.u32_be()?,
            })),
            OP_RESTORE_FOOTPRINT => Ok(OperationBody::RestoreFootprint),
            _ => Err(ParseError::malformed(offset, "unsupported operation type")),
        }
    }
}

/// One operation: an optional per-operation source account, and its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation<'a> {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody<'a>,
}

impl<'a> Operation<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let source_account = c.optional(MuxedAccount::decode)?;
        let body = OperationBody::decode(c)?;
        Ok(Operation { source_account, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_account_decodes() {
        let mut buf = 0u32.to_be_bytes().to_vec(); // no source account
        buf.extend_from_slice(&OP_CREATE_ACCOUNT.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&[2u8; 32]);
        buf.extend_from_slice(&10_000_000i64.to_be_bytes());
        let mut c = Cursor::new(&buf);
        let op = Operation::decode(&mut c).unwrap();
        assert!(op.source_account.is_none());
        match op.body {
            OperationBody::CreateAccount(inner) => assert_eq!(inner.starting_balance, 10_000_000),
            _ => panic!("expected create account"),
        }
    }

    #[test]
    fn set_options_with_nothing_set_is_empty() {
        let mut buf = 0u32.to_be_bytes().to_vec(); // no source
        buf.extend_from_slice(&OP_SET_OPTIONS.to_be_bytes());
        for _ in 0..9 {
            buf.extend_from_slice(&0u32.to_be_bytes());
        }
        let mut c = Cursor::new(&buf);
        let op = Operation::decode(&mut c).unwrap();
        match op.body {
            OperationBody::SetOptions(opts) => assert!(opts.is_empty()),
            _ => panic!("expected set options"),
        }
    }

    #[test]
    fn payment_path_over_cap_rejected() {
        let mut buf = 0u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&OP_PATH_PAYMENT_STRICT_RECEIVE.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // native send asset
        buf.extend_from_slice(&100i64.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // ed25519 dest
        buf.extend_from_slice(&[1u8; 32]);
        buf.extend_from_slice(&0u32.to_be_bytes()); // native dest asset
        buf.extend_from_slice(&100i64.to_be_bytes());
        buf.extend_from_slice(&(PATH_PAYMENT_MAX_LEN as u32 + 1).to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Operation::decode(&mut c).is_err());
    }

    #[test]
    fn change_trust_negative_limit_rejected() {
        let mut buf = 0u32.to_be_bytes().to_vec(); // no source
        buf.extend_from_slice(&OP_CHANGE_TRUST.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // native asset
        buf.extend_from_slice(&(-1i64).to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Operation::decode(&mut c).is_err());
    }

    #[test]
    fn change_trust_zero_limit_accepted() {
        let mut buf = 0u32.to_be_bytes().to_vec(); // no source
        buf.extend_from_slice(&OP_CHANGE_TRUST.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // native asset
        buf.extend_from_slice(&0i64.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Operation::decode(&mut c).is_ok());
    }

    #[test]
    fn unsupported_operation_type_rejected() {
        let mut buf = 0u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&999u32.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(Operation::decode(&mut c).is_err());
    }
}
