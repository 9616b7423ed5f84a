//! Structural decoder for Stellar transaction envelopes, fee-bump
//! envelopes and standalone Soroban authorization entries.
//!
//! Every decoded entity is a view borrowed from the caller's input buffer
//! (see [`Envelope`], [`Operation`]): nothing here owns a heap allocation,
//! and variable-length lists decode into `sthw_codec::BoundedVec` rather
//! than a `Vec`, so a malformed list that would exceed its domain cap is
//! a parse error, not an unbounded allocation.

pub mod account;
pub mod asset;
pub mod auth_envelope;
pub mod claim;
pub mod envelope;
pub mod invocation;
pub mod ledger_key;
pub mod memo;
pub mod operation;
pub mod preconditions;
pub mod scval;

pub use account::{AccountId, MuxedAccount, Signer, SignerKey};
pub use asset::{Asset, AssetCode, ChangeTrustAsset, LiquidityPoolParameters, Price, TrustLineAsset};
pub use auth_envelope::SorobanAuthorizationEnvelope;
pub use claim::{Claimant, ClaimableBalanceId};
pub use envelope::{Envelope, EnvelopeKind, FeeBumpEnvelope, Network, OperationList, TransactionEnvelope};
pub use invocation::{AuthorizedFunction, AuthorizedInvocation, ContractExecutable, ContractIdPreimage, CreateContractArgs, InvokeContractArgs};
pub use ledger_key::LedgerKey;
pub use memo::Memo;
pub use operation::{Operation, OperationBody, RevokeSponsorshipOp};
pub use preconditions::{LedgerBounds, Preconditions, PreconditionsView, TimeBounds};
pub use scval::{ScAddress, ScVal};

pub use sthw_codec::{ParseError, ParseErrorKind, ParseResult};
