use crate::account::MuxedAccount;
use crate::memo::Memo;
use crate::operation::Operation;
use crate::preconditions::{decode_preconditions, PreconditionsView};
use sha2::{Digest, Sha256};
use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

pub const OPERATIONS_MAX_LEN: usize = 35;

const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// The network a transaction targets, determined by comparing the leading
/// 32-byte network id hash against the two well-known passphrase digests.
/// An unrecognized hash is not a parse error: the transaction is still
/// shown, just labelled `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Public,
    Testnet,
    Unknown,
}

impl Network {
    pub fn from_hash(hash: &[u8; 32]) -> Self {
        if *hash == Self::digest(PUBLIC_NETWORK_PASSPHRASE) {
            Network::Public
        } else if *hash == Self::digest(TESTNET_NETWORK_PASSPHRASE) {
            Network::Testnet
        } else {
            Network::Unknown
        }
    }

    fn digest(passphrase: &str) -> [u8; 32] {
        Sha256::digest(passphrase.as_bytes()).into()
    }
}

/// The operations of a transaction, kept as an anchor offset and a count
/// rather than a materialized array: operations are decoded one at a time,
/// on demand, by re-seeking to `position` and walking forward `index + 1`
/// times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationList {
    pub position: usize,
    pub count: u32,
}

impl OperationList {
    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        let count = c.u32_be()?;
        if count as usize > OPERATIONS_MAX_LEN {
            return Err(ParseError::malformed(offset, "too many operations"));
        }
        let position = c.tell();
        // Validate every operation up front so a later out-of-bounds
        // reparse can never hit malformed input; none are retained.
        for _ in 0..count {
            Operation::decode(c)?;
        }
        Ok(OperationList { position, count })
    }

    /// Re-seek to `position` and decode the `index`-th operation (0-based).
    pub fn operation_at<'a>(&self, input: &'a [u8], index: u32) -> ParseResult<Operation<'a>> {
        if index >= self.count {
            return Err(ParseError::malformed(self.position, "operation index out of range"));
        }
        let mut c = Cursor::new(input);
        c.seek(self.position)?;
        for _ in 0..index {
            Operation::decode(&mut c)?;
        }
        Operation::decode(&mut c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionEnvelope<'a> {
    pub source: MuxedAccount,
    pub fee: u32,
    pub seq_num: i64,
    pub preconditions: PreconditionsView<'a>,
    pub memo: Memo<'a>,
    pub operations: OperationList,
}

const ENVELOPE_TYPE_TX: u32 = 2;
const ENVELOPE_TYPE_TX_FEE_BUMP: u32 = 5;

impl<'a> TransactionEnvelope<'a> {
    fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let source = MuxedAccount::decode(c)?;
        let fee = c.u32_be()?;
        let seq_num = c.i64_be()?;
        let preconditions = decode_preconditions(c)?;
        let memo = Memo::decode(c)?;
        let operations = OperationList::decode(c)?;
        Ok(TransactionEnvelope {
            source,
            fee,
            seq_num,
            preconditions,
            memo,
            operations,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBumpEnvelope<'a> {
    pub fee_source: MuxedAccount,
    pub fee: i64,
    pub inner: TransactionEnvelope<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind<'a> {
    Tx(TransactionEnvelope<'a>),
    FeeBump(FeeBumpEnvelope<'a>),
}

/// A parsed transaction (or fee-bump transaction) envelope, anchored to its
/// network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub network: Network,
    pub kind: EnvelopeKind<'a>,
}

impl<'a> Envelope<'a> {
    pub fn parse(input: &'a [u8]) -> ParseResult<Self> {
        let mut c = Cursor::new(input);
        let network_hash: [u8; 32] = c.fixed_bytes(32)?.try_into().unwrap();
        let network = Network::from_hash(&network_hash);
        let offset = c.tell();
        let kind = match c.u32_be()? {
            ENVELOPE_TYPE_TX => EnvelopeKind::Tx(TransactionEnvelope::decode(&mut c)?),
            ENVELOPE_TYPE_TX_FEE_BUMP => {
                let fee_source = MuxedAccount::decode(&mut c)?;
                let fee = c.i64_be()?;
                let inner_offset = c.tell();
                if c.u32_be()? != ENVELOPE_TYPE_TX {
                    return Err(ParseError::malformed(inner_offset, "fee bump inner envelope must be a plain transaction"));
                }
                let inner = TransactionEnvelope::decode(&mut c)?;
                EnvelopeKind::FeeBump(FeeBumpEnvelope { fee_source, fee, inner })
            }
            _ => return Err(ParseError::malformed(offset, "unsupported envelope type")),
        };
        Ok(Envelope { network, kind })
    }

    /// The transaction whose operations are being reviewed: itself for a
    /// plain envelope, or the wrapped inner transaction for a fee bump.
    pub fn transaction(&self) -> &TransactionEnvelope<'a> {
        match &self.kind {
            EnvelopeKind::Tx(tx) => tx,
            EnvelopeKind::FeeBump(fb) => &fb.inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn muxed_ed25519(byte: u8) -> Vec<u8> {
        let mut v = 0u32.to_be_bytes().to_vec();
        v.extend(std::iter::repeat(byte).take(32));
        v
    }

    fn minimal_tx_body(fee: u32) -> Vec<u8> {
        let mut v = muxed_ed25519(1); // source
        v.extend_from_slice(&fee.to_be_bytes());
        v.extend_from_slice(&1i64.to_be_bytes()); // seq
        v.extend_from_slice(&0u32.to_be_bytes()); // preconditions none
        v.extend_from_slice(&0u32.to_be_bytes()); // memo none
        v.extend_from_slice(&0u32.to_be_bytes()); // zero operations
        v
    }

    #[test]
    fn unknown_network_hash_is_unknown() {
        let mut buf = [0xABu8; 32].to_vec();
        buf.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        buf.extend_from_slice(&minimal_tx_body(100));
        let env = Envelope::parse(&buf).unwrap();
        assert_eq!(env.network, Network::Unknown);
    }

    #[test]
    fn public_network_hash_recognized() {
        let hash = Network::digest(PUBLIC_NETWORK_PASSPHRASE);
        let mut buf = hash.to_vec();
        buf.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        buf.extend_from_slice(&minimal_tx_body(100));
        let env = Envelope::parse(&buf).unwrap();
        assert_eq!(env.network, Network::Public);
    }

    #[test]
    fn legacy_envelope_type_rejected() {
        let mut buf = [0u8; 32].to_vec();
        buf.extend_from_slice(&0u32.to_be_bytes()); // historical ENVELOPE_TYPE_TX_V0
        buf.extend_from_slice(&minimal_tx_body(100));
        assert!(Envelope::parse(&buf).is_err());
    }

    #[test]
    fn fee_bump_wraps_inner_transaction() {
        let mut buf = [0u8; 32].to_vec();
        buf.extend_from_slice(&ENVELOPE_TYPE_TX_FEE_BUMP.to_be_bytes());
        buf.extend(muxed_ed25519(2)); // fee source
        buf.extend_from_slice(&500i64.to_be_bytes()); // fee
        buf.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        buf.extend_from_slice(&minimal_tx_body(100));
        let env = Envelope::parse(&buf).unwrap();
        match env.kind {
            EnvelopeKind::FeeBump(fb) => assert_eq!(fb.fee, 500),
            _ => panic!("expected fee bump"),
        }
    }

    #[test]
    fn operations_over_cap_rejected() {
        let mut buf = [0u8; 32].to_vec();
        buf.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        let mut tx = muxed_ed25519(1);
        tx.extend_from_slice(&100u32.to_be_bytes());
        tx.extend_from_slice(&1i64.to_be_bytes());
        tx.extend_from_slice(&0u32.to_be_bytes());
        tx.extend_from_slice(&0u32.to_be_bytes());
        tx.extend_from_slice(&(OPERATIONS_MAX_LEN as u32 + 1).to_be_bytes());
        buf.extend_from_slice(&tx);
        assert!(Envelope::parse(&buf).is_err());
    }
}
