use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

pub const SIGNED_PAYLOAD_MAX_LEN: usize = 64;

/// A plain Ed25519 public key: 32 raw bytes, no multiplexing id.
///
/// Used wherever the wire format calls for `PublicKey` rather than
/// `MuxedAccount` -- trust-line trustors, claimable-balance claimants,
/// sponsorship signers, and the like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub const PUBLIC_KEY_TYPE_ED25519: u32 = 0;

    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        let key_type = c.u32_be()?;
        if key_type != Self::PUBLIC_KEY_TYPE_ED25519 {
            return Err(ParseError::malformed(offset, "unsupported public key type"));
        }
        let bytes = c.fixed_bytes(32)?;
        Ok(AccountId(bytes.try_into().unwrap()))
    }
}

/// Either a plain account, or a multiplexed account carrying a 64-bit id
/// alongside the underlying Ed25519 key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxedAccount {
    Ed25519([u8; 32]),
    MuxedEd25519 { id: u64, ed25519: [u8; 32] },
}

impl MuxedAccount {
    const KEY_TYPE_ED25519: u32 = 0;
    const KEY_TYPE_MUXED_ED25519: u32 = 0x100;

    pub fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            Self::KEY_TYPE_ED25519 => {
                let bytes = c.fixed_bytes(32)?;
                Ok(MuxedAccount::Ed25519(bytes.try_into().unwrap()))
            }
            Self::KEY_TYPE_MUXED_ED25519 => {
                let id = c.u64_be()?;
                let bytes = c.fixed_bytes(32)?;
                Ok(MuxedAccount::MuxedEd25519 {
                    id,
                    ed25519: bytes.try_into().unwrap(),
                })
            }
            _ => Err(ParseError::malformed(offset, "unsupported muxed account type")),
        }
    }

    /// The underlying Ed25519 key regardless of multiplexing.
    pub fn ed25519(&self) -> &[u8; 32] {
        match self {
            MuxedAccount::Ed25519(k) => k,
            MuxedAccount::MuxedEd25519 { ed25519, .. } => ed25519,
        }
    }
}

/// A signer's key: four wire variants, all resolving to a displayable
/// strkey with a distinct leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKey<'a> {
    Ed25519([u8; 32]),
    PreAuthTx([u8; 32]),
    HashX([u8; 32]),
    Ed25519SignedPayload {
        ed25519: [u8; 32],
        payload: &'a [u8],
    },
}

impl<'a> SignerKey<'a> {
    const SIGNER_KEY_TYPE_ED25519: u32 = 0;
    const SIGNER_KEY_TYPE_PRE_AUTH_TX: u32 = 1;
    const SIGNER_KEY_TYPE_HASH_X: u32 = 2;
    const SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD: u32 = 3;

    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            Self::SIGNER_KEY_TYPE_ED25519 => {
                Ok(SignerKey::Ed25519(c.fixed_bytes(32)?.try_into().unwrap()))
            }
            Self::SIGNER_KEY_TYPE_PRE_AUTH_TX => {
                Ok(SignerKey::PreAuthTx(c.fixed_bytes(32)?.try_into().unwrap()))
            }
            Self::SIGNER_KEY_TYPE_HASH_X => {
                Ok(SignerKey::HashX(c.fixed_bytes(32)?.try_into().unwrap()))
            }
            Self::SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD => {
                let ed25519 = c.fixed_bytes(32)?.try_into().unwrap();
                let payload_offset = c.tell();
                let payload = c.bytes_padded(SIGNED_PAYLOAD_MAX_LEN)?;
                if payload.is_empty() {
                    return Err(ParseError::malformed(payload_offset, "empty signed payload"));
                }
                Ok(SignerKey::Ed25519SignedPayload { ed25519, payload })
            }
            _ => Err(ParseError::malformed(offset, "unsupported signer key type")),
        }
    }
}

/// A `(signer key, weight)` pair, as found in `SetOptionsOp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer<'a> {
    pub key: SignerKey<'a>,
    pub weight: u32,
}

impl<'a> Signer<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let key = SignerKey::decode(c)?;
        let weight = c.u32_be()?;
        Ok(Signer { key, weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_rejects_unsupported_key_type() {
        let mut buf = 1u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0u8; 32]);
        let mut c = Cursor::new(&buf);
        assert!(AccountId::decode(&mut c).is_err());
    }

    #[test]
    fn muxed_account_ed25519_roundtrip_shape() {
        let mut buf = 0u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[7u8; 32]);
        let mut c = Cursor::new(&buf);
        assert_eq!(
            MuxedAccount::decode(&mut c).unwrap(),
            MuxedAccount::Ed25519([7u8; 32])
        );
    }

    #[test]
    fn signed_payload_rejects_zero_length() {
        let mut buf = 3u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[1u8; 32]);
        buf.extend_from_slice(&0u32.to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(SignerKey::decode(&mut c).is_err());
    }

    #[test]
    fn signed_payload_rejects_over_64_bytes() {
        let mut buf = 3u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[1u8; 32]);
        buf.extend_from_slice(&65u32.to_be_bytes());
        buf.extend_from_slice(&[0u8; 68]);
        let mut c = Cursor::new(&buf);
        assert!(SignerKey::decode(&mut c).is_err());
    }
}
