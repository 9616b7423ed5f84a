use crate::envelope::Network;
use crate::invocation::AuthorizedInvocation;
use sthw_codec::{Cursor, ParseError, ParseResult, PrimitiveRead};

const ENVELOPE_TYPE_SOROBAN_AUTHORIZATION: u32 = 9;

/// A standalone Soroban authorization entry, as presented to the device
/// when a dApp asks the user to pre-authorize a contract call it will
/// later submit (signed separately from any enclosing transaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SorobanAuthorizationEnvelope<'a> {
    pub network: Network,
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub root_invocation: AuthorizedInvocation<'a>,
}

impl<'a> SorobanAuthorizationEnvelope<'a> {
    pub fn parse(input: &'a [u8]) -> ParseResult<Self> {
        let mut c = Cursor::new(input);
        let offset = c.tell();
        if c.u32_be()? != ENVELOPE_TYPE_SOROBAN_AUTHORIZATION {
            return Err(ParseError::malformed(offset, "unsupported envelope type for authorization entry"));
        }
        let network_hash: [u8; 32] = c.fixed_bytes(32)?.try_into().unwrap();
        let network = Network::from_hash(&network_hash);
        let nonce = c.i64_be()?;
        let signature_expiration_ledger = c.u32_be()?;
        let root_invocation = AuthorizedInvocation::decode(&mut c)?;
        Ok(SorobanAuthorizationEnvelope {
            network,
            nonce,
            signature_expiration_ledger,
            root_invocation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_tag_rejected() {
        let buf = 0u32.to_be_bytes();
        assert!(SorobanAuthorizationEnvelope::parse(&buf).is_err());
    }

    #[test]
    fn minimal_invoke_contract_authorization_decodes() {
        let mut buf = ENVELOPE_TYPE_SOROBAN_AUTHORIZATION.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0u8; 32]); // unknown network
        buf.extend_from_slice(&42i64.to_be_bytes()); // nonce
        buf.extend_from_slice(&1000u32.to_be_bytes()); // sig exp ledger
        buf.extend_from_slice(&0u32.to_be_bytes()); // HOST_FUNCTION_TYPE_INVOKE_CONTRACT
        buf.extend_from_slice(&1u32.to_be_bytes()); // SC_ADDRESS_TYPE_CONTRACT
        buf.extend_from_slice(&[9u8; 32]);
        buf.extend_from_slice(&4u32.to_be_bytes()); // symbol len
        buf.extend_from_slice(b"test");
        buf.extend_from_slice(&0u32.to_be_bytes()); // 0 args
        buf.extend_from_slice(&0u32.to_be_bytes()); // 0 sub-invocations
        let env = SorobanAuthorizationEnvelope::parse(&buf).unwrap();
        assert_eq!(env.nonce, 42);
        assert_eq!(env.root_invocation.sub_invocation_count(), 0);
    }
}
