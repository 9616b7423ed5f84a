use crate::asset::Asset;
use crate::scval::{ScAddress, ScVal, SCSYMBOL_MAX_LEN};
use sthw_codec::{BoundedVec, Cursor, ParseError, ParseResult, PrimitiveRead};

pub const SUB_INVOCATIONS_MAX_LEN: usize = 16;
pub const CONTRACT_ARGS_MAX_LEN: usize = 10;
/// Sanity bound on an uploaded Wasm module's size; large enough for any
/// real Soroban contract, small enough to rule out a hostile length field.
pub const WASM_MAX_LEN: usize = 64 * 1024;

/// A contract invocation's fixed header plus a deferred argument list: the
/// parser records where the arguments start and how many there are, and
/// re-seeks to decode one argument at a time as the formatter asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeContractArgs<'a> {
    pub contract_address: ScAddress,
    pub function_name: &'a [u8],
    pub args_position: usize,
    pub args_count: u32,
}

impl<'a> InvokeContractArgs<'a> {
    fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let contract_address = ScAddress::decode(c)?;
        let function_name = c.bytes_padded(SCSYMBOL_MAX_LEN)?;
        let offset = c.tell();
        let args_count = c.u32_be()?;
        if args_count as usize > CONTRACT_ARGS_MAX_LEN {
            return Err(ParseError::malformed(offset, "too many contract arguments"));
        }
        let args_position = c.tell();
        for _ in 0..args_count {
            ScVal::skip(c)?;
        }
        Ok(InvokeContractArgs {
            contract_address,
            function_name,
            args_position,
            args_count,
        })
    }

    /// Re-seek to and decode the i-th argument (0-based). Does not disturb
    /// the caller's own cursor position.
    pub fn arg_at(&self, input: &'a [u8], index: u32) -> ParseResult<ScVal<'a>> {
        if index >= self.args_count {
            return Err(ParseError::malformed(self.args_position, "argument index out of range"));
        }
        let mut c = Cursor::new(input);
        c.seek(self.args_position)?;
        for _ in 0..index {
            ScVal::skip(&mut c)?;
        }
        ScVal::decode(&mut c)
    }
}

/// How a to-be-created contract's id is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractIdPreimage {
    FromAddress { address: ScAddress, salt: [u8; 32] },
    FromAsset(Asset),
}

impl ContractIdPreimage {
    fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            0 => {
                let address = ScAddress::decode(c)?;
                let salt = c.fixed_bytes(32)?.try_into().unwrap();
                Ok(ContractIdPreimage::FromAddress { address, salt })
            }
            1 => Ok(ContractIdPreimage::FromAsset(Asset::decode(c)?)),
            _ => Err(ParseError::malformed(offset, "unsupported contract id preimage type")),
        }
    }
}

/// The executable that backs a newly created contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractExecutable {
    Wasm([u8; 32]),
    StellarAsset,
}

impl ContractExecutable {
    fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            0 => Ok(ContractExecutable::Wasm(c.fixed_bytes(32)?.try_into().unwrap())),
            1 => Ok(ContractExecutable::StellarAsset),
            _ => Err(ParseError::malformed(offset, "unsupported contract executable type")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateContractArgs {
    pub preimage: ContractIdPreimage,
    pub executable: ContractExecutable,
}

impl CreateContractArgs {
    fn decode(c: &mut Cursor<'_>) -> ParseResult<Self> {
        let preimage = ContractIdPreimage::decode(c)?;
        let executable = ContractExecutable::decode(c)?;
        Ok(CreateContractArgs { preimage, executable })
    }
}

/// The function a Soroban authorization entry (or an `InvokeHostFunction`
/// operation) grants permission to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizedFunction<'a> {
    ContractFn(InvokeContractArgs<'a>),
    CreateContract(CreateContractArgs),
    UploadWasm { size: u32 },
}

const HOST_FUNCTION_TYPE_INVOKE_CONTRACT: u32 = 0;
const HOST_FUNCTION_TYPE_CREATE_CONTRACT: u32 = 1;
const HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM: u32 = 2;

impl<'a> AuthorizedFunction<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let offset = c.tell();
        match c.u32_be()? {
            HOST_FUNCTION_TYPE_INVOKE_CONTRACT => {
                Ok(AuthorizedFunction::ContractFn(InvokeContractArgs::decode(c)?))
            }
            HOST_FUNCTION_TYPE_CREATE_CONTRACT => {
                Ok(AuthorizedFunction::CreateContract(CreateContractArgs::decode(c)?))
            }
            HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM => {
                let wasm = c.bytes_padded(WASM_MAX_LEN)?;
                Ok(AuthorizedFunction::UploadWasm { size: wasm.len() as u32 })
            }
            _ => Err(ParseError::malformed(offset, "unsupported host function type")),
        }
    }
}

/// A node in the authorization tree: the function it authorizes, plus the
/// byte offsets of its direct sub-invocations. Sub-invocations are
/// materialized one at a time via [`AuthorizedInvocation::sub_invocation_at`],
/// never eagerly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedInvocation<'a> {
    pub function: AuthorizedFunction<'a>,
    pub sub_invocation_positions: BoundedVec<usize, SUB_INVOCATIONS_MAX_LEN>,
}

impl<'a> AuthorizedInvocation<'a> {
    pub fn decode(c: &mut Cursor<'a>) -> ParseResult<Self> {
        let function = AuthorizedFunction::decode(c)?;
        let offset = c.tell();
        let count = c.u32_be()? as usize;
        if count > SUB_INVOCATIONS_MAX_LEN {
            return Err(ParseError::malformed(offset, "too many sub-invocations"));
        }
        let mut sub_invocation_positions = BoundedVec::new();
        for _ in 0..count {
            let pos = c.tell();
            sub_invocation_positions
                .push(pos)
                .map_err(|_| ParseError::malformed(offset, "too many sub-invocations"))?;
            // Walk (and discard) the nested tree to land on the next sibling.
            AuthorizedInvocation::decode(c)?;
        }
        Ok(AuthorizedInvocation {
            function,
            sub_invocation_positions,
        })
    }

    pub fn sub_invocation_count(&self) -> usize {
        self.sub_invocation_positions.len()
    }

    pub fn sub_invocation_at(&self, input: &'a [u8], index: usize) -> ParseResult<AuthorizedInvocation<'a>> {
        let &pos = self
            .sub_invocation_positions
            .get(index)
            .ok_or_else(|| ParseError::malformed(0, "sub-invocation index out of range"))?;
        let mut c = Cursor::new(input);
        c.seek(pos)?;
        AuthorizedInvocation::decode(&mut c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract_address_bytes() -> Vec<u8> {
        let mut v = 1u32.to_be_bytes().to_vec(); // SC_ADDRESS_TYPE_CONTRACT
        v.extend_from_slice(&[9u8; 32]);
        v
    }

    #[test]
    fn invoke_contract_args_with_zero_arguments() {
        let mut buf = HOST_FUNCTION_TYPE_INVOKE_CONTRACT.to_be_bytes().to_vec();
        buf.extend_from_slice(&contract_address_bytes());
        buf.extend_from_slice(&4u32.to_be_bytes()); // symbol len
        buf.extend_from_slice(b"test");
        buf.extend_from_slice(&0u32.to_be_bytes()); // arg count
        let mut c = Cursor::new(&buf);
        let f = AuthorizedFunction::decode(&mut c).unwrap();
        match f {
            AuthorizedFunction::ContractFn(args) => {
                assert_eq!(args.function_name, b"test");
                assert_eq!(args.args_count, 0);
            }
            _ => panic!("expected contract fn"),
        }
    }

    #[test]
    fn too_many_sub_invocations_rejected() {
        let mut buf = HOST_FUNCTION_TYPE_INVOKE_CONTRACT.to_be_bytes().to_vec();
        buf.extend_from_slice(&contract_address_bytes());
        buf.extend_from_slice(&4u32.to_be_bytes());
        buf.extend_from_slice(b"test");
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&(SUB_INVOCATIONS_MAX_LEN as u32 + 1).to_be_bytes());
        let mut c = Cursor::new(&buf);
        assert!(AuthorizedInvocation::decode(&mut c).is_err());
    }
}
