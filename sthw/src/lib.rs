//! Rust-native transaction-review core for a Stellar hardware wallet.
//!
//! Re-exports the four layered crates under short names and ties them
//! together behind [`ReviewSession`], the single entry point a host
//! integration (or this crate's `sthw-demo` binary) drives: parse an
//! envelope, then pull caption/value pairs from it one at a time.

pub mod codec {
    pub use sthw_codec::*;
}
pub mod model {
    pub use sthw_model::*;
}
pub mod display {
    pub use sthw_display::*;
}
pub mod format {
    pub use sthw_format::*;
}

use sthw_format::{ContractPlugin, Formatter};
use sthw_model::{Envelope, Operation, SorobanAuthorizationEnvelope};
use thiserror::Error;

/// The single error type a host integration handles at the boundary;
/// internals stay precise (`ParseError`/`FormatError`) but a caller only
/// needs one match.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("data parsing failed: {0}")]
    Parse(#[from] sthw_codec::ParseError),
    #[error("{0}")]
    Format(#[from] sthw_format::FormatError),
}

enum Parsed<'a> {
    None,
    Transaction(Envelope<'a>),
    Authorization(SorobanAuthorizationEnvelope<'a>),
}

/// Owns the decoded envelope and the formatter walking it; the only
/// cross-poll state a host integration needs to keep alive, matching
/// §5's re-entrancy model (nothing lives in process-wide statics).
pub struct ReviewSession<'a> {
    input: &'a [u8],
    parsed: Parsed<'a>,
    formatter: Option<Formatter<'a, 'static>>,
    signing_key: Option<[u8; 32]>,
    display_sequence: bool,
}

impl<'a> ReviewSession<'a> {
    pub fn new() -> Self {
        ReviewSession {
            input: &[],
            parsed: Parsed::None,
            formatter: None,
            signing_key: None,
            display_sequence: true,
        }
    }

    /// Abbreviate the source account to `GXXXXXX..XXXXXXX` whenever it
    /// matches this Ed25519 public key; shown in full otherwise.
    pub fn set_signing_key(&mut self, key: Option<[u8; 32]>) {
        self.signing_key = key;
    }

    /// Whether the sequence number field is included when walking a
    /// transaction's header (on by default).
    pub fn set_display_sequence(&mut self, display: bool) {
        self.display_sequence = display;
    }

    /// Decode `bytes` as a transaction (or fee-bump transaction) envelope
    /// and prepare the formatter to walk it.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn parse_transaction(&mut self, bytes: &'a [u8]) -> Result<(), CoreError> {
        let envelope = Envelope::parse(bytes)?;
        self.input = bytes;
        self.parsed = Parsed::Transaction(envelope);
        self.formatter = Some(Formatter::for_transaction(bytes)?);
        tracing::debug!("transaction envelope parsed");
        Ok(())
    }

    /// Decode `bytes` as a standalone Soroban authorization entry and
    /// prepare the formatter to walk it.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn parse_authorization(&mut self, bytes: &'a [u8]) -> Result<(), CoreError> {
        let auth = SorobanAuthorizationEnvelope::parse(bytes)?;
        self.input = bytes;
        self.parsed = Parsed::Authorization(auth);
        self.formatter = Some(Formatter::for_authorization(bytes)?);
        tracing::debug!("authorization entry parsed");
        Ok(())
    }

    /// Reseek and decode the operation at `index` out of the currently
    /// parsed transaction, without disturbing the formatter's position.
    pub fn parse_operation(&self, index: u32) -> Result<Operation<'a>, CoreError> {
        let Parsed::Transaction(envelope) = &self.parsed else {
            return Err(CoreError::Parse(sthw_codec::ParseError::malformed(0, "no transaction parsed")));
        };
        Ok(envelope.transaction().operations.operation_at(self.input, index)?)
    }

    /// Clear the formatter back to its first field without re-parsing.
    pub fn reset_formatter(&mut self) {
        if let Some(formatter) = &mut self.formatter {
            formatter.reset();
        }
    }

    /// Advance (`forward = true`) or step back (`forward = false`) one
    /// caption/value pair. `Ok(None)` means end-of-stream in that
    /// direction, matching `data_exists = false` in the callback model
    /// this mirrors.
    pub fn next_data(&mut self, forward: bool) -> Result<Option<(sthw_format::Caption, sthw_format::Value)>, CoreError> {
        let Some(formatter) = &mut self.formatter else {
            return Ok(None);
        };
        let result = if forward { formatter.next_data() } else { formatter.previous_data() };
        match result {
            Ok((caption, mut value)) => {
                self.abbreviate_source_account(caption.as_str(), &mut value);
                Ok(Some((caption, value)))
            }
            Err(sthw_format::FormatError::EndOfChain) => Ok(None),
            Err(e) => Err(CoreError::Format(e)),
        }
    }

    /// Whether any contract invocation walked so far fell back to
    /// generic rendering because no plugin claimed it.
    pub fn unverified_contracts(&self) -> bool {
        self.formatter.as_ref().map(|f| f.unverified_contracts()).unwrap_or(false)
    }

    fn abbreviate_source_account(&self, caption: &str, value: &mut sthw_format::Value) {
        let Some(key) = self.signing_key else {
            return;
        };
        if caption != "Tx Source" && caption != "Op Source" {
            return;
        }
        let mut full = sthw_format::Value::new();
        if sthw_display::strkey::encode_ed25519(&key, &mut full).is_err() {
            return;
        }
        if full.as_str() != value.as_str() {
            return;
        }
        let mut abbreviated = sthw_format::Value::new();
        if sthw_display::strkey::abbreviate(full.as_str(), 6, 6, &mut abbreviated).is_ok() {
            *value = abbreviated;
        }
    }
}

impl<'a> Default for ReviewSession<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a plugin for the lifetime of a single transaction walk. The
/// facade keeps `Formatter`'s plugin slot at `'static` so `ReviewSession`
/// doesn't need a third lifetime parameter; a plugin registered this way
/// must not borrow anything shorter-lived than the session itself.
pub fn with_plugin<'a>(session: &mut ReviewSession<'a>, plugin: &'static mut dyn ContractPlugin) {
    if let Some(formatter) = session.formatter.take() {
        session.formatter = Some(formatter.with_plugin(plugin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_yields_no_data() {
        let mut session = ReviewSession::new();
        assert_eq!(session.next_data(true).unwrap(), None);
    }
}
