//! Re-entrant formatter state machine and plugin bridge for Stellar
//! transaction review.
//!
//! Given a decoded envelope (from [`sthw_model`]), [`Formatter`] walks its
//! fields one caption/value pair at a time -- forward via [`Formatter::next_data`],
//! backward via [`Formatter::previous_data`] -- without ever materializing
//! the full pair sequence. A [`plugin::ContractPlugin`] may intercept a
//! Soroban contract invocation's arguments and replace them with
//! domain-specific pairs before the generic renderer in [`field`] runs.

mod chain;
mod error;
mod field;
mod formatter;
pub mod plugin;

pub use error::{FormatError, FormatResult};
pub use field::Field;
pub use formatter::Formatter;
pub use plugin::{ContractPlugin, PluginOutcome, PluginPair, TokenPlugin};
pub use sthw_display::{Caption, Value};
