//! Display primitives: stack-only string buffers and the scalar printers
//! that write into them.
//!
//! Everything here operates on raw bytes and numbers rather than
//! `sthw-model` types, so this crate stays usable from anything that
//! needs to render a strkey or an amount without pulling in the full
//! transaction decoder.

pub mod amount;
pub mod binary;
pub mod fixed_str;
pub mod flags;
pub mod integer;
pub mod strkey;
pub mod time;

pub use fixed_str::{Caption, FixedStr, Overflow, Value, CAPTION_MAX_LEN, VALUE_MAX_LEN};
pub use time::TimeFormatError;
