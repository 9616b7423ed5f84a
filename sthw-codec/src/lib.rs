//! Cursor and primitive codec for the Stellar wallet wire format.
//!
//! This crate knows nothing about transactions, operations or Soroban
//! values -- it only knows how to read big-endian integers, bools,
//! optionals and length-prefixed padded byte strings off an immutable
//! buffer without allocating. [`sthw-model`](../sthw_model) builds the
//! domain entities on top of it.

mod bounded;
mod cursor;
mod error;
mod primitives;

pub use bounded::{BoundedVec, CapacityExceeded};
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use primitives::PrimitiveRead;
