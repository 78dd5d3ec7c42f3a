//! Shared vocabulary types for the pip-oracle workspace.
//!
//! This crate defines the identifiers, raw quote shape and canonical
//! fixed-point price unit used by every other crate. It carries no I/O and
//! no provider-specific logic.

pub mod ids;
pub mod pips;
pub mod quote;

pub use ids::{Address, FeedId, ParseIdError, PriceId};
pub use pips::{PipError, Pips, PIP_DECIMALS};
pub use quote::RawQuote;
