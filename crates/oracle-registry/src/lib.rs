//! Symbol registry for the oracle adapter.
//!
//! Maintains the bijective mapping between human-readable trading symbols
//! and opaque feed identifiers. Entries are add-only: once either side of a
//! pair is bound it can never be rebound or removed. Mutation is gated by an
//! injected [`AdminPolicy`] capability rather than any identity logic of its
//! own.

use oracle_types::{Address, FeedId};
use thiserror::Error;

pub mod registry;

pub use registry::SymbolRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	#[error("caller is not the registry admin")]
	Unauthorized,
	#[error("symbol must not be empty")]
	EmptySymbol,
	#[error("feed identifier must not be the zero value")]
	ZeroFeedId,
	#[error("symbol {0} is already registered")]
	DuplicateSymbol(String),
	#[error("feed identifier {0} is already registered")]
	DuplicateFeedId(FeedId),
	#[error("unknown symbol {0}")]
	UnknownSymbol(String),
	#[error("{symbols} symbols paired with {feeds} feed identifiers")]
	LengthMismatch { symbols: usize, feeds: usize },
}

/// Authorization capability for registry mutation.
///
/// The surrounding system decides who the admin is; the registry only asks.
pub trait AdminPolicy: Send + Sync {
	fn is_admin(&self, caller: &Address) -> bool;
}

/// Grants admin rights to exactly one configured address.
#[derive(Debug, Clone)]
pub struct SingleAdmin {
	admin: Address,
}

impl SingleAdmin {
	pub fn new(admin: Address) -> Self {
		Self { admin }
	}
}

impl AdminPolicy for SingleAdmin {
	fn is_admin(&self, caller: &Address) -> bool {
		caller == &self.admin
	}
}
