//! Oracle adapter orchestration.
//!
//! Composes the symbol registry, a provider fetcher and pip conversion into
//! the single entry point the consuming exchange calls. Every stage either
//! succeeds or fails the whole call; no partial or best-effort price is ever
//! returned.

use async_trait::async_trait;
use oracle_feeds::FeedError;
use oracle_registry::RegistryError;
use oracle_types::{Address, PipError, Pips};
use thiserror::Error;

pub mod adapter;

pub use adapter::PriceAdapter;

#[derive(Debug, Error)]
pub enum AdapterError {
	#[error(transparent)]
	Registry(#[from] RegistryError),
	#[error(transparent)]
	Feed(#[from] FeedError),
	#[error(transparent)]
	Conversion(#[from] PipError),
	#[error("quote for {symbol} truncated to a zero price")]
	ZeroPrice { symbol: String },
}

/// The contract a price source exposes to the consuming exchange.
#[async_trait]
pub trait PriceSource: Send + Sync {
	/// Loads the canonical pip price for a registered symbol.
	async fn load_price(&self, symbol: &str) -> Result<Pips, AdapterError>;

	/// Acknowledges being promoted to the authoritative price source.
	///
	/// Advisory only: activation is never a precondition for
	/// [`PriceSource::load_price`], but the hook exists so a stateful
	/// source (one that snapshots a reference price, say) can be dropped
	/// in without changing the calling contract.
	fn set_active(&self, consumer: &Address);
}
