//! Provider-specific price fetchers behind one interface.
//!
//! Each upstream provider shape gets its own [`PriceFetcher`]
//! implementation; everything above this crate addresses feeds purely
//! through the trait and the opaque [`FeedId`]. Provider branching never
//! leaks past this boundary.

use async_trait::async_trait;
use oracle_types::{FeedId, RawQuote};
use thiserror::Error;

pub mod implementations;

pub use implementations::{ChainlinkFetcher, PythFetcher};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
	#[error("provider connection failed: {0}")]
	Connection(String),
	#[error("aggregator reported a stale or missing answer")]
	StaleOrMissingAnswer,
	#[error("no price available: {0}")]
	NoPriceAvailable(String),
	#[error("feed identifier {0} is not addressable by this provider")]
	UnsupportedFeedId(FeedId),
	#[error("provider answer does not fit the quote range")]
	AnswerOutOfRange,
}

/// One upstream feed provider.
///
/// A fetch reads the provider's latest state synchronously and returns it as
/// a raw quote, or fails; nothing is cached, retried or timed out here.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
	/// Short provider name used in logs.
	fn name(&self) -> &str;

	/// Reads the latest quote for the given feed.
	async fn fetch(&self, feed_id: &FeedId) -> Result<RawQuote, FeedError>;
}
