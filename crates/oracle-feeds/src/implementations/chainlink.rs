//! Chainlink-style aggregator fetcher.
//!
//! Aggregator providers expose one contract per symbol; the feed identifier
//! is that contract's address. The latest round and the aggregator's decimal
//! count are both read on every fetch; aggregators may change their own
//! precision over time, so the decimal count is never cached at registration
//! time.

use crate::{FeedError, PriceFetcher};
use alloy_primitives::{Address as AlloyAddress, Bytes, I256, TxKind};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use alloy_transport_http::Http;
use async_trait::async_trait;
use oracle_types::{FeedId, RawQuote};
use tracing::debug;

sol! {
	interface IAggregatorV3 {
		function latestRoundData()
			external
			view
			returns (
				uint80 roundId,
				int256 answer,
				uint256 startedAt,
				uint256 updatedAt,
				uint80 answeredInRound
			);

		function decimals() external view returns (uint8);
	}
}

/// Fetcher for aggregator-style providers.
pub struct ChainlinkFetcher {
	provider: RootProvider<Http<reqwest::Client>>,
}

impl ChainlinkFetcher {
	/// Creates a fetcher reading through the given RPC endpoint.
	pub fn new(rpc_url: &str) -> Result<Self, FeedError> {
		let url = rpc_url
			.parse()
			.map_err(|e| FeedError::Connection(format!("invalid RPC URL: {}", e)))?;

		Ok(Self {
			provider: RootProvider::new_http(url),
		})
	}

	async fn read(&self, aggregator: AlloyAddress, data: Vec<u8>) -> Result<Bytes, FeedError> {
		let request = TransactionRequest {
			to: Some(TxKind::Call(aggregator)),
			input: TransactionInput {
				input: Some(Bytes::from(data)),
				data: None,
			},
			..Default::default()
		};

		self.provider
			.call(&request)
			.await
			.map_err(|e| FeedError::Connection(e.to_string()))
	}
}

/// Builds a raw quote from an aggregator round.
///
/// Aggregators report non-positive sentinel answers when no valid round
/// exists; those are stale-or-missing, never quotes. The decimal count
/// becomes a negative exponent.
fn quote_from_round(answer: I256, decimals: u8) -> Result<RawQuote, FeedError> {
	if answer <= I256::ZERO {
		return Err(FeedError::StaleOrMissingAnswer);
	}
	let magnitude = i128::try_from(answer).map_err(|_| FeedError::AnswerOutOfRange)?;
	Ok(RawQuote::new(magnitude, -(decimals as i32)))
}

#[async_trait]
impl PriceFetcher for ChainlinkFetcher {
	fn name(&self) -> &str {
		"chainlink"
	}

	async fn fetch(&self, feed_id: &FeedId) -> Result<RawQuote, FeedError> {
		let aggregator = match feed_id {
			FeedId::Address(address) => AlloyAddress::from(address.0),
			other => return Err(FeedError::UnsupportedFeedId(other.clone())),
		};

		let round_bytes = self
			.read(aggregator, IAggregatorV3::latestRoundDataCall {}.abi_encode())
			.await?;
		let round = IAggregatorV3::latestRoundDataCall::abi_decode_returns(&round_bytes, true)
			.map_err(|e| FeedError::Connection(format!("undecodable round data: {}", e)))?;

		let decimals_bytes = self
			.read(aggregator, IAggregatorV3::decimalsCall {}.abi_encode())
			.await?;
		let decimals = IAggregatorV3::decimalsCall::abi_decode_returns(&decimals_bytes, true)
			.map_err(|e| FeedError::Connection(format!("undecodable decimals: {}", e)))?;

		let quote = quote_from_round(round.answer, decimals._0)?;
		debug!(
			aggregator = %aggregator,
			magnitude = quote.magnitude,
			exponent = quote.exponent,
			"aggregator quote"
		);
		Ok(quote)
	}
}
