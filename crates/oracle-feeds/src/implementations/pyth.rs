//! Opaque-ID price fetcher.
//!
//! This provider shape keeps every feed behind one contract; feeds are
//! addressed by a 32-byte identifier and the answer carries its own signed
//! exponent. A revert from the provider means it has no usable price for
//! the identifier and is propagated, not swallowed.

use crate::{FeedError, PriceFetcher};
use alloy_primitives::{Address as AlloyAddress, Bytes, FixedBytes, TxKind};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use alloy_transport_http::Http;
use async_trait::async_trait;
use oracle_types::{Address, FeedId, RawQuote};
use tracing::debug;

sol! {
	struct Price {
		int64 price;
		uint64 conf;
		int32 expo;
		uint256 publishTime;
	}

	interface IPyth {
		function getPrice(bytes32 id) external view returns (Price memory price);
	}
}

/// Fetcher for providers addressing feeds by opaque 32-byte identifier.
pub struct PythFetcher {
	provider: RootProvider<Http<reqwest::Client>>,
	contract: AlloyAddress,
}

impl PythFetcher {
	/// Creates a fetcher for the provider contract at `contract`, reading
	/// through the given RPC endpoint.
	pub fn new(rpc_url: &str, contract: &Address) -> Result<Self, FeedError> {
		let url = rpc_url
			.parse()
			.map_err(|e| FeedError::Connection(format!("invalid RPC URL: {}", e)))?;

		Ok(Self {
			provider: RootProvider::new_http(url),
			contract: AlloyAddress::from(contract.0),
		})
	}
}

/// Maps the provider's price struct onto a raw quote.
///
/// Sign and exponent pass through untouched; judging a non-positive
/// magnitude is the converter's job, not this provider boundary's.
fn quote_from_price(price: &Price) -> RawQuote {
	RawQuote::new(price.price as i128, price.expo)
}

#[async_trait]
impl PriceFetcher for PythFetcher {
	fn name(&self) -> &str {
		"pyth"
	}

	async fn fetch(&self, feed_id: &FeedId) -> Result<RawQuote, FeedError> {
		let id = match feed_id {
			FeedId::PriceId(price_id) => FixedBytes::<32>::from(price_id.0),
			other => return Err(FeedError::UnsupportedFeedId(other.clone())),
		};

		let request = TransactionRequest {
			to: Some(TxKind::Call(self.contract)),
			input: TransactionInput {
				input: Some(Bytes::from(IPyth::getPriceCall { id }.abi_encode())),
				data: None,
			},
			..Default::default()
		};

		let bytes = self.provider.call(&request).await.map_err(|e| {
			// A provider revert means "no price for this identifier";
			// anything else is transport trouble.
			match e.as_error_resp() {
				Some(payload) => FeedError::NoPriceAvailable(payload.message.to_string()),
				None => FeedError::Connection(e.to_string()),
			}
		})?;

		let returned = IPyth::getPriceCall::abi_decode_returns(&bytes, true)
			.map_err(|e| FeedError::NoPriceAvailable(format!("undecodable price: {}", e)))?;

		let quote = quote_from_price(&returned.price);
		debug!(
			feed_id = %feed_id,
			magnitude = quote.magnitude,
			exponent = quote.exponent,
			"provider quote"
		);
		Ok(quote)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;

	fn price(value: i64, expo: i32) -> Price {
		Price {
			price: value,
			conf: 0,
			expo,
			publishTime: U256::ZERO,
		}
	}

	#[test]
	fn magnitude_and_exponent_pass_through() {
		let quote = quote_from_price(&price(150_000_000, -8));
		assert_eq!(quote, RawQuote::new(150_000_000, -8));

		let quote = quote_from_price(&price(42, 2));
		assert_eq!(quote, RawQuote::new(42, 2));
	}

	#[test]
	fn non_positive_magnitudes_are_preserved_for_the_converter() {
		// The fetcher reports what the provider said; rejection happens
		// during pip conversion.
		let quote = quote_from_price(&price(-5, -8));
		assert_eq!(quote, RawQuote::new(-5, -8));
	}

	#[tokio::test]
	async fn address_feed_ids_are_rejected_before_any_call() {
		let contract: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
		let fetcher = PythFetcher::new("http://localhost:1", &contract).unwrap();

		let feed_id = FeedId::Address(contract);
		let result = fetcher.fetch(&feed_id).await;
		assert_eq!(result, Err(FeedError::UnsupportedFeedId(feed_id)));
	}
}
