//! The public-facing price adapter.

use crate::{AdapterError, PriceSource};
use async_trait::async_trait;
use oracle_feeds::PriceFetcher;
use oracle_registry::SymbolRegistry;
use oracle_types::{Address, FeedId, Pips};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Oracle adapter: registry resolution, provider fetch and pip conversion
/// behind one entry point.
///
/// The adapter holds no per-call state: every `load_price` resolves, fetches
/// and converts from scratch, so concurrent calls never interfere. Registry
/// mutation is the only write path and is serialized through the lock.
pub struct PriceAdapter {
	registry: RwLock<SymbolRegistry>,
	fetcher: Arc<dyn PriceFetcher>,
}

impl PriceAdapter {
	pub fn new(registry: SymbolRegistry, fetcher: Arc<dyn PriceFetcher>) -> Self {
		Self {
			registry: RwLock::new(registry),
			fetcher,
		}
	}

	/// Admin-gated registration of a new symbol binding.
	pub async fn add_symbol(
		&self,
		caller: &Address,
		symbol: String,
		feed_id: FeedId,
	) -> Result<(), AdapterError> {
		let mut registry = self.registry.write().await;
		registry.add(caller, symbol.clone(), feed_id.clone())?;
		info!(symbol, feed_id = %feed_id, "registered symbol");
		Ok(())
	}

	/// The feed identifier bound to a symbol, if any.
	pub async fn feed_id_for(&self, symbol: &str) -> Option<FeedId> {
		self.registry.read().await.feed_id(symbol).ok().cloned()
	}

	/// The symbol bound to a feed identifier, if any.
	pub async fn symbol_for(&self, feed_id: &FeedId) -> Option<String> {
		self.registry
			.read()
			.await
			.symbol_for(feed_id)
			.map(str::to_string)
	}

	/// Snapshot of every registered binding, for external audit.
	pub async fn entries(&self) -> Vec<(String, FeedId)> {
		self.registry
			.read()
			.await
			.entries()
			.map(|(symbol, feed_id)| (symbol.to_string(), feed_id.clone()))
			.collect()
	}
}

#[async_trait]
impl PriceSource for PriceAdapter {
	async fn load_price(&self, symbol: &str) -> Result<Pips, AdapterError> {
		// Clone the resolved identifier so no lock is held across
		// provider I/O.
		let feed_id = {
			let registry = self.registry.read().await;
			registry.feed_id(symbol)?.clone()
		};

		let quote = self.fetcher.fetch(&feed_id).await?;
		let price = Pips::from_quote(&quote)?;

		// A positive quote can still floor-divide to zero; reporting that
		// as a valid price would mislead the consumer.
		if price.is_zero() {
			return Err(AdapterError::ZeroPrice {
				symbol: symbol.to_string(),
			});
		}

		debug!(
			symbol,
			provider = self.fetcher.name(),
			price = %price,
			"loaded price"
		);
		Ok(price)
	}

	fn set_active(&self, consumer: &Address) {
		// Stateless adapter: nothing to initialize when the exchange
		// promotes this source.
		info!(consumer = %consumer, "marked active by consumer");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use oracle_feeds::FeedError;
	use oracle_registry::{RegistryError, SingleAdmin};
	use oracle_types::{PipError, RawQuote};

	const ADMIN: Address = Address([0xaa; 20]);

	struct StaticFetcher(RawQuote);

	#[async_trait]
	impl PriceFetcher for StaticFetcher {
		fn name(&self) -> &str {
			"static"
		}

		async fn fetch(&self, _feed_id: &FeedId) -> Result<RawQuote, FeedError> {
			Ok(self.0)
		}
	}

	struct StaleFetcher;

	#[async_trait]
	impl PriceFetcher for StaleFetcher {
		fn name(&self) -> &str {
			"stale"
		}

		async fn fetch(&self, _feed_id: &FeedId) -> Result<RawQuote, FeedError> {
			Err(FeedError::StaleOrMissingAnswer)
		}
	}

	fn feed(tag: u8) -> FeedId {
		let mut raw = [0u8; 20];
		raw[19] = tag;
		FeedId::Address(Address(raw))
	}

	fn adapter_with(symbol: &str, fetcher: Arc<dyn PriceFetcher>) -> PriceAdapter {
		let registry = SymbolRegistry::with_entries(
			Box::new(SingleAdmin::new(ADMIN)),
			vec![symbol.to_string()],
			vec![feed(1)],
		)
		.unwrap();
		PriceAdapter::new(registry, fetcher)
	}

	#[tokio::test]
	async fn loads_a_registered_price() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(150_000_000, -8))));

		let price = adapter.load_price("ETH").await.unwrap();
		assert_eq!(price, Pips(150_000_000));
	}

	#[tokio::test]
	async fn unknown_symbols_fail_instead_of_defaulting() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(1, -8))));

		let result = adapter.load_price("DOGE").await;
		assert!(matches!(
			result,
			Err(AdapterError::Registry(RegistryError::UnknownSymbol(_)))
		));
	}

	#[tokio::test]
	async fn fetcher_failures_propagate() {
		let adapter = adapter_with("ETH", Arc::new(StaleFetcher));

		let result = adapter.load_price("ETH").await;
		assert!(matches!(
			result,
			Err(AdapterError::Feed(FeedError::StaleOrMissingAnswer))
		));
	}

	#[tokio::test]
	async fn non_positive_quotes_fail_conversion() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(-1, -8))));

		let result = adapter.load_price("ETH").await;
		assert!(matches!(
			result,
			Err(AdapterError::Conversion(PipError::NonPositiveMagnitude))
		));
	}

	#[tokio::test]
	async fn full_truncation_is_reported_as_zero_price() {
		// One unit at eighteen decimals is far below one pip.
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(1, -18))));

		let result = adapter.load_price("ETH").await;
		assert!(matches!(result, Err(AdapterError::ZeroPrice { .. })));
	}

	#[tokio::test]
	async fn activation_is_not_a_precondition() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(2, 0))));

		// Works before activation.
		assert!(adapter.load_price("ETH").await.is_ok());

		// And activation changes nothing about subsequent reads.
		adapter.set_active(&Address([0xcc; 20]));
		assert_eq!(
			adapter.load_price("ETH").await.unwrap(),
			Pips(200_000_000)
		);
	}

	#[tokio::test]
	async fn admin_can_extend_the_registry_at_runtime() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(5, 0))));

		adapter
			.add_symbol(&ADMIN, "BTC".into(), feed(2))
			.await
			.unwrap();

		assert_eq!(adapter.load_price("BTC").await.unwrap(), Pips(500_000_000));
		assert_eq!(adapter.feed_id_for("BTC").await, Some(feed(2)));
		assert_eq!(adapter.symbol_for(&feed(2)).await, Some("BTC".into()));
	}

	#[tokio::test]
	async fn non_admin_mutation_is_rejected() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(5, 0))));

		let result = adapter
			.add_symbol(&Address([0xbb; 20]), "BTC".into(), feed(2))
			.await;
		assert!(matches!(
			result,
			Err(AdapterError::Registry(RegistryError::Unauthorized))
		));
		assert_eq!(adapter.feed_id_for("BTC").await, None);
	}

	#[tokio::test]
	async fn entries_snapshot_covers_both_directions() {
		let adapter = adapter_with("ETH", Arc::new(StaticFetcher(RawQuote::new(1, 0))));

		let entries = adapter.entries().await;
		assert_eq!(entries, vec![("ETH".to_string(), feed(1))]);
	}
}
