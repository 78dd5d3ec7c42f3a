//! Bijective symbol ↔ feed-identifier mapping.

use crate::{AdminPolicy, RegistryError};
use oracle_types::{Address, FeedId};
use std::collections::HashMap;

/// Add-only registry binding each symbol to exactly one feed identifier and
/// vice versa.
///
/// Both directions are held in lockstep: a single successful insert
/// materializes the forward and reverse entry together, and a failed insert
/// leaves neither behind. The struct itself is single-threaded; callers that
/// share it across tasks serialize mutation externally.
pub struct SymbolRegistry {
	policy: Box<dyn AdminPolicy>,
	by_symbol: HashMap<String, FeedId>,
	by_feed: HashMap<FeedId, String>,
}

impl SymbolRegistry {
	/// Creates an empty registry guarded by the given policy.
	pub fn new(policy: Box<dyn AdminPolicy>) -> Self {
		Self {
			policy,
			by_symbol: HashMap::new(),
			by_feed: HashMap::new(),
		}
	}

	/// Bulk construction from parallel symbol / feed-identifier sequences.
	///
	/// Fails with [`RegistryError::LengthMismatch`] before any entry is
	/// created when the sequences differ in length; any per-entry failure
	/// aborts the whole construction.
	pub fn with_entries(
		policy: Box<dyn AdminPolicy>,
		symbols: Vec<String>,
		feed_ids: Vec<FeedId>,
	) -> Result<Self, RegistryError> {
		if symbols.len() != feed_ids.len() {
			return Err(RegistryError::LengthMismatch {
				symbols: symbols.len(),
				feeds: feed_ids.len(),
			});
		}

		let mut registry = Self::new(policy);
		for (symbol, feed_id) in symbols.into_iter().zip(feed_ids) {
			registry.insert_checked(symbol, feed_id)?;
		}
		Ok(registry)
	}

	/// Admin-gated post-construction insert.
	pub fn add(
		&mut self,
		caller: &Address,
		symbol: String,
		feed_id: FeedId,
	) -> Result<(), RegistryError> {
		if !self.policy.is_admin(caller) {
			return Err(RegistryError::Unauthorized);
		}
		self.insert_checked(symbol, feed_id)
	}

	fn insert_checked(&mut self, symbol: String, feed_id: FeedId) -> Result<(), RegistryError> {
		if symbol.is_empty() {
			return Err(RegistryError::EmptySymbol);
		}
		if feed_id.is_zero() {
			return Err(RegistryError::ZeroFeedId);
		}
		if self.by_symbol.contains_key(&symbol) {
			return Err(RegistryError::DuplicateSymbol(symbol));
		}
		if self.by_feed.contains_key(&feed_id) {
			return Err(RegistryError::DuplicateFeedId(feed_id));
		}

		// All checks passed; both directions land together.
		self.by_feed.insert(feed_id.clone(), symbol.clone());
		self.by_symbol.insert(symbol, feed_id);
		Ok(())
	}

	/// Resolves a symbol to its feed identifier.
	pub fn feed_id(&self, symbol: &str) -> Result<&FeedId, RegistryError> {
		self.by_symbol
			.get(symbol)
			.ok_or_else(|| RegistryError::UnknownSymbol(symbol.to_string()))
	}

	/// Reverse lookup: the symbol bound to a feed identifier, if any.
	pub fn symbol_for(&self, feed_id: &FeedId) -> Option<&str> {
		self.by_feed.get(feed_id).map(String::as_str)
	}

	/// Iterates over every registered (symbol, feed identifier) pair.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &FeedId)> {
		self.by_symbol
			.iter()
			.map(|(symbol, feed_id)| (symbol.as_str(), feed_id))
	}

	pub fn len(&self) -> usize {
		self.by_symbol.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_symbol.is_empty()
	}
}
