//! Feed identifier types.
//!
//! Upstream providers address their feeds in two shapes: a per-symbol
//! contract address (aggregator-style) or an opaque 32-byte identifier
//! (price-id-style). Both are stored as raw bytes and rendered as 0x-prefixed
//! hex; the hex length picks the shape when parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing an identifier from its hex form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
	#[error("invalid hex: {0}")]
	InvalidHex(String),
	#[error("expected a 20 or 32 byte identifier, got {0} bytes")]
	InvalidLength(usize),
}

/// A 20-byte contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
	/// The all-zero address, never a valid feed target.
	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|byte| *byte == 0)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl FromStr for Address {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(digits).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
		if bytes.len() != 20 {
			return Err(ParseIdError::InvalidLength(bytes.len()));
		}
		let mut raw = [0u8; 20];
		raw.copy_from_slice(&bytes);
		Ok(Self(raw))
	}
}

/// A 32-byte opaque feed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceId(pub [u8; 32]);

impl PriceId {
	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|byte| *byte == 0)
	}
}

impl fmt::Display for PriceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl FromStr for PriceId {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(digits).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
		if bytes.len() != 32 {
			return Err(ParseIdError::InvalidLength(bytes.len()));
		}
		let mut raw = [0u8; 32];
		raw.copy_from_slice(&bytes);
		Ok(Self(raw))
	}
}

/// Opaque handle addressing one upstream price feed.
///
/// The registry and adapter treat this as a single opaque key; only the
/// provider-specific fetcher cares which shape it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedId {
	/// Aggregator-style: one contract per symbol.
	Address(Address),
	/// Opaque-id-style: all feeds behind one provider contract.
	PriceId(PriceId),
}

impl FeedId {
	/// The zero value of either shape is never a valid feed handle.
	pub fn is_zero(&self) -> bool {
		match self {
			FeedId::Address(address) => address.is_zero(),
			FeedId::PriceId(price_id) => price_id.is_zero(),
		}
	}
}

impl fmt::Display for FeedId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FeedId::Address(address) => address.fmt(f),
			FeedId::PriceId(price_id) => price_id.fmt(f),
		}
	}
}

impl FromStr for FeedId {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(digits).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
		match bytes.len() {
			20 => {
				let mut raw = [0u8; 20];
				raw.copy_from_slice(&bytes);
				Ok(FeedId::Address(Address(raw)))
			}
			32 => {
				let mut raw = [0u8; 32];
				raw.copy_from_slice(&bytes);
				Ok(FeedId::PriceId(PriceId(raw)))
			}
			other => Err(ParseIdError::InvalidLength(other)),
		}
	}
}

macro_rules! hex_string_serde {
	($type:ty) => {
		impl Serialize for $type {
			fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.collect_str(self)
			}
		}

		impl<'de> Deserialize<'de> for $type {
			fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				let value = String::deserialize(deserializer)?;
				value.parse().map_err(serde::de::Error::custom)
			}
		}
	};
}

hex_string_serde!(Address);
hex_string_serde!(PriceId);
hex_string_serde!(FeedId);
