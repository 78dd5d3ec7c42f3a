//! Raw provider quote.

/// A quote as reported by an upstream feed, before normalization.
///
/// The real price is `magnitude * 10^exponent`. Both components are signed:
/// aggregator-style providers report a positive decimal count (stored here
/// as a negative exponent) while opaque-id providers hand back a signed
/// exponent directly. Quotes are read fresh on every request and never
/// cached by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawQuote {
	pub magnitude: i128,
	pub exponent: i32,
}

impl RawQuote {
	pub fn new(magnitude: i128, exponent: i32) -> Self {
		Self {
			magnitude,
			exponent,
		}
	}
}
