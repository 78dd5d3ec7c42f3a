//! Canonical fixed-point price unit.

use crate::quote::RawQuote;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Decimal places of the canonical price unit: one pip is 10^-8 of the
/// quote asset.
pub const PIP_DECIMALS: u32 = 8;

const PIP_SCALE: u64 = 100_000_000;

/// Errors produced when normalizing a raw quote into pips.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PipError {
	#[error("quote magnitude must be strictly positive")]
	NonPositiveMagnitude,
	#[error("quote does not fit into a 64-bit pip price")]
	Overflow,
}

/// Price in pips.
///
/// Strictly positive whenever produced by the adapter; the zero value is
/// representable here only so intermediate truncation results can be
/// inspected before the adapter's final guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pips(pub u64);

impl Pips {
	/// Normalize a raw quote into pips.
	///
	/// The decimal point moves by `exponent + 8`. A non-negative shift
	/// multiplies by the matching power of ten with checked arithmetic; a
	/// negative shift divides with integer floor division, discarding
	/// sub-pip precision. The floor is part of the contract: callers
	/// depending on this conversion expect truncation toward zero, not
	/// rounding.
	pub fn from_quote(quote: &RawQuote) -> Result<Self, PipError> {
		if quote.magnitude <= 0 {
			return Err(PipError::NonPositiveMagnitude);
		}
		let magnitude = quote.magnitude as u128;

		let shift = quote.exponent + PIP_DECIMALS as i32;
		let value = if shift >= 0 {
			let scale = 10u128
				.checked_pow(shift as u32)
				.ok_or(PipError::Overflow)?;
			magnitude.checked_mul(scale).ok_or(PipError::Overflow)?
		} else {
			// A divisor too large for u128 floors any magnitude to zero.
			match 10u128.checked_pow(shift.unsigned_abs()) {
				Some(scale) => magnitude / scale,
				None => 0,
			}
		};

		u64::try_from(value).map(Pips).map_err(|_| PipError::Overflow)
	}

	pub fn value(&self) -> u64 {
		self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0 == 0
	}
}

impl fmt::Display for Pips {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{:08}", self.0 / PIP_SCALE, self.0 % PIP_SCALE)
	}
}
