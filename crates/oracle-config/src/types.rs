//! Configuration types for the oracle service.

use crate::ConfigError;
use oracle_types::{Address, FeedId};
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
	pub oracle: OracleSettings,
	pub provider: ProviderConfig,
	pub registry: RegistryConfig,
}

impl OracleConfig {
	/// Field-level validation.
	///
	/// Symbol/feed sequence lengths are deliberately not checked here:
	/// mismatches must surface from registry bulk construction so a bad
	/// deployment fails with the registry's own taxonomy.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.oracle.name.is_empty() {
			return Err(ConfigError::Validation(
				"oracle.name must not be empty".into(),
			));
		}

		let rpc_url = &self.provider.rpc_url;
		if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"provider.rpc_url must start with http:// or https://, got {}",
				rpc_url
			)));
		}

		if self.provider.kind == ProviderKind::Pyth {
			match &self.provider.contract {
				None => {
					return Err(ConfigError::Validation(
						"provider.contract is required for the pyth provider".into(),
					))
				}
				Some(contract) if contract.is_zero() => {
					return Err(ConfigError::Validation(
						"provider.contract must not be the zero address".into(),
					))
				}
				Some(_) => {}
			}
		}

		if self.registry.admin.is_zero() {
			return Err(ConfigError::Validation(
				"registry.admin must not be the zero address".into(),
			));
		}

		Ok(())
	}
}

/// Service-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleSettings {
	pub name: String,
	#[serde(default = "default_http_port")]
	pub http_port: u16,
}

fn default_http_port() -> u16 {
	8080
}

/// Which upstream provider shape this deployment reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
	Chainlink,
	Pyth,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
	pub kind: ProviderKind,
	pub rpc_url: String,
	/// Provider contract address. Required for [`ProviderKind::Pyth`],
	/// where every feed lives behind one contract; aggregator-style
	/// deployments address one contract per feed instead.
	pub contract: Option<Address>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
	/// The single address allowed to mutate the registry after startup.
	pub admin: Address,
	#[serde(default)]
	pub symbols: Vec<String>,
	/// Parallel to `symbols`; hex length picks the identifier shape.
	#[serde(default)]
	pub feeds: Vec<FeedId>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parsed(document: &str) -> OracleConfig {
		toml::from_str(document).unwrap()
	}

	fn valid_document() -> String {
		r#"
			[oracle]
			name = "pip-oracle"

			[provider]
			kind = "chainlink"
			rpc_url = "https://rpc.example.com"

			[registry]
			admin = "0x00000000000000000000000000000000000000aa"
			symbols = ["ETH"]
			feeds = ["0x00000000000000000000000000000000000000ff"]
		"#
		.to_string()
	}

	#[test]
	fn parses_a_full_document() {
		let config = parsed(&valid_document());

		assert_eq!(config.oracle.name, "pip-oracle");
		assert_eq!(config.oracle.http_port, 8080);
		assert_eq!(config.provider.kind, ProviderKind::Chainlink);
		assert_eq!(config.registry.symbols, ["ETH"]);
		assert!(matches!(config.registry.feeds[0], FeedId::Address(_)));
		assert!(config.validate().is_ok());
	}

	#[test]
	fn pyth_kind_parses_with_its_contract() {
		let config = parsed(
			r#"
				[oracle]
				name = "pip-oracle"
				http_port = 9090

				[provider]
				kind = "pyth"
				rpc_url = "https://rpc.example.com"
				contract = "0x00000000000000000000000000000000000000bb"

				[registry]
				admin = "0x00000000000000000000000000000000000000aa"
				symbols = ["ETH"]
				feeds = ["0xff00000000000000000000000000000000000000000000000000000000000001"]
			"#,
		);

		assert_eq!(config.oracle.http_port, 9090);
		assert_eq!(config.provider.kind, ProviderKind::Pyth);
		assert!(matches!(config.registry.feeds[0], FeedId::PriceId(_)));
		assert!(config.validate().is_ok());
	}

	#[test]
	fn pyth_without_contract_fails_validation() {
		let document = valid_document().replace("kind = \"chainlink\"", "kind = \"pyth\"");
		let config = parsed(&document);

		assert!(matches!(
			config.validate(),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn non_http_rpc_url_fails_validation() {
		let document =
			valid_document().replace("https://rpc.example.com", "wss://rpc.example.com");
		let config = parsed(&document);

		assert!(matches!(
			config.validate(),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn zero_admin_fails_validation() {
		let document = valid_document().replace(
			"0x00000000000000000000000000000000000000aa",
			"0x0000000000000000000000000000000000000000",
		);
		let config = parsed(&document);

		assert!(matches!(
			config.validate(),
			Err(ConfigError::Validation(_))
		));
	}
}
