//! Configuration loading for the oracle service.
//!
//! Configuration is a TOML file with `${VAR}` environment substitution
//! applied before parsing, then validated field by field. Any failure
//! aborts the whole load; a service never starts on a partially valid
//! configuration.

use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod types;

pub use types::{OracleConfig, OracleSettings, ProviderConfig, ProviderKind, RegistryConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("configuration file not found: {0}")]
	FileNotFound(String),
	#[error("failed to parse configuration: {0}")]
	Parse(String),
	#[error("invalid configuration: {0}")]
	Validation(String),
	#[error("environment variable not set: {0}")]
	EnvVarNotFound(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Loads and validates an [`OracleConfig`] from disk.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub async fn load(&self) -> Result<OracleConfig, ConfigError> {
		let path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("no configuration file specified".to_string())
		})?;
		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}

		let content = tokio::fs::read_to_string(path).await?;
		let substituted = substitute_env_vars(&content)?;

		let config: OracleConfig =
			toml::from_str(&substituted).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;

		Ok(config)
	}
}

/// Replaces `${VAR_NAME}` occurrences with the matching environment
/// variable; a missing variable fails the load.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let pattern = Regex::new(r"\$\{([^}]+)\}").unwrap();

	let mut result = content.to_string();
	for capture in pattern.captures_iter(content) {
		let full_match = &capture[0];
		let var_name = &capture[1];

		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(full_match, &value);
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	const VALID: &str = r#"
		[oracle]
		name = "pip-oracle"

		[provider]
		kind = "chainlink"
		rpc_url = "https://rpc.example.com"

		[registry]
		admin = "0x00000000000000000000000000000000000000aa"
		symbols = ["ETH"]
		feeds = ["0x00000000000000000000000000000000000000ff"]
	"#;

	#[tokio::test]
	async fn loads_a_valid_file() {
		let file = write_config(VALID);

		let config = ConfigLoader::new().with_file(file.path()).load().await.unwrap();
		assert_eq!(config.oracle.name, "pip-oracle");
		assert_eq!(config.registry.symbols, ["ETH"]);
	}

	#[tokio::test]
	async fn missing_file_is_reported_as_such() {
		let result = ConfigLoader::new()
			.with_file("/nonexistent/oracle.toml")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}

	#[tokio::test]
	async fn unparseable_toml_fails() {
		let file = write_config("not toml at all [");

		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn substitutes_environment_variables() {
		env::set_var("ORACLE_TEST_RPC", "https://rpc.example.com");

		let substituted =
			substitute_env_vars("rpc_url = \"${ORACLE_TEST_RPC}\"").unwrap();
		assert_eq!(substituted, "rpc_url = \"https://rpc.example.com\"");
	}

	#[test]
	fn missing_environment_variable_fails() {
		let result = substitute_env_vars("rpc_url = \"${ORACLE_TEST_UNSET_VAR}\"");
		assert!(matches!(result, Err(ConfigError::EnvVarNotFound(_))));
	}

	#[test]
	fn content_without_placeholders_is_untouched() {
		let substituted = substitute_env_vars(VALID).unwrap();
		assert_eq!(substituted, VALID);
	}
}
