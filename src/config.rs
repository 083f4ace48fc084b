//! User configuration for the replay driver, read from an optional JSON file.

use std::path::Path;

use serde::Deserialize;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
	pub unknown_names: UnknownNames,
	/// One of `trace`, `debug`, `info`, `warn`, `error`.
	pub log_level: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			unknown_names: UnknownNames::default(),
			log_level: "info".to_string(),
		}
	}
}

/// What to report when a trace resolves a name that was never defined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownNames {
	/// Report whatever [`crate::SymbolTable::kind_of`] says, i.e. `FIELD`.
	#[default]
	AliasField,
	Reject,
}

impl Config {
	pub fn from_json(text: &str) -> Result<Self, Error> {
		Ok(serde_json::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, Error> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json(&text)
	}

	pub fn log_level(&self) -> Result<tracing::Level, Error> {
		self.log_level.parse().map_err(|err| Error::Process {
			source: Some(Box::new(err)),
			ctx: format!("invalid log level `{}`", self.log_level),
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn defaults() {
		let cfg = Config::from_json("{}").unwrap();
		assert_eq!(cfg, Config::default());
		assert_eq!(cfg.unknown_names, UnknownNames::AliasField);
		assert_eq!(cfg.log_level().unwrap(), tracing::Level::INFO);
	}

	#[test]
	fn camel_case_keys() {
		let cfg = Config::from_json(r#"{ "unknownNames": "reject", "logLevel": "debug" }"#)
			.unwrap();
		assert_eq!(cfg.unknown_names, UnknownNames::Reject);
		assert_eq!(cfg.log_level().unwrap(), tracing::Level::DEBUG);
	}

	#[test]
	fn malformed() {
		assert!(Config::from_json(r#"{ "unknownNames": "ignore" }"#).is_err());
		assert!(Config::from_json(r#"{ "loadOrder": [] }"#).is_err());

		let cfg = Config {
			log_level: "loud".to_string(),
			..Default::default()
		};
		assert!(cfg.log_level().is_err());
	}
}
