//! Configuration shared by the front-ends.
//!
//! ```toml
//! max_tokens = 20
//! corpus = ["Olá, senhor.", "Posso gerar frases."]
//!
//! [rules]
//! oi = "Olá!"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ChatError, Result};
use crate::model::markov_chain::DEFAULT_MAX_TOKENS;
use crate::model::rules::{DEFAULT_RULES, Rules};

/// Assistant configuration, usually read from a TOML file.
///
/// Every field is optional in the file; missing ones take their
/// `ChatConfig::default` value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
	/// Maximum number of tokens generated per reply.
	pub max_tokens: usize,
	/// Training sentences added before the command line ones.
	pub corpus: Vec<String>,
	/// Keyword -> canned reply. Replaces the built-in table entirely.
	pub rules: BTreeMap<String, String>,
}

impl ChatConfig {
	/// Reads and validates a configuration file.
	///
	/// # Errors
	/// - `ChatError::Io` if the file cannot be read
	/// - `ChatError::Config` if it is not valid TOML for this structure
	/// - `ChatError::InvalidConfig` if validation fails
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path).map_err(|e| ChatError::io(e, path))?;
		let config: Self = toml::from_str(&contents)?;
		config.validate()?;
		log::debug!("loaded configuration from {}", path.display());
		Ok(config)
	}

	/// Validates the invariants required by the assistant.
	pub fn validate(&self) -> Result<()> {
		if self.max_tokens == 0 {
			return Err(ChatError::InvalidConfig("max_tokens must be greater than zero".into()));
		}
		self.rules()?;
		Ok(())
	}

	/// Builds the rule table described by this configuration.
	pub fn rules(&self) -> Result<Rules> {
		Rules::new(&self.rules)
	}
}

impl Default for ChatConfig {
	fn default() -> Self {
		Self {
			max_tokens: DEFAULT_MAX_TOKENS,
			corpus: Vec::new(),
			rules: DEFAULT_RULES
				.iter()
				.map(|(keyword, reply)| ((*keyword).to_owned(), (*reply).to_owned()))
				.collect(),
		}
	}
}
