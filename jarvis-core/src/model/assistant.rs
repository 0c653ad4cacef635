use std::fmt;

use crate::config::ChatConfig;
use crate::corpus::build_corpus;
use crate::error::Result;

use super::markov_chain::{DEFAULT_MAX_TOKENS, MarkovChain};
use super::rules::Rules;
use super::selector::{RandomSelector, Selector};

/// Inputs that end an interactive session.
pub const EXIT_COMMANDS: [&str; 3] = ["sair", "exit", "quit"];

/// Returns `true` if `input` asks to end the conversation.
pub fn is_exit_command(input: &str) -> bool {
	let input = input.trim().to_lowercase();
	EXIT_COMMANDS.contains(&input.as_str())
}

/// Reply produced by the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<'a> {
	/// Canned reply of a matched keyword.
	Rule(&'a str),
	/// Continuation generated by the Markov chain (or its fallback).
	Generated(String),
}

impl Reply<'_> {
	/// Printable text of the reply.
	pub fn text(&self) -> &str {
		match self {
			Reply::Rule(text) => text,
			Reply::Generated(text) => text,
		}
	}
}

impl fmt::Display for Reply<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.text())
	}
}

/// Conversation policy: keyword rules first, Markov generation otherwise.
///
/// # Responsibilities
/// - Own the trained chain and the rule table
/// - Answer user input
/// - Replace the chain when new training data arrives
#[derive(Debug, Clone)]
pub struct Assistant {
	chain: MarkovChain,
	rules: Rules,
	max_tokens: usize,
}

impl Assistant {
	/// Creates an assistant with the default generation length.
	pub fn new(chain: MarkovChain, rules: Rules) -> Self {
		Self { chain, rules, max_tokens: DEFAULT_MAX_TOKENS }
	}

	/// Overrides the maximum number of generated tokens.
	#[must_use]
	pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
		self.max_tokens = max_tokens;
		self
	}

	/// Builds an assistant from a configuration plus extra training samples.
	///
	/// The corpus is the configured sentences followed by `samples`, cleaned
	/// by `build_corpus` (so it falls back to the default corpus when empty).
	///
	/// # Errors
	/// Returns an error if the configuration does not validate.
	pub fn from_config<I, S>(config: &ChatConfig, samples: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		config.validate()?;
		let extra: Vec<String> = samples.into_iter().map(|s| s.as_ref().to_owned()).collect();
		let corpus = build_corpus(config.corpus.iter().chain(extra.iter()));
		let chain = MarkovChain::from_corpus(&corpus);
		Ok(Self::new(chain, config.rules()?).with_max_tokens(config.max_tokens))
	}

	/// Answers `input` using the thread-local generator.
	pub fn respond(&self, input: &str) -> Reply<'_> {
		self.respond_with(input, &mut RandomSelector::thread())
	}

	/// Answers `input` with an explicit selector.
	pub fn respond_with<S: Selector + ?Sized>(&self, input: &str, selector: &mut S) -> Reply<'_> {
		if let Some(reply) = self.rules.lookup(input) {
			log::debug!("rule matched for {input:?}");
			return Reply::Rule(reply);
		}
		Reply::Generated(self.chain.generate_with(input, self.max_tokens, selector))
	}

	/// Replaces the chain by one trained on `samples`.
	///
	/// The previous table is dropped, never updated in place.
	pub fn retrain<I, S>(&mut self, samples: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.chain = MarkovChain::from_corpus(build_corpus(samples));
	}

	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	pub fn rules(&self) -> &Rules {
		&self.rules
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::DEFAULT_CORPUS;
	use crate::model::markov_chain::{FALLBACK_REPLY, Token};

	struct First;

	impl Selector for First {
		fn select<'a>(&mut self, options: &'a [Token]) -> &'a Token {
			&options[0]
		}
	}

	fn assistant(corpus: &[&str]) -> Assistant {
		Assistant::new(MarkovChain::from_corpus(corpus), Rules::default())
	}

	#[test]
	fn rules_take_precedence_over_generation() {
		// the chain could continue "oi", but the rule wins
		let assistant = assistant(&["oi tudo bem"]);
		assert_eq!(
			assistant.respond_with("oi", &mut First),
			Reply::Rule("Olá, eu sou o JARViS. Em que posso ajudar?")
		);
	}

	#[test]
	fn generates_when_no_rule_matches() {
		let assistant = assistant(&["eu sou o jarvis"]);
		assert_eq!(assistant.respond_with("eu", &mut First), Reply::Generated("sou o jarvis".to_owned()));
		assert_eq!(assistant.respond_with("ninguém", &mut First).text(), FALLBACK_REPLY);
	}

	#[test]
	fn max_tokens_limits_replies() {
		let assistant = assistant(&["eu sou o jarvis"]).with_max_tokens(2);
		assert_eq!(assistant.respond_with("eu", &mut First).to_string(), "sou o");
	}

	#[test]
	fn retrain_replaces_the_chain() {
		let mut assistant = assistant(&["eu sou o jarvis"]);
		assistant.retrain(["você é o senhor"]);
		assert_eq!(assistant.chain().sentence_count(), 1);
		assert_eq!(assistant.respond_with("eu", &mut First).text(), FALLBACK_REPLY);
		assert_eq!(assistant.respond_with("você", &mut First).text(), "é o senhor");

		assistant.retrain(["  "]);
		assert_eq!(assistant.chain(), &MarkovChain::from_corpus(DEFAULT_CORPUS));
	}

	#[test]
	fn from_config_merges_configured_and_extra_samples() {
		let config = ChatConfig { corpus: vec!["a b c".to_owned()], ..ChatConfig::default() };
		let assistant = Assistant::from_config(&config, ["d e f"]).unwrap();
		assert_eq!(assistant.chain().sentence_count(), 2);
		assert_eq!(assistant.max_tokens(), DEFAULT_MAX_TOKENS);

		let empty = Assistant::from_config(&ChatConfig::default(), Vec::<String>::new()).unwrap();
		assert_eq!(empty.chain().sentence_count(), DEFAULT_CORPUS.len());
		assert_eq!(empty.rules(), &Rules::default());
	}

	#[test]
	fn recognises_exit_commands() {
		assert!(is_exit_command("sair"));
		assert!(is_exit_command("  QUIT "));
		assert!(is_exit_command("Exit"));
		assert!(!is_exit_command("sair agora"));
		assert!(!is_exit_command(""));
	}
}
