use std::collections::HashMap;

use crate::error::{ChatError, Result};

use super::tokenizer::tokenize;

/// Built-in keyword table.
pub const DEFAULT_RULES: [(&str, &str); 5] = [
	("oi", "Olá, eu sou o JARViS. Em que posso ajudar?"),
	("ola", "Olá, eu sou o JARViS. Em que posso ajudar?"),
	("jarvis", "JARViS online. Aguardando comandos."),
	("ajuda", "Sou o JARViS. Posso conversar e gerar respostas com base no texto de treino."),
	("tchau", "Até logo. JARViS encerrando."),
];

/// Immutable mapping from a single keyword token to a canned reply.
///
/// # Invariants
/// - Keywords are lowercase and tokenize to exactly one token
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
	replies: HashMap<String, String>,
}

impl Rules {
	/// Builds a rule table from `(keyword, reply)` pairs.
	///
	/// Keywords are case-folded. A later duplicate keyword replaces the
	/// earlier reply.
	///
	/// # Errors
	/// Returns `ChatError::InvalidConfig` if a keyword is not exactly one token
	/// (it could never match tokenized input).
	pub fn new<I, K, V>(rules: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut replies = HashMap::new();
		for (keyword, reply) in rules {
			let keyword = keyword.as_ref();
			let key = match tokenize(keyword).as_slice() {
				[single] => single.clone(),
				_ => {
					return Err(ChatError::InvalidConfig(format!(
						"rule keyword {keyword:?} must be a single word or symbol"
					)));
				}
			};
			replies.insert(key, reply.into());
		}
		Ok(Self { replies })
	}

	/// Returns the reply of the first input token that is a keyword.
	///
	/// Tokens are inspected in input order, so `"tchau jarvis"` answers
	/// with the `tchau` rule.
	pub fn lookup(&self, text: &str) -> Option<&str> {
		tokenize(text)
			.iter()
			.find_map(|token| self.replies.get(token))
			.map(String::as_str)
	}

	/// Number of keywords.
	pub fn len(&self) -> usize {
		self.replies.len()
	}

	/// `true` if no keyword is defined.
	pub fn is_empty(&self) -> bool {
		self.replies.is_empty()
	}
}

impl Default for Rules {
	fn default() -> Self {
		Self {
			replies: DEFAULT_RULES
				.iter()
				.map(|(keyword, reply)| ((*keyword).to_owned(), (*reply).to_owned()))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyword_anywhere_in_input_matches() {
		let rules = Rules::default();
		assert_eq!(rules.lookup("Oi!"), Some("Olá, eu sou o JARViS. Em que posso ajudar?"));
		assert_eq!(rules.lookup("preciso de AJUDA, por favor"), Some(DEFAULT_RULES[3].1));
	}

	#[test]
	fn first_keyword_in_input_order_wins() {
		let rules = Rules::default();
		assert_eq!(rules.lookup("tchau jarvis"), Some("Até logo. JARViS encerrando."));
		assert_eq!(rules.lookup("jarvis, tchau"), Some("JARViS online. Aguardando comandos."));
	}

	#[test]
	fn keywords_match_whole_tokens_only() {
		let rules = Rules::default();
		assert_eq!(rules.lookup("oitenta ajudantes"), None);
		assert_eq!(rules.lookup(""), None);
		// accented form is a different token
		assert_eq!(rules.lookup("olá"), None);
	}

	#[test]
	fn custom_keywords_are_case_folded() {
		let rules = Rules::new([("Bom", "Bom mesmo."), ("?", "Pergunta?")]).unwrap();
		assert_eq!(rules.len(), 2);
		assert_eq!(rules.lookup("BOM dia"), Some("Bom mesmo."));
		assert_eq!(rules.lookup("quem?"), Some("Pergunta?"));
	}

	#[test]
	fn multi_token_keyword_is_rejected() {
		assert!(matches!(Rules::new([("bom dia", "Olá")]), Err(ChatError::InvalidConfig(_))));
		assert!(matches!(Rules::new([("", "nada")]), Err(ChatError::InvalidConfig(_))));
	}
}
