use std::sync::LazyLock;

use regex::Regex;

/// A word run (`\w` is Unicode-aware) or a single non-space, non-word character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").unwrap());

/// Whitespace in front of the punctuation marks tightened by `detokenize`.
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").unwrap());

/// Splits `text` into lowercase tokens.
///
/// Each token is either a maximal run of word characters (letters, including
/// accented ones, digits, underscore) or exactly one punctuation/symbol
/// character. Whitespace only separates tokens.
///
/// ```
/// use jarvis_core::model::tokenizer::tokenize;
///
/// assert_eq!(tokenize("Olá, mundo!"), ["olá", ",", "mundo", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	TOKEN_RE
		.find_iter(&lowered)
		.map(|m| m.as_str().to_owned())
		.collect()
}

/// Joins tokens back into text.
///
/// Tokens are separated by a single space, then the space before
/// `. , ! ? ; :` is removed. Not an exact inverse of `tokenize`.
pub fn detokenize<I, S>(tokens: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let joined = tokens
		.into_iter()
		.map(|t| t.as_ref().to_owned())
		.collect::<Vec<_>>()
		.join(" ");
	SPACE_BEFORE_PUNCT_RE.replace_all(&joined, "$1").into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_input_has_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("  \t\n ").is_empty());
	}

	#[test]
	fn lowercases_and_splits_punctuation() {
		assert_eq!(tokenize("Olá, mundo!"), vec!["olá", ",", "mundo", "!"]);
	}

	#[test]
	fn keeps_accented_words_whole() {
		assert_eq!(
			tokenize("Você AINDA não ensinou ação_2?"),
			vec!["você", "ainda", "não", "ensinou", "ação_2", "?"]
		);
	}

	#[test]
	fn every_symbol_is_its_own_token() {
		assert_eq!(tokenize("...<start>"), vec![".", ".", ".", "<", "start", ">"]);
	}

	#[test]
	fn tightens_space_before_punctuation() {
		assert_eq!(detokenize(["hello", ",", "world", "!"]), "hello, world!");
		assert_eq!(detokenize(["a", ";", "b", ":", "c", "?", "."]), "a; b: c?.");
	}

	#[test]
	fn other_symbols_keep_their_space() {
		assert_eq!(detokenize(["(", "oi", ")", "-", "ok"]), "( oi ) - ok");
	}

	#[test]
	fn detokenize_of_nothing_is_empty() {
		assert_eq!(detokenize(Vec::<String>::new()), "");
	}
}
