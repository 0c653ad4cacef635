use std::collections::HashMap;
use std::iter;

use super::selector::{RandomSelector, Selector};
use super::tokenizer::{detokenize, tokenize};

/// Number of generated tokens after which a walk is cut off.
pub const DEFAULT_MAX_TOKENS: usize = 30;

/// Reply returned when the walk produced nothing.
pub const FALLBACK_REPLY: &str = "Ainda estou aprendendo. Pode reformular?";

/// A unit of the chain: the two sentence sentinels or a real text token.
///
/// Sentinels are distinct variants, so no tokenized text can ever be
/// mistaken for a sentence boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
	/// Sentence start marker (the chain pads every sentence with two).
	Start,
	/// Sentence end marker.
	End,
	/// Lowercase token produced by `tokenize`.
	Text(String),
}

impl Token {
	/// Returns the text of a real token, `None` for sentinels.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Token::Text(text) => Some(text),
			Token::Start | Token::End => None,
		}
	}
}

impl From<&str> for Token {
	fn from(text: &str) -> Self {
		Token::Text(text.to_owned())
	}
}

/// Two consecutive tokens used as a lookup key.
pub type Context = (Token, Token);

/// Second-order Markov chain over tokens.
///
/// The chain maps every context observed in the training corpus to the list
/// of tokens that followed it, duplicates included.
///
/// # Responsibilities
/// - Build the transition table from a corpus, once
/// - Walk the table from a seed to produce a bounded continuation
///
/// # Invariants
/// - Every key comes from a real trigram of a padded training sentence
/// - No key maps to an empty continuation list
/// - The table is never mutated after `from_corpus` returns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkovChain {
	/// Context -> continuations in insertion order.
	transitions: HashMap<Context, Vec<Token>>,

	/// Number of sentences the chain was trained on.
	sentences: usize,
}

impl MarkovChain {
	/// Trains a chain on `corpus`.
	///
	/// Each sentence is tokenized and padded as `[Start, Start, tokens.., End]`;
	/// every window of three tokens records "the first two are followed by the
	/// third". Sentences are independent: no context spans two of them.
	pub fn from_corpus<I, S>(corpus: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut chain = Self::default();
		for sentence in corpus {
			chain.add_sentence(sentence.as_ref());
		}
		log::debug!(
			"trained markov chain: {} sentences, {} contexts, {} observations",
			chain.sentences,
			chain.len(),
			chain.observation_count()
		);
		chain
	}

	/// Records the trigrams of one sentence. Only called while building.
	fn add_sentence(&mut self, sentence: &str) {
		let padded: Vec<Token> = iter::repeat_n(Token::Start, 2)
			.chain(tokenize(sentence).into_iter().map(Token::Text))
			.chain(iter::once(Token::End))
			.collect();

		for window in padded.windows(3) {
			let context = (window[0].clone(), window[1].clone());
			self.transitions.entry(context).or_default().push(window[2].clone());
		}
		self.sentences += 1;
	}

	/// Generates a continuation of `seed` using the thread-local generator.
	///
	/// Never fails and never returns an empty string: when the chain knows
	/// nothing about the seed, `FALLBACK_REPLY` is returned.
	pub fn generate(&self, seed: &str, max_tokens: usize) -> String {
		self.generate_with(seed, max_tokens, &mut RandomSelector::thread())
	}

	/// Same as `generate` with an explicit selector.
	pub fn generate_with<S: Selector + ?Sized>(&self, seed: &str, max_tokens: usize, selector: &mut S) -> String {
		let tokens = self.generate_tokens_with(seed, max_tokens, selector);
		if tokens.is_empty() {
			return FALLBACK_REPLY.to_owned();
		}
		detokenize(tokens)
	}

	/// Walks the table from the seed and returns the raw generated tokens.
	///
	/// # Behavior
	/// - The initial context is made of the last two seed tokens, padded on
	///   the left with `Start` when the seed has fewer than two
	/// - Stops on an unknown context, on `End`, or after `max_tokens` tokens
	/// - The result never contains sentinels and has at most `max_tokens` items
	pub fn generate_tokens_with<S: Selector + ?Sized>(
		&self,
		seed: &str,
		max_tokens: usize,
		selector: &mut S,
	) -> Vec<String> {
		let mut context = Self::initial_context(&tokenize(seed));

		let mut result = Vec::new();
		for _ in 0..max_tokens {
			let options = match self.continuations(&context) {
				Some(options) if !options.is_empty() => options,
				_ => {
					log::trace!("no continuation for {context:?}");
					break;
				}
			};

			// `Start` never follows a context, so only `End` stops here
			let Some(next) = selector.select(options).as_text() else {
				break;
			};

			result.push(next.to_owned());
			context = (context.1, Token::from(next));
		}
		result
	}

	/// Builds the first lookup key from the seed tokens.
	fn initial_context(seed: &[String]) -> Context {
		match seed {
			[] => (Token::Start, Token::Start),
			[only] => (Token::Start, Token::Text(only.clone())),
			[.., previous, last] => (Token::Text(previous.clone()), Token::Text(last.clone())),
		}
	}

	/// Returns the tokens observed after `context`, if any.
	pub fn continuations(&self, context: &Context) -> Option<&[Token]> {
		self.transitions.get(context).map(Vec::as_slice)
	}

	/// Iterates over every known context (arbitrary order).
	pub fn contexts(&self) -> impl Iterator<Item = &Context> {
		self.transitions.keys()
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	/// `true` when the chain was trained on nothing.
	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Total number of recorded trigrams (sum of all continuation lists).
	pub fn observation_count(&self) -> usize {
		self.transitions.values().map(Vec::len).sum()
	}

	/// Number of training sentences.
	pub fn sentence_count(&self) -> usize {
		self.sentences
	}
}
