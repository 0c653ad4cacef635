use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::markov_chain::Token;

/// Chooses the next token among the observed continuations of a context.
///
/// Continuation lists keep duplicates, so a uniform choice over the slice is
/// already proportional to the observed frequency of each token.
///
/// # Contract
/// - `options` is never empty when called by `MarkovChain`
/// - The returned reference must point into `options`
pub trait Selector {
	fn select<'a>(&mut self, options: &'a [Token]) -> &'a Token;
}

/// Uniform selection backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSelector<R: Rng> {
	rng: R,
}

impl<R: Rng> RandomSelector<R> {
	/// Wraps an existing generator.
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RandomSelector<ThreadRng> {
	/// Selector using the lazily-initialized thread-local generator.
	pub fn thread() -> Self {
		Self::new(rand::rng())
	}
}

impl RandomSelector<StdRng> {
	/// Reproducible selector: the same seed always yields the same draws.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Selector for RandomSelector<R> {
	/// # Panics
	/// Panics if `options` is empty.
	fn select<'a>(&mut self, options: &'a [Token]) -> &'a Token {
		&options[self.rng.random_range(0..options.len())]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options() -> Vec<Token> {
		["a", "b", "c", "d"].iter().map(|s| Token::Text((*s).to_owned())).collect()
	}

	#[test]
	fn always_picks_an_element_of_the_slice() {
		let options = options();
		let mut selector = RandomSelector::thread();
		for _ in 0..100 {
			let picked = selector.select(&options);
			assert!(options.contains(picked));
		}
	}

	#[test]
	fn single_option_is_always_chosen() {
		let options = vec![Token::End];
		let mut selector = RandomSelector::seeded(1);
		for _ in 0..10 {
			assert_eq!(selector.select(&options), &Token::End);
		}
	}

	#[test]
	fn same_seed_same_draws() {
		let options = options();
		let mut first = RandomSelector::seeded(42);
		let mut second = RandomSelector::seeded(42);
		let a: Vec<Token> = (0..20).map(|_| first.select(&options).clone()).collect();
		let b: Vec<Token> = (0..20).map(|_| second.select(&options).clone()).collect();
		assert_eq!(a, b);
	}
}
