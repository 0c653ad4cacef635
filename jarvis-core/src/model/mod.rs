//! Top-level module for the conversational generator.
//!
//! This module groups:
//! - Text segmentation (`tokenizer`)
//! - The trigram Markov chain (`MarkovChain`)
//! - The random selection capability used during generation (`Selector`)
//! - The keyword rule table (`Rules`)
//! - The caller-side policy combining rules and generation (`Assistant`)

/// Conversion between raw text and token sequences.
pub mod tokenizer;

/// Second-order Markov chain over tokens.
///
/// Handles corpus ingestion, the immutable transition table
/// and bounded random walks from a seed.
pub mod markov_chain;

/// Injectable choice of one continuation among many.
pub mod selector;

/// Keyword-to-reply table consulted before generation.
pub mod rules;

/// High-level reply policy: rules first, then the chain.
pub mod assistant;
