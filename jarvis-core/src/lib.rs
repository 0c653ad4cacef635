//! Rule-based and Markov chain conversational text generation.
//!
//! This crate provides the building blocks of the JARViS assistant:
//! - A Unicode-aware tokenizer (and its heuristic inverse)
//! - A second-order (trigram) Markov chain trained from a corpus of sentences
//! - An injectable random selection capability for reproducible generation
//! - A keyword-to-reply rule table consulted before generation
//! - Configuration and corpus loading helpers used by the front-ends
//!
//! ```
//! use jarvis_core::model::markov_chain::MarkovChain;
//!
//! let chain = MarkovChain::from_corpus(["Posso gerar frases com base no texto."]);
//! let reply = chain.generate("posso", 30);
//! assert!(!reply.is_empty());
//! ```

/// Tokenizer, Markov chain, selectors, rules and the assistant policy.
pub mod model;

/// Training corpus helpers (default corpus, sample cleanup).
pub mod corpus;

/// TOML configuration shared by the CLI and the server.
pub mod config;

/// Crate error type.
pub mod error;

/// I/O utilities (corpus file loading).
pub mod io;

pub use config::ChatConfig;
pub use error::{ChatError, Result};
