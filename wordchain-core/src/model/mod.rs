//! Word-level bigram model and generation.
//!
//! - Tokenization of raw lines into words (`tokenizer`)
//! - Sparse transition table (`BigramModel`) and per-word rows (`Transitions`)
//! - Training from documents (`Accumulator`)
//! - Persistence (`store`)
//! - Sequence generation (`Generator`)

/// Training and generation parameters.
pub mod config;

/// Lazy splitting of lines into alphabetic words.
pub mod tokenizer;

/// Outgoing transitions of a single word, with weighted sampling.
pub mod transitions;

/// Source word → transitions table.
pub mod bigram_model;

/// Streaming bigram counting over documents, fresh or incremental.
pub mod accumulator;

/// Binary model format: save, load and validation.
pub mod store;

/// Seed resolution, the sampling walk and output formatting.
pub mod generator;

pub use accumulator::Accumulator;
pub use bigram_model::{BigramModel, START_MARKER};
pub use config::{Alphabet, GenerateInput, StartSeed, TrainConfig};
pub use generator::{Generator, generate, write_words};
pub use transitions::Transitions;
