//! Word-level bigram (first-order Markov) text generation library.
//!
//! This crate provides:
//! - Streaming tokenization of raw text into normalized words
//! - Incremental construction and merging of a sparse transition table
//! - A compact on-disk model format
//! - Weighted sampling and a bounded-length generation walk
//!
//! Corpus enumeration helpers live in [`io`]; argument parsing and
//! process plumbing are left to the binary.

/// Error type shared by every operation of the crate.
pub mod error;

/// Tokenizer, accumulator, model store and generator.
pub mod model;

/// Corpus enumeration (files, directories, standard input).
pub mod io;

pub use error::{Result, WordchainError};
