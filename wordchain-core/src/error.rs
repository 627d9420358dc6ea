use std::io;
use std::path::PathBuf;

/// Errors raised while training, persisting or sampling a word chain.
///
/// Every variant is fatal for the current train or generate call.
/// A dead end during generation is not an error.
#[derive(Debug, thiserror::Error)]
pub enum WordchainError {
	/// The model has no source word to start or restart from.
	#[error("model is empty: no source words to generate from")]
	EmptyModel,

	/// An explicit seed that is not a source word of the model.
	#[error("invalid seed '{seed}': not a source word of the model")]
	InvalidSeed { seed: String },

	/// The corpus could not be opened or read.
	#[error("cannot read corpus '{}': {source}", path.display())]
	CorpusRead {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The model file could not be opened or written.
	#[error("cannot access model '{}': {source}", path.display())]
	ModelIo {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Adding a bigram would push a count past `u64::MAX`.
	#[error("count overflow for bigram '{from} {to}'")]
	CountOverflow { from: String, to: String },

	/// Persisted model data failed validation.
	#[error("malformed model: {0}")]
	ModelFormat(String),
}

pub type Result<T> = std::result::Result<T, WordchainError>;

impl From<postcard::Error> for WordchainError {
	fn from(err: postcard::Error) -> Self {
		WordchainError::ModelFormat(err.to_string())
	}
}
