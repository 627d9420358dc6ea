use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::error::{Result, WordchainError};
use super::bigram_model::{BigramModel, START_MARKER};
use super::config::TrainConfig;
use super::store;
use super::tokenizer::words;

/// Builds a [`BigramModel`] from a stream of documents.
///
/// Each document is a word sequence; the "previous word" is reset at every
/// document boundary so no bigram spans two documents. Without a start
/// marker a document of `k` words contributes `k - 1` bigrams, with one it
/// contributes `k` (the first word becomes a successor of [`START_MARKER`]).
///
/// # Modes
/// - fresh ([`Accumulator::new`]): the table starts empty
/// - incremental ([`Accumulator::incremental`], [`Accumulator::resume`]):
///   the table starts from a previously trained model and counts are added
#[derive(Debug)]
pub struct Accumulator {
	model: BigramModel,
	config: TrainConfig,
	documents: usize,
	words: u64,
}

impl Accumulator {
	/// Starts training from an empty table.
	pub fn new(config: TrainConfig) -> Self {
		Self::incremental(BigramModel::new(), config)
	}

	/// Starts training on top of an existing model.
	pub fn incremental(model: BigramModel, config: TrainConfig) -> Self {
		Self { model, config, documents: 0, words: 0 }
	}

	/// Loads a persisted model and continues training on top of it.
	pub fn resume<P: AsRef<Path>>(model_path: P, config: TrainConfig) -> Result<Self> {
		let model = store::load_from_path(&model_path)?;
		info!(
			"resuming from '{}' ({} sources, {} transitions)",
			model_path.as_ref().display(),
			model.len(),
			model.total_transitions()
		);
		Ok(Self::incremental(model, config))
	}

	/// Counts the bigrams of one document given as words.
	///
	/// Returns the number of bigrams recorded. Zero or one word is not an
	/// error; it simply records nothing (or only the marker transition).
	///
	/// # Errors
	/// Returns [`WordchainError::CountOverflow`] if a count would exceed
	/// `u64::MAX`, which can only happen on top of a loaded model.
	pub fn add_document<I, S>(&mut self, tokens: I) -> Result<u64>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut previous: Option<String> = self.config.start_marker.then(|| START_MARKER.to_owned());
		let mut added = 0;
		let mut seen = 0;
		for token in tokens {
			let token = token.as_ref();
			if let Some(previous) = &previous {
				self.model.add_transition(previous, token)?;
				added += 1;
			}
			previous = Some(token.to_owned());
			seen += 1;
		}
		self.documents += 1;
		self.words += seen;
		debug!("document #{}: {} words, {} bigrams", self.documents, seen, added);
		Ok(added)
	}

	/// Tokenizes a document given as raw lines and counts its bigrams.
	pub fn add_lines<I>(&mut self, lines: I) -> Result<u64>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let config = self.config;
		self.add_document(words(lines, config.alphabet, config.lowercase))
	}

	/// Reads one document lazily from `reader`.
	///
	/// `origin` only labels a read failure.
	///
	/// # Errors
	/// Returns [`WordchainError::CorpusRead`] on the first failing line.
	/// Bigrams of the lines read before the failure stay counted.
	pub fn add_reader<R: BufRead, P: AsRef<Path>>(&mut self, reader: R, origin: P) -> Result<u64> {
		let mut failure: Option<io::Error> = None;
		let lines = reader.lines().map_while(|line| match line {
			Ok(line) => Some(line),
			Err(err) => {
				failure = Some(err);
				None
			}
		});
		let added = self.add_lines(lines);

		match failure {
			Some(source) => Err(WordchainError::CorpusRead {
				path: origin.as_ref().to_path_buf(),
				source,
			}),
			None => added,
		}
	}

	/// Reads one file as one document.
	pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<u64> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|source| WordchainError::CorpusRead {
			path: path.to_path_buf(),
			source,
		})?;
		self.add_reader(BufReader::new(file), path)
	}

	/// The table built so far.
	pub fn model(&self) -> &BigramModel {
		&self.model
	}

	/// Number of documents consumed.
	pub fn documents(&self) -> usize {
		self.documents
	}

	/// Number of words consumed.
	pub fn words(&self) -> u64 {
		self.words
	}

	/// Ends training and hands over the table.
	pub fn finish(self) -> BigramModel {
		info!(
			"trained on {} documents, {} words: {} sources, {} transitions",
			self.documents,
			self.words,
			self.model.len(),
			self.model.total_transitions()
		);
		self.model
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::config::Alphabet;

	fn config() -> TrainConfig {
		TrainConfig { alphabet: Alphabet::latin(), lowercase: false, start_marker: false }
	}

	#[test]
	fn counts_adjacent_pairs() {
		let mut acc = Accumulator::new(config());
		let added = acc.add_document(["the", "cat", "the", "cat", "the", "dog"]).unwrap();
		let model = acc.finish();
		assert_eq!(added, 5);
		assert_eq!(model.count("the", "cat"), 2);
		assert_eq!(model.count("cat", "the"), 2);
		assert_eq!(model.count("the", "dog"), 1);
		assert_eq!(model.total_transitions(), 5);
	}

	#[test]
	fn short_documents_are_not_errors() {
		let mut acc = Accumulator::new(config());
		assert_eq!(acc.add_document(Vec::<String>::new()).unwrap(), 0);
		assert_eq!(acc.add_document(["alone"]).unwrap(), 0);
		assert!(acc.model().is_empty());
		assert_eq!(acc.documents(), 2);
		assert_eq!(acc.words(), 1);
	}

	#[test]
	fn previous_word_resets_between_documents() {
		let mut acc = Accumulator::new(config());
		acc.add_document(["a", "b"]).unwrap();
		acc.add_document(["c", "d"]).unwrap();
		let model = acc.finish();
		assert_eq!(model.count("b", "c"), 0);
		assert_eq!(model.total_transitions(), 2);
	}

	#[test]
	fn start_marker_records_first_word() {
		let mut acc = Accumulator::new(TrainConfig { start_marker: true, ..config() });
		assert_eq!(acc.add_document(["hello", "world"]).unwrap(), 2);
		assert_eq!(acc.add_document(["hello"]).unwrap(), 1);
		let model = acc.finish();
		assert_eq!(model.count(START_MARKER, "hello"), 2);
		assert_eq!(model.count("hello", "world"), 1);
	}

	#[test]
	fn lines_are_tokenized_with_config() {
		let mut acc = Accumulator::new(TrainConfig { lowercase: true, ..config() });
		acc.add_lines(["The cat.", "THE end"]).unwrap();
		let model = acc.finish();
		assert_eq!(model.count("the", "cat"), 1);
		assert_eq!(model.count("cat", "the"), 1);
		assert_eq!(model.count("the", "end"), 1);
	}

	#[test]
	fn incremental_adds_to_prior_counts() {
		let mut prior = BigramModel::new();
		prior.add("a", "b", 4).unwrap();
		let mut acc = Accumulator::incremental(prior, config());
		acc.add_document(["a", "b", "a"]).unwrap();
		let model = acc.finish();
		assert_eq!(model.count("a", "b"), 5);
		assert_eq!(model.count("b", "a"), 1);
	}

	#[test]
	fn incremental_overflow_is_an_error() {
		let mut prior = BigramModel::new();
		prior.add("a", "b", u64::MAX).unwrap();
		let mut acc = Accumulator::incremental(prior, config());
		let err = acc.add_document(["a", "c"]).unwrap_err();
		assert!(matches!(err, WordchainError::CountOverflow { .. }));
		assert_eq!(acc.model().count("a", "c"), 0);
	}

	struct FailingReader;

	impl io::Read for FailingReader {
		fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
		}
	}

	#[test]
	fn read_failure_is_surfaced() {
		let mut acc = Accumulator::new(config());
		let err = acc.add_reader(BufReader::new(FailingReader), "broken.txt").unwrap_err();
		assert!(matches!(err, WordchainError::CorpusRead { ref path, .. } if path == Path::new("broken.txt")));
	}

	#[test]
	fn missing_file_is_a_corpus_error() {
		let mut acc = Accumulator::new(config());
		let err = acc.add_file("/definitely/not/here.txt").unwrap_err();
		assert!(matches!(err, WordchainError::CorpusRead { .. }));
	}
}
