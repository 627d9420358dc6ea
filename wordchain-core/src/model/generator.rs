use std::io::{self, Write};

use log::{debug, trace};
use rand::Rng;

use crate::error::{Result, WordchainError};
use super::bigram_model::{BigramModel, START_MARKER};
use super::config::{GenerateInput, StartSeed};

/// Walks a [`BigramModel`] to produce word sequences.
///
/// # Responsibilities
/// - Resolve the first word (explicit seed, random source word, or a
///   sentence starter when the model carries a start marker)
/// - Sample each next word in proportion to observed counts
/// - Restart from a random source word when the walk reaches a dead end
///
/// The model is borrowed read-only; all randomness comes from `rng`, so a
/// seeded generator replays the same sequence.
#[derive(Debug)]
pub struct Generator<'m, R> {
	model: &'m BigramModel,
	rng: R,
}

impl<'m, R: Rng> Generator<'m, R> {
	pub fn new(model: &'m BigramModel, rng: R) -> Self {
		Self { model, rng }
	}

	/// Produces exactly `input.length` words.
	///
	/// A zero length yields an empty sequence without looking at the model.
	///
	/// # Errors
	/// - [`WordchainError::EmptyModel`] if the model has no source word
	/// - [`WordchainError::InvalidSeed`] if a custom seed is not a source word
	pub fn generate(&mut self, input: &GenerateInput) -> Result<Vec<String>> {
		if input.length == 0 {
			return Ok(Vec::new());
		}
		if self.model.is_empty() {
			return Err(WordchainError::EmptyModel);
		}

		let mut current = self.resolve_seed(&input.seed)?;
		let mut output = Vec::with_capacity(input.length);
		for i in 0..input.length {
			output.push(current.to_owned());
			if i + 1 == input.length {
				break;
			}
			current = self.next_word(current)?;
		}
		Ok(output)
	}

	/// Picks the first word of the sequence.
	fn resolve_seed(&mut self, seed: &StartSeed) -> Result<&'m str> {
		let word = match seed {
			StartSeed::Custom(word) if !word.is_empty() => {
				match self.model.source_key(word) {
					Some(key) if key != START_MARKER => key,
					_ => return Err(WordchainError::InvalidSeed { seed: word.clone() }),
				}
			}
			_ => match self.model.transitions(START_MARKER) {
				Some(starters) => starters.sample(&mut self.rng).ok_or(WordchainError::EmptyModel)?,
				None => self.restart()?,
			},
		};
		debug!("seed resolved to '{}'", word);
		Ok(word)
	}

	/// Samples the successor of `current`, restarting on a dead end.
	fn next_word(&mut self, current: &str) -> Result<&'m str> {
		match self.model.transitions(current).and_then(|t| t.sample(&mut self.rng)) {
			Some(next) => Ok(next),
			None => {
				trace!("dead end at '{}', restarting", current);
				self.restart()
			}
		}
	}

	/// Uniformly random source word; a model whose only source is the start
	/// marker restarts from a sentence starter instead.
	fn restart(&mut self) -> Result<&'m str> {
		if let Some(word) = self.model.random_source(&mut self.rng) {
			return Ok(word);
		}
		self.model
			.transitions(START_MARKER)
			.and_then(|starters| starters.sample(&mut self.rng))
			.ok_or(WordchainError::EmptyModel)
	}
}

/// Generates `length` words from `model`.
///
/// `seed` of `None` or `Some("")` picks the first word at random.
pub fn generate<R: Rng + ?Sized>(
	model: &BigramModel,
	seed: Option<&str>,
	length: usize,
	rng: &mut R,
) -> Result<Vec<String>> {
	let input = GenerateInput::new(StartSeed::from_word(seed.unwrap_or_default()), length);
	Generator::new(model, rng).generate(&input)
}

/// Writes words separated by single spaces, the last one followed by a
/// newline. An empty sequence writes nothing.
pub fn write_words<W, S>(words: &[S], mut sink: W) -> io::Result<()>
where
	W: Write,
	S: AsRef<str>,
{
	let last = words.len().saturating_sub(1);
	for (i, word) in words.iter().enumerate() {
		sink.write_all(word.as_ref().as_bytes())?;
		sink.write_all(if i == last { b"\n" } else { b" " })?;
	}
	sink.flush()
}
