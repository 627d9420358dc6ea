/// Letter ranges recognised by the tokenizer.
///
/// A token is a maximal run of characters accepted by the alphabet.
/// Both ranges can be enabled at once; with neither enabled no character
/// matches and every line yields no tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
	/// ASCII letters `a-z` and `A-Z`.
	pub latin: bool,
	/// Basic Cyrillic letters `А-Я` and `а-я` (U+0410..=U+044F).
	pub cyrillic: bool,
}

impl Alphabet {
	pub fn latin() -> Self {
		Self { latin: true, cyrillic: false }
	}

	pub fn cyrillic() -> Self {
		Self { latin: false, cyrillic: true }
	}

	pub fn multilingual() -> Self {
		Self { latin: true, cyrillic: true }
	}

	/// Returns `true` if `c` belongs to one of the enabled ranges.
	pub fn contains(&self, c: char) -> bool {
		(self.latin && c.is_ascii_alphabetic())
			|| (self.cyrillic && ('\u{0410}'..='\u{044F}').contains(&c))
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		Self::multilingual()
	}
}

/// Training parameters.
///
/// # Fields
/// - `alphabet`: letters that make up a word
/// - `lowercase`: case-fold each line before tokenizing
/// - `start_marker`: seed every document with [`START_MARKER`](super::bigram_model::START_MARKER)
///   so its first word is recorded as a sentence starter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainConfig {
	pub alphabet: Alphabet,
	pub lowercase: bool,
	pub start_marker: bool,
}

/// Strategy used to pick the first word of a generated sequence.
///
/// # Variants
/// - `Random`: a uniformly random source word, or a sentence starter when
///   the model was trained with a start marker.
/// - `Custom(String)`: the given word, which must be a source word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartSeed {
	Random,
	Custom(String),
}

impl StartSeed {
	/// Maps an optional user word onto a strategy; the empty word means random.
	pub fn from_word(word: &str) -> Self {
		if word.is_empty() {
			StartSeed::Random
		} else {
			StartSeed::Custom(word.to_owned())
		}
	}
}

/// Generation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateInput {
	/// How the first word is chosen.
	pub seed: StartSeed,
	/// Exact number of words to produce.
	pub length: usize,
}

impl GenerateInput {
	pub fn new(seed: StartSeed, length: usize) -> Self {
		Self { seed, length }
	}
}
