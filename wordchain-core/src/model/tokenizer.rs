use std::vec;

use super::config::Alphabet;

/// Splits a single line into words.
///
/// A word is a maximal run of characters accepted by `alphabet`; everything
/// else is a separator. When `lowercase` is set the line is case-folded
/// before matching. Never yields an empty word.
pub fn split_words(line: &str, alphabet: Alphabet, lowercase: bool) -> Vec<String> {
	let folded;
	let line = if lowercase {
		folded = line.to_lowercase();
		folded.as_str()
	} else {
		line
	};

	let mut words = Vec::new();
	let mut start: Option<usize> = None;
	for (i, c) in line.char_indices() {
		match (alphabet.contains(c), start) {
			(true, None) => start = Some(i),
			(false, Some(s)) => {
				words.push(line[s..i].to_owned());
				start = None;
			}
			_ => (),
		}
	}
	if let Some(s) = start {
		words.push(line[s..].to_owned());
	}
	words
}

/// Lazy word stream over a sequence of lines.
///
/// Lines are pulled one at a time, so a corpus never has to be held in
/// memory. Built with [`words`].
#[derive(Debug)]
pub struct Words<I> {
	lines: I,
	alphabet: Alphabet,
	lowercase: bool,
	pending: vec::IntoIter<String>,
}

/// Tokenizes `lines` lazily into words.
pub fn words<I>(lines: I, alphabet: Alphabet, lowercase: bool) -> Words<I::IntoIter>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	Words {
		lines: lines.into_iter(),
		alphabet,
		lowercase,
		pending: Vec::new().into_iter(),
	}
}

impl<I> Iterator for Words<I>
where
	I: Iterator,
	I::Item: AsRef<str>,
{
	type Item = String;

	fn next(&mut self) -> Option<String> {
		loop {
			if let Some(word) = self.pending.next() {
				return Some(word);
			}
			let line = self.lines.next()?;
			self.pending = split_words(line.as_ref(), self.alphabet, self.lowercase).into_iter();
		}
	}
}
