use std::collections::HashMap;

use rand::Rng;

use crate::error::{Result, WordchainError};
use super::transitions::Transitions;

/// Synthetic source word placed before the first word of each document
/// when training with a start marker.
///
/// It contains non-letters, so no tokenizer output can collide with it.
pub const START_MARKER: &str = "*start*";

/// Sparse word transition table: source word → (target word → count).
///
/// # Responsibilities
/// - Record observed bigrams
/// - Expose the transitions of a source word for sampling
/// - Pick a uniformly random source word
/// - Merge with another table by adding counts
///
/// # Invariants
/// - Every source has at least one transition (no empty rows)
/// - Every count is >= 1
/// - Sources are enumerated in first-insertion order
#[derive(Clone, Debug, Default)]
pub struct BigramModel {
	/// Rows in insertion order.
	sources: Vec<(String, Transitions)>,
	/// Position of each source in `sources`.
	index: HashMap<String, usize>,
}

impl BigramModel {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `source` followed by `target`.
	pub fn add_transition(&mut self, source: &str, target: &str) -> Result<()> {
		self.add(source, target, 1)
	}

	/// Records `count` occurrences of `source` followed by `target`.
	///
	/// A zero count leaves the table untouched.
	///
	/// # Errors
	/// Returns [`WordchainError::CountOverflow`] if the row total of `source`
	/// would exceed `u64::MAX`; the table is left unchanged.
	pub fn add(&mut self, source: &str, target: &str, count: u64) -> Result<()> {
		if count == 0 {
			return Ok(());
		}
		let overflow = || WordchainError::CountOverflow { from: source.to_owned(), to: target.to_owned() };
		match self.index.get(source) {
			Some(&i) => {
				self.sources[i].1.add(target, count).ok_or_else(overflow)?;
			}
			None => {
				let mut row = Transitions::new();
				row.add(target, count).ok_or_else(overflow)?;
				self.index.insert(source.to_owned(), self.sources.len());
				self.sources.push((source.to_owned(), row));
			}
		}
		Ok(())
	}

	/// Outgoing transitions of `word`, or `None` for a dead end.
	pub fn transitions(&self, word: &str) -> Option<&Transitions> {
		self.index.get(word).map(|&i| &self.sources[i].1)
	}

	/// The stored key equal to `word`, borrowed from the table.
	pub fn source_key(&self, word: &str) -> Option<&str> {
		self.index.get(word).map(|&i| self.sources[i].0.as_str())
	}

	pub fn contains_source(&self, word: &str) -> bool {
		self.index.contains_key(word)
	}

	/// Number of times `target` followed `source`.
	pub fn count(&self, source: &str, target: &str) -> u64 {
		self.transitions(source).map_or(0, |t| t.count(target))
	}

	/// Source words in insertion order.
	pub fn sources(&self) -> impl Iterator<Item = &str> {
		self.sources.iter().map(|(source, _)| source.as_str())
	}

	/// Number of source words.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Total number of recorded bigrams (sum of all counts), saturating at
	/// `u64::MAX`.
	pub fn total_transitions(&self) -> u64 {
		self.sources.iter().fold(0, |sum, (_, t)| sum.saturating_add(t.total()))
	}

	/// Every `(source, target, count)` triple, sources then targets in
	/// insertion order.
	pub fn records(&self) -> impl Iterator<Item = (&str, &str, u64)> {
		self.sources.iter().flat_map(|(source, transitions)| {
			transitions.iter().map(move |(target, count)| (source.as_str(), target, count))
		})
	}

	/// Picks a source word uniformly at random, never the start marker.
	///
	/// Returns `None` if no such word exists.
	pub fn random_source<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let marker = self.index.get(START_MARKER).copied();
		let candidates = self.sources.len() - usize::from(marker.is_some());
		if candidates == 0 {
			return None;
		}
		let mut i = rng.random_range(0..candidates);
		if marker.is_some_and(|m| i >= m) {
			i += 1;
		}
		Some(self.sources[i].0.as_str())
	}

	/// Merges another table into this one.
	///
	/// Counts of matching bigrams are summed; new sources and targets are
	/// appended in `other`'s order. The operation is associative and
	/// commutative with respect to the resulting counts.
	///
	/// # Errors
	/// Returns [`WordchainError::CountOverflow`] if a row total would
	/// overflow. Bigrams merged before the failing one stay merged.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		for (source, target, count) in other.records() {
			self.add(source, target, count)?;
		}
		Ok(())
	}
}

impl PartialEq for BigramModel {
	/// Equal when both hold the same set of triples, whatever the order.
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len()
			&& self
				.sources
				.iter()
				.all(|(source, t)| other.transitions(source) == Some(t))
	}
}

impl Eq for BigramModel {}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn records_follow_insertion_order() {
		let mut model = BigramModel::new();
		model.add_transition("b", "x").unwrap();
		model.add_transition("a", "y").unwrap();
		model.add_transition("b", "z").unwrap();
		model.add_transition("b", "x").unwrap();
		let records: Vec<_> = model.records().collect();
		assert_eq!(records, vec![("b", "x", 2), ("b", "z", 1), ("a", "y", 1)]);
		assert_eq!(model.sources().collect::<Vec<_>>(), vec!["b", "a"]);
		assert_eq!(model.total_transitions(), 4);
	}

	#[test]
	fn zero_count_creates_no_row() {
		let mut model = BigramModel::new();
		model.add("a", "b", 0).unwrap();
		assert!(model.is_empty());
		assert!(!model.contains_source("a"));
	}

	#[test]
	fn target_only_word_is_a_dead_end() {
		let mut model = BigramModel::new();
		model.add_transition("x", "y").unwrap();
		assert!(model.transitions("y").is_none());
		assert_eq!(model.count("x", "y"), 1);
		assert_eq!(model.count("y", "x"), 0);
	}

	#[test]
	fn random_source_skips_start_marker() {
		let mut model = BigramModel::new();
		model.add_transition(START_MARKER, "a").unwrap();
		model.add_transition("a", "b").unwrap();
		model.add_transition("b", "a").unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..200 {
			let word = model.random_source(&mut rng);
			assert!(matches!(word, Some("a") | Some("b")));
		}
	}

	#[test]
	fn random_source_of_marker_only_model_is_none() {
		let mut model = BigramModel::new();
		model.add_transition(START_MARKER, "a").unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		assert_eq!(model.random_source(&mut rng), None);
		assert_eq!(BigramModel::new().random_source(&mut rng), None);
	}

	#[test]
	fn random_source_reaches_every_word() {
		let mut model = BigramModel::new();
		for (s, t) in [("a", "b"), ("b", "c"), ("c", "a")] {
			model.add_transition(s, t).unwrap();
		}
		let mut rng = StdRng::seed_from_u64(11);
		let mut seen: Vec<&str> = (0..300).filter_map(|_| model.random_source(&mut rng)).collect();
		seen.sort();
		seen.dedup();
		assert_eq!(seen, vec!["a", "b", "c"]);
	}

	#[test]
	fn merge_adds_counts() {
		let mut left = BigramModel::new();
		left.add("a", "b", 2).unwrap();
		let mut right = BigramModel::new();
		right.add("a", "b", 3).unwrap();
		right.add("b", "c", 1).unwrap();
		left.merge(&right).unwrap();
		assert_eq!(left.count("a", "b"), 5);
		assert_eq!(left.count("b", "c"), 1);
	}

	#[test]
	fn equality_ignores_order() {
		let mut left = BigramModel::new();
		left.add("a", "b", 1).unwrap();
		left.add("c", "d", 2).unwrap();
		let mut right = BigramModel::new();
		right.add("c", "d", 2).unwrap();
		right.add("a", "b", 1).unwrap();
		assert_eq!(left, right);
		right.add("a", "b", 1).unwrap();
		assert_ne!(left, right);
	}

	#[test]
	fn overflowing_add_is_an_error_and_changes_nothing() {
		let mut model = BigramModel::new();
		model.add("a", "b", u64::MAX).unwrap();
		let err = model.add("a", "c", 1).unwrap_err();
		assert!(matches!(err, WordchainError::CountOverflow { ref from, ref to } if from == "a" && to == "c"));
		assert_eq!(model.count("a", "c"), 0);
		assert_eq!(model.total_transitions(), u64::MAX);
		assert!(matches!(model.add_transition("a", "b"), Err(WordchainError::CountOverflow { .. })));
	}

	#[test]
	fn overflowing_merge_is_an_error() {
		let mut left = BigramModel::new();
		left.add("a", "b", u64::MAX).unwrap();
		let mut right = BigramModel::new();
		right.add("a", "c", 1).unwrap();
		assert!(matches!(left.merge(&right), Err(WordchainError::CountOverflow { .. })));
		assert_eq!(left.count("a", "c"), 0);
	}
}
