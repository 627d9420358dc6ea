use std::collections::HashMap;

use rand::Rng;

/// Outgoing transitions of one source word.
///
/// Conceptually a node of the Markov chain whose edges are weighted by
/// how many times each successor was observed.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Draw a successor with probability proportional to its count
///
/// ## Invariants
/// - Every stored count is strictly positive
/// - Targets are enumerated in first-insertion order
/// - The sum of counts fits in a `u64`; additions past it are refused
#[derive(Clone, Debug, Default)]
pub struct Transitions {
	/// Successors with their occurrence counts, in insertion order.
	/// Example: [("cat", 42), ("dog", 3)]
	targets: Vec<(String, u64)>,
	/// Position of each successor in `targets`.
	index: HashMap<String, usize>,
	/// Sum of all counts.
	total: u64,
}

impl Transitions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `count` occurrences of a transition toward `target`.
	///
	/// Returns the new count of `target`, or `None` if the row total would
	/// overflow, in which case nothing is changed. A zero count is ignored
	/// so no zero entry is ever stored.
	pub fn add(&mut self, target: &str, count: u64) -> Option<u64> {
		let total = self.total.checked_add(count)?;
		// A single count never exceeds the row total.
		let updated = match self.index.get(target) {
			Some(&i) => {
				self.targets[i].1 += count;
				self.targets[i].1
			}
			None if count == 0 => return Some(0),
			None => {
				self.index.insert(target.to_owned(), self.targets.len());
				self.targets.push((target.to_owned(), count));
				count
			}
		};
		self.total = total;
		Some(updated)
	}

	/// Number of times `target` followed this word.
	pub fn count(&self, target: &str) -> u64 {
		self.index.get(target).map_or(0, |&i| self.targets[i].1)
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.targets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	/// Successors and counts in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.targets.iter().map(|(target, count)| (target.as_str(), *count))
	}

	/// Draws a successor using weighted random sampling.
	///
	/// `P(target = t) = count[t] / total`, computed exactly with integers:
	/// a uniform draw in `0..total` is located by a cumulative scan.
	/// A single successor is returned without touching `rng`.
	///
	/// Returns `None` if there are no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		match self.targets.as_slice() {
			[] => None,
			[(only, _)] => Some(only.as_str()),
			targets => {
				let mut r = rng.random_range(0..self.total);
				for (target, count) in targets {
					if r < *count {
						return Some(target.as_str());
					}
					r -= count;
				}
				// Unreachable while `total` is the sum of the counts.
				targets.last().map(|(target, _)| target.as_str())
			}
		}
	}
}

impl PartialEq for Transitions {
	/// Equal when both hold the same counts, whatever the insertion order.
	fn eq(&self, other: &Self) -> bool {
		self.total == other.total
			&& self.len() == other.len()
			&& self.iter().all(|(target, count)| other.count(target) == count)
	}
}

impl Eq for Transitions {}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn transitions(pairs: &[(&str, u64)]) -> Transitions {
		let mut t = Transitions::new();
		for (target, count) in pairs {
			t.add(target, *count).unwrap();
		}
		t
	}

	#[test]
	fn add_accumulates_and_keeps_order() {
		let mut t = Transitions::new();
		assert_eq!(t.add("b", 1), Some(1));
		assert_eq!(t.add("a", 1), Some(1));
		assert_eq!(t.add("b", 2), Some(3));
		assert_eq!(t.add("c", 0), Some(0));
		assert_eq!(t.iter().collect::<Vec<_>>(), vec![("b", 3), ("a", 1)]);
		assert_eq!(t.total(), 4);
		assert_eq!(t.count("c"), 0);
	}

	#[test]
	fn empty_transitions_sample_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(Transitions::new().sample(&mut rng), None);
	}

	#[test]
	fn single_target_is_certain() {
		let t = transitions(&[("only", 7)]);
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..100 {
			assert_eq!(t.sample(&mut rng), Some("only"));
		}
	}

	#[test]
	fn sampling_follows_counts() {
		let t = transitions(&[("a", 1), ("b", 3)]);
		let mut rng = StdRng::seed_from_u64(42);
		let draws = 100_000;
		let hits = (0..draws).filter(|_| t.sample(&mut rng) == Some("b")).count();
		let frequency = hits as f64 / draws as f64;
		assert!((frequency - 0.75).abs() < 0.01, "frequency of b was {frequency}");
	}

	#[test]
	fn sampling_is_deterministic_under_a_fixed_seed() {
		let t = transitions(&[("x", 2), ("y", 5), ("z", 1)]);
		let mut first = StdRng::seed_from_u64(9);
		let mut second = StdRng::seed_from_u64(9);
		let a: Vec<_> = (0..50).map(|_| t.sample(&mut first).map(str::to_owned)).collect();
		let b: Vec<_> = (0..50).map(|_| t.sample(&mut second).map(str::to_owned)).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn overflowing_add_is_refused_unchanged() {
		let mut t = transitions(&[("a", u64::MAX)]);
		assert_eq!(t.add("b", 1), None);
		assert_eq!(t.add("a", 1), None);
		assert_eq!(t.iter().collect::<Vec<_>>(), vec![("a", u64::MAX)]);
		assert_eq!(t.total(), u64::MAX);
	}
}
