//! Persisted model format.
//!
//! A model is stored as the `postcard` encoding of a `Vec<Record>`, one
//! record per `(source, target, count)` triple, sources then targets in
//! insertion order. A well-formed file holds no duplicate
//! `(source, target)` pair, no empty word and no zero count.

use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordchainError};
use super::bigram_model::BigramModel;

/// One persisted bigram.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Record {
	source: String,
	target: String,
	count: u64,
}

/// Encodes every triple of `model` exactly once.
pub fn to_bytes(model: &BigramModel) -> Result<Vec<u8>> {
	let records: Vec<Record> = model
		.records()
		.map(|(source, target, count)| Record {
			source: source.to_owned(),
			target: target.to_owned(),
			count,
		})
		.collect();
	Ok(postcard::to_stdvec(&records)?)
}

/// Decodes and validates a persisted model.
///
/// # Errors
/// Returns [`WordchainError::ModelFormat`] if the bytes do not decode,
/// carry trailing data, or hold an empty word, a zero count, a
/// duplicate pair or counts whose sum for one source overflows.
pub fn from_bytes(bytes: &[u8]) -> Result<BigramModel> {
	let (records, rest): (Vec<Record>, &[u8]) = postcard::take_from_bytes(bytes)?;
	if !rest.is_empty() {
		return Err(WordchainError::ModelFormat(format!("{} trailing bytes", rest.len())));
	}

	let mut model = BigramModel::new();
	let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(records.len());
	for (i, record) in records.iter().enumerate() {
		if record.source.is_empty() || record.target.is_empty() {
			return Err(WordchainError::ModelFormat(format!("record {i}: empty word")));
		}
		if record.count == 0 {
			return Err(WordchainError::ModelFormat(format!(
				"record {i}: zero count for '{} {}'",
				record.source, record.target
			)));
		}
		if !seen.insert((record.source.as_str(), record.target.as_str())) {
			return Err(WordchainError::ModelFormat(format!(
				"record {i}: duplicate pair '{} {}'",
				record.source, record.target
			)));
		}
		model
			.add(&record.source, &record.target, record.count)
			.map_err(|err| WordchainError::ModelFormat(format!("record {i}: {err}")))?;
	}
	Ok(model)
}

/// Writes `model` to `writer`.
pub fn save<W: Write>(model: &BigramModel, mut writer: W) -> Result<()> {
	let bytes = to_bytes(model)?;
	writer
		.write_all(&bytes)
		.and_then(|_| writer.flush())
		.map_err(|source| WordchainError::ModelIo { path: "<stream>".into(), source })
}

/// Reads a model from `reader` until end of stream.
pub fn load<R: Read>(mut reader: R) -> Result<BigramModel> {
	let mut bytes = Vec::new();
	reader
		.read_to_end(&mut bytes)
		.map_err(|source| WordchainError::ModelIo { path: "<stream>".into(), source })?;
	from_bytes(&bytes)
}

/// Writes `model` to the file at `path`, replacing it.
pub fn save_to_path<P: AsRef<Path>>(model: &BigramModel, path: P) -> Result<()> {
	let path = path.as_ref();
	let bytes = to_bytes(model)?;
	fs::write(path, &bytes).map_err(|source| WordchainError::ModelIo { path: path.to_path_buf(), source })?;
	info!(
		"saved model to '{}' ({} sources, {} records, {} bytes)",
		path.display(),
		model.len(),
		model.records().count(),
		bytes.len()
	);
	Ok(())
}

/// Reads the model stored at `path`.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<BigramModel> {
	let path = path.as_ref();
	let bytes = fs::read(path).map_err(|source| WordchainError::ModelIo { path: path.to_path_buf(), source })?;
	let model = from_bytes(&bytes)?;
	info!("loaded model from '{}' ({} sources)", path.display(), model.len());
	Ok(model)
}
