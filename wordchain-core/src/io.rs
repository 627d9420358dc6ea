use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, WordchainError};
use crate::model::Accumulator;

/// Where the training text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorpusSource {
	/// Standard input, read as a single document.
	Stdin,
	/// A lone file, or a directory walked recursively.
	Path(PathBuf),
}

impl CorpusSource {
	/// `"-"` and the empty string mean standard input.
	pub fn from_arg(arg: &str) -> Self {
		if arg.is_empty() || arg == "-" {
			CorpusSource::Stdin
		} else {
			CorpusSource::Path(PathBuf::from(arg))
		}
	}
}

/// Lists the corpus files under `path`.
///
/// - A file yields itself
/// - A directory is walked recursively; files come back sorted by path
/// - Inside the walk, symlinks to files are listed but symlinks to
///   directories are not descended into
pub fn corpus_files<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
	let path = path.as_ref();
	let mut files = Vec::new();
	collect_files(path, &mut files).map_err(|source| WordchainError::CorpusRead {
		path: path.to_path_buf(),
		source,
	})?;
	files.sort();
	Ok(files)
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
	if path.is_file() {
		files.push(path.to_path_buf());
		return Ok(());
	}
	for entry in fs::read_dir(path)? {
		let entry = entry?;
		let file_type = entry.file_type()?;
		let entry_path = entry.path();
		if file_type.is_dir() {
			collect_files(&entry_path, files)?;
		} else if file_type.is_file() || (file_type.is_symlink() && entry_path.is_file()) {
			files.push(entry_path);
		}
	}
	Ok(())
}

/// Feeds every document of `source` to `accumulator`, one file per document.
///
/// Returns the number of documents read.
pub fn feed(accumulator: &mut Accumulator, source: &CorpusSource) -> Result<usize> {
	match source {
		CorpusSource::Stdin => {
			accumulator.add_reader(io::stdin().lock(), "<stdin>")?;
			Ok(1)
		}
		CorpusSource::Path(path) => {
			let files = corpus_files(path)?;
			for file in &files {
				let added = accumulator.add_file(file)?;
				debug!("{}: {} bigrams", file.display(), added);
			}
			Ok(files.len())
		}
	}
}
