use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::Env;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordchain_core::io::{CorpusSource, feed};
use wordchain_core::model::{Accumulator, Alphabet, GenerateInput, Generator, StartSeed, TrainConfig, store, write_words};

#[derive(Parser, Debug)]
#[command(author, version, about = "Word bigram text generator", long_about = None)]
struct Cli {
	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, global = true, action = ArgAction::Count)]
	verbose: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Count word bigrams of a corpus and save the model
	Train(TrainArgs),
	/// Generate text from a saved model
	Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
	/// File or directory to read; standard input when omitted or "-"
	#[arg(short, long, default_value = "")]
	input: String,

	/// Path of the model file to write
	#[arg(short, long)]
	model: PathBuf,

	/// Make text lowercase
	#[arg(long = "lc")]
	lowercase: bool,

	/// Add counts to the existing model instead of replacing it
	#[arg(long)]
	incremental: bool,

	/// Record the first word of every document as a sentence starter
	#[arg(long)]
	start_marker: bool,

	/// Recognise only ASCII letters
	#[arg(long, conflicts_with = "cyrillic_only")]
	latin_only: bool,

	/// Recognise only Cyrillic letters
	#[arg(long)]
	cyrillic_only: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
	/// Path of the model file to read
	#[arg(short, long)]
	model: PathBuf,

	/// Word to start generation; random when empty
	#[arg(short, long, default_value = "")]
	seed: String,

	/// Number of words to generate
	#[arg(short, long)]
	length: usize,

	/// File to write; standard output when omitted
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Seed of the random generator, for reproducible output
	#[arg(long)]
	rng_seed: Option<u64>,
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		_ => LevelFilter::Debug,
	};
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()));
	builder.format_timestamp_millis();
	builder.init();
}

fn run_train(args: TrainArgs) -> Result<(), Box<dyn std::error::Error>> {
	let alphabet = if args.latin_only {
		Alphabet::latin()
	} else if args.cyrillic_only {
		Alphabet::cyrillic()
	} else {
		Alphabet::multilingual()
	};
	let config = TrainConfig { alphabet, lowercase: args.lowercase, start_marker: args.start_marker };

	let mut accumulator = if args.incremental && args.model.exists() {
		Accumulator::resume(&args.model, config)?
	} else {
		Accumulator::new(config)
	};

	let documents = feed(&mut accumulator, &CorpusSource::from_arg(&args.input))?;
	info!("read {} documents", documents);

	let model = accumulator.finish();
	store::save_to_path(&model, &args.model)?;
	Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
	let model = store::load_from_path(&args.model)?;
	let rng = match args.rng_seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let input = GenerateInput::new(StartSeed::from_word(&args.seed), args.length);
	let words = Generator::new(&model, rng).generate(&input)?;

	match args.output {
		Some(path) => write_words(&words, BufWriter::new(File::create(path)?))?,
		None => write_words(&words, io::stdout().lock())?,
	}
	Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Train(args) => run_train(args),
		Commands::Generate(args) => run_generate(args),
	}
}
