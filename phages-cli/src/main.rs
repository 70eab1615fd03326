mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use phages_ml::Word2VecFormat;
use phages_seq::Alphabet;
use tracing_subscriber::EnvFilter;

use settings::Overrides;

#[derive(Parser)]
#[command(name = "phages")]
#[command(version)]
#[command(about = "K-mer extraction and genome embeddings for bacteriophage research")]
#[command(long_about = r#"
phages - k-mer genome embeddings for bacteriophages

Decomposes genomes into overlapping k-mers (default k=6) and represents each
genome as the mean of its k-mers' pre-trained word2vec vectors.

WORKFLOW:
  FASTA -> normalise (uppercase, trim) -> k-mers -> vocabulary lookup -> mean vector

OUTPUT FILES:
  kmers    CSV with a single `kmers` column, one space-separated row per sequence
  embed    CSV with columns feature_0 .. feature_{d-1}, one row per sequence

CONFIG FILE (--config, TOML):
  k = 6
  alphabet = "dna"    # dna | rna | protein
  threads = 8
Command-line flags override values from the file.

Set PHAGES_LOG (e.g. PHAGES_LOG=debug) to control log output."#)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pipeline config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract k-mer strings from each sequence
    Kmers {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output CSV
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Embed each sequence as the mean of its k-mer vectors
    Embed {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Pre-trained word2vec model (text or binary, optionally .gz)
        #[arg(long)]
        vectors: PathBuf,

        /// Model format; inferred from the file name when omitted
        #[arg(long, value_parser = parse_format)]
        format: Option<Word2VecFormat>,

        /// Output CSV
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Genome FASTA or multi-FASTA
    #[arg(long, required_unless_present = "table", conflicts_with = "table")]
    pub fasta: Option<PathBuf>,

    /// CSV with a single `sequence` column
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// With --fasta, one row per record instead of one joined sequence
    #[arg(long, requires = "fasta")]
    pub per_record: bool,
}

#[derive(Args, Debug, Clone, Copy)]
struct PipelineArgs {
    /// K-mer size
    #[arg(short = 'k', long = "kmer-size")]
    k: Option<usize>,

    /// Accepted alphabet: dna, rna or protein
    #[arg(long)]
    alphabet: Option<Alphabet>,

    /// Worker threads (1 = sequential)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

impl From<PipelineArgs> for Overrides {
    fn from(args: PipelineArgs) -> Self {
        Overrides {
            k: args.k,
            alphabet: args.alphabet,
            threads: args.threads,
        }
    }
}

fn parse_format(s: &str) -> Result<Word2VecFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "text" | "txt" => Ok(Word2VecFormat::Text),
        "binary" | "bin" => Ok(Word2VecFormat::Binary),
        other => Err(format!("unknown model format {:?} (expected text or binary)", other)),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("PHAGES_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Kmers {
            input,
            pipeline,
            out,
        } => {
            let config = settings::resolve(cli.config.as_deref(), pipeline.into())?;
            commands::kmers(&input, &config, &out)
        }
        Command::Embed {
            input,
            pipeline,
            vectors,
            format,
            out,
        } => {
            let config = settings::resolve(cli.config.as_deref(), pipeline.into())?;
            let format = format.unwrap_or_else(|| Word2VecFormat::from_path(&vectors));
            commands::embed(&input, &config, &vectors, format, &out)
        }
    }
}
