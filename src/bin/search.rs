use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use boolidx::core::logging::init_tracing;
use boolidx::index::dictionary::Dictionary;
use boolidx::index::posting_reader::PostingsReader;
use boolidx::query::driver::run_queries;

/// Evaluates Boolean queries against a dictionary and postings file.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the dictionary file.
    #[arg(short = 'd', long = "dict")]
    dict_path: PathBuf,

    /// Path to the postings file.
    #[arg(short = 'p', long = "postings")]
    postings_path: PathBuf,

    /// Path to a file containing one query per line.
    #[arg(short = 'q', long = "queries")]
    queries_path: PathBuf,

    /// Where to write one result line per query.
    #[arg(short = 'o', long = "output")]
    output_path: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "query run failed");
            eprintln!("search: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> boolidx::core::error::Result<()> {
    info!(path = %cli.dict_path.display(), "loading dictionary");
    let dictionary = Dictionary::load(&cli.dict_path)?;
    info!(terms = dictionary.len(), docs = dictionary.all_docs.len(), "dictionary loaded");

    let mut postings = PostingsReader::open(&cli.postings_path)?;

    info!(path = %cli.queries_path.display(), "processing queries");
    run_queries(&dictionary, &mut postings, &cli.queries_path, &cli.output_path)?;
    info!(path = %cli.output_path.display(), "results written");

    Ok(())
}
