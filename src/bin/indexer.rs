use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use boolidx::core::logging::init_tracing;
use boolidx::index::indexer::run_indexer;

/// Builds a dictionary and postings file from a directory of documents.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory of documents, each file named by its integer doc id.
    #[arg(short = 'i', long = "docs")]
    docs_dir: PathBuf,

    /// Where to write the dictionary file.
    #[arg(short = 'd', long = "dict")]
    dict_path: PathBuf,

    /// Where to write the postings file.
    #[arg(short = 'p', long = "postings")]
    postings_path: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run_indexer(&cli.docs_dir, &cli.dict_path, &cli.postings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "indexing failed");
            eprintln!("indexer: {e}");
            ExitCode::FAILURE
        }
    }
}
