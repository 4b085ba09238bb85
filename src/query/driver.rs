//! The query driver (C8): reads query lines, runs each through
//! parse → build → rewrite → evaluate, and writes one result line per
//! query. A malformed query only affects its own line; I/O failures
//! against the dictionary or postings file are fatal for the whole run
//! (SPEC_FULL.md §4.8, §7).

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::analysis::Analyzer;
use crate::core::error::{ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::dictionary::Dictionary;
use crate::index::posting_reader::PostingsReader;
use crate::query::node::{build_tree, evaluate};
use crate::query::parser::parse;
use crate::query::rewrite::{expected_count, rewrite};

/// Runs every query line in `queries_path` against `dictionary`/`postings`
/// and writes the results to `output_path`, one line per query, in input
/// order.
pub fn run_queries(
    dictionary: &Dictionary,
    postings: &mut PostingsReader,
    queries_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let analyzer = Analyzer::new();
    let query_file = File::open(queries_path)?;
    let mut output = File::create(output_path)?;

    for (line_no, line) in BufReader::new(query_file).lines().enumerate() {
        let line = line?;
        match run_single_query(dictionary, postings, &analyzer, &line) {
            Ok(ids) => {
                let rendered = ids
                    .iter()
                    .map(|d| d.value().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(output, "{rendered}")?;
            }
            // Only a malformed query line is recoverable (SPEC_FULL.md §7);
            // a postings/dictionary I/O failure aborts the whole run.
            Err(e) if matches!(e.kind, ErrorKind::MalformedQuery) => {
                warn!(line = line_no + 1, error = %e, "malformed query, emitting empty result");
                writeln!(output)?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn run_single_query(
    dictionary: &Dictionary,
    postings: &mut PostingsReader,
    analyzer: &Analyzer,
    line: &str,
) -> Result<Vec<DocId>> {
    let rpn = parse(line, analyzer)?;
    if rpn.is_empty() {
        return Ok(Vec::new());
    }

    let tree = build_tree(&rpn, |term| match dictionary.lookup(term) {
        Some(location) => postings.read(location),
        None => Ok(Vec::new()),
    })?;
    let tree = rewrite(tree);

    debug!(
        rpn_len = rpn.len(),
        expected = expected_count(&tree, dictionary.all_docs.len()),
        "rewritten query tree"
    );

    Ok(evaluate(&tree, &dictionary.all_docs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::indexer::run_indexer;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let docs_dir = dir.path().join("docs");
        std::fs::create_dir(&docs_dir).unwrap();
        std::fs::write(docs_dir.join("1"), "Bill Gates").unwrap();
        std::fs::write(docs_dir.join("2"), "Steve Jobs").unwrap();
        std::fs::write(docs_dir.join("3"), "Bill Gates founded Microsoft").unwrap();
        std::fs::write(docs_dir.join("4"), "Steve Jobs founded Apple").unwrap();
        std::fs::write(docs_dir.join("5"), "Bill Gates and money").unwrap();

        let dict_path = dir.path().join("dict.json");
        let postings_path = dir.path().join("postings.txt");
        run_indexer(&docs_dir, &dict_path, &postings_path).unwrap();
        (dir, dict_path, postings_path)
    }

    #[test]
    fn and_query_end_to_end() {
        let (dir, dict_path, postings_path) = setup();
        let queries_path = dir.path().join("queries.txt");
        std::fs::write(&queries_path, "bill AND gates\n\nzzz AND bill\n").unwrap();
        let output_path = dir.path().join("out.txt");

        let dictionary = Dictionary::load(&dict_path).unwrap();
        let mut postings = PostingsReader::open(&postings_path).unwrap();
        run_queries(&dictionary, &mut postings, &queries_path, &output_path).unwrap();

        let output = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "1 3 5");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn malformed_query_yields_empty_line_and_continues() {
        let (dir, dict_path, postings_path) = setup();
        let queries_path = dir.path().join("queries.txt");
        std::fs::write(&queries_path, "bill AND (gates\nbill AND gates\n").unwrap();
        let output_path = dir.path().join("out.txt");

        let dictionary = Dictionary::load(&dict_path).unwrap();
        let mut postings = PostingsReader::open(&postings_path).unwrap();
        run_queries(&dictionary, &mut postings, &queries_path, &output_path).unwrap();

        let output = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "1 3 5");
    }

    #[test]
    fn postings_io_failure_aborts_the_whole_run() {
        let (dir, dict_path, postings_path) = setup();
        // Truncate the postings file so every recorded (offset, length) now
        // reads past end-of-file, simulating a corrupted/shortened postings
        // file discovered mid-run.
        std::fs::write(&postings_path, "").unwrap();

        let queries_path = dir.path().join("queries.txt");
        std::fs::write(&queries_path, "bill\nsteve OR jobs\n").unwrap();
        let output_path = dir.path().join("out.txt");

        let dictionary = Dictionary::load(&dict_path).unwrap();
        let mut postings = PostingsReader::open(&postings_path).unwrap();
        let err = run_queries(&dictionary, &mut postings, &queries_path, &output_path).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::PostingsIOError));

        // The run aborted on the first line; the second line, and even the
        // first line's own result, must never have been written.
        let output = std::fs::read_to_string(&output_path).unwrap();
        assert!(output.is_empty());
    }
}
