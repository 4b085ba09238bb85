use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analysis::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::dictionary::PostingLocation;

/// Enumerates `docs_dir`, keeping only entries whose file name parses as a
/// `u64` document id, sorted ascending (examples/original_source/index.py
/// `load_all_doc_names`).
fn load_doc_paths(docs_dir: &Path) -> Result<Vec<(DocId, std::path::PathBuf)>> {
    let mut docs = Vec::new();

    for entry in fs::read_dir(docs_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Ok(doc_id) = name.parse::<u64>() else {
            continue;
        };
        docs.push((DocId::new(doc_id), path));
    }

    docs.sort_by_key(|(id, _)| *id);
    Ok(docs)
}

/// Builds the in-memory postings map by visiting every document in
/// ascending `DocId` order. Because documents are visited in order and each
/// `DocId` is appended to a term's list at most once, every accumulated
/// list comes out already sorted and deduplicated — no post-hoc sort step
/// is needed (SPEC_FULL.md §4.9).
fn build_postings(
    docs: &[(DocId, std::path::PathBuf)],
    analyzer: &Analyzer,
) -> Result<BTreeMap<String, Vec<DocId>>> {
    let mut postings: BTreeMap<String, Vec<DocId>> = BTreeMap::new();

    for (doc_id, path) in docs {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::Io,
                format!("failed to read document {}: {e}", path.display()),
            )
        })?;

        for term in analyzer.analyze_document(&text) {
            postings.entry(term).or_default().push(*doc_id);
        }
    }

    Ok(postings)
}

/// Writes the postings file and returns each term's `(offset, length)`,
/// recorded exactly as the reference `write_postings` does: track
/// `file.tell()` before and after the space-joined digits, then a newline
/// not counted in `length`.
fn write_postings_file(
    postings: &BTreeMap<String, Vec<DocId>>,
    postings_path: &Path,
) -> Result<BTreeMap<String, PostingLocation>> {
    let mut file = fs::File::create(postings_path)?;
    let mut locations = BTreeMap::new();
    let mut offset: u64 = 0;

    for (term, doc_ids) in postings {
        let line = doc_ids
            .iter()
            .map(|d| d.value().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        file.write_all(line.as_bytes())?;
        let length = line.len() as u64;
        file.write_all(b"\n")?;

        locations.insert(term.clone(), PostingLocation { offset, length });
        offset += length + 1;
    }

    Ok(locations)
}

#[derive(Serialize)]
struct DictionaryFileOut(Vec<u64>, BTreeMap<String, PostingLocation>);

fn write_dictionary_file(
    all_docs: &[DocId],
    terms: BTreeMap<String, PostingLocation>,
    dict_path: &Path,
) -> Result<()> {
    let payload = DictionaryFileOut(all_docs.iter().map(|d| d.value()).collect(), terms);
    let file = fs::File::create(dict_path)?;
    serde_json::to_writer(file, &payload)?;
    Ok(())
}

/// Runs the full indexing pipeline: walk `docs_dir`, tokenize+stem every
/// document, write the postings file, then the dictionary file that points
/// into it.
pub fn run_indexer(docs_dir: &Path, dict_path: &Path, postings_path: &Path) -> Result<()> {
    let analyzer = Analyzer::new();

    info!(dir = %docs_dir.display(), "scanning corpus");
    let docs = load_doc_paths(docs_dir)?;
    info!(count = docs.len(), "corpus scanned");

    info!("building postings");
    let postings = build_postings(&docs, &analyzer)?;
    info!(terms = postings.len(), "postings built");

    info!(path = %postings_path.display(), "writing postings file");
    let locations = write_postings_file(&postings, postings_path)?;

    let all_docs: Vec<DocId> = docs.iter().map(|(id, _)| *id).collect();
    info!(path = %dict_path.display(), "writing dictionary file");
    write_dictionary_file(&all_docs, locations, dict_path)?;

    Ok(())
}
