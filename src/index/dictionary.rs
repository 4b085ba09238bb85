use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;

/// Byte offset and length of a term's postings record within the postings
/// file. The offset points at the first digit; `length` excludes the
/// trailing newline (SPEC_FULL.md §6). Serializes as the plain two-element
/// `[offset, length]` array the reference indexer writes, not as a JSON
/// object, so the on-disk format round-trips unchanged.
#[derive(Debug, Clone, Copy)]
pub struct PostingLocation {
    pub offset: u64,
    pub length: u64,
}

impl Serialize for PostingLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.offset, self.length).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PostingLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (offset, length) = <(u64, u64)>::deserialize(deserializer)?;
        Ok(PostingLocation { offset, length })
    }
}

/// `[all_docs, term_map]`, matching the reference indexer's
/// `json.dump([docIDs, dict_terms], dict_file)` exactly (see
/// examples/original_source/index.py).
#[derive(Debug, Serialize, Deserialize)]
struct DictionaryFile(Vec<u64>, HashMap<String, PostingLocation>);

/// The loaded dictionary: every document id known to the corpus, and where
/// each term's postings live in the postings file.
pub struct Dictionary {
    pub all_docs: Vec<DocId>,
    terms: HashMap<String, PostingLocation>,
}

impl Dictionary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::DictionaryCorrupt,
                format!("failed to open dictionary {}: {e}", path.display()),
            )
        })?;
        let DictionaryFile(all_docs, terms) =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                Error::new(
                    ErrorKind::DictionaryCorrupt,
                    format!("failed to parse dictionary {}: {e}", path.display()),
                )
            })?;

        Ok(Dictionary {
            all_docs: all_docs.into_iter().map(DocId::new).collect(),
            terms,
        })
    }

    pub fn lookup(&self, term: &str) -> Option<PostingLocation> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_reference_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[1,2,3],{{"bill":[0,5]}}]"#).unwrap();
        let dict = Dictionary::load(file.path()).unwrap();
        assert_eq!(dict.all_docs, vec![DocId::new(1), DocId::new(2), DocId::new(3)]);
        let loc = dict.lookup("bill").unwrap();
        assert_eq!(loc.offset, 0);
        assert_eq!(loc.length, 5);
        assert!(dict.lookup("missing").is_none());
    }

    #[test]
    fn corrupt_file_is_dictionary_corrupt_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Dictionary::load(file.path()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DictionaryCorrupt));
    }
}
