use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::dictionary::PostingLocation;

/// Seeks into the postings file and decodes a single term's posting list.
///
/// Holds one open file handle for the lifetime of a query run (SPEC_FULL.md
/// §5: the file position is mutated serially, one positioned read at a
/// time — there is no concurrent access to worry about).
pub struct PostingsReader {
    file: File,
}

impl PostingsReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::PostingsIOError,
                format!("failed to open postings file {}: {e}", path.display()),
            )
        })?;
        Ok(PostingsReader { file })
    }

    /// Reads and parses the postings list at `location`. Callers must treat
    /// an absent dictionary entry as an empty list themselves — this
    /// function is only ever invoked with a location known to exist.
    pub fn read(&mut self, location: PostingLocation) -> Result<Vec<DocId>> {
        self.file
            .seek(SeekFrom::Start(location.offset))
            .map_err(|e| Error::new(ErrorKind::PostingsIOError, format!("seek failed: {e}")))?;

        let mut buf = vec![0u8; location.length as usize];
        self.file.read_exact(&mut buf).map_err(|e| {
            Error::new(ErrorKind::PostingsIOError, format!("read failed: {e}"))
        })?;

        let text = std::str::from_utf8(&buf).map_err(|e| {
            Error::new(
                ErrorKind::PostingsIOError,
                format!("postings record is not valid UTF-8: {e}"),
            )
        })?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        text.split(' ')
            .map(|tok| {
                tok.parse::<u64>().map(DocId::new).map_err(|e| {
                    Error::new(
                        ErrorKind::PostingsIOError,
                        format!("malformed doc id {tok:?}: {e}"),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_exact_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1 3 5\n7 9\n").unwrap();
        let mut reader = PostingsReader::open(file.path()).unwrap();

        let ids = reader
            .read(PostingLocation { offset: 0, length: 5 })
            .unwrap();
        assert_eq!(ids, vec![DocId::new(1), DocId::new(3), DocId::new(5)]);

        let ids = reader
            .read(PostingLocation { offset: 6, length: 3 })
            .unwrap();
        assert_eq!(ids, vec![DocId::new(7), DocId::new(9)]);
    }

    #[test]
    fn empty_window_is_empty_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n").unwrap();
        let mut reader = PostingsReader::open(file.path()).unwrap();
        let ids = reader.read(PostingLocation { offset: 0, length: 0 }).unwrap();
        assert!(ids.is_empty());
    }
}
