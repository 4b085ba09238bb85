pub mod stemmer;
pub mod tokenizer;

use stemmer::TermStemmer;
use tokenizer::Tokenizer;

/// The text analysis pipeline shared by the indexer and the query parser:
/// tokenize, lowercase, stem. Both callers go through the same `Analyzer` so
/// neither can drift from the other (see SPEC_FULL.md §4.1, §9 D3).
pub struct Analyzer {
    tokenizer: Tokenizer,
    stemmer: TermStemmer,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            tokenizer: Tokenizer,
            stemmer: TermStemmer::new(),
        }
    }

    /// Tokenizes and stems an entire document's text, returning the distinct
    /// set of terms it contains (order unspecified, duplicates removed —
    /// this index is presence-only, not frequency-based).
    pub fn analyze_document(&self, text: &str) -> std::collections::HashSet<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(|tok| self.stemmer.stem(&tok))
            .collect()
    }

    /// Normalizes a single query leaf term the same way a document token
    /// would have been normalized at index time.
    pub fn normalize_term(&self, raw: &str) -> String {
        self.stemmer.stem(&raw.to_lowercase())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_lowercases_and_stems() {
        let analyzer = Analyzer::new();
        let terms = analyzer.analyze_document("Bill Gates and Steve Jobs");
        assert!(terms.contains("bill"));
        assert!(terms.contains("gate"));
        assert!(terms.contains("steve"));
        assert!(terms.contains("job"));
    }

    #[test]
    fn normalize_term_matches_document_normalization() {
        let analyzer = Analyzer::new();
        let doc_terms = analyzer.analyze_document("Gates");
        let query_term = analyzer.normalize_term("GATES");
        assert!(doc_terms.contains(&query_term));
    }
}
