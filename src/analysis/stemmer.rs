use rust_stemmers::{Algorithm, Stemmer};

/// Thin wrapper around a Porter stemmer. Stateless beyond the chosen
/// algorithm; safe to share across indexer and query parser so both sides
/// normalize terms identically.
pub struct TermStemmer {
    inner: Stemmer,
}

impl TermStemmer {
    pub fn new() -> Self {
        TermStemmer {
            inner: Stemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, token: &str) -> String {
        self.inner.stem(token).to_string()
    }
}

impl Default for TermStemmer {
    fn default() -> Self {
        Self::new()
    }
}
