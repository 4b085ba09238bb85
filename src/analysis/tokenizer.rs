use unicode_segmentation::UnicodeSegmentation;

/// Splits text into lowercase word tokens on Unicode word boundaries.
///
/// Folding happens here rather than in the stemmer so both the indexer and
/// the query parser apply the exact same case-folding policy before a term
/// ever reaches the stemmer.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .unicode_words()
            .map(|w| w.to_string())
            .collect()
    }
}
