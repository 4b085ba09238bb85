pub mod dictionary;
pub mod indexer;
pub mod merge;
pub mod posting_reader;
