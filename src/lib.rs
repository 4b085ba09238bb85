//! A Boolean inverted-index query processor: tokenize/stem, build and
//! persist a term dictionary and postings file, then parse, rewrite, and
//! evaluate `AND`/`OR`/`NOT` queries against them with a square-root
//! skip-pointer merge kernel.
//!
//! ```text
//! analysis::Analyzer  -- tokenize + stem, shared by indexer and parser
//! index::indexer      -- corpus walk -> postings + dictionary files (C9)
//! index::dictionary   -- term -> (offset, length) lookup (C2)
//! index::posting_reader -- seek + positioned read of a postings record (C3)
//! index::merge        -- AND/OR/AND_NOT/NOT/MULTI_AND/MULTI_OR kernel (C4)
//! query::lexer        -- query line -> tokens
//! query::parser       -- shunting-yard -> RPN (C5)
//! query::node         -- RPN -> operator tree, tree -> result (C6)
//! query::rewrite      -- flatten / double-NOT / De Morgan / fusion (C7)
//! query::driver        -- per-line orchestration, output (C8)
//! ```
pub mod analysis;
pub mod core;
pub mod index;
pub mod query;
