//! The operator DAG (really a tree) that an RPN sequence builds into, and
//! its evaluation against the merge kernel.
//!
//! Rebuilt functionally rather than mutated in place — see SPEC_FULL.md §9
//! D1 for why this fits Rust's ownership model better than the reference
//! implementation's "become my descendant" node surgery
//! (examples/original_source/search.py `copy_descendant_info`).

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::merge;
use crate::query::parser::RpnToken;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        term: String,
        postings: Vec<DocId>,
    },
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Box<Node>),
    AndNot(Box<Node>, Box<Node>),
}

/// Builds the tree from an RPN sequence, resolving each leaf's postings via
/// `lookup_postings` (absent term → empty list, never an error —
/// SPEC_FULL.md §4.3; an `Err` from `lookup_postings` itself, e.g. a
/// postings file I/O failure, propagates out of `build_tree` unchanged).
pub fn build_tree(
    rpn: &[RpnToken],
    mut lookup_postings: impl FnMut(&str) -> Result<Vec<DocId>>,
) -> Result<Node> {
    let mut stack: Vec<Node> = Vec::new();

    for token in rpn {
        match token {
            RpnToken::Term(term) => {
                let postings = lookup_postings(term)?;
                stack.push(Node::Leaf {
                    term: term.clone(),
                    postings,
                });
            }
            RpnToken::Not => {
                let child = stack.pop().ok_or_else(|| {
                    Error::new(ErrorKind::MalformedQuery, "NOT with no operand")
                })?;
                stack.push(Node::Not(Box::new(child)));
            }
            RpnToken::And | RpnToken::Or => {
                let right = stack.pop().ok_or_else(|| {
                    Error::new(ErrorKind::MalformedQuery, "operator with missing operand")
                })?;
                let left = stack.pop().ok_or_else(|| {
                    Error::new(ErrorKind::MalformedQuery, "operator with missing operand")
                })?;
                stack.push(if matches!(token, RpnToken::And) {
                    Node::And(vec![left, right])
                } else {
                    Node::Or(vec![left, right])
                });
            }
        }
    }

    if stack.len() != 1 {
        return Err(Error::new(
            ErrorKind::MalformedQuery,
            format!("expression did not reduce to a single root (got {})", stack.len()),
        ));
    }

    Ok(stack.pop().unwrap())
}

/// Post-order evaluation against the merge kernel. `all_docs` is only
/// needed to resolve `Not`.
pub fn evaluate(node: &Node, all_docs: &[DocId]) -> Vec<DocId> {
    match node {
        Node::Leaf { postings, .. } => postings.clone(),
        Node::Not(child) => merge::not(&evaluate(child, all_docs), all_docs),
        Node::AndNot(left, right) => {
            merge::and_not(&evaluate(left, all_docs), &evaluate(right, all_docs))
        }
        Node::And(children) => {
            let lists: Vec<Vec<DocId>> = children.iter().map(|c| evaluate(c, all_docs)).collect();
            merge::multi_and(lists)
        }
        Node::Or(children) => {
            let lists: Vec<Vec<DocId>> = children.iter().map(|c| evaluate(c, all_docs)).collect();
            merge::multi_or(lists)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser::RpnToken as T;

    fn ids(values: &[u64]) -> Vec<DocId> {
        values.iter().copied().map(DocId::new).collect()
    }

    fn lookup(table: &[(&str, Vec<u64>)]) -> impl FnMut(&str) -> Result<Vec<DocId>> + '_ {
        move |term| {
            Ok(table
                .iter()
                .find(|(t, _)| *t == term)
                .map(|(_, ids)| ids.iter().copied().map(DocId::new).collect())
                .unwrap_or_default())
        }
    }

    #[test]
    fn builds_and_evaluates_simple_and() {
        let rpn = vec![T::Term("bill".into()), T::Term("gate".into()), T::And];
        let table = [("bill", vec![1, 3, 5]), ("gate", vec![3, 5])];
        let tree = build_tree(&rpn, lookup(&table)).unwrap();
        let all_docs = ids(&[1, 2, 3, 4, 5]);
        assert_eq!(evaluate(&tree, &all_docs), ids(&[3, 5]));
    }

    #[test]
    fn unknown_term_is_empty_not_error() {
        let rpn = vec![T::Term("zzz".into()), T::Term("bill".into()), T::And];
        let table = [("bill", vec![1, 3, 5])];
        let tree = build_tree(&rpn, lookup(&table)).unwrap();
        let all_docs = ids(&[1, 2, 3, 4, 5]);
        assert_eq!(evaluate(&tree, &all_docs), Vec::<DocId>::new());
    }

    #[test]
    fn malformed_rpn_is_error() {
        let rpn = vec![T::And, T::Term("bill".into())];
        let err = build_tree(&rpn, lookup(&[])).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedQuery));
    }
}
