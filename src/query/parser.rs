//! Shunting-yard: infix query tokens to Reverse Polish Notation.
//!
//! Precedence is `NOT > AND > OR` (SPEC_FULL.md §4.5). `AND`/`OR` are
//! left-associative, as in the reference implementation
//! (examples/original_source/search.py `shunting_yard`/`precedence`): a
//! waiting operator of *equal* precedence is popped before the new one is
//! pushed, so `a AND b AND c` builds left-to-right.
//!
//! `NOT` is a unary prefix operator and must be treated as
//! right-associative, or a chain like `NOT NOT bill` builds an operand-less
//! operator at the head of the RPN sequence — the reference script's single
//! `<=` comparison conflates the two and mishandles this case. A waiting
//! `NOT` is popped only when the incoming operator has *strictly* higher
//! precedence, which never happens, so consecutive `NOT`s simply stack and
//! unwind innermost-first.

use crate::analysis::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::query::lexer::{lex, QueryToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpnToken {
    And,
    Or,
    Not,
    Term(String),
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Op {
    Or,
    And,
    Not,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Or => 0,
            Op::And => 1,
            Op::Not => 2,
        }
    }

    /// `NOT` is the only right-associative operator here.
    fn is_left_associative(self) -> bool {
        !matches!(self, Op::Not)
    }
}

enum StackEntry {
    Op(Op),
    LParen,
}

/// Parses a single query line into Reverse Polish Notation, normalizing
/// every leaf term through `analyzer` the same way the indexer normalized
/// document tokens.
pub fn parse(line: &str, analyzer: &Analyzer) -> Result<Vec<RpnToken>> {
    let tokens = lex(line);
    let mut output = Vec::new();
    let mut op_stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            QueryToken::Term(raw) => output.push(RpnToken::Term(analyzer.normalize_term(&raw))),
            QueryToken::And | QueryToken::Or | QueryToken::Not => {
                let op = match token {
                    QueryToken::And => Op::And,
                    QueryToken::Or => Op::Or,
                    QueryToken::Not => Op::Not,
                    _ => unreachable!(),
                };

                while let Some(StackEntry::Op(top)) = op_stack.last() {
                    let should_pop = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && op.is_left_associative());
                    if should_pop {
                        pop_into(&mut op_stack, &mut output)?;
                    } else {
                        break;
                    }
                }
                op_stack.push(StackEntry::Op(op));
            }
            QueryToken::LParen => op_stack.push(StackEntry::LParen),
            QueryToken::RParen => loop {
                match op_stack.pop() {
                    Some(StackEntry::LParen) => break,
                    Some(StackEntry::Op(op)) => output.push(op_to_rpn(op)),
                    None => {
                        return Err(Error::new(
                            ErrorKind::MalformedQuery,
                            "unbalanced parentheses: unmatched ')'",
                        ))
                    }
                }
            },
        }
    }

    while !op_stack.is_empty() {
        pop_into(&mut op_stack, &mut output)?;
    }

    Ok(output)
}

fn pop_into(op_stack: &mut Vec<StackEntry>, output: &mut Vec<RpnToken>) -> Result<()> {
    match op_stack.pop() {
        Some(StackEntry::Op(op)) => {
            output.push(op_to_rpn(op));
            Ok(())
        }
        Some(StackEntry::LParen) => Err(Error::new(
            ErrorKind::MalformedQuery,
            "unbalanced parentheses: unmatched '('",
        )),
        None => Ok(()),
    }
}

fn op_to_rpn(op: Op) -> RpnToken {
    match op {
        Op::And => RpnToken::And,
        Op::Or => RpnToken::Or,
        Op::Not => RpnToken::Not,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(line: &str) -> Vec<RpnToken> {
        let analyzer = Analyzer::new();
        parse(line, &analyzer).unwrap()
    }

    #[test]
    fn simple_and() {
        assert_eq!(
            rpn("bill AND gates"),
            vec![
                RpnToken::Term("bill".into()),
                RpnToken::Term("gate".into()),
                RpnToken::And
            ]
        );
    }

    #[test]
    fn precedence_not_over_and_over_or() {
        // bill OR gates AND NOT steve -> bill OR (gates AND (NOT steve))
        assert_eq!(
            rpn("bill OR gates AND NOT steve"),
            vec![
                RpnToken::Term("bill".into()),
                RpnToken::Term("gate".into()),
                RpnToken::Term("steve".into()),
                RpnToken::Not,
                RpnToken::And,
                RpnToken::Or,
            ]
        );
    }

    #[test]
    fn double_not_stacks_correctly() {
        assert_eq!(
            rpn("NOT NOT bill"),
            vec![RpnToken::Term("bill".into()), RpnToken::Not, RpnToken::Not,]
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            rpn("(bill OR gates) AND steve"),
            vec![
                RpnToken::Term("bill".into()),
                RpnToken::Term("gate".into()),
                RpnToken::Or,
                RpnToken::Term("steve".into()),
                RpnToken::And,
            ]
        );
    }

    #[test]
    fn unbalanced_parens_is_malformed_query() {
        let analyzer = Analyzer::new();
        let err = parse("(bill AND gates", &analyzer).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedQuery));
        let err = parse("bill)", &analyzer).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedQuery));
    }

    #[test]
    fn empty_query_is_empty_rpn() {
        let analyzer = Analyzer::new();
        assert!(parse("", &analyzer).unwrap().is_empty());
    }
}
