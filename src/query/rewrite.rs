//! The algebraic rewriter (C7): flattening, double-NOT elimination, De
//! Morgan contraction, and AND/NOT fusion, applied as two top-down passes
//! over the tree — exactly as examples/original_source/search.py applies
//! `consolidate_ops()` (pass 1) followed by `consolidate_children()`
//! (pass 2) before evaluation. `expected_count` is a separate pure
//! function rather than a field mutated during either pass (SPEC_FULL.md
//! §9 D1).

use crate::query::node::Node;

/// Runs both rewrite passes and returns the normalized tree.
pub fn rewrite(node: Node) -> Node {
    let result = consolidate(flatten(node));
    debug_assert!(
        no_same_kind_child(&result),
        "rewrite left an And/Or with a same-kind child: {result:?}"
    );
    result
}

/// SPEC_FULL.md §3 invariant 4: no `And` has an `And` child, no `Or` has an
/// `Or` child. Checked with `debug_assert!` only (SPEC_FULL.md §7) — a
/// violation means `consolidate`/`demorgan` failed to re-flatten a
/// synthesized node, not something a caller can recover from.
fn no_same_kind_child(node: &Node) -> bool {
    match node {
        Node::Leaf { .. } => true,
        Node::And(children) => children
            .iter()
            .all(|c| !matches!(c, Node::And(_)) && no_same_kind_child(c)),
        Node::Or(children) => children
            .iter()
            .all(|c| !matches!(c, Node::Or(_)) && no_same_kind_child(c)),
        Node::Not(child) => no_same_kind_child(child),
        Node::AndNot(left, right) => no_same_kind_child(left) && no_same_kind_child(right),
    }
}

/// Pass 1: flatten associative `AND`/`OR` chains and collapse runs of
/// consecutive `NOT`s.
fn flatten(node: Node) -> Node {
    match node {
        Node::Leaf { .. } => node,
        Node::And(children) => {
            let mut gathered = Vec::new();
            for child in children {
                gather_same(child, true, &mut gathered);
            }
            Node::And(gathered.into_iter().map(flatten).collect())
        }
        Node::Or(children) => {
            let mut gathered = Vec::new();
            for child in children {
                gather_same(child, false, &mut gathered);
            }
            Node::Or(gathered.into_iter().map(flatten).collect())
        }
        Node::Not(child) => {
            let (innermost, negated) = strip_not_chain(Node::Not(child));
            let innermost = flatten(innermost);
            if negated {
                Node::Not(Box::new(innermost))
            } else {
                innermost
            }
        }
        Node::AndNot(left, right) => {
            Node::AndNot(Box::new(flatten(*left)), Box::new(flatten(*right)))
        }
    }
}

/// Recurses through a chain of the same associative operator
/// (`is_and` selects `And` vs `Or`), pushing every non-matching descendant
/// as an opaque leaf of the flattening step.
fn gather_same(node: Node, is_and: bool, out: &mut Vec<Node>) {
    match node {
        Node::And(children) if is_and => {
            for child in children {
                gather_same(child, is_and, out);
            }
        }
        Node::Or(children) if !is_and => {
            for child in children {
                gather_same(child, is_and, out);
            }
        }
        other => out.push(other),
    }
}

/// Walks a chain of `Not` nodes (including the one passed in) down to its
/// first non-`Not` descendant, returning that descendant plus whether an
/// odd number of `Not`s were stripped (i.e. whether the negation survives).
fn strip_not_chain(node: Node) -> (Node, bool) {
    match node {
        Node::Not(child) => {
            let (inner, negated) = strip_not_chain(*child);
            (inner, !negated)
        }
        other => (other, false),
    }
}

enum DemorganResult {
    /// The node keeps its operator; these are its (possibly reduced) children.
    SameOp(Vec<Node>),
    /// Two or more children were `Not`s and there were no other children —
    /// the whole node becomes this single `Not`.
    Collapsed(Node),
}

/// De Morgan contraction: when an `And`/`Or` node has two or more `Not`
/// children, pull their grandchildren into a synthesized dual-operator node
/// wrapped in a single `Not` (SPEC_FULL.md §4.7 step 3).
fn demorgan(children: Vec<Node>, is_and: bool) -> DemorganResult {
    let mut nots = Vec::new();
    let mut rest = Vec::new();
    for child in children {
        match child {
            Node::Not(inner) => nots.push(*inner),
            other => rest.push(other),
        }
    }

    if nots.len() > 1 {
        let dual = if is_and { Node::Or(nots) } else { Node::And(nots) };
        // The grandchildren pulled out of each NOT may themselves be an
        // Or (resp. And) — e.g. `NOT (a OR b) AND NOT c` — which would
        // otherwise leave a same-kind child under the synthesized dual
        // node. Re-flatten it so invariant 4 (SPEC_FULL.md §3) holds.
        let dual = flatten(dual);
        let synthesized = Node::Not(Box::new(dual));
        if rest.is_empty() {
            DemorganResult::Collapsed(synthesized)
        } else {
            rest.push(synthesized);
            DemorganResult::SameOp(rest)
        }
    } else {
        rest.extend(nots.into_iter().map(|inner| Node::Not(Box::new(inner))));
        DemorganResult::SameOp(rest)
    }
}

fn consolidate_or(children: Vec<Node>) -> Node {
    match demorgan(children, false) {
        DemorganResult::Collapsed(node) => node,
        DemorganResult::SameOp(children) => Node::Or(children),
    }
}

/// De Morgan for `And`, followed immediately by AND/NOT fusion (step 4):
/// after De Morgan an `And` node has at most one `Not` child, and if it has
/// exactly one, the node becomes `AndNot`.
fn consolidate_and(children: Vec<Node>) -> Node {
    let children = match demorgan(children, true) {
        DemorganResult::Collapsed(node) => return node,
        DemorganResult::SameOp(children) => children,
    };

    let not_index = children.iter().position(|c| matches!(c, Node::Not(_)));
    match not_index {
        Some(idx) => {
            let mut rest = children;
            let not_node = rest.remove(idx);
            let negated = match not_node {
                Node::Not(inner) => *inner,
                _ => unreachable!(),
            };
            let positive = match rest.len() {
                1 => rest.pop().unwrap(),
                _ => Node::And(rest),
            };
            Node::AndNot(Box::new(positive), Box::new(negated))
        }
        None => Node::And(children),
    }
}

/// Pass 2: De Morgan + AND/NOT fusion at this node, then recurse into
/// whatever children the (possibly retagged) node ends up with.
fn consolidate(node: Node) -> Node {
    let node = match node {
        Node::Or(children) => consolidate_or(children),
        Node::And(children) => consolidate_and(children),
        other => other,
    };

    match node {
        Node::Leaf { .. } => node,
        Node::And(children) => Node::And(children.into_iter().map(consolidate).collect()),
        Node::Or(children) => Node::Or(children.into_iter().map(consolidate).collect()),
        Node::Not(child) => Node::Not(Box::new(consolidate(*child))),
        Node::AndNot(left, right) => {
            Node::AndNot(Box::new(consolidate(*left)), Box::new(consolidate(*right)))
        }
    }
}

/// Pure, read-only estimate of a node's result size, computed bottom-up
/// (SPEC_FULL.md §3 invariant 5, §4.7 step 5). Used for tests and debug
/// logging only — `And`/`Or` evaluation order uses the true post-evaluation
/// lengths instead (see `node::evaluate`, mirroring the reference
/// implementation's `op_multi_and`).
pub fn expected_count(node: &Node, universe_size: usize) -> usize {
    match node {
        Node::Leaf { postings, .. } => postings.len(),
        Node::And(children) => children
            .iter()
            .map(|c| expected_count(c, universe_size))
            .min()
            .unwrap_or(0),
        Node::Or(children) => children.iter().map(|c| expected_count(c, universe_size)).sum(),
        Node::Not(child) => universe_size.saturating_sub(expected_count(child, universe_size)),
        Node::AndNot(left, _right) => expected_count(left, universe_size),
    }
}
