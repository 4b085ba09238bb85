//! Pure functions over sorted, deduplicated `DocId` lists. No I/O, no
//! allocation beyond the output (plus the multi-way OR's heap) — this is
//! the module the rest of the crate pays for in merge time, so it carries
//! none of the on-disk or parsing concerns.
//!
//! Ported from the square-root skip pointer algorithm in
//! examples/original_source/search.py (`op_and`, `op_and_not`, `op_not`,
//! `op_multi_and`, `op_multi_or`), kept functionally identical: the same
//! skip distance `floor(sqrt(len))`, the same anchor positions, the same
//! tie-break rules.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::core::types::DocId;

fn skip_distance(len: usize) -> usize {
    (len as f64).sqrt() as usize
}

/// True when `i` is a valid skip anchor for a list of skip distance `skip`.
fn is_anchor(i: usize, skip: usize) -> bool {
    skip != 0 && i % skip == 0
}

/// `p1 AND p2`: sorted intersection with skip pointers on both sides.
pub fn and(p1: &[DocId], p2: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    let skip1 = skip_distance(p1.len());
    let skip2 = skip_distance(p2.len());

    while i < p1.len() && j < p2.len() {
        if p1[i] == p2[j] {
            result.push(p1[i]);
            i += 1;
            j += 1;
        } else if p1[i] < p2[j] {
            if is_anchor(i, skip1) {
                let lookahead = i + skip1;
                if lookahead < p1.len() && p1[lookahead] <= p2[j] {
                    i = lookahead;
                    continue;
                }
            }
            i += 1;
        } else {
            if is_anchor(j, skip2) {
                let lookahead = j + skip2;
                if lookahead < p2.len() && p2[lookahead] <= p1[i] {
                    j = lookahead;
                    continue;
                }
            }
            j += 1;
        }
    }

    result
}

/// `p1 AND NOT p2`: everything in `p1` whose doc id does not also appear in
/// `p2`. Skip pointers apply only to `p2`, mirroring the reference
/// implementation — `p1`'s tail is appended verbatim once `p2` is
/// exhausted.
pub fn and_not(p1: &[DocId], p2: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    let skip2 = skip_distance(p2.len());

    while i < p1.len() && j < p2.len() {
        if p1[i] == p2[j] {
            i += 1;
            j += 1;
        } else if p1[i] < p2[j] {
            result.push(p1[i]);
            i += 1;
        } else {
            if is_anchor(j, skip2) {
                let lookahead = j + skip2;
                if lookahead < p2.len() && p2[lookahead] <= p1[i] {
                    j = lookahead;
                    continue;
                }
            }
            j += 1;
        }
    }

    result.extend_from_slice(&p1[i..]);
    result
}

/// `p1 OR p2`: linear sorted union, deduplicated.
pub fn or(p1: &[DocId], p2: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::with_capacity(p1.len().max(p2.len()));
    let (mut i, mut j) = (0, 0);

    while i < p1.len() && j < p2.len() {
        if p1[i] == p2[j] {
            result.push(p1[i]);
            i += 1;
            j += 1;
        } else if p1[i] < p2[j] {
            result.push(p1[i]);
            i += 1;
        } else {
            result.push(p2[j]);
            j += 1;
        }
    }

    result.extend_from_slice(&p1[i..]);
    result.extend_from_slice(&p2[j..]);
    result
}

/// `NOT p`, relative to the full universe of known document ids.
pub fn not(p: &[DocId], all_docs: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::with_capacity(all_docs.len().saturating_sub(p.len()));
    let (mut i, mut j) = (0, 0);

    while i < p.len() && j < all_docs.len() {
        if p[i] == all_docs[j] {
            i += 1;
            j += 1;
        } else {
            result.push(all_docs[j]);
            j += 1;
        }
    }

    result.extend_from_slice(&all_docs[j..]);
    result
}

/// `p1 AND p2 AND ... AND pN`. Sorts by ascending length first so the
/// smallest list bounds every subsequent intersection (SPEC_FULL.md §4.4).
/// Short-circuits once the running intersection is empty.
pub fn multi_and(mut lists: Vec<Vec<DocId>>) -> Vec<DocId> {
    if lists.is_empty() {
        return Vec::new();
    }
    lists.sort_by_key(|l| l.len());

    let mut iter = lists.into_iter();
    let mut result = iter.next().unwrap();

    for list in iter {
        if result.is_empty() {
            break;
        }
        result = and(&result, &list);
    }

    result
}

/// `p1 OR p2 OR ... OR pN` via a min-heap over every element of every list,
/// deduplicating against the last emitted value as the heap drains
/// (SPEC_FULL.md §4.4, §9).
pub fn multi_or(lists: Vec<Vec<DocId>>) -> Vec<DocId> {
    let mut heap: BinaryHeap<Reverse<u64>> = BinaryHeap::new();
    for list in &lists {
        for doc in list {
            heap.push(Reverse(doc.value()));
        }
    }

    let mut result = Vec::new();
    while let Some(Reverse(smallest)) = heap.pop() {
        if result.last().copied() != Some(DocId::new(smallest)) {
            result.push(DocId::new(smallest));
        }
    }

    result
}
