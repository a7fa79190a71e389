//! Parsing of the `|`-separated keys that index the terms of a form.
//!
//! A key such as `0|2|3` lists vertex indices, and a key such as `2|1|0` lists the exponents of a
//! monomial. Entries may be surrounded by whitespace. The empty key has no entries.
//!
//! Every error produced here uses the key itself as its source text, with spans pointing at the
//! offending entries.

use crate::error::{ExponentLength, IndexOutOfRange, InvalidExponent, InvalidIndex, NotIncreasing};
use dupont_error::Error;
use std::{fmt::Display, ops::Range};

/// An entry of a key, along with its location in the key.
#[derive(Debug, Clone, PartialEq)]
struct Entry<'a> {
    text: &'a str,
    span: Range<usize>,
}

/// Splits a key into its entries. The span of each entry excludes surrounding whitespace.
fn split_key(key: &str) -> Vec<Entry<'_>> {
    if key.trim().is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut start = 0;
    for raw in key.split('|') {
        let text = raw.trim();
        let leading = raw.len() - raw.trim_start().len();
        let entry_start = start + leading;
        entries.push(Entry { text, span: entry_start..entry_start + text.len() });
        start += raw.len() + 1;
    }
    entries
}

/// Parses a single vertex index, checking that it is a vertex of the `n`-simplex.
fn parse_vertex(key: &str, entry: &Entry, n: usize) -> Result<usize, Error> {
    let index = entry.text.parse::<usize>().map_err(|_| Error::new(
        key,
        vec![entry.span.clone()],
        InvalidIndex { text: entry.text.to_string() },
    ))?;

    if index > n {
        return Err(Error::new(key, vec![entry.span.clone()], IndexOutOfRange { index, n }));
    }

    Ok(index)
}

/// Parses a key of vertex indices in any order.
pub fn parse_indices(key: &str, n: usize) -> Result<Vec<usize>, Error> {
    split_key(key)
        .iter()
        .map(|entry| parse_vertex(key, entry, n))
        .collect()
}

/// Parses a key of strictly increasing vertex indices.
pub fn parse_increasing(key: &str, n: usize) -> Result<Vec<usize>, Error> {
    let entries = split_key(key);
    let mut indices = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let index = parse_vertex(key, entry, n)?;
        if let Some(&previous) = indices.last() {
            if index <= previous {
                return Err(Error::new(
                    key,
                    vec![entries[i - 1].span.clone(), entry.span.clone()],
                    NotIncreasing { previous, found: index },
                ));
            }
        }
        indices.push(index);
    }

    Ok(indices)
}

/// Parses the exponent vector of a monomial on the `n`-simplex, which must have exactly `n + 1`
/// entries.
pub fn parse_exponents(key: &str, n: usize) -> Result<Vec<u32>, Error> {
    let entries = split_key(key);
    if entries.len() != n + 1 {
        return Err(Error::new(
            key,
            vec![0..key.len()],
            ExponentLength { expected: n + 1, found: entries.len() },
        ));
    }

    entries
        .iter()
        .map(|entry| entry.text.parse::<u32>().map_err(|_| Error::new(
            key,
            vec![entry.span.clone()],
            InvalidExponent { text: entry.text.to_string() },
        )))
        .collect()
}

/// Sorts the given indices in increasing order.
///
/// Returns whether the sorting permutation is odd, or [`None`] if an index appears more than once
/// (the indices are left sorted either way).
pub fn sort_with_sign(indices: &mut [usize]) -> Option<bool> {
    // insertion sort, counting transpositions
    let mut odd = false;
    for i in 1..indices.len() {
        let mut j = i;
        while j > 0 && indices[j - 1] > indices[j] {
            indices.swap(j - 1, j);
            odd = !odd;
            j -= 1;
        }
    }

    if indices.windows(2).any(|pair| pair[0] == pair[1]) {
        None
    } else {
        Some(odd)
    }
}

/// Joins the given entries into a key.
pub fn join_key<T: Display>(entries: &[T]) -> String {
    entries.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}
