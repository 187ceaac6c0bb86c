//! # Display Indexes
//!
//! Item ids are UUIDs, which nobody wants to type. Hosts show each item with its
//! 1-based position in the current list and let the user refer to items that
//! way (`2`, or a range like `2-4`). Positions are resolved to [`ItemId`]s right
//! away, before any mutation runs, so a command touching several items is not
//! thrown off by the list shifting underneath it.

use crate::error::{DraglyError, Result};
use crate::model::{Item, ItemId};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A user-facing, 1-based position in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    pub fn new(position: usize) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based offset into the item list.
    pub fn offset(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(DisplayIndex::new)
            .ok_or_else(|| format!("Invalid index format: {}", s))
    }
}

#[derive(Debug, Clone)]
pub struct DisplayItem<'a> {
    pub index: DisplayIndex,
    pub item: &'a Item,
}

pub fn index_items(items: &[Item]) -> Vec<DisplayItem<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            index: DisplayIndex(i + 1),
            item,
        })
        .collect()
}

/// Parses a single index ("3") or an inclusive range ("3-5").
pub fn parse_index_or_range(s: &str) -> std::result::Result<Vec<DisplayIndex>, String> {
    if let Some((start, end)) = s.split_once('-') {
        let start = DisplayIndex::from_str(start)?;
        let end = DisplayIndex::from_str(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok((start.get()..=end.get()).map(DisplayIndex).collect());
    }
    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

/// Parses every input, flattening ranges and dropping repeats (first one wins).
pub fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    let mut seen = HashSet::new();
    let mut out: Vec<DisplayIndex> = Vec::new();
    for input in inputs {
        for idx in parse_index_or_range(input.as_ref()).map_err(DraglyError::Api)? {
            if seen.insert(idx) {
                out.push(idx);
            }
        }
    }
    Ok(out)
}

/// Maps display indexes to ids in `items`. Any out-of-range index fails the whole call.
pub fn resolve_indexes(items: &[Item], indexes: &[DisplayIndex]) -> Result<Vec<ItemId>> {
    indexes
        .iter()
        .map(|idx| {
            items
                .get(idx.offset())
                .map(|item| item.id())
                .ok_or_else(|| DraglyError::Api(format!("Index {} not found", idx)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(texts: &[&str]) -> Vec<Item> {
        texts.iter().map(|t| Item::new(t).unwrap()).collect()
    }

    #[test]
    fn test_index_items_is_one_based_in_list_order() {
        let list = items(&["newest", "older"]);
        let indexed = index_items(&list);
        assert_eq!(indexed[0].index.get(), 1);
        assert_eq!(indexed[0].item.text(), "newest");
        assert_eq!(indexed[1].index.to_string(), "2");
    }

    #[test]
    fn test_parse_single_and_range() {
        assert_eq!(
            parse_index_or_range("3").unwrap(),
            vec![DisplayIndex::new(3).unwrap()]
        );
        let range: Vec<usize> = parse_index_or_range("2-4")
            .unwrap()
            .into_iter()
            .map(DisplayIndex::get)
            .collect();
        assert_eq!(range, vec![2, 3, 4]);
    }

    #[test]
    fn test_parse_rejects_zero_garbage_and_reversed() {
        assert!(parse_index_or_range("0").is_err());
        assert!(parse_index_or_range("abc").is_err());
        assert!(parse_index_or_range("5-3").is_err());
        assert!(parse_index_or_range("-3").is_err());
    }

    #[test]
    fn test_parse_indexes_dedupes() {
        let parsed = parse_indexes(&["1-3", "2", "5"]).unwrap();
        let raw: Vec<usize> = parsed.into_iter().map(DisplayIndex::get).collect();
        assert_eq!(raw, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_parse_indexes_large_overlapping_ranges() {
        let parsed = parse_indexes(&["1-200000", "100-300000", "7"]).unwrap();
        assert_eq!(parsed.len(), 300_000);
        assert_eq!(parsed[0].get(), 1);
        assert_eq!(parsed[299_999].get(), 300_000);
    }

    #[test]
    fn test_resolve_indexes() {
        let list = items(&["a", "b", "c"]);
        let ids = resolve_indexes(&list, &parse_indexes(&["3", "1"]).unwrap()).unwrap();
        assert_eq!(ids, vec![list[2].id(), list[0].id()]);
    }

    #[test]
    fn test_resolve_out_of_range_fails() {
        let list = items(&["a"]);
        let err = resolve_indexes(&list, &parse_indexes(&["2"]).unwrap()).unwrap_err();
        assert!(err.to_string().contains("Index 2 not found"));
    }
}
