//! Frequency ranking of categorical daily values.

use std::collections::HashMap;
use std::hash::Hash;

/// One ranked value with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry<T> {
    pub value: T,
    pub count: usize,
}

/// Result of ranking a sequence of categorical values.
///
/// An empty input yields `NoData` rather than an empty list, so callers
/// can tell "nothing logged this week" apart from a ranked result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranking<T> {
    NoData,
    Ranked(Vec<RankEntry<T>>),
}

impl<T> Ranking<T> {
    pub fn entries(&self) -> Option<&[RankEntry<T>]> {
        match self {
            Ranking::NoData => None,
            Ranking::Ranked(entries) => Some(entries),
        }
    }

    /// The most frequent value, if any values were present.
    pub fn top(&self) -> Option<&T> {
        self.entries().and_then(|e| e.first()).map(|e| &e.value)
    }
}

/// Counts distinct values and orders them by descending count.
///
/// Equal counts keep first-seen order: the value that appeared earliest
/// in the input ranks first.
pub fn rank_by_frequency<T, I>(values: I) -> Ranking<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut entries: Vec<RankEntry<T>> = Vec::new();
    let mut index: HashMap<T, usize> = HashMap::new();

    for value in values {
        match index.get(&value) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push(RankEntry { value, count: 1 });
            }
        }
    }

    if entries.is_empty() {
        return Ranking::NoData;
    }

    // Stable sort: ties stay in first-seen order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    Ranking::Ranked(entries)
}
