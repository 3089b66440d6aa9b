//! Queries over extracted icon records
//!
//! All filters are case-insensitive substring matches that keep the input order.
//! A query that matches nothing yields an empty list.

use crate::icons::metadata::IconRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Icons whose name contains `query`.
pub fn search(icons: &[IconRecord], query: &str) -> Vec<IconRecord> {
    let needle = query.to_lowercase();
    icons
        .iter()
        .filter(|icon| icon.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Icons whose section contains `section`.
pub fn filter_by_section(icons: &[IconRecord], section: &str) -> Vec<IconRecord> {
    let needle = section.to_lowercase();
    icons
        .iter()
        .filter(|icon| icon.section.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Unique non-empty section names, sorted ascending.
pub fn distinct_sections(icons: &[IconRecord]) -> Vec<String> {
    icons
        .iter()
        .filter(|icon| !icon.section.is_empty())
        .map(|icon| icon.section.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Counts shown in the default browse output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub filled: usize,
    pub outlined: usize,
    pub sections: usize,
}

pub fn summarize(icons: &[IconRecord]) -> Summary {
    let outlined = icons.iter().filter(|icon| icon.is_outlined).count();
    Summary {
        total: icons.len(),
        filled: icons.len() - outlined,
        outlined,
        sections: distinct_sections(icons).len(),
    }
}
