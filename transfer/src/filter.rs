//! Search filtering of pane rows.

use std::str::FromStr;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::item::TransferItem;
use crate::pane::Pane;
use crate::partition::Row;

/// Built-in ways to match a search query against row labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Label contains the query verbatim.
    #[default]
    Substring,
    /// Case-insensitive fuzzy match, best matches first.
    Fuzzy,
}

impl FromStr for FilterMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" => Ok(FilterMode::Substring),
            "fuzzy" => Ok(FilterMode::Fuzzy),
            _ => Err(ParseError::FilterMode(s.to_string())),
        }
    }
}

/// Caller-supplied filter: `(query, item, pane) -> visible`.
pub type FilterOption<T> = Box<dyn Fn(&str, &T, Pane) -> bool>;

/// Rows of a pane that match `query`.
///
/// An empty query keeps every row in pane order.
pub fn filter_rows<'a, T: TransferItem>(
    rows: &[Row<'a, T>],
    query: &str,
    mode: FilterMode,
) -> Vec<Row<'a, T>> {
    if query.is_empty() {
        return rows.to_vec();
    }
    match mode {
        FilterMode::Substring => rows
            .iter()
            .filter(|row| row.label().contains(query))
            .cloned()
            .collect(),
        FilterMode::Fuzzy => fuzzy_rows(rows, query),
    }
}

/// Rows whose label fuzzy-matches `query`, best score first.
///
/// Rows with equal scores keep their pane order.
fn fuzzy_rows<'a, T: TransferItem>(rows: &[Row<'a, T>], query: &str) -> Vec<Row<'a, T>> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut scored: Vec<(u32, &Row<'a, T>)> = rows
        .iter()
        .filter_map(|row| {
            let label = row.label();
            let score = pattern.score(Utf32Str::new(&label, &mut buf), &mut matcher)?;
            Some((score, row))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, row)| row.clone()).collect()
}

/// Rows of a pane accepted by a caller-supplied filter.
pub fn filter_rows_with<'a, T: TransferItem>(
    rows: &[Row<'a, T>],
    query: &str,
    pane: Pane,
    option: &FilterOption<T>,
) -> Vec<Row<'a, T>> {
    if query.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| option(query, row.item, pane))
        .cloned()
        .collect()
}
